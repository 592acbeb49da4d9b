pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{InMemoryStore, JsonFileStore};
pub use config::AppConfig;
pub use core::{countries_service::CountriesService, persons_service::PersonsService};
pub use utils::error::{CrudError, Result};
