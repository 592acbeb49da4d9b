pub mod toml_config;

pub use toml_config::{AppConfig, StorageBackend};

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "person-crud")]
#[command(about = "Manage person and country records")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Override the JSON data file from the configuration")]
    pub data_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a new country
    AddCountry {
        #[arg(long)]
        name: String,
    },
    /// List all countries
    ListCountries,
    /// Add a new person
    AddPerson(PersonArgs),
    /// List persons, optionally filtered and sorted
    ListPersons {
        #[arg(long, default_value = "PersonName", help = "Field to search, see search-fields")]
        search_by: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "PersonName")]
        sort_by: String,
        #[arg(long, default_value = "ASC")]
        order: String,
    },
    /// List the fields persons can be searched by
    SearchFields,
    /// Show a single person
    ShowPerson {
        #[arg(long)]
        id: String,
    },
    /// Overwrite the editable fields of a person
    UpdatePerson {
        #[arg(long)]
        id: String,
        #[command(flatten)]
        person: PersonArgs,
    },
    /// Delete a person
    DeletePerson {
        #[arg(long)]
        id: String,
    },
    /// List persons living in a country
    CountryPersons {
        #[arg(long)]
        country_id: String,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Args)]
pub struct PersonArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long, help = "Date of birth as YYYY-MM-DD")]
    pub date_of_birth: Option<String>,

    #[arg(long, help = "Male, Female or Other")]
    pub gender: Option<String>,

    #[arg(long)]
    pub country_id: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub newsletters: bool,
}
