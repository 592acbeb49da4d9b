pub mod countries_service;
pub mod persons_service;

pub use crate::domain::dto::{
    CountryAddRequest, CountryResponse, PersonAddRequest, PersonResponse, PersonUpdateRequest,
};
pub use crate::domain::fields::{SearchField, SortField};
pub use crate::domain::model::SortOrder;
pub use crate::domain::ports::{CountriesRepository, PersonsRepository};
pub use crate::utils::error::Result;
