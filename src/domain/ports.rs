use crate::domain::model::{Country, Person};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub type PersonPredicate<'a> = dyn Fn(&Person) -> bool + Send + Sync + 'a;

#[async_trait]
pub trait CountriesRepository: Send + Sync {
    async fn add_country(&self, country: Country) -> Result<Country>;
    async fn get_all_countries(&self) -> Result<Vec<Country>>;
    async fn get_country_by_country_id(&self, country_id: Uuid) -> Result<Option<Country>>;
    async fn get_country_by_country_name(&self, country_name: &str) -> Result<Option<Country>>;
}

/// Reads return persons with `country` joined from the country table.
#[async_trait]
pub trait PersonsRepository: Send + Sync {
    async fn add_person(&self, person: Person) -> Result<Person>;
    async fn get_all_persons(&self) -> Result<Vec<Person>>;
    async fn get_person_by_person_id(&self, person_id: Uuid) -> Result<Option<Person>>;
    async fn get_filtered_persons(&self, predicate: &PersonPredicate<'_>) -> Result<Vec<Person>>;
    /// Returns the stored record, or the input unchanged when no record matches.
    async fn update_person(&self, person: Person) -> Result<Person>;
    async fn delete_person_by_person_id(&self, person_id: Uuid) -> Result<bool>;
}
