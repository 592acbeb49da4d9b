use crate::domain::model::{Country, Person};
use crate::domain::ports::{CountriesRepository, PersonPredicate, PersonsRepository};
use crate::utils::error::{CrudError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Table contents shared by the in-memory and file-backed stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub persons: Vec<Person>,
}

impl StoreData {
    fn joined(&self, person: &Person) -> Person {
        let mut person = person.clone();
        person.country = person
            .country_id
            .and_then(|id| self.countries.iter().find(|c| c.country_id == id))
            .cloned();
        person
    }

    /// Rejects a name that is already stored, checked under the caller's write lock.
    pub fn insert_country(&mut self, country: Country) -> Result<Country> {
        if let Some(name) = country.country_name.as_deref() {
            if self.country_by_name(name).is_some() {
                return Err(CrudError::validation(
                    "country_name",
                    format!("Country name '{}' already exists", name),
                ));
            }
        }
        self.countries.push(country.clone());
        Ok(country)
    }

    pub fn country_by_id(&self, country_id: Uuid) -> Option<Country> {
        self.countries
            .iter()
            .find(|c| c.country_id == country_id)
            .cloned()
    }

    pub fn country_by_name(&self, country_name: &str) -> Option<Country> {
        self.countries
            .iter()
            .find(|c| c.country_name.as_deref() == Some(country_name))
            .cloned()
    }

    pub fn insert_person(&mut self, mut person: Person) -> Person {
        // 導覽屬性不存入資料表
        person.country = None;
        self.persons.push(person.clone());
        self.joined(&person)
    }

    pub fn all_persons(&self) -> Vec<Person> {
        self.persons.iter().map(|p| self.joined(p)).collect()
    }

    pub fn person_by_id(&self, person_id: Uuid) -> Option<Person> {
        self.persons
            .iter()
            .find(|p| p.person_id == person_id)
            .map(|p| self.joined(p))
    }

    pub fn filter_persons(&self, predicate: &PersonPredicate<'_>) -> Vec<Person> {
        self.persons
            .iter()
            .map(|p| self.joined(p))
            .filter(|p| predicate(p))
            .collect()
    }

    /// Returns `None` when no stored person has the same id.
    pub fn replace_person(&mut self, person: &Person) -> Option<Person> {
        let stored = self
            .persons
            .iter_mut()
            .find(|p| p.person_id == person.person_id)?;

        stored.person_name = person.person_name.clone();
        stored.gender = person.gender.clone();
        stored.address = person.address.clone();
        stored.receive_news_letters = person.receive_news_letters;
        stored.country_id = person.country_id;
        stored.email = person.email.clone();
        stored.date_of_birth = person.date_of_birth;

        let stored = stored.clone();
        Some(self.joined(&stored))
    }

    pub fn remove_person(&mut self, person_id: Uuid) -> bool {
        let before = self.persons.len();
        self.persons.retain(|p| p.person_id != person_id);
        self.persons.len() < before
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<StoreData>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CountriesRepository for InMemoryStore {
    async fn add_country(&self, country: Country) -> Result<Country> {
        self.data.write().await.insert_country(country)
    }

    async fn get_all_countries(&self) -> Result<Vec<Country>> {
        Ok(self.data.read().await.countries.clone())
    }

    async fn get_country_by_country_id(&self, country_id: Uuid) -> Result<Option<Country>> {
        Ok(self.data.read().await.country_by_id(country_id))
    }

    async fn get_country_by_country_name(&self, country_name: &str) -> Result<Option<Country>> {
        Ok(self.data.read().await.country_by_name(country_name))
    }
}

#[async_trait]
impl PersonsRepository for InMemoryStore {
    async fn add_person(&self, person: Person) -> Result<Person> {
        Ok(self.data.write().await.insert_person(person))
    }

    async fn get_all_persons(&self) -> Result<Vec<Person>> {
        Ok(self.data.read().await.all_persons())
    }

    async fn get_person_by_person_id(&self, person_id: Uuid) -> Result<Option<Person>> {
        Ok(self.data.read().await.person_by_id(person_id))
    }

    async fn get_filtered_persons(&self, predicate: &PersonPredicate<'_>) -> Result<Vec<Person>> {
        Ok(self.data.read().await.filter_persons(predicate))
    }

    async fn update_person(&self, person: Person) -> Result<Person> {
        let updated = self.data.write().await.replace_person(&person);
        Ok(updated.unwrap_or(person))
    }

    async fn delete_person_by_person_id(&self, person_id: Uuid) -> Result<bool> {
        Ok(self.data.write().await.remove_person(person_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(name: &str) -> Country {
        Country {
            country_id: Uuid::new_v4(),
            country_name: Some(name.to_string()),
        }
    }

    fn person(name: &str, country_id: Option<Uuid>) -> Person {
        Person {
            person_id: Uuid::new_v4(),
            person_name: Some(name.to_string()),
            email: None,
            date_of_birth: None,
            gender: None,
            country_id,
            address: None,
            receive_news_letters: false,
            tin: Some("0".to_string()),
            country: None,
        }
    }

    #[tokio::test]
    async fn test_reads_join_country() {
        let store = InMemoryStore::new();
        let canada = store.add_country(country("Canada")).await.unwrap();
        let added = store
            .add_person(person("Ann", Some(canada.country_id)))
            .await
            .unwrap();

        assert_eq!(added.country_name(), Some("Canada"));
        let loaded = store
            .get_person_by_person_id(added.person_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.country, Some(canada));
    }

    #[tokio::test]
    async fn test_duplicate_country_name_rejected_by_store() {
        let store = InMemoryStore::new();
        store.add_country(country("Canada")).await.unwrap();

        let result = store.add_country(country("Canada")).await;
        assert!(matches!(result, Err(CrudError::ValidationError { .. })));
        assert_eq!(store.get_all_countries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_person_returns_input() {
        let store = InMemoryStore::new();
        let ghost = person("Ghost", None);
        let returned = store.update_person(ghost.clone()).await.unwrap();

        assert_eq!(returned, ghost);
        assert!(store.get_all_persons().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_tin() {
        let store = InMemoryStore::new();
        let mut stored = store.add_person(person("Ann", None)).await.unwrap();
        stored.person_name = Some("Anna".to_string());
        stored.tin = Some("12345678".to_string());

        let updated = store.update_person(stored).await.unwrap();
        assert_eq!(updated.person_name.as_deref(), Some("Anna"));
        assert_eq!(updated.tin.as_deref(), Some("0"));
    }

    #[tokio::test]
    async fn test_delete_reports_removal() {
        let store = InMemoryStore::new();
        let stored = store.add_person(person("Ann", None)).await.unwrap();

        assert!(store.delete_person_by_person_id(stored.person_id).await.unwrap());
        assert!(!store.delete_person_by_person_id(stored.person_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_filter_by_predicate() {
        let store = InMemoryStore::new();
        store.add_person(person("Ann", None)).await.unwrap();
        store.add_person(person("Bob", None)).await.unwrap();

        let predicate = |p: &Person| p.person_name.as_deref() == Some("Bob");
        let found = store.get_filtered_persons(&predicate).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].person_name.as_deref(), Some("Bob"));
    }
}
