use crate::adapters::memory::StoreData;
use crate::domain::model::{Country, Person};
use crate::domain::ports::{CountriesRepository, PersonPredicate, PersonsRepository};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Keeps both tables in memory and rewrites the whole JSON document after
/// every write. Writes are staged on a copy and only become visible once the
/// document has been replaced on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Arc<RwLock<StoreData>>,
}

impl JsonFileStore {
    /// Loads `path` if it exists, otherwise starts empty. The file is
    /// created on the first write.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", path.display());
                StoreData::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened data file {}", path.display());
        Ok(Self {
            path,
            data: Arc::new(RwLock::new(data)),
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    /// Writes to a sibling temp file and renames it over the data file, so a
    /// crash mid-write leaves the previous document intact.
    async fn persist(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(data)?;
        let staging = self.staging_path();
        tokio::fs::write(&staging, json).await?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Persists `staged` and swaps it in. On failure `current` is untouched.
    async fn commit(&self, current: &mut StoreData, staged: StoreData) -> Result<()> {
        if let Err(e) = self.persist(&staged).await {
            tracing::error!("Failed to write {}: {}", self.path.display(), e);
            return Err(e);
        }
        *current = staged;
        Ok(())
    }
}

#[async_trait]
impl CountriesRepository for JsonFileStore {
    async fn add_country(&self, country: Country) -> Result<Country> {
        let mut data = self.data.write().await;
        let mut staged = data.clone();
        let stored = staged.insert_country(country)?;
        self.commit(&mut data, staged).await?;
        Ok(stored)
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
impl PersonsRepository for JsonFileStore {
    async fn add_person(&self, person: Person) -> Result<Person> {
        let mut data = self.data.write().await;
        let mut staged = data.clone();
        let stored = staged.insert_person(person);
        self.commit(&mut data, staged).await?;
        Ok(stored)
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
        let mut data = self.data.write().await;
        let mut staged = data.clone();
        match staged.replace_person(&person) {
            Some(updated) => {
                self.commit(&mut data, staged).await?;
                Ok(updated)
            }
            None => Ok(person),
        }
    }

    async fn delete_person_by_person_id(&self, person_id: Uuid) -> Result<bool> {
        let mut data = self.data.write().await;
        let mut staged = data.clone();
        if !staged.remove_person(person_id) {
            return Ok(false);
        }
        self.commit(&mut data, staged).await?;
        Ok(true)
    }
}
