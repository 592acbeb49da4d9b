use anyhow::Result;
use chrono::NaiveDate;
use person_crud::core::{CountryAddRequest, PersonAddRequest, PersonUpdateRequest};
use person_crud::domain::model::Gender;
use person_crud::{CountriesService, CrudError, JsonFileStore, PersonsService};
use tempfile::TempDir;

#[tokio::test]
async fn test_records_survive_reopen() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().join("nested").join("store.json");

    let store = JsonFileStore::open(&data_path).await?;
    let countries = CountriesService::new(store.clone());
    let persons = PersonsService::new(store);

    let canada = countries
        .add_country(Some(CountryAddRequest::new("Canada")))
        .await?;
    let alice = persons
        .add_person(Some(PersonAddRequest {
            person_name: Some("Alice".to_string()),
            email: Some("a@x.com".to_string()),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 5),
            gender: Some(Gender::Female),
            country_id: Some(canada.country_id),
            address: None,
            receive_news_letters: true,
        }))
        .await?;
    assert!(data_path.exists());
    assert!(!temp_dir.path().join("nested").join("store.json.tmp").exists());

    let reopened = JsonFileStore::open(&data_path).await?;
    let countries = CountriesService::new(reopened.clone());
    let persons = PersonsService::new(reopened);

    assert_eq!(countries.get_all_countries().await?, vec![canada]);
    let loaded = persons
        .get_person_by_person_id(Some(alice.person_id))
        .await?;
    assert_eq!(loaded, Some(alice));
    Ok(())
}

#[tokio::test]
async fn test_update_and_delete_are_persisted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().join("store.json");

    let persons = PersonsService::new(JsonFileStore::open(&data_path).await?);
    let bob = persons
        .add_person(Some(PersonAddRequest {
            person_name: Some("Bob".to_string()),
            ..Default::default()
        }))
        .await?;
    let carl = persons
        .add_person(Some(PersonAddRequest {
            person_name: Some("Carl".to_string()),
            ..Default::default()
        }))
        .await?;

    persons
        .update_person(Some(PersonUpdateRequest {
            person_id: bob.person_id,
            person_name: Some("Robert".to_string()),
            address: Some("12 Elm Street".to_string()),
            ..Default::default()
        }))
        .await?;
    assert!(persons.delete_person(Some(carl.person_id)).await?);

    let reopened = PersonsService::new(JsonFileStore::open(&data_path).await?);
    let all = reopened.get_all_persons().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].person_name.as_deref(), Some("Robert"));
    assert_eq!(all[0].address.as_deref(), Some("12 Elm Street"));

    // 稅號欄位有預設值且不會被更新覆寫
    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&data_path)?)?;
    assert_eq!(raw["persons"][0]["tin"], "0");
    Ok(())
}

#[tokio::test]
async fn test_malformed_file_is_storage_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_path = temp_dir.path().join("broken.json");
    std::fs::write(&data_path, "{ not json")?;

    let result = JsonFileStore::open(&data_path).await;
    assert!(matches!(result, Err(CrudError::SerializationError(_))));
    Ok(())
}

#[tokio::test]
async fn test_failed_write_leaves_store_unchanged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("nested");
    let data_path = data_dir.join("store.json");

    let store = JsonFileStore::open(&data_path).await?;
    let countries = CountriesService::new(store.clone());
    let persons = PersonsService::new(store);

    // 資料目錄位置被一般檔案佔用，寫入必定失敗
    std::fs::write(&data_dir, "not a directory")?;

    let first = countries
        .add_country(Some(CountryAddRequest::new("Canada")))
        .await;
    assert!(matches!(first, Err(CrudError::IoError(_))));
    assert!(countries.get_all_countries().await?.is_empty());

    let person = persons
        .add_person(Some(PersonAddRequest {
            person_name: Some("Alice".to_string()),
            ..Default::default()
        }))
        .await;
    assert!(matches!(person, Err(CrudError::IoError(_))));
    assert!(persons.get_all_persons().await?.is_empty());

    // 恢復後重試不應被誤判為重複名稱
    std::fs::remove_file(&data_dir)?;
    let retried = countries
        .add_country(Some(CountryAddRequest::new("Canada")))
        .await?;
    assert_eq!(countries.get_all_countries().await?, vec![retried]);
    assert!(data_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_failed_delete_keeps_person() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().join("nested");
    let data_path = data_dir.join("store.json");

    let persons = PersonsService::new(JsonFileStore::open(&data_path).await?);
    let alice = persons
        .add_person(Some(PersonAddRequest {
            person_name: Some("Alice".to_string()),
            ..Default::default()
        }))
        .await?;

    std::fs::remove_dir_all(&data_dir)?;
    std::fs::write(&data_dir, "not a directory")?;

    let result = persons.delete_person(Some(alice.person_id)).await;
    assert!(matches!(result, Err(CrudError::IoError(_))));
    assert_eq!(
        persons.get_person_by_person_id(Some(alice.person_id)).await?,
        Some(alice)
    );
    Ok(())
}
