use crate::core::{
    PersonAddRequest, PersonResponse, PersonUpdateRequest, PersonsRepository, SearchField,
    SortField, SortOrder,
};
use crate::domain::model::Person;
use crate::utils::error::{CrudError, Result};
use crate::utils::validation::Validate;
use uuid::Uuid;

pub struct PersonsService<R: PersonsRepository> {
    repository: R,
}

fn to_responses(persons: &[Person]) -> Vec<PersonResponse> {
    persons.iter().map(PersonResponse::from).collect()
}

impl<R: PersonsRepository> PersonsService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn add_person(&self, request: Option<PersonAddRequest>) -> Result<PersonResponse> {
        let request = request.ok_or(CrudError::InvalidArgument {
            argument: "person_add_request",
        })?;
        request.validate()?;

        let mut person = request.to_person();
        person.person_id = Uuid::new_v4();

        let stored = self.repository.add_person(person).await?;
        tracing::info!("Added person {}", stored.person_id);

        Ok(PersonResponse::from(&stored))
    }

    pub async fn get_all_persons(&self) -> Result<Vec<PersonResponse>> {
        let persons = self.repository.get_all_persons().await?;
        tracing::debug!("Loaded {} persons", persons.len());
        Ok(to_responses(&persons))
    }

    pub async fn get_person_by_person_id(
        &self,
        person_id: Option<Uuid>,
    ) -> Result<Option<PersonResponse>> {
        let Some(person_id) = person_id else {
            return Ok(None);
        };

        let person = self.repository.get_person_by_person_id(person_id).await?;
        Ok(person.as_ref().map(PersonResponse::from))
    }

    /// Persons whose `search_by` field contains `search_string`.
    ///
    /// An unknown field or an empty search string returns every person.
    pub async fn get_filtered_persons(
        &self,
        search_by: &str,
        search_string: Option<&str>,
    ) -> Result<Vec<PersonResponse>> {
        let search = search_string.unwrap_or_default();

        let persons = match search_by.parse::<SearchField>() {
            Ok(field) if !search.is_empty() => {
                tracing::debug!("Filtering persons by {:?} containing {:?}", field, search);
                let predicate = |person: &Person| field.matches(person, search);
                self.repository.get_filtered_persons(&predicate).await?
            }
            Ok(_) => self.repository.get_all_persons().await?,
            Err(reason) => {
                tracing::debug!("{}, returning all persons", reason);
                self.repository.get_all_persons().await?
            }
        };

        Ok(to_responses(&persons))
    }

    /// Stable sort of `persons` by `sort_by`. An empty or unknown field
    /// returns the input unchanged.
    pub fn get_sorted_persons(
        &self,
        mut persons: Vec<PersonResponse>,
        sort_by: &str,
        sort_order: SortOrder,
    ) -> Vec<PersonResponse> {
        if sort_by.is_empty() {
            return persons;
        }

        let field = match sort_by.parse::<SortField>() {
            Ok(field) => field,
            Err(reason) => {
                tracing::debug!("{}, leaving order unchanged", reason);
                return persons;
            }
        };

        match sort_order {
            SortOrder::Asc => persons.sort_by(|a, b| field.compare(a, b)),
            SortOrder::Desc => persons.sort_by(|a, b| field.compare(b, a)),
        }
        persons
    }

    pub async fn update_person(
        &self,
        request: Option<PersonUpdateRequest>,
    ) -> Result<PersonResponse> {
        let request = request.ok_or(CrudError::InvalidArgument {
            argument: "person_update_request",
        })?;
        request.validate()?;

        let mut person = self
            .repository
            .get_person_by_person_id(request.person_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Update rejected, unknown person {}", request.person_id);
                CrudError::validation(
                    "person_id",
                    format!("Person {} does not exist", request.person_id),
                )
            })?;

        request.apply_to(&mut person);

        let stored = self.repository.update_person(person).await?;
        tracing::info!("Updated person {}", stored.person_id);

        Ok(PersonResponse::from(&stored))
    }

    pub async fn delete_person(&self, person_id: Option<Uuid>) -> Result<bool> {
        let person_id = person_id.ok_or(CrudError::InvalidArgument {
            argument: "person_id",
        })?;

        if self
            .repository
            .get_person_by_person_id(person_id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let deleted = self.repository.delete_person_by_person_id(person_id).await?;
        if deleted {
            tracing::info!("Deleted person {}", person_id);
        }
        Ok(deleted)
    }

    /// Persons referencing `country_id`, derived by query.
    pub async fn get_persons_by_country(
        &self,
        country_id: Option<Uuid>,
    ) -> Result<Vec<PersonResponse>> {
        let Some(country_id) = country_id else {
            return Ok(Vec::new());
        };

        let predicate = |person: &Person| person.country_id == Some(country_id);
        let persons = self.repository.get_filtered_persons(&predicate).await?;
        Ok(to_responses(&persons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn response(name: &str, dob: Option<(i32, u32, u32)>) -> PersonResponse {
        PersonResponse {
            person_id: Uuid::new_v4(),
            person_name: Some(name.to_string()),
            email: None,
            date_of_birth: dob.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            gender: None,
            country_id: None,
            country: None,
            address: None,
            age: None,
            receive_news_letters: false,
        }
    }

    struct NoopRepository;

    #[async_trait::async_trait]
    impl PersonsRepository for NoopRepository {
        async fn add_person(&self, person: Person) -> Result<Person> {
            Ok(person)
        }
        async fn get_all_persons(&self) -> Result<Vec<Person>> {
            Ok(Vec::new())
        }
        async fn get_person_by_person_id(&self, _person_id: Uuid) -> Result<Option<Person>> {
            Ok(None)
        }
        async fn get_filtered_persons(
            &self,
            _predicate: &crate::domain::ports::PersonPredicate<'_>,
        ) -> Result<Vec<Person>> {
            Ok(Vec::new())
        }
        async fn update_person(&self, person: Person) -> Result<Person> {
            Ok(person)
        }
        async fn delete_person_by_person_id(&self, _person_id: Uuid) -> Result<bool> {
            Ok(false)
        }
    }

    fn names(persons: &[PersonResponse]) -> Vec<&str> {
        persons
            .iter()
            .filter_map(|p| p.person_name.as_deref())
            .collect()
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let service = PersonsService::new(NoopRepository);
        let persons = vec![response("bob", None), response("Alice", None), response("carl", None)];

        let asc = service.get_sorted_persons(persons.clone(), "PersonName", SortOrder::Asc);
        assert_eq!(names(&asc), vec!["Alice", "bob", "carl"]);

        let desc = service.get_sorted_persons(persons, "PersonName", SortOrder::Desc);
        assert_eq!(names(&desc), vec!["carl", "bob", "Alice"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let service = PersonsService::new(NoopRepository);
        let persons = vec![
            response("first", Some((1990, 1, 1))),
            response("second", None),
            response("third", Some((1990, 1, 1))),
            response("fourth", None),
        ];

        let asc = service.get_sorted_persons(persons.clone(), "DateOfBirth", SortOrder::Asc);
        assert_eq!(names(&asc), vec!["second", "fourth", "first", "third"]);

        let desc = service.get_sorted_persons(persons, "DateOfBirth", SortOrder::Desc);
        assert_eq!(names(&desc), vec!["first", "third", "second", "fourth"]);
    }

    #[test]
    fn test_sort_empty_or_unknown_field_keeps_input() {
        let service = PersonsService::new(NoopRepository);
        let persons = vec![response("b", None), response("a", None)];

        assert_eq!(service.get_sorted_persons(persons.clone(), "", SortOrder::Asc), persons);
        assert_eq!(
            service.get_sorted_persons(persons.clone(), "Shoe size", SortOrder::Desc),
            persons
        );
    }

    #[test]
    fn test_sort_is_idempotent() {
        let service = PersonsService::new(NoopRepository);
        let persons = vec![response("b", None), response("A", None), response("a", None)];

        let once = service.get_sorted_persons(persons, "PersonName", SortOrder::Desc);
        let twice = service.get_sorted_persons(once.clone(), "PersonName", SortOrder::Desc);
        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn test_null_arguments_are_rejected() {
        let service = PersonsService::new(NoopRepository);

        assert!(matches!(
            service.add_person(None).await,
            Err(CrudError::InvalidArgument { .. })
        ));
        assert!(matches!(
            service.update_person(None).await,
            Err(CrudError::InvalidArgument { .. })
        ));
        assert!(matches!(
            service.delete_person(None).await,
            Err(CrudError::InvalidArgument { .. })
        ));
        assert!(service.get_person_by_person_id(None).await.unwrap().is_none());
    }
}
