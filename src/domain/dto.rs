//! Transfer representations exchanged with the presentation layer.

use crate::domain::model::{Country, Gender, Person, DEFAULT_TIN};
use crate::utils::error::Result;
use crate::utils::validation::{
    apply_rules, is_email_or_absent, is_present_and_not_blank, is_within_length, Rule, Validate,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PERSON_NAME_MAX_LEN: usize = 40;
pub const EMAIL_MAX_LEN: usize = 40;
pub const ADDRESS_MAX_LEN: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryAddRequest {
    pub country_name: Option<String>,
}

impl CountryAddRequest {
    pub fn new(country_name: impl Into<String>) -> Self {
        Self {
            country_name: Some(country_name.into()),
        }
    }

    pub fn to_country(&self) -> Country {
        Country {
            country_id: Uuid::nil(),
            country_name: self.country_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryResponse {
    pub country_id: Uuid,
    pub country_name: Option<String>,
}

impl From<&Country> for CountryResponse {
    fn from(country: &Country) -> Self {
        Self {
            country_id: country.country_id,
            country_name: country.country_name.clone(),
        }
    }
}

/// Fields shared by the add and update requests, so both run the same rules.
pub trait PersonFields {
    fn person_name(&self) -> Option<&str>;
    fn email(&self) -> Option<&str>;
    fn address(&self) -> Option<&str>;
}

fn person_field_rules<T: PersonFields>() -> [Rule<T>; 5] {
    [
        Rule {
            field: "person_name",
            message: "Person name can't be blank",
            check: |r| is_present_and_not_blank(r.person_name()),
        },
        Rule {
            field: "person_name",
            message: "Person name can't be longer than 40 characters",
            check: |r| is_within_length(r.person_name(), PERSON_NAME_MAX_LEN),
        },
        Rule {
            field: "email",
            message: "Email should be a valid email address",
            check: |r| is_email_or_absent(r.email()),
        },
        Rule {
            field: "email",
            message: "Email can't be longer than 40 characters",
            check: |r| is_within_length(r.email(), EMAIL_MAX_LEN),
        },
        Rule {
            field: "address",
            message: "Address can't be longer than 200 characters",
            check: |r| is_within_length(r.address(), ADDRESS_MAX_LEN),
        },
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonAddRequest {
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub country_id: Option<Uuid>,
    pub address: Option<String>,
    pub receive_news_letters: bool,
}

impl PersonAddRequest {
    pub fn to_person(&self) -> Person {
        Person {
            person_id: Uuid::nil(),
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.map(|g| g.to_string()),
            country_id: self.country_id,
            address: self.address.clone(),
            receive_news_letters: self.receive_news_letters,
            tin: Some(DEFAULT_TIN.to_string()),
            country: None,
        }
    }
}

impl PersonFields for PersonAddRequest {
    fn person_name(&self) -> Option<&str> {
        self.person_name.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

impl Validate for PersonAddRequest {
    fn validate(&self) -> Result<()> {
        apply_rules(self, &person_field_rules())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonUpdateRequest {
    pub person_id: Uuid,
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub country_id: Option<Uuid>,
    pub address: Option<String>,
    pub receive_news_letters: bool,
}

impl PersonUpdateRequest {
    /// Copies the mutable fields onto an existing record. Id and TIN are kept.
    pub fn apply_to(&self, person: &mut Person) {
        person.person_name = self.person_name.clone();
        person.date_of_birth = self.date_of_birth;
        person.gender = self.gender.map(|g| g.to_string());
        person.email = self.email.clone();
        person.country_id = self.country_id;
        person.receive_news_letters = self.receive_news_letters;
        person.address = self.address.clone();
    }
}

impl PersonFields for PersonUpdateRequest {
    fn person_name(&self) -> Option<&str> {
        self.person_name.as_deref()
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

const PERSON_ID_RULE: Rule<PersonUpdateRequest> = Rule {
    field: "person_id",
    message: "Person id can't be blank",
    check: |r| !r.person_id.is_nil(),
};

impl Validate for PersonUpdateRequest {
    fn validate(&self) -> Result<()> {
        apply_rules(self, &[PERSON_ID_RULE])?;
        apply_rules(self, &person_field_rules())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub person_id: Uuid,
    pub person_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub country_id: Option<Uuid>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub age: Option<i64>,
    pub receive_news_letters: bool,
}

/// Whole years between `date_of_birth` and `today`, as days / 365 rounded half away from zero.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i64 {
    let days = (today - date_of_birth).num_days();
    (days as f64 / 365.0).round() as i64
}

impl PersonResponse {
    pub fn from_person_on(person: &Person, today: NaiveDate) -> Self {
        Self {
            person_id: person.person_id,
            person_name: person.person_name.clone(),
            email: person.email.clone(),
            date_of_birth: person.date_of_birth,
            gender: person.gender.clone(),
            country_id: person.country_id,
            country: person.country_name().map(str::to_string),
            address: person.address.clone(),
            age: person.date_of_birth.map(|dob| age_on(dob, today)),
            receive_news_letters: person.receive_news_letters,
        }
    }

    pub fn to_person_update_request(&self) -> PersonUpdateRequest {
        PersonUpdateRequest {
            person_id: self.person_id,
            person_name: self.person_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender.as_deref().and_then(|g| g.parse().ok()),
            country_id: self.country_id,
            address: self.address.clone(),
            receive_news_letters: self.receive_news_letters,
        }
    }
}

impl From<&Person> for PersonResponse {
    fn from(person: &Person) -> Self {
        Self::from_person_on(person, Local::now().date_naive())
    }
}
