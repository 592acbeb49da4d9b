//! Searchable and sortable person fields.
//!
//! Field names arriving from the presentation layer are parsed once into
//! these enums; matching and ordering then go through per-variant accessors.

use crate::domain::dto::PersonResponse;
use crate::domain::model::Person;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::str::FromStr;

/// Date-of-birth search format, e.g. "05 January 1990".
pub const DATE_OF_BIRTH_SEARCH_FORMAT: &str = "%d %B %Y";

// "PersonName", "person_name" and "person-name" all normalise to "personname"
fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    PersonName,
    Email,
    Address,
    DateOfBirth,
    Gender,
    Country,
}

impl SearchField {
    pub const ALL: [SearchField; 6] = [
        SearchField::PersonName,
        SearchField::Email,
        SearchField::DateOfBirth,
        SearchField::Gender,
        SearchField::Country,
        SearchField::Address,
    ];

    /// Canonical name, accepted back by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            SearchField::PersonName => "PersonName",
            SearchField::Email => "Email",
            SearchField::Address => "Address",
            SearchField::DateOfBirth => "DateOfBirth",
            SearchField::Gender => "Gender",
            SearchField::Country => "Country",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::PersonName => "Person Name",
            SearchField::Email => "Email",
            SearchField::Address => "Address",
            SearchField::DateOfBirth => "Date of Birth",
            SearchField::Gender => "Gender",
            SearchField::Country => "Country",
        }
    }

    pub fn value_of<'a>(&self, person: &'a Person) -> Option<Cow<'a, str>> {
        match self {
            SearchField::PersonName => person.person_name.as_deref().map(Cow::Borrowed),
            SearchField::Email => person.email.as_deref().map(Cow::Borrowed),
            SearchField::Address => person.address.as_deref().map(Cow::Borrowed),
            SearchField::DateOfBirth => person
                .date_of_birth
                .map(|dob| Cow::Owned(dob.format(DATE_OF_BIRTH_SEARCH_FORMAT).to_string())),
            SearchField::Gender => person.gender.as_deref().map(Cow::Borrowed),
            SearchField::Country => person.country_name().map(Cow::Borrowed),
        }
    }

    /// Case-sensitive substring match. An absent field never matches.
    pub fn matches(&self, person: &Person, search: &str) -> bool {
        self.value_of(person)
            .is_some_and(|value| value.contains(search))
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_field_name(s).as_str() {
            "personname" | "name" => Ok(SearchField::PersonName),
            "email" => Ok(SearchField::Email),
            "address" => Ok(SearchField::Address),
            "dateofbirth" | "dob" => Ok(SearchField::DateOfBirth),
            "gender" => Ok(SearchField::Gender),
            "country" | "countryid" | "countryname" => Ok(SearchField::Country),
            _ => Err(format!("Unknown search field: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    PersonName,
    Email,
    DateOfBirth,
    Age,
    Gender,
    Country,
    Address,
    ReceiveNewsLetters,
}

fn compare_ignore_case(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a
            .chars()
            .flat_map(char::to_uppercase)
            .cmp(b.chars().flat_map(char::to_uppercase)),
        _ => a.is_some().cmp(&b.is_some()),
    }
}

impl SortField {
    pub fn compare(&self, a: &PersonResponse, b: &PersonResponse) -> Ordering {
        match self {
            SortField::PersonName => {
                compare_ignore_case(a.person_name.as_deref(), b.person_name.as_deref())
            }
            SortField::Email => compare_ignore_case(a.email.as_deref(), b.email.as_deref()),
            SortField::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            SortField::Age => a.age.cmp(&b.age),
            SortField::Gender => compare_ignore_case(a.gender.as_deref(), b.gender.as_deref()),
            SortField::Country => compare_ignore_case(a.country.as_deref(), b.country.as_deref()),
            SortField::Address => compare_ignore_case(a.address.as_deref(), b.address.as_deref()),
            SortField::ReceiveNewsLetters => a.receive_news_letters.cmp(&b.receive_news_letters),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_field_name(s).as_str() {
            "personname" | "name" => Ok(SortField::PersonName),
            "email" => Ok(SortField::Email),
            "dateofbirth" | "dob" => Ok(SortField::DateOfBirth),
            "age" => Ok(SortField::Age),
            "gender" => Ok(SortField::Gender),
            "country" | "countryname" => Ok(SortField::Country),
            "address" => Ok(SortField::Address),
            "receivenewsletters" | "recivenewsletters" | "newsletters" => {
                Ok(SortField::ReceiveNewsLetters)
            }
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}
