use crate::core::{CountriesRepository, CountryAddRequest, CountryResponse};
use crate::utils::error::{CrudError, Result};
use crate::utils::validation::is_present_and_not_blank;
use uuid::Uuid;

pub struct CountriesService<R: CountriesRepository> {
    repository: R,
}

impl<R: CountriesRepository> CountriesService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn add_country(
        &self,
        request: Option<CountryAddRequest>,
    ) -> Result<CountryResponse> {
        let request = request.ok_or(CrudError::InvalidArgument {
            argument: "country_add_request",
        })?;

        let country_name = match request.country_name.as_deref() {
            Some(name) if is_present_and_not_blank(Some(name)) => name,
            _ => {
                tracing::warn!("Rejected country without a name");
                return Err(CrudError::validation(
                    "country_name",
                    "Country name can't be blank",
                ));
            }
        };

        // 名稱不可重複 (完全比對)
        if self
            .repository
            .get_country_by_country_name(country_name)
            .await?
            .is_some()
        {
            tracing::warn!("Rejected duplicate country name: {}", country_name);
            return Err(CrudError::validation(
                "country_name",
                format!("Country name '{}' already exists", country_name),
            ));
        }

        let mut country = request.to_country();
        country.country_id = Uuid::new_v4();

        let stored = self.repository.add_country(country).await?;
        tracing::info!("Added country {} ({})", country_name, stored.country_id);

        Ok(CountryResponse::from(&stored))
    }

    pub async fn get_all_countries(&self) -> Result<Vec<CountryResponse>> {
        let countries = self.repository.get_all_countries().await?;
        tracing::debug!("Loaded {} countries", countries.len());
        Ok(countries.iter().map(CountryResponse::from).collect())
    }

    pub async fn get_country_by_country_id(
        &self,
        country_id: Option<Uuid>,
    ) -> Result<Option<CountryResponse>> {
        let Some(country_id) = country_id else {
            return Ok(None);
        };

        let country = self
            .repository
            .get_country_by_country_id(country_id)
            .await?;
        Ok(country.as_ref().map(CountryResponse::from))
    }
}
