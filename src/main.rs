use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use person_crud::config::{PersonArgs, StorageBackend};
use person_crud::core::{
    CountriesRepository, CountryAddRequest, PersonAddRequest, PersonResponse,
    PersonUpdateRequest, PersonsRepository, SearchField, SortOrder,
};
use person_crud::domain::model::Gender;
use person_crud::utils::error::ErrorCategory;
use person_crud::utils::{logger, validation::Validate};
use person_crud::{
    AppConfig, CliConfig, Command, CountriesService, CrudError, InMemoryStore, JsonFileStore,
    PersonsService,
};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if let Err(e) = run(cli).await {
        let exit_code = match e.downcast_ref::<CrudError>() {
            Some(crud_error) => {
                tracing::error!(
                    "❌ Command failed: {} (Category: {:?})",
                    crud_error,
                    crud_error.category()
                );
                eprintln!("❌ {}", crud_error.user_friendly_message());
                match crud_error.category() {
                    ErrorCategory::Input => 2,
                    ErrorCategory::Storage => 1,
                    ErrorCategory::Configuration => 3,
                }
            }
            None => {
                tracing::error!("❌ Command failed: {:#}", e);
                eprintln!("❌ {:#}", e);
                2
            }
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path))?,
        None => AppConfig::default(),
    };
    if let Some(data_file) = &cli.data_file {
        config.storage.backend = "json_file".to_string();
        config.storage.path = data_file.clone();
    }

    // 初始化日誌
    if cli.json_logs || config.logging.json {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    config.validate()?;
    tracing::debug!("Configuration: {:?}", config);

    match config.storage_backend() {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, changes will not be kept");
            execute(InMemoryStore::new(), cli.command).await
        }
        StorageBackend::JsonFile => {
            let store = JsonFileStore::open(config.data_path()).await?;
            execute(store, cli.command).await
        }
    }
}

async fn execute<S>(store: S, command: Command) -> anyhow::Result<()>
where
    S: CountriesRepository + PersonsRepository + Clone,
{
    let countries = CountriesService::new(store.clone());
    let persons = PersonsService::new(store);

    match command {
        Command::AddCountry { name } => {
            let country = countries
                .add_country(Some(CountryAddRequest::new(name)))
                .await?;
            println!(
                "✅ Added country {} ({})",
                country.country_name.unwrap_or_default(),
                country.country_id
            );
        }
        Command::ListCountries => {
            for country in countries.get_all_countries().await? {
                println!(
                    "{}\t{}",
                    country.country_id,
                    country.country_name.unwrap_or_default()
                );
            }
        }
        Command::AddPerson(args) => {
            let request = person_add_request(args)?;
            let person = persons.add_person(Some(request)).await?;
            println!("✅ Added person");
            print_person(&person);
        }
        Command::ListPersons {
            search_by,
            search,
            sort_by,
            order,
        } => {
            let order: SortOrder = order.parse().map_err(anyhow::Error::msg)?;
            let filtered = persons
                .get_filtered_persons(&search_by, search.as_deref())
                .await?;
            for person in persons.get_sorted_persons(filtered, &sort_by, order) {
                print_person(&person);
            }
        }
        Command::SearchFields => {
            for field in SearchField::ALL {
                println!("{}\t{}", field.name(), field.label());
            }
        }
        Command::ShowPerson { id } => {
            match persons.get_person_by_person_id(Some(parse_id(&id)?)).await? {
                Some(person) => print_person(&person),
                None => println!("No person with id {}", id),
            }
        }
        Command::UpdatePerson { id, person } => {
            let request = person_update_request(parse_id(&id)?, person)?;
            let updated = persons.update_person(Some(request)).await?;
            println!("✅ Updated person");
            print_person(&updated);
        }
        Command::DeletePerson { id } => {
            if persons.delete_person(Some(parse_id(&id)?)).await? {
                println!("✅ Deleted person {}", id);
            } else {
                println!("No person with id {}", id);
            }
        }
        Command::CountryPersons { country_id } => {
            let country_id = parse_id(&country_id)?;
            if countries
                .get_country_by_country_id(Some(country_id))
                .await?
                .is_none()
            {
                println!("No country with id {}", country_id);
                return Ok(());
            }
            for person in persons.get_persons_by_country(Some(country_id)).await? {
                print_person(&person);
            }
        }
    }

    Ok(())
}

fn parse_id(value: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(value).with_context(|| format!("'{}' is not a valid id", value))
}

struct ParsedPersonArgs {
    date_of_birth: Option<NaiveDate>,
    gender: Option<Gender>,
    country_id: Option<Uuid>,
}

fn parse_person_args(args: &PersonArgs) -> anyhow::Result<ParsedPersonArgs> {
    let date_of_birth = args
        .date_of_birth
        .as_deref()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .context("date of birth must be YYYY-MM-DD")?;
    let gender = args
        .gender
        .as_deref()
        .map(str::parse::<Gender>)
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let country_id = args.country_id.as_deref().map(parse_id).transpose()?;

    Ok(ParsedPersonArgs {
        date_of_birth,
        gender,
        country_id,
    })
}

fn person_add_request(args: PersonArgs) -> anyhow::Result<PersonAddRequest> {
    let parsed = parse_person_args(&args)?;
    Ok(PersonAddRequest {
        person_name: args.name,
        email: args.email,
        date_of_birth: parsed.date_of_birth,
        gender: parsed.gender,
        country_id: parsed.country_id,
        address: args.address,
        receive_news_letters: args.newsletters,
    })
}

fn person_update_request(id: Uuid, args: PersonArgs) -> anyhow::Result<PersonUpdateRequest> {
    let parsed = parse_person_args(&args)?;
    Ok(PersonUpdateRequest {
        person_id: id,
        person_name: args.name,
        email: args.email,
        date_of_birth: parsed.date_of_birth,
        gender: parsed.gender,
        country_id: parsed.country_id,
        address: args.address,
        receive_news_letters: args.newsletters,
    })
}

fn print_person(person: &PersonResponse) {
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        person.person_id,
        person.person_name.as_deref().unwrap_or("-"),
        person.email.as_deref().unwrap_or("-"),
        person
            .date_of_birth
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_else(|| "-".to_string()),
        person.age.map(|a| a.to_string()).unwrap_or_else(|| "-".to_string()),
        person.gender.as_deref().unwrap_or("-"),
        person.country.as_deref().unwrap_or("-"),
        if person.receive_news_letters { "yes" } else { "no" },
    );
}
