use std::sync::Arc;

use api_shared::DoctorRes;
use clap::{Args, Parser, Subcommand};
use directory_core::constants::{LOAD_FAILED_NOTICE, NO_RESULTS_NOTICE};
use directory_core::{
    default_suggestions, load_catalogue, update_url_state, Action, Catalogue, ConsultationType,
    Directory, FilterState, SortKey, SourceLocation,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "directory")]
#[command(about = "Doctor directory CLI")]
struct Cli {
    /// Doctor data URL or JSON file (defaults to the published data set)
    #[arg(long, env = "DOCTORS_SOURCE", global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List doctors matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print JSON instead of one line per doctor
        #[arg(long)]
        json: bool,
    },
    /// Suggest up to three doctor names for a search text
    Suggest {
        /// Text typed so far
        text: String,
    },
    /// List every specialty in the directory
    Specialties,
    /// Print the shareable query string for the filters
    Url {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Start from a URL query string, e.g. "type=clinic&sort=fees_desc"
    #[arg(long)]
    query: Option<String>,
    /// Case-insensitive name search
    #[arg(long)]
    search: Option<String>,
    /// Consultation type: video or clinic
    #[arg(long = "type")]
    consultation: Option<ConsultationType>,
    /// Specialty to include (repeatable)
    #[arg(long = "specialty")]
    specialties: Vec<String>,
    /// fees_asc, fees_desc, experience_asc or experience_desc
    #[arg(long)]
    sort: Option<SortKey>,
}

impl FilterArgs {
    /// Flags applied on top of `--query`, as reducer actions.
    fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(search) = &self.search {
            actions.push(Action::SetSearch(search.clone()));
        }
        if let Some(consultation) = self.consultation {
            actions.push(Action::SetConsultation(consultation));
        }
        for specialty in &self.specialties {
            actions.push(Action::SelectSpecialty(specialty.clone()));
        }
        if let Some(sort) = self.sort {
            actions.push(Action::SetSort(sort));
        }
        actions
    }

    fn directory(&self, catalogue: Arc<Catalogue>) -> Directory {
        let mut directory = Directory::from_query(catalogue, self.query.as_deref().unwrap_or(""));
        for action in self.actions() {
            directory.dispatch(action);
        }
        directory
    }

    /// The filter state alone; suggestion picks are not available here, so no
    /// catalogue is needed.
    fn state(&self) -> FilterState {
        self.directory(Arc::new(Catalogue::default()))
            .filters()
            .clone()
    }
}

async fn load(source: Option<String>) -> anyhow::Result<Arc<Catalogue>> {
    let location = SourceLocation::from_env_value(source);
    match load_catalogue(&location).await {
        Ok(catalogue) => Ok(Arc::new(catalogue)),
        Err(e) => {
            tracing::error!("Error loading doctor data: {}", e);
            eprintln!("{}", LOAD_FAILED_NOTICE);
            Err(e.into())
        }
    }
}

fn print_doctor(doctor: &DoctorRes) {
    println!(
        "{} | {} | Experience: {} | Consultation Fee: {} | Languages: {}",
        doctor.name,
        doctor.primary_specialty.as_deref().unwrap_or(""),
        doctor.experience,
        doctor.fee,
        doctor.languages.join(", ")
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { filters, json }) => {
            let directory = filters.directory(load(cli.source).await?);
            let doctors: Vec<DoctorRes> =
                directory.view().into_iter().map(DoctorRes::from).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&doctors)?);
            } else if doctors.is_empty() {
                println!("{}", NO_RESULTS_NOTICE);
            } else {
                for doctor in &doctors {
                    print_doctor(doctor);
                }
            }
        }
        Some(Commands::Suggest { text }) => {
            let catalogue = load(cli.source).await?;
            for doctor in default_suggestions(&catalogue, &text) {
                println!("{} ({})", doctor.name, doctor.id);
            }
        }
        Some(Commands::Specialties) => {
            let catalogue = load(cli.source).await?;
            for name in catalogue.specialty_names() {
                println!("{}", name);
            }
        }
        Some(Commands::Url { filters }) => {
            let query = update_url_state(&filters.state());
            if query.is_empty() {
                println!("/");
            } else {
                println!("/?{}", query);
            }
        }
        None => {
            println!("Use 'directory --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_apply_on_top_of_query() {
        let cli = Cli::try_parse_from([
            "directory",
            "url",
            "--query",
            "search=rao&sort=fees_desc",
            "--type",
            "clinic",
            "--specialty",
            "Dentist",
            "--specialty",
            "ENT",
        ])
        .expect("parse args");

        let Some(Commands::Url { filters }) = cli.command else {
            panic!("expected url command");
        };
        let state = filters.state();
        assert_eq!(state.search, "rao");
        assert_eq!(state.consultation, ConsultationType::Clinic);
        assert_eq!(state.specialties, vec!["Dentist", "ENT"]);
        assert_eq!(state.sort, SortKey::FEES_DESC);
    }

    #[test]
    fn rejects_unknown_sort() {
        let parsed = Cli::try_parse_from(["directory", "list", "--sort", "price"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn no_flags_gives_default_state() {
        assert!(FilterArgs::default().state().is_default());
    }
}
