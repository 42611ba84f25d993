use std::path::PathBuf;

use rocket::{
    fairing::{Fairing, Info, Kind},
    fs::FileServer,
    Build, Rocket,
};
use serde::Deserialize;

use crate::{
    api::spa::SpaDir,
    client::{RegistrationClient, VotingClient},
    model::catalog::{CandidateCatalog, CatalogEntry},
};

/// Authority endpoints, derived from `Rocket.toml` and `ROCKET_*` environment
/// variables. The voting endpoint is mandatory; without it the server refuses
/// to start. The registration endpoint defaults to the voting one for
/// deployments where a single host serves both protocols.
#[derive(Deserialize)]
struct AuthorityConfig {
    voting_authority_url: String,
    registration_authority_url: Option<String>,
    /// Accept self-signed certificates from the authorities (lab setups).
    #[serde(default)]
    trust_authority_certs: bool,
}

impl AuthorityConfig {
    fn voting_authority_url(&self) -> &str {
        self.voting_authority_url.trim_end_matches('/')
    }

    fn registration_authority_url(&self) -> &str {
        self.registration_authority_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or_else(|| self.voting_authority_url())
    }
}

/// A fairing that loads the authority endpoints, builds the outbound HTTP
/// clients, and places one client per authority into managed state.
pub struct AuthorityFairing;

#[rocket::async_trait]
impl Fairing for AuthorityFairing {
    fn info(&self) -> Info {
        Info {
            name: "Authority clients",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<AuthorityConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load authority endpoints");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        // One connection pool shared by both clients.
        let http = match reqwest::Client::builder()
            .danger_accept_invalid_certs(config.trust_authority_certs)
            .build()
        {
            Ok(http) => http,
            Err(e) => {
                error!("Failed to build the outbound HTTP client: {e}");
                return Err(rocket);
            }
        };

        if config.trust_authority_certs {
            warn!("Authority certificate verification is DISABLED");
        }
        info!(
            "Authority endpoints: voting {}, registration {}",
            config.voting_authority_url(),
            config.registration_authority_url()
        );

        let registration =
            RegistrationClient::new(http.clone(), config.registration_authority_url());
        let voting = VotingClient::new(http, config.voting_authority_url());

        // Manage the state.
        Ok(rocket.manage(registration).manage(voting))
    }
}

/// Candidate display metadata, overridable through configuration.
#[derive(Deserialize)]
struct CatalogConfig {
    candidate_catalog: Option<Vec<CatalogEntry>>,
}

/// A fairing that builds the immutable candidate catalog and places it into
/// managed state: the bundled table unless the config supplies its own.
pub struct CatalogFairing;

#[rocket::async_trait]
impl Fairing for CatalogFairing {
    fn info(&self) -> Info {
        Info {
            name: "Candidate catalog",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<CatalogConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load the candidate catalog");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let catalog = match config.candidate_catalog {
            Some(entries) => CandidateCatalog::from_entries(entries),
            None => CandidateCatalog::bundled(),
        };
        info!("Candidate catalog ready ({} parties)", catalog.len());

        // Manage the state.
        Ok(rocket.manage(catalog))
    }
}

/// Optional hosting of the compiled front end.
#[derive(Deserialize)]
struct SpaConfig {
    spa_dir: Option<PathBuf>,
}

/// A fairing that serves the single-page front end from `spa_dir` when
/// configured, wiring up the `index.html` fallback for deep links.
pub struct SpaFairing;

#[rocket::async_trait]
impl Fairing for SpaFairing {
    fn info(&self) -> Info {
        Info {
            name: "Front end",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<SpaConfig>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load the front end config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };

        let Some(dir) = config.spa_dir else {
            return Ok(rocket);
        };
        if !dir.is_dir() {
            error!("Front end directory {} does not exist", dir.display());
            return Err(rocket);
        }
        info!("Serving front end from {}", dir.display());

        Ok(rocket
            .mount("/", FileServer::from(&dir))
            .manage(SpaDir(dir)))
    }
}
