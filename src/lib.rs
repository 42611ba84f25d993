#[macro_use]
extern crate log;

#[macro_use]
extern crate rocket;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod logging;
pub mod model;

use rocket::{Build, Rocket};

use crate::config::{AuthorityFairing, CatalogFairing, SpaFairing};
use crate::logging::LoggerFairing;

/// Assemble the server: the REST surface, the SPA fallback, and the
/// ignite-time fairings that refuse launch on invalid configuration.
pub fn build() -> Rocket<Build> {
    assemble(rocket::build())
}

fn assemble(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/api/bff/voting", api::routes())
        .register("/", api::catchers())
        .attach(AuthorityFairing)
        .attach(CatalogFairing)
        .attach(SpaFairing)
        .attach(LoggerFairing)
}
