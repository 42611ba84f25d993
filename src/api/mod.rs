use rocket::{Catcher, Route};

pub mod spa;
pub mod voting;

pub fn routes() -> Vec<Route> {
    voting::routes()
}

pub fn catchers() -> Vec<Catcher> {
    spa::catchers()
}
