use std::path::PathBuf;

use rocket::{fs::NamedFile, http::Status, Catcher, Request};

/// Root of the compiled front end, managed when `spa_dir` is configured.
pub struct SpaDir(pub PathBuf);

pub fn catchers() -> Vec<Catcher> {
    catchers![spa_fallback]
}

/// Deep links into the client app resolve to its `index.html`; API misses
/// stay plain 404s, as does everything else when no front end is hosted.
#[catch(404)]
async fn spa_fallback(req: &Request<'_>) -> Option<(Status, NamedFile)> {
    if req.uri().path().as_str().starts_with("/api/") {
        return None;
    }
    let dir = req.rocket().state::<SpaDir>()?;
    let index = NamedFile::open(dir.0.join("index.html")).await.ok()?;
    Some((Status::Ok, index))
}
