//! HTTP handlers. Every page is rendered from `templates/`, every mutation
//! answers with a redirect carrying a flash message.
use rocket::response::Redirect;
use rocket::{get, routes, uri, Route};

pub mod posts;
pub mod tags;
pub mod users;

#[get("/")]
fn root() -> Redirect {
    Redirect::to(uri!(users::list_users))
}

pub fn routes() -> Vec<Route> {
    let mut routes = routes![root];
    routes.extend(users::routes());
    routes.extend(posts::routes());
    routes.extend(tags::routes());
    routes
}
