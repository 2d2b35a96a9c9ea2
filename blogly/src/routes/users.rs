use log::info;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, uri, Route};
use rocket_dyn_templates::{context, Template};

use crate::db::Db;
use crate::error::AppResult;
use crate::forms::UserForm;
use crate::helper::notice;
use crate::models::{Post, User};
use crate::store;

#[get("/users")]
pub async fn list_users(db: Db, flash: Option<FlashMessage<'_>>) -> AppResult<Template> {
    let users = db.run(|conn| store::users::all(conn)).await?;
    Ok(Template::render(
        "users/list",
        context! { users, flash: notice(flash) },
    ))
}

#[get("/users/new")]
pub fn new_user_form() -> Template {
    Template::render("users/new", context! {})
}

#[post("/users/new", data = "<form>")]
pub async fn create_user(db: Db, form: Form<UserForm>) -> AppResult<Flash<Redirect>> {
    let new_user = form.into_inner().into_user()?;
    let user = db
        .run(move |conn| store::users::insert(conn, &new_user))
        .await?;
    info!("created user {}", user.id);

    Ok(Flash::success(
        Redirect::to(uri!(list_users)),
        format!("User '{}' was added.", user.full_name()),
    ))
}

#[get("/users/<id>")]
pub async fn show_user(db: Db, id: i32, flash: Option<FlashMessage<'_>>) -> AppResult<Template> {
    let (user, posts) = db
        .run(move |conn| -> AppResult<(User, Vec<Post>)> {
            let user = store::users::find(conn, id)?;
            let posts = store::posts::by_author(conn, &user)?;
            Ok((user, posts))
        })
        .await?;

    Ok(Template::render(
        "users/detail",
        context! { user, posts, flash: notice(flash) },
    ))
}

#[get("/users/<id>/edit")]
pub async fn edit_user_form(db: Db, id: i32) -> AppResult<Template> {
    let user = db.run(move |conn| store::users::find(conn, id)).await?;
    Ok(Template::render("users/edit", context! { user }))
}

#[post("/users/<id>/edit", data = "<form>")]
pub async fn update_user(db: Db, id: i32, form: Form<UserForm>) -> AppResult<Flash<Redirect>> {
    let form = form.into_inner();
    let user = db
        .run(move |conn| -> AppResult<User> {
            store::users::find(conn, id)?;
            let changes = form.into_user()?;
            store::users::update(conn, id, &changes)
        })
        .await?;
    info!("updated user {}", user.id);

    Ok(Flash::success(
        Redirect::to(uri!(list_users)),
        format!("User '{}' was updated.", user.full_name()),
    ))
}

#[post("/users/<id>/delete")]
pub async fn delete_user(db: Db, id: i32) -> AppResult<Flash<Redirect>> {
    let user = db
        .run(move |conn| store::users::delete_with_posts(conn, id))
        .await?;
    info!("deleted user {} and their posts", user.id);

    Ok(Flash::success(
        Redirect::to(uri!(list_users)),
        format!("User '{}' was deleted.", user.full_name()),
    ))
}

pub(crate) fn routes() -> Vec<Route> {
    routes![
        list_users,
        new_user_form,
        create_user,
        show_user,
        edit_user_form,
        update_user,
        delete_user,
    ]
}
