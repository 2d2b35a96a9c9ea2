use log::info;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, uri, Route};
use rocket_dyn_templates::{context, Template};

use crate::db::Db;
use crate::error::AppResult;
use crate::forms::TagForm;
use crate::helper::notice;
use crate::models::{Post, Tag};
use crate::store;

#[get("/tags")]
pub async fn list_tags(db: Db, flash: Option<FlashMessage<'_>>) -> AppResult<Template> {
    let tags = db.run(|conn| store::tags::all(conn)).await?;
    Ok(Template::render(
        "tags/list",
        context! { tags, flash: notice(flash) },
    ))
}

#[get("/tags/<id>")]
pub async fn show_tag(db: Db, id: i32) -> AppResult<Template> {
    let (tag, posts) = db
        .run(move |conn| -> AppResult<(Tag, Vec<Post>)> {
            let tag = store::tags::find(conn, id)?;
            let posts = store::tags::posts_of(conn, &tag)?;
            Ok((tag, posts))
        })
        .await?;
    Ok(Template::render("tags/detail", context! { tag, posts }))
}

#[get("/tags/new")]
pub fn new_tag_form() -> Template {
    Template::render("tags/new", context! {})
}

#[post("/tags/new", data = "<form>")]
pub async fn create_tag(db: Db, form: Form<TagForm>) -> AppResult<Flash<Redirect>> {
    let name = form.into_inner().into_name()?;
    let tag = db.run(move |conn| store::tags::insert(conn, name)).await?;
    info!("created tag {}", tag.id);

    Ok(Flash::success(Redirect::to(uri!(list_tags)), "Tag added!"))
}

#[get("/tags/<id>/edit")]
pub async fn edit_tag_form(db: Db, id: i32) -> AppResult<Template> {
    let tag = db.run(move |conn| store::tags::find(conn, id)).await?;
    Ok(Template::render("tags/edit", context! { tag }))
}

#[post("/tags/<id>/edit", data = "<form>")]
pub async fn update_tag(db: Db, id: i32, form: Form<TagForm>) -> AppResult<Flash<Redirect>> {
    let form = form.into_inner();
    let tag = db
        .run(move |conn| -> AppResult<Tag> {
            store::tags::find(conn, id)?;
            store::tags::update(conn, id, form.into_name()?)
        })
        .await?;
    info!("renamed tag {}", tag.id);

    Ok(Flash::success(Redirect::to(uri!(list_tags)), "Tag updated!"))
}

#[post("/tags/<id>/delete")]
pub async fn delete_tag(db: Db, id: i32) -> AppResult<Flash<Redirect>> {
    let tag = db.run(move |conn| store::tags::delete(conn, id)).await?;
    info!("deleted tag {}", tag.id);

    Ok(Flash::success(
        Redirect::to(uri!(list_tags)),
        format!("The tag '{}' was deleted.", tag.name),
    ))
}

pub(crate) fn routes() -> Vec<Route> {
    routes![
        list_tags,
        show_tag,
        new_tag_form,
        create_tag,
        edit_tag_form,
        update_tag,
        delete_tag,
    ]
}
