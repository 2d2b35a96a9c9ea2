use log::info;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::{get, post, routes, uri, Route};
use rocket_dyn_templates::{context, Template};

use crate::db::Db;
use crate::error::AppResult;
use crate::forms::PostForm;
use crate::helper::notice;
use crate::models::{Post, Tag, User};
use crate::store;

#[get("/users/<id>/posts/new")]
pub async fn new_post_form(db: Db, id: i32) -> AppResult<Template> {
    let (user, tags) = db
        .run(move |conn| -> AppResult<(User, Vec<Tag>)> {
            Ok((store::users::find(conn, id)?, store::tags::all(conn)?))
        })
        .await?;
    Ok(Template::render("posts/new", context! { user, tags }))
}

#[post("/users/<id>/posts/new", data = "<form>")]
pub async fn create_post(db: Db, id: i32, form: Form<PostForm>) -> AppResult<Flash<Redirect>> {
    let form = form.into_inner();
    let post = db
        .run(move |conn| -> AppResult<Post> {
            store::users::find(conn, id)?;
            let (post, tag_ids) = form.into_parts()?;
            store::posts::insert(conn, id, post, &tag_ids)
        })
        .await?;
    info!("created post {} for user {}", post.id, id);

    Ok(Flash::success(
        Redirect::to(uri!(crate::routes::users::show_user(id))),
        "Post added!",
    ))
}

#[get("/posts/<id>")]
pub async fn show_post(db: Db, id: i32, flash: Option<FlashMessage<'_>>) -> AppResult<Template> {
    let (post, author, tags) = db
        .run(move |conn| -> AppResult<(Post, User, Vec<Tag>)> {
            let (post, author) = store::posts::find_with_author(conn, id)?;
            let tags = store::posts::tags_of(conn, &post)?;
            Ok((post, author, tags))
        })
        .await?;

    Ok(Template::render(
        "posts/detail",
        context! { post, author, tags, flash: notice(flash) },
    ))
}

#[get("/posts/<id>/edit")]
pub async fn edit_post_form(db: Db, id: i32) -> AppResult<Template> {
    let (post, tags, selected) = db
        .run(move |conn| -> AppResult<(Post, Vec<Tag>, Vec<i32>)> {
            let post = store::posts::find(conn, id)?;
            let selected = store::posts::tags_of(conn, &post)?
                .into_iter()
                .map(|tag| tag.id)
                .collect();
            Ok((post, store::tags::all(conn)?, selected))
        })
        .await?;

    Ok(Template::render(
        "posts/edit",
        context! { post, tags, selected },
    ))
}

#[post("/posts/<id>/edit", data = "<form>")]
pub async fn update_post(db: Db, id: i32, form: Form<PostForm>) -> AppResult<Flash<Redirect>> {
    let form = form.into_inner();
    let post = db
        .run(move |conn| -> AppResult<Post> {
            store::posts::find(conn, id)?;
            let (changes, tag_ids) = form.into_parts()?;
            store::posts::update(conn, id, &changes, &tag_ids)
        })
        .await?;
    info!("updated post {}", post.id);

    Ok(Flash::success(
        Redirect::to(uri!(show_post(post.id))),
        "Post updated!",
    ))
}

#[post("/posts/<id>/delete")]
pub async fn delete_post(db: Db, id: i32) -> AppResult<Flash<Redirect>> {
    let post = db.run(move |conn| store::posts::delete(conn, id)).await?;
    info!("deleted post {}", post.id);

    Ok(Flash::success(
        Redirect::to(uri!(crate::routes::users::show_user(post.author_id))),
        "Post deleted!",
    ))
}

pub(crate) fn routes() -> Vec<Route> {
    routes![
        new_post_form,
        create_post,
        show_post,
        edit_post_form,
        update_post,
        delete_post,
    ]
}
