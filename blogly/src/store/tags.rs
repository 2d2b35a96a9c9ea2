use diesel::prelude::*;

use crate::db::DbConn;
use crate::error::{AppError, AppResult};
use crate::models::{NewTag, Post, Tag};
use crate::schema::{post_tags, posts, tags};

pub fn all(conn: &mut DbConn) -> AppResult<Vec<Tag>> {
    Ok(tags::table.order((tags::name, tags::id)).load(conn)?)
}

pub fn find(conn: &mut DbConn, id: i32) -> AppResult<Tag> {
    Ok(tags::table.find(id).first(conn)?)
}

/// Posts carrying the tag, newest first.
pub fn posts_of(conn: &mut DbConn, tag: &Tag) -> AppResult<Vec<Post>> {
    Ok(post_tags::table
        .filter(post_tags::tag_id.eq(tag.id))
        .inner_join(posts::table)
        .select(Post::as_select())
        .order((posts::created_at.desc(), posts::id.desc()))
        .load(conn)?)
}

/// Fails with a conflict if another tag (not `except`) already has `name`.
fn ensure_name_free(conn: &mut DbConn, name: &str, except: Option<i32>) -> AppResult<()> {
    let mut query = tags::table
        .filter(tags::name.eq(name))
        .select(tags::id)
        .into_boxed();
    if let Some(id) = except {
        query = query.filter(tags::id.ne(id));
    }
    match query.first::<i32>(conn).optional()? {
        Some(_) => Err(AppError::Conflict(format!(
            "A tag named '{}' already exists.",
            name
        ))),
        None => Ok(()),
    }
}

pub fn insert(conn: &mut DbConn, name: String) -> AppResult<Tag> {
    conn.transaction(|conn| {
        ensure_name_free(conn, &name, None)?;
        Ok(diesel::insert_into(tags::table)
            .values(&NewTag { name })
            .get_result(conn)?)
    })
}

pub fn update(conn: &mut DbConn, id: i32, name: String) -> AppResult<Tag> {
    conn.transaction(|conn| {
        find(conn, id)?;
        ensure_name_free(conn, &name, Some(id))?;
        Ok(diesel::update(tags::table.find(id))
            .set(&NewTag { name })
            .get_result(conn)?)
    })
}

/// Removes the tag from every post. Returns the number of removed rows.
pub fn delete_associations_by_tag(conn: &mut DbConn, tag_id: i32) -> AppResult<usize> {
    Ok(diesel::delete(post_tags::table.filter(post_tags::tag_id.eq(tag_id))).execute(conn)?)
}

/// Deletes the tag and its post memberships, returning the deleted row.
pub fn delete(conn: &mut DbConn, id: i32) -> AppResult<Tag> {
    conn.transaction(|conn| {
        let tag = find(conn, id)?;
        delete_associations_by_tag(conn, id)?;
        diesel::delete(tags::table.find(id)).execute(conn)?;
        Ok(tag)
    })
}
