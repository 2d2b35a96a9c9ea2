use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbConn;
use crate::error::AppResult;
use crate::models::{NewPost, Post, PostChanges, PostTag, Tag, User};
use crate::schema::{post_tags, posts, tags, users};

pub fn find(conn: &mut DbConn, id: i32) -> AppResult<Post> {
    Ok(posts::table.find(id).first(conn)?)
}

/// A post with its author.
pub fn find_with_author(conn: &mut DbConn, id: i32) -> AppResult<(Post, User)> {
    Ok(posts::table
        .inner_join(users::table)
        .filter(posts::id.eq(id))
        .select((Post::as_select(), User::as_select()))
        .first(conn)?)
}

/// Posts written by the given user, newest first.
pub fn by_author(conn: &mut DbConn, author: &User) -> AppResult<Vec<Post>> {
    Ok(Post::belonging_to(author)
        .order((posts::created_at.desc(), posts::id.desc()))
        .load(conn)?)
}

pub fn tags_of(conn: &mut DbConn, post: &Post) -> AppResult<Vec<Tag>> {
    Ok(PostTag::belonging_to(post)
        .inner_join(tags::table)
        .select(Tag::as_select())
        .order(tags::name)
        .load(conn)?)
}

/// Keeps only the ids that belong to an existing tag.
pub fn resolve_tag_ids(conn: &mut DbConn, ids: &[i32]) -> AppResult<Vec<i32>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(tags::table
        .filter(tags::id.eq_any(ids))
        .select(tags::id)
        .order(tags::id)
        .load(conn)?)
}

fn attach_tags(conn: &mut DbConn, post_id: i32, tag_ids: &[i32]) -> AppResult<()> {
    let tag_ids = resolve_tag_ids(conn, tag_ids)?;
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows = tag_ids
        .into_iter()
        .map(|tag_id| PostTag { post_id, tag_id })
        .collect::<Vec<_>>();
    diesel::insert_into(post_tags::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Creates a post for `author_id`, tagged with those of `tag_ids` that exist.
pub fn insert(
    conn: &mut DbConn,
    author_id: i32,
    post: PostChanges,
    tag_ids: &[i32],
) -> AppResult<Post> {
    conn.transaction(|conn| {
        users::table.find(author_id).select(users::id).first::<i32>(conn)?;

        let post: Post = diesel::insert_into(posts::table)
            .values(&NewPost {
                title: post.title,
                content: post.content,
                created_at: Utc::now().naive_utc(),
                author_id,
            })
            .get_result(conn)?;
        attach_tags(conn, post.id, tag_ids)?;
        Ok(post)
    })
}

/// Overwrites title and content and replaces the whole tag set.
pub fn update(
    conn: &mut DbConn,
    id: i32,
    changes: &PostChanges,
    tag_ids: &[i32],
) -> AppResult<Post> {
    conn.transaction(|conn| {
        let post: Post = diesel::update(posts::table.find(id))
            .set(changes)
            .get_result(conn)?;
        diesel::delete(post_tags::table.filter(post_tags::post_id.eq(id))).execute(conn)?;
        attach_tags(conn, id, tag_ids)?;
        Ok(post)
    })
}

/// Deletes a post and its tag memberships, returning the deleted row.
pub fn delete(conn: &mut DbConn, id: i32) -> AppResult<Post> {
    conn.transaction(|conn| {
        let post = find(conn, id)?;
        diesel::delete(post_tags::table.filter(post_tags::post_id.eq(id))).execute(conn)?;
        diesel::delete(posts::table.find(id)).execute(conn)?;
        Ok(post)
    })
}

/// Deletes every post of an author along with their tag memberships.
///
/// Returns the number of deleted posts.
pub fn delete_by_author(conn: &mut DbConn, author_id: i32) -> AppResult<usize> {
    conn.transaction(|conn| {
        let authored = posts::table
            .filter(posts::author_id.eq(author_id))
            .select(posts::id);
        diesel::delete(post_tags::table.filter(post_tags::post_id.eq_any(authored)))
            .execute(conn)?;
        Ok(diesel::delete(posts::table.filter(posts::author_id.eq(author_id))).execute(conn)?)
    })
}
