use diesel::prelude::*;

use crate::db::DbConn;
use crate::error::AppResult;
use crate::models::{NewUser, User};
use crate::schema::users;
use crate::store::posts;

pub fn all(conn: &mut DbConn) -> AppResult<Vec<User>> {
    Ok(users::table
        .order((users::last_name, users::first_name, users::id))
        .load(conn)?)
}

pub fn find(conn: &mut DbConn, id: i32) -> AppResult<User> {
    Ok(users::table.find(id).first(conn)?)
}

pub fn insert(conn: &mut DbConn, user: &NewUser) -> AppResult<User> {
    Ok(diesel::insert_into(users::table)
        .values(user)
        .get_result(conn)?)
}

/// Overwrites every editable column of the user.
pub fn update(conn: &mut DbConn, id: i32, user: &NewUser) -> AppResult<User> {
    Ok(diesel::update(users::table.find(id))
        .set(user)
        .get_result(conn)?)
}

/// Deletes the user together with all of their posts.
///
/// Returns the deleted row. Nothing is removed when the user does not exist.
pub fn delete_with_posts(conn: &mut DbConn, id: i32) -> AppResult<User> {
    conn.transaction(|conn| {
        let user = find(conn, id)?;
        posts::delete_by_author(conn, id)?;
        diesel::delete(users::table.find(id)).execute(conn)?;
        Ok(user)
    })
}
