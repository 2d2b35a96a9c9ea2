//! Database access for the route handlers.
//!
//! Every function works on a borrowed connection, so a handler decides what
//! runs together in one `db.run` call. Operations that write more than one
//! row open their own transaction.
pub mod posts;
pub mod tags;
pub mod users;
