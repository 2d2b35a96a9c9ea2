#![allow(dead_code)]

use blogly::db::DbConn;
use blogly::models::{NewUser, Post, PostChanges, Tag, User, DEFAULT_IMAGE_URL};
use blogly::schema::{post_tags, posts, tags, users};
use blogly::{store, BloglyConfig};
use diesel::prelude::*;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::{Client, LocalResponse};
use tempfile::TempDir;

/// A running application backed by its own throwaway SQLite database.
pub struct TestApp {
    pub client: Client,
    database_url: String,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let database_url = dir
            .path()
            .join("blogly.sqlite3")
            .to_str()
            .expect("utf-8 path")
            .to_owned();
        let config = BloglyConfig {
            database_url: database_url.clone(),
        };
        let client = Client::tracked(blogly::build(&config)).expect("valid rocket instance");

        TestApp {
            client,
            database_url,
            _dir: dir,
        }
    }

    pub fn conn(&self) -> DbConn {
        DbConn::establish(&self.database_url).expect("database connection")
    }

    pub fn get(&self, uri: &str) -> (Status, String) {
        let response = self.client.get(uri.to_owned()).dispatch();
        let status = response.status();
        (status, response.into_string().unwrap_or_default())
    }

    pub fn post_form(&self, uri: &str, body: &str) -> LocalResponse<'_> {
        self.client
            .post(uri.to_owned())
            .header(ContentType::Form)
            .body(body.to_owned())
            .dispatch()
    }

    /// Submits a form, expects a redirect and returns the page it points to.
    pub fn post_and_follow(&self, uri: &str, body: &str) -> (Status, String) {
        let response = self.post_form(uri, body);
        assert_eq!(response.status(), Status::SeeOther);
        let target = location(&response);
        self.get(&target)
    }

    pub fn user(&self, first: &str, last: &str) -> User {
        store::users::insert(
            &mut self.conn(),
            &NewUser {
                first_name: first.into(),
                last_name: last.into(),
                image_url: DEFAULT_IMAGE_URL.into(),
            },
        )
        .expect("insert user")
    }

    pub fn tag(&self, name: &str) -> Tag {
        store::tags::insert(&mut self.conn(), name.into()).expect("insert tag")
    }

    pub fn post(&self, author: &User, title: &str, tags: &[&Tag]) -> Post {
        let tag_ids = tags.iter().map(|t| t.id).collect::<Vec<_>>();
        store::posts::insert(
            &mut self.conn(),
            author.id,
            PostChanges {
                title: title.into(),
                content: "This is my post content".into(),
            },
            &tag_ids,
        )
        .expect("insert post")
    }

    pub fn user_count(&self) -> i64 {
        users::table.count().get_result(&mut self.conn()).unwrap()
    }

    pub fn post_count(&self) -> i64 {
        posts::table.count().get_result(&mut self.conn()).unwrap()
    }

    pub fn tag_count(&self) -> i64 {
        tags::table.count().get_result(&mut self.conn()).unwrap()
    }

    pub fn association_count(&self) -> i64 {
        post_tags::table.count().get_result(&mut self.conn()).unwrap()
    }

    /// Ids of the tags on a post, ascending.
    pub fn tag_ids_of(&self, post_id: i32) -> Vec<i32> {
        post_tags::table
            .filter(post_tags::post_id.eq(post_id))
            .select(post_tags::tag_id)
            .order(post_tags::tag_id)
            .load(&mut self.conn())
            .unwrap()
    }
}

pub fn location(response: &LocalResponse<'_>) -> String {
    response
        .headers()
        .get_one("Location")
        .expect("redirect location")
        .to_owned()
}
