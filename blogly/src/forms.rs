//! Form bodies accepted by the mutating routes.
//!
//! A missing required field makes the `Form` guard fail (422). Fields that
//! are present are checked with `validator`, which turns blank or overlong
//! values into a 400 before anything touches the database. Values are stored
//! exactly as submitted.
use rocket::FromForm;
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::models::{NewUser, PostChanges, DEFAULT_IMAGE_URL};

#[derive(Debug, Clone, PartialEq, Eq, FromForm, Validate)]
pub struct UserForm {
    #[validate(length(max = 50), custom = "not_blank")]
    pub first_name: String,
    #[validate(length(max = 50), custom = "not_blank")]
    pub last_name: String,
    pub image_url: Option<String>,
}

/// Rejects values that are empty or only whitespace.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl UserForm {
    /// Validates the form. A blank or absent `image_url` becomes the
    /// placeholder picture.
    pub fn into_user(self) -> AppResult<NewUser> {
        self.validate()?;

        Ok(NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            image_url: self
                .image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_owned()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromForm, Validate)]
pub struct PostForm {
    #[validate(length(max = 100), custom = "not_blank")]
    pub title: String,
    #[validate(custom = "not_blank")]
    pub content: String,
    #[field(default = Vec::new())]
    pub tags: Vec<i32>,
}

impl PostForm {
    /// Splits the form into the post columns and the requested tag ids.
    ///
    /// Tag ids are sorted and deduplicated; whether they exist is only known
    /// once the store looks them up.
    pub fn into_parts(self) -> AppResult<(PostChanges, Vec<i32>)> {
        self.validate()?;

        let mut tags = self.tags;
        tags.sort_unstable();
        tags.dedup();

        Ok((
            PostChanges {
                title: self.title,
                content: self.content,
            },
            tags,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromForm, Validate)]
pub struct TagForm {
    #[validate(length(max = 50), custom = "not_blank")]
    pub tag_name: String,
}

impl TagForm {
    pub fn into_name(self) -> AppResult<String> {
        self.validate()?;
        Ok(self.tag_name)
    }
}
