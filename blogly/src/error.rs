use diesel::result::{DatabaseErrorKind, Error as DieselError};
use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::{catch, catchers, Catcher, Request};
use rocket_dyn_templates::{context, Template};
use validator::ValidationErrors;

/// Everything that can go wrong while handling a request.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("The requested page could not be found.")]
    NotFound,

    #[error("The submitted form is invalid: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(DieselError),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<DieselError> for AppError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::NotFound => AppError::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AppError::Conflict("That name is already taken.".to_owned())
            }
            e => AppError::Database(e),
        }
    }
}

impl AppError {
    pub fn status(&self) -> Status {
        match self {
            AppError::NotFound => Status::NotFound,
            AppError::Validation(_) => Status::BadRequest,
            AppError::Conflict(_) => Status::Conflict,
            AppError::Database(_) => Status::InternalServerError,
        }
    }
}

fn error_page(status: Status, message: &str) -> Template {
    Template::render(
        "error",
        context! {
            code: status.code,
            reason: status.reason().unwrap_or("Error"),
            message,
        },
    )
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        match &self {
            AppError::Database(e) => error!("{} {}: {}", req.method(), req.uri(), e),
            e => warn!("{} {}: {}", req.method(), req.uri(), e),
        }

        let message = match &self {
            // Don't leak database internals to the browser.
            AppError::Database(_) => "Something went wrong, nothing was changed.".to_owned(),
            e => e.to_string(),
        };
        (status, error_page(status, &message)).respond_to(req)
    }
}

#[catch(404)]
fn not_found(req: &Request<'_>) -> Template {
    error_page(
        Status::NotFound,
        &format!("Nothing lives at '{}'.", req.uri()),
    )
}

#[catch(422)]
fn unprocessable(_: &Request<'_>) -> Template {
    error_page(
        Status::UnprocessableEntity,
        "A required form field is missing or malformed.",
    )
}

#[catch(500)]
fn internal_error(_: &Request<'_>) -> Template {
    error_page(
        Status::InternalServerError,
        "Something went wrong, nothing was changed.",
    )
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, unprocessable, internal_error]
}
