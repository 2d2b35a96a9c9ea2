//! Contains some utilities used by the models and routes.
use chrono::NaiveDateTime;
use rocket::request::FlashMessage;
use serde::{Serialize, Serializer};

/// Format used when showing post timestamps, e.g. `Mon Jan 1 2024, 10:00 AM`.
pub const TIMESTAMP_FORMAT: &str = "%a %b %-d %Y, %-I:%M %p";

/// Serialize helper that renders a timestamp in a human readable way.
///
/// Timestamps are only ever serialized to be shown in a template, so there
/// is no need to keep them machine readable.
pub fn display_timestamp<S>(timestamp: &NaiveDateTime, ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ser.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

/// A flash message as handed to the templates.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub message: String,
}

impl<'r> From<FlashMessage<'r>> for Notice {
    fn from(flash: FlashMessage<'r>) -> Self {
        let (kind, message) = flash.into_inner();
        Notice { kind, message }
    }
}

/// Consumes the (optional) flash message of the current request.
pub fn notice(flash: Option<FlashMessage<'_>>) -> Option<Notice> {
    flash.map(Notice::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize)]
    struct Stamped {
        #[serde(serialize_with = "display_timestamp")]
        at: NaiveDateTime,
    }

    #[test]
    fn timestamp_is_human_readable() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"Mon Jan 1 2024, 10:00 AM"}"#);
    }
}
