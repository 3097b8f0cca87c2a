//! Semantic field types and their predicates.
//!
//! Every predicate matches against the whole string. Word characters are
//! ASCII letters, digits and underscore. Category and location values are
//! anchored repetitions, so one malformed `+OR+` segment rejects the entire
//! value.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

lazy_static! {
    static ref SOURCE: Regex = Regex::new(r"^(?-u:\w){5}$").unwrap();
    static ref CATEGORY: Regex =
        Regex::new(r"^(?-u:\w){4}(?:\+OR\+(?-u:\w){4})*$").unwrap();
    static ref LOCATION: Regex =
        Regex::new(r"^(?-u:\w){3}(?:\+OR\+(?-u:\w){3})*$").unwrap();
    static ref TIMESTAMP: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$").unwrap();
    static ref LIST: Regex = Regex::new(r"^(?-u:\w)+(?:,(?-u:\w)+)*$").unwrap();
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fields a search may ask the server to return.
pub const RETVALS: &[&str] = &[
    "source",
    "category",
    "location",
    "longitude",
    "latitude",
    "heading",
    "body",
    "image",
    "externalURL",
    "userID",
    "timestamp",
    "externalID",
    "annotations",
    "postKey",
];

pub fn is_source(value: &str) -> bool {
    SOURCE.is_match(value)
}

pub fn is_category(value: &str) -> bool {
    CATEGORY.is_match(value)
}

pub fn is_location(value: &str) -> bool {
    LOCATION.is_match(value)
}

/// `YYYY-MM-DD HH:MM:SS` naming a real calendar instant.
///
/// chrono parses `:60` as a leap second at any minute; seconds stop at 59.
pub fn is_timestamp(value: &str) -> bool {
    TIMESTAMP.is_match(value)
        && NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
            .map(|parsed| parsed.time().nanosecond() < 1_000_000_000)
            .unwrap_or(false)
}

/// Valid JSON whose top-level value is an object.
pub fn is_json_map(value: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(value)
        .map(|parsed| parsed.is_object())
        .unwrap_or(false)
}

pub fn is_list(value: &str) -> bool {
    LIST.is_match(value)
}

pub fn is_retvals(value: &str) -> bool {
    !value.is_empty() && value.split(',').all(|token| RETVALS.contains(&token))
}

pub fn is_dimension(value: &str) -> bool {
    value.parse::<Dimension>().is_ok()
}

/// The semantic type a string parameter must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Source,
    Category,
    Location,
    Timestamp,
    JsonMap,
    List,
    Retvals,
    Dimension,
}

impl FieldKind {
    pub fn accepts(self, value: &str) -> bool {
        match self {
            FieldKind::Source => is_source(value),
            FieldKind::Category => is_category(value),
            FieldKind::Location => is_location(value),
            FieldKind::Timestamp => is_timestamp(value),
            FieldKind::JsonMap => is_json_map(value),
            FieldKind::List => is_list(value),
            FieldKind::Retvals => is_retvals(value),
            FieldKind::Dimension => is_dimension(value),
        }
    }

    /// Human-readable description of what a valid value looks like.
    pub fn rule(self) -> &'static str {
        match self {
            FieldKind::Source => "must be exactly 5 word characters",
            FieldKind::Category => "must be 4-character codes joined by +OR+",
            FieldKind::Location => "must be 3-character codes joined by +OR+",
            FieldKind::Timestamp => "must be a valid YYYY-MM-DD HH:MM:SS timestamp",
            FieldKind::JsonMap => "must be a JSON object",
            FieldKind::List => "must be a comma-separated list of words",
            FieldKind::Retvals => "must be a comma-separated list of known retvals",
            FieldKind::Dimension => "must be one of source, category, location",
        }
    }
}

/// Reject `value` unless it satisfies `kind`.
pub fn check(field: &str, kind: FieldKind, value: &str) -> Result<(), ApiError> {
    if kind.accepts(value) {
        Ok(())
    } else {
        Err(ApiError::Validation {
            field: field.to_string(),
            rule: kind.rule(),
        })
    }
}

/// Axis along which `summary` groups its counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Source,
    Category,
    Location,
}

impl Dimension {
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Source => "source",
            Dimension::Category => "category",
            Dimension::Location => "location",
        }
    }
}

impl FromStr for Dimension {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(Dimension::Source),
            "category" => Ok(Dimension::Category),
            "location" => Ok(Dimension::Location),
            _ => Err(ApiError::Validation {
                field: "dimension".to_string(),
                rule: FieldKind::Dimension.rule(),
            }),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_requires_five_word_chars() {
        assert!(is_source("abc12"));
        assert!(is_source("CRAIG"));
        assert!(is_source("a_b_c"));
        assert!(!is_source("11"));
        assert!(!is_source("ab"));
        assert!(!is_source("abcdefgh"));
        assert!(!is_source("ab-12"));
        assert!(!is_source(""));
        assert!(!is_source("ééééé"));
    }

    #[test]
    fn category_segments_are_all_checked() {
        assert!(is_category("FOOB"));
        assert!(is_category("FooB+OR+BarB"));
        assert!(is_category("VAUT+OR+VOTH+OR+SSSS"));
        assert!(!is_category("FOOB+"));
        assert!(!is_category("FOOB+OR"));
        assert!(!is_category("FOOB+OR+"));
        assert!(!is_category("+OR+FOOB"));
        assert!(!is_category("FOO"));
        assert!(!is_category("FOOB+OR+BAR"));
        assert!(!is_category("FOOBAR"));
        assert!(!is_category("ÄÖÜß"));
        assert!(!is_category("VAUT+OR+ÄÖÜß"));
    }

    #[test]
    fn location_segments_are_all_checked() {
        assert!(is_location("FOO"));
        assert!(is_location("FOO+OR+BAR"));
        assert!(!is_location("FOOB"));
        assert!(!is_location("FOO+OR+BA"));
        assert!(!is_location("FOO+OR+"));
        assert!(!is_location("FOO BAR"));
        assert!(!is_location("ÅÄÖ"));
    }

    #[test]
    fn timestamp_checks_calendar() {
        assert!(is_timestamp("2001-02-02 20:00:01"));
        assert!(is_timestamp("2000-02-29 00:00:00"));
        assert!(!is_timestamp("1970-02-31 12:00:00"));
        assert!(!is_timestamp("2001-02-29 12:00:00"));
        assert!(!is_timestamp("2001-02-02 24:00:00"));
        assert!(!is_timestamp("2001-02-02 20:00:60"));
        assert!(!is_timestamp("1998-12-31 23:59:60"));
        assert!(is_timestamp("1998-12-31 23:59:59"));
        assert!(!is_timestamp("2001-13-02 20:00:01"));
        assert!(!is_timestamp("2001-2-2 20:00:01"));
        assert!(!is_timestamp("2001-02-02T20:00:01"));
        assert!(!is_timestamp("yesterday"));
    }

    #[test]
    fn json_map_must_be_an_object() {
        assert!(is_json_map("{}"));
        assert!(is_json_map(r#"{"foo":11}"#));
        assert!(!is_json_map("{]"));
        assert!(!is_json_map("55"));
        assert!(!is_json_map("[]"));
        assert!(!is_json_map("null"));
        assert!(!is_json_map(""));
    }

    #[test]
    fn list_is_comma_separated_words() {
        assert!(is_list("foo"));
        assert!(is_list("foo,bar,baz"));
        assert!(!is_list("foo,"));
        assert!(!is_list(",foo"));
        assert!(!is_list("foo bar"));
        assert!(!is_list("foo,,bar"));
        assert!(!is_list(""));
        assert!(!is_list("prix,année"));
    }

    #[test]
    fn retvals_drawn_from_vocabulary() {
        assert!(is_retvals("source,category"));
        assert!(is_retvals("heading,body,image"));
        assert!(is_retvals("postKey"));
        assert!(!is_retvals("foo,bar,baz"));
        assert!(!is_retvals("source,"));
        assert!(!is_retvals("source,,body"));
        assert!(!is_retvals("Source"));
        assert!(!is_retvals(""));
    }

    #[test]
    fn dimension_is_a_single_literal() {
        assert!(is_dimension("source"));
        assert!(is_dimension("category"));
        assert!(is_dimension("location"));
        assert!(!is_dimension("source,category"));
        assert!(!is_dimension("heading"));
        assert_eq!("location".parse::<Dimension>().unwrap(), Dimension::Location);
        assert_eq!(Dimension::Category.to_string(), "category");
    }

    #[test]
    fn check_reports_field_and_rule() {
        assert!(check("source", FieldKind::Source, "CRAIG").is_ok());
        let err = check("location", FieldKind::Location, "LA").unwrap_err();
        match err {
            ApiError::Validation { field, rule } => {
                assert_eq!(field, "location");
                assert_eq!(rule, FieldKind::Location.rule());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
