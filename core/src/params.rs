//! Parameter sets for each endpoint.
//!
//! # Design
//! Values are carried as plain strings and checked against their semantic
//! type in `validate`, right before a request is built. Wire names follow the
//! remote API (`externalID`, `trustedAnnotations`), Rust names follow Rust.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::validate::{check, Dimension, FieldKind};

/// Optional filters shared by `search`, `count`, `range` and `summary`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub rpp: Option<u32>,
    pub page: Option<u32>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub heading: Option<String>,
    pub body: Option<String>,
    pub text: Option<String>,
    pub poster: Option<String>,
    pub external_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub annotations: Option<String>,
    pub trusted_annotations: Option<String>,
    pub retvals: Option<String>,
}

macro_rules! string_setters {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name(mut self, value: impl Into<String>) -> Self {
                self.$name = Some(value.into());
                self
            }
        )*
    };
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rpp(mut self, rpp: u32) -> Self {
        self.rpp = Some(rpp);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    string_setters!(
        source,
        category,
        location,
        heading,
        body,
        text,
        poster,
        external_id,
        start,
        end,
        annotations,
        trusted_annotations,
        retvals,
    );

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Check every present field against its semantic type.
    pub fn validate(&self) -> Result<(), ApiError> {
        let typed = [
            ("source", FieldKind::Source, &self.source),
            ("category", FieldKind::Category, &self.category),
            ("location", FieldKind::Location, &self.location),
            ("start", FieldKind::Timestamp, &self.start),
            ("end", FieldKind::Timestamp, &self.end),
            ("annotations", FieldKind::JsonMap, &self.annotations),
            ("trustedAnnotations", FieldKind::JsonMap, &self.trusted_annotations),
            ("retvals", FieldKind::Retvals, &self.retvals),
        ];
        for (field, kind, value) in typed {
            if let Some(value) = value {
                check(field, kind, value)?;
            }
        }
        Ok(())
    }

    /// Present fields as `(wire name, value)`, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(rpp) = self.rpp {
            pairs.push(("rpp", rpp.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        let strings = [
            ("source", &self.source),
            ("category", &self.category),
            ("location", &self.location),
            ("heading", &self.heading),
            ("body", &self.body),
            ("text", &self.text),
            ("poster", &self.poster),
            ("externalID", &self.external_id),
            ("start", &self.start),
            ("end", &self.end),
            ("annotations", &self.annotations),
            ("trustedAnnotations", &self.trusted_annotations),
            ("retvals", &self.retvals),
        ];
        pairs.extend(
            strings
                .into_iter()
                .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone()))),
        );
        pairs
    }
}

/// `search/range`: which fields to report value ranges for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeParams {
    pub search: SearchParams,
    pub fields: String,
}

impl RangeParams {
    pub fn new(search: SearchParams, fields: impl Into<String>) -> Self {
        Self {
            search,
            fields: fields.into(),
        }
    }
}

/// `search/summary`: counts grouped by `dimension`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryParams {
    pub search: SearchParams,
    pub dimension: Dimension,
}

impl SummaryParams {
    pub fn new(search: SearchParams, dimension: Dimension) -> Self {
        Self { search, dimension }
    }
}

/// A status event for one posting, sent through `status/update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingStatusUpdate {
    pub source: String,
    #[serde(rename = "externalID")]
    pub external_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl PostingStatusUpdate {
    pub fn new(
        source: impl Into<String>,
        external_id: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            external_id: external_id.into(),
            status: status.into(),
            timestamp: None,
            attributes: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        check("source", FieldKind::Source, &self.source)?;
        require_non_empty("externalID", &self.external_id)?;
        require_non_empty("status", &self.status)
    }
}

/// Identifies a posting whose status history `status/get` should return.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusQueryId {
    pub source: String,
    #[serde(rename = "externalID")]
    pub external_id: String,
}

impl StatusQueryId {
    pub fn new(source: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            external_id: external_id.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        check("source", FieldKind::Source, &self.source)?;
        require_non_empty("externalID", &self.external_id)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ApiError> {
    if value.is_empty() {
        return Err(ApiError::Validation {
            field: field.to_string(),
            rule: "must not be empty",
        });
    }
    Ok(())
}
