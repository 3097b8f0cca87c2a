//! Synchronous client for the 3taps search and status API.
//!
//! # Overview
//! Validates caller-supplied parameters against the API's semantic field
//! types, builds GET query strings or form-encoded POST bodies, sends each
//! request once through an injected `Transport`, and hands back the decoded
//! JSON untouched.
//!
//! # Design
//! - `Client` holds only immutable configuration and its transport.
//! - Each operation has a `build_*` counterpart that does no I/O, so request
//!   construction can be tested (or executed by the host) on its own.
//! - Validation and the at-least-one-filter rule run before any I/O.
//! - `UreqTransport` (feature `ureq`, on by default) is the stock transport;
//!   anything implementing `Transport` can replace it.
//!
//! ```no_run
//! use threetaps_core::{Client, SearchParams};
//!
//! let client = Client::with_defaults();
//! let results = client.search(&SearchParams::new().location("LAX").category("VAUT"))?;
//! println!("{results}");
//! # Ok::<(), threetaps_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod request;
pub mod validate;

pub use client::Client;
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use error::ApiError;
#[cfg(feature = "ureq")]
pub use http::UreqTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use params::{PostingStatusUpdate, RangeParams, SearchParams, StatusQueryId, SummaryParams};
pub use request::RequestBuilder;
pub use validate::{Dimension, FieldKind};
