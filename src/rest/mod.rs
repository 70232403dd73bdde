//! Tracker REST interface.
//!
//! The class helper only reads from the tracker: collection listings (paged,
//! searched, or verbose for dropdowns), the translation template and the
//! REST root for the enablement probe.

mod client;
mod error;
mod models;
pub mod urls;

pub use client::{ApiResponse, Credentials, RestClient};
pub use error::NetworkError;
pub use models::{value_text, CollectionData, Envelope, LinkRef, Links, Record};
