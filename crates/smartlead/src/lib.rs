//! Smartlead API client — one wrapper per upstream campaign operation.
//!
//! Every operation is a stateless request/response pair against the
//! upstream REST API: inputs are forwarded essentially unmodified, the
//! upstream response body comes back verbatim, and failures are logged and
//! re-signalled to the caller rather than swallowed. Upstream owns all
//! durable state; nothing here is retried or cached.
//!
//! # Modules
//!
//! - [`client`] — request/response wrappers over the upstream REST API
//! - [`error`] — typed upstream failure (status + message when available)
//! - [`types`] — wire types owned by this integration

pub mod client;
pub mod error;
pub mod types;

pub use client::SmartleadClient;
pub use error::{SmartleadError, SmartleadResult};
pub use types::{CreatedCampaign, LeadIngestSettings};
