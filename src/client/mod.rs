//! Character API client: the data fetching half of the browser.
//!
//! The plugin never blocks on the network. A fetch is a [`FetchRequest`] handed to
//! the host's `web_request`, and the response comes back later as an event carrying
//! the same request in its context map.
//!
//! # Architecture
//!
//! - `request`: URL building and context-map encoding of outgoing fetches
//! - `response`: listing decoding and the fail-soft [`resolve`] policy
//! - `trace`: trace context propagation across the request/response gap

pub mod request;
pub mod response;
pub mod trace;

pub use request::FetchRequest;
pub use response::{parse_page, resolve};
pub use trace::TraceContext;

/// Default character listing endpoint.
pub const DEFAULT_API_URL: &str = "https://rickandmortyapi.com/api/character";
