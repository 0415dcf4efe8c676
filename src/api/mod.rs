//! Remote client for the TMDB metadata service.
//!
//! # Modules
//!
//! - [`client`]: Credentialed URL builder and response decoder
//! - [`query`]: Typed listing queries (discover / search)
//! - [`request`]: Request purpose tags round-tripped through the host

pub mod client;
pub mod query;
pub mod request;

pub use client::{decode_response, poster_url, ApiResponse, TmdbClient, DEFAULT_LANGUAGE};
pub use query::{DiscoverParams, MovieQuery, SortOrder};
pub use request::RequestPurpose;
