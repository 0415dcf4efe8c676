//! TMDB (The Movie Database) request builder and response decoder.
//!
//! The plugin cannot perform blocking or awaited I/O: requests are handed to the
//! host and their results arrive later as events. [`TmdbClient`] therefore
//! builds complete request URLs, and [`decode_response`] turns the delivered
//! result into a typed value or a [`CinescopeError`].
//!
//! # Credential handling
//!
//! Every URL carries `api_key` and `language`. Caller parameters are merged
//! first and any caller-supplied `api_key` or `language` is dropped, so neither
//! can be overridden. Without a credential every builder fails with
//! [`CinescopeError::Config`] and no URL exists to dispatch.

use crate::api::query::{DiscoverParams, MovieQuery};
use crate::domain::error::{CinescopeError, Result};
use serde::de::DeserializeOwned;
use url::Url;

/// Base URL of the TMDB v3 API.
pub const BASE_URL: &str = "https://api.themoviedb.org/3";

/// Base URL for poster images (`w500` balances quality and size).
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "it-IT";

/// Parameters the client owns; callers can never set them.
const RESERVED_PARAMS: [&str; 2] = ["api_key", "language"];

/// Builds the poster URL for a TMDB image path such as `/abc.jpg`.
///
/// # Examples
///
/// ```
/// use cinescope::api::poster_url;
///
/// assert_eq!(poster_url("/abc.jpg"), "https://image.tmdb.org/t/p/w500/abc.jpg");
/// ```
#[must_use]
pub fn poster_url(path: &str) -> String {
    format!("{IMAGE_BASE_URL}{path}")
}

/// Request builder for the TMDB v3 endpoints the plugin uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbClient {
    api_key: Option<String>,
    language: String,
    base_url: String,
}

impl TmdbClient {
    /// Creates a client. A blank key counts as no key.
    #[must_use]
    pub fn new(api_key: Option<String>, language: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            language: language.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Points the client at another API root (used by tests and proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// `/genre/movie/list`
    ///
    /// # Errors
    ///
    /// [`CinescopeError::Config`] when no credential is configured.
    pub fn fetch_genres(&self) -> Result<Url> {
        self.url("/genre/movie/list", &[])
    }

    /// `/discover/movie`
    ///
    /// # Errors
    ///
    /// [`CinescopeError::Config`] when no credential is configured.
    pub fn discover_movies(&self, params: &DiscoverParams) -> Result<Url> {
        self.url("/discover/movie", &params.to_params())
    }

    /// `/search/movie`
    ///
    /// # Errors
    ///
    /// [`CinescopeError::Config`] when no credential is configured.
    pub fn search_movies(&self, query: &str, params: &[(String, String)]) -> Result<Url> {
        let mut merged = vec![("query".to_string(), query.to_string())];
        merged.extend(params.iter().filter(|(k, _)| k != "query").cloned());
        self.url("/search/movie", &merged)
    }

    /// `/movie/{id}/videos`
    ///
    /// # Errors
    ///
    /// [`CinescopeError::Config`] when no credential is configured.
    pub fn fetch_movie_videos(&self, movie_id: u64) -> Result<Url> {
        self.url(&format!("/movie/{movie_id}/videos"), &[])
    }

    /// Builds the listing request for a derived [`MovieQuery`].
    ///
    /// # Errors
    ///
    /// [`CinescopeError::Config`] when no credential is configured.
    pub fn movies(&self, query: &MovieQuery) -> Result<Url> {
        match query {
            MovieQuery::Search { query, page } => self.search_movies(
                query,
                &[
                    ("page".to_string(), page.to_string()),
                    ("include_adult".to_string(), "false".to_string()),
                ],
            ),
            MovieQuery::Discover(params) => self.discover_movies(params),
        }
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> Result<Url> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(CinescopeError::Config("Missing API key".to_string()));
        };

        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| CinescopeError::Config(format!("Invalid API base URL: {e}")))?;

        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                if RESERVED_PARAMS.contains(&key.as_str()) {
                    tracing::debug!(param = %key, "dropping caller override of reserved parameter");
                    continue;
                }
                query.append_pair(key, value);
            }
            query.append_pair("api_key", api_key);
            query.append_pair("language", &self.language);
        }

        Ok(url)
    }
}

/// A web request result as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// The service answered; the status may still be an error.
    Completed { status: u16, body: Vec<u8> },
    /// The request never produced an HTTP response.
    TransportFailed { reason: String },
}

impl ApiResponse {
    /// Classifies a raw host result.
    ///
    /// Zellij reports a failed transport as status 400 with neither headers nor
    /// body; a real HTTP 400 from TMDB always carries headers.
    #[must_use]
    pub fn from_host(status: u16, header_count: usize, body: Vec<u8>) -> Self {
        if status == 400 && header_count == 0 && body.is_empty() {
            Self::TransportFailed {
                reason: "request did not reach the server".to_string(),
            }
        } else {
            Self::Completed { status, body }
        }
    }
}

/// Decodes a host result into the expected TMDB document.
///
/// # Errors
///
/// - [`CinescopeError::Network`] for transport failures
/// - [`CinescopeError::Upstream`] for non-2xx statuses
/// - [`CinescopeError::Decode`] for a 2xx body that is not the expected JSON
pub fn decode_response<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    match response {
        ApiResponse::TransportFailed { reason } => {
            tracing::error!(reason = %reason, "network error fetching from TMDB");
            Err(CinescopeError::Network(reason.clone()))
        }
        ApiResponse::Completed { status, body } if !(200..300).contains(status) => {
            tracing::error!(
                status = status,
                body = %String::from_utf8_lossy(body),
                "TMDB returned non-OK"
            );
            Err(CinescopeError::Upstream { status: *status })
        }
        ApiResponse::Completed { body, .. } => Ok(serde_json::from_slice(body)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::SortOrder;
    use crate::domain::{GenreList, ResultPage};

    fn client() -> TmdbClient {
        TmdbClient::new(Some("secret".to_string()), "it-IT")
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    fn popular(page: u32) -> DiscoverParams {
        DiscoverParams {
            page,
            sort_by: SortOrder::PopularityDesc,
            min_vote_count: Some(50),
            release_from: None,
            release_to: None,
            genre: None,
        }
    }

    #[test]
    fn missing_credential_fails_every_call_with_config_error() {
        for key in [None, Some(String::new()), Some("   ".to_string())] {
            let client = TmdbClient::new(key, "it-IT");
            assert!(!client.has_credential());
            assert!(matches!(client.fetch_genres(), Err(CinescopeError::Config(_))));
            assert!(matches!(client.discover_movies(&popular(1)), Err(CinescopeError::Config(_))));
            assert!(matches!(client.search_movies("matrix", &[]), Err(CinescopeError::Config(_))));
            assert!(matches!(client.fetch_movie_videos(603), Err(CinescopeError::Config(_))));
        }
    }

    #[test]
    fn credential_and_language_are_attached() {
        let url = client().fetch_genres().unwrap();
        assert_eq!(url.path(), "/3/genre/movie/list");
        let params = pairs(&url);
        assert!(params.contains(&("api_key".to_string(), "secret".to_string())));
        assert!(params.contains(&("language".to_string(), "it-IT".to_string())));
    }

    #[test]
    fn caller_cannot_override_credential_or_language() {
        let url = client()
            .search_movies(
                "matrix",
                &[
                    ("api_key".to_string(), "stolen".to_string()),
                    ("language".to_string(), "en-US".to_string()),
                    ("page".to_string(), "3".to_string()),
                ],
            )
            .unwrap();
        let params = pairs(&url);
        let keys: Vec<_> = params.iter().filter(|(k, _)| k == "api_key").collect();
        assert_eq!(keys, vec![&("api_key".to_string(), "secret".to_string())]);
        let languages: Vec<_> = params.iter().filter(|(k, _)| k == "language").collect();
        assert_eq!(languages, vec![&("language".to_string(), "it-IT".to_string())]);
        assert!(params.contains(&("page".to_string(), "3".to_string())));
        assert!(params.contains(&("query".to_string(), "matrix".to_string())));
    }

    #[test]
    fn search_query_excludes_adult_titles() {
        let url = client()
            .movies(&MovieQuery::Search {
                query: "la dolce vita".to_string(),
                page: 2,
            })
            .unwrap();
        assert_eq!(url.path(), "/3/search/movie");
        let params = pairs(&url);
        assert!(params.contains(&("include_adult".to_string(), "false".to_string())));
        assert!(params.contains(&("query".to_string(), "la dolce vita".to_string())));
        assert!(params.contains(&("page".to_string(), "2".to_string())));
    }

    #[test]
    fn videos_endpoint_embeds_movie_id() {
        let url = client().fetch_movie_videos(603).unwrap();
        assert_eq!(url.path(), "/3/movie/603/videos");
    }

    #[test]
    fn custom_base_url() {
        let url = client()
            .with_base_url("http://localhost:8080/tmdb")
            .discover_movies(&popular(4))
            .unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.path(), "/tmdb/discover/movie");
    }

    #[test]
    fn transport_failure_is_network_error() {
        let response = ApiResponse::from_host(400, 0, Vec::new());
        assert!(matches!(
            decode_response::<GenreList>(&response),
            Err(CinescopeError::Network(_))
        ));
    }

    #[test]
    fn non_success_status_is_upstream_error() {
        let response = ApiResponse::from_host(401, 3, br#"{"status_message":"Invalid API key"}"#.to_vec());
        let err = decode_response::<ResultPage>(&response).unwrap_err();
        assert_eq!(err.status(), Some(401));

        let real_bad_request = ApiResponse::from_host(400, 2, Vec::new());
        assert!(matches!(
            decode_response::<ResultPage>(&real_bad_request),
            Err(CinescopeError::Upstream { status: 400 })
        ));
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let response = ApiResponse::Completed {
            status: 200,
            body: b"<html>".to_vec(),
        };
        assert!(matches!(
            decode_response::<ResultPage>(&response),
            Err(CinescopeError::Decode(_))
        ));
    }

    #[test]
    fn success_decodes_document() {
        let response = ApiResponse::Completed {
            status: 200,
            body: br#"{"genres":[{"id":28,"name":"Azione"}]}"#.to_vec(),
        };
        let genres: GenreList = decode_response(&response).unwrap();
        assert_eq!(genres.genres[0].name, "Azione");
    }
}
