//! Request bookkeeping carried through the host's web request context.
//!
//! Zellij delivers every `web_request` result as a single event type, so each
//! request is tagged with a [`RequestPurpose`] serialized into the context map.
//! The purpose comes back untouched with the response and tells the event
//! handler which piece of state the body belongs to.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context map key under which the serialized purpose is stored.
pub const CONTEXT_KEY: &str = "cinescope";

/// What a dispatched request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestPurpose {
    /// Genre catalog fetched once at startup.
    Genres,

    /// A movie listing page. Only the response whose `seq` matches the latest
    /// dispatched listing request is applied.
    Movies {
        seq: u64,
    },

    /// Video listing for the trailer of one card.
    Videos {
        card: usize,
        movie_id: u64,
        /// Hover cycle that requested the videos; stale cycles are ignored.
        generation: u64,
    },
}

impl RequestPurpose {
    /// Encodes the purpose into a host context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match serde_json::to_string(self) {
            Ok(encoded) => {
                context.insert(CONTEXT_KEY.to_string(), encoded);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to encode request purpose");
            }
        }
        context
    }

    /// Decodes a purpose from a host context map.
    ///
    /// Returns `None` for results of requests this plugin did not tag.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let raw = context.get(CONTEXT_KEY)?;
        match serde_json::from_str(raw) {
            Ok(purpose) => Some(purpose),
            Err(e) => {
                tracing::debug!(error = %e, "failed to decode request purpose");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_round_trip_for_videos() {
        let purpose = RequestPurpose::Videos {
            card: 3,
            movie_id: 603,
            generation: 7,
        };
        let context = purpose.to_context();
        assert!(context.contains_key(CONTEXT_KEY));
        assert_eq!(RequestPurpose::from_context(&context), Some(purpose));
    }

    #[test]
    fn foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        assert_eq!(RequestPurpose::from_context(&context), None);
        context.insert(CONTEXT_KEY.to_string(), "not json".to_string());
        assert_eq!(RequestPurpose::from_context(&context), None);
    }
}
