//! Engine parameters.

use serde::{Deserialize, Serialize};

/// Tunable parameters of the verification engine.
///
/// A video's own threshold is copied from `default_threshold` at creation
/// and is immutable afterwards; later parameter changes only affect new
/// videos.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerificationParams {
    /// Attestation count at which a pending video flips to verified.
    pub default_threshold: u32,

    /// Maximum length (chars) of a verifier's display name.
    pub max_name_len: usize,

    /// Maximum length (chars) of the optional attestation message.
    pub max_message_len: usize,

    /// Base URL that verification links are minted under.
    pub link_base_url: String,
}

impl VerificationParams {
    /// The standard production configuration.
    pub fn standard() -> Self {
        Self {
            default_threshold: 3,
            max_name_len: 120,
            max_message_len: 500,
            link_base_url: "https://vouch.app".to_string(),
        }
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self::standard()
    }
}
