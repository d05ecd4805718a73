//! Verification link minting.
//!
//! Deterministic and unsigned: possession of the link is the only access
//! control, compensated for by the dedup defenses, not by link secrecy.

use vouch_types::{UserId, VideoId};

/// Build the shareable verification URL for a video.
pub fn mint_verification_link(base_url: &str, owner_id: &UserId, video_id: &VideoId) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/verify/{owner_id}/{video_id}")
}
