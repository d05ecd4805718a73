//! Anti-fraud dedup — the sybil defense.
//!
//! A candidate attestation is refused if any prior attestation on the same
//! video matches its device fingerprint OR its IP address. Either signal
//! alone is weak and spoofable (fingerprints can be reset; IPs are shared
//! behind NAT), so uniqueness is required on both dimensions independently.
//! Accepted tradeoff: two honest verifiers behind the same office NAT will
//! collide and the second is rejected.

use std::fmt;
use vouch_store::VerificationAttestation;
use vouch_types::{ClientIp, DeviceFingerprint};

/// Which dimension(s) collided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicateReason {
    /// Device fingerprint already used on this video.
    Device,
    /// IP address already used on this video.
    Ip,
    /// Both signals already used (possibly by different prior attestors).
    Both,
}

impl fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Device => "device fingerprint already used",
            Self::Ip => "ip address already used",
            Self::Both => "device fingerprint and ip address already used",
        };
        write!(f, "{s}")
    }
}

/// A dedup hit: the discriminated reason plus the display names of every
/// prior attestor that matched, for caller messaging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateMatch {
    pub reason: DuplicateReason,
    pub prior_attestors: Vec<String>,
}

impl fmt::Display for DuplicateMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate attestation ({}); prior attestor(s): {}",
            self.reason,
            self.prior_attestors.join(", ")
        )
    }
}

/// Scan existing attestations for a signal collision with the candidate.
///
/// Returns `None` when both signals are novel. Prior attestor names are
/// collected in list order, deduplicated (one person can match on both
/// dimensions with a single entry).
pub fn find_duplicate(
    attestations: &[VerificationAttestation],
    fingerprint: &DeviceFingerprint,
    ip: &ClientIp,
) -> Option<DuplicateMatch> {
    let mut device_hit = false;
    let mut ip_hit = false;
    let mut prior_attestors: Vec<String> = Vec::new();

    for existing in attestations {
        let matches_device = &existing.fingerprint == fingerprint;
        let matches_ip = &existing.ip == ip;
        if !matches_device && !matches_ip {
            continue;
        }
        device_hit |= matches_device;
        ip_hit |= matches_ip;
        if !prior_attestors.contains(&existing.verifier_name) {
            prior_attestors.push(existing.verifier_name.clone());
        }
    }

    let reason = match (device_hit, ip_hit) {
        (false, false) => return None,
        (true, false) => DuplicateReason::Device,
        (false, true) => DuplicateReason::Ip,
        (true, true) => DuplicateReason::Both,
    };

    Some(DuplicateMatch {
        reason,
        prior_attestors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_types::{Relationship, Timestamp};

    fn attestation(name: &str, fp: &str, ip: &str) -> VerificationAttestation {
        VerificationAttestation {
            verifier_id: "0".to_string(),
            verifier_name: name.to_string(),
            verifier_email: format!("{name}@example.com"),
            relationship: Relationship::Teammate,
            verified_at: Timestamp::new(0),
            message: None,
            fingerprint: DeviceFingerprint::new(fp).unwrap(),
            ip: ClientIp::new(ip).unwrap(),
            user_agent: "ua".to_string(),
        }
    }

    fn fp(s: &str) -> DeviceFingerprint {
        DeviceFingerprint::new(s).unwrap()
    }

    fn ip(s: &str) -> ClientIp {
        ClientIp::new(s).unwrap()
    }

    #[test]
    fn novel_signals_pass() {
        let existing = vec![attestation("alice", "fp-a", "1.2.3.4")];
        assert_eq!(find_duplicate(&existing, &fp("fp-c"), &ip("5.5.5.5")), None);
    }

    #[test]
    fn device_only_match() {
        let existing = vec![attestation("alice", "fp-a", "1.2.3.4")];
        let hit = find_duplicate(&existing, &fp("fp-a"), &ip("9.9.9.9")).unwrap();
        assert_eq!(hit.reason, DuplicateReason::Device);
        assert_eq!(hit.prior_attestors, vec!["alice"]);
    }

    #[test]
    fn ip_only_match() {
        let existing = vec![attestation("alice", "fp-a", "1.2.3.4")];
        let hit = find_duplicate(&existing, &fp("fp-b"), &ip("1.2.3.4")).unwrap();
        assert_eq!(hit.reason, DuplicateReason::Ip);
        assert_eq!(hit.prior_attestors, vec!["alice"]);
    }

    #[test]
    fn both_dimensions_same_prior_attestor() {
        let existing = vec![attestation("alice", "fp-a", "1.2.3.4")];
        let hit = find_duplicate(&existing, &fp("fp-a"), &ip("1.2.3.4")).unwrap();
        assert_eq!(hit.reason, DuplicateReason::Both);
        // one entry even though both dimensions matched her
        assert_eq!(hit.prior_attestors, vec!["alice"]);
    }

    #[test]
    fn both_dimensions_distinct_prior_attestors() {
        let existing = vec![
            attestation("alice", "fp-a", "1.2.3.4"),
            attestation("bob", "fp-b", "5.6.7.8"),
        ];
        // candidate reuses alice's device and bob's ip
        let hit = find_duplicate(&existing, &fp("fp-a"), &ip("5.6.7.8")).unwrap();
        assert_eq!(hit.reason, DuplicateReason::Both);
        assert_eq!(hit.prior_attestors, vec!["alice", "bob"]);
    }

    #[test]
    fn empty_list_never_matches() {
        assert_eq!(find_duplicate(&[], &fp("fp-a"), &ip("1.2.3.4")), None);
    }
}
