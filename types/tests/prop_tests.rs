use proptest::prelude::*;

use vouch_types::{ClientIp, DeviceFingerprint, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// elapsed_since saturates instead of underflowing.
    #[test]
    fn elapsed_since_never_underflows(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let elapsed = Timestamp::new(a).elapsed_since(Timestamp::new(b));
        prop_assert_eq!(elapsed, b.saturating_sub(a));
    }

    /// has_expired agrees with saturating arithmetic at the u64 boundary.
    #[test]
    fn has_expired_matches_saturating_add(
        start in 0u64..u64::MAX,
        duration in 0u64..u64::MAX,
        now in 0u64..u64::MAX,
    ) {
        let expired = Timestamp::new(start).has_expired(duration, Timestamp::new(now));
        prop_assert_eq!(expired, now >= start.saturating_add(duration));
    }

    /// is_past is exactly <= on the underlying seconds.
    #[test]
    fn is_past_is_le(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        prop_assert_eq!(Timestamp::new(a).is_past(Timestamp::new(b)), a <= b);
    }

    /// Any string with a non-whitespace character is a valid fingerprint,
    /// and the stored value is exactly what went in.
    #[test]
    fn nonblank_fingerprints_accepted_verbatim(s in "\\S[\\s\\S]{0,64}") {
        let fp = DeviceFingerprint::new(s.clone()).unwrap();
        prop_assert_eq!(fp.as_str(), s);
    }

    /// Whitespace-only strings are never a valid ip — they would collide
    /// across every anonymous submission.
    #[test]
    fn blank_ips_rejected(s in "[ \\t\\n]{0,8}") {
        prop_assert!(ClientIp::new(s).is_err());
    }

    /// Equality on signals is exact string equality — the dedup check
    /// never normalizes.
    #[test]
    fn signal_equality_is_exact(a in "\\S{1,32}", b in "\\S{1,32}") {
        let fa = DeviceFingerprint::new(a.clone()).unwrap();
        let fb = DeviceFingerprint::new(b.clone()).unwrap();
        prop_assert_eq!(fa == fb, a == b);
    }
}
