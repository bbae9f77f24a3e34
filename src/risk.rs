//! Synthetic, reproducible disruption risk per chokepoint per day.
//!
//! The risk for a chokepoint is a pure function of its name and the UTC date:
//! SHA-256 of `name ++ "YYYY-MM-DD"`, reduced to a 32-bit seed, drives one
//! uniform draw from a locally owned ChaCha20 generator. No generator state is
//! shared between samples, so samples may be taken in any order or in parallel.

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::Route;
use crate::types::round1;

/// Lowest risk a sample can take (percent).
pub const MIN_RISK: f64 = 1.0;
/// Highest risk a sample can take (percent).
pub const MAX_RISK: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChokepointRisk {
    pub chokepoint: String,
    /// Percent, one decimal.
    pub risk: f64,
}

impl ChokepointRisk {
    pub fn new(chokepoint: impl Into<String>, risk: f64) -> Self {
        ChokepointRisk { chokepoint: chokepoint.into(), risk }
    }
}

/// 32-bit seed for `(chokepoint, as_of)`.
///
/// The digest taken as a big-endian integer modulo 2^32 is exactly its last
/// four bytes read big-endian.
pub fn seed_for(chokepoint: &str, as_of: NaiveDate) -> u32 {
    let seed_str = format!("{chokepoint}{}", as_of.format("%Y-%m-%d"));
    let digest = Sha256::digest(seed_str.as_bytes());
    let tail = [digest[28], digest[29], digest[30], digest[31]];
    u32::from_be_bytes(tail)
}

/// Disruption risk (percent, in `[MIN_RISK, MAX_RISK]`, one decimal) for a
/// chokepoint on a given UTC day.
pub fn disruption_risk(chokepoint: &str, as_of: NaiveDate) -> f64 {
    let seed = seed_for(chokepoint, as_of);
    let mut rng = ChaCha20Rng::seed_from_u64(u64::from(seed));
    let risk = round1(rng.random_range(MIN_RISK..=MAX_RISK));
    debug!(chokepoint, %as_of, seed, risk, "sampled disruption risk");
    risk
}

/// Sample every distinct chokepoint of `route`, in route order.
pub fn sample_route(route: &Route, as_of: NaiveDate) -> Vec<ChokepointRisk> {
    route
        .distinct_chokepoints()
        .into_iter()
        .map(|c| ChokepointRisk::new(c, disruption_risk(c, as_of)))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seed_is_last_four_digest_bytes() {
        // sha256("abc") ends in ...f2 00 15 ad
        let digest = Sha256::digest(b"abc");
        assert_eq!(&digest[28..], &[0xf2, 0x00, 0x15, 0xad]);

        // Same reduction through the public API: "" ++ date is just the date.
        let date = day(2026, 10, 16);
        let digest = Sha256::digest(b"2026-10-16");
        let expected = u32::from_be_bytes([digest[28], digest[29], digest[30], digest[31]]);
        assert_eq!(seed_for("", date), expected);
    }

    #[test]
    fn seed_string_has_no_separator() {
        let date = day(2026, 1, 2);
        let digest = Sha256::digest("Suez Canal2026-01-02".as_bytes());
        let expected = u32::from_be_bytes([digest[28], digest[29], digest[30], digest[31]]);
        assert_eq!(seed_for("Suez Canal", date), expected);
    }

    #[test]
    fn same_inputs_give_same_risk() {
        let date = day(2026, 10, 16);
        assert_eq!(
            disruption_risk("Strait of Hormuz", date),
            disruption_risk("Strait of Hormuz", date)
        );
    }

    #[test]
    fn risk_varies_with_date_and_name() {
        let start = day(2026, 1, 1);
        let risks: Vec<f64> = (0..30)
            .map(|i| disruption_risk("Suez Canal", start + chrono::Days::new(i)))
            .collect();
        assert!(risks.iter().any(|r| *r != risks[0]), "risk should move day to day");

        let date = day(2026, 10, 16);
        let names = ["Strait of Hormuz", "Strait of Malacca", "Taiwan Strait", "Suez Canal"];
        let by_name: Vec<f64> = names.iter().map(|n| disruption_risk(n, date)).collect();
        assert!(by_name.iter().any(|r| *r != by_name[0]), "risk should differ by chokepoint");
    }

    #[test]
    fn empty_name_is_accepted() {
        let r = disruption_risk("", day(2026, 10, 16));
        assert!((MIN_RISK..=MAX_RISK).contains(&r));
    }

    #[test]
    fn sample_route_preserves_order() {
        let route = Route::new("r", "R", &["B", "A", "C"]);
        let date = day(2026, 10, 16);
        let risks = sample_route(&route, date);
        let names: Vec<&str> = risks.iter().map(|r| r.chokepoint.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(risks[1].risk, disruption_risk("A", date));
    }

    #[test]
    fn sample_route_samples_repeated_chokepoint_once() {
        let route = Route::new("r", "R", &["Suez Canal", "Bab-el-Mandeb", "Suez Canal"]);
        let risks = sample_route(&route, day(2026, 10, 16));
        let names: Vec<&str> = risks.iter().map(|r| r.chokepoint.as_str()).collect();
        assert_eq!(names, vec!["Suez Canal", "Bab-el-Mandeb"]);
    }

    #[test]
    fn interleaved_sampling_matches_isolated_sampling() {
        let date = day(2026, 10, 16);
        let isolated = disruption_risk("Panama Canal", date);
        let _ = disruption_risk("Turkish Straits", date);
        let _ = disruption_risk("Cape of Good Hope", date);
        assert_eq!(disruption_risk("Panama Canal", date), isolated);
    }

    proptest! {
        #[test]
        fn risk_in_range_with_one_decimal(name in ".{0,40}", offset in 0u64..3_650) {
            let date = day(2020, 1, 1) + chrono::Days::new(offset);
            let r = disruption_risk(&name, date);
            prop_assert!((MIN_RISK..=MAX_RISK).contains(&r));
            prop_assert_eq!(round1(r), r);
        }

        #[test]
        fn risk_is_deterministic(name in "[A-Za-z -]{1,30}", offset in 0u64..3_650) {
            let date = day(2020, 1, 1) + chrono::Days::new(offset);
            prop_assert_eq!(disruption_risk(&name, date), disruption_risk(&name, date));
        }
    }
}
