//! Simulated capability providers feeding the display panels.
//!
//! The panels render whatever the providers report; the only failure
//! surface is a simulated denial or missing capability, whose message is
//! passed to the display layer unmodified.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("User denied the request for location access")]
    PermissionDenied,
    #[error("{0} is not supported on this host")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
    pub timestamp: DateTime<Utc>,
}

/// Random-walk position source standing in for a real receiver.
#[derive(Debug)]
pub struct GeoSimulator {
    rng: StdRng,
    latitude: f64,
    longitude: f64,
    denied: bool,
}

impl GeoSimulator {
    // Starting fix: Greenwich observatory.
    const BASE_LATITUDE: f64 = 51.4769;
    const BASE_LONGITUDE: f64 = -0.0005;
    const STEP_DEG: f64 = 0.0008;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded(seed),
            latitude: Self::BASE_LATITUDE,
            longitude: Self::BASE_LONGITUDE,
            denied: false,
        }
    }

    pub fn denied(&self) -> bool {
        self.denied
    }

    /// Flip the simulated permission switch, mirroring a user revoking or
    /// granting location access.
    pub fn toggle_denied(&mut self) {
        self.denied = !self.denied;
    }

    pub fn sample(&mut self) -> Result<GeoFix, CapabilityError> {
        if self.denied {
            return Err(CapabilityError::PermissionDenied);
        }
        self.latitude += self.rng.gen_range(-Self::STEP_DEG..=Self::STEP_DEG);
        self.longitude += self.rng.gen_range(-Self::STEP_DEG..=Self::STEP_DEG);
        Ok(GeoFix {
            latitude: self.latitude,
            longitude: self.longitude,
            accuracy_m: self.rng.gen_range(4.0..=60.0),
            timestamp: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EffectiveType {
    Slow2g,
    TwoG,
    ThreeG,
    FourG,
}

impl EffectiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveType::Slow2g => "slow-2g",
            EffectiveType::TwoG => "2g",
            EffectiveType::ThreeG => "3g",
            EffectiveType::FourG => "4g",
        }
    }

    fn tier(&self) -> usize {
        match self {
            EffectiveType::Slow2g => 0,
            EffectiveType::TwoG => 1,
            EffectiveType::ThreeG => 2,
            EffectiveType::FourG => 3,
        }
    }

    fn from_tier(tier: usize) -> Self {
        match tier {
            0 => EffectiveType::Slow2g,
            1 => EffectiveType::TwoG,
            2 => EffectiveType::ThreeG,
            _ => EffectiveType::FourG,
        }
    }
}

impl std::fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display adaptation derived from the effective connection type.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ContentMode {
    TextOnly,
    LowQuality,
    HighQuality,
}

impl ContentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentMode::TextOnly => "text-only",
            ContentMode::LowQuality => "low-quality",
            ContentMode::HighQuality => "high-quality",
        }
    }
}

impl From<EffectiveType> for ContentMode {
    fn from(effective: EffectiveType) -> Self {
        match effective {
            EffectiveType::Slow2g | EffectiveType::TwoG => ContentMode::TextOnly,
            EffectiveType::ThreeG => ContentMode::LowQuality,
            EffectiveType::FourG => ContentMode::HighQuality,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LinkReading {
    pub effective_type: EffectiveType,
    pub downlink_mbps: f64,
    pub rtt_ms: u32,
    pub save_data: bool,
    pub timestamp: DateTime<Utc>,
}

/// Connection-quality source that drifts between tiers over time.
#[derive(Debug)]
pub struct LinkSimulator {
    rng: StdRng,
    effective: EffectiveType,
    save_data: bool,
}

impl LinkSimulator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded(seed),
            effective: EffectiveType::FourG,
            save_data: false,
        }
    }

    /// Force a tier change, as if the host switched networks.
    pub fn shift(&mut self) -> LinkReading {
        let current = self.effective.tier();
        let next = loop {
            let candidate = self.rng.gen_range(0..4);
            if candidate != current {
                break candidate;
            }
        };
        self.effective = EffectiveType::from_tier(next);
        self.reading()
    }

    /// Current reading; occasionally drifts one tier up or down.
    pub fn sample(&mut self) -> LinkReading {
        if self.rng.gen_ratio(1, 5) {
            let tier = self.effective.tier();
            let next = if self.rng.gen_bool(0.5) {
                tier.saturating_sub(1)
            } else {
                (tier + 1).min(3)
            };
            self.effective = EffectiveType::from_tier(next);
        }
        self.reading()
    }

    fn reading(&mut self) -> LinkReading {
        let (downlink, rtt) = match self.effective {
            EffectiveType::Slow2g => (self.rng.gen_range(0.01..=0.05), self.rng.gen_range(1800..=2600)),
            EffectiveType::TwoG => (self.rng.gen_range(0.05..=0.25), self.rng.gen_range(900..=1700)),
            EffectiveType::ThreeG => (self.rng.gen_range(0.4..=3.0), self.rng.gen_range(200..=600)),
            EffectiveType::FourG => (self.rng.gen_range(4.0..=40.0), self.rng.gen_range(20..=120)),
        };
        if self.rng.gen_ratio(1, 10) {
            self.save_data = !self.save_data;
        }
        LinkReading {
            effective_type: self.effective,
            downlink_mbps: downlink,
            rtt_ms: rtt,
            save_data: self.save_data,
            timestamp: Utc::now(),
        }
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn denied_receiver_surfaces_the_verbatim_message() {
        let mut geo = GeoSimulator::new(Some(1));
        geo.toggle_denied();
        let err = geo.sample().unwrap_err();
        assert_eq!(
            err.to_string(),
            "User denied the request for location access"
        );

        geo.toggle_denied();
        assert!(geo.sample().is_ok());
    }

    #[test]
    fn fixes_drift_within_step_bounds() {
        let mut geo = GeoSimulator::new(Some(2));
        let first = geo.sample().unwrap();
        let second = geo.sample().unwrap();
        assert!((second.latitude - first.latitude).abs() <= GeoSimulator::STEP_DEG);
        assert!((second.longitude - first.longitude).abs() <= GeoSimulator::STEP_DEG);
        assert!(second.accuracy_m >= 4.0 && second.accuracy_m <= 60.0);
    }

    #[rstest]
    #[case(EffectiveType::Slow2g, ContentMode::TextOnly)]
    #[case(EffectiveType::TwoG, ContentMode::TextOnly)]
    #[case(EffectiveType::ThreeG, ContentMode::LowQuality)]
    #[case(EffectiveType::FourG, ContentMode::HighQuality)]
    fn content_mode_follows_effective_type(
        #[case] effective: EffectiveType,
        #[case] mode: ContentMode,
    ) {
        assert_eq!(ContentMode::from(effective), mode);
    }

    #[test]
    fn shift_always_changes_the_tier() {
        let mut link = LinkSimulator::new(Some(3));
        let mut previous = link.sample().effective_type;
        for _ in 0..10 {
            let reading = link.shift();
            assert_ne!(reading.effective_type, previous);
            previous = reading.effective_type;
        }
    }

    #[test]
    fn readings_match_their_tier_envelope() {
        let mut link = LinkSimulator::new(Some(4));
        for _ in 0..32 {
            let reading = link.sample();
            match reading.effective_type {
                EffectiveType::FourG => assert!(reading.downlink_mbps >= 4.0),
                EffectiveType::ThreeG => assert!(reading.downlink_mbps >= 0.4),
                _ => assert!(reading.downlink_mbps < 0.4),
            }
        }
    }
}
