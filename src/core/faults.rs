//! Data-quality fault injection
//!
//! Deliberate, probabilistic corruption of a finished event so that
//! downstream cleaning jobs have something to find: an impossible age,
//! or an admission time stamped with the current wall clock. At most
//! one field mutates per event.
//!
//! Randomness and time are injected through [`RandomSource`] and
//! [`Clock`] so tests can pin exact branch selection.

use crate::config::FaultConfig;
use crate::domain::EncounterEvent;
use chrono::{DateTime, Utc};
use rand::Rng;

/// Format for the injected admission timestamp: ISO-8601 UTC with a
/// trailing `Z` and zero sub-second precision
const INJECTED_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Source of uniform random draws in [0, 1)
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

/// Thread-local RNG backed random source
#[derive(Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Source of the current wall-clock instant
pub trait Clock: Send {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System wall clock
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Probabilistic fault injector
///
/// Draws one uniform value per event and applies at most one mutation:
/// the age sentinel in the first probability band, the wall-clock
/// admission time in the second, nothing otherwise.
pub struct FaultInjector {
    config: FaultConfig,
    random: Box<dyn RandomSource>,
    clock: Box<dyn Clock>,
}

impl FaultInjector {
    /// Creates an injector backed by the thread RNG and system clock
    pub fn new(config: FaultConfig) -> Self {
        Self::with_sources(config, Box::new(ThreadRandom), Box::new(SystemClock))
    }

    /// Creates an injector with explicit randomness and clock sources
    pub fn with_sources(
        config: FaultConfig,
        random: Box<dyn RandomSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config,
            random,
            clock,
        }
    }

    /// Applies at most one fault to the event
    ///
    /// Consumes one random draw per invocation (when enabled), even if
    /// no band matches.
    pub fn apply(&mut self, event: &mut EncounterEvent) {
        if !self.config.enabled {
            return;
        }

        let draw = self.random.next_unit();
        if draw < self.config.age_probability {
            event.age = Some(self.config.age_sentinel);
        } else if draw < self.config.age_probability + self.config.admission_probability {
            event.admission_time = self
                .clock
                .now_utc()
                .format(INJECTED_TIME_FORMAT)
                .to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::VecDeque;

    struct FixedRandom {
        draws: VecDeque<f64>,
    }

    impl FixedRandom {
        fn new(draws: &[f64]) -> Self {
            Self {
                draws: draws.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for FixedRandom {
        fn next_unit(&mut self) -> f64 {
            self.draws.pop_front().expect("ran out of fixed draws")
        }
    }

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn sample_event() -> EncounterEvent {
        EncounterEvent {
            encounter_id: "E1".to_string(),
            patient_id: "P1".to_string(),
            gender: Some("F".to_string()),
            age: Some(33),
            department: "wellness".to_string(),
            admission_time: "2020-02-16T00:00:00Z".to_string(),
            discharge_time: "2020-02-16T01:00:00Z".to_string(),
            organization_id: String::new(),
            provider_id: String::new(),
            payer_id: String::new(),
            base_encounter_cost: Some(100.0),
            total_claim_cost: None,
            payer_coverage: None,
        }
    }

    fn injector(draws: &[f64]) -> FaultInjector {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap());
        FaultInjector::with_sources(
            FaultConfig::default(),
            Box::new(FixedRandom::new(draws)),
            Box::new(clock),
        )
    }

    #[test]
    fn test_first_band_overwrites_age_only() {
        let mut event = sample_event();
        let original_admission = event.admission_time.clone();

        injector(&[0.049]).apply(&mut event);

        assert_eq!(event.age, Some(150));
        assert_eq!(event.admission_time, original_admission);
    }

    #[test]
    fn test_second_band_overwrites_admission_time_only() {
        let mut event = sample_event();

        injector(&[0.05]).apply(&mut event);

        assert_eq!(event.age, Some(33));
        assert_eq!(event.admission_time, "2026-08-28T12:00:00Z");
    }

    #[test]
    fn test_second_band_upper_edge() {
        let mut event = sample_event();
        injector(&[0.0999]).apply(&mut event);
        assert_eq!(event.admission_time, "2026-08-28T12:00:00Z");
    }

    #[test]
    fn test_above_bands_leaves_event_untouched() {
        let mut event = sample_event();
        let original = event.clone();

        injector(&[0.10]).apply(&mut event);

        assert_eq!(event, original);
    }

    #[test]
    fn test_disabled_injector_consumes_no_randomness() {
        let mut event = sample_event();
        let original = event.clone();

        let mut injector = FaultInjector::with_sources(
            FaultConfig {
                enabled: false,
                ..FaultConfig::default()
            },
            // Empty draw queue: any draw would panic
            Box::new(FixedRandom::new(&[])),
            Box::new(SystemClock),
        );
        injector.apply(&mut event);

        assert_eq!(event, original);
    }

    #[test]
    fn test_configured_sentinel_and_bands() {
        let mut event = sample_event();
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap());
        let mut injector = FaultInjector::with_sources(
            FaultConfig {
                enabled: true,
                age_probability: 0.2,
                admission_probability: 0.3,
                age_sentinel: 999,
            },
            Box::new(FixedRandom::new(&[0.19])),
            Box::new(clock),
        );

        injector.apply(&mut event);
        assert_eq!(event.age, Some(999));
    }
}
