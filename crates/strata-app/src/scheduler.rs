//! Fixed-period action scheduling driven by an accumulator.
//!
//! The owner feeds elapsed time in with [`PeriodicAction::advance`]; the action
//! reports how many whole periods have passed. The first firing happens one
//! full period after creation and the period never changes.

use std::time::Duration;

use tracing::warn;

/// Most firings reported by a single [`PeriodicAction::advance`] call.
///
/// A long stall would otherwise make the caller run a burst of back-to-back
/// ticks; the excess is dropped instead.
pub const MAX_CATCH_UP: u32 = 8;

/// A named action that fires every `period`.
#[derive(Clone, Debug)]
pub struct PeriodicAction {
    id: String,
    period: Duration,
    accumulator: Duration,
    fired: u64,
}

impl PeriodicAction {
    pub fn new(id: impl Into<String>, period: Duration) -> Self {
        Self {
            id: id.into(),
            period,
            accumulator: Duration::ZERO,
            fired: 0,
        }
    }

    /// Adds `dt` of elapsed time and returns how many times the action fires.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.period.is_zero() {
            warn!(id = %self.id, "periodic action has a zero period, never firing");
            return 0;
        }

        self.accumulator += dt;
        let mut firings = 0;
        while self.accumulator >= self.period {
            if firings == MAX_CATCH_UP {
                warn!(
                    id = %self.id,
                    dropped_ms = self.accumulator.as_millis() as u64,
                    "scheduler fell behind, dropping owed firings"
                );
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= self.period;
            firings += 1;
        }

        self.fired += u64::from(firings);
        firings
    }

    /// Time left until the next firing.
    pub fn remaining(&self) -> Duration {
        self.period.saturating_sub(self.accumulator)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Total number of firings so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(6000);

    #[test]
    fn test_first_firing_after_one_period() {
        let mut action = PeriodicAction::new("biomeChange", PERIOD);
        assert_eq!(action.advance(Duration::from_millis(5999)), 0);
        assert_eq!(action.remaining(), Duration::from_millis(1));
        assert_eq!(action.advance(Duration::from_millis(1)), 1);
        assert_eq!(action.fired(), 1);
    }

    #[test]
    fn test_fixed_cadence_carries_remainder() {
        let mut action = PeriodicAction::new("biomeChange", PERIOD);
        let mut total = 0;
        for _ in 0..10 {
            total += action.advance(Duration::from_millis(4000));
        }
        // 40 s of elapsed time at a 6 s period.
        assert_eq!(total, 6);
        assert_eq!(action.remaining(), Duration::from_millis(2000));
    }

    #[test]
    fn test_multiple_periods_in_one_step() {
        let mut action = PeriodicAction::new("biomeChange", PERIOD);
        assert_eq!(action.advance(PERIOD * 3), 3);
        assert_eq!(action.remaining(), PERIOD);
    }

    #[test]
    fn test_catch_up_is_clamped() {
        let mut action = PeriodicAction::new("biomeChange", PERIOD);
        assert_eq!(action.advance(PERIOD * 50), MAX_CATCH_UP);
        assert_eq!(action.remaining(), PERIOD);
        assert_eq!(action.fired(), u64::from(MAX_CATCH_UP));
    }

    #[test]
    fn test_zero_period_never_fires() {
        let mut action = PeriodicAction::new("broken", Duration::ZERO);
        assert_eq!(action.advance(Duration::from_secs(10)), 0);
        assert_eq!(action.id(), "broken");
    }
}
