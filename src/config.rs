//! Tunables for triggering and waiting

/// Default upper bound on echo-line reads while waiting for it to settle low
pub const DEFAULT_POLL_BUDGET: u32 = 1_000_000;

/// Default hold time of the trigger line before the pulse, in microseconds
pub const DEFAULT_SETTLE_US: u32 = 10;

/// Trigger-side settings for [`crate::HcSr04`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Maximum number of echo-line reads before giving up with
    /// [`crate::StartError::TriggerTimeout`]
    ///
    /// This is an iteration count, not a duration: the wall-clock time it
    /// covers depends on the CPU and on how long a pin read takes. Zero is
    /// treated as one.
    pub poll_budget: u32,
    /// Microseconds the trigger line is held low before the pulse
    pub settle_us: u32,
}

impl Config {
    /// Default configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_budget: DEFAULT_POLL_BUDGET,
            settle_us: DEFAULT_SETTLE_US,
        }
    }

    /// Set the maximum number of echo-line reads
    #[must_use]
    pub const fn with_poll_budget(mut self, poll_budget: u32) -> Self {
        self.poll_budget = poll_budget;
        self
    }

    /// Set the trigger hold time in microseconds
    #[must_use]
    pub const fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    pub(crate) const fn effective_poll_budget(&self) -> u32 {
        if self.poll_budget == 0 {
            1
        } else {
            self.poll_budget
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side policy for waiting on an armed measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitConfig {
    /// Delay between result polls, in microseconds
    pub poll_interval_us: u32,
    /// Give up and expire the measurement after this many microseconds
    pub timeout_us: u32,
}

impl WaitConfig {
    /// 1 ms polls, 60 ms timeout (the sensor's recommended cycle)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            poll_interval_us: 1_000,
            timeout_us: 60_000,
        }
    }

    /// Set the delay between result polls in microseconds
    #[must_use]
    pub const fn with_poll_interval_us(mut self, poll_interval_us: u32) -> Self {
        self.poll_interval_us = poll_interval_us;
        self
    }

    /// Set how long to wait for the echo in microseconds
    #[must_use]
    pub const fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Number of polls that fit in the timeout, at least one
    pub(crate) const fn max_polls(&self) -> u32 {
        if self.poll_interval_us == 0 {
            return if self.timeout_us == 0 { 1 } else { self.timeout_us };
        }
        let polls = self.timeout_us.div_ceil(self.poll_interval_us);
        if polls == 0 { 1 } else { polls }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.poll_budget, 1_000_000);
        assert_eq!(config.settle_us, 10);
    }

    #[test]
    fn builders_set_fields() {
        let config = Config::new().with_poll_budget(500).with_settle_us(12);
        assert_eq!(config.poll_budget, 500);
        assert_eq!(config.settle_us, 12);

        let wait = WaitConfig::new()
            .with_poll_interval_us(250)
            .with_timeout_us(5_000);
        assert_eq!(wait.poll_interval_us, 250);
        assert_eq!(wait.timeout_us, 5_000);
    }

    #[test]
    fn zero_poll_budget_reads_once() {
        assert_eq!(Config::new().with_poll_budget(0).effective_poll_budget(), 1);
        assert_eq!(Config::new().with_poll_budget(7).effective_poll_budget(), 7);
    }

    #[test]
    fn wait_polls_cover_timeout() {
        assert_eq!(WaitConfig::new().max_polls(), 60);
        let config = WaitConfig::new()
            .with_poll_interval_us(400)
            .with_timeout_us(1_000);
        assert_eq!(config.max_polls(), 3);
        assert_eq!(WaitConfig::new().with_timeout_us(0).max_polls(), 1);
    }
}
