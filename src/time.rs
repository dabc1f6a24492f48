//! Monotonic timestamps and elapsed time

use crate::utils;

/// Source of monotonic timestamps
///
/// Implementations must be callable from interrupt context: no blocking and
/// no allocation. The returned values must come from a single monotonic
/// counter with nanosecond resolution (coarser hardware ticks scaled to
/// nanoseconds are fine).
pub trait Clock {
    /// Current time
    fn now(&self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A point on the monotonic clock, in nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Instant(u64);

impl Instant {
    /// Create an instant from a raw nanosecond count
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Raw nanosecond count
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`
    ///
    /// Returns `None` when `earlier` is later than `self`.
    #[must_use]
    pub const fn checked_duration_since(self, earlier: Instant) -> Option<ElapsedTime> {
        match self.0.checked_sub(earlier.0) {
            Some(nanos) => Some(ElapsedTime(nanos)),
            None => None,
        }
    }
}

/// Round-trip time of an ultrasonic pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ElapsedTime(u64);

impl ElapsedTime {
    /// Create from nanoseconds
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Elapsed nanoseconds
    #[must_use]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Elapsed microseconds, rounded down
    #[must_use]
    pub const fn as_micros(self) -> u64 {
        self.0 / 1_000
    }

    /// Distance to the target in millimetres
    ///
    /// Half the round trip at a fixed speed of sound, see
    /// [`crate::SPEED_OF_SOUND_MM_PER_S`].
    #[must_use]
    pub const fn distance_mm(self) -> u64 {
        utils::round_trip_ns_to_mm(self.0)
    }

    /// Distance to the target in whole centimetres
    #[must_use]
    pub const fn distance_cm(self) -> u64 {
        self.distance_mm() / 10
    }
}
