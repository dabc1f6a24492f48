/// Speed of sound in dry air at 20 °C, in millimetres per second
pub const SPEED_OF_SOUND_MM_PER_S: u64 = 343_000;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Convert a round-trip echo time in nanoseconds to a one-way distance in
/// millimetres, rounded down
///
/// Uses 128-bit intermediates so the full `u64` range cannot overflow.
#[must_use]
pub const fn round_trip_ns_to_mm(nanos: u64) -> u64 {
    let mm = (nanos as u128 * SPEED_OF_SOUND_MM_PER_S as u128) / (2 * NANOS_PER_SEC as u128);
    #[allow(clippy::cast_possible_truncation)]
    {
        mm as u64
    }
}

/// Truncate a nanosecond count to 32 bits the way the legacy read interface
/// does
#[must_use]
pub const fn truncate_to_u32(nanos: u64) -> u32 {
    #[allow(clippy::cast_possible_truncation)]
    {
        nanos as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_metre_round_trip() {
        // 2 m of travel at 343 m/s
        let nanos = 2 * NANOS_PER_SEC * 1_000 / SPEED_OF_SOUND_MM_PER_S;
        assert_eq!(round_trip_ns_to_mm(nanos), 999);
        assert_eq!(round_trip_ns_to_mm(nanos + 10), 1_000);
    }

    #[test]
    fn zero_time_is_zero_distance() {
        assert_eq!(round_trip_ns_to_mm(0), 0);
    }

    #[test]
    fn max_time_does_not_overflow() {
        assert!(round_trip_ns_to_mm(u64::MAX) > 0);
    }

    #[test]
    fn truncation_keeps_low_bits() {
        assert_eq!(truncate_to_u32(58_000), 58_000);
        assert_eq!(truncate_to_u32(0x1_0000_0005), 5);
    }
}
