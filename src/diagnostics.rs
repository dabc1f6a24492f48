//! Counters kept alongside the measurement record

/// Snapshot of the driver's event counters
///
/// All counters wrap on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Measurements accepted by `start_measurement`
    pub starts: u32,
    /// Measurements completed by a rising edge
    pub completed: u32,
    /// Starts that gave up waiting for the echo line to settle low
    pub trigger_timeouts: u32,
    /// Armed measurements abandoned because no edge arrived in time
    pub expiries: u32,
    /// Measurements rejected by the edge handler
    pub faults: u32,
    /// Rising edges delivered while no measurement was armed
    pub spurious_edges: u32,
    /// Echo reads needed before the last successful arm
    ///
    /// A value close to the poll budget means the budget is too tight for
    /// this board.
    pub last_poll_iterations: u32,
}

impl Diagnostics {
    /// All counters at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            starts: 0,
            completed: 0,
            trigger_timeouts: 0,
            expiries: 0,
            faults: 0,
            spurious_edges: 0,
            last_poll_iterations: 0,
        }
    }

    /// Measurements that ended without a usable result
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.trigger_timeouts
            .wrapping_add(self.expiries)
            .wrapping_add(self.faults)
    }

    /// `true` if no measurement has failed and no stray edge was seen
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failures() == 0 && self.spurious_edges == 0
    }
}
