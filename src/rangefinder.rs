//! Interrupt-safe handle shared by the caller and the edge interrupt

use core::{cell::Cell, fmt};

use critical_section::Mutex;

use crate::{
    diagnostics::Diagnostics,
    error::ReadError,
    record::{EdgeOutcome, MeasurementRecord, State},
    time::{Clock, ElapsedTime},
};

/// Owner of the measurement record
///
/// One `Rangefinder` exists per sensor, usually in a `static`. The caller
/// side ([`crate::HcSr04`]) borrows it to start measurements; the host's
/// rising-edge interrupt calls [`Rangefinder::on_rising_edge`]. Every access
/// to the record happens inside a short critical section, so the handle is
/// `Sync` whenever the clock is.
pub struct Rangefinder<CLK> {
    record: Mutex<Cell<MeasurementRecord>>,
    clock: CLK,
    echo_limit: Option<ElapsedTime>,
}

impl<CLK> fmt::Debug for Rangefinder<CLK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = critical_section::with(|cs| self.record.borrow(cs).get());
        f.debug_struct("Rangefinder")
            .field("record", &record)
            .field("echo_limit", &self.echo_limit)
            .finish_non_exhaustive()
    }
}

impl<CLK> Rangefinder<CLK>
where
    CLK: Clock,
{
    /// Create an idle rangefinder
    pub const fn new(clock: CLK) -> Self {
        Self {
            record: Mutex::new(Cell::new(MeasurementRecord::new())),
            clock,
            echo_limit: None,
        }
    }

    /// Create an idle rangefinder that faults any echo longer than `limit`
    ///
    /// The HC-SR04 holds echo for about 38 ms when nothing is in range, so a
    /// limit somewhat above that catches edges that cannot belong to the
    /// armed measurement.
    pub const fn with_echo_limit(clock: CLK, limit: ElapsedTime) -> Self {
        Self {
            record: Mutex::new(Cell::new(MeasurementRecord::new())),
            clock,
            echo_limit: Some(limit),
        }
    }

    /// Run `f` on the record inside a critical section
    fn with_record<R>(&self, f: impl FnOnce(&mut MeasurementRecord) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.record.borrow(cs);
            let mut record = cell.get();
            let result = f(&mut record);
            cell.set(record);
            result
        })
    }

    /// Edge capture handler
    ///
    /// Call this from the echo line's rising-edge interrupt. It never blocks,
    /// never fails, and is safe to call at any time: edges that arrive while
    /// no measurement is armed leave the record untouched apart from the
    /// spurious-edge counter.
    pub fn on_rising_edge(&self) -> EdgeOutcome {
        let outcome = self.with_record(|record| record.capture(self.clock.now(), self.echo_limit));

        #[cfg(feature = "defmt")]
        match outcome {
            EdgeOutcome::Captured(elapsed) => {
                defmt::debug!("Echo captured after {} ns", elapsed.as_nanos());
            }
            EdgeOutcome::Faulted(fault) => defmt::warn!("Echo rejected: {}", fault),
            EdgeOutcome::Ignored(state) => defmt::debug!("Unexpected echo edge in {}", state),
        }

        outcome
    }

    /// Take the last completed measurement
    ///
    /// A result is handed out once; the record then returns to
    /// [`State::Idle`]. Never blocks and never touches hardware.
    ///
    /// # Errors
    ///
    /// - [`ReadError::InProgress`] while a measurement is in flight
    /// - [`ReadError::Faulted`] once after the edge handler rejected a
    ///   measurement
    /// - [`ReadError::NoData`] otherwise
    pub fn read_result(&self) -> Result<ElapsedTime, ReadError> {
        self.with_record(MeasurementRecord::take)
    }

    /// Abandon an armed measurement
    ///
    /// Moves [`State::Armed`] to [`State::TimedOut`] and returns `true`; does
    /// nothing in any other state. Nothing inside the driver calls this on
    /// its own: the caller decides how long an echo may take.
    pub fn expire(&self) -> bool {
        let expired = self.with_record(MeasurementRecord::expire);

        #[cfg(feature = "defmt")]
        if expired {
            defmt::warn!("Armed measurement expired without an echo");
        }

        expired
    }

    /// Current state of the record
    pub fn state(&self) -> State {
        self.with_record(|record| record.state())
    }

    /// Snapshot of the event counters
    pub fn diagnostics(&self) -> Diagnostics {
        self.with_record(|record| record.diagnostics())
    }

    /// The clock used to timestamp edges
    pub fn clock(&self) -> &CLK {
        &self.clock
    }

    pub(crate) fn begin(&self) -> Result<(), State> {
        self.with_record(MeasurementRecord::begin)
    }

    pub(crate) fn arm(&self, poll_iterations: u32) {
        self.with_record(|record| record.arm(self.clock.now(), poll_iterations));
    }

    pub(crate) fn time_out(&self) {
        self.with_record(MeasurementRecord::time_out);
    }

    pub(crate) fn abort(&self) {
        self.with_record(MeasurementRecord::abort);
    }
}
