//! The single measurement record and its transitions
//!
//! Nothing here touches hardware or synchronisation; [`crate::Rangefinder`]
//! runs every method inside a critical section.

use crate::{
    diagnostics::Diagnostics,
    error::{Fault, ReadError},
    time::{ElapsedTime, Instant},
};

/// Lifecycle state of the measurement record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No measurement pending and no unread result
    Idle,
    /// Trigger pulse is being sent and the echo line polled
    Triggering,
    /// Start time recorded, waiting for the rising edge
    Armed,
    /// A result is waiting to be read
    Complete,
    /// The echo line never settled, or no edge arrived before expiry
    TimedOut,
    /// The edge handler rejected the elapsed time
    Faulted,
}

impl State {
    /// `true` while a measurement is in flight
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Triggering | Self::Armed)
    }
}

/// What the edge handler did with a rising edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// The edge completed the armed measurement
    Captured(ElapsedTime),
    /// The edge ended the armed measurement with a fault
    Faulted(Fault),
    /// No measurement was armed; the record was left untouched
    Ignored(State),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MeasurementRecord {
    state: State,
    start_time: Instant,
    elapsed: Option<ElapsedTime>,
    fault: Option<Fault>,
    diagnostics: Diagnostics,
}

impl MeasurementRecord {
    pub(crate) const fn new() -> Self {
        Self {
            state: State::Idle,
            start_time: Instant::from_nanos(0),
            elapsed: None,
            fault: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub(crate) const fn state(&self) -> State {
        self.state
    }

    pub(crate) const fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// Claim the record for a new measurement
    ///
    /// Leaves the record untouched when a measurement is already in flight.
    pub(crate) fn begin(&mut self) -> Result<(), State> {
        if self.state.is_busy() {
            return Err(self.state);
        }

        self.state = State::Triggering;
        self.elapsed = None;
        self.fault = None;
        self.diagnostics.starts = self.diagnostics.starts.wrapping_add(1);
        Ok(())
    }

    pub(crate) fn arm(&mut self, now: Instant, poll_iterations: u32) {
        debug_assert_eq!(self.state, State::Triggering);
        self.start_time = now;
        self.state = State::Armed;
        self.diagnostics.last_poll_iterations = poll_iterations;
    }

    pub(crate) fn time_out(&mut self) {
        debug_assert_eq!(self.state, State::Triggering);
        self.state = State::TimedOut;
        self.diagnostics.trigger_timeouts = self.diagnostics.trigger_timeouts.wrapping_add(1);
    }

    /// Give the record back after a GPIO failure during triggering
    pub(crate) fn abort(&mut self) {
        debug_assert_eq!(self.state, State::Triggering);
        self.state = State::Idle;
    }

    /// Apply a rising edge observed at `now`
    pub(crate) fn capture(&mut self, now: Instant, limit: Option<ElapsedTime>) -> EdgeOutcome {
        if self.state != State::Armed {
            self.diagnostics.spurious_edges = self.diagnostics.spurious_edges.wrapping_add(1);
            return EdgeOutcome::Ignored(self.state);
        }

        let fault = match now.checked_duration_since(self.start_time) {
            None => Fault::ClockWentBackwards,
            Some(elapsed) if limit.is_some_and(|max| elapsed > max) => Fault::Implausible,
            Some(elapsed) => {
                self.elapsed = Some(elapsed);
                self.state = State::Complete;
                self.diagnostics.completed = self.diagnostics.completed.wrapping_add(1);
                return EdgeOutcome::Captured(elapsed);
            }
        };

        self.fault = Some(fault);
        self.state = State::Faulted;
        self.diagnostics.faults = self.diagnostics.faults.wrapping_add(1);
        EdgeOutcome::Faulted(fault)
    }

    /// Abandon an armed measurement whose edge never arrived
    pub(crate) fn expire(&mut self) -> bool {
        if self.state != State::Armed {
            return false;
        }

        self.state = State::TimedOut;
        self.diagnostics.expiries = self.diagnostics.expiries.wrapping_add(1);
        true
    }

    /// Consume the result
    ///
    /// A completed result or a fault is reported once; the record then
    /// returns to idle.
    pub(crate) fn take(&mut self) -> Result<ElapsedTime, ReadError> {
        match self.state {
            State::Triggering | State::Armed => Err(ReadError::InProgress),
            State::Idle | State::TimedOut => Err(ReadError::NoData),
            State::Complete => {
                self.state = State::Idle;
                self.elapsed.take().ok_or(ReadError::NoData)
            }
            State::Faulted => {
                self.state = State::Idle;
                Err(self
                    .fault
                    .take()
                    .map_or(ReadError::NoData, ReadError::Faulted))
            }
        }
    }
}
