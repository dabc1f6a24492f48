/// Error returned when a measurement cannot be started
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartError<E> {
    /// A measurement is already being triggered or waiting for its echo
    AlreadyInProgress,
    /// The echo line stayed high for the whole poll budget
    ///
    /// The sensor is not responding or the echo line is stuck. Retry after
    /// a backoff.
    TriggerTimeout,
    /// Driving the trigger line or reading the echo line failed
    Pin(E),
}

/// Error returned when reading the last measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    /// A measurement is being triggered or waiting for its echo
    InProgress,
    /// No completed measurement is waiting to be read
    NoData,
    /// The last measurement was rejected by the edge handler
    Faulted(Fault),
}

/// Reason the edge handler rejected a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The edge was timestamped before the measurement was armed
    ClockWentBackwards,
    /// The elapsed time exceeds the configured echo limit
    Implausible,
}

/// Error returned by the asynchronous measurement helpers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitError<E> {
    /// The measurement could not be started
    Start(StartError<E>),
    /// Reading the result failed
    Read(ReadError),
    /// No echo arrived before the wait timeout; the measurement was expired
    EchoTimeout,
}

/// Error returned by [`crate::wait::wait_for_result`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoWaitError {
    /// Reading the result failed
    Read(ReadError),
    /// No echo arrived before the wait timeout; the measurement was expired
    EchoTimeout,
}

impl From<ReadError> for EchoWaitError {
    fn from(err: ReadError) -> Self {
        Self::Read(err)
    }
}

impl<E> From<EchoWaitError> for WaitError<E> {
    fn from(err: EchoWaitError) -> Self {
        match err {
            EchoWaitError::Read(err) => Self::Read(err),
            EchoWaitError::EchoTimeout => Self::EchoTimeout,
        }
    }
}

impl<E> From<StartError<E>> for WaitError<E> {
    fn from(err: StartError<E>) -> Self {
        Self::Start(err)
    }
}

impl<E> From<ReadError> for WaitError<E> {
    fn from(err: ReadError) -> Self {
        Self::Read(err)
    }
}

/// Error returned by the legacy byte interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LegacyError {
    /// The read buffer is not exactly four bytes long
    BadLength,
    /// Reading the result failed
    Read(ReadError),
}

impl From<ReadError> for LegacyError {
    fn from(err: ReadError) -> Self {
        Self::Read(err)
    }
}
