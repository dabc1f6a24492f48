//! Caller-side timeout for armed measurements
//!
//! The rangefinder itself never gives up on an armed measurement. This
//! module layers a bounded wait on top of it using an async delay.

use embedded_hal_async::delay::DelayNs;

use crate::{
    config::WaitConfig,
    error::{EchoWaitError, ReadError},
    rangefinder::Rangefinder,
    time::{Clock, ElapsedTime},
};

/// Wait for the in-flight measurement to finish
///
/// Checks [`Rangefinder::read_result`] immediately and then after every
/// poll interval. When the timeout runs out the measurement is expired with
/// [`Rangefinder::expire`]. If the edge races the expiry and wins, its
/// result is returned instead.
///
/// # Errors
///
/// - [`EchoWaitError::EchoTimeout`] if no echo arrived in time
/// - [`EchoWaitError::Read`] for [`ReadError::Faulted`], or
///   [`ReadError::NoData`] if nothing was in flight
pub async fn wait_for_result<CLK, D>(
    rangefinder: &Rangefinder<CLK>,
    delay: &mut D,
    config: WaitConfig,
) -> Result<ElapsedTime, EchoWaitError>
where
    CLK: Clock,
    D: DelayNs,
{
    for _ in 0..config.max_polls() {
        match rangefinder.read_result() {
            Err(ReadError::InProgress) => delay.delay_us(config.poll_interval_us).await,
            result => return result.map_err(EchoWaitError::Read),
        }
    }

    match rangefinder.read_result() {
        Err(ReadError::InProgress) => {}
        result => return result.map_err(EchoWaitError::Read),
    }

    // The edge may still land between the last read and here, in which case
    // expire() finds the record complete and leaves it alone.
    if rangefinder.expire() {
        Err(EchoWaitError::EchoTimeout)
    } else {
        rangefinder.read_result().map_err(EchoWaitError::Read)
    }
}
