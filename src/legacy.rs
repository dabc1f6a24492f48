//! Byte-oriented read/write interface
//!
//! Some hosts expose the sensor as a file: any write starts a measurement
//! and a four-byte read returns the echo time in nanoseconds as a native
//! endian `u32`. These helpers map that shape onto the typed API.

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
};

use crate::{
    driver::HcSr04,
    error::{LegacyError, StartError},
    rangefinder::Rangefinder,
    time::Clock,
    utils,
};

/// Size of a result frame
pub const FRAME_LEN: usize = 4;

/// Handle a write: start a measurement
///
/// The written bytes are ignored and a zero-length write is valid. Returns
/// the number of bytes consumed.
///
/// # Errors
///
/// Passes through the [`StartError`] of [`HcSr04::start_measurement`].
pub fn write_frame<TRIG, ECHO, DELAY, CLK, E>(
    driver: &mut HcSr04<'_, TRIG, ECHO, DELAY, CLK>,
    buf: &[u8],
) -> Result<usize, StartError<E>>
where
    TRIG: OutputPin + ErrorType<Error = E>,
    ECHO: InputPin + ErrorType<Error = E>,
    DELAY: DelayNs,
    CLK: Clock,
{
    driver.start_measurement()?;
    Ok(buf.len())
}

/// Handle a read: fill `buf` with the last result
///
/// Echo times above `u32::MAX` nanoseconds are truncated to their low 32
/// bits. Returns [`FRAME_LEN`].
///
/// # Errors
///
/// - [`LegacyError::BadLength`] if `buf` is not exactly [`FRAME_LEN`] bytes;
///   the pending result is not consumed
/// - [`LegacyError::Read`] if there is no result to hand out
pub fn read_frame<CLK>(rangefinder: &Rangefinder<CLK>, buf: &mut [u8]) -> Result<usize, LegacyError>
where
    CLK: Clock,
{
    let frame: &mut [u8; FRAME_LEN] = buf.try_into().map_err(|_| LegacyError::BadLength)?;

    let elapsed = rangefinder.read_result()?;
    *frame = utils::truncate_to_u32(elapsed.as_nanos()).to_ne_bytes();

    Ok(FRAME_LEN)
}
