//! Interrupt-driven driver for the HC-SR04 ultrasonic ranging module
//!
//! A measurement is split across two contexts:
//!
//! - the caller runs [`HcSr04::start_measurement`], which pulses the
//!   trigger line, waits for the echo line to settle low and arms the
//!   measurement;
//! - the echo line's rising-edge interrupt runs
//!   [`Rangefinder::on_rising_edge`], which timestamps the edge and
//!   publishes the elapsed time.
//!
//! The result is then collected once with [`Rangefinder::read_result`].
//! Both sides share a [`Rangefinder`] that guards the measurement record
//! with a critical section.

#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod config;
mod diagnostics;
mod driver;
mod error;
pub mod legacy;
mod rangefinder;
mod record;
mod time;
mod utils;
pub mod wait;

pub use config::{Config, DEFAULT_POLL_BUDGET, DEFAULT_SETTLE_US, WaitConfig};
pub use diagnostics::Diagnostics;
pub use driver::HcSr04;
pub use error::{EchoWaitError, Fault, LegacyError, ReadError, StartError, WaitError};
pub use rangefinder::Rangefinder;
pub use record::{EdgeOutcome, State};
pub use time::{Clock, ElapsedTime, Instant};
pub use utils::SPEED_OF_SOUND_MM_PER_S;
