//! Interrupt-driven driver for the HC-SR04 ultrasonic ranging module

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
};

use crate::{
    config::{Config, WaitConfig},
    error::{StartError, WaitError},
    rangefinder::Rangefinder,
    time::{Clock, ElapsedTime},
    wait,
};

/// HC-SR04 driver instance
///
/// Owns the trigger and echo lines and drives the caller side of a
/// measurement. The echo line must also be wired to a rising-edge interrupt
/// that calls [`Rangefinder::on_rising_edge`] on the same rangefinder.
#[derive(Debug)]
pub struct HcSr04<'a, TRIG, ECHO, DELAY, CLK> {
    trigger: TRIG,
    echo: ECHO,
    delay: DELAY,
    rangefinder: &'a Rangefinder<CLK>,
    config: Config,
}

impl<'a, TRIG, ECHO, DELAY, CLK, E> HcSr04<'a, TRIG, ECHO, DELAY, CLK>
where
    TRIG: OutputPin + ErrorType<Error = E>,
    ECHO: InputPin + ErrorType<Error = E>,
    DELAY: DelayNs,
    CLK: Clock,
{
    /// Create a new driver and drive the trigger line low
    ///
    /// # Errors
    ///
    /// Returns the pin error if the trigger line cannot be driven.
    pub fn new(
        mut trigger: TRIG,
        echo: ECHO,
        delay: DELAY,
        rangefinder: &'a Rangefinder<CLK>,
        config: Config,
    ) -> Result<Self, E> {
        trigger.set_low()?;

        Ok(Self {
            trigger,
            echo,
            delay,
            rangefinder,
            config,
        })
    }

    /// Release the lines and the delay, consuming the driver
    pub fn release(self) -> (TRIG, ECHO, DELAY) {
        (self.trigger, self.echo, self.delay)
    }

    /// The shared rangefinder this driver reports into
    pub fn rangefinder(&self) -> &'a Rangefinder<CLK> {
        self.rangefinder
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a measurement
    ///
    /// Sends the trigger pulse, waits (bounded by the poll budget) for the
    /// echo line to read low, records the start time and returns. The
    /// result arrives later through the edge interrupt and is collected with
    /// [`Rangefinder::read_result`].
    ///
    /// # Errors
    ///
    /// - [`StartError::AlreadyInProgress`] if a measurement is in flight; no
    ///   line is touched
    /// - [`StartError::TriggerTimeout`] if the echo line stayed high for the
    ///   whole poll budget; the record is left in
    ///   [`State::TimedOut`](crate::State::TimedOut)
    /// - [`StartError::Pin`] if a line operation failed; the record returns
    ///   to [`State::Idle`](crate::State::Idle)
    pub fn start_measurement(&mut self) -> Result<(), StartError<E>> {
        if self.rangefinder.begin().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Measurement already in progress");
            return Err(StartError::AlreadyInProgress);
        }

        match self.pulse_and_settle() {
            Ok(Some(iterations)) => {
                self.rangefinder.arm(iterations);

                #[cfg(feature = "defmt")]
                defmt::trace!("Measurement armed after {} echo reads", iterations);

                Ok(())
            }
            Ok(None) => {
                self.rangefinder.time_out();

                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Echo line still high after {} reads",
                    self.config.effective_poll_budget()
                );

                Err(StartError::TriggerTimeout)
            }
            Err(err) => {
                self.rangefinder.abort();

                #[cfg(feature = "defmt")]
                defmt::warn!("Pin error while triggering");

                Err(StartError::Pin(err))
            }
        }
    }

    /// Send the trigger pulse and poll for the echo line to read low
    ///
    /// Returns the number of reads it took, or `None` if the budget ran out.
    fn pulse_and_settle(&mut self) -> Result<Option<u32>, E> {
        self.trigger.set_low()?;
        self.delay.delay_us(self.config.settle_us);
        self.trigger.set_high()?;
        self.trigger.set_low()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Trigger pulse sent");

        let budget = self.config.effective_poll_budget();
        for iteration in 1..=budget {
            if self.echo.is_low()? {
                return Ok(Some(iteration));
            }
        }

        Ok(None)
    }

    /// Start a measurement and wait for its result
    ///
    /// Polls [`Rangefinder::read_result`] every
    /// [`WaitConfig::poll_interval_us`]. If no edge arrives within
    /// [`WaitConfig::timeout_us`] the measurement is expired so the next
    /// start is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`WaitError::Start`] if the measurement cannot be started,
    /// [`WaitError::EchoTimeout`] if no echo arrived in time, or
    /// [`WaitError::Read`] if the edge handler faulted the measurement.
    pub async fn measure<D>(
        &mut self,
        delay: &mut D,
        wait_config: WaitConfig,
    ) -> Result<ElapsedTime, WaitError<E>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.start_measurement()?;
        let elapsed = wait::wait_for_result(self.rangefinder, delay, wait_config).await?;
        Ok(elapsed)
    }
}
