//! Ranging example for STM32 with Embassy
//!
//! The echo line's EXTI channel feeds rising edges into a `static`
//! rangefinder while the main task triggers a measurement every 100 ms.
//!
//! Hardware setup:
//! - HC-SR04 TRIG on PA0
//! - HC-SR04 ECHO (through a 5 V to 3.3 V divider) on both PA1, polled by
//!   the driver, and PA2, which raises the EXTI interrupt

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::{
    exti::ExtiInput,
    gpio::{Input, Level, Output, Pull, Speed},
};
use embassy_time::{Delay, Timer};
use hcsr04_irq::{Clock, Config, ElapsedTime, HcSr04, Instant, Rangefinder, WaitConfig};
use {defmt_rtt as _, panic_probe as _};

/// Embassy's time driver, scaled to nanoseconds
struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::from_nanos(embassy_time::Instant::now().as_micros() * 1_000)
    }
}

static RANGEFINDER: Rangefinder<EmbassyClock> =
    Rangefinder::with_echo_limit(EmbassyClock, ElapsedTime::from_nanos(40_000_000));

#[embassy_executor::task]
async fn echo_edges(mut echo: ExtiInput<'static>) {
    loop {
        echo.wait_for_rising_edge().await;
        RANGEFINDER.on_rising_edge();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    let trigger = Output::new(p.PA0, Level::Low, Speed::Low);
    let echo = Input::new(p.PA1, Pull::None);
    let echo_irq = ExtiInput::new(p.PA2, p.EXTI2, Pull::None);

    unwrap!(spawner.spawn(echo_edges(echo_irq)));

    let mut sensor = unwrap!(HcSr04::new(trigger, echo, Delay, &RANGEFINDER, Config::default()));

    info!("HC-SR04 driver initialized");

    loop {
        match sensor.measure(&mut Delay, WaitConfig::default()).await {
            Ok(elapsed) => info!("Distance: {} mm", elapsed.distance_mm()),
            Err(e) => {
                error!("Measurement error: {:?}", e);

                let diag = RANGEFINDER.diagnostics();
                warn!(
                    "timeouts={} expiries={} faults={} spurious={}",
                    diag.trigger_timeouts, diag.expiries, diag.faults, diag.spurious_edges
                );
            }
        }

        Timer::after_millis(100).await;
    }
}
