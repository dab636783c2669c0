//! STM32 Blue Pill Long-Press Blink Controller
//! =============================================================================================
//!
//! This firmware polls a push button every 10 ms and drives the onboard LED:
//! - Hold the button for 0.5 s: the LED starts blinking fast (100 ms on / 100 ms off)
//! - Blinking stops on its own after 10 s
//! - Hold the button again for 0.5 s while blinking: blinking is cancelled
//! - A shorter press while blinking is ignored
//!
//! Hardware Connections:
//!   Button -> Blue Pill
//!      one leg    -> 3.3V
//!      other leg  -> PB1 (internal pull-down, reads high when pressed)
//!
//!   LED:
//!      Onboard LED at PC13 (active low, no external connection needed)
//!
//! Expected Behavior:
//!   - Every state change is logged via defmt RTT
//!   - The status task reports state and LED level on each change

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_time::{Duration, Ticker};
use {defmt_rtt as _, panic_probe as _};

use long_press_blink::config::BlinkConfig;
use long_press_blink::controller::TimedButtonBlinkController;
use long_press_blink::driver::BlinkDriver;
use long_press_blink::hardware::Polarity;
use long_press_blink::hardware::embassy_clock::EmbassyClock;
use long_press_blink::hardware::gpio_button::GpioButton;
use long_press_blink::hardware::gpio_led::GpioLed;
use long_press_blink::snapshot::SnapshotSignal;

const LONG_PRESS_TIME_MS: u32 = 500; // Minimum press time (0.5 seconds)
const BLINK_DURATION_MS: u32 = 10_000; // Total blinking duration (10 seconds)
const BLINK_HALF_PERIOD_MS: u32 = 100; // 100 ms on, 100 ms off
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type Driver = BlinkDriver<GpioButton<Input<'static>>, GpioLed<Output<'static>>, EmbassyClock>;

// Latest controller state, written by the poll task only
static STATUS: SnapshotSignal = SnapshotSignal::new();

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    info!("Starting long-press blink controller");

    // Button on PB1 with pull-down, LED on PC13 starts off (high)
    let button = GpioButton::new(Input::new(p.PB1, Pull::Down), Polarity::ActiveHigh);
    let led = GpioLed::new(Output::new(p.PC13, Level::High, Speed::Low), Polarity::ActiveLow);

    let config = BlinkConfig::new()
        .with_long_press_ms(LONG_PRESS_TIME_MS)
        .with_blink_duration_ms(BLINK_DURATION_MS)
        .with_blink_half_period_ms(BLINK_HALF_PERIOD_MS)
        .with_ms_per_tick(1);
    let controller = match TimedButtonBlinkController::new(config) {
        Ok(controller) => controller,
        Err(e) => {
            warn!("Invalid timing configuration ({}), using defaults", e);
            TimedButtonBlinkController::with_defaults()
        }
    };

    let driver = BlinkDriver::new(controller, button, led, EmbassyClock).with_snapshots(&STATUS);

    spawner
        .spawn(blink_task(driver))
        .expect("Failed to spawn blink task");

    // Status loop: report every published state change
    loop {
        let status = STATUS.wait().await;
        info!(
            "State: {} LED: {} (t={} ms)",
            status.state.name(),
            if status.output { "ON" } else { "OFF" },
            status.tick
        );
    }
}

/// Button Polling Task
///
/// Samples the button every 10 ms and steps the controller, which drives
/// the LED only when its level changes.
#[embassy_executor::task]
async fn blink_task(mut driver: Driver) {
    if driver.start().is_err() {
        error!("Failed to initialise LED");
    }

    let mut ticker = Ticker::every(POLL_INTERVAL);
    loop {
        if driver.poll_once().is_err() {
            error!("Button or LED access failed");
        }
        ticker.next().await;
    }
}
