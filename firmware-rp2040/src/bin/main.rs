#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker};
use rotary_encoder_rp2040::{
    publishing_observer, ChangeChannel, DecoderConfig, EncoderSession, EncoderValue,
    GpioPinSource, PinAssignment, PublishingObserver, QuadratureDecoder,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

/// GPIO numbers of the encoder lines (must match the pins passed to `Input::new`).
const LEFT_PIN: u8 = 26;
const RIGHT_PIN: u8 = 19;

const MIN_VALUE: i32 = 0;
const MAX_VALUE: i32 = 100;
const START_VALUE: i32 = 0;

/// How often the main loop logs the current value.
const POLL_INTERVAL: Duration = Duration::from_secs(5);

type GpioSession =
    EncoderSession<GpioPinSource<Input<'static>, Input<'static>>, PublishingObserver<'static>>;

/// Latest value, published by the encoder task.
static VALUE: StaticCell<EncoderValue> = StaticCell::new();

/// Every value change, in order, for the change task.
static CHANGES: StaticCell<ChangeChannel> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Rotary encoder starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let value: &'static EncoderValue = VALUE.init(EncoderValue::new(START_VALUE));
    let changes: &'static ChangeChannel = CHANGES.init(Channel::new());

    // --- GPIO Setup ---
    let mut source = GpioPinSource::new(
        Input::new(p.PIN_26, Pull::Down), // Line A
        Input::new(p.PIN_19, Pull::Down), // Line B
    );

    // The decoder assumes it starts at rest
    match source.sample() {
        Ok(state) if !state.is_rest() => {
            warn!("Encoder not at rest on startup ({:?}), first detent may be lost", state)
        }
        Ok(_) => {}
        Err(e) => warn!("Could not sample encoder pins: {:?}", e),
    }

    // --- Decoder Setup ---
    let config = DecoderConfig::new(PinAssignment::new(LEFT_PIN, RIGHT_PIN))
        .with_bounds(MIN_VALUE, MAX_VALUE)
        .with_start_value(START_VALUE);

    let decoder = match QuadratureDecoder::new(config, publishing_observer(value, changes)) {
        Ok(decoder) => decoder,
        Err(e) => {
            error!("Invalid encoder configuration: {:?}", e);
            return;
        }
    };
    value.set(decoder.value());

    let session = EncoderSession::new(source, decoder);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(encoder_task(session).unwrap());
    spawner.spawn(change_task(changes).unwrap());

    info!(
        "Encoder on GPIO {}/{} initialized, value {}",
        LEFT_PIN,
        RIGHT_PIN,
        value.get()
    );

    let mut ticker = Ticker::every(POLL_INTERVAL);
    loop {
        ticker.next().await;
        info!("Value is {}", value.get());
    }
}

/// Encoder task - the only place pin events reach the decoder.
#[embassy_executor::task]
async fn encoder_task(mut session: GpioSession) {
    let e = session.run().await;
    error!("Encoder session stopped: {:?}", e);
}

/// Change task - logs every value change.
#[embassy_executor::task]
async fn change_task(changes: &'static ChangeChannel) {
    loop {
        let change = changes.receive().await;
        info!(
            "* New value: {}, Direction: {}",
            change.value,
            change.direction.as_char()
        );
    }
}
