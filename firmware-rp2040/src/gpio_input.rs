//! GPIO-based pin-change event source.
//!
//! Waits for an edge on either encoder line, then samples both lines and
//! reports them as one [`PinState`]. Works with any pin implementing the
//! `embedded-hal` input traits; on RP2040 that is [`embassy_rp::gpio::Input`].
//!
//! # Pins
//!
//! Both lines should idle low (pull-downs), so the rest position reads `00`.

use embassy_futures::select::{select, Either};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;
use quadrature_encoder::{PinEventSource, PinState, SourceError};

/// Convert pin errors to [`SourceError`].
///
/// This is a helper function instead of a `From` impl to avoid orphan rule issues
/// (both the pin error and `SourceError` are defined in external crates).
#[inline]
fn pin_error_to_source_error<E: embedded_hal::digital::Error>(e: E) -> SourceError {
    defmt::warn!("GPIO error: {:?}", defmt::Debug2Format(&e.kind()));
    SourceError::Io
}

/// Encoder event source backed by two GPIO inputs.
pub struct GpioPinSource<A, B> {
    /// Line A ("left" pin).
    pin_a: A,
    /// Line B ("right" pin).
    pin_b: B,
}

impl<A, B> GpioPinSource<A, B>
where
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    /// Create a new source from the two encoder lines.
    #[must_use]
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self { pin_a, pin_b }
    }

    /// Read both lines without waiting for an edge.
    pub fn sample(&mut self) -> Result<PinState, SourceError> {
        let a = self.pin_a.is_high().map_err(pin_error_to_source_error)?;
        let b = self.pin_b.is_high().map_err(pin_error_to_source_error)?;
        Ok(PinState::from_levels(a, b))
    }
}

impl<A, B> PinEventSource for GpioPinSource<A, B>
where
    A: InputPin + Wait,
    B: InputPin + Wait,
{
    async fn wait_for_change(&mut self) -> Result<PinState, SourceError> {
        match select(self.pin_a.wait_for_any_edge(), self.pin_b.wait_for_any_edge()).await {
            Either::First(result) => result.map_err(pin_error_to_source_error)?,
            Either::Second(result) => result.map_err(pin_error_to_source_error)?,
        }

        self.sample()
    }
}
