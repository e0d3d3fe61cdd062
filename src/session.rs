//! EncoderSession: feeds pin-change events from a source into a decoder.

use crate::decoder::QuadratureDecoder;
use crate::input::{PinEventSource, SourceError};
use crate::observer::{ObserverError, ValueObserver};
use crate::types::Detent;

/// Owns an event source and the decoder it drives.
///
/// The session is the single writer: events are awaited and processed one
/// at a time, so the decoder never sees two concurrent calls. Run it from
/// exactly one task; other tasks learn about the value through the
/// observer.
///
/// # Error Handling
///
/// A source error leaves the decoder untouched. An observer error is
/// reported after the decoder has already advanced.
pub struct EncoderSession<S, O> {
    source: S,
    decoder: QuadratureDecoder<O>,
}

impl<S: PinEventSource, O: ValueObserver> EncoderSession<S, O> {
    /// Create a new session from an event source and a decoder.
    pub fn new(source: S, decoder: QuadratureDecoder<O>) -> Self {
        Self { source, decoder }
    }

    /// Run the session, decoding events until the source disconnects.
    ///
    /// Other errors are logged and decoding continues. Returns the
    /// [`SourceError::Disconnected`] error once the source has no more
    /// events, so a dead source cannot spin the executor.
    pub async fn run(&mut self) -> SessionError {
        loop {
            match self.process_one().await {
                Ok(_) => {}
                Err(e @ SessionError::Source(SourceError::Disconnected)) => return e,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    {
                        let pins = self.decoder.pins();
                        defmt::warn!(
                            "Encoder {}/{} session error: {:?}",
                            pins.left,
                            pins.right,
                            _e
                        );
                    }
                }
            }
        }
    }

    /// Wait for one pin-change event and feed it to the decoder.
    ///
    /// Returns the detent committed by this event, if any.
    pub async fn process_one(&mut self) -> Result<Option<Detent>, SessionError> {
        let state = self.source.wait_for_change().await?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Pin change: {:?}", state);

        let detent = self.decoder.on_pin_change(state)?;

        #[cfg(feature = "defmt")]
        if let Some(d) = detent {
            defmt::trace!("Detent {:?}: {} -> {}", d.direction, d.previous, d.value);
        }

        Ok(detent)
    }

    /// Get a reference to the decoder.
    pub fn decoder(&self) -> &QuadratureDecoder<O> {
        &self.decoder
    }

    /// Get a mutable reference to the decoder.
    pub fn decoder_mut(&mut self) -> &mut QuadratureDecoder<O> {
        &mut self.decoder
    }

    /// Get a reference to the event source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the event source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Decompose the session into its source and decoder.
    pub fn into_parts(self) -> (S, QuadratureDecoder<O>) {
        (self.source, self.decoder)
    }
}

/// Error type for session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// Error from the event source.
    Source(SourceError),
    /// Error from the value observer.
    Observer(ObserverError),
}

impl From<SourceError> for SessionError {
    fn from(e: SourceError) -> Self {
        SessionError::Source(e)
    }
}

impl From<ObserverError> for SessionError {
    fn from(e: ObserverError) -> Self {
        SessionError::Observer(e)
    }
}
