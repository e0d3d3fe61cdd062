//! Pin-change event source trait and error types.

use crate::types::PinState;
use core::future::Future;

/// Error type for pin event sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// GPIO read or edge-wait failed.
    Io,
    /// The source has no more events to deliver.
    Disconnected,
}

/// Async trait for encoder pin-change event sources.
///
/// This trait abstracts where edge events come from (GPIO interrupts, a
/// port expander, a recorded trace in tests), so the decoder never touches
/// hardware itself.
///
/// Implementations sample both lines together after an edge on either of
/// them and report the pair as a single [`PinState`].
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait PinEventSource {
    /// Wait for the next edge on either line and return both current levels.
    fn wait_for_change(&mut self) -> impl Future<Output = Result<PinState, SourceError>>;
}
