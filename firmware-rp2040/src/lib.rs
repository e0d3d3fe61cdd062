//! Quadrature rotary encoder demo firmware for RP2040.
//!
//! This crate provides the embedded side of the encoder: a GPIO event
//! source and an observer that publishes value changes to other tasks.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | Line A   | 26   | Encoder "left" output, pulled down |
//! | Line B   | 19   | Encoder "right" output, pulled down |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime:
//!
//! - **Encoder Task**: Owns the [`EncoderSession`], waits for edges on either
//!   line and feeds them to the decoder one at a time
//! - **Change Task**: Receives value changes and logs them
//! - **Main loop**: Logs the current value every 5 seconds
//!
//! The decoder never leaves the encoder task. Other tasks read the value
//! through [`EncoderValue`] and receive changes through a [`ChangeChannel`].
//!
//! # Modules
//!
//! - [`gpio_input`]: GPIO-based event source ([`GpioPinSource`])
//! - [`channel_output`]: Value publishing observer ([`PublishingObserver`], [`EncoderValue`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//!
//! # Re-exports
//!
//! This crate re-exports all public items from [`quadrature_encoder`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

// Re-export core types for convenience
pub use quadrature_encoder::{
    Bounds, ConfigError, DecoderConfig, Detent, Direction, EncoderSession, ObserverError,
    PinAssignment, PinEventSource, PinState, QuadratureDecoder, SaturationPolicy, SessionError,
    SourceError, ValueObserver,
};

pub mod channel_output;
pub mod gpio_input;

pub use channel_output::{
    publishing_observer, ChangeChannel, ChannelObserver, EncoderValue, PublishingObserver,
    ValueChange, CHANGE_QUEUE_DEPTH,
};
pub use gpio_input::GpioPinSource;
