//! Platform-agnostic quadrature rotary encoder decoding.
//!
//! This crate turns the edge events of a two-pin quadrature encoder into a
//! bounded integer value. It carries no hardware dependencies and can be used
//! both in embedded `no_std` firmware and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Pin levels and rotation direction ([`PinState`], [`Direction`], [`Detent`])
//! - [`config`]: Construction parameters ([`DecoderConfig`], [`Bounds`], [`PinAssignment`])
//! - [`decoder`]: The detent state machine ([`QuadratureDecoder`])
//! - [`input`]: Pin-change event source trait ([`PinEventSource`])
//! - [`observer`]: Value-change observer trait ([`ValueObserver`])
//! - [`session`]: Serializes events from a source into a decoder ([`EncoderSession`])
//!
//! # Decoding
//!
//! Both lines rest low (`00`). One detent walks the Gray-code cycle and
//! returns to rest:
//!
//! ```text
//! Right (clockwise):        00 -> 01 -> 11 -> 10 -> 00
//! Left (counter-clockwise): 00 -> 10 -> 11 -> 01 -> 00
//! ```
//!
//! The direction is latched on the way out and the step is committed on the
//! edge back to rest, so a single missed intermediate edge is tolerated.
//!
//! # Example
//!
//! ```rust
//! use quadrature_encoder::{DecoderConfig, Direction, PinState, QuadratureDecoder};
//!
//! let config = DecoderConfig::default().with_bounds(0, 10).with_start_value(5);
//! let mut decoder = QuadratureDecoder::new(config, ()).unwrap();
//!
//! for state in [PinState::S01, PinState::S11, PinState::S10, PinState::S00] {
//!     decoder.on_pin_change(state).unwrap();
//! }
//! assert_eq!(decoder.value(), 6);
//! assert_eq!(decoder.last_direction(), Some(Direction::Right));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and session logging (for embedded targets)
//!
//! # Concurrency
//!
//! [`QuadratureDecoder::on_pin_change`] takes `&mut self`: at most one event
//! can be in flight. Whatever delivers edge events must serialize them before
//! they reach the decoder, which [`EncoderSession`] does by owning both the
//! source and the decoder.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod decoder;
pub mod input;
pub mod observer;
pub mod session;
pub mod types;

// Re-export main types at crate root
pub use config::{Bounds, ConfigError, DecoderConfig, PinAssignment, SaturationPolicy};
pub use decoder::QuadratureDecoder;
pub use input::{PinEventSource, SourceError};
pub use observer::{ObserverError, ValueObserver};
pub use session::{EncoderSession, SessionError};
pub use types::{Detent, Direction, PinState};
