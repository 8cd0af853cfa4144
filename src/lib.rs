//! Pulse-width decoder for the DHT11/DHT22 (AM2302) family of humidity and
//! temperature sensors.
//!
//! These sensors communicate over a single bidirectional GPIO line: the
//! controller holds the line low to request a reading, releases it, and then
//! measures how long the sensor keeps the line high for each of 40 payload
//! bits. This crate implements that exchange on top of the [`embedded-hal`]
//! traits, validating the trailing checksum and converting the payload into
//! integer tenths.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - DHT11 and DHT22 payload layouts selected via [`SensorKind`]
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access
//! - [`DelayNs`] for microsecond timing
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod dht;
pub mod error;
pub mod frame;
pub mod line;
pub mod pulse;

pub use dht::{Dht, Reading, SensorKind};
pub use error::DhtError;
