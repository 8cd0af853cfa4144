use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::DhtError;
use crate::frame::RawFrame;
use crate::line::LineDriver;
use crate::pulse::{PulseMeasurement, PulseTimer};

/// Request pulse width. The DHT11 needs at least 18 ms; the DHT22 accepts
/// anything from ~1 ms up, so the longer pulse works for either family.
const REQUEST_LOW_MS: u32 = 20;
/// Release time before handing the line to the sensor (datasheet: 20-40 us).
const REQUEST_RELEASE_US: u32 = 30;
/// Budget for each half of the sensor's 80 us + 80 us acknowledgement.
const ACK_TIMEOUT_US: u32 = 85;
/// Budget for the ~50 us low phase that starts every bit.
const BIT_LOW_TIMEOUT_US: u32 = 56;
/// Budget for the high phase that encodes the bit (~28 us or ~70 us).
const BIT_HIGH_TIMEOUT_US: u32 = 75;
/// High phases longer than this decode as 1. Sits halfway between the two
/// nominal widths, so polling jitter lands on the right side.
const BIT_ONE_THRESHOLD_US: u32 = 40;

/// Which device family is on the line.
///
/// Framing and timing are shared across the family; only the payload
/// interpretation differs.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorKind {
    /// DHT11: payload bytes carry whole units.
    Dht11,
    /// DHT22 / AM2301 / AM2302 / AM2321: 16-bit fields already in tenths.
    Dht22,
}

/// One decoded measurement, in tenths.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    /// Relative humidity in tenths of a percent (532 = 53.2 %).
    pub humidity: i16,
    /// Temperature in tenths of a degree Celsius (-5 = -0.5 °C).
    pub temperature: i16,
    /// Set on every reading produced by a successful decode.
    pub valid: bool,
}

impl Reading {
    /// Placeholder callers can hold before the first successful read.
    pub const INVALID: Reading = Reading {
        humidity: 0,
        temperature: 0,
        valid: false,
    };

    /// Relative humidity in percent.
    pub fn humidity_percent(&self) -> f32 {
        self.humidity as f32 / 10.0
    }

    /// Temperature in degrees Celsius.
    pub fn temperature_celsius(&self) -> f32 {
        self.temperature as f32 / 10.0
    }
}

/// Decoder for the DHT single-wire protocol.
///
/// Owns the data line and a delay provider; each call to [`Dht::read`] runs
/// one complete request/response transaction and returns a fresh [`Reading`].
/// The decoder keeps no state between calls.
pub struct Dht<PIN, DELAY> {
    line: LineDriver<PIN>,
    delay: DELAY,
    kind: SensorKind,
}

impl<PIN, DELAY, E> Dht<PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Creates a decoder for the given data line pin and sensor family.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the sensor's data line. Must
    ///   support both input and output; the idle-high state comes from an
    ///   external pull-up.
    /// * `delay` - A delay provider implementing [`DelayNs`] with microsecond
    ///   resolution.
    /// * `kind` - The device family, which selects the payload layout.
    pub fn new(pin: PIN, delay: DELAY, kind: SensorKind) -> Self {
        Dht {
            line: LineDriver::new(pin),
            delay,
            kind,
        }
    }

    /// Runs one full read transaction.
    ///
    /// Blocks the calling thread for the whole exchange (the 20 ms request
    /// pulse plus a few hundred microseconds of bit timing). The per-phase
    /// timing budgets are too tight to survive a scheduler suspension, so
    /// nothing here yields. The sensor needs a multi-second pause between
    /// reads; callers enforce that spacing.
    ///
    /// # Errors
    ///
    /// * [`DhtError::Timeout`] if a protocol phase outlasts its budget.
    /// * [`DhtError::ChecksumMismatch`] if a complete frame arrives corrupted.
    ///   No partial reading is returned in either case.
    pub fn read(&mut self) -> Result<Reading, DhtError<E>> {
        let result = self.transaction();

        // Leave the bus idle-high whatever the outcome, as it was before
        // the call.
        self.line.release_high()?;
        result
    }

    fn transaction(&mut self) -> Result<Reading, DhtError<E>> {
        self.request()?;

        let frame = self.receive_frame()?;
        if !frame.checksum_matches() {
            return Err(DhtError::ChecksumMismatch);
        }

        Ok(self.decode_payload(&frame))
    }

    /// Sends the start request: hold the line low long enough for either
    /// family to notice, release briefly, then hand the line to the sensor.
    fn request(&mut self) -> Result<(), DhtError<E>> {
        self.line.drive_low()?;
        self.delay.delay_ms(REQUEST_LOW_MS);
        self.line.release_high()?;
        self.delay.delay_us(REQUEST_RELEASE_US);
        self.line.listen();
        Ok(())
    }

    /// Waits out the sensor's acknowledgement and decodes the 40 data bits.
    fn receive_frame(&mut self) -> Result<RawFrame, DhtError<E>> {
        let mut timer = PulseTimer::new(&mut self.line, &mut self.delay);

        // 80 us low + 80 us high acknowledgement. A missing or unpowered
        // sensor leaves the pull-up in charge, which shows up here as the
        // high phase never ending.
        completed(timer.measure_while(false, ACK_TIMEOUT_US)?)?;
        completed(timer.measure_while(true, ACK_TIMEOUT_US)?)?;

        let mut frame = RawFrame::new();
        for _ in 0..40 {
            completed(timer.measure_while(false, BIT_LOW_TIMEOUT_US)?)?;
            let high_us = completed(timer.measure_while(true, BIT_HIGH_TIMEOUT_US)?)?;
            frame.push_bit(high_us > BIT_ONE_THRESHOLD_US);
        }

        Ok(frame)
    }

    /// Converts the payload bytes into tenths according to the family layout.
    fn decode_payload(&self, frame: &RawFrame) -> Reading {
        let [hum_hi, hum_lo, temp_hi, temp_lo] = frame.payload();

        let (humidity, temperature) = match self.kind {
            SensorKind::Dht22 => (
                u16::from_be_bytes([hum_hi, hum_lo]) as i16,
                signed_tenths(temp_hi, temp_lo),
            ),
            // DHT11 payloads carry whole units; the temperature low byte is
            // a tenths digit on later revisions, zero on the rest.
            SensorKind::Dht11 => (
                hum_hi as i16 * 10,
                temp_hi as i16 * 10 + temp_lo as i16,
            ),
        };

        Reading {
            humidity,
            temperature,
            valid: true,
        }
    }
}

/// Bit 7 of the high byte is a sign flag over a 15-bit magnitude.
fn signed_tenths(msb: u8, lsb: u8) -> i16 {
    let magnitude = u16::from_be_bytes([msb & 0x7F, lsb]) as i16;
    if msb & 0x80 != 0 { -magnitude } else { magnitude }
}

fn completed<E>(pulse: PulseMeasurement) -> Result<u32, DhtError<E>> {
    if pulse.is_timed_out() {
        Err(DhtError::Timeout)
    } else {
        Ok(pulse.us())
    }
}
