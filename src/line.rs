use embedded_hal::digital::{InputPin, OutputPin};

/// Which side currently owns the data line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineMode {
    /// The controller drives the line; the sensor must stay passive.
    Driving,
    /// The line is released to the sensor; level reads are meaningful.
    Listening,
}

/// Owns the single bidirectional data line shared with the sensor.
///
/// The DHT protocol has no bus arbitration: at any instant exactly one side
/// drives the line, and ownership changes only at fixed protocol phases.
/// The mode transitions here are that handover made explicit.
pub struct LineDriver<PIN> {
    pin: PIN,
    mode: LineMode,
}

impl<PIN, E> LineDriver<PIN>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
{
    /// Wraps the data line pin. The pin must support both input and output
    /// on the same line; an external pull-up supplies the idle-high state.
    pub fn new(pin: PIN) -> Self {
        LineDriver {
            pin,
            mode: LineMode::Driving,
        }
    }

    /// Drives the line low. The controller owns the bus afterwards.
    pub fn drive_low(&mut self) -> Result<(), E> {
        self.mode = LineMode::Driving;
        self.pin.set_low()
    }

    /// Drives (or, on an open-drain pin, releases) the line high.
    pub fn release_high(&mut self) -> Result<(), E> {
        self.mode = LineMode::Driving;
        self.pin.set_high()
    }

    /// Stops driving the line; the sensor owns the bus until the next
    /// [`drive_low`](Self::drive_low) or [`release_high`](Self::release_high).
    pub fn listen(&mut self) {
        self.mode = LineMode::Listening;
    }

    /// Samples the current line level.
    ///
    /// Only valid while listening; sampling while driving is a programming
    /// error, not a runtime condition.
    pub fn level(&mut self) -> Result<bool, E> {
        debug_assert_eq!(self.mode, LineMode::Listening);
        self.pin.is_high()
    }

    /// Current ownership of the line.
    pub fn mode(&self) -> LineMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTx,
    };

    #[test]
    fn drive_and_release_set_the_pin() {
        let mut pin = PinMock::new(&[PinTx::set(PinState::Low), PinTx::set(PinState::High)]);

        let mut line = LineDriver::new(pin.clone());
        line.drive_low().unwrap();
        assert_eq!(line.mode(), LineMode::Driving);
        line.release_high().unwrap();
        assert_eq!(line.mode(), LineMode::Driving);

        pin.done();
    }

    #[test]
    fn listening_reflects_the_sensor_side() {
        let mut pin = PinMock::new(&[PinTx::get(PinState::High), PinTx::get(PinState::Low)]);

        let mut line = LineDriver::new(pin.clone());
        line.listen();
        assert_eq!(line.mode(), LineMode::Listening);
        assert!(line.level().unwrap());
        assert!(!line.level().unwrap());

        pin.done();
    }
}
