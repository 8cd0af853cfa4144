use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::line::LineDriver;

/// How long the line held a level before changing, in microseconds.
///
/// Produced and consumed within a single decode pass; never stored.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseMeasurement {
    us: u32,
    timed_out: bool,
}

impl PulseMeasurement {
    pub(crate) fn completed(us: u32) -> Self {
        PulseMeasurement {
            us,
            timed_out: false,
        }
    }

    pub(crate) fn expired(us: u32) -> Self {
        PulseMeasurement {
            us,
            timed_out: true,
        }
    }

    /// Microseconds spent at the level (capped at the timeout budget).
    pub fn us(&self) -> u32 {
        self.us
    }

    /// True if the level outlasted the timeout budget.
    pub fn is_timed_out(&self) -> bool {
        self.timed_out
    }
}

/// Measures pulse widths on the shared line by busy-polling.
///
/// Edge capture is not assumed to be available, so the line is sampled in a
/// tight loop with 1 us pacing. An interrupt- or DMA-based implementation
/// could replace this without touching the decoder. Lives only for the span
/// of one decode transaction.
pub struct PulseTimer<'a, PIN, DELAY> {
    line: &'a mut LineDriver<PIN>,
    delay: &'a mut DELAY,
}

impl<'a, PIN, DELAY, E> PulseTimer<'a, PIN, DELAY>
where
    PIN: InputPin<Error = E> + OutputPin<Error = E>,
    DELAY: DelayNs,
{
    /// Borrows the line and a delay provider for one transaction.
    pub fn new(line: &'a mut LineDriver<PIN>, delay: &'a mut DELAY) -> Self {
        PulseTimer { line, delay }
    }

    /// Counts how long the line stays at `level`, stopping the instant it
    /// changes or once `timeout_us` microseconds have elapsed.
    pub fn measure_while(
        &mut self,
        level: bool,
        timeout_us: u32,
    ) -> Result<PulseMeasurement, E> {
        let mut elapsed_us = 0;
        while self.line.level()? == level {
            if elapsed_us >= timeout_us {
                return Ok(PulseMeasurement::expired(elapsed_us));
            }
            self.delay.delay_us(1);
            elapsed_us += 1;
        }
        Ok(PulseMeasurement::completed(elapsed_us))
    }
}
