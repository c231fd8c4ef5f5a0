//! In-memory GPIO driver that records every level change instead of touching hardware.
//!
//! Used for dry runs of the application and as the bus mock in tests. The recorded trace can be
//! decoded back into HT1621 frames with [decode_frames].
use crate::{GpioActiveLevel, GpioDriver, GpioError, GpioOutput, GpioPin, GpioResult};
use bitvec::vec::BitVec;
use log::trace;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::AtomicU8;

/// A single recorded output transition. `level` is the physical level, after the active level
/// of the pin was applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TraceEvent {
    pub pin: usize,
    pub level: bool,
}

/// TraceGpioDriver hands out pins whose writes are appended to a shared trace.
pub struct TraceGpioDriver {
    pin_count: usize,
    used_pins: BitVec<AtomicU8>,
    events: RefCell<Vec<TraceEvent>>,
}

impl TraceGpioDriver {
    pub fn new(pin_count: usize) -> Self {
        Self {
            pin_count,
            used_pins: BitVec::repeat(false, pin_count),
            events: RefCell::new(Vec::new()),
        }
    }

    /// Returns a copy of all the transitions recorded so far.
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    /// Forgets all the recorded transitions.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Gets the last level written to the pin, if it was ever written.
    pub fn level(&self, pin: usize) -> Option<bool> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|event| event.pin == pin)
            .map(|event| event.level)
    }

    /// Decodes the recorded trace as HT1621 frames on the given lines.
    pub fn frames(&self, lines: BusLines) -> Vec<Frame> {
        decode_frames(&self.events.borrow(), lines)
    }

    fn record(&self, pin: usize, level: bool) {
        self.events.borrow_mut().push(TraceEvent { pin, level });
    }
}

impl Debug for TraceGpioDriver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TraceGpioDriver({})", self.pin_count)
    }
}

impl GpioDriver for TraceGpioDriver {
    fn count(&self) -> GpioResult<usize> {
        Ok(self.pin_count)
    }

    fn get_pin(&self, index: usize) -> GpioResult<Box<dyn GpioPin + '_>> {
        if index >= self.pin_count {
            return Err(GpioError::InvalidArgument);
        }

        if self.used_pins[index] {
            return Err(GpioError::AlreadyInUse);
        }

        self.used_pins.set_aliased(index, true);

        Ok(Box::new(TracePin {
            driver: self,
            pin_index: index,
            active_level: GpioActiveLevel::High,
        }))
    }
}

struct TracePin<'a> {
    driver: &'a TraceGpioDriver,
    pin_index: usize,
    active_level: GpioActiveLevel,
}

impl Debug for TracePin<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}[{}]", self.driver, self.pin_index)
    }
}

impl GpioPin for TracePin<'_> {
    fn as_output(&mut self) -> GpioResult<Box<dyn GpioOutput + '_>> {
        Ok(Box::new(TraceOutput { pin: self }))
    }

    fn supports_active_level(&self) -> bool {
        true
    }

    fn active_level(&self) -> GpioActiveLevel {
        self.active_level
    }

    fn set_active_level(&mut self, level: GpioActiveLevel) -> GpioResult<()> {
        self.active_level = level;
        Ok(())
    }
}

impl Drop for TracePin<'_> {
    fn drop(&mut self) {
        self.driver.used_pins.set_aliased(self.pin_index, false);
    }
}

struct TraceOutput<'a> {
    pin: &'a TracePin<'a>,
}

impl Debug for TraceOutput<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}[{}][output]", self.pin.driver, self.pin.pin_index)
    }
}

impl GpioOutput for TraceOutput<'_> {
    fn write(&self, value: bool) -> GpioResult<()> {
        let level = self.pin.active_level.get_state(value);
        trace!("{:?} <- {}", self, level as u8);
        self.pin.driver.record(self.pin.pin_index, level);
        Ok(())
    }
}

/// Pin indices of the three HT1621 bus lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BusLines {
    pub cs: usize,
    pub wr: usize,
    pub data: usize,
}

/// A transaction seen on the bus between a falling and a rising edge of CS.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Frame {
    /// `100` followed by a 9-bit command word with a leading zero.
    Command(u8),
    /// `101`, a 6-bit address and a 4-bit data nibble.
    Data { address: u8, nibble: u8 },
    /// Anything else, as the raw bits sampled on the rising edges of WR.
    Unknown(Vec<bool>),
}

impl Frame {
    fn parse(bits: Vec<bool>) -> Self {
        match bits.as_slice() {
            [true, false, false, false, opcode @ ..] if opcode.len() == 8 => {
                Frame::Command(bits_to_u8(opcode))
            }
            [true, false, true, rest @ ..] if rest.len() == 10 => Frame::Data {
                address: bits_to_u8(&rest[..6]),
                nibble: bits_to_u8(&rest[6..]),
            },
            _ => Frame::Unknown(bits),
        }
    }
}

fn bits_to_u8(bits: &[bool]) -> u8 {
    bits.iter().fold(0, |acc, &bit| (acc << 1) | bit as u8)
}

/// Replays the recorded transitions and samples DATA on every rising edge of WR while CS is low.
///
/// All lines are assumed to idle high before the first event, which is what the HT1621 driver
/// establishes on init.
pub fn decode_frames(events: &[TraceEvent], lines: BusLines) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut cs = true;
    let mut wr = true;
    let mut data = true;
    let mut bits = Vec::new();

    for event in events {
        if event.pin == lines.cs {
            if cs && !event.level {
                bits.clear();
            } else if !cs && event.level {
                frames.push(Frame::parse(std::mem::take(&mut bits)));
            }
            cs = event.level;
        } else if event.pin == lines.wr {
            if !cs && !wr && event.level {
                bits.push(data);
            }
            wr = event.level;
        } else if event.pin == lines.data {
            data = event.level;
        }
    }

    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: BusLines = BusLines { cs: 0, wr: 1, data: 2 };

    fn clock_in(events: &mut Vec<TraceEvent>, bits: &[bool]) {
        for &bit in bits {
            events.push(TraceEvent { pin: 1, level: false });
            events.push(TraceEvent { pin: 2, level: bit });
            events.push(TraceEvent { pin: 1, level: true });
        }
    }

    #[test]
    fn pins_are_exclusive_until_dropped() {
        let gpio = TraceGpioDriver::new(2);
        let pin = gpio.get_pin(0).unwrap();
        assert_eq!(gpio.get_pin(0).unwrap_err(), GpioError::AlreadyInUse);
        drop(pin);
        assert!(gpio.get_pin(0).is_ok());
        assert_eq!(gpio.get_pin(2).unwrap_err(), GpioError::InvalidArgument);
    }

    #[test]
    fn records_physical_levels() {
        let gpio = TraceGpioDriver::new(1);
        let mut pin = gpio.get_pin(0).unwrap();
        pin.set_active_level(GpioActiveLevel::Low).unwrap();
        let out = pin.as_output().unwrap();
        out.write(true).unwrap();
        assert_eq!(gpio.level(0), Some(false));
        assert_eq!(gpio.events(), vec![TraceEvent { pin: 0, level: false }]);
        gpio.clear();
        assert_eq!(gpio.level(0), None);
    }

    #[test]
    fn decodes_command_and_data_frames() {
        let mut events = vec![TraceEvent { pin: 0, level: false }];
        clock_in(&mut events, &[true, false, false, false]);
        clock_in(&mut events, &[false, true, false, true, false, false, true, false]);
        events.push(TraceEvent { pin: 0, level: true });

        events.push(TraceEvent { pin: 0, level: false });
        clock_in(&mut events, &[true, false, true]);
        clock_in(&mut events, &[false, true, false, false, true, true]);
        clock_in(&mut events, &[true, false, false, true]);
        events.push(TraceEvent { pin: 0, level: true });

        assert_eq!(
            decode_frames(&events, LINES),
            vec![
                Frame::Command(0x52),
                Frame::Data { address: 0x13, nibble: 0x9 },
            ]
        );
    }

    #[test]
    fn ignores_clock_edges_outside_of_frames() {
        let mut events = Vec::new();
        clock_in(&mut events, &[true, true]);
        events.push(TraceEvent { pin: 0, level: false });
        clock_in(&mut events, &[true, true]);
        events.push(TraceEvent { pin: 0, level: true });

        assert_eq!(
            decode_frames(&events, LINES),
            vec![Frame::Unknown(vec![true, true])]
        );
    }
}
