use std::thread::sleep;
use std::time::Duration;
use log::{debug, trace};
use crate::{GpioError, GpioOutput, GpioResult};
use crate::lcd::ht1621::driver::{Command, HT1621Driver, HT1621Timing, MAX_WIRE_ADDRESS};

/// `1000`: the command mode tag plus the leading zero of the 9-bit command word.
const COMMAND_PREFIX: u8 = 0b1000_0000;
/// `101`: the write mode tag.
const WRITE_PREFIX: u8 = 0b1010_0000;

/// GpioHT1621 driver for the HT1621 LCD controller using GPIO pins.
///
/// Every transition is a single GPIO write followed by the matching [HT1621Timing] delay.
#[derive(Debug)]
pub struct GpioHT1621Driver<'a> {
    pin_cs: &'a dyn GpioOutput,
    pin_wr: &'a dyn GpioOutput,
    pin_data: &'a dyn GpioOutput,
    pin_backlight: Option<&'a dyn GpioOutput>,
    timing: HT1621Timing,
}

impl<'a> GpioHT1621Driver<'a> {
    /// Creates a new GpioHT1621Driver instance, with default timing and no backlight.
    ///
    /// # Parameters
    ///
    /// - `pin_cs`: Chip select output pin, active low.
    /// - `pin_wr`: Write clock output pin. Data is latched on its rising edge.
    /// - `pin_data`: Serial data output pin.
    pub fn new(
        pin_cs: &'a dyn GpioOutput,
        pin_wr: &'a dyn GpioOutput,
        pin_data: &'a dyn GpioOutput,
    ) -> Self {
        GpioHT1621Driver {
            pin_cs,
            pin_wr,
            pin_data,
            pin_backlight: None,
            timing: HT1621Timing::default(),
        }
    }

    /// Adds a backlight output pin. The backlight is on when the pin is high.
    pub fn with_backlight(mut self, pin_backlight: &'a dyn GpioOutput) -> Self {
        self.pin_backlight = Some(pin_backlight);
        self
    }

    /// Replaces the bus timing. Use [HT1621Timing::none] when nothing is listening to the delays.
    pub fn with_timing(mut self, timing: HT1621Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Gets the bus timing in use.
    pub fn timing(&self) -> HT1621Timing {
        self.timing
    }

    fn wait(duration: Duration) {
        if !duration.is_zero() {
            sleep(duration);
        }
    }

    /// Clocks out the `count` most significant bits of `data`, MSB first.
    fn send_bits(&self, mut data: u8, count: u8) -> GpioResult<()> {
        for _ in 0..count {
            self.pin_wr.write(false)?;
            self.pin_data.write(data & 0x80 != 0)?;
            Self::wait(self.timing.write_low);
            self.pin_wr.write(true)?;
            Self::wait(self.timing.write_high);
            data <<= 1;
        }
        Ok(())
    }

    /// Runs `body` with CS held low. CS is released even if `body` fails.
    fn frame(&self, body: impl FnOnce(&Self) -> GpioResult<()>) -> GpioResult<()> {
        self.pin_cs.write(false)?;
        Self::wait(self.timing.cs_setup);
        let result = body(self);
        let released = self.pin_cs.write(true);
        Self::wait(self.timing.cs_hold);
        result.and(released)
    }
}

impl HT1621Driver for GpioHT1621Driver<'_> {
    /// Drives all three bus lines high, then sends [Command::STARTUP]: RC oscillator, bias,
    /// system off, watchdog off, system on, display on.
    fn init(&mut self) -> GpioResult<()> {
        debug!("Initializing HT1621 with {:?}", self.timing);

        self.pin_cs.write(true)?;
        self.pin_wr.write(true)?;
        self.pin_data.write(true)?;
        Self::wait(self.timing.cs_hold);

        for command in Command::STARTUP {
            self.command(command)?;
        }

        Ok(())
    }

    fn send_command(&mut self, opcode: u8) -> GpioResult<()> {
        trace!("Sending command: {:08b}", opcode);
        self.frame(|this| {
            this.send_bits(COMMAND_PREFIX, 4)?;
            this.send_bits(opcode, 8)
        })
    }

    /// The address is shifted left by 2 so that its 6 low bits are the top of the byte handed to
    /// the shifter.
    fn write_address(&mut self, address: u8, nibble: u8) -> GpioResult<()> {
        if address > MAX_WIRE_ADDRESS || nibble > 0x0F {
            return Err(GpioError::InvalidArgument);
        }

        trace!("Writing {:04b} at {:#04x}", nibble, address);
        self.frame(|this| {
            this.send_bits(WRITE_PREFIX, 3)?;
            this.send_bits(address << 2, 6)?;
            this.send_bits(nibble << 4, 4)
        })
    }

    fn set_backlight(&mut self, on: bool) -> GpioResult<()> {
        let Some(pin) = self.pin_backlight else {
            return Ok(());
        };

        debug!("Backlight {}", if on { "on" } else { "off" });
        pin.write(on)?;
        Self::wait(self.timing.backlight_settle);
        Ok(())
    }
}
