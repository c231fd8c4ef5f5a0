//! HT1621 LCD driver module.
//!
//! See [HT1621Driver] trait for the driver interface, and [GpioHT1621Driver] for the
//! implementation bit-banging the 3-wire bus over GPIO pins.

mod gpio;

use crate::GpioResult;
use std::fmt::Debug;
use std::time::Duration;
pub use gpio::*;

/// Largest value that fits in the 6-bit address field of a data frame.
pub const MAX_WIRE_ADDRESS: u8 = 0b0011_1111;

/// Configuration commands understood by the HT1621.
///
/// On the wire every command is the `100` mode tag followed by a 9-bit command word. The first bit
/// of that word is always `0`, the remaining 8 bits are the opcode stored here.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    /// Turns off both the system oscillator and the LCD bias generator.
    SysDis = 0x00,
    /// Turns on the system oscillator.
    SysEn = 0x02,
    /// Turns off the LCD bias generator.
    LcdOff = 0x04,
    /// Turns on the LCD bias generator.
    LcdOn = 0x06,
    /// Disables the watchdog time-out flag output.
    WdtDis = 0x0A,
    /// Turns off the tone output.
    ToneOff = 0x10,
    /// Turns on the tone output.
    ToneOn = 0x12,
    /// System clock from an external 32 kHz crystal.
    Xtal = 0x28,
    /// System clock from the on-chip 256 kHz RC oscillator.
    Rc256 = 0x30,
    /// 1/3 bias, 4 commons.
    Bias = 0x52,
}

impl Command {
    /// Commands issued by [HT1621Driver::init], in order.
    pub const STARTUP: [Command; 6] = [
        Command::Rc256,
        Command::Bias,
        Command::SysDis,
        Command::WdtDis,
        Command::SysEn,
        Command::LcdOn,
    ];

    /// Gets the 8-bit opcode of the command.
    pub fn opcode(self) -> u8 {
        self as u8
    }
}

/// Bus timing of the HT1621 driver.
///
/// Every GPIO transition is written once and followed by the corresponding delay. A zero duration
/// skips the delay entirely.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HT1621Timing {
    /// How long WR stays low, with DATA already set, before the rising edge.
    pub write_low: Duration,
    /// How long WR stays high after the rising edge, before the next bit.
    pub write_high: Duration,
    /// Delay between pulling CS low and the first clock of a frame.
    pub cs_setup: Duration,
    /// Minimum time CS stays high after a frame.
    pub cs_hold: Duration,
    /// Delay after switching the backlight.
    pub backlight_settle: Duration,
}

impl HT1621Timing {
    /// No delays at all. Useful for the in-memory backend.
    pub const fn none() -> Self {
        Self {
            write_low: Duration::ZERO,
            write_high: Duration::ZERO,
            cs_setup: Duration::ZERO,
            cs_hold: Duration::ZERO,
            backlight_settle: Duration::ZERO,
        }
    }
}

impl Default for HT1621Timing {
    /// WR low and high widths are above the 3.34 µs minimum of the HT1621 at 3 V.
    fn default() -> Self {
        Self {
            write_low: Duration::from_micros(4),
            write_high: Duration::from_micros(4),
            cs_setup: Duration::from_micros(1),
            cs_hold: Duration::from_micros(1),
            backlight_settle: Duration::from_millis(1),
        }
    }
}

/// The `HT1621Driver` trait defines a low-level interface for the Holtek HT1621 segment LCD
/// controller.
///
/// # Protocol
///
/// The controller is write-only here. Each transaction (frame) is bounded by CS being pulled low
/// and released high, and the bits are clocked MSB first, committed on the rising edge of WR.
/// There are two kinds of frames:
/// - **command**: `100` + `0` + 8-bit opcode, see [Command],
/// - **data**: `101` + 6-bit address + 4-bit data.
///
/// # Memory
///
/// The display RAM is 32 × 4 bits. Each address holds four segments, which is why only a nibble
/// is sent per data frame.
///
/// # Sources
///
/// - Holtek Semiconductor Inc., [“HT1621 RAM Mapping 32×4 LCD Controller for I/O MCU,”](https://www.seeedstudio.com/document/HT1621.pdf)
pub trait HT1621Driver: Debug {
    /// Puts the bus lines in their idle state and issues [Command::STARTUP].
    fn init(&mut self) -> GpioResult<()>;

    /// Sends a single configuration command.
    fn command(&mut self, command: Command) -> GpioResult<()> {
        self.send_command(command.opcode())
    }

    /// Turns on the system oscillator.
    fn sys_enable(&mut self) -> GpioResult<()> {
        self.command(Command::SysEn)
    }

    /// Turns off the system oscillator and the bias generator.
    fn sys_disable(&mut self) -> GpioResult<()> {
        self.command(Command::SysDis)
    }

    /// Turns the LCD bias generator, and thus the display, on.
    fn lcd_on(&mut self) -> GpioResult<()> {
        self.command(Command::LcdOn)
    }

    /// Turns the LCD bias generator, and thus the display, off. Display RAM is kept.
    fn lcd_off(&mut self) -> GpioResult<()> {
        self.command(Command::LcdOff)
    }

    /// Turns the tone output on or off.
    fn set_tone(&mut self, on: bool) -> GpioResult<()> {
        self.command(if on { Command::ToneOn } else { Command::ToneOff })
    }

    // Low-level frames
    // These are implemented by the driver implementation and used by everything above.

    /// Sends one command frame with the given opcode.
    fn send_command(&mut self, opcode: u8) -> GpioResult<()>;

    /// Sends one data frame, writing `nibble` at `address` of the display RAM.
    ///
    /// # Errors
    /// - `GpioError::InvalidArgument` if `address` is above [MAX_WIRE_ADDRESS] or `nibble` above `0xF`.
    fn write_address(&mut self, address: u8, nibble: u8) -> GpioResult<()>;

    /// Switches the backlight, if the driver has one.
    fn set_backlight(&mut self, on: bool) -> GpioResult<()>;
}
