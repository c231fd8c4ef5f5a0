//! The demo sweep shown on the controller panel.

use log::{debug, info};
use segpanel_gpio::GpioResult;
use segpanel_gpio::lcd::ht1621::SegmentLcd;
use segpanel_gpio::lcd::ht1621::segments::digits::{
    VOLT_ONES, VOLT_TENTHS, X_HUNDREDS_DIGIT, X_ONES, X_TENS, Y_HUNDREDS_DIGIT, Y_ONES, Y_TENS,
};
use segpanel_gpio::lcd::ht1621::segments::{
    RADIO, RADIO_ANTENNA, SPEED, SPEED_BORDER, VOLT_DP, VOLT_LABEL, X_BAR, X_BAR_BORDER, X_PERCENT,
    Y_BAR, Y_BAR_BORDER,
};
use segpanel_gpio::lcd::sevseg::SevenSegment;

/// Sweeps a value from 0 to 255 over every readout and gauge of the panel.
pub struct App<'a> {
    lcd: SegmentLcd<'a>,
    x_axis: SevenSegment,
    y_axis: SevenSegment,
    voltage: SevenSegment,
    value: u8,
}

impl<'a> App<'a> {
    pub fn new(lcd: SegmentLcd<'a>) -> App<'a> {
        App {
            lcd,
            x_axis: SevenSegment::three_digit(X_HUNDREDS_DIGIT, X_TENS, X_ONES),
            y_axis: SevenSegment::three_digit(Y_HUNDREDS_DIGIT, Y_TENS, Y_ONES),
            voltage: SevenSegment::two_digit(VOLT_ONES, VOLT_TENTHS).with_decimal_point(true),
            value: 0,
        }
    }

    /// Initializes the display and draws the static labels.
    pub fn start(&mut self, backlight: bool) -> GpioResult<()> {
        self.lcd.init()?;
        if backlight {
            self.lcd.backlight_on()?;
        }

        for label in [
            X_BAR_BORDER, Y_BAR_BORDER, SPEED_BORDER, VOLT_LABEL, VOLT_DP, RADIO_ANTENNA, X_PERCENT,
        ] {
            self.lcd.set_seg(label);
        }
        self.lcd.flush()?;

        info!("Panel started.");
        Ok(())
    }

    /// Draws the current value and advances it.
    pub fn update(&mut self) -> GpioResult<()> {
        let value = self.value;
        debug!("Drawing {}", value);

        let buffer = self.lcd.buffer_mut();
        // The hundreds half digit can only show a 1
        self.x_axis.display_int(buffer, Self::percent(value) as i32);
        self.y_axis.display_int_hex(buffer, value as i32);
        // 0.0 to 5.0 V, in tenths
        let tenths = value as u32 * 50 / 255;
        self.voltage.display_str(buffer, &format!("{tenths:02}"));

        self.lcd.set_bar(&X_BAR, Self::level(value, X_BAR.len()));
        self.lcd.set_bar(&Y_BAR, Self::level(value, Y_BAR.len()));
        self.lcd.set_bar(&SPEED, Self::level(value, SPEED.len()));
        self.lcd.set_bar(&RADIO, Self::level(value, RADIO.len()));

        self.lcd.flush()?;

        self.value = value.wrapping_add(1);
        Ok(())
    }

    /// Blanks the display and turns it off.
    pub fn stop(&mut self) -> GpioResult<()> {
        self.lcd.buffer_mut().fill(0);
        self.lcd.flush()?;
        self.lcd.backlight_off()?;
        self.lcd.display_off()?;
        info!("Panel stopped.");
        Ok(())
    }

    fn percent(value: u8) -> u32 {
        value as u32 * 100 / 255
    }

    /// Maps a 0-255 value to the number of lit cells of a gauge with `cells` cells.
    fn level(value: u8, cells: usize) -> usize {
        (value as usize * (cells + 1)) / 256
    }
}
