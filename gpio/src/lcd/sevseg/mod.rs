//! Short numbers and text on seven-segment digit positions of a segment LCD.
//!
//! [SevenSegment] binds two or three [Digit]s and renders strings into a [SegmentBuffer]. It never
//! touches the bus: after rendering, the caller has to flush the buffer (see
//! [SegmentLcd::flush](crate::lcd::ht1621::SegmentLcd::flush)) for anything to show up.

pub mod charset;

use log::{debug, trace};
use crate::lcd::ht1621::SegmentBuffer;
use crate::lcd::ht1621::segments::Digit;
pub use charset::{pattern_for, pattern_for_code};

/// The text shown when the input doesn't fit.
const BLANK: &str = "   ";

/// The digit positions a [SevenSegment] renders to, left to right.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DigitBinding {
    Two([Digit; 2]),
    Three([Digit; 3]),
}

impl DigitBinding {
    pub fn digits(&self) -> &[Digit] {
        match self {
            DigitBinding::Two(digits) => digits,
            DigitBinding::Three(digits) => digits,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SevenSegmentConfig {
    pub digits: DigitBinding,
    /// Reserved. No decimal point segment is bound, so this changes nothing yet.
    pub decimal_point: bool,
}

/// Renders short strings and integers onto 2 or 3 digit positions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SevenSegment {
    config: SevenSegmentConfig,
}

impl SevenSegment {
    pub fn new(config: SevenSegmentConfig) -> Self {
        Self { config }
    }

    pub fn two_digit(first: Digit, second: Digit) -> Self {
        Self::new(SevenSegmentConfig {
            digits: DigitBinding::Two([first, second]),
            decimal_point: false,
        })
    }

    pub fn three_digit(first: Digit, second: Digit, third: Digit) -> Self {
        Self::new(SevenSegmentConfig {
            digits: DigitBinding::Three([first, second, third]),
            decimal_point: false,
        })
    }

    pub fn with_decimal_point(mut self, decimal_point: bool) -> Self {
        self.config.decimal_point = decimal_point;
        self
    }

    pub fn config(&self) -> &SevenSegmentConfig {
        &self.config
    }

    pub fn digit_count(&self) -> usize {
        self.config.digits.digits().len()
    }

    /// Right-justifies `s` for this display.
    ///
    /// One and two character strings get leading spaces, three character strings are kept as
    /// they are (on two digits, the third character has nowhere to go and is dropped when
    /// rendering). Any other length, including empty, becomes three spaces.
    pub fn padded(&self, s: &str) -> String {
        match (s.chars().count(), self.digit_count()) {
            (1, 2) => format!(" {s}"),
            (1, _) => format!("  {s}"),
            (2, 2) | (3, _) => s.to_string(),
            (2, _) => format!(" {s}"),
            _ => BLANK.to_string(),
        }
    }

    /// Turns off every segment of every bound digit.
    pub fn blank(&self, buffer: &mut SegmentBuffer) {
        for digit in self.config.digits.digits() {
            for seg in digit.segments() {
                if !seg.is_nul() {
                    buffer.clear_seg(seg);
                }
            }
        }
    }

    /// Renders `s` into the buffer. Does not flush.
    ///
    /// All bound digits are blanked first, then the segments of each character of the
    /// [padded](Self::padded) string are lit, left to right.
    pub fn display_str(&self, buffer: &mut SegmentBuffer, s: &str) {
        self.blank(buffer);

        let text = self.padded(s);
        if text == BLANK && s != BLANK {
            debug!("{:?} doesn't fit {} digits, blanking", s, self.digit_count());
        }
        trace!("Rendering {:?}", text);

        for (digit, c) in self.config.digits.digits().iter().zip(text.chars()) {
            let pattern = pattern_for(c);
            for (i, seg) in digit.segments().into_iter().enumerate() {
                if pattern & (1 << (6 - i)) != 0 && !seg.is_nul() {
                    buffer.set_seg(seg);
                }
            }
        }
    }

    /// Renders `value` in decimal. Does not flush.
    pub fn display_int(&self, buffer: &mut SegmentBuffer, value: i32) {
        self.display_str(buffer, &value.to_string());
    }

    /// Renders `value` in uppercase hexadecimal. Does not flush.
    ///
    /// Negative values are shown in two's complement, which never fits and renders blank.
    pub fn display_int_hex(&self, buffer: &mut SegmentBuffer, value: i32) {
        self.display_str(buffer, &format!("{value:X}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GpioDriver;
    use crate::lcd::ht1621::SegmentLcd;
    use crate::lcd::ht1621::driver::{GpioHT1621Driver, HT1621Timing};
    use crate::lcd::ht1621::segments::digits::{
        VOLT_ONES, VOLT_TENTHS, X_HUNDREDS_DIGIT, X_ONES, X_TENS, Y_HUNDREDS_DIGIT, Y_ONES, Y_TENS,
    };
    use crate::lcd::ht1621::segments::{Seg, X_HUNDREDS, Y_HUNDREDS};
    use crate::trace::{BusLines, Frame, TraceGpioDriver};

    fn y_axis() -> SevenSegment {
        SevenSegment::three_digit(Y_HUNDREDS_DIGIT, Y_TENS, Y_ONES)
    }

    /// Gets the pattern currently lit on a digit, in `0bABCDEFG` form.
    fn lit_pattern(buffer: &SegmentBuffer, digit: Digit) -> u8 {
        digit
            .segments()
            .into_iter()
            .enumerate()
            .filter(|&(_, seg)| buffer.is_set(seg))
            .fold(0, |pattern, (i, _)| pattern | 1 << (6 - i))
    }

    #[test]
    fn pads_short_strings() {
        let two = SevenSegment::two_digit(X_TENS, X_ONES);
        let three = SevenSegment::three_digit(X_HUNDREDS_DIGIT, X_TENS, X_ONES);

        assert_eq!(three.padded("5"), "  5");
        assert_eq!(two.padded("5"), " 5");
        assert_eq!(two.padded("12"), "12");
        assert_eq!(three.padded("12"), " 12");
        assert_eq!(two.padded("123"), "123");
        assert_eq!(three.padded("123"), "123");
    }

    #[test]
    fn blanks_strings_that_do_not_fit() {
        let two = SevenSegment::two_digit(X_TENS, X_ONES);
        let three = SevenSegment::three_digit(X_HUNDREDS_DIGIT, X_TENS, X_ONES);

        for display in [two, three] {
            assert_eq!(display.padded(""), "   ");
            assert_eq!(display.padded("1234"), "   ");
        }
    }

    #[test]
    fn renders_each_character_on_its_digit() {
        let display = SevenSegment::two_digit(VOLT_ONES, VOLT_TENTHS);
        let mut buffer = SegmentBuffer::new();

        display.display_str(&mut buffer, "42");

        assert_eq!(lit_pattern(&buffer, VOLT_ONES), pattern_for('4'));
        assert_eq!(lit_pattern(&buffer, VOLT_TENTHS), pattern_for('2'));
    }

    #[test]
    fn clears_segments_of_the_previous_render() {
        let display = SevenSegment::two_digit(X_TENS, X_ONES);
        let mut buffer = SegmentBuffer::new();

        display.display_str(&mut buffer, "88");
        display.display_str(&mut buffer, "17");

        assert_eq!(lit_pattern(&buffer, X_TENS), pattern_for('1'));
        assert_eq!(lit_pattern(&buffer, X_ONES), pattern_for('7'));

        display.display_str(&mut buffer, "");
        assert_eq!(lit_pattern(&buffer, X_TENS), 0);
        assert_eq!(lit_pattern(&buffer, X_ONES), 0);
    }

    #[test]
    fn leaves_other_segments_alone() {
        let display = SevenSegment::two_digit(X_TENS, X_ONES);
        let mut buffer = SegmentBuffer::new();
        buffer.fill(0xF0);

        display.display_str(&mut buffer, "  ");

        assert!(buffer.is_set(Y_HUNDREDS));
        assert_eq!(lit_pattern(&buffer, Y_TENS), 0b1111111);
        assert_eq!(lit_pattern(&buffer, X_TENS), 0);
    }

    #[test]
    fn third_character_is_dropped_on_two_digits() {
        let display = SevenSegment::two_digit(X_TENS, X_ONES);
        let mut buffer = SegmentBuffer::new();

        display.display_str(&mut buffer, "123");

        assert_eq!(lit_pattern(&buffer, X_TENS), pattern_for('1'));
        assert_eq!(lit_pattern(&buffer, X_ONES), pattern_for('2'));
    }

    #[test]
    fn hundreds_half_digit_shows_a_one() {
        let mut buffer = SegmentBuffer::new();

        y_axis().display_int(&mut buffer, 100);
        assert!(buffer.is_set(Y_HUNDREDS));
        assert_eq!(lit_pattern(&buffer, Y_TENS), pattern_for('0'));

        y_axis().display_int(&mut buffer, 99);
        assert!(!buffer.is_set(Y_HUNDREDS));
    }

    #[test]
    fn hundreds_half_digit_stays_dark_for_a_two() {
        let display = SevenSegment::three_digit(X_HUNDREDS_DIGIT, X_TENS, X_ONES);
        let mut buffer = SegmentBuffer::new();

        display.display_int(&mut buffer, 255);
        assert!(!buffer.is_set(X_HUNDREDS));
        assert_eq!(lit_pattern(&buffer, X_TENS), pattern_for('5'));
        assert_eq!(lit_pattern(&buffer, X_ONES), pattern_for('5'));

        display.display_int(&mut buffer, 200);
        assert!(!buffer.is_set(X_HUNDREDS));
    }

    #[test]
    fn integers_in_decimal() {
        let mut buffer = SegmentBuffer::new();

        y_axis().display_int(&mut buffer, -7);
        assert_eq!(lit_pattern(&buffer, Y_TENS), pattern_for('-'));
        assert_eq!(lit_pattern(&buffer, Y_ONES), pattern_for('7'));

        y_axis().display_int(&mut buffer, 1000);
        assert_eq!(buffer, SegmentBuffer::new());
    }

    #[test]
    fn negative_hex_renders_blank() {
        let mut buffer = SegmentBuffer::new();
        y_axis().display_int_hex(&mut buffer, -1);
        assert_eq!(buffer, SegmentBuffer::new());
    }

    #[test]
    fn decimal_point_flag_is_inert() {
        let mut plain = SegmentBuffer::new();
        let mut dotted = SegmentBuffer::new();

        y_axis().display_int(&mut plain, 42);
        y_axis().with_decimal_point(true).display_int(&mut dotted, 42);

        assert_eq!(plain, dotted);
        assert!(y_axis().with_decimal_point(true).config().decimal_point);
    }

    #[test]
    fn hex_255_end_to_end() {
        let gpio = TraceGpioDriver::new(3);
        let lines = BusLines { cs: 0, wr: 1, data: 2 };
        let mut cs = gpio.get_pin(lines.cs).unwrap();
        let mut wr = gpio.get_pin(lines.wr).unwrap();
        let mut data = gpio.get_pin(lines.data).unwrap();
        let (cs, wr, data) = (cs.as_output().unwrap(), wr.as_output().unwrap(), data.as_output().unwrap());
        let mut driver = GpioHT1621Driver::new(&*cs, &*wr, &*data).with_timing(HT1621Timing::none());
        let mut lcd = SegmentLcd::new(&mut driver);
        let display = y_axis();

        display.display_int_hex(lcd.buffer_mut(), 255);

        assert_eq!(display.padded("FF"), " FF");
        assert!(!lcd.buffer().is_set(Y_HUNDREDS));
        assert_eq!(lit_pattern(lcd.buffer(), Y_TENS), pattern_for('F'));
        assert_eq!(lit_pattern(lcd.buffer(), Y_ONES), pattern_for('F'));
        assert!(gpio.events().is_empty());

        lcd.flush().unwrap();

        let mut shown = SegmentBuffer::new();
        for frame in gpio.frames(lines) {
            let Frame::Data { address, nibble } = frame else {
                panic!("unexpected frame {frame:?}");
            };
            shown.set_byte(address, nibble << 4);
        }
        assert_eq!(&shown, lcd.buffer());
        for seg in Y_TENS.segments().into_iter().chain(Y_ONES.segments()) {
            assert_eq!(shown.is_set(seg), lcd.buffer().is_set(seg), "{seg:?}");
        }
        assert!(!shown.is_set(Seg::NUL));
    }
}
