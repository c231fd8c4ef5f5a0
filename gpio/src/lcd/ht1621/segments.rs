//! Segment map of the controller panel LCD: every lit element as an address and bit mask in the
//! HT1621 display RAM.
//!
//! Seven-segment positions are laid out as follows:
//!
//! ```text
//!         -A-     -A-
//!   B    F   B   F   B
//!         -G-     -G-
//!   C    E   C   E   C
//!         -D-     -D-
//!  Hund.  Tens    Ones
//! ```
//!
//! The hundreds position only has the segments of a `1`, wired together as a single element.

/// A single segment: the display RAM address it lives in and the bit selecting it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Seg {
    pub address: u8,
    pub mask: u8,
}

impl Seg {
    /// No physical segment.
    pub const NUL: Seg = Seg::new(0, 0);

    pub const fn new(address: u8, mask: u8) -> Self {
        Seg { address, mask }
    }

    pub const fn is_nul(&self) -> bool {
        self.mask == 0
    }
}

/// The seven segments of one digit position.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Digit {
    pub a: Seg,
    pub b: Seg,
    pub c: Seg,
    pub d: Seg,
    pub e: Seg,
    pub f: Seg,
    pub g: Seg,
}

impl Digit {
    /// An unused digit slot.
    pub const NUL: Digit = Digit {
        a: Seg::NUL,
        b: Seg::NUL,
        c: Seg::NUL,
        d: Seg::NUL,
        e: Seg::NUL,
        f: Seg::NUL,
        g: Seg::NUL,
    };

    /// Gets the segments in A to G order.
    pub const fn segments(&self) -> [Seg; 7] {
        [self.a, self.b, self.c, self.d, self.e, self.f, self.g]
    }
}

// Y axis readout
pub const Y_HUNDREDS: Seg = Seg::new(0x0A, 0x80);
pub const Y_TENS_A: Seg = Seg::new(0x0B, 0x80);
pub const Y_TENS_B: Seg = Seg::new(0x0B, 0x40);
pub const Y_TENS_C: Seg = Seg::new(0x0B, 0x20);
pub const Y_TENS_D: Seg = Seg::new(0x0B, 0x10);
pub const Y_TENS_E: Seg = Seg::new(0x0A, 0x10);
pub const Y_TENS_F: Seg = Seg::new(0x0A, 0x40);
pub const Y_TENS_G: Seg = Seg::new(0x0A, 0x20);
pub const Y_ONES_A: Seg = Seg::new(0x0D, 0x80);
pub const Y_ONES_B: Seg = Seg::new(0x0D, 0x40);
pub const Y_ONES_C: Seg = Seg::new(0x0D, 0x20);
pub const Y_ONES_D: Seg = Seg::new(0x0D, 0x10);
pub const Y_ONES_E: Seg = Seg::new(0x0C, 0x10);
pub const Y_ONES_F: Seg = Seg::new(0x0C, 0x40);
pub const Y_ONES_G: Seg = Seg::new(0x0C, 0x20);
pub const Y_PERCENT: Seg = Seg::new(0x0C, 0x80);

// Y bar graph, bottom to top
pub const Y_BAR_0: Seg = Seg::new(0x0E, 0x20);
pub const Y_BAR_1: Seg = Seg::new(0x0E, 0x40);
pub const Y_BAR_2: Seg = Seg::new(0x0E, 0x80);
pub const Y_BAR_3: Seg = Seg::new(0x0F, 0x80);
pub const Y_BAR_4: Seg = Seg::new(0x0F, 0x40);
pub const Y_BAR_5: Seg = Seg::new(0x0F, 0x20);
pub const Y_BAR_6: Seg = Seg::new(0x0F, 0x10);
pub const Y_BAR_BORDER: Seg = Seg::new(0x0E, 0x10);

// X bar graph, left to right
pub const X_BAR_0: Seg = Seg::new(0x10, 0x10);
pub const X_BAR_1: Seg = Seg::new(0x10, 0x20);
pub const X_BAR_2: Seg = Seg::new(0x10, 0x40);
pub const X_BAR_3: Seg = Seg::new(0x10, 0x80);
pub const X_BAR_4: Seg = Seg::new(0x1F, 0x40);
pub const X_BAR_5: Seg = Seg::new(0x1F, 0x20);
pub const X_BAR_6: Seg = Seg::new(0x1F, 0x10);
pub const X_BAR_BORDER: Seg = Seg::new(0x1F, 0x80);

// X axis readout
pub const X_HUNDREDS: Seg = Seg::new(0x11, 0x80);
pub const X_TENS_A: Seg = Seg::new(0x12, 0x80);
pub const X_TENS_B: Seg = Seg::new(0x12, 0x40);
pub const X_TENS_C: Seg = Seg::new(0x12, 0x20);
pub const X_TENS_D: Seg = Seg::new(0x12, 0x10);
pub const X_TENS_E: Seg = Seg::new(0x11, 0x10);
pub const X_TENS_F: Seg = Seg::new(0x11, 0x40);
pub const X_TENS_G: Seg = Seg::new(0x11, 0x20);
pub const X_ONES_A: Seg = Seg::new(0x14, 0x80);
pub const X_ONES_B: Seg = Seg::new(0x14, 0x40);
pub const X_ONES_C: Seg = Seg::new(0x14, 0x20);
pub const X_ONES_D: Seg = Seg::new(0x14, 0x10);
pub const X_ONES_E: Seg = Seg::new(0x13, 0x10);
pub const X_ONES_F: Seg = Seg::new(0x13, 0x40);
pub const X_ONES_G: Seg = Seg::new(0x13, 0x20);
pub const X_PERCENT: Seg = Seg::new(0x15, 0x20);

// Icons
pub const VIDEO: Seg = Seg::new(0x15, 0x10);
pub const CAMERA: Seg = Seg::new(0x15, 0x40);

// Voltage readout, ones and tenths
pub const VOLT_ONES_A: Seg = Seg::new(0x19, 0x10);
pub const VOLT_ONES_B: Seg = Seg::new(0x18, 0x10);
pub const VOLT_ONES_C: Seg = Seg::new(0x18, 0x40);
pub const VOLT_ONES_D: Seg = Seg::new(0x19, 0x80);
pub const VOLT_ONES_E: Seg = Seg::new(0x19, 0x40);
pub const VOLT_ONES_F: Seg = Seg::new(0x19, 0x20);
pub const VOLT_ONES_G: Seg = Seg::new(0x18, 0x20);
pub const VOLT_DP: Seg = Seg::new(0x18, 0x80);
pub const VOLT_TENTHS_A: Seg = Seg::new(0x17, 0x10);
pub const VOLT_TENTHS_B: Seg = Seg::new(0x16, 0x10);
pub const VOLT_TENTHS_C: Seg = Seg::new(0x16, 0x40);
pub const VOLT_TENTHS_D: Seg = Seg::new(0x17, 0x80);
pub const VOLT_TENTHS_E: Seg = Seg::new(0x17, 0x40);
pub const VOLT_TENTHS_F: Seg = Seg::new(0x17, 0x20);
pub const VOLT_TENTHS_G: Seg = Seg::new(0x16, 0x20);
pub const VOLT_LABEL: Seg = Seg::new(0x16, 0x80);

// Speedometer, left to right
pub const SPEED_0: Seg = Seg::new(0x1B, 0x10);
pub const SPEED_1: Seg = Seg::new(0x1B, 0x20);
pub const SPEED_2: Seg = Seg::new(0x1B, 0x40);
pub const SPEED_3: Seg = Seg::new(0x1B, 0x80);
pub const SPEED_4: Seg = Seg::new(0x1E, 0x80);
pub const SPEED_5: Seg = Seg::new(0x1E, 0x40);
pub const SPEED_6: Seg = Seg::new(0x1E, 0x20);
pub const SPEED_7: Seg = Seg::new(0x1E, 0x10);
pub const SPEED_8: Seg = Seg::new(0x1A, 0x20);
pub const SPEED_9: Seg = Seg::new(0x1A, 0x40);
pub const SPEED_BORDER: Seg = Seg::new(0x1A, 0x10);
pub const SPEED_KMH: Seg = Seg::new(0x1A, 0x80);

// Signal meter, left to right
pub const RADIO_0: Seg = Seg::new(0x1D, 0x40);
pub const RADIO_1: Seg = Seg::new(0x1D, 0x20);
pub const RADIO_2: Seg = Seg::new(0x1D, 0x10);
pub const RADIO_3: Seg = Seg::new(0x1C, 0x10);
pub const RADIO_4: Seg = Seg::new(0x1C, 0x20);
pub const RADIO_MODE1: Seg = Seg::new(0x1C, 0x40);
pub const RADIO_ANTENNA: Seg = Seg::new(0x1D, 0x80);

/// Bar graph cells, in fill order.
pub const Y_BAR: [Seg; 7] = [Y_BAR_0, Y_BAR_1, Y_BAR_2, Y_BAR_3, Y_BAR_4, Y_BAR_5, Y_BAR_6];
pub const X_BAR: [Seg; 7] = [X_BAR_0, X_BAR_1, X_BAR_2, X_BAR_3, X_BAR_4, X_BAR_5, X_BAR_6];
pub const SPEED: [Seg; 10] = [
    SPEED_0, SPEED_1, SPEED_2, SPEED_3, SPEED_4, SPEED_5, SPEED_6, SPEED_7, SPEED_8, SPEED_9,
];
pub const RADIO: [Seg; 5] = [RADIO_0, RADIO_1, RADIO_2, RADIO_3, RADIO_4];

/// Digit positions built from the segments above.
pub mod digits {
    use super::*;

    /// The half digit in front of the Y tens, a single "1" stroke bound to segment C.
    ///
    /// Anything using C lights it, so only values up to 199 read correctly.
    pub const Y_HUNDREDS_DIGIT: Digit = Digit { c: Y_HUNDREDS, ..Digit::NUL };
    pub const Y_TENS: Digit = Digit {
        a: Y_TENS_A, b: Y_TENS_B, c: Y_TENS_C, d: Y_TENS_D, e: Y_TENS_E, f: Y_TENS_F, g: Y_TENS_G,
    };
    pub const Y_ONES: Digit = Digit {
        a: Y_ONES_A, b: Y_ONES_B, c: Y_ONES_C, d: Y_ONES_D, e: Y_ONES_E, f: Y_ONES_F, g: Y_ONES_G,
    };

    /// The half digit in front of the X tens, a single "1" stroke bound to segment C.
    ///
    /// Anything using C lights it, so only values up to 199 read correctly.
    pub const X_HUNDREDS_DIGIT: Digit = Digit { c: X_HUNDREDS, ..Digit::NUL };
    pub const X_TENS: Digit = Digit {
        a: X_TENS_A, b: X_TENS_B, c: X_TENS_C, d: X_TENS_D, e: X_TENS_E, f: X_TENS_F, g: X_TENS_G,
    };
    pub const X_ONES: Digit = Digit {
        a: X_ONES_A, b: X_ONES_B, c: X_ONES_C, d: X_ONES_D, e: X_ONES_E, f: X_ONES_F, g: X_ONES_G,
    };

    pub const VOLT_ONES: Digit = Digit {
        a: VOLT_ONES_A, b: VOLT_ONES_B, c: VOLT_ONES_C, d: VOLT_ONES_D,
        e: VOLT_ONES_E, f: VOLT_ONES_F, g: VOLT_ONES_G,
    };
    pub const VOLT_TENTHS: Digit = Digit {
        a: VOLT_TENTHS_A, b: VOLT_TENTHS_B, c: VOLT_TENTHS_C, d: VOLT_TENTHS_D,
        e: VOLT_TENTHS_E, f: VOLT_TENTHS_F, g: VOLT_TENTHS_G,
    };
}

/// Every named segment of the panel.
pub static SEGMENTS: &[(&str, Seg)] = &[
    ("Y_HUNDREDS", Y_HUNDREDS),
    ("Y_TENS_A", Y_TENS_A),
    ("Y_TENS_B", Y_TENS_B),
    ("Y_TENS_C", Y_TENS_C),
    ("Y_TENS_D", Y_TENS_D),
    ("Y_TENS_E", Y_TENS_E),
    ("Y_TENS_F", Y_TENS_F),
    ("Y_TENS_G", Y_TENS_G),
    ("Y_ONES_A", Y_ONES_A),
    ("Y_ONES_B", Y_ONES_B),
    ("Y_ONES_C", Y_ONES_C),
    ("Y_ONES_D", Y_ONES_D),
    ("Y_ONES_E", Y_ONES_E),
    ("Y_ONES_F", Y_ONES_F),
    ("Y_ONES_G", Y_ONES_G),
    ("Y_PERCENT", Y_PERCENT),
    ("Y_BAR_0", Y_BAR_0),
    ("Y_BAR_1", Y_BAR_1),
    ("Y_BAR_2", Y_BAR_2),
    ("Y_BAR_3", Y_BAR_3),
    ("Y_BAR_4", Y_BAR_4),
    ("Y_BAR_5", Y_BAR_5),
    ("Y_BAR_6", Y_BAR_6),
    ("Y_BAR_BORDER", Y_BAR_BORDER),
    ("X_BAR_0", X_BAR_0),
    ("X_BAR_1", X_BAR_1),
    ("X_BAR_2", X_BAR_2),
    ("X_BAR_3", X_BAR_3),
    ("X_BAR_4", X_BAR_4),
    ("X_BAR_5", X_BAR_5),
    ("X_BAR_6", X_BAR_6),
    ("X_BAR_BORDER", X_BAR_BORDER),
    ("X_HUNDREDS", X_HUNDREDS),
    ("X_TENS_A", X_TENS_A),
    ("X_TENS_B", X_TENS_B),
    ("X_TENS_C", X_TENS_C),
    ("X_TENS_D", X_TENS_D),
    ("X_TENS_E", X_TENS_E),
    ("X_TENS_F", X_TENS_F),
    ("X_TENS_G", X_TENS_G),
    ("X_ONES_A", X_ONES_A),
    ("X_ONES_B", X_ONES_B),
    ("X_ONES_C", X_ONES_C),
    ("X_ONES_D", X_ONES_D),
    ("X_ONES_E", X_ONES_E),
    ("X_ONES_F", X_ONES_F),
    ("X_ONES_G", X_ONES_G),
    ("X_PERCENT", X_PERCENT),
    ("VIDEO", VIDEO),
    ("CAMERA", CAMERA),
    ("VOLT_ONES_A", VOLT_ONES_A),
    ("VOLT_ONES_B", VOLT_ONES_B),
    ("VOLT_ONES_C", VOLT_ONES_C),
    ("VOLT_ONES_D", VOLT_ONES_D),
    ("VOLT_ONES_E", VOLT_ONES_E),
    ("VOLT_ONES_F", VOLT_ONES_F),
    ("VOLT_ONES_G", VOLT_ONES_G),
    ("VOLT_DP", VOLT_DP),
    ("VOLT_TENTHS_A", VOLT_TENTHS_A),
    ("VOLT_TENTHS_B", VOLT_TENTHS_B),
    ("VOLT_TENTHS_C", VOLT_TENTHS_C),
    ("VOLT_TENTHS_D", VOLT_TENTHS_D),
    ("VOLT_TENTHS_E", VOLT_TENTHS_E),
    ("VOLT_TENTHS_F", VOLT_TENTHS_F),
    ("VOLT_TENTHS_G", VOLT_TENTHS_G),
    ("VOLT_LABEL", VOLT_LABEL),
    ("SPEED_0", SPEED_0),
    ("SPEED_1", SPEED_1),
    ("SPEED_2", SPEED_2),
    ("SPEED_3", SPEED_3),
    ("SPEED_4", SPEED_4),
    ("SPEED_5", SPEED_5),
    ("SPEED_6", SPEED_6),
    ("SPEED_7", SPEED_7),
    ("SPEED_8", SPEED_8),
    ("SPEED_9", SPEED_9),
    ("SPEED_BORDER", SPEED_BORDER),
    ("SPEED_KMH", SPEED_KMH),
    ("RADIO_0", RADIO_0),
    ("RADIO_1", RADIO_1),
    ("RADIO_2", RADIO_2),
    ("RADIO_3", RADIO_3),
    ("RADIO_4", RADIO_4),
    ("RADIO_MODE1", RADIO_MODE1),
    ("RADIO_ANTENNA", RADIO_ANTENNA),
];

/// Looks up a segment by its name, e.g. `"VOLT_DP"`.
pub fn by_name(name: &str) -> Option<Seg> {
    SEGMENTS
        .iter()
        .find(|(segment_name, _)| *segment_name == name)
        .map(|&(_, seg)| seg)
}
