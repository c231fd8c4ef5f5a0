//! ASCII to seven-segment patterns.
//!
//! A pattern is 7 bits, `0bABCDEFG`: bit 6 lights segment A, bit 0 lights segment G.

/// Segment patterns indexed by ASCII code.
///
/// Codes 0 to 15 hold the hexadecimal digits, so a raw nibble can be displayed directly.
/// Lowercase letters that look the same as their uppercase form share the pattern. Anything that
/// can't be drawn sensibly on seven segments is blank.
pub const CHARACTER_TABLE: [u8; 128] = [
    // 0x00, hexadecimal digits 0-F
    0b1111110, 0b0110000, 0b1101101, 0b1111001, 0b0110011, 0b1011011, 0b1011111, 0b1110000,
    0b1111111, 0b1111011, 0b1110111, 0b0011111, 0b1001110, 0b0111101, 0b1001111, 0b1000111,
    // 0x10, control codes
    0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0,
    // 0x20  ' '  '!'  '"'        '#'  '$'  '%'  '&'  '\''
    0, 0, 0b0100010, 0, 0, 0, 0, 0b0100000,
    // 0x28  '('        ')'        '*'  '+'  ','        '-'        '.'  '/'
    0b1001110, 0b1111000, 0, 0, 0b0000100, 0b0000001, 0, 0,
    // 0x30, '0'-'7'
    0b1111110, 0b0110000, 0b1101101, 0b1111001, 0b0110011, 0b1011011, 0b1011111, 0b1110000,
    // 0x38  '8'        '9'        ':'  ';'  '<'  '='  '>'  '?'
    0b1111111, 0b1111011, 0, 0, 0, 0, 0, 0,
    // 0x40  '@'  'A'        'B'        'C'        'D'        'E'        'F'        'G'
    0, 0b1110111, 0b0011111, 0b1001110, 0b0111101, 0b1001111, 0b1000111, 0b1011110,
    // 0x48  'H'        'I'        'J'        'K'  'L'        'M'  'N'        'O'
    0b0110111, 0b0110000, 0b0111000, 0, 0b0001110, 0, 0b0010101, 0b1111110,
    // 0x50  'P'        'Q'        'R'        'S'        'T'        'U'        'V'  'W'
    0b1100111, 0b1110011, 0b0000101, 0b1011011, 0b0001111, 0b0111110, 0, 0,
    // 0x58  'X'  'Y'        'Z'  '['        '\\' ']'        '^'  '_'
    0, 0b0111011, 0, 0b1001110, 0, 0b1111000, 0, 0b0001000,
    // 0x60  '`'        'a'        'b'        'c'        'd'        'e'        'f'        'g'
    0b0000010, 0b1110111, 0b0011111, 0b0001101, 0b0111101, 0b1101111, 0b1000111, 0b1011110,
    // 0x68  'h'        'i'        'j'        'k'  'l'        'm'  'n'        'o'
    0b0010111, 0b0010000, 0b0111000, 0, 0b0110000, 0, 0b0010101, 0b0011101,
    // 0x70  'p'        'q'        'r'        's'        't'        'u'        'v'  'w'
    0b1100111, 0b1110011, 0b0000101, 0b1011011, 0b0001111, 0b0011100, 0, 0,
    // 0x78  'x'  'y'        'z'  '{'  '|'  '}'  '~'  DEL
    0, 0b0111011, 0, 0, 0, 0, 0, 0,
];

/// Gets the segment pattern of an ASCII code. Codes above 127 are blank.
pub fn pattern_for_code(code: u8) -> u8 {
    CHARACTER_TABLE.get(code as usize).copied().unwrap_or(0)
}

/// Gets the segment pattern of a character. Non-ASCII characters are blank.
pub fn pattern_for(c: char) -> u8 {
    if c.is_ascii() {
        pattern_for_code(c as u8)
    } else {
        0
    }
}
