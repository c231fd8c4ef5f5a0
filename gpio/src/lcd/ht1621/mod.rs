//! HT1621 segment LCD module.
//!
//! - [driver] speaks the 3-wire protocol of the controller,
//! - [SegmentBuffer] mirrors its display RAM,
//! - [segments] maps the panel's segments to that RAM,
//! - [SegmentLcd] ties a driver and a buffer together.

pub mod driver;
pub mod segments;
mod buffer;
mod panel;

pub use buffer::*;
pub use panel::*;
