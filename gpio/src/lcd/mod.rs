//! Segment LCD support: the HT1621 controller and seven-segment text rendering on top of it.

pub mod ht1621;
pub mod sevseg;
