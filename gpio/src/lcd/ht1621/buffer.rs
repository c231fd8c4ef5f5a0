use log::trace;
use crate::GpioResult;
use crate::lcd::ht1621::driver::HT1621Driver;
use crate::lcd::ht1621::segments::Seg;

/// Number of addresses in the HT1621 display RAM.
pub const SEGMENT_BUFFER_LEN: usize = 32;

/// Local copy of the HT1621 display RAM.
///
/// One byte per address, of which only the top nibble (`0xF0`) is ever sent to the controller.
/// Every mutation is memory-only; nothing reaches the display until [SegmentBuffer::flush].
///
/// Addresses past the end of the buffer are silently ignored by every method.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SegmentBuffer {
    data: [u8; SEGMENT_BUFFER_LEN],
}

impl SegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets every byte of the buffer to `value`.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Gets the byte at `address`, or `0` if the address is out of range.
    pub fn byte(&self, address: u8) -> u8 {
        self.data.get(address as usize).copied().unwrap_or(0)
    }

    pub fn set_byte(&mut self, address: u8, value: u8) {
        if let Some(byte) = self.data.get_mut(address as usize) {
            *byte = value;
        }
    }

    /// ORs `mask` into the byte at `address`. Bits that are clear in `mask` are left as they are.
    pub fn set_bits(&mut self, address: u8, mask: u8) {
        if let Some(byte) = self.data.get_mut(address as usize) {
            *byte |= mask;
        }
    }

    /// Clears the bits set in `mask` from the byte at `address`.
    pub fn clear_bits(&mut self, address: u8, mask: u8) {
        if let Some(byte) = self.data.get_mut(address as usize) {
            *byte &= !mask;
        }
    }

    /// Turns the segment on.
    pub fn set_seg(&mut self, seg: Seg) {
        self.set_bits(seg.address, seg.mask);
    }

    /// Turns the segment off.
    pub fn clear_seg(&mut self, seg: Seg) {
        self.clear_bits(seg.address, seg.mask);
    }

    pub fn is_set(&self, seg: Seg) -> bool {
        !seg.is_nul() && self.byte(seg.address) & seg.mask == seg.mask
    }

    pub fn as_bytes(&self) -> &[u8; SEGMENT_BUFFER_LEN] {
        &self.data
    }

    /// Writes the whole buffer to the controller, one data frame per address in ascending order.
    pub fn flush(&self, driver: &mut dyn HT1621Driver) -> GpioResult<()> {
        trace!("Flushing {:02x?}", self.data);
        for (address, byte) in self.data.iter().enumerate() {
            driver.write_address(address as u8, byte >> 4)?;
        }
        Ok(())
    }
}
