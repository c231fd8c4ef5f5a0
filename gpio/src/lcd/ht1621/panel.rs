use log::debug;
use crate::GpioResult;
use crate::lcd::ht1621::SegmentBuffer;
use crate::lcd::ht1621::driver::HT1621Driver;
use crate::lcd::ht1621::segments::Seg;

/// A segment LCD: an [HT1621Driver] together with the local copy of its display RAM.
///
/// Segment changes are buffered. Call [SegmentLcd::flush] to make them visible.
#[derive(Debug)]
pub struct SegmentLcd<'a> {
    driver: &'a mut dyn HT1621Driver,
    buffer: SegmentBuffer,
}

impl<'a> SegmentLcd<'a> {
    pub fn new(driver: &'a mut dyn HT1621Driver) -> Self {
        SegmentLcd {
            driver,
            buffer: SegmentBuffer::new(),
        }
    }

    /// Configures the controller and blanks the whole display.
    pub fn init(&mut self) -> GpioResult<()> {
        self.driver.init()?;
        self.buffer.fill(0);
        self.flush()?;
        debug!("Segment LCD initialized");
        Ok(())
    }

    pub fn buffer(&self) -> &SegmentBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut SegmentBuffer {
        &mut self.buffer
    }

    /// Gets the driver, for commands not wrapped here such as the tone output.
    pub fn driver(&mut self) -> &mut dyn HT1621Driver {
        &mut *self.driver
    }

    pub fn set_seg(&mut self, seg: Seg) {
        self.buffer.set_seg(seg);
    }

    pub fn clear_seg(&mut self, seg: Seg) {
        self.buffer.clear_seg(seg);
    }

    pub fn set_seg_state(&mut self, seg: Seg, on: bool) {
        if on {
            self.buffer.set_seg(seg);
        } else {
            self.buffer.clear_seg(seg);
        }
    }

    /// Lights the first `level` cells of a bar graph and clears the rest.
    pub fn set_bar(&mut self, cells: &[Seg], level: usize) {
        for (i, &cell) in cells.iter().enumerate() {
            self.set_seg_state(cell, i < level);
        }
    }

    /// Writes the whole buffer to the display.
    pub fn flush(&mut self) -> GpioResult<()> {
        self.buffer.flush(&mut *self.driver)
    }

    /// Writes a single nibble straight to the display, bypassing the buffer.
    ///
    /// The buffer is not updated, so the next [SegmentLcd::flush] overwrites this.
    pub fn write_now(&mut self, address: u8, nibble: u8) -> GpioResult<()> {
        self.driver.write_address(address, nibble)
    }

    pub fn display_on(&mut self) -> GpioResult<()> {
        self.driver.lcd_on()
    }

    pub fn display_off(&mut self) -> GpioResult<()> {
        self.driver.lcd_off()
    }

    pub fn backlight_on(&mut self) -> GpioResult<()> {
        self.driver.set_backlight(true)
    }

    pub fn backlight_off(&mut self) -> GpioResult<()> {
        self.driver.set_backlight(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GpioDriver;
    use crate::lcd::ht1621::driver::{GpioHT1621Driver, HT1621Timing};
    use crate::lcd::ht1621::segments::{Y_BAR, Y_BAR_0, Y_BAR_1, Y_BAR_2, Y_ONES_A, Y_PERCENT};
    use crate::trace::{BusLines, Frame, TraceGpioDriver};

    const LINES: BusLines = BusLines { cs: 0, wr: 1, data: 2 };

    fn data_frames(frames: &[Frame]) -> Vec<(u8, u8)> {
        frames
            .iter()
            .filter_map(|frame| match frame {
                Frame::Data { address, nibble } => Some((*address, *nibble)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn init_configures_then_blanks() {
        let gpio = TraceGpioDriver::new(3);
        let mut cs = gpio.get_pin(0).unwrap();
        let mut wr = gpio.get_pin(1).unwrap();
        let mut data = gpio.get_pin(2).unwrap();
        let (cs, wr, data) = (cs.as_output().unwrap(), wr.as_output().unwrap(), data.as_output().unwrap());
        let mut driver = GpioHT1621Driver::new(&*cs, &*wr, &*data).with_timing(HT1621Timing::none());
        let mut lcd = SegmentLcd::new(&mut driver);

        lcd.buffer_mut().fill(0xFF);
        lcd.init().unwrap();

        let frames = gpio.frames(LINES);
        assert_eq!(frames.len(), 6 + 32);
        assert_eq!(frames[0], Frame::Command(0x30));
        assert_eq!(frames[5], Frame::Command(0x06));
        let blank: Vec<(u8, u8)> = (0..32).map(|address| (address, 0)).collect();
        assert_eq!(data_frames(&frames[6..]), blank);
    }

    #[test]
    fn nothing_is_sent_until_flush() {
        let gpio = TraceGpioDriver::new(3);
        let mut cs = gpio.get_pin(0).unwrap();
        let mut wr = gpio.get_pin(1).unwrap();
        let mut data = gpio.get_pin(2).unwrap();
        let (cs, wr, data) = (cs.as_output().unwrap(), wr.as_output().unwrap(), data.as_output().unwrap());
        let mut driver = GpioHT1621Driver::new(&*cs, &*wr, &*data).with_timing(HT1621Timing::none());
        let mut lcd = SegmentLcd::new(&mut driver);

        lcd.set_seg(Y_ONES_A);
        lcd.set_seg(Y_PERCENT);
        lcd.buffer_mut().set_byte(0x1F, 0x5A);
        assert!(gpio.events().is_empty());

        lcd.flush().unwrap();

        let sent = data_frames(&gpio.frames(LINES));
        let expected: Vec<(u8, u8)> = lcd
            .buffer()
            .as_bytes()
            .iter()
            .enumerate()
            .map(|(address, byte)| (address as u8, byte >> 4))
            .collect();
        assert_eq!(sent, expected);
        assert_eq!(sent[0x0D], (0x0D, 0x8));
        assert_eq!(sent[0x0C], (0x0C, 0x8));
        assert_eq!(sent[0x1F], (0x1F, 0x5));
    }

    #[test]
    fn write_now_bypasses_the_buffer() {
        let gpio = TraceGpioDriver::new(3);
        let mut cs = gpio.get_pin(0).unwrap();
        let mut wr = gpio.get_pin(1).unwrap();
        let mut data = gpio.get_pin(2).unwrap();
        let (cs, wr, data) = (cs.as_output().unwrap(), wr.as_output().unwrap(), data.as_output().unwrap());
        let mut driver = GpioHT1621Driver::new(&*cs, &*wr, &*data).with_timing(HT1621Timing::none());
        let mut lcd = SegmentLcd::new(&mut driver);

        lcd.write_now(0x05, 0xF).unwrap();

        assert_eq!(gpio.frames(LINES), vec![Frame::Data { address: 0x05, nibble: 0xF }]);
        assert_eq!(lcd.buffer().byte(0x05), 0);
    }

    #[test]
    fn driver_stays_reachable_for_extra_commands() {
        let gpio = TraceGpioDriver::new(3);
        let mut cs = gpio.get_pin(0).unwrap();
        let mut wr = gpio.get_pin(1).unwrap();
        let mut data = gpio.get_pin(2).unwrap();
        let (cs, wr, data) = (cs.as_output().unwrap(), wr.as_output().unwrap(), data.as_output().unwrap());
        let mut driver = GpioHT1621Driver::new(&*cs, &*wr, &*data).with_timing(HT1621Timing::none());
        let mut lcd = SegmentLcd::new(&mut driver);

        lcd.driver().set_tone(true).unwrap();
        lcd.display_off().unwrap();
        lcd.display_on().unwrap();

        assert_eq!(
            gpio.frames(LINES),
            vec![Frame::Command(0x12), Frame::Command(0x04), Frame::Command(0x06)]
        );
    }

    #[test]
    fn bar_graph_fills_from_the_first_cell() {
        let gpio = TraceGpioDriver::new(3);
        let mut cs = gpio.get_pin(0).unwrap();
        let mut wr = gpio.get_pin(1).unwrap();
        let mut data = gpio.get_pin(2).unwrap();
        let (cs, wr, data) = (cs.as_output().unwrap(), wr.as_output().unwrap(), data.as_output().unwrap());
        let mut driver = GpioHT1621Driver::new(&*cs, &*wr, &*data).with_timing(HT1621Timing::none());
        let mut lcd = SegmentLcd::new(&mut driver);

        lcd.set_bar(&Y_BAR, 7);
        lcd.set_bar(&Y_BAR, 2);

        assert!(lcd.buffer().is_set(Y_BAR_0));
        assert!(lcd.buffer().is_set(Y_BAR_1));
        assert!(!lcd.buffer().is_set(Y_BAR_2));
        assert_eq!(Y_BAR.iter().filter(|&&cell| lcd.buffer().is_set(cell)).count(), 2);
    }
}
