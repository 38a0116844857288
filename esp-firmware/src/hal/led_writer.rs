// Strip Writer: RMT-Ansteuerung des WS2811/WS2812 Strips
//
// Die Patterns rendern mit voller Helligkeit in den Pixel-Buffer.
// Helligkeit, Farbkorrektur und Strom-Budget wendet erst der Writer an.

use esp_core::{LedError, OutputStage, SmartLedWriter};
use rgb::RGB8;

use crate::config::{LED_CORRECTION, MAX_LEDS, MAX_MILLI_AMPS, MAX_VOLTAGE};

/// Output-Stufe mit den Werten aus der Konfiguration
pub const STRIP_OUTPUT: OutputStage = OutputStage::new(LED_CORRECTION, MAX_VOLTAGE, MAX_MILLI_AMPS);

// ============================================================================
// Real Hardware Implementation (nur für ESP32-Target)
// ============================================================================

#[cfg(not(test))]
mod real_impl {
    use super::*;
    use crate::config::RMT_BUFFER_SIZE;
    use esp_hal::Blocking;
    use esp_hal::rmt::Rmt;
    use esp_hal::time::Rate;
    use esp_hal_smartled::SmartLedsAdapter;
    use smart_leds_trait::SmartLedsWrite;

    /// Real Hardware Strip Writer
    ///
    /// Nutzt das RMT Peripheral um den Strip anzusteuern.
    ///
    /// Hinweis: Der Pulse-Buffer muss 'static sein, daher wird er im Task
    /// erstellt und als Parameter übergeben.
    pub struct RmtStripWriter<'a> {
        led: SmartLedsAdapter<'a, RMT_BUFFER_SIZE>,
        output: OutputStage,
        scratch: [RGB8; MAX_LEDS],
    }

    impl<'a> RmtStripWriter<'a> {
        /// Erstellt einen neuen RmtStripWriter
        ///
        /// # Parameter
        /// - `data_pin`: GPIO5 für die Datenleitung
        /// - `rmt_peripheral`: RMT Peripheral
        /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
        /// - `buffer`: Pulse-Buffer (erstellt mit smart_led_buffer!(MAX_LEDS))
        pub fn new(
            data_pin: esp_hal::peripherals::GPIO5<'a>,
            rmt_peripheral: esp_hal::peripherals::RMT<'a>,
            rmt_clock_mhz: u32,
            buffer: &'a mut [esp_hal::rmt::PulseCode; RMT_BUFFER_SIZE],
        ) -> Self {
            let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
                .expect("Failed to initialize RMT");

            let led = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

            Self {
                led,
                output: STRIP_OUTPUT,
                scratch: [RGB8::default(); MAX_LEDS],
            }
        }
    }

    impl SmartLedWriter for RmtStripWriter<'_> {
        fn write(&mut self, pixels: &[RGB8], brightness: u8) -> Result<(), LedError> {
            let count = self.output.apply(pixels, brightness, &mut self.scratch);
            self.led
                .write(self.scratch[..count].iter().copied())
                .map_err(|_| LedError::WriteFailed)
        }
    }
}

#[cfg(not(test))]
pub use real_impl::RmtStripWriter;

// ============================================================================
// Mock Implementation (nur für Tests)
// ============================================================================

/// Merkt sich den zuletzt geschriebenen Frame nach der Output-Stufe
#[cfg(test)]
pub struct MockStripWriter {
    pub last_frame: [RGB8; MAX_LEDS],
    pub last_len: usize,
    pub last_brightness: Option<u8>,
    pub write_count: usize,
    /// Simuliere Fehler beim nächsten write()
    pub fail_next_write: bool,
}

#[cfg(test)]
impl MockStripWriter {
    pub fn new() -> Self {
        Self {
            last_frame: [RGB8::default(); MAX_LEDS],
            last_len: 0,
            last_brightness: None,
            write_count: 0,
            fail_next_write: false,
        }
    }

    pub fn frame(&self) -> &[RGB8] {
        &self.last_frame[..self.last_len]
    }
}

#[cfg(test)]
impl SmartLedWriter for MockStripWriter {
    fn write(&mut self, pixels: &[RGB8], brightness: u8) -> Result<(), LedError> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(LedError::WriteFailed);
        }

        self.last_len = STRIP_OUTPUT.apply(pixels, brightness, &mut self.last_frame);
        self.last_brightness = Some(brightness);
        self.write_count += 1;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_strip_writer_write() {
        let mut mock = MockStripWriter::new();
        let pixels = [RGB8 { r: 255, g: 0, b: 0 }; 4];

        mock.write(&pixels, 255).unwrap();

        assert_eq!(mock.write_count, 1);
        assert_eq!(mock.frame().len(), 4);
        assert_eq!(mock.last_brightness, Some(255));
        assert!(mock.frame()[0].r > 0);
    }

    #[test]
    fn test_mock_strip_writer_zero_brightness() {
        let mut mock = MockStripWriter::new();
        mock.write(&[RGB8 { r: 255, g: 255, b: 255 }; 4], 0).unwrap();
        assert!(mock.frame().iter().all(|c| *c == RGB8::default()));
    }

    #[test]
    fn test_mock_strip_writer_fail() {
        let mut mock = MockStripWriter::new();
        mock.fail_next_write = true;

        let result = mock.write(&[RGB8::default()], 50);
        assert_eq!(result, Err(LedError::WriteFailed));
        assert_eq!(mock.write_count, 0);
        assert_eq!(mock.last_brightness, None);
    }
}
