//! Output-Stufe zwischen Pixel-Buffer und Strip
//!
//! Globale Helligkeit, Farbkorrektur und Strom-Budget. Wird vom Treiber
//! angewendet, die Patterns rendern immer mit voller Helligkeit.

use rgb::RGB8;

use crate::math::scale8;

/// Farbkorrektur für typische WS2811/WS2812 Strips (Grün und Blau zu hell)
pub const TYPICAL_LED_STRIP: RGB8 = RGB8 {
    r: 255,
    g: 176,
    b: 240,
};

/// Keine Korrektur
pub const UNCORRECTED: RGB8 = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

// Leistungsmodell pro LED bei 5 V: mA bei voller PWM je Kanal × 5 V
const RED_MW: u32 = 16 * 5;
const GREEN_MW: u32 = 11 * 5;
const BLUE_MW: u32 = 15 * 5;
const DARK_MW: u32 = 5;

/// Helligkeit, Farbkorrektur und Leistungsgrenze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputStage {
    correction: RGB8,
    max_power_mw: u32,
}

impl OutputStage {
    pub const fn new(correction: RGB8, max_volts: u32, max_milliamps: u32) -> Self {
        Self {
            correction,
            max_power_mw: max_volts * max_milliamps,
        }
    }

    pub const fn max_power_mw(&self) -> u32 {
        self.max_power_mw
    }

    /// Geschätzte Leistung in mW bei voller Helligkeit
    pub fn unscaled_power_mw(pixels: &[RGB8]) -> u32 {
        let (mut red, mut green, mut blue) = (0u32, 0u32, 0u32);
        for px in pixels {
            red += px.r as u32;
            green += px.g as u32;
            blue += px.b as u32;
        }
        ((red * RED_MW) >> 8)
            + ((green * GREEN_MW) >> 8)
            + ((blue * BLUE_MW) >> 8)
            + DARK_MW * pixels.len() as u32
    }

    /// Höchste Helligkeit ≤ `target`, bei der das Leistungsbudget hält
    pub fn max_brightness_for_power(&self, pixels: &[RGB8], target: u8) -> u8 {
        let requested_mw = Self::unscaled_power_mw(pixels) * target as u32 / 256;
        if requested_mw <= self.max_power_mw {
            return target;
        }
        (target as u32 * self.max_power_mw / requested_mw) as u8
    }

    /// Skalierung je Kanal aus Korrektur und Helligkeit
    fn adjustment(&self, brightness: u8) -> RGB8 {
        if brightness == 0 {
            return RGB8 { r: 0, g: 0, b: 0 };
        }
        let scale = |corr: u8| ((corr as u32 + 1) * brightness as u32 / 256) as u8;
        RGB8 {
            r: scale(self.correction.r),
            g: scale(self.correction.g),
            b: scale(self.correction.b),
        }
    }

    /// Schreibt `pixels` skaliert nach `out` und gibt die Anzahl geschriebener Pixel zurück
    ///
    /// `brightness` wird zuerst auf das Leistungsbudget begrenzt.
    pub fn apply(&self, pixels: &[RGB8], brightness: u8, out: &mut [RGB8]) -> usize {
        let brightness = self.max_brightness_for_power(pixels, brightness);
        let adj = self.adjustment(brightness);

        let count = pixels.len().min(out.len());
        for (dst, src) in out.iter_mut().zip(pixels) {
            *dst = RGB8 {
                r: scale8(src.r, adj.r),
                g: scale8(src.g, adj.g),
                b: scale8(src.b, adj.b),
            };
        }
        count
    }
}
