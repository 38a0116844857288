//! Farb-Hilfsfunktionen: HSV, Paletten, Fade und Blending

use rgb::RGB8;
use smart_leds::hsv::{Hsv, hsv2rgb};

use crate::math::{qadd8, scale8};

/// Schwarz (LED aus)
pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// HSV → RGB (alle Werte 0-255)
pub fn hsv(hue: u8, sat: u8, val: u8) -> RGB8 {
    hsv2rgb(Hsv { hue, sat, val })
}

/// Entpackt einen 24-Bit Wert `0xRRGGBB` in RGB8
///
/// Bits oberhalb von 24 werden ignoriert.
pub fn from_packed(value: u32) -> RGB8 {
    RGB8 {
        r: (value >> 16) as u8,
        g: (value >> 8) as u8,
        b: value as u8,
    }
}

/// Skaliert alle Kanäle mit `scale / 256`
pub fn nscale8(color: RGB8, scale: u8) -> RGB8 {
    RGB8 {
        r: scale8(color.r, scale),
        g: scale8(color.g, scale),
        b: scale8(color.b, scale),
    }
}

/// Additives Blending mit Sättigung pro Kanal (kein Wrap-around)
pub fn add_saturating(target: &mut RGB8, color: RGB8) {
    target.r = qadd8(target.r, color.r);
    target.g = qadd8(target.g, color.g);
    target.b = qadd8(target.b, color.b);
}

/// Dunkelt alle Pixel um `amount / 256` Richtung Schwarz ab
pub fn fade_to_black_by(leds: &mut [RGB8], amount: u8) {
    let keep = 255 - amount;
    for led in leds.iter_mut() {
        *led = nscale8(*led, keep);
    }
}

/// Palette mit 16 Stützfarben, dazwischen wird linear interpoliert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette16(pub [RGB8; 16]);

const fn c(value: u32) -> RGB8 {
    RGB8 {
        r: (value >> 16) as u8,
        g: (value >> 8) as u8,
        b: value as u8,
    }
}

/// "Party" Palette: Lila, Rot, Orange, Gelb ohne Grün
pub const PARTY_COLORS: Palette16 = Palette16([
    c(0x5500AB),
    c(0x84007C),
    c(0xB5004B),
    c(0xE5001B),
    c(0xE81700),
    c(0xB84700),
    c(0xAB7700),
    c(0xABAB00),
    c(0xAB5500),
    c(0xDD2200),
    c(0xF2000E),
    c(0xC2003E),
    c(0x8F0071),
    c(0x5F00A1),
    c(0x2F00D0),
    c(0x0007F9),
]);

impl Palette16 {
    /// Farbe an Position `index` (0-255) mit Helligkeit `brightness`
    ///
    /// Obere 4 Bit wählen den Eintrag, untere 4 Bit blenden zum nächsten
    /// (nach Eintrag 15 folgt wieder Eintrag 0).
    pub fn color_at(&self, index: u8, brightness: u8) -> RGB8 {
        let hi4 = (index >> 4) as usize;
        let lo4 = index & 0x0F;

        let mut color = self.0[hi4];
        if lo4 != 0 {
            let next = self.0[(hi4 + 1) % 16];
            let f2 = lo4 << 4;
            let f1 = 255 - f2;
            color = RGB8 {
                r: scale8(color.r, f1) + scale8(next.r, f2),
                g: scale8(color.g, f1) + scale8(next.g, f2),
                b: scale8(color.b, f1) + scale8(next.b, f2),
            };
        }

        match brightness {
            255 => color,
            0 => BLACK,
            b => nscale8(color, b + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_packed_purple() {
        assert_eq!(from_packed(0xFF00FF), RGB8 { r: 255, g: 0, b: 255 });
    }

    #[test]
    fn test_from_packed_ignores_high_byte() {
        assert_eq!(from_packed(0xAB_12_34_56), RGB8 { r: 0x12, g: 0x34, b: 0x56 });
    }

    #[test]
    fn test_add_saturating_clamps() {
        let mut led = RGB8 { r: 250, g: 10, b: 128 };
        add_saturating(&mut led, RGB8 { r: 10, g: 10, b: 200 });
        assert_eq!(led, RGB8 { r: 255, g: 20, b: 255 });
    }

    #[test]
    fn test_fade_to_black_reduces() {
        let mut leds = [RGB8 { r: 200, g: 100, b: 0 }; 3];
        fade_to_black_by(&mut leds, 20);
        for led in leds {
            assert!(led.r < 200);
            assert!(led.g < 100);
            assert_eq!(led.b, 0);
        }
    }

    #[test]
    fn test_fade_repeated_reaches_black() {
        let mut leds = [RGB8 { r: 255, g: 255, b: 255 }];
        for _ in 0..200 {
            fade_to_black_by(&mut leds, 20);
        }
        assert_eq!(leds[0], BLACK);
    }

    #[test]
    fn test_palette_exact_entries() {
        assert_eq!(PARTY_COLORS.color_at(0, 255), c(0x5500AB));
        assert_eq!(PARTY_COLORS.color_at(0x10, 255), c(0x84007C));
        assert_eq!(PARTY_COLORS.color_at(0xF0, 255), c(0x0007F9));
    }

    #[test]
    fn test_palette_zero_brightness_is_black() {
        assert_eq!(PARTY_COLORS.color_at(77, 0), BLACK);
    }

    #[test]
    fn test_hsv_red() {
        assert_eq!(hsv(0, 255, 255), RGB8 { r: 255, g: 0, b: 0 });
    }
}
