//! Festkomma-Mathematik für Patterns
//!
//! 8/16-Bit Skalierung, Sinus-Näherungen und Beat-Generatoren.
//! Alle Funktionen arbeiten ohne Float und sind für jeden Eingabewert
//! definiert (kein Overflow, kein Panic).

/// Skaliert `value` mit `scale / 256`.
///
/// `scale8(x, 255) == x` für alle `x`.
pub fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// 16-Bit Variante von [`scale8`].
pub fn scale16(value: u16, scale: u16) -> u16 {
    ((value as u32 * (1 + scale as u32)) >> 16) as u16
}

/// Addition mit Sättigung bei 255
pub fn qadd8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Sinus-Näherung auf 8 Bit
///
/// Eingabe: 0..=255 entspricht 0..2π. Ausgabe: 0..=255, Mittelwert 128.
pub fn sin8(theta: u8) -> u8 {
    // Stützstellen (Basis, Steigung) je Viertel-Quadrant
    const B_M16: [u8; 8] = [0, 49, 49, 41, 90, 27, 117, 10];

    let mut offset = theta;
    if theta & 0x40 != 0 {
        offset = 255 - offset;
    }
    offset &= 0x3F;

    let mut secoffset = offset & 0x0F;
    if theta & 0x40 != 0 {
        secoffset += 1;
    }

    let section = (offset >> 4) as usize;
    let b = B_M16[section * 2];
    let m16 = B_M16[section * 2 + 1];

    let mx = ((m16 as u16 * secoffset as u16) >> 4) as u8;
    let mut y = mx.wrapping_add(b) as i8;
    if theta & 0x80 != 0 {
        y = y.wrapping_neg();
    }
    (y as i16 + 128) as u8
}

/// Sinus-Näherung auf 16 Bit
///
/// Eingabe: 0..=65535 entspricht 0..2π. Ausgabe: -32767..=32767.
pub fn sin16(theta: u16) -> i16 {
    const BASE: [u16; 8] = [0, 6393, 12539, 18204, 23170, 27245, 30273, 32137];
    const SLOPE: [u8; 8] = [49, 48, 44, 38, 31, 23, 14, 4];

    let mut offset = (theta & 0x3FFF) >> 3;
    if theta & 0x4000 != 0 {
        offset = 2047 - offset;
    }

    let section = (offset / 256) as usize;
    let secoffset8 = (offset as u8) / 2;
    let mx = SLOPE[section] as u16 * secoffset8 as u16;
    let y = (mx + BASE[section]) as i16;

    if theta & 0x8000 != 0 { -y } else { y }
}

/// Sägezahn mit `bpm88` (BPM im Q8.8 Format), läuft einmal pro Beat über 0..=65535
pub fn beat88(bpm88: u16, now_ms: u32) -> u16 {
    (now_ms.wrapping_mul(bpm88 as u32).wrapping_mul(280) >> 16) as u16
}

/// Sägezahn mit ganzzahligen BPM (Werte < 256 werden als Q8.8 interpretiert)
pub fn beat16(bpm: u16, now_ms: u32) -> u16 {
    let bpm88 = if bpm < 256 { bpm << 8 } else { bpm };
    beat88(bpm88, now_ms)
}

/// 8-Bit Sägezahn mit ganzzahligen BPM
pub fn beat8(bpm: u16, now_ms: u32) -> u8 {
    (beat16(bpm, now_ms) >> 8) as u8
}

/// Sinus-Welle mit `bpm`, skaliert auf `low..=high`
pub fn beatsin16(bpm: u16, low: u16, high: u16, now_ms: u32) -> u16 {
    let beat = beat16(bpm, now_ms);
    let beatsin = (sin16(beat) as i32 + 32768) as u16;
    let range = high.saturating_sub(low);
    low + scale16(beatsin, range)
}

/// 8-Bit Variante von [`beatsin16`]
pub fn beatsin8(bpm: u16, low: u8, high: u8, now_ms: u32) -> u8 {
    let beat = beat8(bpm, now_ms);
    let range = high.saturating_sub(low);
    low + scale8(sin8(beat), range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale8_identity_at_full_scale() {
        for v in 0..=255u8 {
            assert_eq!(scale8(v, 255), v);
        }
    }

    #[test]
    fn test_scale8_zero_scale() {
        assert_eq!(scale8(255, 0), 0);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_qadd8_saturates() {
        assert_eq!(qadd8(200, 100), 255);
        assert_eq!(qadd8(10, 20), 30);
    }

    #[test]
    fn test_sin8_key_points() {
        assert_eq!(sin8(0), 128);
        assert_eq!(sin8(64), 255);
        assert_eq!(sin8(128), 128);
        assert_eq!(sin8(192), 1);
    }

    #[test]
    fn test_sin16_key_points() {
        assert_eq!(sin16(0), 0);
        assert!(sin16(16384) > 32000);
        assert!(sin16(49152) < -32000);
    }

    #[test]
    fn test_beat16_advances_with_time() {
        assert_eq!(beat16(60, 0), 0);
        // 60 BPM → ein voller Durchlauf pro Sekunde
        let quarter = beat16(60, 250);
        assert!(quarter > 16000 && quarter < 17000);
    }

    #[test]
    fn test_beatsin16_stays_in_range() {
        for t in (0..20_000u32).step_by(7) {
            let v = beatsin16(13, 0, 31, t);
            assert!(v <= 31);
        }
    }

    #[test]
    fn test_beatsin16_degenerate_range() {
        for t in (0..5_000u32).step_by(13) {
            assert_eq!(beatsin16(7, 0, 0, t), 0);
        }
    }

    #[test]
    fn test_beatsin8_stays_in_range() {
        for t in (0..20_000u32).step_by(11) {
            let v = beatsin8(62, 64, 255, t);
            assert!(v >= 64);
        }
    }
}
