//! Inbound Update Path - Pure Business Logic
//!
//! BLE-Payload → bereinigter Buffer → Zahl → gemeinsamer Parameter.
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::params::{DEFAULT_BASE_COLOR, DEFAULT_BRIGHTNESS, DEFAULT_PATTERN_INDEX, Parameters};
use crate::traits::StripEvents;
use crate::types::{AppliedUpdate, Endpoint, PAYLOAD_CAPACITY, Payload, UpdateError};

/// Parst eine Ganzzahl wie C `strtol` mit 32-Bit `long`
///
/// - führende Whitespaces werden übersprungen
/// - optionales Vorzeichen `+`/`-`
/// - bei Basis 16 optionales `0x`/`0X` Präfix
/// - Parsen stoppt beim ersten ungültigen Zeichen (auch `\0`)
/// - ohne gültige Ziffer ist das Ergebnis 0
/// - Overflow sättigt auf `i32::MAX` bzw. `i32::MIN`
///
/// `radix` muss in `2..=36` liegen, sonst ist das Ergebnis 0.
///
/// ```
/// # use esp_core::parse_long;
/// assert_eq!(parse_long(b"FF00FF", 16), 0xFF00FF);
/// assert_eq!(parse_long(b"zz", 16), 0);
/// assert_eq!(parse_long(b"17", 8), 15);
/// ```
pub fn parse_long(text: &[u8], radix: u32) -> i32 {
    if !(2..=36).contains(&radix) {
        return 0;
    }

    let mut rest = text;
    while let [b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r', tail @ ..] = rest {
        rest = tail;
    }

    let mut negative = false;
    if let [sign @ (b'+' | b'-'), tail @ ..] = rest {
        negative = *sign == b'-';
        rest = tail;
    }

    if radix == 16 {
        if let [b'0', b'x' | b'X', next, ..] = rest {
            if next.is_ascii_hexdigit() {
                rest = &rest[2..];
            }
        }
    }

    // Grenze für den Betrag: |i32::MIN| ist um eins größer als i32::MAX
    let limit: u64 = if negative {
        i32::MAX as u64 + 1
    } else {
        i32::MAX as u64
    };

    let mut value: u64 = 0;
    let mut overflow = false;
    for &byte in rest {
        let Some(digit) = (byte as char).to_digit(radix) else {
            break;
        };
        if !overflow {
            value = value * radix as u64 + digit as u64;
            if value > limit {
                overflow = true;
            }
        }
    }

    match (overflow, negative) {
        (true, true) => i32::MIN,
        (true, false) => i32::MAX,
        (false, true) => (value as i64).wrapping_neg() as i32,
        (false, false) => value as i32,
    }
}

/// Wendet einen Write auf `endpoint` an
///
/// Leere oder zu lange Payloads ändern nichts. Alles andere wird ohne
/// Bereichsprüfung übernommen: ungültiger Text ergibt 0, zu große Werte
/// werden auf die Feldbreite abgeschnitten.
pub fn apply_write(
    params: &Parameters,
    endpoint: Endpoint,
    raw: &[u8],
) -> Result<AppliedUpdate, UpdateError> {
    let payload = Payload::sanitize(raw)?;
    let parsed = parse_long(payload.as_padded(), endpoint.radix()) as u32;

    let value = match endpoint {
        Endpoint::Color => {
            params.set_base_color(parsed);
            params.base_color()
        }
        Endpoint::Pattern => {
            params.set_pattern_index(parsed as u8);
            params.pattern_index() as u32
        }
        Endpoint::Brightness => {
            params.set_brightness(parsed as u8);
            params.brightness() as u32
        }
    };

    Ok(AppliedUpdate {
        endpoint,
        value,
        payload,
    })
}

/// Formatiert `value` in `radix` als nullgepolsterten Characteristic-Wert
///
/// Großbuchstaben für Ziffern > 9, keine führenden Nullen.
/// `radix` wird auf `2..=36` begrenzt.
pub const fn format_value(value: u32, radix: u32) -> [u8; PAYLOAD_CAPACITY] {
    let radix = if radix < 2 {
        2
    } else if radix > 36 {
        36
    } else {
        radix
    };

    // u32 hat höchstens 32 Ziffern (Basis 2), passt immer in PAYLOAD_CAPACITY
    let mut reversed = [0u8; 32];
    let mut len = 0;
    let mut rest = value;
    loop {
        let digit = (rest % radix) as u8;
        reversed[len] = if digit < 10 {
            b'0' + digit
        } else {
            b'A' + digit - 10
        };
        len += 1;
        rest /= radix;
        if rest == 0 {
            break;
        }
    }

    let mut out = [0u8; PAYLOAD_CAPACITY];
    let mut i = 0;
    while i < len {
        out[i] = reversed[len - 1 - i];
        i += 1;
    }
    out
}

/// Lesbarer Startwert der Color-Characteristic
pub const INITIAL_COLOR_VALUE: [u8; PAYLOAD_CAPACITY] =
    format_value(DEFAULT_BASE_COLOR, Endpoint::Color.radix());

/// Lesbarer Startwert der Pattern-Characteristic
pub const INITIAL_PATTERN_VALUE: [u8; PAYLOAD_CAPACITY] =
    format_value(DEFAULT_PATTERN_INDEX as u32, Endpoint::Pattern.radix());

/// Lesbarer Startwert der Brightness-Characteristic
pub const INITIAL_BRIGHTNESS_VALUE: [u8; PAYLOAD_CAPACITY] =
    format_value(DEFAULT_BRIGHTNESS as u32, Endpoint::Brightness.radix());

impl StripEvents for Parameters {
    fn on_connect(&self) {
        self.set_connected(true);
        self.count_connection();
    }

    fn on_disconnect(&self) {
        self.set_connected(false);
    }

    fn on_write(&self, endpoint: Endpoint, payload: &[u8]) -> Result<AppliedUpdate, UpdateError> {
        apply_write(self, endpoint, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::pad_payload;
    use crate::types::Pattern;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_long(b"FF00FF", 16), 0xFF00FF);
        assert_eq!(parse_long(b"ff00ff", 16), 0xFF00FF);
    }

    #[test]
    fn test_parse_hex_prefix() {
        assert_eq!(parse_long(b"0x00FF00", 16), 0x00FF00);
        // "0x" ohne Hex-Ziffer danach: nur die 0 wird gelesen
        assert_eq!(parse_long(b"0xZ", 16), 0);
    }

    #[test]
    fn test_parse_octal() {
        assert_eq!(parse_long(b"2", 8), 2);
        assert_eq!(parse_long(b"10", 8), 8);
        // 8 ist keine Oktal-Ziffer
        assert_eq!(parse_long(b"8", 8), 0);
        assert_eq!(parse_long(b"18", 8), 1);
    }

    #[test]
    fn test_parse_stops_at_nul_padding() {
        let mut buf = [0u8; 10];
        buf[..2].copy_from_slice(b"3A");
        assert_eq!(parse_long(&buf, 16), 0x3A);
    }

    #[test]
    fn test_parse_whitespace_and_sign() {
        assert_eq!(parse_long(b"  \t42", 16), 0x42);
        assert_eq!(parse_long(b"-1", 8), -1);
        assert_eq!(parse_long(b"+7", 8), 7);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_long(b"zz", 16), 0);
        assert_eq!(parse_long(b"", 8), 0);
        assert_eq!(parse_long(b"-", 8), 0);
    }

    #[test]
    fn test_parse_saturates() {
        assert_eq!(parse_long(b"FFFFFFFFFF", 16), i32::MAX);
        assert_eq!(parse_long(b"-FFFFFFFFFF", 16), i32::MIN);
        assert_eq!(parse_long(b"-80000000", 16), i32::MIN);
    }

    #[test]
    fn test_parse_invalid_radix() {
        assert_eq!(parse_long(b"11", 1), 0);
        assert_eq!(parse_long(b"11", 37), 0);
    }

    #[test]
    fn test_apply_color_write() {
        let params = Parameters::new();
        params.set_base_color(0);
        let update = apply_write(&params, Endpoint::Color, b"FF00FF").unwrap();
        assert_eq!(params.base_color(), 0xFF00FF);
        assert_eq!(update.value, 0xFF00FF);
        assert_eq!(&update.payload.as_padded()[..6], b"FF00FF");
    }

    #[test]
    fn test_apply_pattern_write() {
        let params = Parameters::new();
        apply_write(&params, Endpoint::Pattern, b"3").unwrap();
        assert_eq!(params.pattern(), Pattern::Sinelon);
    }

    #[test]
    fn test_apply_negative_pattern_wraps_to_off() {
        let params = Parameters::new();
        let update = apply_write(&params, Endpoint::Pattern, b"-1").unwrap();
        assert_eq!(update.value, 255);
        assert_eq!(params.pattern(), Pattern::Off);
    }

    #[test]
    fn test_apply_brightness_write() {
        let params = Parameters::new();
        apply_write(&params, Endpoint::Brightness, b"377").unwrap();
        assert_eq!(params.brightness(), 255);
    }

    #[test]
    fn test_apply_empty_leaves_state() {
        let params = Parameters::new();
        params.set_pattern_index(3);
        assert_eq!(
            apply_write(&params, Endpoint::Pattern, b""),
            Err(UpdateError::EmptyPayload)
        );
        assert_eq!(params.pattern_index(), 3);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0, 8), pad_payload(b"0"));
        assert_eq!(format_value(50, 8), pad_payload(b"62"));
        assert_eq!(format_value(0xFF00FF, 16), pad_payload(b"FF00FF"));
        assert_eq!(format_value(u32::MAX, 2), pad_payload(&[b'1'; 32]));
    }

    #[test]
    fn test_initial_values_parse_back_to_defaults() {
        let params = Parameters::new();
        assert_eq!(
            parse_long(&INITIAL_COLOR_VALUE, Endpoint::Color.radix()) as u32,
            params.base_color()
        );
        assert_eq!(
            parse_long(&INITIAL_PATTERN_VALUE, Endpoint::Pattern.radix()) as u8,
            params.pattern_index()
        );
        assert_eq!(
            parse_long(&INITIAL_BRIGHTNESS_VALUE, Endpoint::Brightness.radix()) as u8,
            params.brightness()
        );
    }

    #[test]
    fn test_strip_events_connection_flag() {
        let params = Parameters::new();
        params.on_connect();
        assert!(params.is_connected());
        assert_eq!(params.connection_count(), 1);
        params.on_disconnect();
        assert!(!params.is_connected());
        params.on_connect();
        assert_eq!(params.connection_count(), 2);
    }
}
