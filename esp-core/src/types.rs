//! Core Types für die LED-Strip Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Maximale Länge eines BLE-Payloads (Bytes)
///
/// Der lesbare Characteristic-Wert ist immer genau so lang,
/// ungenutzte Bytes sind 0.
pub const PAYLOAD_CAPACITY: usize = 50;

/// Patterns, die der Frame Loop rendern kann
///
/// Indizes 0-4 sind über BLE wählbar, jeder andere Index wird zu `Off`.
/// `Juggle` hat keinen BLE-Index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    Solid,
    Rainbow,
    Confetti,
    Sinelon,
    Bpm,
    Juggle,
    Off,
}

impl Pattern {
    /// Index → Pattern, unbekannte Indizes ergeben `Off`
    pub const fn from_index(index: u8) -> Self {
        match index {
            0 => Self::Solid,
            1 => Self::Rainbow,
            2 => Self::Confetti,
            3 => Self::Sinelon,
            4 => Self::Bpm,
            _ => Self::Off,
        }
    }

    /// BLE-Index des Patterns (`None` für Patterns ohne Index)
    pub const fn index(self) -> Option<u8> {
        match self {
            Self::Solid => Some(0),
            Self::Rainbow => Some(1),
            Self::Confetti => Some(2),
            Self::Sinelon => Some(3),
            Self::Bpm => Some(4),
            Self::Juggle | Self::Off => None,
        }
    }
}

/// Beschreibbare BLE-Endpunkte (Characteristics)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    /// Grundfarbe als Hex-Text, z.B. "FF00FF"
    Color,
    /// Pattern-Index als Oktal-Text
    Pattern,
    /// Globale Helligkeit als Oktal-Text
    Brightness,
}

impl Endpoint {
    /// Zahlenbasis für das Parsen des Payloads
    pub const fn radix(self) -> u32 {
        match self {
            Self::Color => 16,
            Self::Pattern | Self::Brightness => 8,
        }
    }

    /// 16-Bit UUID der Characteristic
    pub const fn uuid(self) -> u16 {
        match self {
            Self::Color => 0x1A00,
            Self::Pattern => 0x1A01,
            Self::Brightness => 0x1A02,
        }
    }

    /// Text für den User-Description Descriptor
    pub const fn description(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Pattern => "Pattern",
            Self::Brightness => "Brightness",
        }
    }
}

/// Fehler im Inbound Update Path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateError {
    /// Leerer Payload, wird verworfen
    EmptyPayload,
    /// Payload größer als [`PAYLOAD_CAPACITY`]
    PayloadTooLong { len: usize },
}

/// Bereinigter Payload: empfangene Bytes, Rest mit 0 aufgefüllt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    bytes: [u8; PAYLOAD_CAPACITY],
    len: usize,
}

impl Payload {
    /// Kopiert `raw` in einen genullten Buffer fester Größe
    pub fn sanitize(raw: &[u8]) -> Result<Self, UpdateError> {
        if raw.is_empty() {
            return Err(UpdateError::EmptyPayload);
        }
        if raw.len() > PAYLOAD_CAPACITY {
            return Err(UpdateError::PayloadTooLong { len: raw.len() });
        }

        let mut bytes = [0u8; PAYLOAD_CAPACITY];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self {
            bytes,
            len: raw.len(),
        })
    }

    /// Empfangene Bytes ohne Padding
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Kompletter Buffer inkl. Null-Padding (Wert für BLE-Read)
    pub fn as_padded(&self) -> &[u8; PAYLOAD_CAPACITY] {
        &self.bytes
    }

    /// Payload als Text, `"?"` wenn kein gültiges UTF-8
    pub fn text(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Erzeugt einen genullten Characteristic-Wert aus Text (für Initialwerte)
///
/// Zu lange Eingaben werden abgeschnitten.
pub const fn pad_payload(text: &[u8]) -> [u8; PAYLOAD_CAPACITY] {
    let mut out = [0u8; PAYLOAD_CAPACITY];
    let mut i = 0;
    while i < text.len() && i < PAYLOAD_CAPACITY {
        out[i] = text[i];
        i += 1;
    }
    out
}

/// Ergebnis eines angenommenen Writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedUpdate {
    pub endpoint: Endpoint,
    /// Gespeicherter Wert nach Abschneiden auf die Feldbreite
    pub value: u32,
    /// Wert, der als Characteristic zurückgeschrieben wird
    pub payload: Payload,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Payload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Payload {{ text: {}, len: {} }}", self.text(), self.len)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for AppliedUpdate {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "AppliedUpdate {{ endpoint: {}, text: {}, value: {:#x} }}",
            self.endpoint,
            self.payload.text(),
            self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_from_index_known() {
        assert_eq!(Pattern::from_index(0), Pattern::Solid);
        assert_eq!(Pattern::from_index(2), Pattern::Confetti);
        assert_eq!(Pattern::from_index(4), Pattern::Bpm);
    }

    #[test]
    fn test_pattern_from_index_unknown_is_off() {
        for index in 5..=255u8 {
            assert_eq!(Pattern::from_index(index), Pattern::Off);
        }
    }

    #[test]
    fn test_pattern_index_roundtrip() {
        for index in 0..5u8 {
            assert_eq!(Pattern::from_index(index).index(), Some(index));
        }
        assert_eq!(Pattern::Juggle.index(), None);
    }

    #[test]
    fn test_sanitize_pads_with_zero() {
        let payload = Payload::sanitize(b"FF00FF").unwrap();
        assert_eq!(payload.as_bytes(), b"FF00FF");
        assert_eq!(&payload.as_padded()[..6], b"FF00FF");
        assert!(payload.as_padded()[6..].iter().all(|&b| b == 0));
        assert_eq!(payload.text(), "FF00FF");
    }

    #[test]
    fn test_sanitize_rejects_empty() {
        assert_eq!(Payload::sanitize(b""), Err(UpdateError::EmptyPayload));
    }

    #[test]
    fn test_sanitize_rejects_oversized() {
        let raw = [b'1'; PAYLOAD_CAPACITY + 1];
        assert_eq!(
            Payload::sanitize(&raw),
            Err(UpdateError::PayloadTooLong {
                len: PAYLOAD_CAPACITY + 1
            })
        );
    }

    #[test]
    fn test_sanitize_accepts_full_capacity() {
        let raw = [b'7'; PAYLOAD_CAPACITY];
        let payload = Payload::sanitize(&raw).unwrap();
        assert_eq!(payload.len(), PAYLOAD_CAPACITY);
    }

    #[test]
    fn test_pad_payload_const() {
        const DEFAULT: [u8; PAYLOAD_CAPACITY] = pad_payload(b"FF00FF");
        assert_eq!(&DEFAULT[..6], b"FF00FF");
        assert_eq!(DEFAULT[6], 0);
    }

    #[test]
    fn test_endpoint_radix() {
        assert_eq!(Endpoint::Color.radix(), 16);
        assert_eq!(Endpoint::Pattern.radix(), 8);
        assert_eq!(Endpoint::Brightness.radix(), 8);
    }
}
