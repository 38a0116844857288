//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen zu LED-Hardware und BLE-Stack
//! ohne konkrete Implementierung.

use rgb::RGB8;

use crate::types::{AppliedUpdate, Endpoint, UpdateError};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Trait für SmartLED Strip-Zugriff
///
/// Abstrahiert den Zugriff auf adressierbare RGB LEDs (WS2811/WS2812).
/// Helligkeit, Farbkorrektur und Strom-Limit sind Sache des Treibers.
///
/// # Implementierungen
/// - **Production:** RmtStripWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockStripWriter (in-memory Mock)
pub trait SmartLedWriter: Send {
    /// Schreibt einen kompletten Frame auf den Strip
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, pixels: &[RGB8], brightness: u8) -> Result<(), LedError>;
}

/// Callbacks vom BLE-Stack in die Core-Logik
///
/// Der Plattform-Adapter (GATT-Server) ruft diese Methoden auf,
/// die Core-Logik kennt keinen konkreten BLE-Stack.
pub trait StripEvents {
    /// Ein Client hat sich verbunden
    fn on_connect(&self);

    /// Der Client hat die Verbindung getrennt (danach wird wieder advertised)
    fn on_disconnect(&self);

    /// Ein Client hat `payload` auf `endpoint` geschrieben
    ///
    /// Bei Erfolg enthält das Ergebnis den Wert, der als lesbarer
    /// Characteristic-Wert zurückgeschrieben werden soll.
    fn on_write(&self, endpoint: Endpoint, payload: &[u8]) -> Result<AppliedUpdate, UpdateError>;
}
