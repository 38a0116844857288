//! Gemeinsame Parameter zwischen BLE-Callbacks und Frame Loop
//!
//! Alle Felder sind einzelne Atomics: jeder Wert wird als Ganzes ersetzt,
//! es gibt keine Invarianten über mehrere Felder. Deshalb reicht
//! `Ordering::Relaxed` und es braucht keinen Mutex.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::types::Pattern;

/// Startfarbe für `Solid` (Lila)
pub const DEFAULT_BASE_COLOR: u32 = 0xFF00FF;

/// Start-Pattern (`Solid`)
pub const DEFAULT_PATTERN_INDEX: u8 = 0;

/// Start-Helligkeit (0-255)
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Intervall für das automatische Weiterdrehen des Hue
pub const HUE_INTERVAL_MS: u32 = 20;

/// Prozessweite, veränderbare Parameter
///
/// Wird einmal statisch angelegt und per `&'static` an alle Tasks verteilt.
pub struct Parameters {
    pattern_index: AtomicU8,
    base_color: AtomicU32,
    hue: AtomicU8,
    brightness: AtomicU8,
    connected: AtomicBool,
    connections: AtomicU32,
}

impl Parameters {
    pub const fn new() -> Self {
        Self {
            pattern_index: AtomicU8::new(DEFAULT_PATTERN_INDEX),
            base_color: AtomicU32::new(DEFAULT_BASE_COLOR),
            hue: AtomicU8::new(0),
            brightness: AtomicU8::new(DEFAULT_BRIGHTNESS),
            connected: AtomicBool::new(false),
            connections: AtomicU32::new(0),
        }
    }

    /// Roher Pattern-Index wie über BLE geschrieben
    pub fn pattern_index(&self) -> u8 {
        self.pattern_index.load(Ordering::Relaxed)
    }

    /// Aktives Pattern (unbekannte Indizes → `Off`)
    pub fn pattern(&self) -> Pattern {
        Pattern::from_index(self.pattern_index())
    }

    pub fn set_pattern_index(&self, index: u8) {
        self.pattern_index.store(index, Ordering::Relaxed);
    }

    /// Grundfarbe als `0xRRGGBB`
    pub fn base_color(&self) -> u32 {
        self.base_color.load(Ordering::Relaxed)
    }

    /// Speichert nur die unteren 24 Bit
    pub fn set_base_color(&self, color: u32) {
        self.base_color.store(color & 0x00FF_FFFF, Ordering::Relaxed);
    }

    pub fn hue(&self) -> u8 {
        self.hue.load(Ordering::Relaxed)
    }

    pub fn set_hue(&self, hue: u8) {
        self.hue.store(hue, Ordering::Relaxed);
    }

    /// Hue + 1 (mod 256), gibt den neuen Wert zurück
    pub fn advance_hue(&self) -> u8 {
        self.hue.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    pub fn set_brightness(&self, brightness: u8) {
        self.brightness.store(brightness, Ordering::Relaxed);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::Relaxed);
    }

    /// Anzahl bisheriger Verbindungen seit Start
    pub fn connection_count(&self) -> u32 {
        self.connections.load(Ordering::Relaxed)
    }

    pub(crate) fn count_connection(&self) -> u32 {
        self.connections.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new()
    }
}

/// Feuert höchstens einmal pro `period_ms`, unabhängig von der Framerate
///
/// Verpasste Perioden werden nicht nachgeholt.
#[derive(Debug, Clone, Copy)]
pub struct HueTicker {
    period_ms: u32,
    last_ms: u32,
}

impl HueTicker {
    pub const fn new(period_ms: u32, now_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: now_ms,
        }
    }

    /// `true` wenn seit dem letzten Auslösen mindestens eine Periode vergangen ist
    pub fn poll(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.last_ms) >= self.period_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

impl Default for HueTicker {
    fn default() -> Self {
        Self::new(HUE_INTERVAL_MS, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = Parameters::new();
        assert_eq!(params.pattern(), Pattern::Solid);
        assert_eq!(params.base_color(), 0xFF00FF);
        assert_eq!(params.hue(), 0);
        assert_eq!(params.brightness(), DEFAULT_BRIGHTNESS);
        assert!(!params.is_connected());
    }

    #[test]
    fn test_hue_wraps() {
        let params = Parameters::new();
        params.set_hue(255);
        assert_eq!(params.advance_hue(), 0);
        assert_eq!(params.hue(), 0);
    }

    #[test]
    fn test_base_color_truncated_to_24_bit() {
        let params = Parameters::new();
        params.set_base_color(0x7FFF_FFFF);
        assert_eq!(params.base_color(), 0x00FF_FFFF);
    }

    #[test]
    fn test_unknown_pattern_index_maps_to_off() {
        let params = Parameters::new();
        params.set_pattern_index(9);
        assert_eq!(params.pattern_index(), 9);
        assert_eq!(params.pattern(), Pattern::Off);
    }

    #[test]
    fn test_ticker_fires_once_per_period() {
        let mut ticker = HueTicker::new(20, 0);
        assert!(!ticker.poll(5));
        assert!(!ticker.poll(19));
        assert!(ticker.poll(20));
        assert!(!ticker.poll(21));
        assert!(ticker.poll(45));
    }

    #[test]
    fn test_ticker_does_not_catch_up() {
        let mut ticker = HueTicker::new(20, 0);
        assert!(ticker.poll(1000));
        assert!(!ticker.poll(1001));
    }

    #[test]
    fn test_ticker_survives_clock_wrap() {
        let mut ticker = HueTicker::new(20, u32::MAX - 5);
        assert!(ticker.poll(15));
    }
}
