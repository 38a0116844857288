// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
//
// Die Datenleitung liegt fest auf GPIO5 (siehe frame_loop_task).

use esp_core::{TYPICAL_LED_STRIP, frame_interval_ms};
use rgb::RGB8;

// ============================================================================
// LED-Strip Konfiguration
// ============================================================================

/// Maximale Anzahl LEDs (Compile-Time Buffer-Größe)
/// Verschiedene Kristalle haben unterschiedlich lange Strips
pub const MAX_LEDS: usize = 32;

/// Aktive LEDs beim Start (≤ MAX_LEDS)
pub const LED_COUNT: usize = MAX_LEDS;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// RMT Pulse-Buffer: 24 Bits pro LED + 1 Reset-Code
pub const RMT_BUFFER_SIZE: usize = MAX_LEDS * 24 + 1;

/// Farbkorrektur des Strips
pub const LED_CORRECTION: RGB8 = TYPICAL_LED_STRIP;

// ============================================================================
// Strom-Budget
// ============================================================================

/// Versorgungsspannung in Volt
pub const MAX_VOLTAGE: u32 = 5;

/// Maximaler Strom in mA
/// Schützt Netzteil und Strip vor zu hoher Last
pub const MAX_MILLI_AMPS: u32 = 1000;

// ============================================================================
// Frame Loop
// ============================================================================

/// Ziel-Framerate
pub const FRAMES_PER_SECOND: u32 = 120;

/// Frame-Intervall in ms (1000 / FPS)
pub const FRAME_INTERVAL_MS: u32 = frame_interval_ms(FRAMES_PER_SECOND);

// ============================================================================
// BLE Konfiguration
// ============================================================================

/// Gerätename beim Advertising
/// Wird zur Build-Zeit aus der Environment Variable BLE_DEVICE_NAME geladen
/// (optional, siehe .env), sonst Default
pub const BLE_DEVICE_NAME: &str = match option_env!("BLE_DEVICE_NAME") {
    Some(name) => name,
    None => "BlackPantherConstume",
};

/// 16-Bit UUID des Strip-Service
pub const STRIP_SERVICE_UUID: u16 = 0x1700;

/// Statische Random-Adresse des Geräts
pub const BLE_ADDRESS: [u8; 6] = [0xff, 0x8f, 0x1a, 0x05, 0xe4, 0xff];

/// Maximale Anzahl gleichzeitiger Verbindungen
pub const BLE_CONNECTIONS_MAX: usize = 1;

/// Maximale Anzahl L2CAP Kanäle (Signal + ATT)
pub const BLE_L2CAP_CHANNELS_MAX: usize = 2;

/// Slots für HCI-Kommandos im Controller
pub const BLE_HCI_SLOTS: usize = 20;

/// Wartezeit nach Advertising-Fehler in ms, bevor erneut advertised wird
pub const BLE_RETRY_DELAY_MS: u64 = 1000;

// ============================================================================
// Heap
// ============================================================================

/// Heap-Größe für den Radio-Treiber (Bytes)
pub const RADIO_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 16384; // 16 KB
