//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Patterns, Frame Loop, BLE-Update-Logik und Output-Stufe sind
//! Pure Functions und laufen auch auf dem Host (Tests).

#![no_std]

pub mod buffer;
pub mod color;
pub mod frame;
pub mod logic;
pub mod math;
pub mod output;
pub mod params;
pub mod patterns;
pub mod random;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use buffer::PixelBuffer;
pub use frame::{FrameLoop, frame_delay_ms, frame_interval_ms};
pub use logic::{
    INITIAL_BRIGHTNESS_VALUE, INITIAL_COLOR_VALUE, INITIAL_PATTERN_VALUE, apply_write,
    format_value, parse_long,
};
pub use output::{OutputStage, TYPICAL_LED_STRIP};
pub use params::{
    DEFAULT_BASE_COLOR, DEFAULT_BRIGHTNESS, DEFAULT_PATTERN_INDEX, HUE_INTERVAL_MS, HueTicker,
    Parameters,
};
pub use patterns::{FrameContext, PatternRenderer};
pub use traits::{LedError, SmartLedWriter, StripEvents};
pub use types::{AppliedUpdate, Endpoint, PAYLOAD_CAPACITY, Pattern, Payload, UpdateError, pad_payload};
