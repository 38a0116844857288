//! LED Patterns - ein Frame pro Aufruf
//!
//! Jedes Pattern verändert den übergebenen (aktiven) Pixel-Bereich in-place.
//! Ein leerer Bereich ist immer ein No-Op.

use rgb::RGB8;

use crate::color::{
    BLACK, PARTY_COLORS, add_saturating, fade_to_black_by, from_packed, hsv,
};
use crate::math::{beatsin8, beatsin16};
use crate::random::Rand16;

/// Eingaben für einen Frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameContext {
    /// Rotierender Hue (0-255)
    pub hue: u8,
    /// Grundfarbe `0xRRGGBB`
    pub base_color: u32,
    /// Millisekunden-Uhr für Beat-basierte Patterns
    pub now_ms: u32,
}

/// Gemeinsame Schnittstelle aller Patterns
pub trait PatternRenderer {
    /// Rendert den nächsten Frame in `leds`
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext);
}

/// Höchster Index im Strip als Beat-Obergrenze
fn last_index(leds: &[RGB8]) -> u16 {
    (leds.len() - 1).min(u16::MAX as usize) as u16
}

// ---------------------------------------------------------------------------
// Solid
// ---------------------------------------------------------------------------

/// Alle Pixel in der Grundfarbe
#[derive(Debug, Default, Clone, Copy)]
pub struct Solid;

impl PatternRenderer for Solid {
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext) {
        leds.fill(from_packed(ctx.base_color));
    }
}

// ---------------------------------------------------------------------------
// Rainbow
// ---------------------------------------------------------------------------

/// Regenbogen über den Strip, wandert mit dem Hue
#[derive(Debug, Clone, Copy)]
pub struct Rainbow {
    /// Hue-Abstand zwischen benachbarten Pixeln
    pub delta: u8,
}

impl Default for Rainbow {
    fn default() -> Self {
        Self { delta: 7 }
    }
}

impl PatternRenderer for Rainbow {
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext) {
        // Hue dreht nur der Frame Loop (+1 pro 20 ms), hier kein eigener Tick.
        // Sonst liefe der Regenbogen doppelt so schnell wie die anderen Patterns.
        let mut hue = ctx.hue;
        for led in leds.iter_mut() {
            *led = hsv(hue, 240, 255);
            hue = hue.wrapping_add(self.delta);
        }
    }
}

// ---------------------------------------------------------------------------
// Confetti
// ---------------------------------------------------------------------------

/// Zufällige Farbpunkte, die langsam verblassen
#[derive(Debug, Clone, Copy)]
pub struct Confetti {
    rng: Rand16,
}

impl Confetti {
    const FADE: u8 = 10;
    /// Maximaler zufälliger Hue-Versatz zum rotierenden Hue
    const HUE_SPREAD: u8 = 64;

    pub const fn new(seed: u16) -> Self {
        Self {
            rng: Rand16::new(seed),
        }
    }
}

impl Default for Confetti {
    fn default() -> Self {
        Self {
            rng: Rand16::default(),
        }
    }
}

impl PatternRenderer for Confetti {
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext) {
        if leds.is_empty() {
            return;
        }
        fade_to_black_by(leds, Self::FADE);

        let len = leds.len().min(u16::MAX as usize) as u16;
        let pos = self.rng.random16_lim(len) as usize;
        let hue = ctx
            .hue
            .wrapping_add(self.rng.random8_lim(Self::HUE_SPREAD));
        add_saturating(&mut leds[pos], hsv(hue, 200, 255));
    }
}

// ---------------------------------------------------------------------------
// Sinelon
// ---------------------------------------------------------------------------

/// Ein Punkt pendelt sinusförmig über den Strip und zieht eine Spur
#[derive(Debug, Clone, Copy)]
pub struct Sinelon {
    pub bpm: u16,
}

impl Sinelon {
    const FADE: u8 = 20;
}

impl Default for Sinelon {
    fn default() -> Self {
        Self { bpm: 13 }
    }
}

impl PatternRenderer for Sinelon {
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext) {
        if leds.is_empty() {
            return;
        }
        fade_to_black_by(leds, Self::FADE);

        let pos = beatsin16(self.bpm, 0, last_index(leds), ctx.now_ms) as usize;
        add_saturating(&mut leds[pos], hsv(ctx.hue, 255, 192));
    }
}

// ---------------------------------------------------------------------------
// Bpm
// ---------------------------------------------------------------------------

/// Farbstreifen aus der Party-Palette, pulsierend im Takt
#[derive(Debug, Clone, Copy)]
pub struct Bpm {
    pub bpm: u16,
}

impl Default for Bpm {
    fn default() -> Self {
        Self { bpm: 62 }
    }
}

impl PatternRenderer for Bpm {
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext) {
        let beat = beatsin8(self.bpm, 64, 255, ctx.now_ms);
        for (i, led) in leds.iter_mut().enumerate() {
            let index = ctx.hue.wrapping_add((i * 2) as u8);
            let brightness = beat.wrapping_sub(ctx.hue).wrapping_add((i * 10) as u8);
            *led = PARTY_COLORS.color_at(index, brightness);
        }
    }
}

// ---------------------------------------------------------------------------
// Juggle
// ---------------------------------------------------------------------------

/// Acht Punkte mit eigener Frequenz, Überlappungen mischen sich additiv
#[derive(Debug, Default, Clone, Copy)]
pub struct Juggle;

impl Juggle {
    const FADE: u8 = 20;
    const DOTS: u16 = 8;
    const HUE_STEP: u8 = 32;
}

impl PatternRenderer for Juggle {
    fn render(&mut self, leds: &mut [RGB8], ctx: &FrameContext) {
        if leds.is_empty() {
            return;
        }
        fade_to_black_by(leds, Self::FADE);

        let high = last_index(leds);
        let mut dot_hue: u8 = 0;
        for i in 0..Self::DOTS {
            let pos = beatsin16(i + 7, 0, high, ctx.now_ms) as usize;
            add_saturating(&mut leds[pos], hsv(dot_hue, 200, 255));
            dot_hue = dot_hue.wrapping_add(Self::HUE_STEP);
        }
    }
}

// ---------------------------------------------------------------------------
// Off
// ---------------------------------------------------------------------------

/// Alle Pixel schwarz
#[derive(Debug, Default, Clone, Copy)]
pub struct Off;

impl PatternRenderer for Off {
    fn render(&mut self, leds: &mut [RGB8], _ctx: &FrameContext) {
        leds.fill(BLACK);
    }
}
