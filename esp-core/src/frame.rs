//! Frame Loop Logik
//!
//! Ein Frame: Pattern wählen → in den Pixel-Buffer rendern → an den Strip
//! schreiben. Danach (nach dem Frame-Delay) den Hue weiterdrehen.
//! Das Warten selbst passiert im Firmware-Task.

use rgb::RGB8;

use crate::buffer::PixelBuffer;
use crate::params::{HUE_INTERVAL_MS, HueTicker, Parameters};
use crate::patterns::{
    Bpm, Confetti, FrameContext, Juggle, Off, PatternRenderer, Rainbow, Sinelon, Solid,
};
use crate::traits::{LedError, SmartLedWriter};
use crate::types::Pattern;

/// Frame-Intervall in ms für die gewünschte Framerate (mindestens 1 FPS)
pub const fn frame_interval_ms(frames_per_second: u32) -> u32 {
    let fps = if frames_per_second == 0 {
        1
    } else {
        frames_per_second
    };
    1000 / fps
}

/// Restliche Wartezeit bis zum nächsten Frame (0 wenn der Frame zu lang war)
pub const fn frame_delay_ms(elapsed_ms: u32, interval_ms: u32) -> u32 {
    interval_ms.saturating_sub(elapsed_ms)
}

/// Zustand des Frame Loops: Pixel-Buffer, Pattern-Instanzen, Hue-Timer
pub struct FrameLoop<const N: usize> {
    buffer: PixelBuffer<N>,
    hue_ticker: HueTicker,
    current: Pattern,
    solid: Solid,
    rainbow: Rainbow,
    confetti: Confetti,
    sinelon: Sinelon,
    bpm: Bpm,
    juggle: Juggle,
    off: Off,
}

impl<const N: usize> FrameLoop<N> {
    /// Erstellt den Loop im Startzustand `Solid`
    ///
    /// `seed` initialisiert den Zufallsgenerator für Confetti.
    pub fn new(active_len: usize, seed: u16) -> Self {
        Self {
            buffer: PixelBuffer::new(active_len),
            hue_ticker: HueTicker::new(HUE_INTERVAL_MS, 0),
            current: Pattern::Solid,
            solid: Solid,
            rainbow: Rainbow::default(),
            confetti: Confetti::new(seed),
            sinelon: Sinelon::default(),
            bpm: Bpm::default(),
            juggle: Juggle,
            off: Off,
        }
    }

    /// Zuletzt gerendertes Pattern
    pub fn current(&self) -> Pattern {
        self.current
    }

    pub fn pixels(&self) -> &[RGB8] {
        self.buffer.active()
    }

    pub fn buffer(&self) -> &PixelBuffer<N> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer<N> {
        &mut self.buffer
    }

    /// Rendert einen Frame für das in `params` gewählte Pattern
    ///
    /// Gibt `Some(pattern)` zurück wenn sich das Pattern seit dem letzten
    /// Frame geändert hat.
    pub fn frame(&mut self, params: &Parameters, now_ms: u32) -> Option<Pattern> {
        let pattern = params.pattern();
        let ctx = FrameContext {
            hue: params.hue(),
            base_color: params.base_color(),
            now_ms,
        };
        self.render(pattern, &ctx);

        if pattern != self.current {
            self.current = pattern;
            Some(pattern)
        } else {
            None
        }
    }

    /// Rendert `pattern` direkt (ohne Parameter)
    pub fn render(&mut self, pattern: Pattern, ctx: &FrameContext) {
        let leds = self.buffer.active_mut();
        match pattern {
            Pattern::Solid => self.solid.render(leds, ctx),
            Pattern::Rainbow => self.rainbow.render(leds, ctx),
            Pattern::Confetti => self.confetti.render(leds, ctx),
            Pattern::Sinelon => self.sinelon.render(leds, ctx),
            Pattern::Bpm => self.bpm.render(leds, ctx),
            Pattern::Juggle => self.juggle.render(leds, ctx),
            Pattern::Off => self.off.render(leds, ctx),
        }
    }

    /// Schreibt den aktiven Buffer mit der aktuellen Helligkeit auf den Strip
    pub fn show<L: SmartLedWriter>(&self, led: &mut L, params: &Parameters) -> Result<(), LedError> {
        led.write(self.buffer.active(), params.brightness())
    }

    /// Dreht den Hue weiter wenn das Intervall abgelaufen ist (für jedes Pattern)
    ///
    /// Gibt den neuen Hue zurück, falls er sich geändert hat.
    pub fn tick_hue(&mut self, params: &Parameters, now_ms: u32) -> Option<u8> {
        if self.hue_ticker.poll(now_ms) {
            Some(params.advance_hue())
        } else {
            None
        }
    }
}
