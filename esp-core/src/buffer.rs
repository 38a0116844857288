//! Pixel-Buffer mit fester Kapazität und variabler aktiver Länge

use rgb::RGB8;

use crate::color::BLACK;

/// Pixel-Buffer für den LED-Strip
///
/// `N` ist die Compile-Time Kapazität (maximale Anzahl LEDs).
/// Patterns sehen nur den aktiven Bereich `[0, active_len)`.
///
/// Invariante: `active_len <= N`
#[derive(Debug, Clone)]
pub struct PixelBuffer<const N: usize> {
    pixels: [RGB8; N],
    active_len: usize,
}

impl<const N: usize> PixelBuffer<N> {
    /// Erstellt einen schwarzen Buffer, `active_len` wird auf `N` begrenzt
    pub const fn new(active_len: usize) -> Self {
        Self {
            pixels: [BLACK; N],
            active_len: if active_len > N { N } else { active_len },
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn active_len(&self) -> usize {
        self.active_len
    }

    /// Setzt die aktive Länge (begrenzt auf die Kapazität)
    ///
    /// Pixel, die dadurch aus dem aktiven Bereich fallen, werden schwarz,
    /// damit beim nächsten Vergrößern keine alten Farben auftauchen.
    pub fn set_active_len(&mut self, len: usize) -> usize {
        let len = len.min(N);
        if len < self.active_len {
            self.pixels[len..self.active_len].fill(BLACK);
        }
        self.active_len = len;
        len
    }

    /// Aktiver Bereich (nur lesen)
    pub fn active(&self) -> &[RGB8] {
        &self.pixels[..self.active_len]
    }

    /// Aktiver Bereich (für Patterns)
    pub fn active_mut(&mut self) -> &mut [RGB8] {
        &mut self.pixels[..self.active_len]
    }

    /// Setzt den aktiven Bereich auf Schwarz
    pub fn clear(&mut self) {
        self.active_mut().fill(BLACK);
    }
}

impl<const N: usize> Default for PixelBuffer<N> {
    fn default() -> Self {
        Self::new(N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_to_capacity() {
        let buf = PixelBuffer::<8>::new(100);
        assert_eq!(buf.active_len(), 8);
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_set_active_len_blanks_tail() {
        let mut buf = PixelBuffer::<4>::new(4);
        buf.active_mut().fill(RGB8 { r: 1, g: 2, b: 3 });

        assert_eq!(buf.set_active_len(2), 2);
        assert_eq!(buf.active().len(), 2);

        buf.set_active_len(4);
        assert_eq!(buf.active()[1], RGB8 { r: 1, g: 2, b: 3 });
        assert_eq!(buf.active()[2], BLACK);
        assert_eq!(buf.active()[3], BLACK);
    }

    #[test]
    fn test_zero_length_is_empty() {
        let mut buf = PixelBuffer::<4>::new(0);
        assert!(buf.active().is_empty());
        buf.clear();
        assert!(buf.active_mut().is_empty());
    }
}
