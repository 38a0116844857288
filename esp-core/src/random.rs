//! Pseudozufall für Effekte (Confetti)

/// 16-Bit LCG, schnell und deterministisch
///
/// Nicht kryptographisch. Für visuelle Effekte reicht die Verteilung,
/// und ein fester Seed macht Tests reproduzierbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rand16 {
    seed: u16,
}

impl Rand16 {
    const MULTIPLIER: u16 = 2053;
    const INCREMENT: u16 = 13849;

    pub const fn new(seed: u16) -> Self {
        Self { seed }
    }

    fn step(&mut self) -> u16 {
        self.seed = self
            .seed
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.seed
    }

    /// Zufallswert 0..=65535
    pub fn random16(&mut self) -> u16 {
        self.step()
    }

    /// Zufallswert 0..=255 (High- und Low-Byte gemischt)
    pub fn random8(&mut self) -> u8 {
        let s = self.step();
        (s as u8).wrapping_add((s >> 8) as u8)
    }

    /// Zufallswert in `0..lim` (0 wenn `lim == 0`)
    pub fn random8_lim(&mut self, lim: u8) -> u8 {
        ((self.random8() as u16 * lim as u16) >> 8) as u8
    }

    /// Zufallswert in `0..lim` (0 wenn `lim == 0`)
    pub fn random16_lim(&mut self, lim: u16) -> u16 {
        ((self.random16() as u32 * lim as u32) >> 16) as u16
    }
}

impl Default for Rand16 {
    fn default() -> Self {
        Self::new(1337)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Rand16::new(42);
        let mut b = Rand16::new(42);
        for _ in 0..100 {
            assert_eq!(a.random16(), b.random16());
        }
    }

    #[test]
    fn test_lim_is_exclusive_upper_bound() {
        let mut rng = Rand16::new(7);
        for _ in 0..1000 {
            assert!(rng.random8_lim(64) < 64);
            assert!(rng.random16_lim(32) < 32);
        }
    }

    #[test]
    fn test_zero_lim_yields_zero() {
        let mut rng = Rand16::new(7);
        assert_eq!(rng.random8_lim(0), 0);
        assert_eq!(rng.random16_lim(0), 0);
    }
}
