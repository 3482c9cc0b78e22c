//! Seeded level-layout RNG
//!
//! A 32-bit linear congruential stream. The multiplier/increment pair and the
//! `state / 2^32` output scaling are load-bearing: level layouts are a pure
//! function of the level index, and regenerating a level must reproduce it
//! bit for bit.

use rand::RngCore;

/// Seed multiplier applied to `level_index + 1`
const SEED_STRIDE: u32 = 98731;

/// Deterministic stream of floats in `[0, 1)`
#[derive(Debug, Clone)]
pub struct LevelRng {
    state: u32,
}

impl LevelRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// The stream used for layout generation of a given level
    pub fn for_level(level_index: usize) -> Self {
        Self::new((level_index as u32 + 1).wrapping_mul(SEED_STRIDE))
    }

    fn step(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.state
    }

    /// Next float in `[0, 1)`
    ///
    /// The division happens in f64 so every u32 state maps to a distinct
    /// value before narrowing.
    pub fn next_f32(&mut self) -> f32 {
        (self.step() as f64 / 4_294_967_296.0) as f32
    }
}

impl RngCore for LevelRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        ((self.step() as u64) << 32) | self.step() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = LevelRng::for_level(7);
        let mut b = LevelRng::for_level(7);
        for _ in 0..1000 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn different_levels_diverge() {
        let mut a = LevelRng::for_level(0);
        let mut b = LevelRng::for_level(1);
        let same = (0..32).filter(|_| a.next_f32() == b.next_f32()).count();
        assert!(same < 32);
    }

    #[test]
    fn output_in_unit_interval() {
        let mut rng = LevelRng::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn known_first_draw() {
        // state' = 1664525 * seed + 1013904223 (mod 2^32), output state'/2^32
        let mut rng = LevelRng::new(1);
        let expected = 1_664_525u32.wrapping_add(1_013_904_223);
        assert_eq!(rng.next_u32(), expected);
    }
}
