//! Random draws used by the opponent model.
//!
//! Every random decision the model makes goes through [`RandomSource`], so a
//! seeded `StdRng` or a [`ScriptedDraws`] sequence makes a game reproducible.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be non-zero.
    fn next_index(&mut self, n: usize) -> usize {
        let i = (self.next_unit() * n as f64) as usize;
        i.min(n - 1)
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl RandomSource for ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Replays a fixed list of draws, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(draws: Vec<f64>) -> Self {
        let draws = if draws.is_empty() { vec![0.0] } else { draws };
        let draws = draws
            .into_iter()
            .map(|d| if d.is_finite() { d.clamp(0.0, 1.0 - f64::EPSILON) } else { 0.0 })
            .collect();
        ScriptedDraws { draws, cursor: 0 }
    }

    pub fn constant(draw: f64) -> Self {
        ScriptedDraws::new(vec![draw])
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_cycles() {
        let mut draws = ScriptedDraws::new(vec![0.1, 0.9]);
        assert_eq!(draws.next_unit(), 0.1);
        assert_eq!(draws.next_unit(), 0.9);
        assert_eq!(draws.next_unit(), 0.1);
        assert_eq!(draws.consumed(), 3);
    }

    #[test]
    fn index_stays_in_range() {
        let mut draws = ScriptedDraws::new(vec![0.0, 0.5, 0.999_999]);
        for _ in 0..3 {
            assert!(draws.next_index(3) < 3);
        }
        let mut rng = seeded(7);
        for _ in 0..1000 {
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }
}
