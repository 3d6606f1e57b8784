//! Two six-sided dice.

use crate::error::{GameError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Lowest die face
pub const DIE_MIN: u8 = 1;

/// Highest die face
pub const DIE_MAX: u8 = 6;

/// A pair of dice owned by one game session.
///
/// Only the most recent roll is kept. Before the first roll there are no
/// faces: [`Dice::total`] is `None` and [`Dice::get_total`] reads 0, which is
/// never a legal total.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
    faces: Option<(u8, u8)>,
}

impl Dice {
    /// Dice seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Dice with a fixed seed, for reproducible sessions
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { rng, faces: None }
    }

    /// Roll both dice, replacing the previous roll, and return the total
    pub fn roll(&mut self) -> u8 {
        let die_0 = self.rng.gen_range(DIE_MIN..=DIE_MAX);
        let die_1 = self.rng.gen_range(DIE_MIN..=DIE_MAX);
        self.faces = Some((die_0, die_1));
        trace!(die_0, die_1, "rolled dice");
        die_0 + die_1
    }

    /// Force an exact roll, for scripted scenarios
    pub fn set_faces(&mut self, die_0: u8, die_1: u8) -> Result<()> {
        for face in [die_0, die_1] {
            if !(DIE_MIN..=DIE_MAX).contains(&face) {
                return Err(GameError::InvalidDieFace(face));
            }
        }
        self.faces = Some((die_0, die_1));
        Ok(())
    }

    /// Faces of the last roll
    pub fn faces(&self) -> Option<(u8, u8)> {
        self.faces
    }

    /// Total of the last roll, `None` before the first roll
    pub fn total(&self) -> Option<u8> {
        self.faces.map(|(a, b)| a + b)
    }

    /// Total of the last roll, 0 before the first roll
    pub fn get_total(&self) -> u8 {
        self.total().unwrap_or(0)
    }
}

impl Default for Dice {
    fn default() -> Self {
        Self::new()
    }
}
