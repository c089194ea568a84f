//! Deterministic projectile feed
//!
//! Hands out the colored bubbles the player shoots. Same seed, same sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bubble::{BubbleColor, GameBubble};
use crate::settings::Settings;

/// Seeded source of projectile bubbles
#[derive(Debug, Clone)]
pub struct BubbleFeed {
    seed: u64,
    rng: Pcg32,
    palette_size: usize,
    next_id: u32,
    /// Drawn by `peek` but not yet handed out
    upcoming: Option<GameBubble>,
}

impl BubbleFeed {
    /// Create a feed drawing from the first `palette_size` colors, numbering bubbles from `first_id`
    pub fn new(seed: u64, palette_size: u8, first_id: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            palette_size: (palette_size as usize).clamp(1, BubbleColor::ALL.len()),
            next_id: first_id,
            upcoming: None,
        }
    }

    pub fn from_settings(seed: u64, settings: &Settings, first_id: u32) -> Self {
        Self::new(seed, settings.palette_size, first_id)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The bubble `next_bubble` will return, without consuming it
    pub fn peek(&mut self) -> GameBubble {
        match self.upcoming {
            Some(bubble) => bubble,
            None => {
                let bubble = self.draw();
                self.upcoming = Some(bubble);
                bubble
            }
        }
    }

    /// Hand out the next projectile
    pub fn next_bubble(&mut self) -> GameBubble {
        match self.upcoming.take() {
            Some(bubble) => bubble,
            None => self.draw(),
        }
    }

    fn draw(&mut self) -> GameBubble {
        let color = BubbleColor::ALL[self.rng.random_range(0..self.palette_size)];
        let id = self.next_id;
        self.next_id += 1;
        GameBubble::colored(id, color)
    }
}
