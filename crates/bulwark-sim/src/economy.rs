//! Currency, score and lives bookkeeping.

use serde::{Deserialize, Serialize};

use bulwark_core::errors::PlacementError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Economy {
    pub currency: u32,
    /// Only ever increases.
    pub score: u32,
    /// Only ever decreases; 0 is terminal.
    pub lives: u32,
}

impl Economy {
    pub fn new(currency: u32, lives: u32) -> Self {
        Self {
            currency,
            score: 0,
            lives,
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.currency >= cost
    }

    /// Debit `cost`, or leave currency untouched and refuse.
    pub fn spend(&mut self, cost: u32) -> Result<(), PlacementError> {
        if !self.can_afford(cost) {
            return Err(PlacementError::InsufficientFunds {
                cost,
                available: self.currency,
            });
        }
        self.currency -= cost;
        Ok(())
    }

    pub fn credit(&mut self, amount: u32) {
        self.currency = self.currency.saturating_add(amount);
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Take one life for a leak. Returns true when this leak ends the game.
    /// A leak with no lives left changes nothing.
    pub fn lose_life(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        self.lives == 0
    }
}
