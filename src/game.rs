//! Prisoner's dilemma primitives shared by the result records.

use std::collections::HashMap;

use serde::Serialize;

/// Move played on a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    /// Cooperate.
    C,
    /// Defect.
    D,
}

/// Moves of both players on a single turn.
pub type Interaction = (Action, Action);

/// Interactions already computed for a pair of deterministic players, keyed by their names.
pub type DeterministicCache = HashMap<(String, String), Vec<Interaction>>;

/// Payoffs of the two-player game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Game {
    /// Both cooperate.
    pub reward: f64,
    /// Cooperated against a defector.
    pub sucker: f64,
    /// Defected against a cooperator.
    pub temptation: f64,
    /// Both defect.
    pub punishment: f64,
}

impl Game {
    pub fn new(reward: f64, sucker: f64, temptation: f64, punishment: f64) -> Self {
        Self {
            reward,
            sucker,
            temptation,
            punishment,
        }
    }

    /// Scores of both players for one turn.
    pub fn score(&self, interaction: Interaction) -> (f64, f64) {
        match interaction {
            (Action::C, Action::C) => (self.reward, self.reward),
            (Action::C, Action::D) => (self.sucker, self.temptation),
            (Action::D, Action::C) => (self.temptation, self.sucker),
            (Action::D, Action::D) => (self.punishment, self.punishment),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(3.0, 0.0, 5.0, 1.0)
    }
}
