//! Contest definitions submitted by API clients.
//!
//! Only the payload checks live here; storing definitions and tracking their status belongs
//! to the web application.

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// Request for a round-robin tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentDefinition {
    pub turns: u32,
    pub repetitions: u32,
    pub noise: f64,
    pub with_morality: bool,
    /// Strategy ids.
    pub player_list: Vec<String>,
}

impl TournamentDefinition {
    pub fn validate(&self) -> Result<(), DefinitionError> {
        at_least_players(&self.player_list, 2)
    }
}

/// Request for a single match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDefinition {
    pub turns: u32,
    pub noise: f64,
    pub player_list: Vec<String>,
}

impl MatchDefinition {
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.player_list.len() != 2 {
            return Err(DefinitionError::WrongPlayerCount {
                expected: 2,
                found: self.player_list.len(),
            });
        }
        Ok(())
    }
}

/// Request for a Moran process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoranDefinition {
    pub turns: u32,
    pub noise: f64,
    /// `bd` or `db`.
    pub mode: String,
    pub player_list: Vec<String>,
}

impl MoranDefinition {
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.mode.chars().count() != 2 {
            return Err(DefinitionError::InvalidMode {
                mode: self.mode.clone(),
            });
        }
        at_least_players(&self.player_list, 2)
    }
}

fn at_least_players(players: &[String], min: usize) -> Result<(), DefinitionError> {
    if players.len() < min {
        return Err(DefinitionError::TooFewPlayers {
            min,
            found: players.len(),
        });
    }
    Ok(())
}
