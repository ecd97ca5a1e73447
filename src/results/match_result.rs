use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::ProjectionError,
    game::{DeterministicCache, Game, Interaction},
    player::Player,
    strategy::ParamValue,
};

use super::Projection;

/// Winner reported for a drawn match.
pub const TIE: &str = "False";

/// Winner reported for a match in which no turn was played.
pub const UNPLAYED: &str = "None";

/// Completed match between two players, as produced by the contest engine.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// Fixed number of turns, if any.
    pub turns: Option<u32>,
    /// Probability of ending the match after each turn, if any.
    pub prob_end: Option<f64>,
    pub noise: f64,
    pub seed: Option<u64>,
    pub reset: bool,
    /// Moves played on every turn.
    pub result: Vec<Interaction>,
    pub cache_key: Option<(String, String)>,
    pub cache: DeterministicCache,
    pub players: Option<[Player; 2]>,
    pub game: Option<Game>,
    pub match_attributes: BTreeMap<String, ParamValue>,
}

impl MatchResult {
    /// A match between `players` scored with `game`.
    pub fn new(players: [Player; 2], game: Game) -> Self {
        Self {
            players: Some(players),
            game: Some(game),
            ..Default::default()
        }
    }

    fn missing(attribute: &'static str) -> ProjectionError {
        ProjectionError::MissingAttribute {
            record: Self::KIND,
            attribute,
        }
    }
}

/// Transmittable form of a [`MatchResult`].
///
/// Score summaries are `None` and the winner is [`UNPLAYED`] when no turn was played.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchProjection {
    pub turns: Option<u32>,
    pub prob_end: Option<f64>,
    pub noise: f64,
    pub seed: Option<u64>,
    pub reset: bool,
    pub result: Vec<Interaction>,
    /// Score of both players on every turn.
    pub scores: Vec<(f64, f64)>,
    pub final_score: Option<(f64, f64)>,
    pub final_score_per_turn: Option<(f64, f64)>,
    /// Name of the higher-scoring player, [`TIE`] or [`UNPLAYED`].
    pub winner: String,
}

impl Projection for MatchResult {
    const KIND: &'static str = "match";

    const EXCLUDED: &'static [&'static str] =
        &["cache_key", "cache", "players", "game", "match_attributes"];

    type Output = MatchProjection;

    fn project(&self) -> Result<MatchProjection, ProjectionError> {
        let game = self.game.as_ref().ok_or_else(|| Self::missing("game"))?;
        let players = self
            .players
            .as_ref()
            .ok_or_else(|| Self::missing("players"))?;

        let scores: Vec<(f64, f64)> = self.result.iter().map(|&turn| game.score(turn)).collect();

        let final_score = (!scores.is_empty()).then(|| {
            scores
                .iter()
                .fold((0.0, 0.0), |acu, (a, b)| (acu.0 + a, acu.1 + b))
        });

        let turns_played = scores.len() as f64;
        let final_score_per_turn = final_score.map(|(a, b)| (a / turns_played, b / turns_played));

        let winner = match final_score {
            None => UNPLAYED.to_owned(),
            Some((a, b)) if a > b => players[0].to_string(),
            Some((a, b)) if b > a => players[1].to_string(),
            Some(_) => TIE.to_owned(),
        };

        Ok(MatchProjection {
            turns: self.turns,
            prob_end: self.prob_end,
            noise: self.noise,
            seed: self.seed,
            reset: self.reset,
            result: self.result.clone(),
            scores,
            final_score,
            final_score_per_turn,
            winner,
        })
    }
}
