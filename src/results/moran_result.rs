use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::ProjectionError,
    game::DeterministicCache,
    player::{self, Player},
};

use super::{MatchResult, Projection};

/// Builds the match played between two members of the population.
pub type MatchFactory = fn([Player; 2], u32) -> MatchResult;

/// Completed Moran process, as produced by the contest engine.
#[derive(Debug, Clone, Default)]
pub struct MoranResult {
    pub turns: u32,
    pub prob_end: Option<f64>,
    pub noise: f64,
    /// `bd` (birth-death) or `db` (death-birth).
    pub mode: String,
    pub mutation_rate: f64,
    pub mutation_method: String,
    pub seed: Option<u64>,
    /// Head count of every strategy after each step.
    pub populations: Vec<BTreeMap<String, u32>>,
    pub score_history: Vec<Vec<f64>>,
    pub winning_strategy_name: Option<String>,
    pub initial_players: Vec<Player>,
    pub players: Vec<Player>,
    /// Only set by the engine when mutation is enabled.
    pub mutation_targets: Option<Vec<(Player, Vec<Player>)>>,
    pub match_class: Option<MatchFactory>,
    pub deterministic_cache: DeterministicCache,
}

/// Transmittable form of a [`MoranResult`]. Players are reduced to their textual names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoranProjection {
    pub turns: u32,
    pub prob_end: Option<f64>,
    pub noise: f64,
    pub mode: String,
    pub mutation_rate: f64,
    pub mutation_method: String,
    pub seed: Option<u64>,
    pub populations: Vec<BTreeMap<String, u32>>,
    pub score_history: Vec<Vec<f64>>,
    pub winning_strategy_name: Option<String>,
    pub mutation_targets: BTreeMap<String, Vec<String>>,
    pub initial_players: Vec<String>,
    pub players: Vec<String>,
}

impl Projection for MoranResult {
    const KIND: &'static str = "moran";

    const EXCLUDED: &'static [&'static str] = &["match_class", "deterministic_cache"];

    type Output = MoranProjection;

    fn project(&self) -> Result<MoranProjection, ProjectionError> {
        let mutation_targets = self
            .mutation_targets
            .as_ref()
            .ok_or(ProjectionError::MissingAttribute {
                record: Self::KIND,
                attribute: "mutation_targets",
            })?
            .iter()
            .map(|(strategy, targets)| (strategy.to_string(), player::names(targets)))
            .collect();

        Ok(MoranProjection {
            turns: self.turns,
            prob_end: self.prob_end,
            noise: self.noise,
            mode: self.mode.clone(),
            mutation_rate: self.mutation_rate,
            mutation_method: self.mutation_method.clone(),
            seed: self.seed,
            populations: self.populations.clone(),
            score_history: self.score_history.clone(),
            winning_strategy_name: self.winning_strategy_name.clone(),
            mutation_targets,
            initial_players: player::names(&self.initial_players),
            players: player::names(&self.players),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::game::Game;

    fn new_match(players: [Player; 2], turns: u32) -> MatchResult {
        let mut played = MatchResult::new(players, Game::default());
        played.turns = Some(turns);
        played
    }

    fn moran_process() -> MoranResult {
        let cooperator = Player::new("Cooperator");
        let defector = Player::new("Defector");
        let random = Player::new("Random").with_param("p", 0.5);
        let initial = vec![cooperator.clone(), defector.clone(), random.clone()];
        MoranResult {
            turns: 10,
            noise: 0.0,
            mode: "bd".into(),
            mutation_rate: 0.1,
            mutation_method: "transition".into(),
            populations: vec![BTreeMap::from([
                ("Cooperator".to_owned(), 1),
                ("Defector".to_owned(), 1),
                ("Random: 0.5".to_owned(), 1),
            ])],
            winning_strategy_name: Some("Defector".into()),
            players: vec![defector.clone(), defector.clone(), random.clone()],
            mutation_targets: Some(vec![
                (cooperator.clone(), vec![defector.clone(), random.clone()]),
                (defector.clone(), vec![cooperator.clone(), random.clone()]),
                (random, vec![cooperator, defector]),
            ]),
            initial_players: initial,
            match_class: Some(new_match as MatchFactory),
            ..Default::default()
        }
    }

    #[test]
    fn players_become_names() {
        let raw = moran_process();
        let projection = raw.project().unwrap();
        assert_eq!(projection.initial_players.len(), raw.initial_players.len());
        assert_eq!(projection.players.len(), raw.players.len());
        assert_eq!(
            projection.initial_players,
            vec!["Cooperator", "Defector", "Random: 0.5"]
        );
        assert_eq!(projection.players, vec!["Defector", "Defector", "Random: 0.5"]);
    }

    #[test]
    fn mutation_targets_are_keyed_by_name() {
        let projection = moran_process().project().unwrap();
        let keys: Vec<_> = projection.mutation_targets.keys().cloned().collect();
        assert_eq!(keys, vec!["Cooperator", "Defector", "Random: 0.5"]);
        assert_eq!(
            projection.mutation_targets["Random: 0.5"],
            vec!["Cooperator", "Defector"]
        );
    }

    #[test]
    fn output_never_contains_excluded_fields() {
        let map = moran_process().project_map().unwrap();
        for key in MoranResult::EXCLUDED {
            assert!(!map.contains_key(*key), "{key} leaked");
        }
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        let mut expected = vec![
            "turns",
            "prob_end",
            "noise",
            "mode",
            "mutation_rate",
            "mutation_method",
            "seed",
            "populations",
            "score_history",
            "winning_strategy_name",
            "mutation_targets",
            "initial_players",
            "players",
        ];
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert_eq!(map["mode"], json!("bd"));
        assert_eq!(map["winning_strategy_name"], json!("Defector"));
    }

    #[test]
    fn missing_mutation_targets_is_a_contract_violation() {
        let mut raw = moran_process();
        raw.mutation_targets = None;
        assert!(matches!(
            raw.project(),
            Err(ProjectionError::MissingAttribute {
                record: "moran",
                attribute: "mutation_targets",
            })
        ));
    }

    #[test]
    fn projecting_twice_is_idempotent() {
        let raw = moran_process();
        assert_eq!(raw.project().unwrap(), raw.project().unwrap());
    }
}
