use std::collections::HashMap;

use serde::Serialize;

use crate::{
    error::ProjectionError,
    game::{Action, Game, Interaction},
};

use super::Projection;

/// Per player pair, how often each joint state was visited.
pub type StateDistribution = Vec<Vec<HashMap<Interaction, u64>>>;

/// Per player pair, how often each action followed each joint state.
pub type StateToActionDistribution = Vec<Vec<HashMap<(Interaction, Action), u64>>>;

/// Progress reporting handle used while the tournament ran.
#[derive(Debug, Clone, Default)]
pub struct ProgressBar {
    pub total: usize,
    pub position: usize,
}

/// Aggregated results of a round-robin tournament.
///
/// Matrices are indexed by player position in `players`; the innermost vector of
/// three-dimensional fields holds one value per repetition.
#[derive(Debug, Clone, Default)]
pub struct TournamentResult {
    pub players: Vec<String>,
    pub num_players: usize,
    pub repetitions: u32,
    pub match_lengths: Vec<Vec<Vec<u32>>>,
    pub scores: Vec<Vec<f64>>,
    pub normalised_scores: Vec<Vec<f64>>,
    pub ranking: Vec<usize>,
    pub ranked_names: Vec<String>,
    pub wins: Vec<Vec<u32>>,
    pub payoffs: Vec<Vec<Vec<f64>>>,
    pub payoff_matrix: Vec<Vec<f64>>,
    pub payoff_stddevs: Vec<Vec<f64>>,
    pub score_diffs: Vec<Vec<Vec<f64>>>,
    pub payoff_diffs_means: Vec<Vec<f64>>,
    pub cooperation: Vec<Vec<u32>>,
    pub normalised_cooperation: Vec<Vec<f64>>,
    pub vengeful_cooperation: Vec<Vec<f64>>,
    pub cooperating_rating: Vec<f64>,
    pub good_partner_matrix: Vec<Vec<u32>>,
    pub good_partner_rating: Vec<f64>,
    pub eigenmoses_rating: Vec<f64>,
    pub eigenjesus_rating: Vec<f64>,
    pub initial_cooperation_count: Vec<u32>,
    pub initial_cooperation_rate: Vec<f64>,
    pub state_distribution: StateDistribution,
    pub normalised_state_distribution: Vec<Vec<HashMap<Interaction, f64>>>,
    pub state_to_action_distribution: StateToActionDistribution,
    pub normalised_state_to_action_distribution: Vec<Vec<HashMap<(Interaction, Action), f64>>>,
    pub game: Game,
    pub progress_bar: Option<ProgressBar>,
}

/// Transmittable form of a [`TournamentResult`]: every field except the state distributions,
/// the game and the progress handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentProjection {
    pub players: Vec<String>,
    pub num_players: usize,
    pub repetitions: u32,
    pub match_lengths: Vec<Vec<Vec<u32>>>,
    pub scores: Vec<Vec<f64>>,
    pub normalised_scores: Vec<Vec<f64>>,
    pub ranking: Vec<usize>,
    pub ranked_names: Vec<String>,
    pub wins: Vec<Vec<u32>>,
    pub payoffs: Vec<Vec<Vec<f64>>>,
    pub payoff_matrix: Vec<Vec<f64>>,
    pub payoff_stddevs: Vec<Vec<f64>>,
    pub score_diffs: Vec<Vec<Vec<f64>>>,
    pub payoff_diffs_means: Vec<Vec<f64>>,
    pub cooperation: Vec<Vec<u32>>,
    pub normalised_cooperation: Vec<Vec<f64>>,
    pub vengeful_cooperation: Vec<Vec<f64>>,
    pub cooperating_rating: Vec<f64>,
    pub good_partner_matrix: Vec<Vec<u32>>,
    pub good_partner_rating: Vec<f64>,
    pub eigenmoses_rating: Vec<f64>,
    pub eigenjesus_rating: Vec<f64>,
    pub initial_cooperation_count: Vec<u32>,
    pub initial_cooperation_rate: Vec<f64>,
}

impl Projection for TournamentResult {
    const KIND: &'static str = "tournament";

    // The distributions are keyed by tuples and have no agreed wire format yet.
    const EXCLUDED: &'static [&'static str] = &[
        "state_distribution",
        "normalised_state_distribution",
        "state_to_action_distribution",
        "normalised_state_to_action_distribution",
        "game",
        "progress_bar",
    ];

    type Output = TournamentProjection;

    fn project(&self) -> Result<TournamentProjection, ProjectionError> {
        Ok(TournamentProjection {
            players: self.players.clone(),
            num_players: self.num_players,
            repetitions: self.repetitions,
            match_lengths: self.match_lengths.clone(),
            scores: self.scores.clone(),
            normalised_scores: self.normalised_scores.clone(),
            ranking: self.ranking.clone(),
            ranked_names: self.ranked_names.clone(),
            wins: self.wins.clone(),
            payoffs: self.payoffs.clone(),
            payoff_matrix: self.payoff_matrix.clone(),
            payoff_stddevs: self.payoff_stddevs.clone(),
            score_diffs: self.score_diffs.clone(),
            payoff_diffs_means: self.payoff_diffs_means.clone(),
            cooperation: self.cooperation.clone(),
            normalised_cooperation: self.normalised_cooperation.clone(),
            vengeful_cooperation: self.vengeful_cooperation.clone(),
            cooperating_rating: self.cooperating_rating.clone(),
            good_partner_matrix: self.good_partner_matrix.clone(),
            good_partner_rating: self.good_partner_rating.clone(),
            eigenmoses_rating: self.eigenmoses_rating.clone(),
            eigenjesus_rating: self.eigenjesus_rating.clone(),
            initial_cooperation_count: self.initial_cooperation_count.clone(),
            initial_cooperation_rate: self.initial_cooperation_rate.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::game::Action::{C, D};

    fn two_player_tournament() -> TournamentResult {
        let mut states = HashMap::new();
        states.insert((C, C), 4);
        states.insert((D, D), 1);
        TournamentResult {
            players: vec!["Cooperator".into(), "Defector".into()],
            num_players: 2,
            repetitions: 1,
            match_lengths: vec![vec![vec![5], vec![5]], vec![vec![5], vec![5]]],
            scores: vec![vec![15.0], vec![25.0]],
            normalised_scores: vec![vec![1.5], vec![3.0]],
            ranking: vec![1, 0],
            ranked_names: vec!["Defector".into(), "Cooperator".into()],
            wins: vec![vec![0], vec![1]],
            cooperating_rating: vec![1.0, 0.0],
            state_distribution: vec![vec![states.clone(), states]],
            progress_bar: Some(ProgressBar {
                total: 3,
                position: 3,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn copies_everything_but_excluded_fields() {
        let map = two_player_tournament().project_map().unwrap();
        for key in TournamentResult::EXCLUDED {
            assert!(!map.contains_key(*key), "{key} leaked");
        }
        assert_eq!(map["players"], json!(["Cooperator", "Defector"]));
        assert_eq!(map["ranked_names"], json!(["Defector", "Cooperator"]));
        assert_eq!(map["wins"], json!([[0], [1]]));
        assert_eq!(map["num_players"], json!(2));
        assert_eq!(map.len(), 24);
    }

    #[test]
    fn non_finite_ratings_are_not_transmitted_as_numbers() {
        let mut tournament = two_player_tournament();
        tournament.eigenjesus_rating = vec![f64::NAN, 0.5];
        let map = tournament.project_map().unwrap();
        assert_eq!(map["eigenjesus_rating"], json!([null, 0.5]));
    }

    #[test]
    fn projecting_twice_is_idempotent() {
        let tournament = two_player_tournament();
        assert_eq!(tournament.project().unwrap(), tournament.project().unwrap());
    }
}
