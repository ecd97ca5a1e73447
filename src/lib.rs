//! # Tournament API core
//!
//! The logic behind a web API publishing a catalog of iterated prisoner's dilemma strategies
//! and the results of the contests run between them.
//!
//! It provides:
//! - Declarative filtering of the strategy catalog (`passes_filterset`, [`StrategyCatalog`])
//! - Transmittable strategy records (`StrategyRecord`)
//! - Projection of match, tournament and Moran process results into plain serializable
//!   records ([`results`])
//! - Validation of contest definitions submitted by clients ([`definitions`])
//!
//! Everything here is pure: filtering and projection never mutate their inputs, hold no shared
//! state and may be called from any number of request handlers at once. Running contests,
//! persisting them and speaking HTTP are left to the surrounding application.
//!
//! # Documentation Overview
//!
//! - For the filter names and how their values are read, see the [`filters`] module.
//! - For the fields kept, dropped and derived for each result kind, see the [`results`] module.
//! - For environment-driven settings and file logging, see
//!   [`Configuration`](crate::configuration::Configuration).
//!
//! # Usage Example
//!
//! ```
//! use tournament_api_core::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let strategies = vec![
//!         StrategyDescriptor::new(
//!             "grudger",
//!             "Grudger",
//!             Classifier::new()
//!                 .with("stochastic", false)
//!                 .with("long_run_time", false)
//!                 .with("memory_depth", MemoryDepth::Unbounded),
//!         ),
//!         StrategyDescriptor::new(
//!             "random",
//!             "Random",
//!             Classifier::new()
//!                 .with("stochastic", true)
//!                 .with("long_run_time", false)
//!                 .with("memory_depth", MemoryDepth::Finite(0)),
//!         )
//!         .with_param("p", 0.5),
//!     ];
//!     let catalog = StrategyCatalog::new(strategies, Configuration::new())?;
//!
//!     // e.g. `?stochastic=false&min_memory_depth=10`
//!     let filterset = FilterSet::new()
//!         .with("stochastic", "false")
//!         .with("min_memory_depth", "10");
//!     let records = catalog.records(&filterset)?;
//!     assert_eq!(records.len(), 1);
//!     assert_eq!(records[0].classifier["memory_depth"], -1);
//!
//!     // Project a finished match before sending it
//!     let mut played = MatchResult::new(
//!         [Player::new("Grudger"), Player::new("Random").with_param("p", 0.5)],
//!         Game::default(),
//!     );
//!     played.result = vec![(Action::C, Action::D), (Action::D, Action::D)];
//!     let body = ContestResult::from(played).project_map()?;
//!     assert_eq!(body["winner"], "Random: 0.5");
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod classifier;
pub mod configuration;
pub mod definitions;
pub mod error;
pub mod filters;
pub mod game;
mod logger;
pub mod player;
pub mod results;
pub mod strategy;

pub use anyhow;
pub use catalog::StrategyCatalog;

/// Commonly used types and traits for quick access.
///
/// ```rust
/// use tournament_api_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::catalog::StrategyCatalog;
    pub use crate::classifier::{Classifier, ClassifierValue, MemoryDepth};
    pub use crate::configuration::Configuration;
    pub use crate::error::{ErrorClass, FilterError, ProjectionError};
    pub use crate::filters::{passes_filterset, FilterSet, FilterValue};
    pub use crate::game::{Action, Game};
    pub use crate::player::Player;
    pub use crate::results::{
        ContestResult, MatchResult, MoranResult, Projected, Projection, TournamentResult,
    };
    pub use crate::strategy::{ParamValue, StrategyDescriptor, StrategyRecord};
}
