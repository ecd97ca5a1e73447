//! Projection of completed contest results into transmittable records.
//!
//! The contest engine hands over one of three result shapes ([`MatchResult`],
//! [`TournamentResult`], [`MoranResult`]). Each carries fields that must not cross the API
//! boundary (caches, payoff objects, progress handles, ...) and fields that only make sense once
//! turned into plain names or summary values. A [`Projection`] copies every transmittable field
//! as-is, leaves out the excluded ones and adds the derived fields, producing a plain
//! serializable record.
//!
//! The source record is only borrowed; projecting it twice yields equal outputs.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::error::ProjectionError;

mod match_result;
mod moran_result;
mod tournament_result;

pub use match_result::{MatchProjection, MatchResult, TIE, UNPLAYED};
pub use moran_result::{MatchFactory, MoranProjection, MoranResult};
pub use tournament_result::{
    ProgressBar, StateDistribution, StateToActionDistribution, TournamentProjection,
    TournamentResult,
};

/// Conversion of a result record into its transmittable form.
pub trait Projection {
    /// Name of the record kind, used in errors and logs.
    const KIND: &'static str;

    /// Names of the source fields that never appear in the output.
    const EXCLUDED: &'static [&'static str];

    /// The transmittable record.
    type Output: Serialize;

    /// Build the transmittable record.
    ///
    /// # Errors
    /// [`ProjectionError::MissingAttribute`] if the engine left out a field a derived value is
    /// computed from.
    fn project(&self) -> Result<Self::Output, ProjectionError>;

    /// Build the transmittable record as a JSON object.
    fn project_map(&self) -> Result<Map<String, Value>, ProjectionError> {
        to_map(Self::KIND, &self.project()?)
    }
}

fn to_map(
    record: &'static str,
    output: &impl Serialize,
) -> Result<Map<String, Value>, ProjectionError> {
    match serde_json::to_value(output) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ProjectionError::NotAMapping { record }),
        Err(source) => Err(ProjectionError::Serialization { record, source }),
    }
}

/// A completed result of any contest kind.
#[derive(Debug, Clone)]
pub enum ContestResult {
    Match(MatchResult),
    Tournament(TournamentResult),
    Moran(MoranResult),
}

/// Transmittable form of a [`ContestResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Projected {
    Match(MatchProjection),
    Tournament(TournamentProjection),
    Moran(MoranProjection),
}

impl ContestResult {
    /// Name of the contest kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Match(_) => MatchResult::KIND,
            Self::Tournament(_) => TournamentResult::KIND,
            Self::Moran(_) => MoranResult::KIND,
        }
    }

    /// Project with the policy of the contest kind.
    #[instrument(skip_all, fields(kind = self.kind()))]
    pub fn project(&self) -> Result<Projected, ProjectionError> {
        let projected = match self {
            Self::Match(result) => result.project().map(Projected::Match),
            Self::Tournament(result) => result.project().map(Projected::Tournament),
            Self::Moran(result) => result.project().map(Projected::Moran),
        };
        match &projected {
            Ok(_) => debug!("result projected"),
            Err(err) => warn!("projection failed: {err}"),
        }
        projected
    }

    /// Project as a JSON object, ready to be sent as a response body.
    pub fn project_map(&self) -> Result<Map<String, Value>, ProjectionError> {
        to_map(self.kind(), &self.project()?)
    }
}

impl From<MatchResult> for ContestResult {
    fn from(result: MatchResult) -> Self {
        Self::Match(result)
    }
}

impl From<TournamentResult> for ContestResult {
    fn from(result: TournamentResult) -> Self {
        Self::Tournament(result)
    }
}

impl From<MoranResult> for ContestResult {
    fn from(result: MoranResult) -> Self {
        Self::Moran(result)
    }
}
