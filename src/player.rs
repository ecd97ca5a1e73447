use std::fmt;

use crate::strategy::ParamValue;

/// A strategy instance taking part in a contest.
///
/// Its textual name is the strategy name followed by its non-`None` parameter values, e.g.
/// `Random: 0.5` or `Tit For Tat`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub params: Vec<(String, ParamValue)>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: vec![],
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        let mut prefix = ": ";
        for (_, value) in self.params.iter().filter(|(_, value)| !value.is_none()) {
            write!(f, "{prefix}{value}")?;
            prefix = ", ";
        }
        Ok(())
    }
}

/// Textual names of `players`, in order.
pub(crate) fn names<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<String> {
    players.into_iter().map(Player::to_string).collect()
}
