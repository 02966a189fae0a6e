use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What a control button asks the carousel to do. Buttons carry the tag in
/// their `data-action` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Next,
    Prev,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Prev, Action::Next];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Next => "next",
            Action::Prev => "prev",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::Next => "Next Slide",
            Action::Prev => "Previous Slide",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown carousel action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_owned()))
    }
}
