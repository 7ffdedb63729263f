pub mod requests;
pub mod responses;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub use requests::*;
pub use responses::*;

/// Visit state of a checklist bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    #[default]
    Unchecked,
    Checked,
    NotChecking,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Checked => "checked",
            Self::NotChecking => "not_checking",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unchecked" => Ok(Self::Unchecked),
            "checked" => Ok(Self::Checked),
            "not_checking" => Ok(Self::NotChecking),
            _ => Err(format!("Invalid checkStatus: {s}")),
        }
    }
}
