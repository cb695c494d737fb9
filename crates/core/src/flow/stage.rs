//! # Review Stages
//!
//! The fixed set of compliance sub-checks tracked by the progress flow.

use serde::{Deserialize, Serialize};

/// One compliance sub-check in the review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Know-your-customer verification
    Kyc,
    /// Anti-money-laundering screening
    Aml,
    /// Beneficial-ownership check
    Ownership,
    /// Governance review; completing it triggers packet finalization
    Governance,
}

impl Stage {
    /// All stages in review order
    pub const ALL: [Stage; 4] = [Stage::Kyc, Stage::Aml, Stage::Ownership, Stage::Governance];

    /// Stage key as it appears in UI selectors and event payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kyc => "kyc",
            Self::Aml => "aml",
            Self::Ownership => "ownership",
            Self::Governance => "governance",
        }
    }

    /// Whether completing this stage ends the review and permits finalization
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Governance)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
