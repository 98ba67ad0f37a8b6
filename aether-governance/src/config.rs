//! Governance configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use aether_shared_types::governance::{ParamsError, TallyParams};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GovernanceConfig {
    pub tally_params: TallyParams,
}

impl GovernanceConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GovernanceConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        self.tally_params.validate()
    }
}
