//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use relief_claims::FundingStrategy;
use relief_types::{AccountId, ProtocolParams};

use crate::genesis::Genesis;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid account id {0:?}: must start with rlf_")]
    InvalidAccount(String),
}

/// Claim funding as written in the config file.
///
/// ```toml
/// [funding]
/// mode = "debit-treasury"
/// treasury = "rlf_pool"
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum FundingConfig {
    MintOnClaim,
    DebitTreasury { treasury: String },
}

/// Configuration for a RELIEF node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The funding mode has no default:
/// a deployment must choose one explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// The genesis owner account.
    pub owner: String,

    /// Claim funding source.
    pub funding: FundingConfig,

    /// Protocol parameters; defaults apply field-wise.
    #[serde(default)]
    pub params: ProtocolParams,

    /// Accounts promoted to admin at genesis.
    #[serde(default)]
    pub admins: Vec<String>,

    /// The designated distribution account, if any.
    #[serde(default)]
    pub distributor: Option<String>,

    /// Where to persist snapshots; in-memory only when unset.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl NodeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Validate account identifiers and produce the genesis this config
    /// describes.
    pub fn to_genesis(&self) -> Result<Genesis, ConfigError> {
        let funding = match &self.funding {
            FundingConfig::MintOnClaim => FundingStrategy::MintOnClaim,
            FundingConfig::DebitTreasury { treasury } => FundingStrategy::DebitTreasury {
                treasury: parse_account(treasury)?,
            },
        };
        let mut genesis =
            Genesis::new(parse_account(&self.owner)?, funding).with_params(self.params.clone());
        for admin in &self.admins {
            genesis = genesis.with_admin(parse_account(admin)?);
        }
        if let Some(distributor) = &self.distributor {
            genesis = genesis.with_distributor(parse_account(distributor)?);
        }
        Ok(genesis)
    }
}

fn parse_account(raw: &str) -> Result<AccountId, ConfigError> {
    if !raw.starts_with(AccountId::PREFIX) || raw.len() <= AccountId::PREFIX.len() {
        return Err(ConfigError::InvalidAccount(raw.to_string()));
    }
    Ok(AccountId::new(raw))
}
