use thiserror::Error;

use crate::asset::{AssetId, AssetState, LedgerKind};

/// Error types for the Hatchery simulator.
///
/// Every rejected engine operation maps to one of these variants. A rejection
/// never leaves partial state behind: the engine validates before it mutates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HatcheryError {
    /// The ledger does not hold enough of the requested token.
    #[error("Insufficient {ledger} balance: required {required} grains, available {available} grains")]
    InsufficientBalance {
        ledger: LedgerKind,
        required: u128,
        available: u128,
    },

    /// A token amount was negative, NaN, infinite, or too large to represent.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// No egg with this identifier has been emitted in the current run.
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    /// The egg has already hatched or rotted.
    #[error("Asset {id} is not active (state: {state})")]
    AssetNotActive { id: AssetId, state: AssetState },

    /// The egg is already referenced by a live stake.
    #[error("Asset {0} is already staked")]
    AlreadyStaked(AssetId),

    /// A simulation parameter is outside its accepted range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A configuration or scenario file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HatcheryError {
    fn from(e: serde_json::Error) -> Self {
        HatcheryError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message() {
        let err = HatcheryError::InsufficientBalance {
            ledger: LedgerKind::Base,
            required: 10,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient base balance: required 10 grains, available 3 grains"
        );
    }

    #[test]
    fn test_not_active_message() {
        let err = HatcheryError::AssetNotActive {
            id: AssetId(7),
            state: AssetState::Rotted,
        };
        assert_eq!(err.to_string(), "Asset egg#7 is not active (state: Rotted)");
    }

    #[test]
    fn test_config_message() {
        let err = HatcheryError::Config("hatchery.toml: expected a table".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: hatchery.toml: expected a table"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<u64, _> = serde_json::from_str("not json");
        let err: HatcheryError = parse.unwrap_err().into();
        assert!(matches!(err, HatcheryError::Serialization(_)));
    }
}
