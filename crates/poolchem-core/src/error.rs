use std::path::PathBuf;

/// Broad category of a [`PoolChemError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input was outside its declared domain.
    Validation,
    /// A formula could not be evaluated for the given inputs.
    Calculation,
    /// An identifier did not match any registry entry.
    Lookup,
    /// A configuration file or value was unusable.
    Config,
}

#[derive(Debug, thiserror::Error)]
pub enum PoolChemError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("{parameter} is required for {calculation} calculation")]
    MissingParameter {
        parameter: &'static str,
        calculation: &'static str,
    },

    #[error("calculation failed: {0}")]
    Calculation(String),

    #[error("chemical not found: '{0}'")]
    ChemicalNotFound(String),

    #[error("failed to load configuration from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PoolChemError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PoolChemError::Validation(_) => ErrorKind::Validation,
            PoolChemError::MissingParameter { .. } | PoolChemError::Calculation(_) => {
                ErrorKind::Calculation
            }
            PoolChemError::ChemicalNotFound(_) => ErrorKind::Lookup,
            PoolChemError::ConfigLoad { .. }
            | PoolChemError::ConfigInvalid(_)
            | PoolChemError::Io(_)
            | PoolChemError::Json(_) => ErrorKind::Config,
        }
    }

    pub fn is_calculation_error(&self) -> bool {
        self.kind() == ErrorKind::Calculation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let err = PoolChemError::MissingParameter {
            parameter: "pH",
            calculation: "CSI",
        };
        assert_eq!(err.to_string(), "pH is required for CSI calculation");
        assert!(err.is_calculation_error());
    }

    #[test]
    fn test_lookup_kind_is_distinct() {
        let err = PoolChemError::ChemicalNotFound("unobtainium".into());
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert!(!err.is_calculation_error());
    }
}
