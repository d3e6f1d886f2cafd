//! Error types for the item forge
//!
//! The forge itself never fails; errors only surface at the edges, when a
//! caller names an item kind or artifact that does not exist, or when an
//! options file cannot be read.

use thiserror::Error;

use crate::object::Tval;

/// Lookup errors for base items and fixed artifacts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    #[error("no base item with tval {tval} and sval {sval}")]
    UnknownKind { tval: Tval, sval: u8 },

    #[error("no base item named '{0}'")]
    UnknownKindName(String),

    #[error("no fixed artifact named '{0}'")]
    UnknownArtifact(String),
}

/// Options parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option '{0}'")]
    MissingValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ObjectError::UnknownKind {
            tval: Tval::Sword,
            sval: 99,
        };
        assert_eq!(err.to_string(), "no base item with tval Sword and sval 99");

        let err = OptionsError::InvalidValue("weakening".into(), "sometimes".into());
        assert_eq!(
            err.to_string(),
            "Invalid value 'sometimes' for option 'weakening'"
        );
    }
}
