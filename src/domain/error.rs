//! Domain error types.

/// A single row problem found while loading a catalog file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("row {row}: {message}")]
pub struct CatalogRowError {
    pub row: usize,
    pub message: String,
}

/// Top-level error type for stratdeck.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("catalog load error in {source_name}: {reason}")]
    CatalogLoad { source_name: String, reason: String },

    #[error(transparent)]
    CatalogRow(#[from] CatalogRowError),

    #[error("unknown strategy: {id}")]
    UnknownStrategy { id: String },

    #[error("unknown setting: {id}")]
    UnknownSetting { id: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DeckError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DeckError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error kind.
    pub fn exit_status(&self) -> u8 {
        match self {
            DeckError::Io(_) => 1,
            DeckError::ConfigParse { .. }
            | DeckError::ConfigMissing { .. }
            | DeckError::ConfigInvalid { .. } => 2,
            DeckError::CatalogLoad { .. } | DeckError::CatalogRow(_) => 3,
            DeckError::UnknownStrategy { .. } | DeckError::UnknownSetting { .. } => 4,
            DeckError::InvalidInput { .. } => 5,
        }
    }
}

impl From<&DeckError> for std::process::ExitCode {
    fn from(err: &DeckError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_error_display_includes_row() {
        let err = CatalogRowError {
            row: 3,
            message: "unknown risk level 'Extreme'".into(),
        };
        assert_eq!(err.to_string(), "row 3: unknown risk level 'Extreme'");
    }

    #[test]
    fn row_error_converts_transparently() {
        let err: DeckError = CatalogRowError {
            row: 1,
            message: "empty id".into(),
        }
        .into();
        assert_eq!(err.to_string(), "row 1: empty id");
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let cases = [
            (DeckError::Io(std::io::Error::other("x")), 1),
            (
                DeckError::ConfigMissing {
                    section: "web".into(),
                    key: "listen".into(),
                },
                2,
            ),
            (
                DeckError::CatalogLoad {
                    source_name: "a.csv".into(),
                    reason: "x".into(),
                },
                3,
            ),
            (DeckError::UnknownStrategy { id: "9".into() }, 4),
            (DeckError::invalid_input("email", "missing @"), 5),
        ];
        for (err, expected) in cases {
            assert_eq!(err.exit_status(), expected, "{err}");
        }
    }
}
