use serde::Serialize;

/// Failure evaluating the invariant bundle for one genus.
///
/// Both variants are recoverable per genus: the batch driver records them as
/// skips and carries on with the next genus.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum InvariantError {
    #[error("domain error at genus {genus}: {reason}")]
    Domain { genus: i64, reason: String },

    #[error("arithmetic overflow at genus {genus} computing {quantity}")]
    Overflow { genus: u32, quantity: &'static str },
}

impl InvariantError {
    /// The genus the failure was raised for.
    pub fn genus(&self) -> i64 {
        match self {
            InvariantError::Domain { genus, .. } => *genus,
            InvariantError::Overflow { genus, .. } => *genus as i64,
        }
    }

    /// Short tag for tables and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            InvariantError::Domain { .. } => "domain",
            InvariantError::Overflow { .. } => "overflow",
        }
    }
}
