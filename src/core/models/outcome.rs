//! Emission outcome

use std::fmt;
use std::path::PathBuf;

/// What happened to one attestation
///
/// Business callers are free to ignore this; it exists for logs and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The commitment service accepted the attestation
    Delivered,
    /// Delivery failed and the attestation was written to this spool file
    Spooled(PathBuf),
    /// Delivery and spooling both failed
    Lost(String),
}

impl EmitOutcome {
    /// Short machine-friendly label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Spooled(_) => "spooled",
            Self::Lost(_) => "lost",
        }
    }

    /// Whether the attestation survived (delivered or spooled)
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        !matches!(self, Self::Lost(_))
    }
}

impl fmt::Display for EmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => write!(f, "delivered"),
            Self::Spooled(path) => write!(f, "spooled to {}", path.display()),
            Self::Lost(reason) => write!(f, "lost: {reason}"),
        }
    }
}
