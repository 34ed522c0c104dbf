//! The module contains the error the engine can throw.
//!
//! Recoverable domain conditions each get a dedicated variant so callers can
//! map them to typed outcomes; only [`Database`] represents an actual
//! infrastructure fault.
//!
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A field failed domain validation.
    #[error("{0}")]
    Validation(String),
    /// An identifier is not a 24-character hexadecimal string.
    #[error("invalid id \"{0}\": expected 24 hexadecimal characters")]
    InvalidId(String),
    #[error("no establishment with id \"{0}\"")]
    EstablishmentNotFound(String),
    #[error("no release with id \"{0}\"")]
    ReleaseNotFound(String),
    /// A release names an establishment the catalog does not know.
    #[error("no establishment named \"{0}\"")]
    UnknownEstablishment(String),
    /// An establishment with the same name is already present.
    #[error("establishment \"{0}\" already present")]
    Conflict(String),
    /// An update matched no row.
    #[error("update was not acknowledged")]
    UpdateRejected,
    /// A removal matched no row.
    #[error("removal was not acknowledged")]
    RemoveRejected,
    /// A stored release references a catalog entry that no longer resolves.
    #[error("release references unknown establishment \"{0}\"")]
    Integrity(String),
    /// The ledger holds no releases to aggregate.
    #[error("no releases recorded")]
    NoReleases,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidId(a), Self::InvalidId(b)) => a == b,
            (Self::EstablishmentNotFound(a), Self::EstablishmentNotFound(b)) => a == b,
            (Self::ReleaseNotFound(a), Self::ReleaseNotFound(b)) => a == b,
            (Self::UnknownEstablishment(a), Self::UnknownEstablishment(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::UpdateRejected, Self::UpdateRejected) => true,
            (Self::RemoveRejected, Self::RemoveRejected) => true,
            (Self::Integrity(a), Self::Integrity(b)) => a == b,
            (Self::NoReleases, Self::NoReleases) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
