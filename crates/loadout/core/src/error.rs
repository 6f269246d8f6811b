//! Common error infrastructure for loadout-core.
//!
//! Every fallible operation in this crate returns [`LoadoutError`]. The
//! [`CoreError`] trait classifies errors so callers (the UI and job layers)
//! can decide between rejecting input and reporting a bug.
//!
//! # Design Principles
//!
//! - **Fail fast on contract violations**: unknown IDs and kind mismatches are
//!   returned to the caller immediately, never silently ignored
//! - **Degrade on data inconsistencies**: problems found while restoring a save
//!   are logged and the offending entry is skipped (see [`crate::scribe`])
//! - **No retries**: everything here is in-memory book-keeping

use crate::defs::{ItemKind, MaterialKind};
use crate::ids::{GroupId, LoadoutId, SelectorId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed after the caller changes state
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: adding to a group that was removed in the same frame
    Recoverable,

    /// Examples: unknown selector, kind mismatch
    Validation,

    /// These indicate bugs and should be investigated.
    Internal,

    /// Examples: an undecodable save record
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all loadout-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by loadout, group, and selector operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadoutError {
    #[error("group {0} not found")]
    UnknownGroup(GroupId),

    #[error("group id {0} is already in use")]
    GroupIdInUse(GroupId),

    #[error("group id {0} is out of range")]
    GroupIdOutOfRange(GroupId),

    #[error("selector {selector} not found in group {group}")]
    UnknownSelector { group: GroupId, selector: SelectorId },

    #[error("selector for `{found}` cannot join a group targeting `{expected}`")]
    KindMismatch { expected: ItemKind, found: ItemKind },

    #[error("selector {0} is not a single-thing selector")]
    NotSingleSelector(SelectorId),

    #[error("unknown item definition `{0}`")]
    UnknownItem(ItemKind),

    #[error("unknown material definition `{0}`")]
    UnknownMaterial(MaterialKind),

    #[error("unknown generic category `{0}`")]
    UnknownCategory(String),

    #[error("loadout {0} not found")]
    UnknownLoadout(LoadoutId),

    #[error("save record could not be encoded or decoded: {0}")]
    Encoding(String),
}

impl CoreError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownGroup(_) | Self::UnknownSelector { .. } | Self::UnknownLoadout(_) => {
                ErrorSeverity::Recoverable
            }
            Self::KindMismatch { .. }
            | Self::NotSingleSelector(_)
            | Self::GroupIdInUse(_)
            | Self::GroupIdOutOfRange(_) => ErrorSeverity::Validation,
            Self::UnknownItem(_) | Self::UnknownMaterial(_) | Self::UnknownCategory(_) => {
                ErrorSeverity::Internal
            }
            Self::Encoding(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownGroup(_) => "UNKNOWN_GROUP",
            Self::GroupIdInUse(_) => "GROUP_ID_IN_USE",
            Self::GroupIdOutOfRange(_) => "GROUP_ID_OUT_OF_RANGE",
            Self::UnknownSelector { .. } => "UNKNOWN_SELECTOR",
            Self::KindMismatch { .. } => "KIND_MISMATCH",
            Self::NotSingleSelector(_) => "NOT_SINGLE_SELECTOR",
            Self::UnknownItem(_) => "UNKNOWN_ITEM",
            Self::UnknownMaterial(_) => "UNKNOWN_MATERIAL",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Self::UnknownLoadout(_) => "UNKNOWN_LOADOUT",
            Self::Encoding(_) => "ENCODING",
        }
    }
}

pub type Result<T> = core::result::Result<T, LoadoutError>;
