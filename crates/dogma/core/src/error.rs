//! Common error infrastructure for dogma-core.
//!
//! Domain-specific errors (`FitError`, `RegistryError`, `OracleError`) live next
//! to the components that raise them. This module holds what they share: a
//! severity classification and the [`DogmaError`] trait.
//!
//! Only integrity and validation problems are errors. Routine absences (an
//! attribute the type does not define, a skill the character has not trained)
//! resolve to defaults, and circular attribute dependencies are reported as
//! diagnostics by the engine instead.

use crate::env::AttributeId;
use crate::fit::ItemId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the caller may retry with a different command.
    ///
    /// Examples: unsupported state for a module, charge loaded into a drone
    Recoverable,

    /// Validation error - the command referenced something that does not exist.
    ///
    /// Examples: item not in the fit, type id not in static data
    Validation,

    /// Internal error - unexpected state inconsistency in the engine.
    Internal,

    /// Fatal error - the loaded static data is corrupt or mismatched.
    ///
    /// Examples: a type references an effect id the registry does not know
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

    /// Returns true if this error points at corrupt data or an engine bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Item that triggered the error (if applicable).
    pub item: Option<ItemId>,

    /// Attribute involved in the error (if applicable).
    pub attribute: Option<AttributeId>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            item: None,
            attribute: None,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }

    #[must_use]
    pub const fn with_attribute(mut self, attribute: AttributeId) -> Self {
        self.attribute = Some(attribute);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all dogma-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable SCREAMING_CASE identifiers for logs and tests
pub trait DogmaError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
