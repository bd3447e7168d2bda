//! Static-data access errors.

use crate::error::{DogmaError, ErrorSeverity};

use super::ids::{GroupId, TypeId};

/// Errors raised when static data referenced by a fit is missing.
///
/// The engine only consults static data on fit mutation, so these surface from
/// `DogmaEngine::execute` and never during attribute reads.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Type definition was not found by id.
    #[error("type definition {0} not found")]
    TypeNotFound(TypeId),

    /// Group referenced by a type definition was not found.
    #[error("group {group} of type {type_id} not found")]
    GroupNotFound { type_id: TypeId, group: GroupId },

    /// Type with the given name was not found.
    #[error("type named '{0}' not found")]
    TypeNameNotFound(String),
}

impl DogmaError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::TypeNotFound(_) | OracleError::TypeNameNotFound(_) => {
                ErrorSeverity::Validation
            }
            // A type pointing at a missing group means the data set is inconsistent
            OracleError::GroupNotFound { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::TypeNotFound(_) => "ORACLE_TYPE_NOT_FOUND",
            OracleError::GroupNotFound { .. } => "ORACLE_GROUP_NOT_FOUND",
            OracleError::TypeNameNotFound(_) => "ORACLE_TYPE_NAME_NOT_FOUND",
        }
    }
}
