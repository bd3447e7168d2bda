//! Fit mutation errors.

use crate::effect::RegistryError;
use crate::env::{OracleError, TypeId};
use crate::error::{DogmaError, ErrorContext, ErrorSeverity};

use super::item::{ItemId, ItemKind, ItemState};

/// Errors surfaced while executing a [`super::FitCommand`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FitError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("item {0} is not part of the fit")]
    ItemNotFound(ItemId),

    #[error("{kind} items cannot be added with add_item (type {type_id})")]
    UnsupportedKind { type_id: TypeId, kind: ItemKind },

    #[error("{type_id} cannot be put in state {state} (maximum {max})")]
    UnsupportedState {
        type_id: TypeId,
        state: ItemState,
        max: ItemState,
    },

    #[error("item {0} cannot hold a charge")]
    InvalidChargeContainer(ItemId),

    #[error("{0} is not a skill")]
    NotASkill(TypeId),

    #[error("skill level {level} for {skill} is out of range")]
    InvalidSkillLevel { skill: TypeId, level: u8 },
}

impl DogmaError for FitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FitError::Oracle(e) => e.severity(),
            FitError::Registry(e) => e.severity(),
            FitError::ItemNotFound(_)
            | FitError::NotASkill(_)
            | FitError::InvalidSkillLevel { .. } => ErrorSeverity::Validation,
            FitError::UnsupportedKind { .. }
            | FitError::UnsupportedState { .. }
            | FitError::InvalidChargeContainer(_) => ErrorSeverity::Recoverable,
        }
    }

    fn context(&self) -> Option<ErrorContext> {
        match self {
            FitError::ItemNotFound(item) | FitError::InvalidChargeContainer(item) => {
                Some(ErrorContext::new().with_item(*item))
            }
            FitError::UnsupportedState { .. } => {
                Some(ErrorContext::new().with_message("state above the type's maximum"))
            }
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FitError::Oracle(e) => e.error_code(),
            FitError::Registry(e) => e.error_code(),
            FitError::ItemNotFound(_) => "FIT_ITEM_NOT_FOUND",
            FitError::UnsupportedKind { .. } => "FIT_UNSUPPORTED_KIND",
            FitError::UnsupportedState { .. } => "FIT_UNSUPPORTED_STATE",
            FitError::InvalidChargeContainer(_) => "FIT_INVALID_CHARGE_CONTAINER",
            FitError::NotASkill(_) => "FIT_NOT_A_SKILL",
            FitError::InvalidSkillLevel { .. } => "FIT_INVALID_SKILL_LEVEL",
        }
    }
}
