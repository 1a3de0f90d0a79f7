//=========================================================================
// Handle Errors
//=========================================================================
//
// Failure taxonomy for session management and per-frame dispatch.
//
// None of these are fatal to the manager. Expected refusals (ownership
// conflicts, ancestor conflicts) leave state untouched; unreachable
// values halt only the operation that observed them.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::EntityId;
use crate::handles::HandleId;

//=== HandleError =========================================================

/// Errors reported by the handle manager and its sessions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// The entity already belongs to a session.
    #[error("{entity} is already owned by {owner}")]
    AlreadyOwned { entity: EntityId, owner: HandleId },

    /// The session does not exist (never created or already removed).
    #[error("{0} does not exist")]
    HandleNotFound(HandleId),

    /// The scene does not know this entity.
    #[error("{0} is not part of the scene")]
    EntityNotFound(EntityId),

    /// Removal requested for an entity the session does not own.
    #[error("{entity} is not a member of {handle}")]
    NotOwnedBy { entity: EntityId, handle: HandleId },

    /// The entity descends from an entity already in the group.
    #[error("{0} is a descendant of an already selected entity")]
    RelativeOfSelection(EntityId),

    /// An operation needed at least one target and got none.
    #[error("target list is empty")]
    EmptyTargets,

    /// A raw handle type value outside the defined set.
    #[error("unknown handle type value {0:#04x}")]
    UnknownHandleType(u8),

    /// The pointer camera could not be resolved, even after a retry.
    #[error("camera unavailable")]
    CameraUnavailable,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HandleError>;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_ids() {
        let err = HandleError::AlreadyOwned {
            entity: EntityId(7),
            owner: HandleId(2),
        };
        assert_eq!(err.to_string(), "Entity(7) is already owned by Handle(2)");

        let err = HandleError::UnknownHandleType(0x40);
        assert_eq!(err.to_string(), "unknown handle type value 0x40");
    }
}
