//! Visibility and permission scope model
//!
//! The ordered scope ladder is shared by the permission reducer and the
//! visibility pruner so the two stay consistent by construction.

use serde::{Deserialize, Serialize};

use super::org::Restriction;

/// Visibility/permission scope, ordered from narrowest to widest.
///
/// `NoAccess` and `SelfOnly` both mean "no organisation-tree visibility"
/// but are distinct values: `SelfOnly` still permits caller-local data
/// while `NoAccess` permits nothing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// No access at all
    #[default]
    NoAccess,
    /// Access to the caller's own data only
    SelfOnly,
    /// Access within the caller's team
    Team,
    /// Access within the caller's circle
    Circle,
    /// Account-wide access
    Account,
}

impl Scope {
    /// Whether this scope grants any organisation-tree visibility
    pub fn sees_org_tree(self) -> bool {
        self >= Scope::Team
    }
}

/// Maximum scope held across a caller's restrictions.
///
/// Returns [`Scope::NoAccess`] for an empty set. Pure function.
pub fn max_scope(restrictions: &[Restriction]) -> Scope {
    restrictions
        .iter()
        .map(|r| r.scope)
        .max()
        .unwrap_or(Scope::NoAccess)
}
