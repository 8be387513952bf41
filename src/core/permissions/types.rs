//! Permission type definitions

use serde::{Deserialize, Serialize};

use crate::core::org::OrgNodeId;
use crate::core::scope::Scope;

/// A single business-function grant.
///
/// `org_id` is `None` for account-wide grants and `Some` for grants
/// scoped to one organisation node. Equality covers all fields; the
/// grant diff relies on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Friendly name of the owning account
    pub account_friendly_name: String,
    /// Business function the grant confers
    pub business_function: String,
    /// Role the grant is attached to
    pub role: String,
    /// Widest scope at which the function may be exercised
    pub scope: Scope,
    /// Organisation node the grant is scoped to; `None` = account-wide
    pub org_id: Option<OrgNodeId>,
}

/// Organisation summary for a caller's preferred restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgSummary {
    /// Home team
    pub team_id: OrgNodeId,
    /// Home circle
    pub circle_id: OrgNodeId,
    /// Home super-circle
    pub super_circle_id: OrgNodeId,
    /// Scope conferred by the preferred restriction
    pub scope: Scope,
}

/// Reduced permission set returned to a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionsResponse {
    /// The caller's home organisation; omitted when no restriction is
    /// preferred, and always omitted for non-employees
    pub organisation: Option<OrgSummary>,
    /// Role-filtered, scope-reduced grants
    pub grants: Vec<PermissionGrant>,
}

/// Result of diffing current against desired grants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantDiff {
    /// Desired grants not currently stored
    pub to_add: Vec<PermissionGrant>,
    /// Stored grants not present in the desired set
    pub to_remove: Vec<PermissionGrant>,
}

impl GrantDiff {
    /// Whether the diff changes nothing
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
