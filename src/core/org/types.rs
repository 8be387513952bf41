//! Organisation type definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::scope::Scope;

/// Account identifier
pub type AccountId = i64;

/// Organisation node identifier
pub type OrgNodeId = i64;

/// Level of a node in the 3-tier organisation hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgLevel {
    /// Leaf level
    Team,
    /// Middle level
    Circle,
    /// Root level
    SuperCircle,
}

/// A single organisation node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgNode {
    /// Node identifier, unique within the account
    pub id: OrgNodeId,
    /// Display name
    pub name: String,
    /// Hierarchy level
    pub level: OrgLevel,
    /// Parent node; `None` for super-circles
    pub parent_id: Option<OrgNodeId>,
}

/// A node together with its children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgTreeNode {
    /// The node itself
    pub node: OrgNode,
    /// Child subtrees; empty for teams
    pub children: Vec<OrgTreeNode>,
}

/// The organisation tree for one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgTree {
    /// Owning account
    pub account_id: AccountId,
    /// Super-circle roots
    pub roots: Vec<OrgTreeNode>,
}

impl OrgTree {
    /// An empty tree for the given account
    pub fn empty(account_id: AccountId) -> Self {
        Self {
            account_id,
            roots: Vec::new(),
        }
    }

    /// Total node count across all levels
    pub fn node_count(&self) -> usize {
        fn count(node: &OrgTreeNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

/// Flattened ancestry for one team node.
///
/// Derived from an [`OrgTree`] by lookup; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorChain {
    /// The team itself
    pub team_id: OrgNodeId,
    /// The team's circle
    pub circle_id: OrgNodeId,
    /// The circle's super-circle
    pub super_circle_id: OrgNodeId,
}

impl AncestorChain {
    /// Locate `team_id` in the tree and flatten its ancestry.
    ///
    /// Returns `None` when the team is not present in the tree.
    pub fn for_team(tree: &OrgTree, team_id: OrgNodeId) -> Option<Self> {
        for super_circle in &tree.roots {
            for circle in &super_circle.children {
                for team in &circle.children {
                    if team.node.id == team_id {
                        return Some(Self {
                            team_id,
                            circle_id: circle.node.id,
                            super_circle_id: super_circle.node.id,
                        });
                    }
                }
            }
        }
        None
    }
}

/// One membership restriction held by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// Team membership
    pub team_id: OrgNodeId,
    /// Circle the team belongs to
    pub circle_id: OrgNodeId,
    /// Super-circle the circle belongs to
    pub super_circle_id: OrgNodeId,
    /// Widest scope this membership confers
    pub scope: Scope,
    /// Whether this is the caller's "home" node for display purposes.
    /// At most one restriction per caller carries this flag.
    pub preferred: bool,
}

/// Resolved caller identity, supplied by the identity layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallerDescriptor {
    /// Roles active on this request
    pub active_roles: HashSet<String>,
    /// Organisation memberships with their scopes
    pub restrictions: Vec<Restriction>,
}

impl CallerDescriptor {
    /// The caller's preferred restriction, if one is marked
    pub fn preferred_restriction(&self) -> Option<&Restriction> {
        self.restrictions.iter().find(|r| r.preferred)
    }
}

/// Principal kind of the caller, dispatched by exhaustive matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerKind {
    /// An employee of the account
    Employee,
    /// A customer with an authenticated session
    CustomerAuthenticated,
    /// A customer without an authenticated session
    CustomerUnauthenticated,
    /// A first-party platform service
    InternalService,
    /// A third-party integration service
    ForeignService,
}
