//! Scope-driven tree pruning

use std::collections::HashSet;
use tracing::debug;

use crate::core::org::{CallerDescriptor, OrgNodeId, OrgTree, OrgTreeNode};
use crate::core::scope::{Scope, max_scope};

/// Prune an organisation tree to what the caller may see.
///
/// - `NoAccess` and `SelfOnly` see an empty tree;
/// - `Account` sees the full input unchanged;
/// - `Circle` keeps the caller's super-circles and, within them, the
///   caller's circles with all their teams;
/// - `Team` additionally keeps only the caller's teams.
///
/// The result is always a subtree of the input: no node is fabricated,
/// and a node whose children were all filtered away is retained with an
/// empty children list.
pub fn prune(tree: &OrgTree, caller: &CallerDescriptor) -> OrgTree {
    let scope = max_scope(&caller.restrictions);

    if !scope.sees_org_tree() {
        debug!(account_id = tree.account_id, ?scope, "Pruned org tree to empty");
        return OrgTree::empty(tree.account_id);
    }

    if scope == Scope::Account {
        return tree.clone();
    }

    let super_circle_ids: HashSet<OrgNodeId> = caller
        .restrictions
        .iter()
        .map(|r| r.super_circle_id)
        .collect();
    let circle_ids: HashSet<OrgNodeId> =
        caller.restrictions.iter().map(|r| r.circle_id).collect();
    let team_ids: HashSet<OrgNodeId> = caller.restrictions.iter().map(|r| r.team_id).collect();

    let roots = tree
        .roots
        .iter()
        .filter(|sc| super_circle_ids.contains(&sc.node.id))
        .map(|sc| OrgTreeNode {
            node: sc.node.clone(),
            children: sc
                .children
                .iter()
                .filter(|c| circle_ids.contains(&c.node.id))
                .map(|c| OrgTreeNode {
                    node: c.node.clone(),
                    children: c
                        .children
                        .iter()
                        .filter(|t| scope != Scope::Team || team_ids.contains(&t.node.id))
                        .cloned()
                        .collect(),
                })
                .collect(),
        })
        .collect();

    let pruned = OrgTree {
        account_id: tree.account_id,
        roots,
    };

    debug!(
        account_id = tree.account_id,
        ?scope,
        nodes = pruned.node_count(),
        "Pruned org tree"
    );

    pruned
}
