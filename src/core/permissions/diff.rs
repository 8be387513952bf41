//! Desired-vs-current grant set diffing

use std::collections::{BTreeSet, HashSet};

use super::types::{GrantDiff, PermissionGrant};

/// Diff stored grants against a desired set.
///
/// Membership is decided by full-grant equality (all fields):
/// `to_remove = current \ desired`, `to_add = desired \ current`.
pub fn diff_grants(current: &[PermissionGrant], desired: &[PermissionGrant]) -> GrantDiff {
    let current_set: HashSet<&PermissionGrant> = current.iter().collect();
    let desired_set: HashSet<&PermissionGrant> = desired.iter().collect();

    GrantDiff {
        to_add: desired
            .iter()
            .filter(|g| !current_set.contains(*g))
            .cloned()
            .collect(),
        to_remove: current
            .iter()
            .filter(|g| !desired_set.contains(*g))
            .cloned()
            .collect(),
    }
}

/// Distinct roles affected by one add/remove batch, for the audit record.
///
/// An empty batch yields an empty summary; the batch's audit record is
/// still emitted.
pub fn role_summary(batch: &[PermissionGrant]) -> BTreeSet<String> {
    batch.iter().map(|g| g.role.clone()).collect()
}
