//! Eager validation of desired grant sets
//!
//! Validation runs before any mutation is attempted, so the diff and the
//! write path only ever see already-valid desired state.

use super::engine::PermissionEngine;
use super::types::PermissionGrant;
use crate::utils::error::{EngineError, Result};

impl PermissionEngine {
    /// Validate a desired grant set against the account's allow-lists.
    ///
    /// Fails with `InvalidBusinessFunction` or `InvalidRole` when any
    /// grant falls outside the respective allow-list. The team-level
    /// check is batch-level, not per-grant: node-scoped grants pass as
    /// long as at least one of them names a team-level-eligible function.
    pub fn validate_desired_grants(&self, desired: &[PermissionGrant]) -> Result<()> {
        let config = self.config();

        for grant in desired {
            if !config
                .allowed_business_functions
                .contains(&grant.business_function)
            {
                return Err(EngineError::InvalidBusinessFunction(
                    grant.business_function.clone(),
                ));
            }
        }

        for grant in desired {
            if !config.allowed_roles.contains(&grant.role) {
                return Err(EngineError::InvalidRole(grant.role.clone()));
            }
        }

        let node_scoped: Vec<&PermissionGrant> =
            desired.iter().filter(|g| g.org_id.is_some()).collect();
        if !node_scoped.is_empty()
            && !node_scoped
                .iter()
                .any(|g| config.team_level_functions.contains(&g.business_function))
        {
            return Err(EngineError::TeamLevelNotPermitted(format!(
                "none of {} node-scoped grants name a team-level function",
                node_scoped.len()
            )));
        }

        Ok(())
    }
}
