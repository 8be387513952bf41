//! Permission filtering, reduction, and response building

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::types::{OrgSummary, PermissionGrant, PermissionsResponse};
use crate::config::EngineConfig;
use crate::core::org::{CallerDescriptor, CallerKind, OrgNodeId};
use crate::core::scope::Scope;
use crate::utils::error::{EngineError, Result};

/// Keep only grants whose role is active on the request
pub fn filter_allowed(grants: &[PermissionGrant], active_roles: &HashSet<String>) -> Vec<PermissionGrant> {
    grants
        .iter()
        .filter(|g| active_roles.contains(&g.role))
        .cloned()
        .collect()
}

/// Reduce grants to the widest-scope grant per (function, organisation).
///
/// Groups appear in first-encounter order. When two grants tie at the
/// maximum scope the first encountered in input order survives, so the
/// result is deterministic for a given input order; callers must not
/// read anything further into which tied grant wins.
pub fn reduce_to_max_scope(allowed: &[PermissionGrant]) -> Vec<PermissionGrant> {
    let mut index: HashMap<(&str, Option<OrgNodeId>), usize> = HashMap::new();
    let mut reduced: Vec<PermissionGrant> = Vec::new();

    for grant in allowed {
        let key = (grant.business_function.as_str(), grant.org_id);
        match index.get(&key) {
            Some(&slot) => {
                if grant.scope > reduced[slot].scope {
                    reduced[slot] = grant.clone();
                }
            }
            None => {
                index.insert(key, reduced.len());
                reduced.push(grant.clone());
            }
        }
    }

    reduced
}

/// Stateless reducer turning stored grants into caller responses.
///
/// Fixed grant constants (the synthetic system-tooling grant, the
/// non-employee role mapping) are injected through [`EngineConfig`] at
/// construction so tests can override them.
#[derive(Debug, Clone)]
pub struct PermissionEngine {
    config: EngineConfig,
}

impl PermissionEngine {
    /// Create an engine over the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Build the permission response for an employee caller.
    ///
    /// The organisation summary reflects the caller's preferred
    /// restriction and is omitted when none is marked. The synthetic
    /// system-tooling grant is always prepended with its fixed role and
    /// account-wide scope, regardless of stored grants.
    pub fn build_response_for_employee(
        &self,
        account_friendly_name: &str,
        caller: &CallerDescriptor,
        grants: &[PermissionGrant],
    ) -> PermissionsResponse {
        let organisation = caller.preferred_restriction().map(|r| OrgSummary {
            team_id: r.team_id,
            circle_id: r.circle_id,
            super_circle_id: r.super_circle_id,
            scope: r.scope,
        });

        let synthetic = PermissionGrant {
            account_friendly_name: account_friendly_name.to_string(),
            business_function: self.config.system_tooling.business_function.clone(),
            role: self.config.system_tooling.role.clone(),
            scope: Scope::Account,
            org_id: None,
        };

        let mut reduced = vec![synthetic];
        reduced.extend(reduce_to_max_scope(&filter_allowed(
            grants,
            &caller.active_roles,
        )));

        debug!(
            account = account_friendly_name,
            grants = reduced.len(),
            "Built employee permission response"
        );

        PermissionsResponse {
            organisation,
            grants: reduced,
        }
    }

    /// Build the permission response for a non-employee caller.
    ///
    /// The principal kind maps to exactly one fixed role string; the
    /// filter + reduce pipeline then runs with that single-role set.
    /// Organisation data is omitted entirely.
    pub fn build_response_for_non_employee(
        &self,
        kind: CallerKind,
        grants: &[PermissionGrant],
    ) -> Result<PermissionsResponse> {
        let role = match kind {
            CallerKind::Employee => {
                return Err(EngineError::validation(
                    "employee callers are served by build_response_for_employee",
                ));
            }
            CallerKind::CustomerAuthenticated => &self.config.non_employee_roles.customer_authenticated,
            CallerKind::CustomerUnauthenticated => {
                &self.config.non_employee_roles.customer_unauthenticated
            }
            CallerKind::InternalService => &self.config.non_employee_roles.internal_service,
            CallerKind::ForeignService => &self.config.non_employee_roles.foreign_service,
        };

        let roles: HashSet<String> = std::iter::once(role.clone()).collect();
        let reduced = reduce_to_max_scope(&filter_allowed(grants, &roles));

        debug!(?kind, role = %role, grants = reduced.len(), "Built non-employee permission response");

        Ok(PermissionsResponse {
            organisation: None,
            grants: reduced,
        })
    }
}
