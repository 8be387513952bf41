//! Business-function permission reduction
//!
//! Filters stored grants down to a caller's active roles and reduces them
//! to the single widest-scope grant per (business function, organisation)
//! pair. Grant mutation support (diff + validation) lives here too; the
//! storage lifecycle of grants is external.

mod diff;
mod engine;
mod types;
mod validate;


pub use diff::{diff_grants, role_summary};
pub use engine::{PermissionEngine, filter_allowed, reduce_to_max_scope};
pub use types::{GrantDiff, OrgSummary, PermissionGrant, PermissionsResponse};
