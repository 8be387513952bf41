//! Three-tier settings cascade

use std::collections::HashSet;
use tracing::debug;

use super::types::SettingOverride;
use crate::core::org::AncestorChain;

/// Resolve the effective organisation settings for one team node.
///
/// Tiers are evaluated team-first with first-match-wins by key:
///
/// 1. every override attached to the team;
/// 2. circle overrides whose key is not already taken by the team tier;
/// 3. super-circle overrides whose key is not defined at *both* the team
///    and the circle.
///
/// Step 3 intentionally uses the intersection of team and circle keys,
/// not their union. A key defined at team and circle is therefore
/// excluded from the super-circle tier, but a key defined at only one of
/// them is not, so the resolved list can carry that key twice. This
/// matches the observed behaviour of real accounts and must not be
/// "corrected" to transitive override semantics.
///
/// Pure over its inputs.
pub fn resolve(all_settings: &[SettingOverride], chain: &AncestorChain) -> Vec<SettingOverride> {
    let team_keys: HashSet<&str> = all_settings
        .iter()
        .filter(|s| s.org_id == chain.team_id)
        .map(|s| s.key.as_str())
        .collect();
    let circle_keys: HashSet<&str> = all_settings
        .iter()
        .filter(|s| s.org_id == chain.circle_id)
        .map(|s| s.key.as_str())
        .collect();
    // Only keys defined at both lower tiers block the super tier.
    let blocked_keys: HashSet<&str> = team_keys.intersection(&circle_keys).copied().collect();

    let team_tier = all_settings
        .iter()
        .filter(|s| s.org_id == chain.team_id)
        .cloned();
    let circle_tier = all_settings
        .iter()
        .filter(|s| s.org_id == chain.circle_id && !team_keys.contains(s.key.as_str()))
        .cloned();
    let super_tier = all_settings
        .iter()
        .filter(|s| s.org_id == chain.super_circle_id && !blocked_keys.contains(s.key.as_str()))
        .cloned();

    let resolved: Vec<SettingOverride> = team_tier.chain(circle_tier).chain(super_tier).collect();

    debug!(
        team_id = chain.team_id,
        circle_id = chain.circle_id,
        super_circle_id = chain.super_circle_id,
        resolved = resolved.len(),
        "Resolved organisation settings cascade"
    );

    resolved
}
