//! Settings cascade flow tests through the services

use std::sync::Arc;

use orgcfg_rs::core::cache::CachePolicy;
use orgcfg_rs::services::{DirectoryService, SettingsService};
use orgcfg_rs::storage::memory::MemoryStore;
use orgcfg_rs::utils::error::EngineError;

use crate::common::fixtures::{
    ACCOUNT_ID, account_setting, init_tracing, sample_tree, setting_override,
};

fn services(store: Arc<MemoryStore>) -> SettingsService {
    init_tracing();
    let policy = CachePolicy::default();
    let directory = Arc::new(DirectoryService::new(store.clone(), policy));
    SettingsService::new(store, directory, policy)
}

#[tokio::test]
async fn test_effective_settings_cascade_and_sibling_tiers() {
    let store = Arc::new(MemoryStore::new());
    store.put_org_tree(sample_tree());
    store.put_setting_overrides(
        ACCOUNT_ID,
        vec![
            setting_override(100, "wrap_up_seconds", "30"),
            setting_override(10, "wrap_up_seconds", "60"),
            setting_override(10, "queue_limit", "25"),
            setting_override(1, "after_call_survey", "on"),
        ],
    );
    store.put_account_settings(
        ACCOUNT_ID,
        vec![account_setting("wrap_up_seconds", "account-default")],
    );
    let settings = services(store);

    let effective = settings
        .effective_settings_for_team(ACCOUNT_ID, 100, false)
        .await
        .unwrap();

    let org_keys: Vec<(&str, &str)> = effective
        .org_settings
        .iter()
        .map(|s| (s.key.as_str(), s.value.as_str()))
        .collect();
    assert_eq!(
        org_keys,
        vec![
            ("wrap_up_seconds", "30"),
            ("queue_limit", "25"),
            ("after_call_survey", "on"),
        ]
    );

    // Account tier rides alongside, not deduplicated against the cascade
    assert_eq!(effective.account_settings.len(), 1);
    assert_eq!(effective.account_settings[0].value, "account-default");
}

#[tokio::test]
async fn test_effective_settings_unknown_team_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    store.put_org_tree(sample_tree());
    let settings = services(store);

    let result = settings
        .effective_settings_for_team(ACCOUNT_ID, 999, false)
        .await;
    assert!(matches!(result, Err(EngineError::NotFound(_))));
}

#[tokio::test]
async fn test_save_override_evicts_settings_cache() {
    let store = Arc::new(MemoryStore::new());
    store.put_org_tree(sample_tree());
    store.put_setting_overrides(ACCOUNT_ID, vec![setting_override(100, "queue_limit", "25")]);
    let settings = services(store);

    let before = settings
        .effective_settings_for_team(ACCOUNT_ID, 100, false)
        .await
        .unwrap();
    assert_eq!(before.org_settings[0].value, "25");

    settings
        .save_override(ACCOUNT_ID, setting_override(100, "queue_limit", "40"))
        .await
        .unwrap();

    // The cached pre-write generation is gone
    let after = settings
        .effective_settings_for_team(ACCOUNT_ID, 100, false)
        .await
        .unwrap();
    let values: Vec<&str> = after
        .org_settings
        .iter()
        .filter(|s| s.key == "queue_limit")
        .map(|s| s.value.as_str())
        .collect();
    assert!(values.contains(&"40"));
}

#[tokio::test]
async fn test_save_override_rejects_cross_tenant_write() {
    let store = Arc::new(MemoryStore::new());
    store.put_org_tree(sample_tree());
    let settings = services(store);

    let mut foreign = setting_override(100, "queue_limit", "40");
    foreign.account_id = ACCOUNT_ID + 1;

    let result = settings.save_override(ACCOUNT_ID, foreign).await;
    assert!(matches!(result, Err(EngineError::Forbidden(_))));
}

#[tokio::test]
async fn test_bypass_read_refreshes_settings() {
    let store = Arc::new(MemoryStore::new());
    store.put_org_tree(sample_tree());
    store.put_setting_overrides(ACCOUNT_ID, vec![setting_override(100, "queue_limit", "25")]);
    let settings = services(store.clone());

    // Warm the cache, then change the store behind the service's back
    settings
        .effective_settings_for_team(ACCOUNT_ID, 100, false)
        .await
        .unwrap();
    store.put_setting_overrides(ACCOUNT_ID, vec![setting_override(100, "queue_limit", "99")]);

    // Cached read still serves the old generation
    let cached = settings
        .effective_settings_for_team(ACCOUNT_ID, 100, false)
        .await
        .unwrap();
    assert_eq!(cached.org_settings[0].value, "25");

    // Bypass recomputes and re-populates
    let fresh = settings
        .effective_settings_for_team(ACCOUNT_ID, 100, true)
        .await
        .unwrap();
    assert_eq!(fresh.org_settings[0].value, "99");

    let after = settings
        .effective_settings_for_team(ACCOUNT_ID, 100, false)
        .await
        .unwrap();
    assert_eq!(after.org_settings[0].value, "99");
}
