//! Grant mutation flow tests: validation, diffing, cache eviction, audit

use std::sync::Arc;

use orgcfg_rs::core::cache::CachePolicy;
use orgcfg_rs::services::PermissionService;
use orgcfg_rs::storage::memory::{MemoryAuditSink, MemoryStore};
use orgcfg_rs::storage::{AuditAction, AuditRecord, AuditSink, ConfigStore};
use orgcfg_rs::utils::error::{EngineError, Result};
use orgcfg_rs::{CallerKind, PermissionEngine, Scope};

use crate::common::fixtures::{
    ACCOUNT_ID, ACCOUNT_NAME, FailingDeleteStore, caller_with_scope, engine_config, grant,
    init_tracing,
};

fn service(store: Arc<MemoryStore>, audit: Arc<MemoryAuditSink>) -> PermissionService {
    init_tracing();
    PermissionService::new(
        store,
        audit,
        PermissionEngine::new(engine_config()),
        CachePolicy::default(),
    )
}

#[tokio::test]
async fn test_employee_permissions_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    store.put_grants(
        ACCOUNT_NAME,
        vec![
            grant("handleCalls", "agent", Scope::Team, Some(100)),
            grant("handleCalls", "supervisor", Scope::Circle, Some(100)),
            grant("viewReports", "supervisor", Scope::Account, None),
        ],
    );
    let service = service(store, Arc::new(MemoryAuditSink::new()));

    let caller = caller_with_scope(Scope::Team);
    let response = service
        .permissions_for_employee(ACCOUNT_NAME, &caller, false)
        .await
        .unwrap();

    // Synthetic grant first, then the agent's reduced grant; supervisor
    // grants are filtered out by the active role set
    assert_eq!(response.grants.len(), 2);
    assert_eq!(response.grants[0].business_function, "systemTooling");
    assert_eq!(response.grants[1].business_function, "handleCalls");
    assert_eq!(response.grants[1].scope, Scope::Team);
    assert_eq!(response.organisation.unwrap().team_id, 100);
}

#[tokio::test]
async fn test_non_employee_permissions_omit_organisation() {
    let store = Arc::new(MemoryStore::new());
    store.put_grants(
        ACCOUNT_NAME,
        vec![grant("viewReports", "customer", Scope::SelfOnly, None)],
    );
    let service = service(store, Arc::new(MemoryAuditSink::new()));

    let response = service
        .permissions_for_non_employee(CallerKind::CustomerAuthenticated, ACCOUNT_NAME, false)
        .await
        .unwrap();

    assert!(response.organisation.is_none());
    assert_eq!(response.grants.len(), 1);
    assert_eq!(response.grants[0].role, "customer");
}

#[tokio::test]
async fn test_replace_grants_evicts_cache() {
    let store = Arc::new(MemoryStore::new());
    let old = grant("handleCalls", "agent", Scope::Team, Some(100));
    store.put_grants(ACCOUNT_NAME, vec![old.clone()]);
    let service = service(store, Arc::new(MemoryAuditSink::new()));

    // Populate the cache with the pre-write generation
    let before = service.grants(ACCOUNT_NAME, false).await.unwrap();
    assert_eq!(before, vec![old.clone()]);

    let desired = vec![grant("handleCalls", "agent", Scope::Circle, Some(100))];
    let diff = service
        .replace_grants(ACCOUNT_ID, ACCOUNT_NAME, desired.clone())
        .await
        .unwrap();
    assert_eq!(diff.to_remove, vec![old]);
    assert_eq!(diff.to_add, desired.clone());

    // A plain cached read must not serve the pre-write value
    let after = service.grants(ACCOUNT_NAME, false).await.unwrap();
    assert_eq!(after, desired);
}

#[tokio::test]
async fn test_replace_grants_audits_both_batches() {
    let store = Arc::new(MemoryStore::new());
    store.put_grants(
        ACCOUNT_NAME,
        vec![grant("viewReports", "supervisor", Scope::Account, None)],
    );
    let audit = Arc::new(MemoryAuditSink::new());
    let service = service(store, audit.clone());

    service
        .replace_grants(
            ACCOUNT_ID,
            ACCOUNT_NAME,
            vec![
                grant("viewReports", "supervisor", Scope::Account, None),
                grant("handleCalls", "agent", Scope::Team, Some(100)),
            ],
        )
        .await
        .unwrap();

    let records = audit.records();
    assert_eq!(records.len(), 2);
    // The remove batch was empty but its record is still emitted
    assert_eq!(records[0].action, AuditAction::GrantsRemoved);
    assert!(records[0].roles.is_empty());
    assert_eq!(records[1].action, AuditAction::GrantsAdded);
    assert_eq!(
        records[1].roles.iter().collect::<Vec<_>>(),
        vec!["agent"]
    );
}

#[tokio::test]
async fn test_replace_grants_noop_on_empty_diff() {
    let store = Arc::new(MemoryStore::new());
    let existing = vec![grant("handleCalls", "agent", Scope::Team, Some(100))];
    store.put_grants(ACCOUNT_NAME, existing.clone());
    let audit = Arc::new(MemoryAuditSink::new());
    let service = service(store, audit.clone());

    let diff = service
        .replace_grants(ACCOUNT_ID, ACCOUNT_NAME, existing)
        .await
        .unwrap();

    assert!(diff.is_empty());
    assert!(audit.records().is_empty());
}

#[tokio::test]
async fn test_replace_grants_validates_before_mutating() {
    let store = Arc::new(MemoryStore::new());
    let existing = vec![grant("handleCalls", "agent", Scope::Team, Some(100))];
    store.put_grants(ACCOUNT_NAME, existing.clone());
    let service = service(store.clone(), Arc::new(MemoryAuditSink::new()));

    let result = service
        .replace_grants(
            ACCOUNT_ID,
            ACCOUNT_NAME,
            vec![grant("launchRockets", "agent", Scope::Team, None)],
        )
        .await;

    assert!(matches!(
        result,
        Err(EngineError::InvalidBusinessFunction(_))
    ));
    // Nothing was mutated
    let stored = store.load_grants(ACCOUNT_NAME).await.unwrap();
    assert_eq!(stored, existing);
}

#[tokio::test]
async fn test_replace_grants_rejects_cross_tenant_grant() {
    let store = Arc::new(MemoryStore::new());
    let service = service(store, Arc::new(MemoryAuditSink::new()));

    let mut foreign = grant("handleCalls", "agent", Scope::Team, Some(100));
    foreign.account_friendly_name = "globex".to_string();

    let result = service
        .replace_grants(ACCOUNT_ID, ACCOUNT_NAME, vec![foreign])
        .await;
    assert!(matches!(result, Err(EngineError::Forbidden(_))));
}

#[tokio::test]
async fn test_failed_write_still_evicts_cache() {
    let inner = Arc::new(MemoryStore::new());
    inner.put_grants(
        ACCOUNT_NAME,
        vec![grant("viewReports", "supervisor", Scope::Account, None)],
    );
    let store = Arc::new(FailingDeleteStore {
        inner: inner.clone(),
    });
    let service = PermissionService::new(
        store,
        Arc::new(MemoryAuditSink::new()),
        PermissionEngine::new(engine_config()),
        CachePolicy::default(),
    );

    // Cache the pre-write generation
    service.grants(ACCOUNT_NAME, false).await.unwrap();

    // The remove batch fails; the mutation errors out
    let result = service
        .replace_grants(
            ACCOUNT_ID,
            ACCOUNT_NAME,
            vec![grant("handleCalls", "agent", Scope::Team, Some(100))],
        )
        .await;
    assert!(matches!(result, Err(EngineError::Persistence(_))));

    // Eviction was still attempted: the next read recomputes from the
    // store rather than serving the cached generation
    inner.put_grants(
        ACCOUNT_NAME,
        vec![grant("manageQueues", "supervisor", Scope::Account, None)],
    );
    let after = service.grants(ACCOUNT_NAME, false).await.unwrap();
    assert_eq!(after[0].business_function, "manageQueues");
}

/// Audit sink that always fails
struct FailingAuditSink;

#[async_trait::async_trait]
impl AuditSink for FailingAuditSink {
    async fn record(&self, _record: AuditRecord) -> Result<()> {
        Err(EngineError::persistence("audit pipe broken"))
    }
}

#[tokio::test]
async fn test_audit_failure_does_not_fail_mutation() {
    let store = Arc::new(MemoryStore::new());
    let service = PermissionService::new(
        store.clone(),
        Arc::new(FailingAuditSink),
        PermissionEngine::new(engine_config()),
        CachePolicy::default(),
    );

    let desired = vec![grant("handleCalls", "agent", Scope::Team, Some(100))];
    let diff = service
        .replace_grants(ACCOUNT_ID, ACCOUNT_NAME, desired.clone())
        .await
        .unwrap();

    assert_eq!(diff.to_add, desired.clone());
    assert_eq!(store.load_grants(ACCOUNT_NAME).await.unwrap(), desired);
}
