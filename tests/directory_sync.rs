//! Directory facade and denormalization re-sync
//!
//! Catalog edits leave AccountSkill copies stale unless a re-sync runs,
//! either on demand or automatically when the directory is configured to.

use std::sync::Arc;

use skill_directory::{
    resync_denormalized, CatalogSkillChanges, Config, ErrorKind, MemoryStore, NewAccount,
    NewAccountSkill, NewCatalogSkill, ProficiencyLevel, SkillCategory, SkillDirectory,
    SkillQuery, SkillStore, SledStore,
};

fn new_account(handle: &str) -> NewAccount {
    NewAccount {
        handle: handle.into(),
        display_name: handle.to_uppercase(),
        ..Default::default()
    }
}

fn new_skill(level: &str, years: i64) -> NewAccountSkill {
    NewAccountSkill {
        proficiency: level.into(),
        years_of_experience: years,
        last_used: None,
        notes: Some("  production services  ".into()),
    }
}

/// Catalog with `k8s` under Cloud, held by two accounts
async fn populated(store: Arc<dyn SkillStore>, resync: bool) -> SkillDirectory {
    let directory = SkillDirectory::new(store).with_resync(resync);
    directory
        .add_catalog_skill(NewCatalogSkill {
            skill_id: "k8s".into(),
            display_name: "Kubernetes".into(),
            category: "cloud".into(),
            tags: vec!["containers".into()],
            ..Default::default()
        })
        .await
        .unwrap();

    for (handle, level, years) in [("jane", "Expert", 7), ("mo_b", "Beginner", 1)] {
        directory.register_account(new_account(handle)).await.unwrap();
        directory
            .add_skill(handle, "k8s", new_skill(level, years))
            .await
            .unwrap();
    }
    directory
}

fn rename_and_move() -> CatalogSkillChanges {
    CatalogSkillChanges {
        display_name: Some("Kubernetes (k8s)".into()),
        category: Some("DevOps".into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_add_skill_copies_catalog_fields() {
    let directory = populated(Arc::new(MemoryStore::new()), false).await;

    let jane = directory
        .store()
        .get_account_skill("jane", "k8s")
        .await
        .unwrap();
    assert_eq!(jane.skill_name, "Kubernetes");
    assert_eq!(jane.category, SkillCategory::Cloud);
    assert_eq!(jane.proficiency, ProficiencyLevel::Expert);
    assert_eq!(jane.notes, "production services");
    assert_eq!(jane.endorsements, 0);
}

#[tokio::test]
async fn test_add_skill_requires_catalog_entry() {
    let directory = populated(Arc::new(MemoryStore::new()), false).await;

    let err = directory
        .add_skill("jane", "haskell", new_skill("Beginner", 0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = directory
        .add_skill("jane", "k8s", new_skill("Guru", 3))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidField);

    let err = directory
        .add_skill("mo_b", "k8s", new_skill("Expert", 101))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidField);
}

#[tokio::test]
async fn test_catalog_edit_leaves_copies_stale_by_default() {
    let directory = populated(Arc::new(MemoryStore::new()), false).await;

    let edit = directory
        .edit_catalog_skill("k8s", rename_and_move())
        .await
        .unwrap();
    assert!(edit.resync.is_none());
    assert_eq!(edit.skill.category, SkillCategory::DevOps);

    let jane = directory
        .store()
        .get_account_skill("jane", "k8s")
        .await
        .unwrap();
    assert_eq!(jane.skill_name, "Kubernetes");
    assert_eq!(jane.category, SkillCategory::Cloud);

    // Index queries still see the old category
    let cloud = directory
        .find(&SkillQuery::new(SkillCategory::Cloud).with_skill("k8s"))
        .await
        .unwrap();
    assert_eq!(cloud.len(), 2);
    let devops = directory
        .find(&SkillQuery::new(SkillCategory::DevOps).with_skill("k8s"))
        .await
        .unwrap();
    assert!(devops.is_empty());
}

async fn check_resync_rewrites_stale_copies(store: Arc<dyn SkillStore>) {
    let directory = populated(store, false).await;
    directory
        .edit_catalog_skill("k8s", rename_and_move())
        .await
        .unwrap();

    let report = directory.resync("K8S").await.unwrap();
    assert_eq!(report.skill_id, "k8s");
    assert_eq!(report.examined, 2);
    assert_eq!(report.updated, 2);
    assert_eq!(report.skipped, 0);
    assert!(report.is_complete());

    let devops = directory
        .find(&SkillQuery::new(SkillCategory::DevOps).with_skill("k8s"))
        .await
        .unwrap();
    let handles: Vec<&str> = devops.iter().map(|s| s.handle.as_str()).collect();
    assert_eq!(handles, vec!["mo_b", "jane"]);
    assert!(devops.iter().all(|s| s.skill_name == "Kubernetes (k8s)"));

    let cloud = directory
        .find(&SkillQuery::new(SkillCategory::Cloud))
        .await
        .unwrap();
    assert!(cloud.is_empty());

    // Nothing left to do on a second pass
    let again = directory.resync("k8s").await.unwrap();
    assert_eq!(again.examined, 2);
    assert_eq!(again.updated, 0);
}

#[tokio::test]
async fn test_resync_rewrites_stale_copies_in_memory() {
    check_resync_rewrites_stale_copies(Arc::new(MemoryStore::new())).await;
}

#[tokio::test]
async fn test_resync_rewrites_stale_copies_in_sled() {
    check_resync_rewrites_stale_copies(Arc::new(SledStore::temporary().await.unwrap())).await;
}

async fn check_resync_keeps_concurrent_endorsements(store: Arc<dyn SkillStore>) {
    let directory = Arc::new(populated(store, false).await);
    directory
        .edit_catalog_skill("k8s", rename_and_move())
        .await
        .unwrap();

    let mut endorsements = Vec::new();
    for _ in 0..20 {
        let directory = Arc::clone(&directory);
        endorsements.push(tokio::spawn(async move {
            directory.endorse("jane", "k8s").await
        }));
    }
    let resync = {
        let directory = Arc::clone(&directory);
        tokio::spawn(async move { directory.resync("k8s").await })
    };

    for task in endorsements {
        task.await.unwrap().unwrap();
    }
    let report = resync.await.unwrap().unwrap();
    assert!(report.is_complete());
    assert_eq!(report.updated + report.skipped, 2);

    let jane = directory
        .store()
        .get_account_skill("jane", "k8s")
        .await
        .unwrap();
    assert_eq!(jane.endorsements, 20);
    assert_eq!(jane.skill_name, "Kubernetes (k8s)");
    assert_eq!(jane.category, SkillCategory::DevOps);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_resync_keeps_concurrent_endorsements_in_memory() {
    check_resync_keeps_concurrent_endorsements(Arc::new(MemoryStore::new())).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_resync_keeps_concurrent_endorsements_in_sled() {
    check_resync_keeps_concurrent_endorsements(Arc::new(SledStore::temporary().await.unwrap()))
        .await;
}

#[tokio::test]
async fn test_resync_preserves_per_account_fields() {
    let directory = populated(Arc::new(MemoryStore::new()), false).await;
    directory.endorse("jane", "k8s").await.unwrap();
    directory.endorse("jane", "k8s").await.unwrap();

    let before = directory
        .store()
        .get_account_skill("jane", "k8s")
        .await
        .unwrap();
    directory
        .edit_catalog_skill("k8s", rename_and_move())
        .await
        .unwrap();
    directory.resync("k8s").await.unwrap();

    let after = directory
        .store()
        .get_account_skill("jane", "k8s")
        .await
        .unwrap();
    assert_eq!(after.endorsements, 2);
    assert_eq!(after.years_of_experience, before.years_of_experience);
    assert_eq!(after.proficiency, before.proficiency);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn test_configured_directory_resyncs_on_edit() {
    let config = Config {
        resync_on_catalog_update: true,
        ..Config::default()
    };
    let store: Arc<dyn SkillStore> = Arc::new(MemoryStore::new());
    let directory = SkillDirectory::from_config(Arc::clone(&store), &config);

    directory
        .add_catalog_skill(NewCatalogSkill {
            skill_id: "sql".into(),
            display_name: "SQL".into(),
            category: "Database".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    directory.register_account(new_account("jane")).await.unwrap();
    directory
        .add_skill("jane", "sql", new_skill("Advanced", 10))
        .await
        .unwrap();

    let edit = directory
        .edit_catalog_skill(
            "sql",
            CatalogSkillChanges {
                display_name: Some("Structured Query Language".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let report = edit.resync.unwrap();
    assert_eq!(report.updated, 1);

    let jane = store.get_account_skill("jane", "sql").await.unwrap();
    assert_eq!(jane.skill_name, "Structured Query Language");
    assert_eq!(jane.category, SkillCategory::Database);
}

#[tokio::test]
async fn test_resync_skips_records_that_are_already_current() {
    let store = MemoryStore::new();
    let directory = populated(Arc::new(MemoryStore::new()), false).await;
    let catalog = directory.store().get_catalog_skill("k8s").await.unwrap();

    // Empty store: nothing examined
    let report = resync_denormalized(&store, &catalog).await.unwrap();
    assert_eq!(report.examined, 0);
    assert!(report.is_complete());

    // Populated store with current copies: examined but untouched
    let report = resync_denormalized(directory.store().as_ref(), &catalog)
        .await
        .unwrap();
    assert_eq!(report.examined, 2);
    assert_eq!(report.updated, 0);
}

#[tokio::test]
async fn test_remove_skill_and_account_records() {
    let directory = populated(Arc::new(MemoryStore::new()), false).await;

    directory.remove_skill("mo_b", "k8s").await.unwrap();
    let err = directory.remove_skill("mo_b", "k8s").await.unwrap_err();
    assert!(err.is_not_found());

    let records = directory.store().account_records("mo_b").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key(), "ACCOUNT#mo_b");
}

#[tokio::test]
async fn test_register_account_rejects_bad_handles() {
    let directory = SkillDirectory::new(Arc::new(MemoryStore::new()));

    for handle in ["ab", "jane#doe", "has space"] {
        let err = directory
            .register_account(new_account(handle))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidField, "handle {handle:?}");
    }
    assert!(directory.store().list_accounts().await.unwrap().is_empty());
}
