//! End-to-end authorization flow: a two-level organization tree, the shared
//! permission matrix, and a durable file-backed audit trail.

use std::collections::BTreeSet;
use std::sync::Arc;

use taskgrid_audit::{AuditQuery, AuditStore, FileAuditStore, InMemoryAuditStore, Outcome};
use taskgrid_core::{Organization, OrgId, UserId};
use taskgrid_rbac::{
    Action, CallerContext, DecisionEngine, InMemoryOrgDirectory, Role,
};

struct World {
    directory: Arc<InMemoryOrgDirectory>,
    root: Organization,
    child_a: Organization,
    child_b: Organization,
}

fn seed_world() -> World {
    let directory = Arc::new(InMemoryOrgDirectory::new());
    let root = Organization::root(OrgId::new(), "Root HQ");
    let child_a = Organization::child_of(&root, OrgId::new(), "Child Division A").unwrap();
    let child_b = Organization::child_of(&root, OrgId::new(), "Child Division B").unwrap();
    directory.insert(root.clone());
    directory.insert(child_a.clone());
    directory.insert(child_b.clone());
    World {
        directory,
        root,
        child_a,
        child_b,
    }
}

#[test]
fn owner_at_root_lists_tasks_across_the_whole_tree() {
    let world = seed_world();
    let audit = Arc::new(InMemoryAuditStore::new());
    let engine = DecisionEngine::new(world.directory.clone(), audit.clone() as Arc<dyn AuditStore>);

    let owner = CallerContext::new(UserId::new(), Role::Owner, world.root.id);
    let decision = engine.decide(&owner, Action::TaskRead, None).unwrap();

    assert!(decision.is_allowed());
    assert_eq!(
        decision.scope,
        Some(BTreeSet::from([world.root.id, world.child_a.id, world.child_b.id]))
    );
}

#[test]
fn admin_cannot_delete_in_a_sibling_org() {
    let world = seed_world();
    let audit = Arc::new(InMemoryAuditStore::new());
    let engine = DecisionEngine::new(world.directory.clone(), audit.clone() as Arc<dyn AuditStore>);

    let admin = CallerContext::new(UserId::new(), Role::Admin, world.child_a.id);
    let decision = engine
        .decide(&admin, Action::TaskDelete, Some(world.child_b.id))
        .unwrap();

    assert_eq!(decision.outcome, Outcome::Deny);
    assert_eq!(
        decision.reason.as_ref().unwrap().to_string(),
        "resource outside caller's organizational scope"
    );

    let records = audit.find(&AuditQuery::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, Outcome::Deny);
    assert_eq!(records[0].org_id, world.child_b.id);
}

#[test]
fn viewer_audit_view_denial_is_durably_recorded() {
    let world = seed_world();

    let log_path =
        std::env::temp_dir().join(format!("taskgrid-decision-flow-{}.log", uuid::Uuid::now_v7()));
    let audit = Arc::new(FileAuditStore::new(&log_path));
    let engine = DecisionEngine::new(world.directory.clone(), audit.clone() as Arc<dyn AuditStore>);

    let viewer = CallerContext::new(UserId::new(), Role::Viewer, world.child_a.id);
    let decision = engine.decide(&viewer, Action::AuditView, None).unwrap();

    assert_eq!(decision.outcome, Outcome::Deny);
    assert_eq!(
        decision.reason.as_ref().unwrap().to_string(),
        "role not permitted for action"
    );

    // The deny record survives independently of the engine: re-open the log
    // from a second store handle, the way an operator-facing reader would.
    let reader = FileAuditStore::new(&log_path);
    let records = reader
        .find(&AuditQuery::default().with_user(viewer.user_id))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, Outcome::Deny);
    assert_eq!(records[0].action, "Audit.View");
    assert_eq!(records[0].role, "Viewer");
    assert_eq!(records[0].reason.as_deref(), Some("role not permitted for action"));

    let _ = std::fs::remove_file(log_path);
}

#[test]
fn operator_reads_the_trail_through_filters_after_mixed_traffic() {
    let world = seed_world();
    let audit = Arc::new(InMemoryAuditStore::new());
    let engine = DecisionEngine::new(world.directory.clone(), audit.clone() as Arc<dyn AuditStore>);

    let owner = CallerContext::new(UserId::new(), Role::Owner, world.root.id);
    let admin = CallerContext::new(UserId::new(), Role::Admin, world.child_a.id);

    engine.decide(&owner, Action::TaskRead, None).unwrap();
    engine
        .decide(&admin, Action::TaskCreate, Some(world.child_a.id))
        .unwrap();
    engine
        .decide(&admin, Action::TaskDelete, Some(world.child_b.id))
        .unwrap();

    // Conjunctive filter: admin's denied delete only.
    let records = audit
        .find(
            &AuditQuery::default()
                .with_user(admin.user_id)
                .with_action("Task.Delete"),
        )
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, Outcome::Deny);

    // Org filter sees both decisions taken in child A's context.
    let records = audit
        .find(&AuditQuery::default().with_org(world.child_a.id))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action, "Task.Create");
}
