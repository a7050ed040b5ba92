//! Cascade Scenarios
//!
//! Concrete create/update/delete sequences with exact expected layouts.

use crate::common::*;

// ============================================================================
// Create
// ============================================================================

#[test]
fn create_at_taken_z_shifts_existing_block() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let old = seed(&svc, &[1, 2]);

    let new = svc.create(WidgetDraft::at(10, 10, 1)).unwrap();

    assert_eq!(new.z, 1);
    assert_eq!(z_of(&svc, &old[0].id), 2);
    assert_eq!(z_of(&svc, &old[1].id), 3);
    assert_eq!(svc.len(), 3);
    assert_eq!(zs_of(&svc.list()), vec![1, 2, 3]);
    assert_store_ok(&svc);
}

#[test]
fn create_at_free_z_changes_no_other_widget() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let before = seed(&svc, &[1, 2, 4]);

    svc.create(WidgetDraft::at(10, 10, 3)).unwrap();

    for w in &before {
        assert_eq!(svc.get(&w.id).unwrap(), *w);
    }
    assert_store_ok(&svc);
}

#[test]
fn create_without_z_on_max_five_gets_six() {
    let svc = test_service(ShiftPolicy::Contiguous);
    seed(&svc, &[2, 5, 3]);
    assert_eq!(svc.create(WidgetDraft::new(1, 1)).unwrap().z, 6);
}

#[test]
fn create_without_z_in_empty_store_gets_one() {
    let svc = test_service(ShiftPolicy::Contiguous);
    assert_eq!(svc.create(WidgetDraft::new(1, 1)).unwrap().z, 1);
}

#[test]
fn repeated_creates_at_same_z_stack_downward() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let created: Vec<Widget> = (0..5)
        .map(|_| svc.create(WidgetDraft::at(1, 1, 0)).unwrap())
        .collect();

    // the last one created sits at 0, the first one has been pushed to 4
    for (i, w) in created.iter().enumerate() {
        assert_eq!(z_of(&svc, &w.id), 4 - i as Z);
    }
    assert_store_ok(&svc);
}

#[test]
fn cascade_keeps_identity_and_size() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let a = svc.create(WidgetDraft::at(31, 17, 8)).unwrap();
    svc.create(WidgetDraft::at(1, 1, 8)).unwrap();

    let moved = svc.get(&a.id).unwrap();
    assert_eq!(moved, a.with_z(9));
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn update_into_neighbour_z() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let w = seed(&svc, &[1, 2]);
    let (a, b) = (w[0], w[1]);

    svc.update(a, a.with_z(2)).unwrap();

    assert_eq!(z_of(&svc, &a.id), 2);
    assert_eq!(z_of(&svc, &b.id), 3);
    assert_eq!(svc.len(), 2);
    assert_store_ok(&svc);
}

#[test]
fn update_size_only_touches_nothing_else() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let w = seed(&svc, &[1, 2, 3]);

    svc.update(w[1], w[1].with_size(99, 98)).unwrap();

    assert_eq!(svc.get(&w[0].id).unwrap(), w[0]);
    assert_eq!(svc.get(&w[2].id).unwrap(), w[2]);
    assert_eq!(svc.metrics().snapshot().cascades, 0);
}

#[test]
fn update_move_to_bottom_of_own_block() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let w = seed(&svc, &[1, 2, 3]);

    // top widget moves to 1: its old slot 3 is vacated first
    svc.update(w[2], w[2].with_z(1)).unwrap();

    assert_eq!(z_of(&svc, &w[2].id), 1);
    assert_eq!(z_of(&svc, &w[0].id), 2);
    assert_eq!(z_of(&svc, &w[1].id), 3);
    assert_store_ok(&svc);
}

#[test]
fn update_to_free_z_leaves_gap() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let w = seed(&svc, &[1, 2]);

    svc.update(w[0], w[0].with_z(10)).unwrap();

    assert_eq!(zs_of(&svc.list()), vec![2, 10]);
}

// ============================================================================
// Policies
// ============================================================================

#[test]
fn contiguous_policy_leaves_widgets_beyond_gap() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let w = seed(&svc, &[1, 2, 3, 7, 8]);

    svc.create(WidgetDraft::at(1, 1, 1)).unwrap();

    assert_eq!(zs_of(&svc.list()), vec![1, 2, 3, 4, 7, 8]);
    assert_eq!(z_of(&svc, &w[3].id), 7);
    assert_eq!(svc.metrics().snapshot().widgets_shifted, 3);
}

#[test]
fn default_construction_moves_everything_above() {
    init_tracing();
    let api = WidgetApi::in_memory();
    let plain = OrderingService::new(OrderedStore::new().into());
    let configured =
        OrderingService::with_config(OrderedStore::new().into(), &EngineConfig::default())
            .unwrap();

    for svc in [api.service(), &plain, &configured] {
        let low = svc.create(WidgetDraft::at(1, 1, 1)).unwrap();
        let high = svc.create(WidgetDraft::at(1, 1, 5)).unwrap();

        svc.create(WidgetDraft::at(1, 1, 1)).unwrap();

        assert_eq!(zs_of(&svc.list()), vec![1, 2, 6]);
        assert_eq!(z_of(svc, &low.id), 2);
        assert_eq!(z_of(svc, &high.id), 6);
    }
}

#[test]
fn tail_policy_moves_everything_above() {
    let svc = test_service(ShiftPolicy::Tail);
    let w = seed(&svc, &[1, 2, 3, 7, 8]);

    svc.create(WidgetDraft::at(1, 1, 1)).unwrap();

    assert_eq!(zs_of(&svc.list()), vec![1, 2, 3, 4, 8, 9]);
    assert_eq!(z_of(&svc, &w[3].id), 8);
    assert_eq!(svc.metrics().snapshot().widgets_shifted, 5);
}

// ============================================================================
// Delete and queries
// ============================================================================

#[test]
fn delete_missing_twice_is_silent() {
    let svc = test_service(ShiftPolicy::Contiguous);
    seed(&svc, &[1, 2]);
    let version = svc.store().version();
    let ghost = WidgetId::new();

    assert!(svc.delete(&ghost).is_none());
    assert!(svc.delete(&ghost).is_none());

    assert_eq!(svc.len(), 2);
    assert_eq!(svc.store().version(), version);
}

#[test]
fn delete_leaves_gap_without_compaction() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let w = seed(&svc, &[1, 2, 3]);
    svc.delete(&w[1].id);
    assert_eq!(zs_of(&svc.list()), vec![1, 3]);
}

#[test]
fn ceiling_finds_lowest_z_at_or_above() {
    let svc = test_service(ShiftPolicy::Contiguous);
    seed(&svc, &[-3, 4, 9]);

    assert_eq!(svc.ceiling(-10).unwrap().z, -3);
    assert_eq!(svc.ceiling(4).unwrap().z, 4);
    assert_eq!(svc.ceiling(5).unwrap().z, 9);
    assert!(svc.ceiling(10).is_none());
}

#[test]
fn snapshot_is_sorted_and_versioned() {
    let svc = test_service(ShiftPolicy::Contiguous);
    seed(&svc, &[5, 1, 3]);

    let snap = svc.snapshot();

    assert_eq!(snap.zs(), vec![1, 3, 5]);
    assert_eq!(snap.version(), svc.store().version());
    assert_eq!(snap.get_by_z(3).map(|w| w.z), Some(3));
}

// ============================================================================
// Z domain edge
// ============================================================================

#[test]
fn overflow_is_rejected_before_mutation() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let top = seed(&svc, &[Z::MAX - 1, Z::MAX]);
    let before = svc.snapshot();

    let err = svc.create(WidgetDraft::at(1, 1, Z::MAX - 1)).unwrap_err();
    assert!(matches!(err, Error::ZOverflow { .. }));
    let err = svc.create(WidgetDraft::new(1, 1)).unwrap_err();
    assert!(matches!(err, Error::ZOverflow { .. }));

    assert_eq!(svc.snapshot().widgets(), before.widgets());
    assert_eq!(z_of(&svc, &top[0].id), Z::MAX - 1);
}

#[test]
fn negative_and_extreme_low_z_values_work() {
    let svc = test_service(ShiftPolicy::Contiguous);
    seed(&svc, &[Z::MIN, Z::MIN + 1]);

    svc.create(WidgetDraft::at(1, 1, Z::MIN)).unwrap();

    assert_eq!(zs_of(&svc.list()), vec![Z::MIN, Z::MIN + 1, Z::MIN + 2]);
}
