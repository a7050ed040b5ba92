//! Concurrency Tests
//!
//! Many threads driving one service. Every logical operation must appear
//! atomic: no duplicate Z, no lost widget, no torn listing.

use crate::common::*;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

#[test]
fn concurrent_creates_at_same_z_are_consecutive() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let svc = Arc::clone(&svc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                svc.create(WidgetDraft::at(1, 1, 10)).unwrap()
            })
        })
        .collect();

    let created: Vec<Widget> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let ids: HashSet<_> = created.iter().map(|w| w.id).collect();
    assert_eq!(ids.len(), THREADS, "duplicate ids");
    assert_eq!(svc.len(), THREADS, "lost widgets");

    let expected: Vec<Z> = (10..10 + THREADS as Z).collect();
    assert_eq!(zs_of(&svc.list()), expected);
    assert_store_ok(&svc);
}

#[test]
fn concurrent_auto_assigned_creates_are_distinct() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let svc = Arc::clone(&svc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..25 {
                    svc.create(WidgetDraft::new(1, 1)).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let expected: Vec<Z> = (1..=(THREADS * 25) as Z).collect();
    assert_eq!(zs_of(&svc.list()), expected);
}

#[test]
fn readers_see_consistent_listings_during_cascades() {
    let svc = test_service(ShiftPolicy::Contiguous);
    seed(&svc, &(1..=50).collect::<Vec<Z>>());

    let barrier = Arc::new(Barrier::new(3));
    let writer = {
        let svc = Arc::clone(&svc);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                // each create shifts the whole block
                svc.create(WidgetDraft::at(1, 1, 1)).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..2)
        .map(|_| {
            let svc = Arc::clone(&svc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..200 {
                    let snap = svc.snapshot();
                    let zs = snap.zs();
                    // the block always stays contiguous from 1
                    let expected: Vec<Z> = (1..=zs.len() as Z).collect();
                    assert_eq!(zs, expected, "torn snapshot");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(svc.len(), 250);
    assert_store_ok(&svc);
}

#[test]
fn concurrent_mixed_operations_keep_invariants() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let svc = Arc::clone(&svc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut mine = Vec::new();
                for i in 0..50 {
                    let z = ((t * 7 + i * 3) % 20) as Z;
                    let w = svc.create(WidgetDraft::at(1, 1, z)).unwrap();
                    mine.push(w.id);
                    if i % 3 == 0 {
                        let id = mine[i / 2];
                        let _ = svc.modify(&id, |w| Ok(w.with_z(z)));
                    }
                    if i % 5 == 4 {
                        svc.delete(&mine[i - 1]);
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_store_ok(&svc);
    let m = svc.metrics().snapshot();
    assert_eq!(m.creates, (THREADS * 50) as u64);
    assert_eq!(svc.len() as u64, m.creates - m.deletes);
}

#[test]
fn concurrent_updates_of_distinct_widgets() {
    let svc = test_service(ShiftPolicy::Contiguous);
    let widgets = seed(&svc, &(0..THREADS as Z).collect::<Vec<Z>>());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = widgets
        .into_iter()
        .map(|w| {
            let svc = Arc::clone(&svc);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..20 {
                    // everyone fights for the bottom slot
                    svc.modify(&w.id, |cur| Ok(cur.with_z(0))).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(svc.len(), THREADS);
    assert_store_ok(&svc);
}
