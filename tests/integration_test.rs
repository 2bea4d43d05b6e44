// Integration tests for the memory hierarchy simulator

use memtier::interpreter::engine::{Outcome, Session};
use memtier::interpreter::errors::SimError;
use memtier::memory::{Admission, AllocKind, MemoryConfig, PageId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 8 pages of 32 bytes, 3 of them cached
fn eight_page_session() -> Session {
    Session::new(MemoryConfig::new(256, 32, 96).with_seed(42)).expect("valid config")
}

fn queue(session: &Session) -> Vec<PageId> {
    session.cache().queue().iter().copied().collect()
}

fn names(session: &Session, page: PageId) -> Vec<String> {
    session
        .cache()
        .table()
        .lookup(page)
        .expect("page is cached")
        .variables()
        .iter()
        .map(|v| v.name().to_string())
        .collect()
}

#[test]
fn test_stack_grows_down_from_highest_page() {
    let mut session = eight_page_session();
    let pages: Vec<PageId> = (0..8)
        .map(|i| {
            session
                .allocate(&format!("s{}", i), 32, AllocKind::Stack)
                .expect("fits")
                .page
        })
        .collect();

    assert_eq!(pages, vec![7, 6, 5, 4, 3, 2, 1, 0]);
    assert!(session.check_invariants().is_ok());
}

#[test]
fn test_heap_grows_up_from_lowest_page() {
    let mut session = eight_page_session();
    let pages: Vec<PageId> = (0..8)
        .map(|i| {
            session
                .allocate(&format!("h{}", i), 32, AllocKind::Heap)
                .expect("fits")
                .page
        })
        .collect();

    assert_eq!(pages, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    assert!(session.check_invariants().is_ok());
}

#[test]
fn test_stack_and_heap_meet_in_the_middle() {
    let mut session = eight_page_session();
    for i in 0..4 {
        session.allocate(&format!("s{}", i), 32, AllocKind::Stack).unwrap();
        session.allocate(&format!("h{}", i), 32, AllocKind::Heap).unwrap();
    }

    let err = session.allocate("extra", 1, AllocKind::Stack).unwrap_err();
    assert!(matches!(err, SimError::OutOfMemory { requested: 1, largest_free: 0, .. }));
    assert!(session.check_invariants().is_ok());
}

#[test]
fn test_lru_eviction_scenario() {
    let mut session = eight_page_session();
    assert_eq!(queue(&session), vec![7, 6, 5]);

    for (name, expected) in [("a", 7), ("b", 6), ("c", 5)] {
        let placed = session.allocate(name, 32, AllocKind::Stack).unwrap();
        assert_eq!(placed.page, expected);
        assert_eq!(placed.admission, Admission::Hit);
    }
    assert_eq!(queue(&session), vec![7, 6, 5]);

    // Page 4 is not cached: 7 is least recently touched and goes to disk
    let placed = session.allocate("d", 32, AllocKind::Stack).unwrap();
    assert_eq!(placed.page, 4);
    assert_eq!(placed.admission, Admission::Fetched { evicted: 7 });
    assert_eq!(queue(&session), vec![6, 5, 4]);
    assert!(session.disk().lookup(7).unwrap().contains("a"));
    assert!(session.check_invariants().is_ok());

    // Reading a brings page 7 back, pushing out the new front
    let found = session.get("a").unwrap();
    assert_eq!(found.page, 7);
    assert_eq!(found.admission, Admission::Fetched { evicted: 6 });
    assert_eq!(queue(&session), vec![5, 4, 7]);
    assert_eq!(names(&session, 7), vec!["a".to_string()]);
    assert!(session.disk().lookup(6).unwrap().contains("b"));

    assert!(session.memory().lookup(7).unwrap().highlighted);
    assert!(session.cache().table().lookup(7).unwrap().highlighted);
    assert!(session.check_invariants().is_ok());
}

#[test]
fn test_get_on_resident_page_only_touches() {
    let mut session = eight_page_session();
    session.allocate("a", 8, AllocKind::Stack).unwrap();
    session.allocate("b", 32, AllocKind::Stack).unwrap();
    assert_eq!(queue(&session), vec![5, 7, 6]);

    let found = session.get("a").unwrap();
    assert_eq!(found.admission, Admission::Hit);
    assert_eq!(queue(&session), vec![5, 6, 7]);
    assert_eq!(session.stats().misses, 0);
}

#[test]
fn test_evicted_page_round_trips_through_disk() {
    let mut session = eight_page_session();
    session.allocate("x", 8, AllocKind::Stack).unwrap();
    session.allocate("y", 12, AllocKind::Stack).unwrap();
    let before: Vec<(String, usize)> = session
        .memory()
        .lookup(7)
        .unwrap()
        .variables()
        .iter()
        .map(|v| (v.name().to_string(), v.size()))
        .collect();

    // Three heap pages push 6, 5 and finally 7 out of the cache
    for name in ["h0", "h1", "h2"] {
        session.allocate(name, 32, AllocKind::Heap).unwrap();
    }
    assert!(!session.cache().is_resident(7));
    assert_eq!(queue(&session), vec![0, 1, 2]);

    session.get("y").unwrap();
    let restored: Vec<(String, usize)> = session
        .cache()
        .table()
        .lookup(7)
        .unwrap()
        .variables()
        .iter()
        .map(|v| (v.name().to_string(), v.size()))
        .collect();
    assert_eq!(restored, before);
    assert_eq!(session.cache().table().lookup(7).unwrap().used(), 20);
    assert!(session.check_invariants().is_ok());
}

#[test]
fn test_get_missing_variable_changes_nothing() {
    let mut session = eight_page_session();
    session.allocate("a", 4, AllocKind::Stack).unwrap();
    session.allocate("b", 4, AllocKind::Heap).unwrap();
    let before = session.snapshot();

    let err = session.get("nope").unwrap_err();
    assert_eq!(
        err,
        SimError::VariableNotFound {
            name: "nope".to_string()
        }
    );
    assert!(!err.is_fatal());
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_duplicate_name_rejected_without_changes() {
    let mut session = eight_page_session();
    session.allocate("X", 4, AllocKind::Stack).unwrap();
    let memory_before = session.memory().clone();
    let snapshot_before = session.snapshot();

    let err = session.allocate("X", 4, AllocKind::Stack).unwrap_err();
    assert_eq!(
        err,
        SimError::DuplicateVariable {
            name: "X".to_string(),
            page: 7
        }
    );
    assert_eq!(session.memory(), &memory_before);
    assert_eq!(session.snapshot(), snapshot_before);

    // Also rejected when the other kind is asked for
    assert!(session.allocate("X", 4, AllocKind::Heap).is_err());
    assert_eq!(session.memory(), &memory_before);
}

#[test]
fn test_out_of_memory_changes_nothing() {
    let mut session = eight_page_session();
    session.allocate("a", 20, AllocKind::Heap).unwrap();
    let before = session.snapshot();

    let err = session.allocate("huge", 33, AllocKind::Heap).unwrap_err();
    assert!(matches!(err, SimError::OutOfMemory { requested: 33, .. }));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_invariants_hold_over_random_commands() {
    let mut session = eight_page_session();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut placed: Vec<String> = Vec::new();

    for step in 0..300 {
        if !placed.is_empty() && rng.gen_bool(0.4) {
            let name = &placed[rng.gen_range(0..placed.len())];
            session.get(name).expect("placed variable is found");
        } else {
            let name = format!("v{}", step);
            let size = rng.gen_range(1..=12);
            let kind = if rng.gen_bool(0.5) {
                AllocKind::Stack
            } else {
                AllocKind::Heap
            };
            match session.allocate(&name, size, kind) {
                Ok(_) => placed.push(name),
                Err(SimError::OutOfMemory { .. }) => {}
                Err(e) => panic!("unexpected error at step {}: {}", step, e),
            }
        }

        if let Err(problem) = session.check_invariants() {
            panic!("invariant broken at step {}: {}", step, problem);
        }
        assert!(session.cache().queue().len() <= 3);
    }

    assert!(session.stats().evictions > 0);
}

#[test]
fn test_disk_layout_is_seeded() {
    let config = MemoryConfig::new(256, 32, 96).with_seed(9);
    let a = Session::new(config).unwrap();
    let b = Session::new(config).unwrap();
    assert_eq!(a.disk(), b.disk());

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let c = Session::with_rng(config, &mut rng).unwrap();
    assert_eq!(a.disk(), c.disk());
}

#[test]
fn test_execute_line_dispatches() {
    let mut session = eight_page_session();
    let outcome = session.execute_line("heap buf 16").unwrap();
    assert!(matches!(outcome, Some(Outcome::Placed(ref p)) if p.page == 0));

    let outcome = session.execute_line("GET buf").unwrap();
    assert!(matches!(outcome, Some(Outcome::Found(ref l)) if l.page == 0));

    assert_eq!(session.execute_line("# nothing").unwrap(), None);
    assert!(matches!(
        session.execute_line("free buf"),
        Err(SimError::UnknownCommand { .. })
    ));
}

#[test]
fn test_snapshot_text_dump() {
    let mut session = eight_page_session();
    session.allocate("a", 4, AllocKind::Stack).unwrap();
    session.get("a").unwrap();

    let dump = session.snapshot().to_string();
    assert!(dump.contains("== Memory =="));
    assert!(dump.contains("lru: 6 -> 5 -> 7"));
    assert!(dump.contains("*page   7    4/32   a:4"));
    assert!(dump.ends_with("hits 2 misses 0 evictions 0 flushes 0"));
}
