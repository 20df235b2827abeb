//! Tests for long mutation sequences
//!
//! This tests:
//! - Position density after arbitrary operation chains
//! - Id uniqueness across inserts and duplicates
//! - Undo/redo sequences
//! - Batched mutations

use pagekit_catalog::{Catalog, VariantKind};
use pagekit_editor::{
    BlockCollection, Direction, EditSession, IdGenerator, Mutation, PageDocument, UndoStack,
};
use std::collections::HashSet;

/// Small deterministic generator so failures are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound.max(1)
    }
}

fn random_mutation(rng: &mut Lcg, collection: &BlockCollection) -> Mutation {
    let ids: Vec<String> = collection.ids().map(str::to_string).collect();
    let pick = |rng: &mut Lcg| {
        if ids.is_empty() || rng.next(10) == 0 {
            "stale".to_string()
        } else {
            ids[rng.next(ids.len())].clone()
        }
    };

    match rng.next(6) {
        0 => Mutation::Insert {
            tag: VariantKind::ALL[rng.next(VariantKind::ALL.len())].tag().to_string(),
            at: if rng.next(2) == 0 { None } else { Some(rng.next(ids.len() + 3)) },
        },
        1 => Mutation::Move {
            id: pick(rng),
            direction: if rng.next(2) == 0 { Direction::Up } else { Direction::Down },
        },
        2 => Mutation::Reorder {
            id: pick(rng),
            to_index: rng.next(ids.len() + 3),
        },
        3 => Mutation::Remove { id: pick(rng) },
        4 => Mutation::Duplicate { id: pick(rng) },
        _ => Mutation::ToggleEnabled { id: pick(rng) },
    }
}

fn assert_invariants(collection: &BlockCollection) {
    assert!(collection.is_dense(), "positions not dense: {:?}", collection);

    let unique: HashSet<&str> = collection.ids().collect();
    assert_eq!(unique.len(), collection.len(), "duplicate ids: {:?}", collection);
}

#[test]
fn test_random_sequences_keep_positions_dense() {
    let catalog = Catalog::builtin();

    for seed in 0..20u64 {
        let mut rng = Lcg(seed);
        let mut ids = IdGenerator::from_seed(format!("r{}", seed));
        let mut collection = BlockCollection::new();

        for _ in 0..200 {
            let mutation = random_mutation(&mut rng, &collection);
            mutation
                .apply(&mut collection, &catalog, &mut ids)
                .expect("catalog tags always insert");
            assert_invariants(&collection);
        }
    }
}

#[test]
fn test_undo_all_returns_to_empty_page() {
    let catalog = Catalog::builtin();
    let mut session = EditSession::new(&catalog, PageDocument::new("p"))
        .with_ids(IdGenerator::from_seed("u"))
        .with_history(UndoStack::with_max_levels(0));
    let mut rng = Lcg(7);

    for _ in 0..50 {
        let mutation = random_mutation(&mut rng, session.blocks());
        session.apply(mutation).unwrap();
    }

    while session.undo().unwrap() {
        assert_invariants(session.blocks());
    }
    assert!(session.blocks().is_empty());
}

#[test]
fn test_redo_replays_to_final_state() {
    let catalog = Catalog::builtin();
    let mut session = EditSession::new(&catalog, PageDocument::new("p"))
        .with_ids(IdGenerator::from_seed("u"));
    let mut rng = Lcg(11);

    for _ in 0..30 {
        let mutation = random_mutation(&mut rng, session.blocks());
        session.apply(mutation).unwrap();
    }
    let final_state = session.blocks().clone();

    while session.undo().unwrap() {}
    while session.redo().unwrap() {}

    assert_eq!(session.blocks(), &final_state);
}

#[test]
fn test_batch_undoes_as_one_step() {
    let catalog = Catalog::builtin();
    let mut session = EditSession::new(&catalog, PageDocument::new("p"))
        .with_ids(IdGenerator::from_seed("b"));

    let hero = session.insert_from_palette("hero", None).unwrap();

    session.begin_batch("Add social proof");
    session.insert_from_palette("testimonials", None).unwrap();
    session.insert_from_palette("reviews", None).unwrap();
    session
        .apply(Mutation::Reorder {
            id: hero.clone(),
            to_index: 2,
        })
        .unwrap();
    session.end_batch();

    assert_eq!(session.blocks().len(), 3);
    assert!(session.undo().unwrap());

    let ids: Vec<&str> = session.blocks().ids().collect();
    assert_eq!(ids, vec![hero.as_str()]);
    assert!(session.can_undo());
}

#[test]
fn test_duplicate_then_remove_original() {
    let catalog = Catalog::builtin();
    let mut ids = IdGenerator::from_seed("d");
    let mut collection = BlockCollection::new();

    let original = collection.insert(&catalog, &mut ids, "steps", None).unwrap();
    collection.insert(&catalog, &mut ids, "spacer", None).unwrap();
    let copy = collection.duplicate(&mut ids, &original.id).unwrap();

    collection.remove(&original.id);

    assert_eq!(collection.get(&copy.id).unwrap().position, 1);
    assert_eq!(collection.get(&copy.id).unwrap().config, original.config);
    assert_invariants(&collection);
}
