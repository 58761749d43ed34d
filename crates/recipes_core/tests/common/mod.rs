//! Store contract checks shared by every backend test file.

use recipes_core::{Recipe, RecipeStore, StoreError};
use std::collections::HashMap;

pub fn carbonara() -> Recipe {
    Recipe::new("Pasta Carbonara", "Classic Roman dish")
}

pub fn missing_ids_report_not_found(store: &impl RecipeStore) {
    assert!(matches!(store.get("ghost-dish"), Err(StoreError::NotFound(id)) if id == "ghost-dish"));
    assert!(matches!(
        store.update("ghost-dish", &carbonara()),
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(store.remove("ghost-dish"), Err(StoreError::NotFound(_))));
    assert!(store.list().unwrap().is_empty());
}

pub fn add_then_get_roundtrips(store: &impl RecipeStore) {
    let recipe = carbonara();
    store.add("pasta-carbonara", &recipe).unwrap();
    assert_eq!(store.get("pasta-carbonara").unwrap(), recipe);
}

/// Stores keep whatever they are given; validation belongs to the service.
pub fn blank_name_records_roundtrip(store: &impl RecipeStore) {
    let untitled = Recipe::new("", "untitled");
    store.add("k", &untitled).unwrap();
    store.add("toast", &Recipe::new("Toast", "")).unwrap();

    assert_eq!(store.get("k").unwrap(), untitled);
    let all = store.list().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["k"], untitled);
}

pub fn update_replaces_whole_record(store: &impl RecipeStore) {
    store.add("pasta-carbonara", &carbonara()).unwrap();
    let replacement = Recipe::new("Pasta Carbonara", "Updated");
    store.update("pasta-carbonara", &replacement).unwrap();

    assert_eq!(store.get("pasta-carbonara").unwrap(), replacement);
    assert_eq!(store.list().unwrap().len(), 1);
}

pub fn remove_deletes_record(store: &impl RecipeStore) {
    store.add("pasta-carbonara", &carbonara()).unwrap();
    store.remove("pasta-carbonara").unwrap();

    assert!(matches!(store.get("pasta-carbonara"), Err(StoreError::NotFound(_))));
    assert!(matches!(store.remove("pasta-carbonara"), Err(StoreError::NotFound(_))));
}

pub fn list_contains_exactly_added_entries(store: &impl RecipeStore) {
    let toast = Recipe::new("Toast", "Bread, heated");
    let soup = Recipe::new("Tomato Soup", "");
    store.add("tomato-soup", &soup).unwrap();
    store.add("toast", &toast).unwrap();

    let expected = HashMap::from([
        ("toast".to_string(), toast),
        ("tomato-soup".to_string(), soup),
    ]);
    assert_eq!(store.list().unwrap(), expected);
}

pub fn add_overwrites_by_default(store: &impl RecipeStore) {
    store.add("pasta-carbonara", &carbonara()).unwrap();
    let second = Recipe::new("Pasta  Carbonara", "Second take");
    store.add("pasta-carbonara", &second).unwrap();

    assert_eq!(store.get("pasta-carbonara").unwrap(), second);
    assert_eq!(store.list().unwrap().len(), 1);
}

pub fn add_rejects_duplicates_when_configured(store: &impl RecipeStore) {
    let original = carbonara();
    store.add("pasta-carbonara", &original).unwrap();

    let err = store
        .add("pasta-carbonara", &Recipe::new("Pasta Carbonara", "Impostor"))
        .unwrap_err();
    assert!(matches!(err, StoreError::AlreadyExists(id) if id == "pasta-carbonara"));
    assert_eq!(store.get("pasta-carbonara").unwrap(), original);
}

pub fn concurrent_adds_lose_nothing(store: &impl RecipeStore) {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 25;

    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            scope.spawn(move || {
                for n in 0..PER_THREAD {
                    let name = format!("Dish {thread} {n}");
                    let recipe = Recipe::new(name.as_str(), format!("made by worker {thread}"));
                    store.add(&recipe.derive_id(), &recipe).unwrap();
                }
            });
        }
    });

    let all = store.list().unwrap();
    assert_eq!(all.len(), THREADS * PER_THREAD);
    for (id, recipe) in &all {
        assert_eq!(id, &recipe.derive_id());
        let worker = recipe.name.split(' ').nth(1).unwrap();
        assert_eq!(recipe.description, format!("made by worker {worker}"));
    }
}
