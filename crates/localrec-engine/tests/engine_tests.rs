use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

use localrec_core::config::{Settings, StopWords, TrainPolicy};
use localrec_core::ingest::{CsvSource, MemorySource};
use localrec_core::{Catalog, Error, Item, ItemId};
use localrec_engine::{EngineStatus, RecommendationEngine};

fn sample_items() -> Vec<Item> {
    vec![
        Item::new(1, "Wireless Mouse", "Electronics", "ergonomic wireless mouse", 24.99),
        Item::new(2, "Bluetooth Mouse", "Electronics", "compact bluetooth mouse", 19.99),
        Item::new(3, "Yoga Mat", "Fitness", "non-slip exercise mat", 29.99),
    ]
}

fn larger_items() -> Vec<Item> {
    vec![
        Item::new(10, "Smart Watch", "Wearables", "fitness tracking smart watch with heart rate", 199.0),
        Item::new(11, "Fitness Band", "Wearables", "slim fitness band with heart rate tracking", 49.0),
        Item::new(12, "Gaming Laptop", "Electronics", "fast laptop for gaming", 1299.0),
        Item::new(13, "Office Laptop", "Electronics", "light laptop for office work", 799.0),
        Item::new(14, "Running Shoes", "Fitness", "cushioned running shoes", 89.0),
        Item::new(15, "Trail Shoes", "Fitness", "grippy trail running shoes", 99.0),
        Item::new(16, "Desk Lamp", "Home", "dimmable desk lamp", 35.0),
    ]
}

fn ids(items: &[Item]) -> Vec<ItemId> { items.iter().map(|i| i.id).collect() }

fn trained(items: Vec<Item>) -> RecommendationEngine {
    let mut engine = RecommendationEngine::default();
    engine.load_items(items);
    engine.train().expect("train");
    engine
}

#[test]
fn similar_mouse_ranks_before_yoga_mat() {
    let mut engine = trained(sample_items());
    assert_eq!(ids(&engine.recommend(Some(1), 1).unwrap()), vec![2]);
    assert_eq!(ids(&engine.recommend(Some(1), 5).unwrap()), vec![2, 3]);
}

#[test]
fn category_filter_returns_matching_items_in_order() {
    let mut engine = trained(sample_items());
    assert_eq!(ids(&engine.recommend_by_category("Fitness", 5).unwrap()), vec![3]);
    assert_eq!(ids(&engine.recommend_by_category("Electronics", 1).unwrap()), vec![1]);
    assert!(engine.recommend_by_category("Garden", 5).unwrap().is_empty());
    assert!(engine.recommend_by_category("electronics", 5).unwrap().is_empty());
}

#[test]
fn unknown_id_is_recoverable() {
    let mut engine = trained(sample_items());
    match engine.recommend(Some(99), 5) {
        Err(Error::ProductNotFound(id)) => assert_eq!(id, 99),
        other => panic!("expected ProductNotFound, got {other:?}"),
    }
    assert_eq!(engine.status(), EngineStatus::Trained);
    assert_eq!(engine.recommend(Some(2), 1).unwrap().len(), 1);
}

#[test]
fn result_length_and_self_exclusion() {
    let items = larger_items();
    let n = items.len();
    let mut engine = trained(items.clone());
    for item in &items {
        for k in [0usize, 1, 3, n - 1, n, n + 5] {
            let recs = engine.recommend(Some(item.id), k).unwrap();
            assert_eq!(recs.len(), k.min(n - 1));
            assert!(recs.iter().all(|r| r.id != item.id));
        }
    }
}

#[test]
fn scores_are_descending() {
    let mut engine = trained(larger_items());
    let scored = engine.recommend_scored(Some(10), 6).unwrap();
    assert_eq!(scored[0].item.id, 11);
    for pair in scored.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn ties_keep_catalog_order() {
    // 21 and 22 are identical, both equally similar to 20; 23 shares nothing
    let items = vec![
        Item::new(20, "Kettle", "Kitchen", "steel kettle", 20.0),
        Item::new(23, "Novel", "Books", "mystery paperback", 9.0),
        Item::new(21, "Kettle Pro", "Kitchen", "steel kettle", 30.0),
        Item::new(22, "Kettle Pro", "Kitchen", "steel kettle", 30.0),
    ];
    let mut engine = trained(items);
    assert_eq!(ids(&engine.recommend(Some(20), 3).unwrap()), vec![21, 22, 23]);
    assert_eq!(ids(&engine.recommend(Some(22), 3).unwrap()), vec![21, 20, 23]);
}

#[test]
fn diagonal_and_symmetry() {
    let engine = trained(larger_items());
    let matrix = &engine.model().unwrap().matrix;
    for i in 0..matrix.len() {
        assert!((matrix.get(i, i).unwrap() - 1.0).abs() < 1e-5);
        for j in 0..matrix.len() {
            assert_eq!(matrix.get(i, j), matrix.get(j, i));
        }
    }
}

#[test]
fn retraining_is_deterministic() {
    let mut a = trained(larger_items());
    let mut b = trained(larger_items());
    b.train().unwrap();
    for item in larger_items() {
        assert_eq!(a.recommend_scored(Some(item.id), 4).unwrap(), b.recommend_scored(Some(item.id), 4).unwrap());
    }
}

#[test]
fn stop_word_only_catalog_fails_to_train() {
    let items = vec![Item::new(1, "the", "the", "the", 1.0), Item::new(2, "The", "THE", "the", 1.0)];
    let mut engine = RecommendationEngine::default();
    engine.load_items(items);
    assert!(matches!(engine.train(), Err(Error::EmptyVocabulary)));
    assert_eq!(engine.status(), EngineStatus::Loaded);
}

#[test]
fn empty_catalog_fails_to_train() {
    let mut engine = RecommendationEngine::default();
    engine.load_items(Vec::new());
    assert!(matches!(engine.train(), Err(Error::EmptyCorpus)));
    assert!(matches!(engine.recommend(None, 3), Err(Error::EmptyCorpus)));
}

#[test]
fn auto_policy_loads_and_trains_on_demand() {
    let mut engine = RecommendationEngine::default().with_source(Box::new(MemorySource::new(sample_items())));
    assert_eq!(engine.status(), EngineStatus::Unloaded);
    assert_eq!(ids(&engine.recommend_by_category("Electronics", 5).unwrap()), vec![1, 2]);
    assert_eq!(engine.status(), EngineStatus::Trained);
}

#[test]
fn strict_policy_refuses_untrained_queries() {
    let mut engine = RecommendationEngine::default().with_policy(TrainPolicy::Strict);
    assert!(matches!(engine.recommend(Some(1), 1), Err(Error::NotTrained)));
    engine.load_items(sample_items());
    assert!(matches!(engine.recommend_by_category("Fitness", 1), Err(Error::NotTrained)));
    engine.train().unwrap();
    assert_eq!(ids(&engine.recommend(Some(1), 1).unwrap()), vec![2]);
}

#[test]
fn reloading_invalidates_the_model() {
    let mut engine = trained(sample_items());
    assert_eq!(engine.load_items(larger_items()), larger_items().len());
    assert_eq!(engine.status(), EngineStatus::Loaded);
    assert_eq!(engine.catalog().map(Catalog::len), Some(larger_items().len()));
    assert!(engine.model().is_none());
    assert!(matches!(engine.recommend(Some(1), 1), Err(Error::ProductNotFound(1))));
    assert_eq!(engine.status(), EngineStatus::Trained);
}

#[test]
fn train_without_source_reports_configuration() {
    let mut engine = RecommendationEngine::default();
    assert!(matches!(engine.train(), Err(Error::InvalidConfig(_))));
    assert_eq!(engine.status(), EngineStatus::Unloaded);
}

#[test]
fn seeded_random_query_is_reproducible() {
    let run = |seed: u64| {
        let mut engine = RecommendationEngine::default().with_rng(StdRng::seed_from_u64(seed));
        engine.load_items(larger_items());
        (0..5).map(|_| ids(&engine.recommend(None, 2).unwrap())).collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
    for recs in run(11) {
        assert_eq!(recs.len(), 2);
    }
}

/// Always picks the same position.
struct FixedRng(u64);

impl rand::RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 { self.0 as u32 }
    fn next_u64(&mut self) -> u64 { self.0 }
    fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0) }
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[test]
fn stubbed_rng_random_query_never_returns_query() {
    let mut engine = RecommendationEngine::default().with_rng(FixedRng(0));
    engine.load_items(sample_items());
    let recs = engine.recommend(None, 5).unwrap();
    assert_eq!(recs.len(), 2);
    // a zero draw selects the first position
    assert_eq!(ids(&recs), vec![2, 3]);
}

#[test]
fn settings_drive_vectorizer_and_policy() {
    let mut settings = Settings::default();
    settings.vectorizer.stop_words = StopWords::Custom(vec!["mouse".into(), "electronics".into()]);
    settings.recommend.seed = Some(3);
    let mut engine = RecommendationEngine::from_settings(&settings);
    assert_eq!(engine.policy(), TrainPolicy::Auto);
    engine.load_items(sample_items());
    engine.train().unwrap();
    let space = &engine.model().unwrap().space;
    assert!(space.idf("mouse").is_none());
    assert!(space.idf("electronics").is_none());
    assert!(space.idf("wireless").is_some());
}

#[test]
fn csv_catalog_end_to_end() -> anyhow::Result<()> {
    let tmp = TempDir::new()?;
    let path = tmp.path().join("products.csv");
    fs::write(
        &path,
        "product_id,name,category,description,price\n\
         1,Wireless Mouse,Electronics,ergonomic wireless mouse,24.99\n\
         2,Bluetooth Mouse,Electronics,compact bluetooth mouse,19.99\n\
         3,Yoga Mat,Fitness,non-slip exercise mat,29.99\n",
    )?;
    let mut engine = RecommendationEngine::default().with_source(Box::new(CsvSource::new(&path)));
    assert_eq!(engine.load()?, 3);
    assert_eq!(engine.status(), EngineStatus::Loaded);
    assert_eq!(engine.catalog().map(Catalog::len), Some(3));
    assert_eq!(ids(&engine.recommend(Some(1), 1)?), vec![2]);
    Ok(())
}
