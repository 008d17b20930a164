use super::*;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use tempfile::TempDir;

const BASE: &str = "https://api.test/v2";

/// URL → JSON の固定応答
#[derive(Default)]
struct MockSource {
    responses: HashMap<String, Value>,
    failing: HashSet<String>,
}

impl MockSource {
    fn with(mut self, path: &str, value: Value) -> Self {
        self.responses.insert(format!("{BASE}/{path}"), value);
        self
    }

    fn failing(mut self, path: &str) -> Self {
        self.failing.insert(format!("{BASE}/{path}"));
        self
    }

    fn with_entry(self, id: u32, name: &str, types: &[&str]) -> Self {
        let types: Vec<Value> = types
            .iter()
            .map(|t| json!({ "type": { "name": t } }))
            .collect();
        self.with(
            &format!("pokemon/{id}"),
            json!({
                "id": id,
                "name": name,
                "height": 7,
                "weight": 69,
                "sprites": { "front_default": format!("https://img/{id}.png") },
                "types": types,
                "stats": [],
                "abilities": [],
                "moves": []
            }),
        )
        .with(&format!("pokemon-species/{id}"), json!({}))
    }
}

impl CatalogSource for MockSource {
    fn fetch_json<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<Value>>> + Send + 'a>> {
        let result = if self.failing.contains(url) {
            Err(DexError::Api {
                status: 500,
                url: url.to_string(),
                message: "Internal Server Error".to_string(),
            })
        } else {
            Ok(self.responses.get(url).cloned())
        };
        Box::pin(async move { result })
    }
}

fn crawler(source: MockSource, tmp: &TempDir) -> Crawler {
    Crawler::new(Box::new(source), RecordStore::new(tmp.path()), BASE)
}

// =========================================================================
// fetch_record
// =========================================================================

#[tokio::test]
async fn test_fetch_record_not_found_is_none() {
    let tmp = TempDir::new().unwrap();
    let crawler = crawler(MockSource::default(), &tmp);
    assert_eq!(crawler.fetch_record(9999).await.unwrap(), None);
}

#[tokio::test]
async fn test_fetch_record_joins_sub_resources() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default()
        .with_entry(1, "bulbasaur", &["grass", "poison"])
        .with(
            "pokemon-species/1",
            json!({ "evolution_chain": { "url": format!("{BASE}/evolution-chain/1/") } }),
        )
        .with(
            "evolution-chain/1/",
            json!({
                "chain": {
                    "species": { "name": "bulbasaur", "url": format!("{BASE}/pokemon-species/1/") },
                    "evolves_to": [{
                        "species": { "name": "ivysaur", "url": format!("{BASE}/pokemon-species/2/") },
                        "evolution_details": [{ "min_level": 16, "trigger": { "name": "level-up" } }],
                        "evolves_to": []
                    }]
                }
            }),
        )
        .with(
            "pokemon/1/encounters",
            json!([{
                "location_area": { "name": "pallet-town-area" },
                "version_details": [{ "version": { "name": "red" } }]
            }]),
        );

    let record = crawler(source, &tmp).fetch_record(1).await.unwrap().unwrap();
    assert_eq!(record.name, "bulbasaur");
    assert_eq!(record.types, vec!["grass", "poison"]);
    assert_eq!(record.evolution_chain.len(), 2);
    assert_eq!(record.evolution_chain[1].min_level, Some(16));
    assert_eq!(record.locations["red"], vec!["Pallet Town Area"]);
}

#[tokio::test]
async fn test_fetch_record_degrades_failed_sub_resources() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default()
        .with_entry(4, "charmander", &["fire"])
        .with(
            "pokemon-species/4",
            json!({ "evolution_chain": { "url": format!("{BASE}/evolution-chain/2/") } }),
        )
        .failing("evolution-chain/2/")
        .failing("pokemon/4/encounters");

    let record = crawler(source, &tmp).fetch_record(4).await.unwrap().unwrap();
    assert!(record.evolution_chain.is_empty());
    assert!(record.locations.is_empty());
}

#[tokio::test]
async fn test_fetch_record_missing_species_is_error() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default().with(
        "pokemon/7",
        json!({ "id": 7, "name": "squirtle", "types": [] }),
    );
    assert!(crawler(source, &tmp).fetch_record(7).await.is_err());
}

// =========================================================================
// max_id
// =========================================================================

#[tokio::test]
async fn test_max_id_from_species_list() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default().with(
        "pokemon-species?limit=10000",
        json!({ "results": [
            { "name": "bulbasaur", "url": format!("{BASE}/pokemon-species/1/") },
            { "name": "mew", "url": format!("{BASE}/pokemon-species/151/") }
        ]}),
    );
    assert_eq!(crawler(source, &tmp).max_id().await, 151);
}

#[tokio::test]
async fn test_max_id_falls_back() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(
        crawler(MockSource::default(), &tmp).max_id().await,
        FALLBACK_MAX_ID
    );

    let failing = MockSource::default().failing("pokemon-species?limit=10000");
    assert_eq!(crawler(failing, &tmp).max_id().await, FALLBACK_MAX_ID);

    let empty = MockSource::default().with("pokemon-species?limit=10000", json!({ "results": [] }));
    assert_eq!(crawler(empty, &tmp).max_id().await, FALLBACK_MAX_ID);
}

// =========================================================================
// run / retry
// =========================================================================

#[tokio::test]
async fn test_run_skips_existing_and_rebuilds_full_index() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default()
        .with_entry(1, "bulbasaur", &["grass", "poison"])
        .with_entry(2, "ivysaur", &["grass", "poison"])
        .with_entry(4, "charmander", &["fire"]);
    let crawler = crawler(source, &tmp);
    let store = RecordStore::new(tmp.path());

    // #2 は前回保存済み
    let existing = crawler.fetch_record(2).await.unwrap().unwrap();
    store.write(&existing).unwrap();

    let report = crawler.run(1, FetchLimit::UpTo(4)).await.unwrap();
    assert_eq!(report.saved, vec![1, 4]);
    assert_eq!(report.already_existed, 1);
    assert_eq!(report.missing, vec![3]);
    assert_eq!(report.indexed, 3);

    let catalog = crate::catalog::Catalog::load(&store.index_path()).unwrap();
    let names: Vec<_> = catalog.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["bulbasaur", "ivysaur", "charmander"]);

    let meta = store.load_meta().unwrap().unwrap();
    assert_eq!(meta.saved, 2);
    assert_eq!(meta.missing, 1);
    assert_eq!(meta.total_records, 3);
}

#[tokio::test]
async fn test_run_all_uses_species_count() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default()
        .with(
            "pokemon-species?limit=10000",
            json!({ "results": [{ "name": "ivysaur", "url": format!("{BASE}/pokemon-species/2/") }] }),
        )
        .with_entry(1, "bulbasaur", &["grass"])
        .with_entry(2, "ivysaur", &["grass"])
        .with_entry(3, "venusaur", &["grass"]);

    let report = crawler(source, &tmp).run(1, FetchLimit::All).await.unwrap();
    assert_eq!(report.saved, vec![1, 2]);
    assert!(report.missing.is_empty());
}

#[tokio::test]
async fn test_run_records_server_errors_as_missing() {
    let tmp = TempDir::new().unwrap();
    let source = MockSource::default()
        .with_entry(1, "bulbasaur", &["grass"])
        .failing("pokemon/2");

    let report = crawler(source, &tmp).run(1, FetchLimit::UpTo(2)).await.unwrap();
    assert_eq!(report.saved, vec![1]);
    assert_eq!(report.missing, vec![2]);
}

#[tokio::test]
async fn test_retry_overwrites_existing() {
    let tmp = TempDir::new().unwrap();
    let store = RecordStore::new(tmp.path());

    let stale = MockSource::default().with_entry(25, "pikachu", &["normal"]);
    crawler(stale, &tmp).run(25, FetchLimit::UpTo(25)).await.unwrap();
    assert_eq!(store.load(25).unwrap().types, vec!["normal"]);

    let fresh = MockSource::default().with_entry(25, "pikachu", &["electric"]);
    let report = crawler(fresh, &tmp).retry(&[25, 26]).await.unwrap();
    assert_eq!(report.saved, vec![25]);
    assert_eq!(report.missing, vec![26]);
    assert_eq!(store.load(25).unwrap().types, vec!["electric"]);
}
