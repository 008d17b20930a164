use super::*;
use crate::vocabulary::{Group, RangeBucket};

fn entry(id: u32, name: &str, categories: &[&str]) -> CatalogEntry {
    CatalogEntry {
        id,
        name: name.to_string(),
        categories: categories.iter().map(|c| c.to_string()).collect(),
        image_ref: format!("https://img.test/{id}.png"),
    }
}

fn starters() -> Vec<CatalogEntry> {
    vec![
        entry(1, "bulbasaur", &["grass", "poison"]),
        entry(4, "charmander", &["fire"]),
        entry(7, "squirtle", &["water"]),
    ]
}

fn criteria() -> FilterCriteria {
    FilterCriteria::default()
}

fn names(result: &FilterResult<'_>) -> Vec<String> {
    result.matches.iter().map(|e| e.name.clone()).collect()
}

// =========================================================================
// empty criteria / sorting
// =========================================================================

#[test]
fn test_empty_criteria_returns_all_sorted_by_id() {
    let entries = vec![
        entry(7, "squirtle", &["water"]),
        entry(1, "bulbasaur", &["grass", "poison"]),
        entry(4, "charmander", &["fire"]),
    ];
    let result = filter(&entries, &criteria(), &Vocabulary::pokedex());
    let ids: Vec<u32> = result.matches.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1, 4, 7]);
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_sort_by_name() {
    let entries = vec![
        entry(25, "pikachu", &["electric"]),
        entry(63, "Abra", &["psychic"]),
        entry(142, "aerodactyl", &["rock", "flying"]),
    ];
    let c = FilterCriteria {
        sort: SortKey::Name,
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(names(&result), vec!["Abra", "aerodactyl", "pikachu"]);
}

// =========================================================================
// category stage
// =========================================================================

#[test]
fn test_category_filter_single() {
    let entries = starters();
    let c = FilterCriteria {
        categories: vec!["fire".to_string()],
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(names(&result), vec!["charmander"]);
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_category_filter_is_or() {
    let entries = vec![entry(1, "bulbasaur", &["grass", "poison"])];
    let vocab = Vocabulary::pokedex();

    let overlapping = FilterCriteria {
        categories: vec!["poison".to_string(), "fire".to_string()],
        ..criteria()
    };
    assert_eq!(filter(&entries, &overlapping, &vocab).matches.len(), 1);

    let disjoint = FilterCriteria {
        categories: vec!["fire".to_string(), "water".to_string()],
        ..criteria()
    };
    assert!(filter(&entries, &disjoint, &vocab).matches.is_empty());
}

#[test]
fn test_category_zero_matches_gives_no_suggestions() {
    let entries = starters();
    let c = FilterCriteria {
        categories: vec!["dragon".to_string()],
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert!(result.matches.is_empty());
    assert!(result.suggestions.is_empty());
}

// =========================================================================
// range / group stages
// =========================================================================

fn small_vocab() -> Vocabulary {
    Vocabulary {
        categories: vec!["grass".into(), "fire".into(), "water".into(), "poison".into()],
        ranges: vec![RangeBucket {
            value: "low".to_string(),
            label: "Low (1-5)".to_string(),
            min: 1,
            max: 5,
        }],
        groups: vec![Group {
            key: "odd".to_string(),
            label: "Odd".to_string(),
            ids: vec![1, 7],
        }],
    }
}

#[test]
fn test_range_filter_inclusive() {
    let entries = starters();
    let c = FilterCriteria {
        range: Some("low".to_string()),
        ..criteria()
    };
    let result = filter(&entries, &c, &small_vocab());
    assert_eq!(names(&result), vec!["bulbasaur", "charmander"]);
}

#[test]
fn test_pokedex_generation_bucket() {
    let entries = vec![
        entry(151, "mew", &["psychic"]),
        entry(152, "chikorita", &["grass"]),
    ];
    let c = FilterCriteria {
        range: Some("2".to_string()),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(names(&result), vec!["chikorita"]);
}

#[test]
fn test_unknown_range_is_noop() {
    let entries = starters();
    let c = FilterCriteria {
        range: Some("gen-99".to_string()),
        ..criteria()
    };
    assert_eq!(filter(&entries, &c, &small_vocab()).matches.len(), 3);
}

#[test]
fn test_group_filter() {
    let entries = starters();
    let c = FilterCriteria {
        group: Some("odd".to_string()),
        ..criteria()
    };
    let result = filter(&entries, &c, &small_vocab());
    assert_eq!(names(&result), vec!["bulbasaur", "squirtle"]);
}

#[test]
fn test_unknown_group_is_noop_not_empty() {
    let entries = starters();
    let c = FilterCriteria {
        group: Some("mythicals".to_string()),
        ..criteria()
    };
    assert_eq!(filter(&entries, &c, &small_vocab()).matches.len(), 3);
}

#[test]
fn test_range_and_group_and_combine() {
    let entries = starters();
    let c = FilterCriteria {
        range: Some("low".to_string()),
        group: Some("odd".to_string()),
        ..criteria()
    };
    let result = filter(&entries, &c, &small_vocab());
    assert_eq!(names(&result), vec!["bulbasaur"]);
}

#[test]
fn test_text_cannot_resurrect_range_filtered_entry() {
    let entries = starters();
    let c = FilterCriteria {
        range: Some("low".to_string()),
        query: "squirtle".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &small_vocab());
    assert!(result.matches.is_empty());
    // 候補はレンジ通過後の集合からのみ選ばれる
    assert!(!result.suggestions.contains(&"squirtle".to_string()));
}

// =========================================================================
// text stage
// =========================================================================

#[test]
fn test_query_substring_of_name() {
    let entries = starters();
    let c = FilterCriteria {
        query: "char".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(names(&result), vec!["charmander"]);
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_query_is_trimmed_and_case_folded() {
    let entries = starters();
    let c = FilterCriteria {
        query: "  SQUIR ".to_string(),
        ..criteria()
    };
    assert_eq!(
        names(&filter(&entries, &c, &Vocabulary::pokedex())),
        vec!["squirtle"]
    );
}

#[test]
fn test_query_matches_id_digits() {
    let entries = vec![entry(4, "charmander", &["fire"]), entry(25, "pikachu", &["electric"])];
    let c = FilterCriteria {
        query: "25".to_string(),
        ..criteria()
    };
    assert_eq!(
        names(&filter(&entries, &c, &Vocabulary::pokedex())),
        vec!["pikachu"]
    );
}

#[test]
fn test_query_matches_category() {
    let entries = starters();
    let c = FilterCriteria {
        query: "wat".to_string(),
        ..criteria()
    };
    assert_eq!(
        names(&filter(&entries, &c, &Vocabulary::pokedex())),
        vec!["squirtle"]
    );
}

#[test]
fn test_whitespace_query_does_not_trigger_fuzzy() {
    let entries = starters();
    let c = FilterCriteria {
        query: "   ".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(result.matches.len(), 3);
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_typo_yields_suggestion() {
    let entries = starters();
    let c = FilterCriteria {
        query: "charmandr".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert!(result.matches.is_empty());
    assert_eq!(result.suggestions, vec!["charmander"]);
}

#[test]
fn test_nothing_close_yields_no_suggestions() {
    let entries = starters();
    let c = FilterCriteria {
        query: "zzzzzzzz".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert!(result.matches.is_empty());
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_suggestions_sorted_by_distance_then_catalog_order() {
    let entries = vec![
        entry(1, "abcx", &["normal"]),
        entry(2, "abyy", &["normal"]),
        entry(3, "abzz", &["normal"]),
        entry(4, "abcd", &["normal"]),
    ];
    let c = FilterCriteria {
        query: "abce".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    // abcx:1, abcd:1, abyy:2, abzz:2
    assert_eq!(result.suggestions, vec!["abcx", "abcd", "abyy", "abzz"]);
}

#[test]
fn test_suggestions_capped_at_five() {
    let entries: Vec<_> = (1..=10)
        .map(|i| entry(i, &format!("mon{}", char::from(b'a' + i as u8)), &["normal"]))
        .collect();
    let c = FilterCriteria {
        query: "monz".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(result.suggestions.len(), MAX_SUGGESTIONS);
}

#[test]
fn test_suggestions_keep_original_case() {
    let entries = vec![entry(6, "Charizard", &["fire", "flying"])];
    let c = FilterCriteria {
        query: "charizrd".to_string(),
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert_eq!(result.suggestions, vec!["Charizard"]);
}

#[test]
fn test_fuzzy_only_considers_category_survivors() {
    let entries = starters();
    let c = FilterCriteria {
        query: "charmandr".to_string(),
        categories: vec!["water".to_string()],
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert!(result.matches.is_empty());
    assert!(result.suggestions.is_empty());
}

#[test]
fn test_fuzzy_short_circuits_sort() {
    let entries = starters();
    let c = FilterCriteria {
        query: "bulbasaurr".to_string(),
        sort: SortKey::Name,
        ..criteria()
    };
    let result = filter(&entries, &c, &Vocabulary::pokedex());
    assert!(result.is_empty());
    assert_eq!(result.suggestions, vec!["bulbasaur"]);
}

#[test]
fn test_filter_is_idempotent() {
    let entries = starters();
    let c = FilterCriteria {
        query: "a".to_string(),
        sort: SortKey::Name,
        ..criteria()
    };
    let vocab = Vocabulary::pokedex();
    assert_eq!(filter(&entries, &c, &vocab), filter(&entries, &c, &vocab));
}

// =========================================================================
// engine / criteria helpers
// =========================================================================

#[test]
fn test_engine_uses_injected_vocabulary() {
    let entries = starters();
    let engine = FilterEngine::new(small_vocab());
    let c = FilterCriteria {
        range: Some("low".to_string()),
        ..criteria()
    };
    assert_eq!(engine.filter(&entries, &c).matches.len(), 2);
    // 図鑑語彙には "low" がないため無視される
    assert_eq!(FilterEngine::default().filter(&entries, &c).matches.len(), 3);
}

#[test]
fn test_active_filter_count() {
    let mut c = criteria();
    assert!(!c.has_active_filters());
    c.query = "char".to_string();
    c.sort = SortKey::Name;
    assert!(!c.has_active_filters());
    c.categories = vec!["fire".to_string(), "water".to_string()];
    c.range = Some("1".to_string());
    assert!(c.has_active_filters());
    assert_eq!(c.active_filter_count(), 3);
}

#[test]
fn test_sort_key_tokens() {
    assert_eq!(SortKey::parse("name"), Some(SortKey::Name));
    assert_eq!(SortKey::parse("id"), Some(SortKey::Id));
    assert_eq!(SortKey::parse("weight"), None);
    assert_eq!(SortKey::Name.to_string(), "name");
}
