use super::*;
use proptest::prelude::*;

const CATEGORIES: &[&str] = &["fire", "water", "grass", "poison", "ghost"];

fn entry_strategy() -> impl Strategy<Value = CatalogEntry> {
    (
        1u32..400,
        "[a-z]{3,10}",
        proptest::sample::subsequence(CATEGORIES, 1..=2),
    )
        .prop_map(|(id, name, cats)| CatalogEntry {
            id,
            name,
            categories: cats.iter().map(|c| c.to_string()).collect(),
            image_ref: String::new(),
        })
}

/// id が一意なエントリ一覧
fn entries_strategy() -> impl Strategy<Value = Vec<CatalogEntry>> {
    proptest::collection::vec(entry_strategy(), 0..40).prop_map(|mut v| {
        let mut seen = std::collections::HashSet::new();
        v.retain(|e| seen.insert(e.id));
        v
    })
}

proptest! {
    /// 条件なしなら全件が id 昇順で返る
    #[test]
    fn prop_empty_criteria_keeps_everything_sorted(entries in entries_strategy()) {
        let result = filter(&entries, &FilterCriteria::default(), &Vocabulary::pokedex());
        prop_assert_eq!(result.matches.len(), entries.len());
        prop_assert!(result.matches.windows(2).all(|w| w[0].id < w[1].id));
        prop_assert!(result.suggestions.is_empty());
    }

    /// 結果は必ず条件のカテゴリを1つ以上持つ
    #[test]
    fn prop_category_results_intersect_filter(
        entries in entries_strategy(),
        cats in proptest::sample::subsequence(CATEGORIES, 1..=3),
    ) {
        let criteria = FilterCriteria {
            categories: cats.iter().map(|c| c.to_string()).collect(),
            ..FilterCriteria::default()
        };
        let result = filter(&entries, &criteria, &Vocabulary::pokedex());
        for e in &result.matches {
            prop_assert!(e.has_any_category(&criteria.categories));
        }
        let expected = entries.iter().filter(|e| e.has_any_category(&criteria.categories)).count();
        prop_assert_eq!(result.matches.len(), expected);
    }

    /// レンジ外のエントリはテキストに一致しても現れない
    #[test]
    fn prop_range_is_never_bypassed(entries in entries_strategy(), query in "[a-z]{0,4}") {
        let criteria = FilterCriteria {
            query,
            range: Some("1".to_string()),
            ..FilterCriteria::default()
        };
        let result = filter(&entries, &criteria, &Vocabulary::pokedex());
        prop_assert!(result.matches.iter().all(|e| (1..=151).contains(&e.id)));
    }

    /// 候補は5件以内・距離3以内・距離の昇順
    #[test]
    fn prop_suggestions_are_bounded_and_ordered(entries in entries_strategy(), query in "[a-z]{1,8}") {
        let criteria = FilterCriteria { query: query.clone(), ..FilterCriteria::default() };
        let result = filter(&entries, &criteria, &Vocabulary::pokedex());

        if !result.matches.is_empty() {
            prop_assert!(result.suggestions.is_empty());
        }
        prop_assert!(result.suggestions.len() <= MAX_SUGGESTIONS);

        let distances: Vec<usize> = result
            .suggestions
            .iter()
            .map(|s| distance::levenshtein(&query, &s.to_lowercase()))
            .collect();
        prop_assert!(distances.iter().all(|d| *d <= FUZZY_THRESHOLD));
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    /// 名前に部分一致があれば候補は出ない
    #[test]
    fn prop_direct_name_match_suppresses_suggestions(entries in entries_strategy(), idx in any::<prop::sample::Index>()) {
        prop_assume!(!entries.is_empty());
        let target = &entries[idx.index(entries.len())];
        let criteria = FilterCriteria {
            query: target.name[..2].to_string(),
            ..FilterCriteria::default()
        };
        let result = filter(&entries, &criteria, &Vocabulary::pokedex());
        prop_assert!(result.suggestions.is_empty());
        prop_assert!(result.matches.iter().any(|e| e.id == target.id));
    }

    /// 同じ入力には同じ出力
    #[test]
    fn prop_filter_is_deterministic(entries in entries_strategy(), query in "[a-z]{0,5}") {
        let criteria = FilterCriteria { query, sort: SortKey::Name, ..FilterCriteria::default() };
        let vocab = Vocabulary::pokedex();
        prop_assert_eq!(filter(&entries, &criteria, &vocab), filter(&entries, &criteria, &vocab));
    }
}
