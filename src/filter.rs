//! カタログフィルタエンジン
//!
//! エントリ一覧と検索条件から、表示する一覧または「もしかして」候補を返す。
//! 状態を持たない純粋関数で、同じ入力には常に同じ出力を返す。
//!
//! ステージは次の固定順で適用され、各ステージは集合を絞り込むだけ:
//! 1. レンジ（id の閉区間）
//! 2. グループ（固定 id 集合）
//! 3. カテゴリ（いずれか1つを持てば一致）
//! 4. テキスト（直接一致がなければ編集距離で候補を出して終了）
//! 5. ソート

pub mod collate;
pub mod distance;
pub mod quick;

pub use quick::{quick_search, DEFAULT_QUICK_LIMIT};

use crate::catalog::CatalogEntry;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};

/// 候補として採用する最大編集距離
pub const FUZZY_THRESHOLD: usize = 3;

/// 候補の最大件数
pub const MAX_SUGGESTIONS: usize = 5;

/// 並び順
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
}

impl SortKey {
    /// URL 上のトークン
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
        }
    }

    /// トークンから変換（未知は None）
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 検索条件（ユーザー操作ごとに作り直す）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// 自由入力テキスト
    pub query: String,
    /// カテゴリ（OR 条件、選択順を保持）
    pub categories: Vec<String>,
    /// レンジ区分の識別子
    pub range: Option<String>,
    /// グループキー
    pub group: Option<String>,
    pub sort: SortKey,
}

impl FilterCriteria {
    /// 絞り込み系の条件が1つでも有効か（テキストとソートは含まない）
    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty() || self.range.is_some() || self.group.is_some()
    }

    /// 有効な絞り込み条件の数
    pub fn active_filter_count(&self) -> usize {
        self.categories.len() + usize::from(self.range.is_some()) + usize::from(self.group.is_some())
    }
}

/// フィルタ結果
///
/// `suggestions` は `matches` が空かつクエリが空でないときのみ埋まる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult<'a> {
    pub matches: Vec<&'a CatalogEntry>,
    pub suggestions: Vec<String>,
}

impl FilterResult<'_> {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// 語彙を束ねたフィルタエンジン
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    vocabulary: Vocabulary,
}

impl FilterEngine {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn filter<'a>(
        &self,
        entries: &'a [CatalogEntry],
        criteria: &FilterCriteria,
    ) -> FilterResult<'a> {
        filter(entries, criteria, &self.vocabulary)
    }
}

/// フィルタパイプラインを実行
pub fn filter<'a>(
    entries: &'a [CatalogEntry],
    criteria: &FilterCriteria,
    vocabulary: &Vocabulary,
) -> FilterResult<'a> {
    let mut working: Vec<&CatalogEntry> = entries.iter().collect();

    // 未知の識別子は条件なしとして扱う
    if let Some(bucket) = criteria.range.as_deref().and_then(|v| vocabulary.range(v)) {
        working.retain(|e| bucket.contains(e.id));
    }

    if let Some(group) = criteria.group.as_deref().and_then(|k| vocabulary.group(k)) {
        working.retain(|e| group.contains(e.id));
    }

    if !criteria.categories.is_empty() {
        working.retain(|e| e.has_any_category(&criteria.categories));
    }

    let query = criteria.query.trim().to_lowercase();
    if !query.is_empty() {
        let direct: Vec<&CatalogEntry> = working
            .iter()
            .copied()
            .filter(|e| matches_directly(e, &query))
            .collect();

        if direct.is_empty() {
            return FilterResult {
                matches: Vec::new(),
                suggestions: fuzzy_suggestions(&working, &query),
            };
        }
        working = direct;
    }

    match criteria.sort {
        SortKey::Id => working.sort_by_key(|e| e.id),
        SortKey::Name => working.sort_by(|a, b| collate::compare_names(&a.name, &b.name)),
    }

    FilterResult {
        matches: working,
        suggestions: Vec::new(),
    }
}

/// 名前・id・カテゴリのいずれかにクエリが部分一致するか
fn matches_directly(entry: &CatalogEntry, query: &str) -> bool {
    entry.name.to_lowercase().contains(query)
        || entry.id.to_string().contains(query)
        || entry
            .categories
            .iter()
            .any(|c| c.to_lowercase().contains(query))
}

/// 編集距離が閾値以内の名前を近い順に返す（同距離は元の順序）
fn fuzzy_suggestions(candidates: &[&CatalogEntry], query: &str) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|e| (distance::levenshtein(query, &e.name.to_lowercase()), e.name.as_str()))
        .filter(|(d, _)| *d <= FUZZY_THRESHOLD)
        .collect();

    scored.sort_by_key(|(d, _)| *d);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;

#[cfg(test)]
#[path = "filter_proptests.rs"]
mod proptests;
