//! 検索条件 ⇄ クエリ文字列
//!
//! 共有・ブックマーク用の URL 表現。フィルタエンジンとは独立した
//! 純粋な関数の組で、`encode(&decode(s)) == s` が正規形で成り立つ。
//!
//! | キー     | 内容                         |
//! |----------|------------------------------|
//! | `search` | 自由入力テキスト             |
//! | `types`  | カンマ区切りのカテゴリ       |
//! | `gen`    | レンジ区分の識別子           |
//! | `class`  | グループキー                 |
//! | `sort`   | `name`（`id` は既定値で省略）|

use crate::filter::{FilterCriteria, SortKey};
use url::form_urlencoded;

pub const KEY_SEARCH: &str = "search";
pub const KEY_TYPES: &str = "types";
pub const KEY_RANGE: &str = "gen";
pub const KEY_GROUP: &str = "class";
pub const KEY_SORT: &str = "sort";

/// クエリ文字列を検索条件に変換
///
/// 不正・未知の値はエラーにせず「条件なし」として扱う。
/// 同じキーが複数ある場合は最初の値を使う。
pub fn decode(query_string: &str) -> FilterCriteria {
    let input = query_string.strip_prefix('?').unwrap_or(query_string);
    let mut criteria = FilterCriteria::default();
    let mut seen: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        if seen.iter().any(|k| k == key.as_ref()) {
            continue;
        }
        seen.push(key.to_string());

        match key.as_ref() {
            KEY_SEARCH => criteria.query = value.into_owned(),
            KEY_TYPES => {
                for category in value.split(',').filter(|c| !c.is_empty()) {
                    if !criteria.categories.iter().any(|c| c == category) {
                        criteria.categories.push(category.to_string());
                    }
                }
            }
            KEY_RANGE => criteria.range = non_empty(&value),
            KEY_GROUP => criteria.group = non_empty(&value),
            KEY_SORT => criteria.sort = SortKey::parse(&value).unwrap_or_default(),
            _ => {}
        }
    }

    criteria
}

/// 検索条件をクエリ文字列に変換（`?` は付けない）
///
/// 空の条件は出力しない。キーの順序は固定。
pub fn encode(criteria: &FilterCriteria) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !criteria.query.is_empty() {
        serializer.append_pair(KEY_SEARCH, &criteria.query);
    }
    if !criteria.categories.is_empty() {
        serializer.append_pair(KEY_TYPES, &criteria.categories.join(","));
    }
    if let Some(range) = criteria.range.as_deref().filter(|r| !r.is_empty()) {
        serializer.append_pair(KEY_RANGE, range);
    }
    if let Some(group) = criteria.group.as_deref().filter(|g| !g.is_empty()) {
        serializer.append_pair(KEY_GROUP, group);
    }
    if criteria.sort != SortKey::Id {
        serializer.append_pair(KEY_SORT, criteria.sort.as_str());
    }

    serializer.finish()
}

/// 共有用のパス（条件なしなら `/`）
pub fn share_path(criteria: &FilterCriteria) -> String {
    let qs = encode(criteria);
    if qs.is_empty() {
        "/".to_string()
    } else {
        format!("/?{qs}")
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
