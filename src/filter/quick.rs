//! ヘッダー検索ボックス用のクイック検索

use crate::catalog::CatalogEntry;

/// クイック検索の既定件数
pub const DEFAULT_QUICK_LIMIT: usize = 8;

/// 名前または id の部分一致で先頭 `limit` 件を返す
///
/// - 前後空白を除いたクエリが空なら空
/// - カタログ順を保つ（ソートしない）
pub fn quick_search<'a>(
    entries: &'a [CatalogEntry],
    query: &str,
    limit: usize,
) -> Vec<&'a CatalogEntry> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();
    entries
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&query) || e.id.to_string().contains(&query))
        .take(limit)
        .collect()
}
