//! カタログデータモデル
//!
//! `index.json` に並ぶエントリ一覧と、エントリ単位の詳細レコードを扱う。
//! エントリ一覧はロード後に変更しない。

pub mod record;

pub use record::CatalogRecord;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// index.json の1エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    /// カテゴリタグ（index.json 上は `types`）
    #[serde(rename = "types")]
    pub categories: Vec<String>,
    /// 画像URL（エンジンは解釈しない）
    #[serde(rename = "image", default)]
    pub image_ref: String,
}

impl CatalogEntry {
    /// いずれかのカテゴリを持つか
    pub fn has_any_category(&self, categories: &[String]) -> bool {
        categories.iter().any(|c| self.categories.contains(c))
    }
}

/// 読み込み済みカタログ
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// index.json から読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<CatalogEntry> = serde_json::from_str(&content)?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// スラッグでエントリを検索
    ///
    /// - 数字のみなら id として検索
    /// - それ以外は名前の大文字小文字を無視した完全一致
    pub fn find(&self, slug: &str) -> Option<&CatalogEntry> {
        let slug = slug.trim();
        if slug.is_empty() {
            return None;
        }

        if slug.bytes().all(|b| b.is_ascii_digit()) {
            let id: u32 = slug.parse().ok()?;
            return self.entries.iter().find(|e| e.id == id);
        }

        let slug = slug.to_lowercase();
        self.entries.iter().find(|e| e.name.to_lowercase() == slug)
    }
}

/// ゼロ埋めした表示用 id（例: `display_id(4, 3)` → `"004"`）
pub fn display_id(id: u32, width: usize) -> String {
    format!("{:0width$}", id, width = width)
}
