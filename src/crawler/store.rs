//! レコード保存先
//!
//! `<data_dir>/pokemon/<id>.json` に詳細レコード、
//! `<data_dir>/index.json` にエントリ一覧、`<data_dir>/meta.json` に実行記録を置く。

use crate::catalog::{CatalogEntry, CatalogRecord};
use crate::error::{DexError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 直近のクロール実行記録
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMeta {
    pub crawled_at: DateTime<Utc>,
    pub saved: usize,
    pub already_existed: usize,
    pub missing: usize,
    pub total_records: usize,
}

/// データディレクトリ
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
}

impl RecordStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn records_dir(&self) -> PathBuf {
        self.data_dir.join("pokemon")
    }

    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join("index.json")
    }

    pub fn meta_path(&self) -> PathBuf {
        self.data_dir.join("meta.json")
    }

    pub fn record_path(&self, id: u32) -> PathBuf {
        self.records_dir().join(format!("{id}.json"))
    }

    /// 保存先ディレクトリを作成
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(self.records_dir())?;
        Ok(())
    }

    /// 保存済みレコードのid一覧（ファイル名が数値の `.json` のみ）
    pub fn existing_ids(&self) -> Result<BTreeSet<u32>> {
        let dir = self.records_dir();
        if !dir.exists() {
            return Ok(BTreeSet::new());
        }

        let mut ids = BTreeSet::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| DexError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(id) = record_id(entry.path()) {
                ids.insert(id);
            }
        }
        Ok(ids)
    }

    /// レコードを書き込む（既存は上書き）
    pub fn write(&self, record: &CatalogRecord) -> Result<PathBuf> {
        self.ensure_dirs()?;
        let path = self.record_path(record.id);
        write_json(&path, record)?;
        Ok(path)
    }

    /// レコードを読み込む
    pub fn load(&self, id: u32) -> Result<CatalogRecord> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(DexError::EntryNotFound(format!("#{id} ({})", path.display())));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 保存済みレコードから index.json を再生成（id昇順）
    pub fn rebuild_index(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = Vec::new();
        for id in self.existing_ids()? {
            entries.push(self.load(id)?.to_entry());
        }
        self.write_index(&entries)?;
        Ok(entries)
    }

    pub fn write_index(&self, entries: &[CatalogEntry]) -> Result<()> {
        write_json(&self.index_path(), entries)
    }

    pub fn write_meta(&self, meta: &RunMeta) -> Result<()> {
        write_json(&self.meta_path(), meta)
    }

    pub fn load_meta(&self) -> Result<Option<RunMeta>> {
        let path = self.meta_path();
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

/// `25.json` → 25（`025.json` や `+25.json` は `record_path` と一致しないので除外）
fn record_id(path: &Path) -> Option<u32> {
    if path.extension()? != "json" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let id: u32 = stem.parse().ok()?;
    (id.to_string() == stem).then_some(id)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
