//! catdex search コマンド
//!
//! index.json を読み込み、フィルタエンジンで絞り込んだ一覧を表示する。

use crate::catalog::{display_id, Catalog, CatalogEntry};
use crate::config::resolve_data_dir;
use crate::filter::{FilterCriteria, FilterEngine, FilterResult, SortKey};
use crate::query;
use crate::vocabulary::Vocabulary;
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// 自由入力テキスト（名前・id・カテゴリ）
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// カテゴリ（カンマ区切り、いずれかに一致）
    #[arg(long, value_delimiter = ',')]
    pub types: Vec<String>,

    /// レンジ区分（例: 1）
    #[arg(long)]
    pub gen: Option<String>,

    /// グループ（例: legendaries）
    #[arg(long)]
    pub class: Option<String>,

    /// 並び順（id / name）
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortKey>,

    /// 共有用のクエリ文字列
    #[arg(long)]
    pub url: Option<String>,

    /// 語彙ファイル（TOML）
    #[arg(long)]
    pub vocab: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, conflicts_with = "simple")]
    pub json: bool,

    /// Output only names
    #[arg(long, conflicts_with = "json")]
    pub simple: bool,

    /// データディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

fn parse_sort(token: &str) -> Result<SortKey, String> {
    SortKey::parse(token).ok_or_else(|| format!("unknown sort '{token}' (expected id or name)"))
}

#[derive(Debug, Serialize)]
struct SearchOutput<'a> {
    /// 正規化したクエリ文字列
    query: String,
    matches: &'a [&'a CatalogEntry],
    suggestions: &'a [String],
}

/// `--url` を土台にフラグで上書きした検索条件
pub fn build_criteria(args: &Args) -> FilterCriteria {
    let mut criteria = args
        .url
        .as_deref()
        .map(query::decode)
        .unwrap_or_default();

    if let Some(q) = &args.query {
        criteria.query = q.clone();
    }
    if !args.types.is_empty() {
        criteria.categories.clear();
        for category in args.types.iter().filter(|c| !c.is_empty()) {
            if !criteria.categories.contains(category) {
                criteria.categories.push(category.clone());
            }
        }
    }
    if let Some(gen) = &args.gen {
        criteria.range = Some(gen.clone());
    }
    if let Some(class) = &args.class {
        criteria.group = Some(class.clone());
    }
    if let Some(sort) = args.sort {
        criteria.sort = sort;
    }
    criteria
}

/// 語彙に存在しない条件（エンジンは無視する）
pub fn unknown_labels(criteria: &FilterCriteria, vocabulary: &Vocabulary) -> Vec<String> {
    let mut unknown = Vec::new();
    if let Some(range) = criteria.range.as_deref() {
        if vocabulary.range(range).is_none() {
            unknown.push(format!("generation '{range}'"));
        }
    }
    if let Some(group) = criteria.group.as_deref() {
        if vocabulary.group(group).is_none() {
            unknown.push(format!("class '{group}'"));
        }
    }
    for category in &criteria.categories {
        if !vocabulary.is_category(category) {
            unknown.push(format!("type '{category}'"));
        }
    }
    unknown
}

pub async fn run(args: Args) -> Result<(), String> {
    let vocabulary = match &args.vocab {
        Some(path) => Vocabulary::load(path).map_err(|e| e.to_string())?,
        None => Vocabulary::default(),
    };

    let index_path = resolve_data_dir(args.data_dir.clone()).join("index.json");
    let catalog = Catalog::load(&index_path)
        .map_err(|e| format!("Failed to load {}: {}", index_path.display(), e))?;

    if catalog.is_empty() {
        eprintln!(
            "Warning: {} has no entries (run `catdex crawl` first)",
            index_path.display()
        );
    }

    let criteria = build_criteria(&args);
    for label in unknown_labels(&criteria, &vocabulary) {
        eprintln!("Warning: unknown {label} (ignored)");
    }

    let engine = FilterEngine::new(vocabulary);
    let result = engine.filter(catalog.entries(), &criteria);

    if args.json {
        print_json(&result, &criteria)?;
    } else if args.simple {
        print_simple(&result);
    } else {
        print_table(&result, &criteria, catalog.len());
    }

    Ok(())
}

fn print_json(result: &FilterResult<'_>, criteria: &FilterCriteria) -> Result<(), String> {
    let output = SearchOutput {
        query: query::encode(criteria),
        matches: &result.matches,
        suggestions: &result.suggestions,
    };
    serde_json::to_string_pretty(&output)
        .map(|json| println!("{json}"))
        .map_err(|e| format!("Failed to serialize results: {}", e))
}

fn print_simple(result: &FilterResult<'_>) {
    for entry in &result.matches {
        println!("{}", entry.name);
    }
}

fn print_table(result: &FilterResult<'_>, criteria: &FilterCriteria, total_count: usize) {
    if result.is_empty() {
        if result.suggestions.is_empty() {
            println!("No entries matched");
        } else {
            println!(
                "No entries matched. Did you mean: {}?",
                result.suggestions.join(", ").cyan()
            );
        }
    } else {
        let width = id_width(total_count);
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec!["#", "Name", "Types"]);

        for entry in &result.matches {
            table.add_row(vec![
                display_id(entry.id, width),
                entry.name.clone(),
                entry.categories.join(", "),
            ]);
        }

        println!("{table}");
        if criteria.has_active_filters() {
            println!(
                "{} of {} entries ({} filter(s) active)",
                result.matches.len(),
                total_count,
                criteria.active_filter_count()
            );
        } else {
            println!("{} of {} entries", result.matches.len(), total_count);
        }
    }

    println!("Share: {}", query::share_path(criteria));
}

/// 1000件を超えるカタログは4桁表示
fn id_width(total_count: usize) -> usize {
    if total_count >= 1000 {
        4
    } else {
        3
    }
}
