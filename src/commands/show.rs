//! catdex show コマンド
//!
//! id または名前でエントリを引き、詳細レコードを表示する。

use crate::catalog::{display_id, Catalog, CatalogEntry, CatalogRecord};
use crate::config::resolve_data_dir;
use crate::crawler::RecordStore;
use crate::error::DexError;
use crate::typechart::{strong_against, TypeEffectiveness};
use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    /// id（例: 25）または名前（例: pikachu）
    pub slug: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// データディレクトリ
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub async fn run(args: Args) -> Result<(), String> {
    let store = RecordStore::new(resolve_data_dir(args.data_dir));
    let index_path = store.index_path();
    let catalog = Catalog::load(&index_path)
        .map_err(|e| format!("Failed to load {}: {}", index_path.display(), e))?;

    let entry = catalog
        .find(&args.slug)
        .ok_or_else(|| DexError::EntryNotFound(args.slug.clone()).to_string())?;

    let record = match store.load(entry.id) {
        Ok(record) => Some(record),
        Err(DexError::EntryNotFound(_)) => {
            eprintln!(
                "Warning: No detail record for #{} (run `catdex retry {}`)",
                entry.id, entry.id
            );
            None
        }
        Err(e) => return Err(e.to_string()),
    };

    let width = if catalog.len() >= 1000 { 4 } else { 3 };

    match (&record, args.json) {
        (Some(record), true) => print_json(record),
        (None, true) => serde_json::to_string_pretty(entry)
            .map(|json| println!("{json}"))
            .map_err(|e| format!("Failed to serialize entry: {}", e)),
        (Some(record), false) => {
            print_record(record, width);
            Ok(())
        }
        (None, false) => {
            print_entry(entry, width);
            Ok(())
        }
    }
}

fn print_json(record: &CatalogRecord) -> Result<(), String> {
    serde_json::to_string_pretty(record)
        .map(|json| println!("{json}"))
        .map_err(|e| format!("Failed to serialize record: {}", e))
}

fn print_header(id: u32, name: &str, types: &[String], width: usize) {
    println!(
        "{} {}  {}",
        format!("#{}", display_id(id, width)).dimmed(),
        name.bold(),
        types.join(" / ").cyan()
    );
}

fn print_matchups(effectiveness: &TypeEffectiveness, types: &[String]) {
    let or_none = |list: &[String]| {
        if list.is_empty() {
            "-".to_string()
        } else {
            list.join(", ")
        }
    };
    println!("  Weak to:        {}", or_none(&effectiveness.weaknesses));
    println!("  Resists:        {}", or_none(&effectiveness.resistances));
    println!("  Immune to:      {}", or_none(&effectiveness.immunities));
    println!("  Strong against: {}", or_none(&strong_against(types)));
}

/// index のみで分かる範囲を表示
fn print_entry(entry: &CatalogEntry, width: usize) {
    print_header(entry.id, &entry.name, &entry.categories, width);
    println!();
    print_matchups(&TypeEffectiveness::for_types(&entry.categories), &entry.categories);
}

fn print_record(record: &CatalogRecord, width: usize) {
    print_header(record.id, &record.name, &record.types, width);
    if !record.genus.is_empty() {
        println!("  {}", record.genus);
    }
    if !record.flavor_text.is_empty() {
        println!("  {}", record.flavor_text.dimmed());
    }
    println!();
    println!("  Height: {:.1} m   Weight: {:.1} kg", record.height, record.weight);

    let abilities: Vec<String> = record
        .abilities
        .iter()
        .map(|a| {
            if a.is_hidden {
                format!("{} (hidden)", a.name)
            } else {
                a.name.clone()
            }
        })
        .collect();
    if !abilities.is_empty() {
        println!("  Abilities: {}", abilities.join(", "));
    }
    println!();

    let stats = &record.stats;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["HP", "Atk", "Def", "SpA", "SpD", "Spe", "Total"]);
    table.add_row(vec![
        stats.hp,
        stats.attack,
        stats.defense,
        stats.special_attack,
        stats.special_defense,
        stats.speed,
        stats.total,
    ]);
    println!("{table}");

    print_matchups(&record.type_effectiveness, &record.types);

    if record.evolution_chain.len() > 1 {
        let chain: Vec<String> = record
            .evolution_chain
            .iter()
            .map(|step| match step.min_level {
                Some(level) => format!("{} (Lv. {})", step.name, level),
                None => step.name.clone(),
            })
            .collect();
        println!("  Evolution:      {}", chain.join(" → "));
    }

    if !record.locations.is_empty() {
        println!("  Found in {} game(s)", record.locations.len());
    }
}
