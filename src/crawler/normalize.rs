//! API レスポンス（ネストした JSON）をフラットなレコードへ正規化する

use crate::catalog::record::{
    Ability, CatalogRecord, EvolutionStep, LocationsByGame, Move, MovesByGeneration, Stats,
};
use crate::error::{DexError, Result};
use crate::typechart::TypeEffectiveness;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn malformed(what: &str) -> DexError {
    DexError::MalformedPayload(what.to_string())
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn u32_at(value: &Value, pointer: &str) -> Option<u32> {
    value
        .pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

fn array_at<'a>(value: &'a Value, pointer: &str) -> &'a [Value] {
    value
        .pointer(pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// リソースURL末尾のidを取り出す（`.../pokemon-species/25/` → 25）
pub fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

/// 種族一覧の最大id
pub fn max_species_id(species_list: &Value) -> Option<u32> {
    array_at(species_list, "/results")
        .iter()
        .filter_map(|s| str_at(s, "/url").and_then(id_from_url))
        .max()
}

/// 進化チェーンを行きがけ順で平坦化
pub fn evolution_chain(payload: &Value) -> Result<Vec<EvolutionStep>> {
    let root = payload
        .get("chain")
        .ok_or_else(|| malformed("evolution chain without 'chain'"))?;

    let mut steps = Vec::new();
    traverse(root, None, &mut steps)?;
    Ok(steps)
}

fn traverse(node: &Value, details: Option<&[Value]>, steps: &mut Vec<EvolutionStep>) -> Result<()> {
    let name = str_at(node, "/species/name").ok_or_else(|| malformed("species name"))?;
    let id = str_at(node, "/species/url")
        .and_then(id_from_url)
        .ok_or_else(|| malformed("species url"))?;

    // 進化条件は先頭の1件のみ採用
    let first = details.and_then(|d| d.first());
    steps.push(EvolutionStep {
        name: name.to_string(),
        id,
        min_level: first.and_then(|d| u32_at(d, "/min_level")),
        trigger: first
            .and_then(|d| str_at(d, "/trigger/name"))
            .map(String::from),
    });

    for child in array_at(node, "/evolves_to") {
        traverse(child, Some(array_at(child, "/evolution_details")), steps)?;
    }
    Ok(())
}

/// `route-1-area` → `Route 1 Area`
pub fn location_label(area: &str) -> String {
    let mut out = String::with_capacity(area.len());
    let mut at_word_start = true;
    for c in area.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }
    out
}

/// 遭遇データをゲーム別の出現場所に集約（重複なし、出現順）
pub fn locations(encounters: &Value) -> LocationsByGame {
    let mut by_game = LocationsByGame::new();

    for encounter in encounters.as_array().map(Vec::as_slice).unwrap_or(&[]) {
        let Some(area) = str_at(encounter, "/location_area/name") else {
            continue;
        };
        let label = location_label(area);

        for version in array_at(encounter, "/version_details") {
            let Some(game) = str_at(version, "/version/name") else {
                continue;
            };
            let places = by_game.entry(game.to_string()).or_default();
            if !places.contains(&label) {
                places.push(label.clone());
            }
        }
    }

    by_game
}

fn generation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"generation-(\w+)").unwrap())
}

/// バージョングループ名から世代キーを作る
///
/// `generation-(\w+)` に一致すればその部分、しなければ名前全体を使う。
pub fn generation_key(version_group: &str) -> String {
    let gen = generation_re()
        .captures(version_group)
        .and_then(|c| c.get(1))
        .map_or(version_group, |m| m.as_str());
    format!("gen-{gen}")
}

/// 技を習得方法・世代別に振り分ける
///
/// 戻り値は (レベルアップ, 技マシン)。レベルアップ技はレベル順（安定ソート）。
pub fn moves(pokemon_moves: &[Value]) -> (MovesByGeneration, MovesByGeneration) {
    let mut by_level = MovesByGeneration::new();
    let mut by_machine = MovesByGeneration::new();

    for entry in pokemon_moves {
        let (Some(name), Some(url)) = (str_at(entry, "/move/name"), str_at(entry, "/move/url"))
        else {
            continue;
        };

        for detail in array_at(entry, "/version_group_details") {
            let Some(group) = str_at(detail, "/version_group/name") else {
                continue;
            };
            let key = generation_key(group);

            match str_at(detail, "/move_learn_method/name") {
                Some("level-up") => by_level.entry(key).or_default().push(Move {
                    name: name.to_string(),
                    level: Some(u32_at(detail, "/level_learned_at").unwrap_or(0)),
                    url: url.to_string(),
                }),
                Some("machine") => by_machine.entry(key).or_default().push(Move {
                    name: name.to_string(),
                    level: None,
                    url: url.to_string(),
                }),
                _ => {}
            }
        }
    }

    for list in by_level.values_mut() {
        list.sort_by_key(|m| m.level.unwrap_or(0));
    }

    (by_level, by_machine)
}

fn english<'a>(entries: &'a [Value], field: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| str_at(e, "/language/name") == Some("en"))
        .and_then(|e| e.get(field))
        .and_then(Value::as_str)
}

/// 詳細レコードを組み立てる
pub fn record(
    pokemon: &Value,
    species: &Value,
    evolution_chain: Vec<EvolutionStep>,
    locations: LocationsByGame,
) -> Result<CatalogRecord> {
    let id = u32_at(pokemon, "/id").ok_or_else(|| malformed("pokemon id"))?;
    let name = str_at(pokemon, "/name").ok_or_else(|| malformed("pokemon name"))?;

    let image = str_at(pokemon, "/sprites/other/official-artwork/front_default")
        .or_else(|| str_at(pokemon, "/sprites/front_default"))
        .unwrap_or_default()
        .to_string();
    let image_shiny =
        str_at(pokemon, "/sprites/other/official-artwork/front_shiny").map(String::from);

    let types: Vec<String> = array_at(pokemon, "/types")
        .iter()
        .filter_map(|t| str_at(t, "/type/name"))
        .map(String::from)
        .collect();

    let base: Vec<u32> = array_at(pokemon, "/stats")
        .iter()
        .map(|s| u32_at(s, "/base_stat").unwrap_or(0))
        .collect();
    let stat = |i: usize| base.get(i).copied().unwrap_or(0);
    let stats = Stats {
        hp: stat(0),
        attack: stat(1),
        defense: stat(2),
        special_attack: stat(3),
        special_defense: stat(4),
        speed: stat(5),
        total: base.iter().copied().fold(0u32, u32::saturating_add),
    };

    let abilities = array_at(pokemon, "/abilities")
        .iter()
        .filter_map(|a| {
            Some(Ability {
                name: str_at(a, "/ability/name")?.to_string(),
                is_hidden: a.get("is_hidden").and_then(Value::as_bool).unwrap_or(false),
            })
        })
        .collect();

    let (moves_by_level, moves_by_machine) = moves(array_at(pokemon, "/moves"));

    let genus = english(array_at(species, "/genera"), "genus")
        .unwrap_or_default()
        .to_string();
    let flavor_text = english(array_at(species, "/flavor_text_entries"), "flavor_text")
        .map(|t| t.replace('\u{c}', " "))
        .unwrap_or_default();

    // API は 10cm / 100g 単位
    let height = pokemon.get("height").and_then(Value::as_f64).unwrap_or(0.0) / 10.0;
    let weight = pokemon.get("weight").and_then(Value::as_f64).unwrap_or(0.0) / 10.0;

    Ok(CatalogRecord {
        id,
        name: name.to_string(),
        image,
        image_shiny,
        type_effectiveness: TypeEffectiveness::for_types(&types),
        types,
        height,
        weight,
        stats,
        abilities,
        evolution_chain,
        locations,
        moves_by_level,
        moves_by_machine,
        genus,
        flavor_text,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
