//! タイプ相性表
//!
//! 防御側（被ダメージ倍率）と攻撃側（効果抜群）の2方向を扱う。

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 2倍ダメージを受ける攻撃タイプ
const WEAKNESSES: &[(&str, &[&str])] = &[
    ("normal", &["fighting"]),
    ("fire", &["water", "ground", "rock"]),
    ("water", &["electric", "grass"]),
    ("electric", &["ground"]),
    ("grass", &["fire", "ice", "poison", "flying", "bug"]),
    ("ice", &["fire", "fighting", "rock", "steel"]),
    ("fighting", &["flying", "psychic", "fairy"]),
    ("poison", &["ground", "psychic"]),
    ("ground", &["water", "grass", "ice"]),
    ("flying", &["electric", "ice", "rock"]),
    ("psychic", &["bug", "ghost", "dark"]),
    ("bug", &["fire", "flying", "rock"]),
    ("rock", &["water", "grass", "fighting", "ground", "steel"]),
    ("ghost", &["ghost", "dark"]),
    ("dragon", &["ice", "dragon", "fairy"]),
    ("dark", &["fighting", "bug", "fairy"]),
    ("steel", &["fire", "fighting", "ground"]),
    ("fairy", &["poison", "steel"]),
];

/// 0.5倍ダメージを受ける攻撃タイプ
const RESISTANCES: &[(&str, &[&str])] = &[
    ("normal", &[]),
    ("fire", &["fire", "grass", "ice", "bug", "steel", "fairy"]),
    ("water", &["fire", "water", "ice", "steel"]),
    ("electric", &["electric", "flying", "steel"]),
    ("grass", &["water", "electric", "grass", "ground"]),
    ("ice", &["ice"]),
    ("fighting", &["bug", "rock", "dark"]),
    ("poison", &["grass", "fighting", "poison", "bug", "fairy"]),
    ("ground", &["poison", "rock"]),
    ("flying", &["grass", "fighting", "bug"]),
    ("psychic", &["fighting", "psychic"]),
    ("bug", &["grass", "fighting", "ground"]),
    ("rock", &["normal", "fire", "poison", "flying"]),
    ("ghost", &["poison", "bug"]),
    ("dragon", &["fire", "water", "electric", "grass"]),
    ("dark", &["ghost", "dark"]),
    (
        "steel",
        &[
            "normal", "grass", "ice", "flying", "psychic", "bug", "rock", "dragon", "steel",
            "fairy",
        ],
    ),
    ("fairy", &["fighting", "bug", "dark"]),
];

/// 無効（0倍）の攻撃タイプ
const IMMUNITIES: &[(&str, &[&str])] = &[
    ("normal", &["ghost"]),
    ("flying", &["ground"]),
    ("ground", &["electric"]),
    ("ghost", &["normal", "fighting"]),
    ("dark", &["psychic"]),
    ("steel", &["poison"]),
    ("fairy", &["dragon"]),
];

/// 攻撃タイプ → 効果抜群となる防御タイプ
const SUPER_EFFECTIVE: &[(&str, &[&str])] = &[
    ("normal", &[]),
    ("fire", &["grass", "ice", "bug", "steel"]),
    ("water", &["fire", "ground", "rock"]),
    ("electric", &["water", "flying"]),
    ("grass", &["water", "ground", "rock"]),
    ("ice", &["grass", "ground", "flying", "dragon"]),
    ("fighting", &["normal", "ice", "rock", "dark", "steel"]),
    ("poison", &["grass", "fairy"]),
    ("ground", &["fire", "electric", "poison", "rock", "steel"]),
    ("flying", &["grass", "fighting", "bug"]),
    ("psychic", &["fighting", "poison"]),
    ("bug", &["grass", "psychic", "dark"]),
    ("rock", &["fire", "ice", "flying", "bug"]),
    ("ghost", &["psychic", "ghost"]),
    ("dragon", &["dragon"]),
    ("dark", &["psychic", "ghost"]),
    ("steel", &["ice", "rock", "fairy"]),
    ("fairy", &["fighting", "dragon", "dark"]),
];

fn lookup(table: &'static [(&'static str, &'static [&'static str])], key: &str) -> &'static [&'static str] {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(&[])
}

/// 防御側の相性（各リストはソート済み）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEffectiveness {
    pub weaknesses: Vec<String>,
    pub resistances: Vec<String>,
    pub immunities: Vec<String>,
}

impl TypeEffectiveness {
    /// タイプの組み合わせから防御相性を計算
    ///
    /// 無効は弱点・耐性の両方を打ち消し、耐性は弱点を打ち消す。
    pub fn for_types<S: AsRef<str>>(types: &[S]) -> Self {
        let mut weaknesses = BTreeSet::new();
        let mut resistances = BTreeSet::new();
        let mut immunities = BTreeSet::new();

        for t in types {
            let t = t.as_ref();
            weaknesses.extend(lookup(WEAKNESSES, t).iter().copied());
            resistances.extend(lookup(RESISTANCES, t).iter().copied());
            immunities.extend(lookup(IMMUNITIES, t).iter().copied());
        }

        for i in &immunities {
            weaknesses.remove(i);
            resistances.remove(i);
        }
        for r in &resistances {
            weaknesses.remove(r);
        }

        let to_vec = |set: BTreeSet<&str>| set.into_iter().map(String::from).collect();
        Self {
            weaknesses: to_vec(weaknesses),
            resistances: to_vec(resistances),
            immunities: to_vec(immunities),
        }
    }
}

/// 自タイプの攻撃が効果抜群となるタイプ一覧（ソート済み）
pub fn strong_against<S: AsRef<str>>(types: &[S]) -> Vec<String> {
    let set: BTreeSet<&str> = types
        .iter()
        .flat_map(|t| lookup(SUPER_EFFECTIVE, &t.as_ref().to_lowercase()).iter().copied())
        .collect();
    set.into_iter().map(String::from).collect()
}

#[cfg(test)]
#[path = "typechart_test.rs"]
mod tests;
