//! エントリ詳細レコード（`<id>.json`）

use super::CatalogEntry;
use crate::typechart::TypeEffectiveness;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 基礎ステータス
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

/// 進化チェーンの1段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionStep {
    pub name: String,
    pub id: u32,
    pub min_level: Option<u32>,
    pub trigger: Option<String>,
}

/// 技（level はレベルアップ習得時のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    pub url: String,
}

/// ゲーム別の出現場所（最初に現れた順）
pub type LocationsByGame = IndexMap<String, Vec<String>>;

/// 世代キー（`gen-i` など）別の技一覧（最初に現れた順）
pub type MovesByGeneration = IndexMap<String, Vec<Move>>;

/// 詳細レコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub image_shiny: Option<String>,
    pub types: Vec<String>,
    /// メートル
    pub height: f64,
    /// キログラム
    pub weight: f64,
    pub stats: Stats,
    pub abilities: Vec<Ability>,
    pub type_effectiveness: TypeEffectiveness,
    pub evolution_chain: Vec<EvolutionStep>,
    pub locations: LocationsByGame,
    pub moves_by_level: MovesByGeneration,
    pub moves_by_machine: MovesByGeneration,
    pub genus: String,
    pub flavor_text: String,
}

impl CatalogRecord {
    /// index.json 用のエントリに射影
    pub fn to_entry(&self) -> CatalogEntry {
        CatalogEntry {
            id: self.id,
            name: self.name.clone(),
            categories: self.types.clone(),
            image_ref: self.image.clone(),
        }
    }
}
