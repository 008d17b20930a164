//! 固定ルックアップテーブル
//!
//! カテゴリ語彙・id レンジ区分・キュレーション済みグループを
//! フィルタエンジンに注入する設定データとして保持する。
//! 既定値は組み込みの図鑑データ、別カタログ向けには TOML から読み込む。

use crate::error::{DexError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// id の閉区間
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeBucket {
    /// URL 上の識別子（例: `"1"`）
    pub value: String,
    pub label: String,
    pub min: u32,
    pub max: u32,
}

impl RangeBucket {
    pub fn contains(&self, id: u32) -> bool {
        self.min <= id && id <= self.max
    }
}

/// 名前付きの固定 id 集合
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub label: String,
    pub ids: Vec<u32>,
}

impl Group {
    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }
}

/// フィルタ用語彙
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub categories: Vec<String>,
    #[serde(default)]
    pub ranges: Vec<RangeBucket>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::pokedex()
    }
}

impl Vocabulary {
    /// TOML ファイルから読み込む
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let vocab: Vocabulary = toml::from_str(content)?;
        vocab.validate()?;
        Ok(vocab)
    }

    /// 区間の逆転や識別子の重複を検出
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for bucket in &self.ranges {
            if bucket.min > bucket.max {
                return Err(DexError::InvalidVocabulary(format!(
                    "range '{}' has min {} > max {}",
                    bucket.value, bucket.min, bucket.max
                )));
            }
            if !seen.insert(bucket.value.as_str()) {
                return Err(DexError::InvalidVocabulary(format!(
                    "duplicate range '{}'",
                    bucket.value
                )));
            }
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.key.as_str()) {
                return Err(DexError::InvalidVocabulary(format!(
                    "duplicate group '{}'",
                    group.key
                )));
            }
        }
        Ok(())
    }

    /// レンジ区分を取得（未知の識別子は None）
    pub fn range(&self, value: &str) -> Option<&RangeBucket> {
        self.ranges.iter().find(|r| r.value == value)
    }

    /// グループを取得（未知のキーは None）
    pub fn group(&self, key: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == key)
    }

    pub fn is_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// 組み込みの図鑑語彙
    pub fn pokedex() -> Self {
        let categories = [
            "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
            "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let ranges = [
            ("1", "Gen I (1-151)", 1, 151),
            ("2", "Gen II (152-251)", 152, 251),
            ("3", "Gen III (252-386)", 252, 386),
            ("4", "Gen IV (387-493)", 387, 493),
            ("5", "Gen V (494-649)", 494, 649),
            ("6", "Gen VI (650-721)", 650, 721),
            ("7", "Gen VII (722-809)", 722, 809),
            ("8", "Gen VIII (810-905)", 810, 905),
            ("9", "Gen IX (906-1025)", 906, 1025),
        ]
        .iter()
        .map(|&(value, label, min, max)| RangeBucket {
            value: value.to_string(),
            label: label.to_string(),
            min,
            max,
        })
        .collect();

        let groups = POKEDEX_GROUPS
            .iter()
            .map(|&(key, label, ids)| Group {
                key: key.to_string(),
                label: label.to_string(),
                ids: ids.to_vec(),
            })
            .collect();

        Self {
            categories,
            ranges,
            groups,
        }
    }
}

const POKEDEX_GROUPS: &[(&str, &str, &[u32])] = &[
    (
        "starters",
        "Starters",
        &[
            1, 2, 3, 4, 5, 6, 7, 8, 9, 152, 153, 154, 155, 156, 157, 158, 159, 160, 252, 253, 254,
            255, 256, 257, 258, 259, 260, 387, 388, 389, 390, 391, 392, 393, 394, 395, 495, 496,
            497, 498, 499, 500, 501, 502, 503, 650, 651, 652, 653, 654, 655, 656, 657, 658, 722,
            723, 724, 725, 726, 727, 728, 729, 730, 810, 811, 812, 813, 814, 815, 816, 817, 818,
            906, 907, 908, 909, 910, 911, 912, 913, 914,
        ],
    ),
    (
        "babies",
        "Babies",
        &[
            172, 173, 174, 175, 236, 238, 239, 240, 298, 360, 406, 433, 438, 439, 440, 446, 447,
            458,
        ],
    ),
    (
        "fossils",
        "Fossils",
        &[
            138, 139, 140, 141, 142, 345, 346, 347, 348, 408, 409, 410, 411, 564, 565, 566, 567,
            696, 697, 698, 699, 880, 881, 882, 883,
        ],
    ),
    (
        "paradox",
        "Paradox",
        &[
            984, 985, 986, 987, 988, 989, 990, 991, 992, 993, 994, 995, 1005, 1006, 1007, 1008,
            1009, 1010,
        ],
    ),
    (
        "ultra-beasts",
        "Ultra Beasts",
        &[793, 794, 795, 796, 797, 798, 799, 803, 804, 805, 806],
    ),
    (
        "pseudo-legendary",
        "Pseudo-Legendary",
        &[
            147, 148, 149, 246, 247, 248, 371, 372, 373, 443, 444, 445, 610, 611, 612, 633, 634,
            635, 704, 705, 706, 782, 783, 784, 885, 886, 887, 996, 997, 998,
        ],
    ),
    (
        "legendaries",
        "Legendaries",
        &[
            144, 145, 146, 150, 151, 243, 244, 245, 249, 250, 251, 377, 378, 379, 380, 381, 382,
            383, 384, 385, 386, 480, 481, 482, 483, 484, 485, 486, 487, 488, 489, 490, 491, 492,
            493, 494, 638, 639, 640, 641, 642, 643, 644, 645, 646, 647, 648, 649, 716, 717, 718,
            719, 720, 721, 772, 773, 785, 786, 787, 788, 789, 790, 791, 792, 800, 801, 802, 807,
            808, 809, 888, 889, 890, 891, 892, 893, 894, 895, 896, 897, 898, 905, 1001, 1002,
            1003, 1004, 1014, 1015, 1016, 1017, 1024, 1025,
        ],
    ),
];
