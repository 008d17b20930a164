//! 名前ソート用の照合順序
//!
//! ブラウザの `localeCompare` に近い順序を返す。まず大文字小文字と
//! ラテン文字のダイアクリティカルマークを無視して比較し、同値なら元の文字列で比較する。

use std::cmp::Ordering;

/// ダイアクリティカルマーク付きラテン文字を基底文字へ
fn base_char(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

fn primary_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase).map(base_char)
}

/// 名前の比較
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_alphabetical() {
        assert_eq!(compare_names("bulbasaur", "charmander"), Ordering::Less);
        assert_eq!(compare_names("squirtle", "charmander"), Ordering::Greater);
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(compare_names("Abra", "aerodactyl"), Ordering::Less);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(compare_names("flabébé", "flabebf"), Ordering::Less);
        assert_eq!(compare_names("flabébé", "flaaffy"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(compare_names("a", "A"), Ordering::Less);
        assert_eq!(compare_names("abc", "abc"), Ordering::Equal);
    }
}
