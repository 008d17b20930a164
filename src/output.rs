//! コンソール出力の整形

use owo_colors::OwoColorize;

pub fn success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

pub fn failure(message: &str) -> String {
    format!("{} {}", "✗".red(), message)
}

pub fn warning(message: &str) -> String {
    format!("{} {}", "!".yellow(), message)
}

pub fn skipped(message: &str) -> String {
    format!("{} {}", "-".dimmed(), message.dimmed())
}

pub fn info(message: &str) -> String {
    format!("{} {}", "•".cyan(), message)
}

/// クロール実行後のサマリ行
pub struct CommandSummary {
    pub prefix: String,
    pub message: String,
}

impl CommandSummary {
    pub fn format(saved: usize, existing: usize, missing: usize) -> Self {
        match (saved, missing) {
            (_, m) if m > 0 => Self {
                prefix: "✗".red().to_string(),
                message: format!(
                    "{} saved, {} already existed, {} missing",
                    saved.green(),
                    existing,
                    m.red()
                ),
            },
            (s, _) if s > 0 => Self {
                prefix: "✓".green().to_string(),
                message: format!("{} saved, {} already existed", s.green(), existing),
            },
            _ => Self {
                prefix: "•".yellow().to_string(),
                message: format!("Nothing new to fetch ({existing} already existed)"),
            },
        }
    }
}

impl std::fmt::Display for CommandSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.prefix, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_missing_is_failure() {
        let summary = CommandSummary::format(3, 1, 2);
        assert!(summary.prefix.contains('✗'));
        assert!(summary.message.contains("missing"));
    }

    #[test]
    fn test_summary_all_saved() {
        let summary = CommandSummary::format(5, 0, 0);
        assert!(summary.prefix.contains('✓'));
        assert!(summary.message.contains("already existed"));
    }

    #[test]
    fn test_summary_nothing_to_do() {
        let summary = CommandSummary::format(0, 151, 0);
        assert!(summary.prefix.contains('•'));
        assert!(summary.message.contains("151 already existed"));
    }

    #[test]
    fn test_status_lines_keep_message() {
        assert!(success("Saved #1").ends_with("Saved #1"));
        assert!(failure("boom").ends_with("boom"));
        assert!(warning("careful").ends_with("careful"));
        assert!(info("note").ends_with("note"));
    }
}
