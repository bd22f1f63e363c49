use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

/// Help content for the TUI overlay and `--help`
pub struct HelpText;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(text).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

impl HelpText {
    /// Key reference shown by F1 / ?
    pub fn keys() -> Vec<Line<'static>> {
        vec![
            Line::from("QPL Viewer Help").style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            heading("PAGES"),
            Line::from("  n / → / PgDn   - Next page (3n skips three)"),
            Line::from("  p / ← / PgUp   - Previous page"),
            Line::from("  g / Home       - First page"),
            Line::from("  G / End        - Last page"),
            Line::from("  + / -          - Larger / smaller page size"),
            Line::from(""),
            heading("SEARCH"),
            Line::from("  /              - Edit search"),
            Line::from("  Enter          - Apply search (empty shows all)"),
            Line::from("  Esc            - Cancel editing / clear search"),
            Line::from(""),
            heading("OTHER"),
            Line::from("  F1 / ?         - Toggle this help"),
            Line::from("  F5             - Toggle debug log"),
            Line::from("  q / Ctrl+C     - Quit"),
        ]
    }

    /// Usage printed by `qpl-viewer --help`
    pub fn usage() -> &'static str {
        "QPL Viewer - browse the qualified parts list

Usage: qpl-viewer [OPTIONS]

Options:
  --url <URL>          Server base URL (overrides config and QPL_API_URL)
  --config <PATH>      Load configuration from PATH
  --generate-config    Write a commented default config file and exit
  --classic            Print one page to stdout instead of starting the TUI
  --search <QUERY>     Initial search
  --page <N>           Initial page
  --page-size <N>      Initial page size
  -h, --help           Show this help"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_lists_every_flag() {
        let usage = HelpText::usage();
        for flag in [
            "--url",
            "--config",
            "--generate-config",
            "--classic",
            "--search",
            "--page ",
            "--page-size",
        ] {
            assert!(usage.contains(flag), "missing {}", flag);
        }
    }
}
