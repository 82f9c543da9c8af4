//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termimad::{crossterm::style::Color, MadSkin};

const RESET: &str = "\x1b[0m";

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_fg(Color::Green);
        skin.inline_code.set_bg(Color::Reset);

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        if self.rich_enabled {
            for line in markdown.lines() {
                match header_color(line) {
                    // Headers keep their hash marks so the structure stays visible
                    Some(color) => writeln!(out, "{color}{line}{RESET}"),
                    None => writeln!(out, "{}", self.skin.inline(line)),
                }
                .context("Failed to write to terminal")?;
            }
        } else {
            write!(out, "{markdown}").context("Failed to write to terminal")?;
        }
        out.flush().context("Failed to flush terminal")
    }
}

/// ANSI color for a markdown header line, by level.
fn header_color(line: &str) -> Option<&'static str> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || !line[level..].starts_with(' ') {
        return None;
    }
    Some(match level {
        1 => "\x1b[1;34m",
        2 => "\x1b[34m",
        _ => "\x1b[36m",
    })
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_header_levels() {
        assert_eq!(header_color("# Guitar learning plan"), Some("\x1b[1;34m"));
        assert_eq!(header_color("## Progress"), Some("\x1b[34m"));
        assert_eq!(header_color("#### Videos"), Some("\x1b[36m"));
        assert_eq!(header_color("#hashtag"), None);
        assert_eq!(header_color("- [x] Week 1"), None);
    }
}
