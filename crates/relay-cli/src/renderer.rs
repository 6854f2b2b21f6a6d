//! Terminal rendering for markdown output
//!
//! Uses termimad for inline styling with a plain-text fallback. The content
//! of fenced code blocks is written verbatim so rendered prompts keep their
//! markdown markers for copying. A fence closes only on a bare backtick line
//! at least as long as the one that opened it, so shorter fences inside a
//! prompt are content.

use std::io::{self, Write};

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        self.render_to(&mut stdout, markdown)?;
        stdout.flush()?;
        Ok(())
    }

    /// Render markdown text to any writer
    pub fn render_to<W: Write>(&self, out: &mut W, markdown: &str) -> io::Result<()> {
        if !self.rich_enabled {
            return write!(out, "{markdown}");
        }

        let mut fence: Option<usize> = None;
        for line in markdown.lines() {
            let ticks = line.chars().take_while(|&c| c == '`').count();
            match fence {
                Some(open) if ticks >= open && line[ticks..].trim().is_empty() => {
                    fence = None;
                }
                Some(_) => writeln!(out, "{line}")?,
                None if ticks >= 3 => fence = Some(ticks),
                None if line.starts_with('#') => {
                    writeln!(out, "\x1b[34m{line}\x1b[0m")?;
                }
                None => writeln!(out, "{}", self.skin.inline(line))?,
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{params::StepRef, SessionBuilder};

    fn rendered(renderer: &TerminalRenderer, markdown: &str) -> String {
        let mut out = Vec::new();
        renderer.render_to(&mut out, markdown).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_renderer_passes_text_through() {
        let renderer = TerminalRenderer::new(false);
        let markdown = "## Step 1/8\n\n```text\n**嚴格** keep\n```\n";
        assert_eq!(rendered(&renderer, markdown), markdown);
    }

    #[test]
    fn test_rich_renderer_keeps_fenced_text_verbatim() {
        let renderer = TerminalRenderer::new(true);
        let output = rendered(&renderer, "## Step\n```text\n**嚴格** keep\n```\n");
        assert!(output.contains("\x1b[34m## Step\x1b[0m"));
        assert!(output.contains("**嚴格** keep\n"));
        assert!(!output.contains("```"));
    }

    #[test]
    fn test_rich_renderer_treats_shorter_fences_as_content() {
        let renderer = TerminalRenderer::new(true);
        let markdown = "````text\n```text\n- **決策**：A07\n```\n````\nafter **bold**\n";
        let output = rendered(&renderer, markdown);
        assert!(output.starts_with("```text\n- **決策**：A07\n```\n"), "{output}");
        assert!(!output.contains("````"));
        assert!(!output.contains("after **bold**"));
    }

    #[test]
    fn test_rich_renderer_keeps_fenced_packet_in_prompt() {
        let mut session = SessionBuilder::new()
            .with_builtin(Some("seo-packet"))
            .build()
            .unwrap();
        session
            .set_packet(
                "```text\n=== [PROJECT LOG] ===\n- **決策**：A07\n=== [/PROJECT LOG] ===\n```",
            )
            .unwrap();
        let view = session
            .prompt_view(&StepRef {
                step: Some("topic_ideation".to_string()),
            })
            .unwrap();

        let output = rendered(&TerminalRenderer::new(true), &view.to_string());
        for line in view.prompt.trim_end().lines() {
            assert!(output.lines().any(|l| l == line), "missing line: {line}");
        }
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
