//! Wrappers for rendered prompts, navigation outcomes and confirmations.

use std::fmt;

use crate::models::Step;

/// A rendered prompt with a heading naming its step.
///
/// The prompt goes inside a `text` fence so markdown renderers leave it
/// untouched for copying. The fence is longer than any backtick run in the
/// prompt, so a prompt that itself contains fenced blocks (a packet pasted
/// back from a chat, say) never closes it early.
pub struct PromptView<'a> {
    pub step: &'a Step,
    pub total: usize,
    pub prompt: String,
}

impl<'a> PromptView<'a> {
    pub fn new(step: &'a Step, total: usize, prompt: String) -> Self {
        Self {
            step,
            total,
            prompt,
        }
    }
}

impl fmt::Display for PromptView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Step {}/{}: {}",
            self.step.number(),
            self.total,
            self.step.label
        )?;
        writeln!(f)?;
        let fence = fence_for(&self.prompt);
        writeln!(f, "{fence}text")?;
        writeln!(f, "{}", self.prompt.trim_end())?;
        writeln!(f, "{fence}")
    }
}

/// One-line confirmation or failure, shared by the shell, the CLI and the
/// MCP tools so every surface reports an operation the same way.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// A field write, named by its qualified `step.field`.
    pub fn field_stored(step: &str, field: &str, value: &str) -> Self {
        Self::success(format!("Stored {step}.{field} ({})", characters(value)))
    }

    /// A wholesale packet replacement.
    pub fn packet_replaced(text: &str) -> Self {
        Self::success(format!("Packet replaced ({})", characters(text)))
    }

    /// A session reset, naming the step it returned to.
    pub fn session_reset(first: &Step) -> Self {
        Self::success(format!(
            "Session reset to step {}: {}",
            first.number(),
            first.label
        ))
    }
}

fn characters(text: &str) -> String {
    match text.chars().count() {
        0 => "cleared".to_string(),
        1 => "1 character".to_string(),
        n => format!("{n} characters"),
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success:" } else { "Error:" };
        writeln!(f, "{label} {}", self.message)
    }
}

/// Backtick fence one longer than the longest run in `text`, at least three.
pub fn fence_for(text: &str) -> String {
    let longest = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or_default();
    "`".repeat(longest.max(2) + 1)
}

/// Outcome of `next`, `prev` or `goto`.
pub struct NavigationResult<'a> {
    pub moved: bool,
    pub step: &'a Step,
    pub total: usize,
}

impl fmt::Display for NavigationResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.moved { "Moved to" } else { "Still on" };
        writeln!(
            f,
            "{verb} step {}/{}: {} (`{}`)",
            self.step.number(),
            self.total,
            self.step.label,
            self.step.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> Step {
        Step {
            index: 2,
            id: "keyword_candidates".to_string(),
            label: "Keywords".to_string(),
            description: None,
            template: "keyword_candidates".to_string(),
            fields: vec![],
        }
    }

    #[test]
    fn test_prompt_view() {
        let step = step();
        let view = PromptView::new(&step, 8, "List keywords.\n\n".to_string());
        assert_eq!(
            view.to_string(),
            "## Step 3/8: Keywords\n\n```text\nList keywords.\n```\n"
        );
    }

    #[test]
    fn test_prompt_view_fence_outgrows_inner_fences() {
        let step = step();
        let prompt = "Packet:\n```text\n- **決策**：A07\n```\n".to_string();
        let view = PromptView::new(&step, 8, prompt);
        assert_eq!(
            view.to_string(),
            "## Step 3/8: Keywords\n\n````text\nPacket:\n```text\n- **決策**：A07\n```\n````\n"
        );
    }

    #[test]
    fn test_fence_for() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("`code` here"), "```");
        assert_eq!(fence_for("````md\nx\n````"), "`````");
    }

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Workflow written");
        assert_eq!(success.to_string(), "Success: Workflow written\n");

        let failure = OperationStatus::failure(String::from("No packet"));
        assert_eq!(failure.to_string(), "Error: No packet\n");
    }

    #[test]
    fn test_operation_status_for_session_changes() {
        assert_eq!(
            OperationStatus::field_stored("outline", "title", "發票 101").to_string(),
            "Success: Stored outline.title (6 characters)\n"
        );
        assert_eq!(
            OperationStatus::field_stored("outline", "title", "").message,
            "Stored outline.title (cleared)"
        );
        assert_eq!(
            OperationStatus::packet_replaced("x").message,
            "Packet replaced (1 character)"
        );

        let mut first = step();
        first.index = 0;
        assert_eq!(
            OperationStatus::session_reset(&first).to_string(),
            "Success: Session reset to step 1: Keywords\n"
        );
    }

    #[test]
    fn test_navigation_result() {
        let step = step();
        let moved = NavigationResult {
            moved: true,
            step: &step,
            total: 8,
        };
        assert_eq!(
            moved.to_string(),
            "Moved to step 3/8: Keywords (`keyword_candidates`)\n"
        );

        let stayed = NavigationResult {
            moved: false,
            step: &step,
            total: 8,
        };
        assert!(stayed.to_string().starts_with("Still on step 3/8"));
    }
}
