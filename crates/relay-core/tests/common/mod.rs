use std::path::PathBuf;

use relay_core::{SessionBuilder, WizardSession};
use tempfile::TempDir;

/// Workflow with a packet, an article card and a cross-step reference.
pub const LAUNCH_WORKFLOW: &str = r#"
name = "launch"
title = "Launch notes"

[packet]
fallback = "no packet yet"
template = """
=== [LOG] ===
=== [/LOG] ==="""

[templates]
brief = "Summarize for {{ article_id }}:\n{{ notes }}\n\nPacket:\n{{ packet }}"
announce = "Announce '{{ article_title }}' ({{ tone }}) using: {{ brief.notes }}"

[[steps]]
id = "brief"
label = "Brief"

[[steps.fields]]
name = "notes"
label = "Release notes"
fallback = "paste notes"
multiline = true

[[steps.fields]]
name = "article_id"
label = "Article id"
bind = "article_id"

[[steps]]
id = "announce"
label = "Announcement"

[[steps.fields]]
name = "title"
label = "Title"
bind = "article_title"

[[steps.fields]]
name = "tone"
label = "Tone"
default = "friendly"
"#;

/// Writes `source` to a workflow file inside a fresh temp dir.
pub fn write_workflow(source: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("workflow.toml");
    std::fs::write(&path, source).expect("Failed to write workflow");
    (temp_dir, path)
}

/// Helper function to create a session on the launch workflow
pub fn create_test_session() -> (TempDir, WizardSession) {
    let (temp_dir, path) = write_workflow(LAUNCH_WORKFLOW);
    let session = SessionBuilder::new()
        .with_workflow_path(Some(&path))
        .build()
        .expect("Failed to create session");
    (temp_dir, session)
}
