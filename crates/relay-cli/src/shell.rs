//! Interactive wizard shell.
//!
//! Reads one command per line and keeps a single session alive for the
//! whole run. Errors are reported inline and the loop carries on.

use std::io::{BufRead, Lines, Write};

use anyhow::Result;
use log::debug;
use relay_core::{
    params::{GetField, JumpTo, SetArticle, SetField, SetPacket, StepRef},
    display::fence_for,
    OperationStatus, StepList, WizardSession,
};

use crate::renderer::TerminalRenderer;

const HELP: &str = "\
# Commands

- `steps`: list the steps
- `show [step]`: show a step's inputs
- `next` / `prev`: move one step
- `goto <n|id>`: jump to a step
- `set <field|step.field> [value]`: store a value; without a value, read lines until a lone `.`
- `get <field|step.field>`: print a stored value
- `packet [-|text]`: print the packet, or replace it (`-` reads lines until a lone `.`)
- `article <id> [title]`: set the article card
- `prompt`: render the current step's prompt
- `status [json]`: show the session state
- `reset`: clear everything and go back to step 1
- `quit`: leave the shell
";

const BLOCK_HINT: &str = "Enter the text; finish with a line containing only '.'\n";

/// One parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Empty,
    Steps,
    Show(Option<&'a str>),
    Next,
    Prev,
    Goto(&'a str),
    Set {
        name: &'a str,
        value: Option<&'a str>,
    },
    Get(&'a str),
    Packet(Option<&'a str>),
    Article {
        id: &'a str,
        title: Option<&'a str>,
    },
    Prompt,
    Status {
        json: bool,
    },
    Reset,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = split_word(line);

        let command = match word {
            "" => Self::Empty,
            "steps" | "ls" => Self::Steps,
            "show" => Self::Show(non_empty(rest)),
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "goto" | "g" => Self::Goto(required(rest, "goto <n|id>")?),
            "set" => {
                let (name, value) = split_word(required(rest, "set <field> [value]")?);
                Self::Set {
                    name,
                    value: non_empty(value),
                }
            }
            "get" => Self::Get(required(rest, "get <field>")?),
            "packet" => Self::Packet(non_empty(rest)),
            "article" => {
                let (id, title) = split_word(required(rest, "article <id> [title]")?);
                Self::Article {
                    id,
                    title: non_empty(title),
                }
            }
            "prompt" => Self::Prompt,
            "status" => match rest {
                "" => Self::Status { json: false },
                "json" => Self::Status { json: true },
                other => return Err(format!("Unknown status format '{other}'")),
            },
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(format!(
                    "Unknown command '{other}'. Type 'help' for commands."
                ))
            }
        };
        Ok(command)
    }
}

fn split_word(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

fn required<'a>(text: &'a str, usage: &str) -> std::result::Result<&'a str, String> {
    non_empty(text).ok_or_else(|| format!("Usage: {usage}"))
}

/// `field` targets the current step, `step.field` any step.
fn split_field_name(name: &str) -> (Option<String>, String) {
    match name.split_once('.') {
        Some((step, field)) => (Some(step.to_string()), field.to_string()),
        None => (None, name.to_string()),
    }
}

/// Interactive session over a line-based reader and writer.
pub struct Shell<'a> {
    session: WizardSession,
    renderer: &'a TerminalRenderer,
}

impl<'a> Shell<'a> {
    pub fn new(session: WizardSession, renderer: &'a TerminalRenderer) -> Self {
        Self { session, renderer }
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let mut lines = input.lines();
        let intro = format!(
            "# {}\n\nType 'help' for commands.\n",
            self.session.workflow().title()
        );
        self.renderer.render_to(out, &intro)?;

        loop {
            write!(
                out,
                "relay [{}/{}]> ",
                self.session.current_index() + 1,
                self.session.registry().len()
            )?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(message) => {
                    self.renderer
                        .render_to(out, &OperationStatus::failure(message).to_string())?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            debug!("shell: {command:?}");
            if let Err(e) = self.execute(command, &mut lines, out) {
                let status = OperationStatus::failure(format!("{e:#}"));
                self.renderer.render_to(out, &status.to_string())?;
            }
        }
        Ok(())
    }

    fn execute<R: BufRead, W: Write>(
        &mut self,
        command: Command<'_>,
        lines: &mut Lines<R>,
        out: &mut W,
    ) -> Result<()> {
        let output = match command {
            Command::Empty | Command::Quit => return Ok(()),
            Command::Help => HELP.to_string(),
            Command::Steps => StepList::new(self.session.registry().steps_in_order())
                .with_current(Some(self.session.current_index()))
                .to_string(),
            Command::Show(step) => self.session.target_step(step)?.to_string(),
            Command::Next => {
                let moved = self.session.advance();
                self.session.navigation_result(moved).to_string()
            }
            Command::Prev => {
                let moved = self.session.retreat();
                self.session.navigation_result(moved).to_string()
            }
            Command::Goto(target) => {
                let moved = self.session.jump(&JumpTo {
                    step: target.to_string(),
                })?;
                self.session.navigation_result(moved).to_string()
            }
            Command::Set { name, value } => {
                let value = match value {
                    Some(value) => value.to_string(),
                    None => {
                        self.renderer.render_to(out, BLOCK_HINT)?;
                        read_block(lines)?
                    }
                };
                let (step, field) = split_field_name(name);
                let params = SetField { step, field, value };
                self.session.update_field(&params)?;
                let step = self.session.target_step(params.step.as_deref())?;
                OperationStatus::field_stored(&step.id, params.field.trim(), &params.value)
                    .to_string()
            }
            Command::Get(name) => {
                let (step, field) = split_field_name(name);
                let value = self.session.read_field(&GetField { step, field })?;
                format!("{value}\n")
            }
            Command::Packet(None) => match self.session.packet() {
                Some(packet) => {
                    let fence = fence_for(packet.content());
                    format!("{fence}text\n{}\n{fence}\n", packet.content().trim_end())
                }
                None => "This workflow has no packet.\n".to_string(),
            },
            Command::Packet(Some(text)) => {
                let text = if text == "-" {
                    self.renderer.render_to(out, BLOCK_HINT)?;
                    read_block(lines)?
                } else {
                    text.to_string()
                };
                let status = OperationStatus::packet_replaced(&text);
                self.session.update_packet(&SetPacket { text })?;
                status.to_string()
            }
            Command::Article { id, title } => {
                self.session.update_article(&SetArticle {
                    article_id: Some(id.to_string()),
                    title: title.map(str::to_string),
                })?;
                format!("Article card: {}\n", self.session.article())
            }
            Command::Prompt => {
                let mut output = String::new();
                if self.session.is_blank(&self.session.current_step().id)? {
                    output.push_str("_This step's fields are empty; placeholders are shown._\n\n");
                }
                let view = self.session.prompt_view(&StepRef::default())?;
                output.push_str(&view.to_string());
                output
            }
            Command::Status { json: true } => {
                let mut json = self.session.snapshot().to_json()?;
                json.push('\n');
                writeln!(out, "```json")?;
                write!(out, "{json}")?;
                writeln!(out, "```")?;
                return Ok(());
            }
            Command::Status { json: false } => self.session.snapshot().to_string(),
            Command::Reset => {
                self.session.reset_all();
                OperationStatus::session_reset(self.session.current_step()).to_string()
            }
        };
        self.renderer.render_to(out, &output)?;
        Ok(())
    }
}

/// Collects lines up to a lone `.` or end of input.
fn read_block<R: BufRead>(lines: &mut Lines<R>) -> Result<String> {
    let mut block = Vec::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim_end() == "." {
            break;
        }
        block.push(line);
    }
    Ok(block.join("\n"))
}
