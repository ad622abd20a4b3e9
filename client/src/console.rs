//! Terminal host: renders the remote's surface on stdout and turns typed
//! commands into controller calls.

use crate::controller::RemoteController;
use crate::log_view::{LogEntry, Severity};
use crate::slots::{SlotKind, SLOT_COUNT};
use crate::utils::prompt;
use crate::view::{MemorySurface, Role, Surface, UiEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

const HELP: &str = "\
Commands (slots are numbered 1-4):
  send N                      fire send slot N through the relay
  copy N                      copy the webhook URL of receive slot N
  endpoint send N URL         set the target URL of send slot N
  endpoint receive N PATH     set the path of receive slot N (empty resets it)
  edit send|receive N         open the payload editor
  method M                    choose the method while editing a send slot
  payload JSON                replace the editor contents
  save | cancel               commit or discard the editor
  click ID | esc              click a page element (e.g. payload-modal) or press Escape
  urls                        list the receive URLs
  help | quit";

/// [`MemorySurface`] that also prints what a page would show.
#[derive(Debug)]
pub struct ConsoleSurface {
    inner: MemorySurface,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self {
            inner: MemorySurface::with_slots(SLOT_COUNT),
        }
    }

    fn print_editor(&self) {
        println!("\n== {} ==", self.inner.text(Role::ModalTitle).unwrap_or_default());
        if self.inner.is_visible(Role::ModalControls) {
            println!(
                "method: {}",
                self.inner.value(Role::MethodSelect).unwrap_or_default()
            );
        }
        println!(
            "payload: {}",
            self.inner.value(Role::PayloadEditor).unwrap_or_default()
        );
        println!("(payload JSON / method M / save / cancel)");
    }
}

impl Default for ConsoleSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for ConsoleSurface {
    fn value(&self, role: Role) -> Option<String> {
        self.inner.value(role)
    }

    fn set_value(&self, role: Role, value: &str) {
        self.inner.set_value(role, value);
    }

    fn text(&self, role: Role) -> Option<String> {
        self.inner.text(role)
    }

    fn set_text(&self, role: Role, text: &str) {
        self.inner.set_text(role, text);
    }

    fn set_visible(&self, role: Role, visible: bool) {
        let was_visible = self.inner.is_visible(role);
        self.inner.set_visible(role, visible);
        if role != Role::Modal || was_visible == visible {
            return;
        }
        if visible {
            self.print_editor();
        } else {
            println!("(editor closed)");
        }
    }

    fn focus(&self, role: Role) {
        self.inner.focus(role);
    }

    fn append_log(&self, entry: &LogEntry) {
        self.inner.append_log(entry);
        match entry.severity.and_then(Severity::ansi) {
            Some(color) => println!("{}{}\x1b[0m", color, entry.text),
            None => println!("{}", entry.text),
        }
    }

    fn remove_oldest_log(&self) {
        self.inner.remove_oldest_log();
    }

    fn scroll_log_to_end(&self) {
        self.inner.scroll_log_to_end();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(usize),
    Copy(usize),
    Endpoint {
        kind: SlotKind,
        index: usize,
        value: String,
    },
    Edit {
        kind: SlotKind,
        index: usize,
    },
    Method(String),
    Payload(String),
    Save,
    Cancel,
    Click(Role),
    Escape,
    Urls,
    Help,
    Quit,
}

/// Turns a 1-based slot number into an index.
fn slot_index(raw: Option<&str>) -> Result<usize, String> {
    let raw = raw.ok_or_else(|| "missing slot number".to_string())?;
    match raw.parse::<usize>() {
        Ok(n) if (1..=SLOT_COUNT).contains(&n) => Ok(n - 1),
        _ => Err(format!("slot must be 1-{}, got '{}'", SLOT_COUNT, raw)),
    }
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let mut args = rest.split_whitespace();

    let command = match word.to_ascii_lowercase().as_str() {
        "send" => Command::Send(slot_index(args.next())?),
        "copy" => Command::Copy(slot_index(args.next())?),
        "endpoint" => {
            let kind = args
                .next()
                .ok_or_else(|| "missing slot kind".to_string())?
                .parse::<SlotKind>()?;
            let index = slot_index(args.next())?;
            let value = args.collect::<Vec<_>>().join(" ");
            Command::Endpoint { kind, index, value }
        }
        "edit" => {
            let kind = args
                .next()
                .ok_or_else(|| "missing slot kind".to_string())?
                .parse::<SlotKind>()?;
            Command::Edit {
                kind,
                index: slot_index(args.next())?,
            }
        }
        "method" => Command::Method(
            args.next()
                .ok_or_else(|| "missing method".to_string())?
                .to_string(),
        ),
        "payload" => Command::Payload(rest.to_string()),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "click" => {
            let id = args.next().ok_or_else(|| "missing element id".to_string())?;
            Command::Click(
                Role::from_element_id(id).ok_or_else(|| format!("unknown element '{}'", id))?,
            )
        }
        "click-backdrop" => Command::Click(Role::Modal),
        "esc" | "escape" => Command::Escape,
        "urls" => Command::Urls,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(command))
}

/// Applies one command. Returns `false` when the console should exit.
pub fn apply(controller: &Arc<RemoteController>, surface: &ConsoleSurface, command: Command) -> bool {
    match command {
        Command::Send(index) => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move { controller.send_request(index).await });
        }
        Command::Copy(index) => {
            let controller = Arc::clone(controller);
            tokio::spawn(async move { controller.copy_url(index).await });
        }
        Command::Endpoint { kind, index, value } => {
            let role = match kind {
                SlotKind::Send => Role::SendEndpoint(index),
                SlotKind::Receive => Role::ReceiveEndpoint(index),
            };
            surface.set_value(role, &value);
            controller.dispatch(&UiEvent::Input(role));
        }
        Command::Edit { kind, index } => controller.open_payload_modal(index, kind),
        Command::Method(method) => {
            if controller.edit_session().map(|s| s.kind) == Some(SlotKind::Send) {
                surface.set_value(Role::MethodSelect, &method.to_ascii_uppercase());
            } else {
                println!("method can only be chosen while editing a send slot");
            }
        }
        Command::Payload(json) => {
            if controller.edit_session().is_some() {
                surface.set_value(Role::PayloadEditor, &json);
            } else {
                println!("no editor is open (try 'edit send N')");
            }
        }
        Command::Save => controller.save_payload(),
        Command::Cancel => controller.close_payload_modal(),
        Command::Click(role) => controller.dispatch(&UiEvent::Click(role)),
        Command::Escape => controller.dispatch(&UiEvent::KeyDown("Escape".to_string())),
        Command::Urls => {
            for i in 0..SLOT_COUNT {
                println!("  receive {}: {}", i + 1, surface.text(Role::FullUrl(i)).unwrap_or_default());
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

/// Reads commands from stdin until `quit`, end of input, or Ctrl-C.
pub async fn run(controller: Arc<RemoteController>, surface: Arc<ConsoleSurface>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Type 'help' for commands.");

    loop {
        if let Err(e) = prompt(">") {
            error!("Failed to write prompt: {:?}", e);
        }
        tokio::select! {
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Ok(Some(command)) => {
                            if !apply(&controller, &surface, command) {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(message) => println!("{}", message),
                    },
                    Ok(None) => {
                        info!("stdin closed");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read command: {:?}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_numbers_are_one_based() {
        assert_eq!(parse_command("send 1"), Ok(Some(Command::Send(0))));
        assert_eq!(parse_command("copy 4"), Ok(Some(Command::Copy(3))));
        assert!(parse_command("send 0").is_err());
        assert!(parse_command("send 5").is_err());
        assert!(parse_command("send").is_err());
    }

    #[test]
    fn endpoint_value_may_be_empty() {
        assert_eq!(
            parse_command("endpoint receive 2"),
            Ok(Some(Command::Endpoint {
                kind: SlotKind::Receive,
                index: 1,
                value: String::new(),
            }))
        );
        assert_eq!(
            parse_command("endpoint send 1 https://httpbin.org/post"),
            Ok(Some(Command::Endpoint {
                kind: SlotKind::Send,
                index: 0,
                value: "https://httpbin.org/post".to_string(),
            }))
        );
    }

    #[test]
    fn payload_keeps_the_raw_json_text() {
        assert_eq!(
            parse_command(r#"payload {"a": 1, "b": "x y"}"#),
            Ok(Some(Command::Payload(r#"{"a": 1, "b": "x y"}"#.to_string())))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Ok(None));
        assert!(parse_command("launch").is_err());
        assert_eq!(parse_command("ESC"), Ok(Some(Command::Escape)));
        assert_eq!(
            parse_command("click payload-modal"),
            Ok(Some(Command::Click(Role::Modal)))
        );
        assert!(parse_command("click sidebar").is_err());
        assert_eq!(
            parse_command("edit receive 3"),
            Ok(Some(Command::Edit {
                kind: SlotKind::Receive,
                index: 2,
            }))
        );
    }
}
