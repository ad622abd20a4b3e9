use crate::error::ClipboardError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine};
use std::io::{IsTerminal, Write};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Access to the system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Primary, asynchronous write.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Legacy path tried once the primary write is unavailable or rejected.
    fn fallback_copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard driven by the platform's copy program, falling back to an
/// OSC 52 escape sequence that asks the terminal to set the selection.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    /// `override_command` is a whitespace separated program line, e.g. `xsel -ib`.
    pub fn new(override_command: Option<&str>) -> Self {
        let command = match override_command {
            Some(line) => {
                let parts: Vec<String> = line.split_whitespace().map(str::to_string).collect();
                (!parts.is_empty()).then_some(parts)
            }
            None => detect_command(),
        };
        Self { command }
    }
}

fn detect_command() -> Option<Vec<String>> {
    let parts: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else if std::env::var_os("DISPLAY").is_some() {
        &["xclip", "-selection", "clipboard"]
    } else {
        return None;
    };
    Some(parts.iter().map(|p| p.to_string()).collect())
}

pub(crate) fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", general_purpose::STANDARD.encode(text))
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let Some((program, args)) = self.command.as_ref().and_then(|c| c.split_first()) else {
            return Err(ClipboardError::Unavailable(
                "no clipboard program found".to_string(),
            ));
        };
        debug!("Copying {} bytes with {}", text.len(), program);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Command {
                command: program.clone(),
                reason: status.to_string(),
            })
        }
    }

    fn fallback_copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }
        stdout.write_all(osc52_sequence(text).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
