//! CLI channel — stdin/stdout REPL.

use std::io::Write;

use async_trait::async_trait;
use futures::stream;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::channels::{Channel, IncomingMessage, MessageStream, OutgoingResponse, StatusUpdate};
use crate::error::ChannelError;

/// Reads lines from stdin and prints responses to stdout. Quick-reply
/// options are printed as a numbered list.
pub struct CliChannel;

impl CliChannel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a response the way the REPL prints it.
pub fn render(response: &OutgoingResponse) -> String {
    let mut out = response.content.clone();
    for (i, option) in response.options.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, option));
    }
    out
}

/// Write one rendered response followed by a blank line.
fn write_response<W: Write>(out: &mut W, response: &OutgoingResponse) -> Result<(), ChannelError> {
    writeln!(out, "\n{}\n", render(response))
        .and_then(|()| out.flush())
        .map_err(|e| ChannelError::SendFailed {
            name: "cli".to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(&self) -> Result<MessageStream, ChannelError> {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        // Blank lines are forwarded: the flow reports them as empty answers.
                        let msg = IncomingMessage::new("cli", "local-user", line);
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF
                    Err(e) => {
                        tracing::error!("Error reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        let stream = stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|msg| (msg, rx))
        });

        Ok(Box::pin(stream))
    }

    async fn respond(
        &self,
        _msg: Option<&IncomingMessage>,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError> {
        write_response(&mut std::io::stdout().lock(), &response)?;
        eprint!("> ");
        Ok(())
    }

    async fn send_status(&self, status: StatusUpdate) -> Result<(), ChannelError> {
        match status {
            StatusUpdate::Typing => eprintln!("…"),
        }
        Ok(())
    }
}
