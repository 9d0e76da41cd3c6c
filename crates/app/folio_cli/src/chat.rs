//! Interactive chat session.
//!
//! Every submitted line spawns its own request task. Tasks report back over
//! a channel tagged with the placeholder id captured at send time, so a slow
//! answer never lands on a newer question's placeholder. Nothing blocks a
//! second submission while the first is in flight.

use std::io::Write;
use std::path::{Path, PathBuf};

use folio_api_client::RelayClient;
use folio_core::conversation::{Conversation, Outcome};
use folio_core::ids::MessageId;
use folio_core::suggestions::suggestion;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::Result;
use crate::render::{HELP, render_message, render_suggestions};

/// Default file name for exported transcripts.
pub const TRANSCRIPT_FILE: &str = "aryangpt-transcript.txt";

/// A parsed line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Send(String),
    Suggestion(usize),
    Suggest,
    Reset,
    Export(Option<PathBuf>),
    Help,
    Quit,
    Empty,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Input::Empty;
        }

        let Some(command) = trimmed.strip_prefix('/') else {
            return Input::Send(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "reset" => Input::Reset,
            "export" if arg.is_empty() => Input::Export(None),
            "export" => Input::Export(Some(PathBuf::from(arg))),
            "suggest" => Input::Suggest,
            "help" => Input::Help,
            "quit" | "exit" => Input::Quit,
            n => match n.parse::<usize>() {
                Ok(n) => Input::Suggestion(n),
                // Unknown slash-words are ordinary questions.
                Err(_) => Input::Send(trimmed.to_string()),
            },
        }
    }
}

/// Whether the input loop should keep going.
#[derive(Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

type Settled = (MessageId, Outcome);

pub struct ChatSession<W: Write> {
    conversation: Conversation,
    client: RelayClient,
    tx: mpsc::UnboundedSender<Settled>,
    rx: mpsc::UnboundedReceiver<Settled>,
    export_dir: PathBuf,
    out: W,
}

impl<W: Write> ChatSession<W> {
    pub fn new(client: RelayClient, export_dir: PathBuf, out: W) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            conversation: Conversation::new(),
            client,
            tx,
            rx,
            export_dir,
            out,
        }
    }

    #[cfg(test)]
    fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }

    /// Drive the session from `input` until `/quit` or end of input.
    ///
    /// At end of input the session waits for in-flight replies so piped
    /// questions still get their answers printed.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.print_latest(1)?;
        writeln!(self.out, "{HELP}")?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => {
                        if self.handle(Input::parse(&line))? == Control::Quit {
                            return Ok(());
                        }
                    }
                    None => break,
                },
                Some((id, outcome)) = self.rx.recv() => self.apply(id, outcome)?,
            }
        }

        while self.conversation.pending_count() > 0 {
            match self.rx.recv().await {
                Some((id, outcome)) => self.apply(id, outcome)?,
                None => break,
            }
        }
        Ok(())
    }

    /// React to one parsed input line.
    pub fn handle(&mut self, input: Input) -> Result<Control> {
        match input {
            Input::Send(text) => self.submit(&text, false)?,
            Input::Suggestion(n) => match suggestion(n) {
                Some(text) => self.submit(text, true)?,
                None => writeln!(self.out, "No suggestion #{n}.\n{}", render_suggestions())?,
            },
            Input::Suggest => writeln!(self.out, "{}", render_suggestions())?,
            Input::Reset => {
                self.conversation.reset();
                log::debug!("conversation reset");
                self.print_latest(1)?;
            }
            Input::Export(path) => {
                let path = path.unwrap_or_else(|| self.export_dir.join(TRANSCRIPT_FILE));
                export(&self.conversation, &path)?;
                writeln!(self.out, "Transcript saved to {}", path.display())?;
            }
            Input::Help => writeln!(self.out, "{HELP}")?,
            Input::Quit => return Ok(Control::Quit),
            Input::Empty => {}
        }
        Ok(Control::Continue)
    }

    /// Submit `text`; `echo` also prints the user's message, for input the
    /// user did not type themselves.
    fn submit(&mut self, text: &str, echo: bool) -> Result<()> {
        let Some(id) = self.conversation.submit(text) else {
            return Ok(());
        };
        self.print_latest(if echo { 2 } else { 1 })?;

        let client = self.client.clone();
        let tx = self.tx.clone();
        let query = text.to_string();
        tokio::spawn(async move {
            let outcome = match client.ask(&query).await {
                Ok(body) => {
                    if let Some(err) = body.error {
                        log::debug!("relay reported: {err}");
                    }
                    Outcome::Reply(body.reply)
                }
                Err(e) => {
                    log::warn!("relay unreachable: {e}");
                    Outcome::TransportFailed
                }
            };
            // The receiver is gone only if the session ended first.
            let _ = tx.send((id, outcome));
        });
        Ok(())
    }

    /// Apply a settled request and print the updated message.
    pub fn apply(&mut self, id: MessageId, outcome: Outcome) -> Result<()> {
        if !self.conversation.settle(id, outcome) {
            log::debug!("dropping reply for {id}: no pending placeholder");
            return Ok(());
        }
        if let Some(msg) = self.conversation.get(id) {
            writeln!(self.out, "{}", render_message(msg))?;
        }
        Ok(())
    }

    /// Wait for the next settled request.
    #[cfg(test)]
    async fn next_settled(&mut self) -> Option<Settled> {
        self.rx.recv().await
    }

    fn print_latest(&mut self, n: usize) -> Result<()> {
        let msgs = self.conversation.messages();
        for msg in &msgs[msgs.len().saturating_sub(n)..] {
            writeln!(self.out, "{}", render_message(msg))?;
        }
        Ok(())
    }
}

/// Write the conversation transcript to `path`.
pub fn export(conversation: &Conversation, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, conversation.export_transcript())?;
    Ok(())
}

/// Where transcripts go when no path is given.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
