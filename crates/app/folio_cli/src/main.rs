// Import and re-export the `error` module
pub use self::error::{Error, Result};
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use folio_api_client::RelayClient;
use folio_core::conversation::{Conversation, Outcome};
use tokio::io::BufReader;

mod chat;
mod cli;
mod logging;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    logging::init()?;

    let args = Cli::parse();

    match &args.command {
        Commands::Chat { server } => {
            log::debug!("chatting via {server}");
            let mut session = chat::ChatSession::new(
                RelayClient::new(server),
                chat::default_export_dir(),
                std::io::stdout(),
            );
            session.run(BufReader::new(tokio::io::stdin())).await?;
        }
        Commands::Ask { question, server } => {
            ask(&RelayClient::new(server), question).await;
        }
        Commands::Suggestions => {
            println!("{}", render::render_suggestions());
        }
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// One question, one answer, through the same state machine as the chat.
async fn ask(client: &RelayClient, question: &str) {
    let mut conversation = Conversation::new();
    let Some(id) = conversation.submit(question) else {
        log::warn!("nothing to ask");
        return;
    };

    let outcome = match client.ask(question).await {
        Ok(body) => Outcome::Reply(body.reply),
        Err(e) => {
            log::warn!("relay unreachable: {e}");
            Outcome::TransportFailed
        }
    };
    conversation.settle(id, outcome);

    if let Some(msg) = conversation.get(id) {
        println!("{}", render::render_message(msg));
    }
}
