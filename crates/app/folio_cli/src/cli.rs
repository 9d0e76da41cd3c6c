use clap::{Parser, Subcommand};
use folio_api_client::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(name = "folio", about = "Chat with AryanGPT from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat
    Chat {
        /// Base URL of the relay server
        #[arg(long, env = "FOLIO_SERVER", default_value = DEFAULT_BASE_URL)]
        server: String,
    },
    /// Ask a single question and print the reply
    Ask {
        /// Your question
        question: String,
        /// Base URL of the relay server
        #[arg(long, env = "FOLIO_SERVER", default_value = DEFAULT_BASE_URL)]
        server: String,
    },
    /// List the suggested questions
    Suggestions,
    /// Print the version
    Version,
}
