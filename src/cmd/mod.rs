use crate::{
    pkg::{client, server::listen},
    prelude::Result,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "serves salary predictions and the form client that queries them")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Start the prediction service
    Listen,
    /// Start the form client
    Ui,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Listen) => {
            listen().await?;
        }
        Some(SubCommandType::Ui) => {
            client::serve().await?;
        }
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}
