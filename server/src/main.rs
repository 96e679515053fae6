use clap::Parser;
use sports_chat_server::run_main;
use sports_chat_server::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_main(Cli::parse()).await
}
