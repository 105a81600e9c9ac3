use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use pageturner_server::config::{Cli, Command, QueryArgs, ServeConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Query(args)) => query(&args),
        Some(Command::Serve(config)) => serve(&config).await,
        None => serve(&cli.serve).await,
    }
}

async fn serve(config: &ServeConfig) -> anyhow::Result<()> {
    let catalog = config.catalog.load().context("loading catalog")?;
    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    pageturner_server::run(listener, Arc::new(catalog)).await?;
    Ok(())
}

fn query(args: &QueryArgs) -> anyhow::Result<()> {
    let catalog = args.catalog.load().context("loading catalog")?;
    let options = args.params().parse()?;
    let books = catalog.query(&options);
    println!("{}", serde_json::to_string_pretty(&books)?);
    Ok(())
}
