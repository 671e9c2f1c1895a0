use anyhow::Result;
use axum::Router;
use clap::Parser;
use docsearch_core::{CorpusSource, TokenizerKind};
use docsearch_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory whose files make up the corpus
    #[arg(long, default_value = ".")]
    dir: String,
    /// Also index files in subdirectories
    #[arg(long, default_value_t = false)]
    recursive: bool,
    /// Tokenizer: `whitespace` or `stemming`
    #[arg(long, default_value_t = TokenizerKind::Whitespace)]
    tokenizer: TokenizerKind,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let source = CorpusSource { dir: args.dir.into(), recursive: args.recursive, tokenizer: args.tokenizer };
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app: Router = build_app(source, admin_token)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
