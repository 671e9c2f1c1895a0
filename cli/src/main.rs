mod repl;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use docsearch_core::{CorpusSource, SearchEngine, TokenizerKind};
use std::collections::BTreeMap;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(about = "Search a directory of text documents ranked by term frequency", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct CorpusArgs {
    /// Directory whose files make up the corpus
    #[arg(long, default_value = ".")]
    dir: String,
    /// Also index files in subdirectories
    #[arg(long, default_value_t = false)]
    recursive: bool,
    /// Tokenizer: `whitespace` or `stemming`
    #[arg(long, default_value_t = TokenizerKind::Whitespace)]
    tokenizer: TokenizerKind,
}

impl Default for CorpusArgs {
    fn default() -> Self {
        Self { dir: ".".into(), recursive: false, tokenizer: TokenizerKind::default() }
    }
}

impl CorpusArgs {
    fn load(&self) -> Result<SearchEngine<TokenizerKind>> {
        let source = CorpusSource { dir: self.dir.clone().into(), recursive: self.recursive, tokenizer: self.tokenizer };
        tracing::debug!(dir = %self.dir, tokenizer = %self.tokenizer, recursive = self.recursive, "building engine");
        source.load()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Read one word per line from stdin and print matching documents (default)
    Repl {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Print the ranked documents for each given word
    Query {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Words to look up
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Print every indexed token with its ranked documents
    Dump {
        #[command(flatten)]
        corpus: CorpusArgs,
        /// Emit a JSON object of token -> document names
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Repl { corpus: CorpusArgs::default() }) {
        Commands::Repl { corpus } => {
            let engine = corpus.load()?;
            repl::run(&engine, io::stdin().lock(), io::stdout().lock())
        }
        Commands::Query { corpus, words } => {
            let engine = corpus.load()?;
            for word in words {
                println!("{word}: {}", repl::format_results(engine.search(&word)));
            }
            Ok(())
        }
        Commands::Dump { corpus, json } => {
            let engine = corpus.load()?;
            if json {
                println!("{}", dump_json(&engine)?);
            } else {
                print!("{engine}");
            }
            Ok(())
        }
    }
}

fn dump_json(engine: &SearchEngine<TokenizerKind>) -> Result<String> {
    let postings: BTreeMap<&str, Vec<&str>> = engine
        .postings()
        .into_iter()
        .map(|(token, docs)| (token.as_str(), docs.iter().map(|d| d.name()).collect()))
        .collect();
    Ok(serde_json::to_string_pretty(&postings)?)
}
