use anyhow::Result;
use docsearch_core::{Document, SearchEngine, Tokenizer};
use std::io::{BufRead, Write};
use std::sync::Arc;

pub const PROMPT: &str = "Type the word you are looking for, or return to exit";

/// Answer one query per input line until end of input or an empty line.
pub fn run<T, R, W>(engine: &SearchEngine<T>, input: R, mut out: W) -> Result<()>
where
    T: Tokenizer,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{PROMPT}")?;
    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        writeln!(out, "{}", format_results(engine.search(&line)))?;
    }
    out.flush()?;
    Ok(())
}

/// `[Document a, Document b]`
pub fn format_results(docs: &[Arc<Document>]) -> String {
    let items: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
    format!("[{}]", items.join(", "))
}
