use crate::tokenizer::{Token, Tokenizer};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{self, AtomicU32};

pub type DocId = u32;

/// Hands out document ids. Every call to `next_id` returns a fresh id; there is
/// no way to rewind, so ids from one counter are never reused.
#[derive(Debug, Default)]
pub struct DocIdCounter {
    next: AtomicU32,
}

impl DocIdCounter {
    pub fn new() -> Self { Self::default() }

    /// Panics once all `DocId` values are used up rather than wrapping around.
    pub fn next_id(&self) -> DocId {
        match self.next.fetch_update(atomic::Ordering::Relaxed, atomic::Ordering::Relaxed, |id| id.checked_add(1)) {
            Ok(id) => id,
            Err(_) => panic!("document id space exhausted after {} ids", DocId::MAX),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next.load(atomic::Ordering::Relaxed)
    }
}

/// A tokenized text with its per-token frequency table.
///
/// Everything is computed at construction and never changes afterwards.
/// Two documents are equal only when they are the same instance; ordering is
/// by `id`.
#[derive(Debug)]
pub struct Document {
    id: DocId,
    name: String,
    content: String,
    tokens: Vec<Token>,
    frequencies: HashMap<Token, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    #[serde(rename = "doc_id")]
    pub id: DocId,
    pub name: String,
}

impl Document {
    /// Build a document. Without a `name`, the decimal id is used.
    pub fn new<T: Tokenizer + ?Sized>(ids: &DocIdCounter, content: &str, name: Option<&str>, tokenizer: &T) -> Self {
        let id = ids.next_id();
        let content = content.trim().to_string();
        let tokens = tokenizer.tokenize(&content);
        let frequencies = token_frequencies(&tokens);
        let name = name.map_or_else(|| id.to_string(), str::to_string);
        Self { id, name, content, tokens, frequencies }
    }

    pub fn id(&self) -> DocId { self.id }

    pub fn name(&self) -> &str { &self.name }

    /// The trimmed source text.
    pub fn content(&self) -> &str { &self.content }

    /// All tokens in source order, duplicates kept.
    pub fn tokens(&self) -> &[Token] { &self.tokens }

    /// Each token of the document exactly once, in no particular order.
    pub fn distinct_tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.frequencies.keys()
    }

    /// Occurrences of `token` divided by the document's token count, or 0.0
    /// when the token does not occur.
    pub fn term_frequency(&self, token: &str) -> f64 {
        self.frequencies.get(token).copied().unwrap_or(0.0)
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary { id: self.id, name: self.name.clone() }
    }
}

fn token_frequencies(tokens: &[Token]) -> HashMap<Token, f64> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    // An empty token list leaves `counts` empty, so nothing is divided by zero.
    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(token, count)| (token.to_string(), f64::from(count) / total))
        .collect()
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Document {}

impl Ord for Document {
    fn cmp(&self, other: &Self) -> Ordering {
        // Address only separates distinct instances that share an id, which
        // happens only when documents come from different counters.
        self.id
            .cmp(&other.id)
            .then_with(|| (self as *const Self as usize).cmp(&(other as *const Self as usize)))
    }
}

impl PartialOrd for Document {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document {}", self.name)
    }
}
