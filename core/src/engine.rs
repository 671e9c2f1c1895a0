use crate::document::{DocId, Document};
use crate::index::InvertedIndex;
use crate::rank::{relevance, RankedIndex};
use crate::tokenizer::{Token, Tokenizer, WhitespaceTokenizer};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Answers single-token queries over a fixed corpus.
///
/// All indexing and ranking happens in [`SearchEngine::new`]; afterwards the
/// engine is read-only and can be shared across threads without locking.
pub struct SearchEngine<T: Tokenizer = WhitespaceTokenizer> {
    documents: Vec<Arc<Document>>,
    tokenizer: T,
    ranked: RankedIndex,
}

impl<T: Tokenizer> SearchEngine<T> {
    /// Index and rank `documents`. Their order decides ties between equal scores.
    pub fn new(documents: Vec<Arc<Document>>, tokenizer: T) -> Self {
        let start = Instant::now();
        let inverted = InvertedIndex::build(&documents);
        let ranked = RankedIndex::rank(inverted);
        tracing::info!(
            num_docs = documents.len(),
            num_tokens = ranked.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "search engine ready"
        );
        Self { documents, tokenizer, ranked }
    }

    /// Documents containing `query`, most relevant first. Empty when the
    /// normalized query was never indexed, including the empty query.
    pub fn search(&self, query: &str) -> &[Arc<Document>] {
        let token = self.tokenizer.normalize(query);
        self.ranked.get(&token).unwrap_or(&[])
    }

    /// Same order as [`SearchEngine::search`], with each document's score.
    pub fn search_scored(&self, query: &str) -> Vec<(&Arc<Document>, f64)> {
        let token = self.tokenizer.normalize(query);
        match self.ranked.get(&token) {
            Some(docs) => docs.iter().map(|doc| (doc, relevance(doc, &token))).collect(),
            None => Vec::new(),
        }
    }

    pub fn document(&self, id: DocId) -> Option<&Arc<Document>> {
        self.documents.iter().find(|doc| doc.id() == id)
    }

    /// The corpus as given, duplicates included.
    pub fn documents(&self) -> &[Arc<Document>] { &self.documents }

    pub fn num_docs(&self) -> usize { self.documents.len() }

    /// Number of distinct indexed tokens.
    pub fn num_tokens(&self) -> usize { self.ranked.len() }

    pub fn tokenizer(&self) -> &T { &self.tokenizer }

    /// Ranked posting lists sorted by token.
    pub fn postings(&self) -> Vec<(&Token, &[Arc<Document>])> {
        let mut postings: Vec<_> = self.ranked.iter().collect();
        postings.sort_by(|a, b| a.0.cmp(b.0));
        postings
    }
}

impl<T: Tokenizer> fmt::Display for SearchEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} documents indexed", self.num_docs())?;
        for (token, docs) in self.postings() {
            write!(f, "Token {token} appears in documents:")?;
            for doc in docs {
                write!(f, " {}", doc.name())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
