//! Term-frequency search over a fixed, in-memory corpus of text documents.

pub mod corpus;
pub mod document;
pub mod engine;
pub mod index;
pub mod loader;
pub mod rank;
pub mod tokenizer;

pub use corpus::Corpus;
pub use document::{DocId, DocIdCounter, Document, DocumentSummary};
pub use engine::SearchEngine;
pub use index::InvertedIndex;
pub use loader::{load_directory, CorpusSource, LoadedDocument};
pub use rank::{relevance, RankedIndex, IDF_WEIGHT};
pub use tokenizer::{StemmingTokenizer, Token, Tokenizer, TokenizerKind, WhitespaceTokenizer};
