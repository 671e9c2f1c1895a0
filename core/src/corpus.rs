use crate::document::{DocIdCounter, Document};
use crate::engine::SearchEngine;
use crate::loader::LoadedDocument;
use crate::tokenizer::{Tokenizer, WhitespaceTokenizer};
use std::sync::Arc;

/// Assembles the ordered document list for a [`SearchEngine`].
///
/// Owns the id counter, so ids are unique within a corpus and independent of
/// any other corpus built in the same process.
pub struct Corpus<T: Tokenizer = WhitespaceTokenizer> {
    ids: DocIdCounter,
    tokenizer: T,
    documents: Vec<Arc<Document>>,
}

impl Corpus {
    pub fn new() -> Self { Self::with_tokenizer(WhitespaceTokenizer) }
}

impl Default for Corpus {
    fn default() -> Self { Self::new() }
}

impl<T: Tokenizer> Corpus<T> {
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self { ids: DocIdCounter::new(), tokenizer, documents: Vec::new() }
    }

    /// Build a document with the next id and append it.
    pub fn add(&mut self, content: &str, name: Option<&str>) -> Arc<Document> {
        let doc = Arc::new(Document::new(&self.ids, content, name, &self.tokenizer));
        self.documents.push(Arc::clone(&doc));
        doc
    }

    /// Append an existing document again. It is still indexed once.
    pub fn push(&mut self, doc: Arc<Document>) {
        self.documents.push(doc);
    }

    pub fn extend_loaded<I: IntoIterator<Item = LoadedDocument>>(&mut self, loaded: I) {
        for doc in loaded {
            self.add(&doc.content, Some(&doc.name));
        }
    }

    pub fn documents(&self) -> &[Arc<Document>] { &self.documents }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn tokenizer(&self) -> &T { &self.tokenizer }

    pub fn into_engine(self) -> SearchEngine<T> {
        SearchEngine::new(self.documents, self.tokenizer)
    }
}
