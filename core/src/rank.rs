use crate::document::Document;
use crate::index::InvertedIndex;
use crate::tokenizer::Token;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Inverse document frequency factor. Held at 1.0, so relevance is plain term
/// frequency; switching to a real idf is a deliberate scoring change.
pub const IDF_WEIGHT: f64 = 1.0;

/// Relevance of `doc` for `token`.
pub fn relevance(doc: &Document, token: &str) -> f64 {
    doc.term_frequency(token) * IDF_WEIGHT
}

/// Token -> documents by descending relevance, equal scores by ascending id.
#[derive(Debug, Default)]
pub struct RankedIndex {
    postings: HashMap<Token, Vec<Arc<Document>>>,
}

impl RankedIndex {
    /// Rank every posting set. The inverted index is consumed.
    pub fn rank(index: InvertedIndex) -> Self {
        let postings = index
            .into_postings()
            .map(|(token, docs)| {
                let ranked = rank_postings(&token, docs);
                (token, ranked)
            })
            .collect();
        Self { postings }
    }

    pub fn get(&self, token: &str) -> Option<&[Arc<Document>]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&Token, &[Arc<Document>])> + '_ {
        self.postings.iter().map(|(token, docs)| (token, docs.as_slice()))
    }
}

fn rank_postings(token: &str, docs: BTreeSet<Arc<Document>>) -> Vec<Arc<Document>> {
    let mut scored: Vec<(f64, Arc<Document>)> = docs
        .into_iter()
        .map(|doc| (relevance(&doc, token), doc))
        .collect();
    // Input is in ascending id order and sort_by is stable, so ties keep it.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().map(|(_, doc)| doc).collect()
}
