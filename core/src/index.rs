use crate::document::Document;
use crate::tokenizer::Token;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Token -> documents containing it, deduplicated and ordered by document id.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    postings: HashMap<Token, BTreeSet<Arc<Document>>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index every distinct token of every document, in corpus order. The same
    /// instance listed several times ends up once in each of its posting sets.
    pub fn build(corpus: &[Arc<Document>]) -> Self {
        let mut postings: HashMap<Token, BTreeSet<Arc<Document>>> = HashMap::new();
        for doc in corpus {
            for token in doc.distinct_tokens() {
                match postings.get_mut(token) {
                    Some(docs) => {
                        docs.insert(Arc::clone(doc));
                    }
                    None => {
                        postings.insert(token.clone(), BTreeSet::from([Arc::clone(doc)]));
                    }
                }
            }
        }
        // Tokenizers must not produce "", but lookups rely on it never being indexed.
        postings.remove("");
        Self { postings }
    }

    pub fn get(&self, token: &str) -> Option<&BTreeSet<Arc<Document>>> {
        self.postings.get(token)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn into_postings(self) -> impl Iterator<Item = (Token, BTreeSet<Arc<Document>>)> {
        self.postings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocIdCounter;
    use crate::tokenizer::{Tokenizer, WhitespaceTokenizer};

    fn docs(contents: &[&str]) -> Vec<Arc<Document>> {
        let ids = DocIdCounter::new();
        contents
            .iter()
            .map(|c| Arc::new(Document::new(&ids, c, None, &WhitespaceTokenizer)))
            .collect()
    }

    fn ids_of(set: &BTreeSet<Arc<Document>>) -> Vec<u32> {
        set.iter().map(|d| d.id()).collect()
    }

    #[test]
    fn same_instance_indexed_once() {
        let d = docs(&["single document"]).remove(0);
        let corpus = vec![Arc::clone(&d), Arc::clone(&d), Arc::clone(&d)];
        let index = InvertedIndex::build(&corpus);
        assert_eq!(index.get("single").map(BTreeSet::len), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn postings_ordered_by_id_regardless_of_corpus_order() {
        let mut corpus = docs(&["fox a", "fox b", "fox c"]);
        corpus.reverse();
        let index = InvertedIndex::build(&corpus);
        assert_eq!(ids_of(index.get("fox").unwrap()), vec![0, 1, 2]);
    }

    #[test]
    fn distinct_content_twins_both_kept() {
        let corpus = docs(&["same words", "same words"]);
        let index = InvertedIndex::build(&corpus);
        assert_eq!(index.get("same").map(BTreeSet::len), Some(2));
    }

    struct LeakyTokenizer;

    impl Tokenizer for LeakyTokenizer {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split(' ').map(str::to_string).collect()
        }
    }

    #[test]
    fn empty_token_never_indexed() {
        let ids = DocIdCounter::new();
        let d = Arc::new(Document::new(&ids, "a  b", None, &LeakyTokenizer));
        assert!(d.term_frequency("") > 0.0);
        let index = InvertedIndex::build(&[d]);
        assert!(index.get("").is_none());
        assert!(index.get("a").is_some());
    }

    #[test]
    fn empty_corpus() {
        assert!(InvertedIndex::build(&[]).is_empty());
    }
}
