use docsearch_core::{Corpus, Document, SearchEngine, StemmingTokenizer, Tokenizer, WhitespaceTokenizer};
use std::sync::Arc;
use std::thread;

fn names(docs: &[Arc<Document>]) -> Vec<&str> {
    docs.iter().map(|d| d.name()).collect()
}

fn three_doc_corpus() -> (SearchEngine, Vec<Arc<Document>>) {
    let mut corpus = Corpus::new();
    let one = corpus.add("the brown fox jumped over the brown dog", Some("one"));
    let two = corpus.add("the lazy brown dog sat in the corner", Some("two"));
    let three = corpus.add("the red fox bit the lazy dog", Some("three"));
    (corpus.into_engine(), vec![one, two, three])
}

#[test]
fn ranks_by_term_frequency() {
    let (engine, docs) = three_doc_corpus();
    assert_eq!(engine.search("brown"), [Arc::clone(&docs[0]), Arc::clone(&docs[1])]);
    assert_eq!(engine.search("fox"), [Arc::clone(&docs[2]), Arc::clone(&docs[0])]);
}

#[test]
fn search_is_case_insensitive() {
    let (engine, _) = three_doc_corpus();
    assert_eq!(engine.search("BROWN"), engine.search("brown"));
    assert_eq!(names(engine.search("Lazy")), vec!["three", "two"]);
}

#[test]
fn empty_and_unknown_queries_return_nothing() {
    let mut corpus = Corpus::new();
    corpus.add("the brown fox jumped over the brown dog", None);
    corpus.add("", None);
    corpus.add("abc     def", None);
    let engine = corpus.into_engine();

    assert!(engine.search("").is_empty());
    assert!(engine.search("zebra").is_empty());
    assert!(engine.search("abc def").is_empty());
    assert_eq!(engine.num_docs(), 3);
}

#[test]
fn repeated_instance_listed_once() {
    let mut corpus = Corpus::new();
    let doc = corpus.add("single document", Some("one"));
    corpus.push(Arc::clone(&doc));
    corpus.push(Arc::clone(&doc));
    let engine = corpus.into_engine();

    assert_eq!(engine.search("single"), [doc]);
}

#[test]
fn equal_scores_follow_corpus_order() {
    let mut corpus = Corpus::new();
    corpus.add("dog is an animal", Some("first"));
    corpus.add("a dog eats fox", Some("second"));
    let engine = corpus.into_engine();

    assert_eq!(names(engine.search("dog")), vec!["first", "second"]);
}

#[test]
fn engine_built_directly_from_documents() {
    let ids = docsearch_core::DocIdCounter::new();
    let a = Arc::new(Document::new(&ids, "shared", Some("a"), &WhitespaceTokenizer));
    let b = Arc::new(Document::new(&ids, "shared shared", Some("b"), &WhitespaceTokenizer));
    let engine = SearchEngine::new(vec![a, b], WhitespaceTokenizer);
    assert_eq!(names(engine.search("shared")), vec!["a", "b"]);
}

#[test]
fn concurrent_readers_see_same_results() {
    let (engine, _) = three_doc_corpus();
    let expected: Vec<String> = names(engine.search("dog")).into_iter().map(String::from).collect();
    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let got: Vec<String> = names(engine.search("dog")).into_iter().map(String::from).collect();
                assert_eq!(got, expected);
            });
        }
    });
}

#[test]
fn tokenizer_is_swappable() {
    let mut corpus = Corpus::with_tokenizer(StemmingTokenizer);
    corpus.add("The runner was running", Some("one"));
    corpus.add("Runs daily", Some("two"));
    let engine = corpus.into_engine();

    assert_eq!(engine.tokenizer().normalize("Running"), "run");
    assert_eq!(names(engine.search("RUNNING")), vec!["one", "two"]);
    assert!(engine.search("the").is_empty());
}

#[test]
fn dump_names_every_token() {
    let (engine, _) = three_doc_corpus();
    let dump = engine.to_string();
    assert!(dump.starts_with("3 documents indexed\n"));
    assert!(dump.contains("Token brown appears in documents: one two\n"));
    assert_eq!(dump.lines().count(), 1 + engine.num_tokens());
}

#[test]
fn stemming_query_with_punctuation_matches() {
    let mut corpus = Corpus::with_tokenizer(StemmingTokenizer);
    corpus.add("Hello, world.", Some("greeting"));
    let engine = corpus.into_engine();

    assert_eq!(names(engine.search("world.")), vec!["greeting"]);
    assert_eq!(names(engine.search("Hello,")), vec!["greeting"]);
}
