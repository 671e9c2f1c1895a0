use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A normalized word. Never the empty string inside a document's token sequence.
pub type Token = String;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Strategy turning raw text into an ordered sequence of tokens.
///
/// Implementations must never emit an empty token, and `normalize` must map a
/// query word onto the same form `tokenize` gives that word inside a document.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Normalize a single-token query. Lower-cases by default.
    fn normalize(&self, query: &str) -> Token {
        query.to_lowercase()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize(&self, text: &str) -> Vec<Token> { (**self).tokenize(text) }
    fn normalize(&self, query: &str) -> Token { (**self).normalize(query) }
}

/// Splits on runs of whitespace and lower-cases every fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        // split_whitespace never yields an empty fragment, even for "" or "   "
        text.split_whitespace().map(str::to_lowercase).collect()
    }
}

/// NFKC normalization, lowercase, stopword removal, and English stemming.
#[derive(Debug, Clone, Copy, Default)]
pub struct StemmingTokenizer;

impl Tokenizer for StemmingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        RE.find_iter(&normalized)
            .map(|mat| mat.as_str())
            .filter(|word| !is_stopword(word))
            .map(|word| STEMMER.stem(word).into_owned())
            .filter(|stem| !stem.is_empty())
            .collect()
    }

    /// The query's only token, or "" when it has none (e.g. a stopword) or several.
    fn normalize(&self, query: &str) -> Token {
        let mut tokens = self.tokenize(query);
        if tokens.len() == 1 { tokens.pop().unwrap_or_default() } else { Token::new() }
    }
}

/// Tokenizer selected at runtime, e.g. from a command-line flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenizerKind {
    #[default]
    Whitespace,
    Stemming,
}

impl Tokenizer for TokenizerKind {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        match self {
            TokenizerKind::Whitespace => WhitespaceTokenizer.tokenize(text),
            TokenizerKind::Stemming => StemmingTokenizer.tokenize(text),
        }
    }

    fn normalize(&self, query: &str) -> Token {
        match self {
            TokenizerKind::Whitespace => WhitespaceTokenizer.normalize(query),
            TokenizerKind::Stemming => StemmingTokenizer.normalize(query),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "whitespace" => Ok(TokenizerKind::Whitespace),
            "stemming" => Ok(TokenizerKind::Stemming),
            other => Err(format!("unknown tokenizer `{other}` (expected `whitespace` or `stemming`)")),
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Whitespace => f.write_str("whitespace"),
            TokenizerKind::Stemming => f.write_str("stemming"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_trims_and_collapses_runs() {
        let t = WhitespaceTokenizer.tokenize("  abc   def   ghi  ");
        assert_eq!(t, vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn whitespace_empty_input() {
        assert!(WhitespaceTokenizer.tokenize("").is_empty());
        assert!(WhitespaceTokenizer.tokenize(" \t\n  ").is_empty());
    }

    #[test]
    fn whitespace_keeps_punctuation_and_lowercases() {
        let t = WhitespaceTokenizer.tokenize("The Dog, the\tDOG.\nthe");
        assert_eq!(t, vec!["the", "dog,", "the", "dog.", "the"]);
    }

    #[test]
    fn stemming_normalizes_query_like_documents() {
        let toks = StemmingTokenizer.tokenize("Running dogs");
        assert_eq!(StemmingTokenizer.normalize("RUNNING"), toks[0]);
        assert_eq!(StemmingTokenizer.normalize("  "), "");
    }

    #[test]
    fn stemming_query_drops_punctuation_like_documents() {
        for word in ["world.", "Fox!", "2nd", "(Running)"] {
            let toks = StemmingTokenizer.tokenize(word);
            assert_eq!(toks.len(), 1, "{word:?} -> {toks:?}");
            assert_eq!(StemmingTokenizer.normalize(word), toks[0], "{word:?}");
        }
        assert_eq!(StemmingTokenizer.normalize("the"), "");
        assert_eq!(StemmingTokenizer.normalize("brown fox"), "");
    }

    #[test]
    fn kind_parses_and_displays() {
        assert_eq!("Stemming".parse::<TokenizerKind>(), Ok(TokenizerKind::Stemming));
        assert_eq!(TokenizerKind::default().to_string(), "whitespace");
        assert!("bigram".parse::<TokenizerKind>().is_err());
    }
}
