//! Tokenization for TF-IDF documents.
//!
//! Tokens are maximal runs of alphabetic characters, lower-cased, at least two
//! characters long, with English stop words removed. No stemming.

use std::collections::HashSet;

/// English stop words, the same list scikit-learn ships as `ENGLISH_STOP_WORDS`.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Splits documents into TF-IDF terms.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<&'static str>,
    min_token_len: usize,
}

impl Tokenizer {
    /// Tokenizer with the English stop-word list and a minimum length of 2
    pub fn english() -> Self {
        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            min_token_len: 2,
        }
    }

    /// Tokenizer that keeps every word
    pub fn without_stop_words() -> Self {
        Self {
            stop_words: HashSet::new(),
            min_token_len: 2,
        }
    }

    /// Configure the minimum token length in characters (default: 2)
    pub fn with_min_token_len(mut self, min: usize) -> Self {
        self.min_token_len = min;
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }

    /// Split `text` into terms, in document order (duplicates kept).
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphabetic())
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .filter(|s| s.chars().count() >= self.min_token_len)
            .filter(|s| !self.is_stop_word(s))
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = Tokenizer::english();
        assert_eq!(tokenizer.tokenize("Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokenizer = Tokenizer::english();
        let tokens = tokenizer.tokenize("a brave hero saves the day");
        assert_eq!(tokens, vec!["brave", "hero", "saves", "day"]);
    }

    #[test]
    fn test_tokenize_splits_on_digits_and_punctuation() {
        let tokenizer = Tokenizer::english();
        let tokens = tokenizer.tokenize("sci-fi, 1980s robots!");
        assert_eq!(tokens, vec!["sci", "fi", "robots"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates() {
        let tokenizer = Tokenizer::without_stop_words();
        assert_eq!(tokenizer.tokenize("war and war"), vec!["war", "and", "war"]);
    }

    #[test]
    fn test_min_token_len() {
        let tokenizer = Tokenizer::without_stop_words().with_min_token_len(4);
        assert_eq!(tokenizer.tokenize("the big heist"), vec!["heist"]);
    }

    #[test]
    fn test_stop_word_list_is_lowercase_and_unique() {
        let unique: HashSet<&str> = ENGLISH_STOP_WORDS.iter().copied().collect();
        assert_eq!(unique.len(), ENGLISH_STOP_WORDS.len());
        assert!(ENGLISH_STOP_WORDS.iter().all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }
}
