//! Terms too generic to ever become learned triggers.

use std::collections::HashSet;
use std::sync::OnceLock;

const WORDS: &[&str] = &[
    // English stop words
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom",
    "why", "will", "with", "would", "you", "your",
    // Code keywords
    "function", "const", "let", "var", "import", "export", "return", "class", "interface",
    "type", "enum", "struct", "impl", "async", "await", "public", "private", "static", "void",
    "null", "undefined", "true", "false", "new", "else", "switch", "case", "break", "continue",
    "try", "catch", "throw", "default", "extends", "implements", "module", "require",
    // Domain words that appear in nearly every memory
    "memory", "memories", "session", "context", "spec", "specs", "folder", "file", "files",
    "code", "project", "task", "note", "notes", "doc", "docs", "data", "info", "thing", "stuff",
    "work", "use", "using", "used", "make", "get", "set", "add", "update", "fix", "change",
    "need", "want", "find", "show", "help", "please", "like",
];

/// The static denylist, lowercase.
pub fn denylist() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| WORDS.iter().copied().collect())
}

pub fn denylist_size() -> usize {
    denylist().len()
}

/// Case-insensitive, whitespace-trimmed membership test.
pub fn is_on_denylist(term: &str) -> bool {
    denylist().contains(term.trim().to_lowercase().as_str())
}
