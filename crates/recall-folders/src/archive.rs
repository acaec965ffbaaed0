//! Archive detection and display names.

use std::sync::LazyLock;

use regex::Regex;

/// Path pattern and the multiplier it applies. First match wins.
static ARCHIVE_PATTERNS: LazyLock<Vec<(Regex, f64)>> = LazyLock::new(|| {
    [
        (r"(?i)z_archive/", 0.1),
        (r"(?i)/scratch/", 0.2),
        (r"(?i)/test-", 0.2),
        (r"(?i)-test/", 0.2),
        (r"(?i)/prototype/", 0.2),
    ]
    .into_iter()
    .filter_map(|(pattern, multiplier)| Regex::new(pattern).ok().map(|re| (re, multiplier)))
    .collect()
});

/// True when the path looks like an archive, scratch, test, or prototype folder.
pub fn is_archived(folder: &str) -> bool {
    !folder.is_empty() && ARCHIVE_PATTERNS.iter().any(|(re, _)| re.is_match(folder))
}

/// Multiplier for the first matching archive pattern, else 1.0.
pub fn archive_multiplier(folder: &str) -> f64 {
    if folder.is_empty() {
        return 1.0;
    }
    ARCHIVE_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(folder))
        .map_or(1.0, |(_, m)| *m)
}

/// Leaf folder name, with ` (archived)` appended for archived paths.
pub fn simplify_folder_path(folder: &str) -> String {
    if folder.is_empty() {
        return "unknown".to_string();
    }
    let parts: Vec<&str> = folder.split('/').collect();
    let leaf = parts
        .iter()
        .rev()
        .take(2)
        .find(|p| !p.is_empty())
        .copied()
        .unwrap_or("unknown");
    if is_archived(folder) {
        format!("{leaf} (archived)")
    } else {
        leaf.to_string()
    }
}
