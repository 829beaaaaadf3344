use std::collections::BTreeSet;
use urlsift_sources::FetchOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Set union, sorted ascending.
    Unique,
    /// Source order, then item order. Duplicates kept.
    Concatenate,
}

impl MergeMode {
    pub fn from_unique_flag(unique: bool) -> Self {
        if unique {
            MergeMode::Unique
        } else {
            MergeMode::Concatenate
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedResult {
    mode: MergeMode,
    urls: Vec<String>,
}

impl MergedResult {
    pub fn mode(&self) -> MergeMode {
        self.mode
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_urls(self) -> Vec<String> {
        self.urls
    }
}

/// Combine source outcomes into one collection. Failed sources contribute nothing.
pub fn merge(outcomes: &[FetchOutcome], unique: bool) -> MergedResult {
    let mode = MergeMode::from_unique_flag(unique);
    let extracted = outcomes.iter().flat_map(|outcome| outcome.urls());

    let urls = match mode {
        MergeMode::Unique => extracted
            .map(String::as_str)
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect(),
        MergeMode::Concatenate => extracted.cloned().collect(),
    };

    MergedResult { mode, urls }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes() -> Vec<FetchOutcome> {
        vec![
            FetchOutcome::success("a", vec!["x".into(), "y".into()]),
            FetchOutcome::failure("b", "HTTP 500"),
            FetchOutcome::success("c", vec!["y".into(), "z".into()]),
        ]
    }

    #[test]
    fn test_unique_merge() {
        let merged = merge(&outcomes(), true);
        assert_eq!(merged.mode(), MergeMode::Unique);
        assert_eq!(merged.urls(), ["x", "y", "z"]);
    }

    #[test]
    fn test_concatenate_merge_keeps_duplicates() {
        let merged = merge(&outcomes(), false);
        assert_eq!(merged.mode(), MergeMode::Concatenate);
        assert_eq!(merged.urls(), ["x", "y", "y", "z"]);
    }

    #[test]
    fn test_unique_merge_sorts_across_sources() {
        let outcomes = vec![
            FetchOutcome::success(
                "wayback",
                vec![
                    "https://b.example.com/".into(),
                    "http://a.example.com/".into(),
                ],
            ),
            FetchOutcome::success(
                "alienvault",
                vec!["http://a.example.com/".into(), "93.184.216.34".into()],
            ),
        ];
        let merged = merge(&outcomes, true);
        assert_eq!(
            merged.urls(),
            ["93.184.216.34", "http://a.example.com/", "https://b.example.com/"]
        );
    }

    #[test]
    fn test_concatenate_preserves_item_order_within_source() {
        let outcomes = vec![
            FetchOutcome::success("first", vec!["z".into(), "a".into()]),
            FetchOutcome::success("second", vec!["m".into()]),
        ];
        assert_eq!(merge(&outcomes, false).into_urls(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_all_failures_merge_to_empty() {
        let outcomes = vec![
            FetchOutcome::failure("a", "timeout"),
            FetchOutcome::failure("b", "HTTP 503"),
        ];
        assert!(merge(&outcomes, true).is_empty());
        assert!(merge(&outcomes, false).is_empty());
        assert!(merge(&[], true).is_empty());
    }

    #[test]
    fn test_unique_merge_is_idempotent() {
        let first = merge(&outcomes(), true);
        let second = merge(&outcomes(), true);
        assert_eq!(first, second);

        let remerged = merge(&[FetchOutcome::success("merged", first.urls().to_vec())], true);
        assert_eq!(remerged.urls(), first.urls());
    }

    #[test]
    fn test_unique_merge_has_no_duplicates_and_is_sorted() {
        let outcomes = vec![
            FetchOutcome::success("a", vec!["b".into(), "b".into(), "a".into()]),
            FetchOutcome::success("b", vec!["c".into(), "a".into(), "b".into()]),
        ];
        let merged = merge(&outcomes, true);
        assert!(merged.urls().windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(merged.len(), 3);
    }
}
