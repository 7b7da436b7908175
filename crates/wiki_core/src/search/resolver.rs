//! Exact-match / substring resolution over entry titles.
//!
//! # Invariants
//! - Comparison is case-insensitive via [`title_key`].
//! - An exact match always wins over substring matches.
//! - Result lists keep the input order of `titles`.
//! - Resolution is pure: identical inputs give identical output.

use crate::model::entry::title_key;

/// Outcome of resolving a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Query equals this title, ignoring case.
    ExactMatch(String),
    /// Titles containing the query, ignoring case. Empty means no matches.
    ResultList(Vec<String>),
}

impl Resolution {
    /// Returns the title to redirect to, if the query matched exactly.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::ExactMatch(title) => Some(title),
            Self::ResultList(_) => None,
        }
    }
}

/// Resolves `query` against `titles`.
///
/// The first title whose lowercase form equals the lowercase query is an
/// exact match. Otherwise every title containing the query is returned in
/// input order; an empty query therefore matches all titles.
pub fn resolve<S: AsRef<str>>(query: &str, titles: &[S]) -> Resolution {
    let needle = title_key(query);
    let keyed = titles
        .iter()
        .map(|title| (title.as_ref(), title_key(title.as_ref())))
        .collect::<Vec<_>>();

    if let Some((title, _)) = keyed.iter().find(|(_, key)| *key == needle) {
        return Resolution::ExactMatch((*title).to_string());
    }

    Resolution::ResultList(
        keyed
            .into_iter()
            .filter(|(_, key)| key.contains(needle.as_str()))
            .map(|(title, _)| title.to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::{resolve, Resolution};

    const TITLES: [&str; 3] = ["Python", "Django", "HTML"];

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(
            resolve("python", &TITLES),
            Resolution::ExactMatch("Python".to_string())
        );
    }

    #[test]
    fn partial_query_returns_substring_matches() {
        assert_eq!(
            resolve("py", &TITLES),
            Resolution::ResultList(vec!["Python".to_string()])
        );
    }

    #[test]
    fn substring_matches_keep_input_order() {
        let titles = ["Git", "GitHub", "Digital"];
        assert_eq!(
            resolve("GI", &titles),
            Resolution::ExactMatch("Git".to_string())
        );
        assert_eq!(
            resolve("it", &titles),
            Resolution::ResultList(vec![
                "Git".to_string(),
                "GitHub".to_string(),
                "Digital".to_string()
            ])
        );
    }

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(
            resolve("", &TITLES),
            Resolution::ResultList(TITLES.iter().map(|t| t.to_string()).collect())
        );
    }

    #[test]
    fn no_match_is_an_empty_list() {
        let resolution = resolve("rust", &TITLES);
        assert_eq!(resolution, Resolution::ResultList(Vec::new()));
        assert_eq!(resolution.redirect_target(), None);
    }

    #[test]
    fn first_duplicate_wins_exact_match() {
        let titles = ["CSS", "css"];
        assert_eq!(resolve("Css", &titles).redirect_target(), Some("CSS"));
    }

    #[test]
    fn non_ascii_titles_match_across_case() {
        let titles = ["École", "Écologie", "Straße", "Жук"];
        assert_eq!(resolve("éCOLE", &titles).redirect_target(), Some("École"));
        assert_eq!(resolve("жУК", &titles).redirect_target(), Some("Жук"));
        assert_eq!(
            resolve("ÉCO", &titles),
            Resolution::ResultList(vec!["École".to_string(), "Écologie".to_string()])
        );
    }

    #[test]
    fn sharp_s_compares_by_lowercase_not_full_folding() {
        let titles = ["Straße"];
        assert_eq!(resolve("STRAßE", &titles).redirect_target(), Some("Straße"));
        assert_eq!(resolve("STRASSE", &titles), Resolution::ResultList(Vec::new()));
    }
}
