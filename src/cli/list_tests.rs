#[cfg(test)]
mod tests {
    use super::super::list::matching;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_substring_filter() {
        let result = matching(names(&["firefox-profile_2024-01-01", "chrome"]), Some("prof"));
        assert_eq!(result, vec!["firefox-profile_2024-01-01"]);
    }

    #[test]
    fn test_no_filter_returns_all_sorted() {
        let result = matching(names(&["zeta", "alpha", "mid"]), None);
        assert_eq!(result, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_filter_match_is_case_sensitive() {
        let result = matching(names(&["Chrome", "chrome"]), Some("chrome"));
        assert_eq!(result, vec!["chrome"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let result = matching(names(&["a", "b"]), Some("zzz"));
        assert!(result.is_empty());
    }
}
