#[cfg(test)]
mod tests {
    use super::super::{index_sizes, order_by_size, ordered_candidates, parse_du_output};
    use crate::error::SnapkeepError;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn sizes(pairs: &[(&str, u64)]) -> HashMap<String, u64> {
        pairs
            .iter()
            .map(|(name, size)| (name.to_string(), *size))
            .collect()
    }

    #[test]
    fn test_order_ascending_by_size() {
        let sizes = sizes(&[("a", 300), ("b", 100), ("c", 200)]);
        let entries = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(order_by_size(entries, &sizes), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_order_ties_break_by_name() {
        let sizes = sizes(&[("z", 100), ("a", 100), ("m", 100)]);
        let entries = vec!["z".to_string(), "a".to_string(), "m".to_string()];
        assert_eq!(order_by_size(entries, &sizes), vec!["a", "m", "z"]);
    }

    #[test]
    fn test_parse_du_output() {
        let parsed = parse_du_output("300\t/root/a\n100\t/root/b\n").unwrap();
        assert_eq!(
            parsed,
            vec![
                (300, PathBuf::from("/root/a")),
                (100, PathBuf::from("/root/b"))
            ]
        );
    }

    #[test]
    fn test_parse_du_output_rejects_garbage() {
        assert!(parse_du_output("no tab here\n").is_err());
        assert!(parse_du_output("xyz\t/root/a\n").is_err());
    }

    #[test]
    fn test_index_sizes_covers_all_entries() {
        let measured = vec![(300, PathBuf::from("/root/a")), (100, PathBuf::from("/root/b"))];
        let entries = vec!["a".to_string(), "b".to_string()];

        let sizes = index_sizes(measured, &entries, Path::new("/root")).unwrap();
        assert_eq!(sizes, HashMap::from([("a".to_string(), 300), ("b".to_string(), 100)]));
    }

    #[test]
    fn test_index_sizes_count_mismatch_is_inconsistency() {
        // One entry vanished between listing and measuring.
        let measured = vec![(300, PathBuf::from("/root/a"))];
        let entries = vec!["a".to_string(), "b".to_string()];

        let result = index_sizes(measured, &entries, Path::new("/root"));
        assert!(matches!(result, Err(SnapkeepError::Inconsistency(_))));
    }

    #[test]
    fn test_index_sizes_unknown_entry_is_inconsistency() {
        // Same count, but the measurement names an entry the listing
        // does not have.
        let measured = vec![(300, PathBuf::from("/root/a")), (100, PathBuf::from("/root/x"))];
        let entries = vec!["a".to_string(), "b".to_string()];

        let result = index_sizes(measured, &entries, Path::new("/root"));
        assert!(matches!(result, Err(SnapkeepError::Inconsistency(_))));
    }

    #[test]
    fn test_ordered_candidates_measures_real_entries() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("a"), vec![0u8; 300]).unwrap();
        std::fs::write(root.path().join("b"), vec![0u8; 100]).unwrap();
        std::fs::write(root.path().join("c"), vec![0u8; 200]).unwrap();

        let ordered = ordered_candidates(root.path()).unwrap();
        assert_eq!(ordered, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ordered_candidates_empty_root() {
        let root = TempDir::new().unwrap();
        let ordered = ordered_candidates(root.path()).unwrap();
        assert!(ordered.is_empty());
    }
}
