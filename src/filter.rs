use anyhow::{Context, Result};
use regex::Regex;

/// Compile test-name filter patterns into regex objects
pub fn compile_filters(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).with_context(|| format!("Invalid regex pattern: '{}'", pattern))
        })
        .collect()
}

/// Check if a distinct test name matches any of the compiled filters
/// Returns true if filters is empty (no filters = report all tests)
pub fn matches_any_filter(name: &str, filters: &[Regex]) -> bool {
    if filters.is_empty() {
        return true;
    }
    filters.iter().any(|re| re.is_match(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_valid_filters() {
        let patterns = vec!["Frame.*".to_string(), "Memory_.*".to_string()];
        let result = compile_filters(&patterns);
        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[test]
    fn test_compile_invalid_regex() {
        let patterns = vec!["[invalid".to_string()];
        assert!(compile_filters(&patterns).is_err());
    }

    #[test]
    fn test_matches_any_filter_empty() {
        assert!(matches_any_filter("anything", &[]));
    }

    #[test]
    fn test_matches_any_filter_or_logic() {
        let patterns = vec!["^Frame_".to_string(), "^Memory_".to_string()];
        let filters = compile_filters(&patterns).unwrap();
        assert!(matches_any_filter("Frame_Time", &filters));
        assert!(matches_any_filter("Memory_Allocated", &filters));
        assert!(!matches_any_filter("Load_Time", &filters));
    }

    #[test]
    fn test_filters_apply_to_sanitized_names() {
        // Filters run against distinct (sanitized) names, so patterns
        // target underscores rather than the raw separators.
        let filters = compile_filters(&[r"Frame_Time_\d+".to_string()]).unwrap();
        assert!(matches_any_filter("Frame_Time_01", &filters));
        assert!(!matches_any_filter("Frame_Time_x", &filters));
    }
}
