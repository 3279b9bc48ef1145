//! Delimited list helpers
//!
//! Condition values and list modifiers work on delimiter separated strings
//! without any quoting, e.g. `1,2, 3` or `GP:tx_news|news`.

/// Split `input` on `delimiter` and trim every element.
///
/// With `remove_empty` set, elements that are empty after trimming are
/// dropped. An empty input yields a single empty element otherwise.
pub fn trim_explode(delimiter: char, input: &str, remove_empty: bool) -> Vec<String> {
    input
        .split(delimiter)
        .map(|part| part.trim().to_string())
        .filter(|part| !remove_empty || !part.is_empty())
        .collect()
}

/// Whether `item` is one of the comma separated elements of `list`.
pub fn in_list(list: &str, item: &str) -> bool {
    !item.contains(',') && list.split(',').any(|element| element == item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_explode_keeps_empty_elements() {
        assert_eq!(
            trim_explode(',', " a, ,b ,", false),
            vec!["a", "", "b", ""]
        );
        assert_eq!(trim_explode(',', "", false), vec![""]);
    }

    #[test]
    fn test_trim_explode_removes_empty_elements() {
        assert_eq!(trim_explode(',', " a, ,b ,", true), vec!["a", "b"]);
        assert!(trim_explode('|', "", true).is_empty());
    }

    #[test]
    fn test_in_list() {
        assert!(in_list("1,2,3", "2"));
        assert!(!in_list("1,2,3", "4"));
        assert!(!in_list("1,2,3", "1,2"));
        assert!(in_list("0,-1", "-1"));
    }
}
