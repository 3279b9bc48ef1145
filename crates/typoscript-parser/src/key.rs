//! Dotted key tokenizer
//!
//! Object paths use `.` as separator and `\` as escape character:
//! - `\.` is a literal dot inside a segment
//! - `\\` is a literal backslash
//! - `\\.` is a literal backslash followed by a real separator
//!
//! Only an odd run of backslashes protects the dot that follows it.

/// Split off the first segment of a dotted key
///
/// Returns the first segment with its escapes resolved and the remainder
/// after the first unescaped dot, verbatim. When there is no unescaped dot
/// the whole (unescaped) key is the segment and the remainder is empty.
pub fn parse_next_key_segment(key: &str) -> (String, String) {
    let chars: Vec<(usize, char)> = key.char_indices().collect();
    let mut segment = String::with_capacity(key.len());
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];
        match c {
            '\\' => {
                let run = chars[i..].iter().take_while(|(_, c)| *c == '\\').count();
                let next = chars.get(i + run).map(|(_, c)| *c);

                for _ in 0..run / 2 {
                    segment.push('\\');
                }

                if next == Some('.') {
                    if run % 2 == 1 {
                        segment.push('.');
                        i += run + 1;
                    } else {
                        let (dot_offset, _) = chars[i + run];
                        return (segment, key[dot_offset + 1..].to_string());
                    }
                } else {
                    if run % 2 == 1 {
                        segment.push('\\');
                    }
                    i += run;
                }
            }
            '.' => {
                return (segment, key[offset + 1..].to_string());
            }
            _ => {
                segment.push(c);
                i += 1;
            }
        }
    }

    (segment, String::new())
}

/// Split a dotted key into all of its unescaped segments
pub fn split_key_path(key: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut rest = key.to_string();

    loop {
        let (segment, remainder) = parse_next_key_segment(&rest);
        segments.push(segment);
        if remainder.is_empty() {
            break;
        }
        rest = remainder;
    }

    segments
}

/// Escape a literal segment so it survives `split_key_path` unchanged
pub fn escape_key_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c == '\\' || c == '.' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(key: &str) -> (String, String) {
        parse_next_key_segment(key)
    }

    #[test]
    fn test_plain_key() {
        assert_eq!(split("test.key.subkey"), ("test".to_string(), "key.subkey".to_string()));
        assert_eq!(split("test"), ("test".to_string(), String::new()));
        assert_eq!(split(""), (String::new(), String::new()));
    }

    #[test]
    fn test_escaped_dots_are_not_boundaries() {
        assert_eq!(
            split("test\\.key\\.subkey"),
            ("test.key.subkey".to_string(), String::new())
        );
        assert_eq!(
            split("test\\.key.subkey"),
            ("test.key".to_string(), "subkey".to_string())
        );
    }

    #[test]
    fn test_escaped_backslash_before_dot_is_boundary() {
        assert_eq!(split("test\\\\.key"), ("test\\".to_string(), "key".to_string()));
        assert_eq!(
            split("test\\\\\\\\.key"),
            ("test\\\\".to_string(), "key".to_string())
        );
    }

    #[test]
    fn test_odd_backslash_run_protects_dot() {
        assert_eq!(
            split("test\\\\\\.key.subkey"),
            ("test\\.key".to_string(), "subkey".to_string())
        );
    }

    #[test]
    fn test_remainder_keeps_escapes() {
        assert_eq!(
            split("first.second\\.part.third"),
            ("first".to_string(), "second\\.part.third".to_string())
        );
    }

    #[test]
    fn test_backslash_before_other_characters() {
        assert_eq!(split("a\\b.c"), ("a\\b".to_string(), "c".to_string()));
        assert_eq!(split("a\\\\b"), ("a\\b".to_string(), String::new()));
        assert_eq!(split("trailing\\"), ("trailing\\".to_string(), String::new()));
    }

    #[test]
    fn test_leading_and_trailing_dots() {
        assert_eq!(split(".key"), (String::new(), "key".to_string()));
        assert_eq!(split("key."), ("key".to_string(), String::new()));
    }

    #[test]
    fn test_unicode_segments() {
        assert_eq!(split("grüße.welt"), ("grüße".to_string(), "welt".to_string()));
    }

    #[test]
    fn test_split_key_path() {
        assert_eq!(split_key_path("page.10.value"), vec!["page", "10", "value"]);
        assert_eq!(split_key_path("a\\.b.c"), vec!["a.b", "c"]);
        assert_eq!(split_key_path(""), vec![""]);
    }

    #[test]
    fn test_plain_keys_rejoin() {
        for key in ["lib.menu.wrap", "a.b", "config.no_cache"] {
            let (segment, remainder) = split(key);
            assert_eq!(format!("{}.{}", segment, remainder), key);
        }
    }

    #[test]
    fn test_escape_round_trip() {
        let segments = ["file.ext", "back\\slash", "ends\\", "plain"];
        let key = segments
            .iter()
            .map(|s| escape_key_segment(s))
            .collect::<Vec<_>>()
            .join(".");
        assert_eq!(split_key_path(&key), segments);
    }
}
