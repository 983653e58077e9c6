//! String escape processing.

/// Apply `\" \\ \n \t \r`. Any other escape keeps its backslash and the
/// following character is taken as written.
pub(crate) fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            _ => {
                result.push('\\');
                continue;
            }
        }
        chars.next();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::unescape;

    #[test]
    fn known_escapes() {
        assert_eq!(unescape(r#"a\"b\\c\nd\te\rf"#), "a\"b\\c\nd\te\rf");
    }

    #[test]
    fn unknown_escape_keeps_backslash() {
        assert_eq!(unescape(r"\q"), r"\q");
        assert_eq!(unescape(r"\0"), r"\0");
    }

    #[test]
    fn trailing_backslash_is_kept() {
        assert_eq!(unescape("abc\\"), "abc\\");
    }

    #[test]
    fn non_ascii_passes_through() {
        assert_eq!(unescape("çğış\\n"), "çğış\n");
    }
}
