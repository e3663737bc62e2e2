//! POSIX shell quoting.
//!
//! Matches Python's `shlex.quote`: words made only of `A-Za-z0-9_@%+=:,./-`
//! pass through bare, the empty word becomes `''`, and anything else is
//! wrapped in single quotes with each embedded `'` written as `'"'"'`.

use std::borrow::Cow;

/// Quote a single word so the shell reads it back as exactly one argument.
pub fn quote(word: &str) -> Cow<'_, str> {
    if word.is_empty() {
        return Cow::Borrowed("''");
    }
    if word.bytes().all(is_safe) {
        return Cow::Borrowed(word);
    }

    let mut out = String::with_capacity(word.len() + 2);
    out.push('\'');
    for (i, part) in word.split('\'').enumerate() {
        if i > 0 {
            out.push_str("'\"'\"'");
        }
        out.push_str(part);
    }
    out.push('\'');
    Cow::Owned(out)
}

/// Quote every word and join them with single spaces.
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for word in words {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&quote(word.as_ref()));
    }
    out
}

fn is_safe(b: u8) -> bool {
    matches!(
        b,
        b'a'..=b'z'
            | b'A'..=b'Z'
            | b'0'..=b'9'
            | b'_'
            | b'@'
            | b'%'
            | b'+'
            | b'='
            | b':'
            | b','
            | b'.'
            | b'/'
            | b'-'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_words_are_left_bare() {
        assert_eq!(quote("curl"), "curl");
        assert_eq!(quote("-X"), "-X");
        assert_eq!(quote("http://example.com/a,b@c%20+d=e"), "http://example.com/a,b@c%20+d=e");
    }

    #[test]
    fn empty_word_is_quoted() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn spaces_and_metacharacters_are_single_quoted() {
        assert_eq!(quote("User-Agent: test"), "'User-Agent: test'");
        assert_eq!(quote("$HOME"), "'$HOME'");
        assert_eq!(quote("a&b;c|d"), "'a&b;c|d'");
        assert_eq!(quote("http://x/?a=1&b=2"), "'http://x/?a=1&b=2'");
    }

    #[test]
    fn embedded_single_quotes() {
        assert_eq!(quote("it's"), "'it'\"'\"'s'");
        assert_eq!(quote("'"), "''\"'\"''");
    }

    #[test]
    fn non_ascii_is_quoted() {
        assert_eq!(quote("héllo"), "'héllo'");
    }

    #[test]
    fn join_separates_with_single_spaces() {
        assert_eq!(join(["curl", "-d", ""]), "curl -d ''");
        assert_eq!(join(Vec::<String>::new()), "");
    }
}
