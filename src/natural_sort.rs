use std::cmp::Ordering;

/// A run of decimal digits, compared by numeric value.
///
/// The raw text is kept so a key can be turned back into the name it came
/// from; `"007"` and `"7"` are equal as numbers but keep their own spelling.
#[derive(Debug, Clone)]
pub struct Digits(String);

impl Digits {
    fn significant(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

impl PartialEq for Digits {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Digits {}

impl PartialOrd for Digits {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Digits {
    fn cmp(&self, other: &Self) -> Ordering {
        // No fixed-width integer: arbitrarily long runs still compare numerically.
        let (a, b) = (self.significant(), other.significant());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Token {
    /// Lower-cased non-digit text
    Text(String),
    Number(Digits),
}

/// Split a name into alternating text and number tokens.
///
/// The sequence always starts and ends with a `Text` token (possibly empty),
/// so two keys never hold a `Text` and a `Number` at the same position.
pub fn natural_sort_key(name: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut digits = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                digits.push(next);
                chars.next();
            }
            tokens.push(Token::Text(std::mem::take(&mut text).to_lowercase()));
            tokens.push(Token::Number(Digits(digits)));
        } else {
            text.push(c);
        }
    }
    tokens.push(Token::Text(text.to_lowercase()));

    tokens
}

/// Stable in-place sort of names in natural order.
pub fn sort_natural<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| natural_sort_key(name.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|token| match token {
                Token::Text(text) => text.as_str(),
                Token::Number(digits) => digits.0.as_str(),
            })
            .collect()
    }

    fn natural_cmp(a: &str, b: &str) -> Ordering {
        natural_sort_key(a).cmp(&natural_sort_key(b))
    }

    #[test]
    fn test_key_rebuilds_name_ignoring_case() {
        for name in ["Track 01 - Intro.MP3", "007", "abc", "", "10abc20", "Ñandú 3"] {
            assert_eq!(rebuild(&natural_sort_key(name)), name.to_lowercase());
        }
    }

    #[test]
    fn test_key_shape() {
        assert_eq!(natural_sort_key(""), vec![Token::Text(String::new())]);
        assert_eq!(natural_sort_key("Intro"), vec![Token::Text("intro".into())]);

        let key = natural_sort_key("item10");
        assert_eq!(key.len(), 3);
        assert_eq!(key[0], Token::Text("item".into()));
        assert_eq!(key[1], Token::Number(Digits("10".into())));
        assert_eq!(key[2], Token::Text(String::new()));

        let key = natural_sort_key("10abc");
        assert_eq!(key[0], Token::Text(String::new()));
        assert!(matches!(key[1], Token::Number(_)));
    }

    #[test]
    fn test_numeric_order() {
        let mut names = vec!["item10", "item2", "item1"];
        sort_natural(&mut names);
        assert_eq!(names, vec!["item1", "item2", "item10"]);
    }

    #[test]
    fn test_case_insensitive_and_leading_zeros() {
        assert_eq!(natural_cmp("Track", "track"), Ordering::Equal);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("disc 9", "Disc 10"), Ordering::Less);
        assert_eq!(
            natural_cmp("99999999999999999999999999999999999999999", "100000000000000000000000000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let mut names = vec!["B1", "b01", "a"];
        sort_natural(&mut names);
        assert_eq!(names, vec!["a", "B1", "b01"]);
    }
}
