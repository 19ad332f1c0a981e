//! Parser for textual list encodings found in `image_path` cells.
//!
//! Exports write multi-image rows either as Python-style literals
//! (`['a.jpg', 'b.jpg']`) or as JSON string arrays. Both are accepted. Bare
//! numbers are accepted as elements and kept in their source spelling.

/// Returns true when `text` looks like a list encoding and should be parsed.
pub fn looks_like_list(text: &str) -> bool {
    text.trim_start().starts_with('[')
}

/// Parses a textual list encoding into its element strings.
///
/// Returns `None` for anything that is not a well-formed list literal; callers
/// decide how to degrade.
pub fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let mut parser = Parser::new(text.trim());
    let items = parser.list()?;
    parser.skip_whitespace();
    if parser.peek().is_some() {
        return None;
    }
    Some(items)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn list(&mut self) -> Option<Vec<String>> {
        if self.chars.next()? != '[' {
            return None;
        }
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek()? {
                ']' => {
                    self.chars.next();
                    return Some(items);
                }
                '\'' | '"' => items.push(self.quoted()?),
                c if c == '-' || c == '+' || c.is_ascii_digit() => items.push(self.number()?),
                _ => return None,
            }
            self.skip_whitespace();
            match self.chars.next()? {
                ',' => continue,
                ']' => return Some(items),
                _ => return None,
            }
        }
    }

    fn quoted(&mut self) -> Option<String> {
        let quote = self.chars.next()?;
        let mut out = String::new();
        loop {
            match self.chars.next()? {
                c if c == quote => return Some(out),
                '\\' => out.push(self.escape()?),
                c => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> Option<char> {
        match self.chars.next()? {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '0' => Some('\0'),
            'u' => {
                let hex: String = (0..4).map(|_| self.chars.next()).collect::<Option<_>>()?;
                char::from_u32(u32::from_str_radix(&hex, 16).ok()?)
            }
            other => Some(other),
        }
    }

    fn number(&mut self) -> Option<String> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                out.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        out.parse::<f64>().ok().map(|_| out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_python_literal() {
        assert_eq!(
            parse_list_literal("['a.jpg','b.jpg']"),
            Some(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
        assert_eq!(
            parse_list_literal("[ 'a.jpg' , \"b.jpg\", ]"),
            Some(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
    }

    #[test]
    fn parses_json_array_with_escapes() {
        assert_eq!(
            parse_list_literal(r#"["dir\/a.jpg", "it's.png"]"#),
            Some(vec!["dir/a.jpg".to_string(), "it's.png".to_string()])
        );
    }

    #[test]
    fn parses_empty_and_numeric_lists() {
        assert_eq!(parse_list_literal("[]"), Some(Vec::new()));
        assert_eq!(
            parse_list_literal("[1, 2.5]"),
            Some(vec!["1".to_string(), "2.5".to_string()])
        );
    }

    #[test]
    fn rejects_malformed_encodings() {
        assert_eq!(parse_list_literal("['a.jpg', 'b.jpg'"), None);
        assert_eq!(parse_list_literal("['a.jpg' 'b.jpg']"), None);
        assert_eq!(parse_list_literal("[a.jpg]"), None);
        assert_eq!(parse_list_literal("['a.jpg'] trailing"), None);
        assert_eq!(parse_list_literal("a.jpg"), None);
    }

    #[test]
    fn looks_like_list_ignores_leading_whitespace() {
        assert!(looks_like_list("  ['a']"));
        assert!(!looks_like_list("a.jpg"));
    }
}
