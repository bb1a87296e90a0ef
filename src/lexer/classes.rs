//! Character alphabet classes for the reverse scanner.
//!
//! The scanner dispatches on closed character sets defined once here. The
//! hot membership test (`is_non_identifier`) is a 128-entry ASCII table
//! built at compile time; everything outside ASCII counts as an identifier
//! character and is validated later by the tokenizer.

/// Punctuation that can participate in an operator token.
pub const OPERATORS: &[char] = &[
    '\\', '<', '>', '+', '-', '*', '/', ':', '=', '|', '&', '~', '^', '%', '!',
];

/// Punctuation after which a fresh expression can start.
pub const STARTER_PUNCTUATION: &[char] = &[',', '(', '[', '{', ';'];

/// Punctuation that terminates an expression without starting a new one.
pub const NON_STARTER_PUNCTUATION: &[char] = &[')', ']', '}', '"', '\'', '.', '$'];

/// Identifier-like words that behave syntactically as operators.
pub const TEXTUAL_OPERATORS: &[&str] = &["when", "not", "and", "or", "in"];

/// Block keywords never reported as a local or var in surround mode.
pub const SURROUND_KEYWORDS: &[&str] = &["do", "end", "after", "else", "catch", "rescue"];

#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

#[inline]
pub fn is_trailing_marker(c: char) -> bool {
    matches!(c, '?' | '!')
}

#[inline]
pub fn is_operator(c: char) -> bool {
    matches!(
        c,
        '\\' | '<' | '>' | '+' | '-' | '*' | '/' | ':' | '=' | '|' | '&' | '~' | '^' | '%' | '!'
    )
}

#[inline]
pub fn is_starter_punctuation(c: char) -> bool {
    matches!(c, ',' | '(' | '[' | '{' | ';')
}

#[inline]
pub fn is_non_starter_punctuation(c: char) -> bool {
    matches!(c, ')' | ']' | '}' | '"' | '\'' | '.' | '$')
}

/// Everything that terminates an identifier character run: trailing markers,
/// operators, punctuation of both families, and spaces.
#[inline]
pub fn is_non_identifier(c: char) -> bool {
    (c as u32) < 128 && NON_IDENTIFIER_TABLE[c as usize]
}

static NON_IDENTIFIER_TABLE: [bool; 128] = build_non_identifier_table();

const fn build_non_identifier_table() -> [bool; 128] {
    let mut table = [false; 128];
    let classes: &[&[char]] = &[
        &['?', '!'],
        OPERATORS,
        STARTER_PUNCTUATION,
        NON_STARTER_PUNCTUATION,
        &[' ', '\t'],
    ];
    let mut i = 0;
    while i < classes.len() {
        let class = classes[i];
        let mut j = 0;
        while j < class.len() {
            table[class[j] as usize] = true;
            j += 1;
        }
        i += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_characters() {
        assert!(!is_non_identifier('a'));
        assert!(!is_non_identifier('Z'));
        assert!(!is_non_identifier('0'));
        assert!(!is_non_identifier('_'));
        assert!(!is_non_identifier('@'));
        assert!(!is_non_identifier('é'));
    }

    #[test]
    fn test_non_identifier_characters() {
        for &c in OPERATORS {
            assert!(is_non_identifier(c), "operator {c:?} must terminate a run");
        }
        for &c in STARTER_PUNCTUATION {
            assert!(is_non_identifier(c));
        }
        for &c in NON_STARTER_PUNCTUATION {
            assert!(is_non_identifier(c));
        }
        assert!(is_non_identifier('?'));
        assert!(is_non_identifier('!'));
        assert!(is_non_identifier(' '));
        assert!(is_non_identifier('\t'));
    }

    #[test]
    fn test_class_overlap() {
        // `!` is both a trailing marker and an operator; `.` is punctuation
        // only, `:` is an operator only.
        assert!(is_trailing_marker('!') && is_operator('!'));
        assert!(!is_operator('.') && is_non_starter_punctuation('.'));
        assert!(is_operator(':') && !is_non_starter_punctuation(':'));
    }
}
