//! Identifier, alias, and atom validation.
//!
//! Identifier classes follow Unicode Standard Annex #31, matching the
//! behavior of the host tokenizer: identifiers start with a lowercase
//! letter or underscore and continue with XID characters, optionally ending
//! in a single `?` or `!`. Aliases start with an uppercase letter, take no
//! trailing marker, and are only usable when ASCII. A `@` after the first
//! character is legal in atom bodies only.

use unicode_ident::{is_xid_continue, is_xid_start};

use super::{IdentKind, IdentToken};

/// Validate `candidate` as an identifier, alias, or atom body.
///
/// The whole sequence must be consumed for the token to be usable;
/// `leftover` reports how many trailing characters were not.
pub fn tokenize_identifier(candidate: &str) -> IdentToken {
    let chars: Vec<char> = candidate.chars().collect();

    let Some(&first) = chars.first() else {
        return not_a_token(0);
    };

    let mut kind = if first.is_uppercase() {
        IdentKind::Alias
    } else if first == '_' || is_xid_start(first) {
        IdentKind::Identifier
    } else {
        return not_a_token(chars.len());
    };

    let mut contains_at = false;
    let mut consumed = 1;

    while consumed < chars.len() {
        let c = chars[consumed];
        if is_xid_continue(c) {
            consumed += 1;
        } else if c == '@' {
            // Only atoms may carry a `@` in the body.
            contains_at = true;
            kind = IdentKind::Atom;
            consumed += 1;
        } else if matches!(c, '?' | '!') && kind != IdentKind::Alias {
            // A single trailing marker closes the token.
            consumed += 1;
            break;
        } else {
            break;
        }
    }

    IdentToken {
        kind,
        leftover: chars.len() - consumed,
        ascii_only: chars[..consumed].iter().all(char::is_ascii),
        contains_at,
    }
}

fn not_a_token(leftover: usize) -> IdentToken {
    IdentToken {
        kind: IdentKind::Other,
        leftover,
        ascii_only: true,
        contains_at: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(s: &str) -> IdentKind {
        tokenize_identifier(s).kind
    }

    #[test]
    fn test_plain_identifiers() {
        assert_eq!(kind_of("flush"), IdentKind::Identifier);
        assert_eq!(kind_of("_buf"), IdentKind::Identifier);
        assert_eq!(kind_of("x1"), IdentKind::Identifier);
        assert_eq!(tokenize_identifier("flush").leftover, 0);
    }

    #[test]
    fn test_trailing_markers() {
        assert_eq!(kind_of("valid?"), IdentKind::Identifier);
        assert_eq!(kind_of("save!"), IdentKind::Identifier);
        assert_eq!(tokenize_identifier("valid?").leftover, 0);
        // The marker closes the token; anything after is leftover.
        assert_eq!(tokenize_identifier("valid?x").leftover, 1);
    }

    #[test]
    fn test_aliases() {
        let token = tokenize_identifier("Registry");
        assert_eq!(token.kind, IdentKind::Alias);
        assert!(token.ascii_only);
        // Aliases take no trailing marker.
        assert_eq!(tokenize_identifier("Registry?").leftover, 1);
    }

    #[test]
    fn test_non_ascii_alias_flagged() {
        let token = tokenize_identifier("Ödyssey");
        assert_eq!(token.kind, IdentKind::Alias);
        assert!(!token.ascii_only);
        assert_eq!(token.leftover, 0);
    }

    #[test]
    fn test_unicode_identifier() {
        let token = tokenize_identifier("café");
        assert_eq!(token.kind, IdentKind::Identifier);
        assert!(!token.ascii_only);
        assert_eq!(token.leftover, 0);
    }

    #[test]
    fn test_at_demotes_to_atom() {
        let token = tokenize_identifier("node@host");
        assert_eq!(token.kind, IdentKind::Atom);
        assert!(token.contains_at);
        assert_eq!(token.leftover, 0);

        let token = tokenize_identifier("Node@host");
        assert_eq!(token.kind, IdentKind::Atom);
        assert!(token.contains_at);
    }

    #[test]
    fn test_rejects_non_starters() {
        assert_eq!(kind_of("1abc"), IdentKind::Other);
        assert_eq!(kind_of(""), IdentKind::Other);
        assert_eq!(tokenize_identifier("1abc").leftover, 4);
    }
}
