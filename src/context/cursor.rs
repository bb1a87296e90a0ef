//! Reverse scanner and recognizers.
//!
//! The scanner walks a single line right to left, dispatching on the last
//! non-space character into the recognizers below. Identifier and dot
//! recognition are mutually recursive: a dot hands its left-hand side back
//! to the identifier recognizer, which may find another dot. Recursion
//! depth is bounded by the number of `.` segments in the line.
//!
//! Every function takes and returns a consumed-character count measured
//! from the right edge of the sequence; cursor queries discard it, surround
//! queries use it to compute the token span. The `call_op` flag is set once
//! a caller has committed to "something follows this identifier" (a call,
//! arity, dot right-hand side, or nested alias), which demotes textual
//! operator words from locals to operators.

use crate::lexer::classes::{
    TEXTUAL_OPERATORS, is_non_identifier, is_operator, is_space, is_starter_punctuation,
};
use crate::lexer::{Fixity, IdentKind, OperatorToken, Tokenizer};

use super::{CursorContext, DotInner};

pub(crate) type Scan = (CursorContext, usize);

fn none() -> Scan {
    (CursorContext::None, 0)
}

/// Classify a reversed line. `reversed[0]` is the character just before the
/// cursor.
pub(crate) fn scan_reversed(reversed: &[char], tokenizer: &dyn Tokenizer) -> Scan {
    let (stripped, spaces) = strip_spaces(reversed, 0);

    match stripped {
        // Nothing before the cursor: a fresh expression can start here.
        [] => (CursorContext::Expr, 0),

        // Token-only operators cannot be extended, unless the colon of an
        // operator atom precedes them.
        ['>', '=', rest @ ..] if rest.first() != Some(&':') => (CursorContext::Expr, 0),
        ['>', '-', rest @ ..] if rest.first() != Some(&':') => (CursorContext::Expr, 0),

        // Binary-literal opener.
        ['<', '<', rest @ ..] if rest.first() != Some(&'<') => (CursorContext::Expr, 0),

        [':', rest @ ..] if rest.first() != Some(&':') => unquoted_atom_or_expr(spaces),

        // A dot with nothing before it is ambiguous.
        ['.'] => none(),

        ['.', rest @ ..] if rest.first().is_some_and(|&c| c != '.' && c != ':') => {
            dot(rest, spaces + 1, String::new(), tokenizer)
        }

        // Call and arity suffixes commit to an identifier on their left.
        ['(', rest @ ..] => {
            let (rest, count) = strip_spaces(rest, spaces + 1);
            if rest.is_empty() {
                (CursorContext::Expr, 0)
            } else {
                call(rest, count, tokenizer)
            }
        }
        ['/', rest @ ..] => {
            let (rest, count) = strip_spaces(rest, spaces + 1);
            arity(rest, count, tokenizer)
        }

        [c, ..] if is_starter_punctuation(*c) => (CursorContext::Expr, 0),

        // `flush arg` reads as a call on `flush` once a space separates them.
        _ if spaces > 0 => call(stripped, spaces, tokenizer),

        _ => identifier_context(reversed, 0, false, tokenizer),
    }
}

fn unquoted_atom_or_expr(spaces: usize) -> Scan {
    if spaces == 1 {
        (CursorContext::UnquotedAtom(String::new()), 1)
    } else {
        (CursorContext::Expr, 0)
    }
}

fn call(reversed: &[char], count: usize, tokenizer: &dyn Tokenizer) -> Scan {
    match identifier_context(reversed, count, true, tokenizer) {
        (CursorContext::LocalOrVar(acc), count) => (CursorContext::LocalCall(acc), count),
        (CursorContext::Dot(inside, acc), count) => (CursorContext::DotCall(inside, acc), count),
        (CursorContext::Operator(acc), count) => (CursorContext::OperatorCall(acc), count),
        _ => none(),
    }
}

fn arity(reversed: &[char], count: usize, tokenizer: &dyn Tokenizer) -> Scan {
    match identifier_context(reversed, count, true, tokenizer) {
        (CursorContext::LocalOrVar(acc), count) => (CursorContext::LocalArity(acc), count),
        (CursorContext::Dot(inside, acc), count) => (CursorContext::DotArity(inside, acc), count),
        (CursorContext::Operator(acc), count) => (CursorContext::OperatorArity(acc), count),
        _ => none(),
    }
}

/// Recognize the identifier ending at the right edge of `reversed`.
pub(crate) fn identifier_context(
    reversed: &[char],
    count: usize,
    call_op: bool,
    tokenizer: &dyn Tokenizer,
) -> Scan {
    // Punctuation runs that are identifiers or atoms in their own right.
    match reversed {
        ['.', '.', ':', ..] => return (CursorContext::UnquotedAtom("..".into()), count + 3),
        ['.', '.', '.', ..] => return (CursorContext::LocalOrVar("...".into()), count + 3),
        ['.', ':', ..] => return (CursorContext::UnquotedAtom(".".into()), count + 2),
        ['.', '.', ..] => return (CursorContext::Operator("..".into()), count + 2),
        _ => {}
    }

    // A trailing `?`/`!` is legal exactly once, as the last character.
    let (marker, skipped, count) = match reversed.first() {
        Some(&c) if matches!(c, '?' | '!') => (Some(c), 1, count + 1),
        _ => (None, 0, count),
    };

    let run = reversed[skipped..]
        .iter()
        .take_while(|&&c| !is_non_identifier(c))
        .count();
    if run == 0 {
        // No identifier character before the marker: not an identifier,
        // possibly an operator run.
        return operator_context(reversed, count - skipped, call_op, tokenizer);
    }

    let count = count + run;
    let tail = &reversed[skipped + run..];
    let mut acc: String = reversed[skipped..skipped + run].iter().rev().collect();
    if let Some(marker) = marker {
        acc.push(marker);
    }

    if let Some(rest) = acc.strip_prefix('@') {
        return module_attribute(rest, count, tokenizer);
    }

    if tail.first() == Some(&':') && tail.get(1) != Some(&':') {
        // An unquoted atom candidate, `:acc`.
        let token = tokenizer.tokenize_identifier(&acc);
        return if token.leftover == 0 && token.kind != IdentKind::Other {
            (CursorContext::UnquotedAtom(acc), count + 1)
        } else {
            none()
        };
    }

    if tail.first() == Some(&'?') {
        // An interior `?` is illegal.
        return none();
    }

    let token = tokenizer.tokenize_identifier(&acc);
    if token.leftover != 0 {
        return none();
    }
    match token.kind {
        // A would-be atom body without its colon.
        IdentKind::Other | IdentKind::Atom => none(),
        _ if token.contains_at => none(),
        IdentKind::Alias => {
            if !token.ascii_only {
                return none();
            }
            match dot_follows(tail, count) {
                Some((rest, count)) => nested_alias(rest, count, acc, tokenizer),
                _ => (CursorContext::Alias(acc), count),
            }
        }
        IdentKind::Identifier => {
            if call_op && TEXTUAL_OPERATORS.contains(&acc.as_str()) {
                return (CursorContext::Operator(acc), count);
            }
            match dot_follows(tail, count) {
                Some((rest, count)) => dot(rest, count, acc, tokenizer),
                _ => (CursorContext::LocalOrVar(acc), count),
            }
        }
    }
}

fn module_attribute(name: &str, count: usize, tokenizer: &dyn Tokenizer) -> Scan {
    if name.is_empty() {
        return (CursorContext::ModuleAttribute(String::new()), count);
    }
    let token = tokenizer.tokenize_identifier(name);
    if token.kind == IdentKind::Identifier && token.leftover == 0 && !token.contains_at {
        (CursorContext::ModuleAttribute(name.to_string()), count)
    } else {
        none()
    }
}

/// A `.` that is not part of `..`, past any spaces.
fn dot_follows(reversed: &[char], count: usize) -> Option<(&[char], usize)> {
    let (rest, count) = strip_spaces(reversed, count);
    if rest.first() == Some(&'.') && rest.get(1) != Some(&'.') {
        Some((&rest[1..], count + 1))
    } else {
        None
    }
}

/// Recognize the left-hand side of a dot whose right-hand side is `acc`.
fn dot(reversed: &[char], count: usize, acc: String, tokenizer: &dyn Tokenizer) -> Scan {
    let (reversed, count) = strip_spaces(reversed, count);
    let (inside, count) = match identifier_context(reversed, count, true, tokenizer) {
        (CursorContext::LocalOrVar(var), count) => (DotInner::Var(var), count),
        (CursorContext::UnquotedAtom(atom), count) => (DotInner::UnquotedAtom(atom), count),
        (CursorContext::Alias(alias), count) => (DotInner::Alias(alias), count),
        (CursorContext::Dot(base, var), count) => (DotInner::Dot(Box::new(base), var), count),
        (CursorContext::ModuleAttribute(attr), count) => (DotInner::ModuleAttribute(attr), count),
        _ => return none(),
    };
    (CursorContext::Dot(inside, acc), count)
}

/// Extend an alias leftward across a dot: in `Registry.Local` the segment
/// `Local` is only valid if `Registry` is itself an alias.
fn nested_alias(reversed: &[char], count: usize, acc: String, tokenizer: &dyn Tokenizer) -> Scan {
    let (reversed, count) = strip_spaces(reversed, count);
    match identifier_context(reversed, count, true, tokenizer) {
        (CursorContext::Alias(prev), count) => {
            (CursorContext::Alias(format!("{prev}.{acc}")), count)
        }
        _ => none(),
    }
}

/// Recognize a punctuation operator run ending at the right edge.
fn operator_context(
    reversed: &[char],
    count: usize,
    call_op: bool,
    tokenizer: &dyn Tokenizer,
) -> Scan {
    let run = reversed.iter().take_while(|&&c| is_operator(c)).count();
    if run == 0 {
        return none();
    }
    let acc: String = reversed[..run].iter().rev().collect();
    let count = count + run;
    let tail = &reversed[run..];

    // `^^`, `~~`, and `~` are prefixes of longer operators still being
    // typed; after a dot they read as the chain's right-hand side. Inside
    // an already-qualified context the chain cannot continue.
    if matches!(acc.as_str(), "^^" | "~~" | "~") {
        if let Some((rest, count)) = dot_follows(tail, count) {
            if call_op {
                return none();
            }
            return dot(rest, count, acc, tokenizer);
        }
    }

    match tokenizer.tokenize_operator(&acc) {
        OperatorToken::Atom(name) => (CursorContext::UnquotedAtom(name), count),
        OperatorToken::Operator(op) => {
            if tokenizer.classify_operator(&op) == Fixity::Neither {
                return none();
            }
            match dot_follows(tail, count) {
                Some((rest, count)) => dot(rest, count, acc, tokenizer),
                _ => (CursorContext::Operator(acc), count),
            }
        }
        OperatorToken::Other => none(),
    }
}

pub(crate) fn strip_spaces(reversed: &[char], count: usize) -> (&[char], usize) {
    let spaces = reversed.iter().take_while(|&&c| is_space(c)).count();
    (&reversed[spaces..], count + spaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::SurfaceTokenizer;

    fn scan(fragment: &str) -> Scan {
        let reversed: Vec<char> = fragment.chars().rev().collect();
        scan_reversed(&reversed, &SurfaceTokenizer)
    }

    #[test]
    fn test_consumed_counts() {
        // The count is measured from the right edge and includes every
        // character of the recognized construct, spaces between segments
        // included.
        assert_eq!(scan("flush").1, 5);
        assert_eq!(scan(":timeout").1, 8);
        assert_eq!(scan("@doc").1, 4);
        assert_eq!(scan("server.flush").1, 12);
        assert_eq!(scan("server . flush").1, 14);
        assert_eq!(scan("Registry.Local").1, 14);
    }

    #[test]
    fn test_strip_spaces_counts() {
        let reversed: Vec<char> = "  \t".chars().collect();
        let (rest, count) = strip_spaces(&reversed, 2);
        assert!(rest.is_empty());
        assert_eq!(count, 5);
    }

    #[test]
    fn test_dot_follows_rejects_ranges() {
        // The sequences are reversed: `a..` ends in a range, `a. ` in a
        // lone dot past a space.
        let reversed: Vec<char> = "a..".chars().rev().collect();
        assert!(dot_follows(&reversed, 0).is_none());
        let reversed: Vec<char> = "a. ".chars().rev().collect();
        assert!(dot_follows(&reversed, 0).is_some());
    }
}
