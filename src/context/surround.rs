//! Surround queries: position adjustment, token collection, span building.
//!
//! A surround query splits the addressed line at the cursor column, walks
//! forward to collect the remainder of the token under the cursor, glues it
//! onto the reversed prefix, and reuses the cursor scanner on the combined
//! sequence. The scanner's consumed count then locates the token's begin
//! and end columns.
//!
//! The split at `column - 1` counts extended grapheme clusters, as do the
//! reported columns; one visible character may be several code points.

use unicode_segmentation::UnicodeSegmentation;

use crate::base::Position;
use crate::lexer::classes::{
    SURROUND_KEYWORDS, TEXTUAL_OPERATORS, is_non_identifier, is_operator, is_space,
    is_trailing_marker,
};
use crate::lexer::Tokenizer;

use super::cursor::scan_reversed;
use super::{CursorContext, SurroundContext, SurroundKind};

pub(crate) fn position_surround_context(
    fragment: &str,
    position: Position,
    tokenizer: &dyn Tokenizer,
) -> Option<SurroundContext> {
    if position.line == 0 || position.column == 0 {
        return None;
    }
    let line = fragment.split('\n').nth(position.line - 1)?;
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    let column = position.column - 1;
    if column > graphemes.len() {
        return None;
    }

    let mut reversed_pre: Vec<char> = graphemes[..column].concat().chars().rev().collect();
    let mut post: Vec<char> = graphemes[column..].concat().chars().collect();
    let narrowed = adjust_position(&mut reversed_pre, &mut post);

    let taken = take_identifier(&post);
    if taken == 0 {
        return operator_surround(&reversed_pre, &post, position.line, tokenizer);
    }

    let reversed: Vec<char> = post[..taken]
        .iter()
        .rev()
        .chain(reversed_pre.iter())
        .copied()
        .collect();
    let (context, offset) = scan_reversed(&reversed, tokenizer);
    let rest = strip_spaces_forward(&post[taken..]);

    let kind = match context {
        CursorContext::Alias(acc) => SurroundKind::Alias(acc),
        CursorContext::Dot(inside, acc) if !acc.is_empty() => SurroundKind::Dot(inside, acc),
        CursorContext::LocalOrVar(acc) => {
            if rest.first() == Some(&'(') {
                SurroundKind::LocalCall(acc)
            } else if rest.first() == Some(&'/') {
                SurroundKind::LocalArity(acc)
            } else if TEXTUAL_OPERATORS.contains(&acc.as_str()) {
                SurroundKind::Operator(acc)
            } else if SURROUND_KEYWORDS.contains(&acc.as_str()) {
                return None;
            } else {
                SurroundKind::LocalOrVar(acc)
            }
        }
        CursorContext::ModuleAttribute(acc) if acc.is_empty() => {
            SurroundKind::Operator("@".to_string())
        }
        CursorContext::ModuleAttribute(acc) => SurroundKind::ModuleAttribute(acc),
        CursorContext::UnquotedAtom(acc) => SurroundKind::UnquotedAtom(acc),
        _ => return None,
    };

    let offset = if narrowed { offset.min(taken) } else { offset };
    Some(build_surround(kind, &reversed, position.line, offset))
}

/// Surround fallback when the cursor sits on punctuation rather than an
/// identifier character.
fn operator_surround(
    reversed_pre: &[char],
    post: &[char],
    line: usize,
    tokenizer: &dyn Tokenizer,
) -> Option<SurroundContext> {
    let taken = take_operator(post);
    if taken == 0 {
        return None;
    }
    let reversed: Vec<char> = post[..taken]
        .iter()
        .rev()
        .chain(reversed_pre.iter())
        .copied()
        .collect();
    let (kind, offset) = match scan_reversed(&reversed, tokenizer) {
        (CursorContext::Operator(acc), offset) => (SurroundKind::Operator(acc), offset),
        (CursorContext::UnquotedAtom(acc), offset) => (SurroundKind::UnquotedAtom(acc), offset),
        _ => return None,
    };
    Some(build_surround(kind, &reversed, line, offset))
}

/// Normalize the cursor split around `:` and `.`.
///
/// Returns whether the cursor was moved onto the right-hand side of a dot,
/// in which case the reported span starts at that identifier rather than at
/// the head of the whole chain.
fn adjust_position(reversed_pre: &mut Vec<char>, post: &mut Vec<char>) -> bool {
    // Cursor on the colon of an atom: pull the colon into the prefix so
    // `:foo` resolves to the atom rather than to what follows.
    if post.first() == Some(&':')
        && post.get(1) != Some(&':')
        && reversed_pre.first() != Some(&':')
    {
        post.remove(0);
        reversed_pre.insert(0, ':');
        return false;
    }

    // Cursor on (or in the spaces before) a lone dot: land on the
    // right-hand identifier.
    let lead = post.iter().take_while(|&&c| is_space(c)).count();
    if post.get(lead) == Some(&'.')
        && post.get(lead + 1).is_none_or(|&c| c != '.' && c != ':')
        && reversed_pre.first() != Some(&'.')
    {
        let trail = post[lead + 1..].iter().take_while(|&&c| is_space(c)).count();
        shift_left(reversed_pre, post, lead + 1 + trail);
        return true;
    }

    // Dot just left of the cursor, past any spaces: step over the spaces
    // so the span starts at the right-hand identifier.
    let pre_spaces = reversed_pre.iter().take_while(|&&c| is_space(c)).count();
    if reversed_pre.get(pre_spaces) == Some(&'.')
        && reversed_pre
            .get(pre_spaces + 1)
            .is_none_or(|&c| c != '.' && c != ':')
    {
        let lead = post.iter().take_while(|&&c| is_space(c)).count();
        shift_left(reversed_pre, post, lead);
        return true;
    }

    false
}

fn shift_left(reversed_pre: &mut Vec<char>, post: &mut Vec<char>, n: usize) {
    for c in post.drain(..n) {
        reversed_pre.insert(0, c);
    }
}

/// Collect the forward remainder of the token under the cursor.
///
/// Takes identifier characters, a single trailing `?`/`!` marker, and
/// `.`-joined uppercase segments extending an alias chain. Returns the
/// number of characters taken from `post`.
fn take_identifier(post: &[char]) -> usize {
    let mut taken = 0;
    while taken < post.len() {
        let c = post[taken];
        if is_trailing_marker(c) {
            // The marker closes the token; no alias chain can follow.
            return taken + 1;
        }
        if is_non_identifier(c) {
            break;
        }
        taken += 1;
    }
    if taken == 0 {
        return 0;
    }

    while post.get(taken) == Some(&'.')
        && post.get(taken + 1).is_some_and(|c| c.is_ascii_uppercase())
    {
        taken += 1;
        taken += post[taken..]
            .iter()
            .take_while(|&&c| !is_non_identifier(c))
            .count();
    }
    taken
}

/// Collect a punctuation run (operator characters plus dots, for `..`).
fn take_operator(post: &[char]) -> usize {
    post.iter()
        .take_while(|&&c| is_operator(c) || c == '.')
        .count()
}

fn strip_spaces_forward(chars: &[char]) -> &[char] {
    let spaces = chars.iter().take_while(|&&c| is_space(c)).count();
    &chars[spaces..]
}

fn build_surround(
    context: SurroundKind,
    reversed: &[char],
    line: usize,
    offset: usize,
) -> SurroundContext {
    let token: String = reversed[..offset].iter().rev().collect();
    let prefix: String = reversed[offset..].iter().rev().collect();
    let begin = prefix.graphemes(true).count() + 1;
    let end = begin + token.graphemes(true).count();
    SurroundContext {
        context,
        begin: Position::new(line, begin),
        end: Position::new(line, end),
    }
}
