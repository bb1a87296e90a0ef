//! Cursor and surround context queries.
//!
//! High-level API for editor tooling. Each function is pure: it takes a
//! fragment (and for surround queries a position) and returns a
//! classification, with no I/O and no shared state. Only the last line of a
//! cursor fragment, or the addressed line of a surround fragment, is ever
//! considered; newlines terminate the scan window.

mod cursor;
mod surround;

use tracing::trace;

use crate::base::Position;
use crate::lexer::{SurfaceTokenizer, Tokenizer};

/// Classification of what is being typed at the end of a fragment.
///
/// Incomplete tokens are expected at the right edge: `Registry.fl` is a
/// [`CursorContext::Dot`] even though `fl` is presumably half a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// The cursor is at a position that could start a fresh expression.
    Expr,
    /// The fragment's tail does not form any valid surface construct.
    None,
    /// A module alias, possibly dotted: `Registry.Local`.
    Alias(String),
    /// A plain identifier: local call target or variable.
    LocalOrVar(String),
    /// An identifier followed by `/`, introducing an arity: `flush/`.
    LocalArity(String),
    /// An identifier followed by `(` or a space, introducing a call.
    LocalCall(String),
    /// A `@`-prefixed identifier; empty when only the `@` is typed.
    ModuleAttribute(String),
    /// A `:`-prefixed symbol literal: `:timeout`, `:++`.
    UnquotedAtom(String),
    /// A punctuation or textual operator.
    Operator(String),
    /// An operator followed by `/`.
    OperatorArity(String),
    /// An operator followed by `(` or a space.
    OperatorCall(String),
    /// The right-hand side of a dot chain: `server.fl`.
    Dot(DotInner, String),
    /// A dot chain followed by `/`.
    DotArity(DotInner, String),
    /// A dot chain followed by `(` or a space.
    DotCall(DotInner, String),
}

/// The expression on the left-hand side of a dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotInner {
    Var(String),
    Alias(String),
    ModuleAttribute(String),
    UnquotedAtom(String),
    /// Nested chain, as in `a.b.c` where the inside of the outer dot is
    /// itself `a.b`.
    Dot(Box<DotInner>, String),
}

/// Classification of the complete token surrounding a position.
///
/// Call and arity variants survive only for plain identifiers, where they
/// distinguish a definite call or arity suffix from a bare var; dot chains
/// and operators report their base form because the surrounding expression
/// is assumed complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurroundKind {
    Alias(String),
    LocalOrVar(String),
    LocalArity(String),
    LocalCall(String),
    ModuleAttribute(String),
    UnquotedAtom(String),
    Operator(String),
    Dot(DotInner, String),
}

/// A surround classification with the token's exact column span.
///
/// `end.column - begin.column` equals the grapheme length of the spanned
/// text, and both positions share the queried line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurroundContext {
    pub context: SurroundKind,
    pub begin: Position,
    pub end: Position,
}

/// Classify what is being typed at the end of `fragment`.
///
/// Only the last line is analyzed. Returns [`CursorContext::Expr`] when the
/// cursor could start a fresh expression and [`CursorContext::None`] when
/// the tail is not a valid surface construct.
///
/// # Example
/// ```
/// use fragma::{CursorContext, DotInner, cursor_context};
///
/// assert_eq!(
///     cursor_context("Registry.fl"),
///     CursorContext::Dot(DotInner::Alias("Registry".to_string()), "fl".to_string()),
/// );
/// ```
pub fn cursor_context(fragment: &str) -> CursorContext {
    cursor_context_with(fragment, &SurfaceTokenizer)
}

/// [`cursor_context`] with a caller-supplied [`Tokenizer`].
pub fn cursor_context_with(fragment: &str, tokenizer: &dyn Tokenizer) -> CursorContext {
    let line = fragment.rsplit('\n').next().unwrap_or("");
    let reversed: Vec<char> = line.chars().rev().collect();
    let (context, _) = cursor::scan_reversed(&reversed, tokenizer);
    trace!(?context, "classified cursor context");
    context
}

/// Classify the complete token surrounding `position` (1-based line and
/// column) and report its begin/end columns.
///
/// The column must point at or before the first character of the
/// surrounding expression; a column one past the token, an out-of-range
/// line, or a tail that forms no valid construct all yield `None`.
///
/// # Example
/// ```
/// use fragma::{Position, SurroundKind, surround_context};
///
/// let surround = surround_context("flush", Position::new(1, 1)).unwrap();
/// assert_eq!(surround.context, SurroundKind::LocalOrVar("flush".to_string()));
/// assert_eq!(surround.begin, Position::new(1, 1));
/// assert_eq!(surround.end, Position::new(1, 6));
/// ```
pub fn surround_context(fragment: &str, position: Position) -> Option<SurroundContext> {
    surround_context_with(fragment, position, &SurfaceTokenizer)
}

/// [`surround_context`] with a caller-supplied [`Tokenizer`].
pub fn surround_context_with(
    fragment: &str,
    position: Position,
    tokenizer: &dyn Tokenizer,
) -> Option<SurroundContext> {
    let surround = surround::position_surround_context(fragment, position, tokenizer);
    trace!(?surround, "classified surround context");
    surround
}
