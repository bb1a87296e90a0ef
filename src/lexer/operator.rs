//! Operator tables.
//!
//! The operator family is closed, so recognition is a static match over the
//! surface symbols. Three groups matter to the analyzer: unary operators,
//! binary operators, and token-only symbols (`->`, `=>`) that are produced
//! by the tokenizer but cannot be used as a call target or extended at the
//! cursor.

use super::{Fixity, OperatorToken};

/// Operators usable in prefix position.
const UNARY_OPERATORS: &[&str] = &["+", "-", "!", "^", "&", "@", "~~~", "not"];

/// Operators usable in infix position.
const BINARY_OPERATORS: &[&str] = &[
    "=", "+", "-", "*", "/", "++", "--", "+++", "---", "..", "<>", "^^^", "|>", "<<<", ">>>",
    "<<~", "~>>", "<~", "~>", "<~>", "<|>", "<", ">", "<=", ">=", "==", "!=", "=~", "===", "!==",
    "&&", "&&&", "||", "|||", "::", "|", "<-", "\\\\", "when", "and", "or", "in",
];

/// Symbols the tokenizer emits that are neither unary nor binary.
const TOKEN_ONLY_OPERATORS: &[&str] = &["->", "=>"];

/// Classify a complete operator symbol.
pub fn classify_operator(op: &str) -> Fixity {
    if BINARY_OPERATORS.contains(&op) {
        Fixity::Binary
    } else if UNARY_OPERATORS.contains(&op) {
        Fixity::Unary
    } else {
        Fixity::Neither
    }
}

fn is_operator_symbol(run: &str) -> bool {
    UNARY_OPERATORS.contains(&run)
        || BINARY_OPERATORS.contains(&run)
        || TOKEN_ONLY_OPERATORS.contains(&run)
}

/// Tokenize a punctuation run.
///
/// A leading colon over a recognized symbol is an operator atom literal
/// (`:++`); a bare recognized symbol is an operator; anything else (`^^`,
/// `~~`, a lone `~`, unfinished runs) is not a token.
pub fn tokenize_operator(run: &str) -> OperatorToken {
    if let Some(rest) = run.strip_prefix(':') {
        if is_operator_symbol(rest) {
            return OperatorToken::Atom(rest.to_string());
        }
    }
    if is_operator_symbol(run) {
        return OperatorToken::Operator(run.to_string());
    }
    OperatorToken::Other
}
