//! Parser combinators for the request grammar.
//!
//! The grammar is a fixed run of exactly four decimal numbers separated by
//! whitespace, so the combinator algebra is tiny: one `Number` primitive and
//! one `Sequence` combinator that chains two parsers left-to-right. There is
//! no alternation and therefore no backtracking.
//!
//! Parsers are pure: each step takes a `ParseState` by value and returns a new
//! one (offset advanced, token appended) or a `TradeError`. Tokens keep the
//! raw digit text; integer conversion happens at encode time so that overflow
//! policy stays a codec concern.
use crate::error::TradeError;
use crate::result::Result;

/// Kind tag for a parsed token. The request grammar only produces numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A decimal number literal.
    Number,
}

/// A parsed unit of input: a kind tag plus the raw matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was matched.
    pub kind: TokenKind,
    /// The matched digit run, exactly as it appeared in the input.
    pub text: String,
}

impl Token {
    /// Creates a `Number` token from the matched digit text.
    pub fn number(text: impl Into<String>) -> Self {
        Token {
            kind: TokenKind::Number,
            text: text.into(),
        }
    }
}

/// Parsing position and the tokens accumulated so far.
///
/// The input line itself is threaded through `Parser::parse` separately so the
/// state stays a small owned value. Once a token is appended it is never
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseState {
    /// Byte offset of the next unconsumed input character.
    pub offset: usize,
    /// Tokens appended so far, in input order.
    pub tokens: Vec<Token>,
}

impl ParseState {
    /// Fresh state at the start of the input with no tokens.
    pub fn new() -> Self {
        ParseState::default()
    }
}

/// A single parsing step over the shared input line.
pub trait Parser {
    /// Attempts to match at `st.offset` in `input`.
    ///
    /// On success returns the advanced state with any produced token appended.
    /// On failure returns an error without having consumed input.
    fn parse(&self, input: &str, st: ParseState) -> Result<ParseState>;
}

/// Primitive parser for one decimal number literal.
///
/// Matches optional leading whitespace, then one or more ASCII digits, then
/// any trailing whitespace; everything matched is consumed. Fails with
/// `ExpectedNumber` when no digit follows the leading whitespace.
#[derive(Debug, Clone, Copy)]
pub struct Number;

impl Parser for Number {
    fn parse(&self, input: &str, mut st: ParseState) -> Result<ParseState> {
        let rest = &input[st.offset..];
        let lead = rest.len() - rest.trim_start().len();
        let digits = rest[lead..]
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(TradeError::ExpectedNumber);
        }
        let text = &rest[lead..lead + digits];
        let tail = &rest[lead + digits..];
        let trail = tail.len() - tail.trim_start().len();

        st.tokens.push(Token::number(text));
        st.offset += lead + digits + trail;
        Ok(st)
    }
}

/// Runs `first`, then `second` on the state `first` produced.
///
/// If `first` fails its error propagates unchanged. If `first` succeeds and
/// `second` fails, the sequence fails with `second`'s error and the tokens
/// `first` appended are not rolled back; the grammar has no alternation, so
/// nothing ever re-reads a position a failed sequence abandoned.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<P1, P2>(pub P1, pub P2);

impl<P1: Parser, P2: Parser> Parser for Sequence<P1, P2> {
    fn parse(&self, input: &str, st: ParseState) -> Result<ParseState> {
        let st = self.0.parse(input, st)?;
        self.1.parse(input, st)
    }
}

/// The full request grammar: exactly four numbers, left-to-right.
pub fn request_grammar() -> impl Parser {
    Sequence(Number, Sequence(Number, Sequence(Number, Number)))
}

/// Parses one input line into the four request tokens.
///
/// Trailing unconsumed input after the fourth number is tolerated; the
/// grammar does not require end-of-input.
pub fn parse_line(line: &str) -> Result<Vec<Token>> {
    let st = request_grammar().parse(line, ParseState::new())?;
    Ok(st.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_four_numbers() {
        let tokens = parse_line("42 7 100 105").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::number("42"),
                Token::number("7"),
                Token::number("100"),
                Token::number("105"),
            ]
        );
    }

    #[test]
    fn handles_irregular_whitespace() {
        let tokens = parse_line("  1\t2   3 \t 4").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = parse_line("abc").unwrap_err();
        assert_eq!(err.to_string(), "Expected number literal.");
    }

    #[test]
    fn rejects_too_few_numbers() {
        assert!(matches!(
            parse_line("1 2 3"),
            Err(TradeError::ExpectedNumber)
        ));
    }

    #[test]
    fn tolerates_trailing_input() {
        let tokens = parse_line("1 2 3 4 extra garbage").unwrap();
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn number_consumes_surrounding_whitespace() {
        let st = Number.parse("  5  x", ParseState::new()).unwrap();
        assert_eq!(st.offset, 5);
        assert_eq!(st.tokens, vec![Token::number("5")]);
        assert!(matches!(
            Number.parse("  5  x", st),
            Err(TradeError::ExpectedNumber)
        ));
    }

    #[test]
    fn sequence_keeps_tokens_appended_before_the_failure() {
        // first number succeeds and appends; second fails. The intermediate
        // state passed to the failing parser still holds the first token,
        // which is the documented no-rollback behavior.
        let first = Number.parse("7 x", ParseState::new()).unwrap();
        assert_eq!(first.tokens, vec![Token::number("7")]);
        assert!(matches!(
            Sequence(Number, Number).parse("7 x", ParseState::new()),
            Err(TradeError::ExpectedNumber)
        ));
    }
}
