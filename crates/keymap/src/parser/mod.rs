//! Key notation parser.
//!
//! ```text
//! seq       = node (whitespace node)*
//! node      = modifiers* key
//! modifiers = modifier "-"
//! modifier  = "ctrl" | "c" | "alt" | "meta" | "m" | "shift" | "s" | "super" | "cmd"
//! key       = fn-key | named-key | char
//! fn-key    = "f" digit digit?
//! named-key = "esc" | "enter" | "tab" | "space" | ...
//! char      = ascii-char
//! ```

use std::str::FromStr;

use thiserror::Error;

use crate::node::{KEY_SEP, Key, Modifiers, Node};


/// A key notation string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

struct Parser<'a> {
	input: &'a str,
	position: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self { input, position: 0 }
	}

	fn peek(&self) -> Option<char> {
		self.input.chars().next()
	}

	fn peek_at(&self, n: usize) -> Option<char> {
		self.input.chars().nth(n)
	}

	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.position += ch.len_utf8();
		self.input = &self.input[ch.len_utf8()..];
		Some(ch)
	}

	fn is_end(&self) -> bool {
		self.input.is_empty()
	}

	fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
		let len = self.input.find(|ch: char| !predicate(ch)).unwrap_or(self.input.len());
		let (taken, rest) = self.input.split_at(len);
		self.input = rest;
		self.position += len;
		taken
	}

	/// Runs `f`, rewinding to the current position if it yields nothing.
	fn attempt<T>(&mut self, f: impl FnOnce(&mut Parser<'a>) -> Option<T>) -> Option<T> {
		let snapshot = (self.input, self.position);
		let result = f(self);
		if result.is_none() {
			(self.input, self.position) = snapshot;
		}
		result
	}

	fn error(&self, message: impl Into<String>) -> ParseError {
		ParseError {
			message: message.into(),
			position: self.position,
		}
	}
}

/// Parses a single key expression such as `ctrl-x`, `f1` or `esc`.
pub fn parse(s: &str) -> Result<Node, ParseError> {
	let mut parser = Parser::new(s);
	let node = parse_node(&mut parser)?;

	if let Some(ch) = parser.peek() {
		return Err(parser.error(format!("expected end of input, found '{ch}'")));
	}

	Ok(node)
}

/// Parses a whitespace-separated key sequence such as `ctrl-x ctrl-s`.
pub fn parse_seq(s: &str) -> Result<Vec<Node>, ParseError> {
	let seq = s.split_whitespace().map(parse).collect::<Result<Vec<_>, _>>()?;
	if seq.is_empty() {
		return Err(ParseError {
			message: "empty key sequence".to_string(),
			position: 0,
		});
	}
	Ok(seq)
}

fn parse_node(parser: &mut Parser) -> Result<Node, ParseError> {
	let mut modifiers = Modifiers::empty();
	while let Some(modifier) = parser.attempt(parse_modifier) {
		modifiers |= modifier;
	}

	let key = parse_key(parser)?;
	Ok(Node::new(modifiers, key))
}

fn parse_modifier(parser: &mut Parser) -> Option<Modifiers> {
	let name = parser.take_while(|ch| ch.is_ascii_alphabetic());
	let modifier = Modifiers::from_notation(name)?;
	(parser.next() == Some(KEY_SEP) && !parser.is_end()).then_some(modifier)
}

fn parse_key(parser: &mut Parser) -> Result<Key, ParseError> {
	if let Some(key) = parse_fn_key(parser)? {
		return Ok(key);
	}
	if let Some(key) = parser.attempt(parse_named_key) {
		return Ok(key);
	}
	match parser.peek() {
		Some(ch) if ch.is_ascii() && !ch.is_ascii_whitespace() => {
			parser.next();
			Ok(Key::Char(ch))
		}
		Some(ch) => Err(parser.error(format!("unsupported key character '{ch}'"))),
		None => Err(parser.error("expected a key")),
	}
}

/// Function keys commit once `f` is followed by a digit: `f0` and `f36` are
/// errors rather than falling back to the character `f`.
fn parse_fn_key(parser: &mut Parser) -> Result<Option<Key>, ParseError> {
	if parser.peek() != Some('f') || !parser.peek_at(1).is_some_and(|ch| ch.is_ascii_digit()) {
		return Ok(None);
	}

	let start = parser.position;
	parser.next();
	let digits = parser.take_while(|ch| ch.is_ascii_digit());
	match digits.parse::<u8>() {
		Ok(n) if (1..=35).contains(&n) => Ok(Some(Key::F(n))),
		_ => Err(ParseError {
			message: format!("invalid function key 'f{digits}' (must be f1-f35)"),
			position: start,
		}),
	}
}

fn parse_named_key(parser: &mut Parser) -> Option<Key> {
	let name = parser.take_while(|ch| ch.is_ascii_alphabetic());
	if name.len() < 2 {
		return None;
	}
	name.parse().ok()
}

impl FromStr for Node {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		parse(s)
	}
}
