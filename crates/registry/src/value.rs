//! Values held by namespace symbols.

use keycustom_keymap::Keymap;
use serde::{Deserialize, Serialize};

/// A runtime value bound to a symbol.
///
/// Keymaps are the only structured kind; the scalar kinds exist so the
/// namespace can hold ordinary settings alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Value {
	Keymap(Keymap),
	Bool(bool),
	Int(i64),
	String(String),
}

impl Value {
	/// Returns `true` for structured resources (keymaps).
	pub fn is_structured(&self) -> bool {
		matches!(self, Value::Keymap(_))
	}

	pub fn as_keymap(&self) -> Option<&Keymap> {
		match self {
			Value::Keymap(map) => Some(map),
			_ => None,
		}
	}

	pub fn into_keymap(self) -> Option<Keymap> {
		match self {
			Value::Keymap(map) => Some(map),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Keymap(_) => "keymap",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::String(_) => "string",
		}
	}
}

impl From<Keymap> for Value {
	fn from(map: Keymap) -> Self {
		Value::Keymap(map)
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Value::Int(n)
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}
