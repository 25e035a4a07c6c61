//! Keymap dispatch tables.
//!
//! A [`Keymap`] maps key events to [`Binding`]s. Lookups that miss in a keymap
//! continue in its parent, which is referenced by name and resolved through a
//! [`KeymapSource`] at lookup time, so replacing the parent's value is seen by
//! every child without rewiring.

use std::collections::HashMap;
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::Node;
use crate::parser::{ParseError, parse_seq};


/// Upper bound on parent and prefix hops during a single lookup.
///
/// Parent chains are wired by name and may form cycles; lookups past this
/// depth resolve to [`Lookup::None`].
const MAX_DEPTH: usize = 64;

/// What a key event is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binding {
	/// Run the named command.
	Command(String),
	/// Continue the sequence in the keymap held by the named prefix command
	/// or resource.
	Prefix(String),
	/// Continue the sequence in an inline nested keymap.
	Keymap(Keymap),
	/// Explicitly unbound; hides any binding in the parent.
	Unbound,
}

/// Resolves keymaps referenced by name (parents and named prefixes).
pub trait KeymapSource {
	/// Returns the current keymap held under `name`, if any.
	fn keymap(&self, name: &str) -> Option<Keymap>;
}

impl KeymapSource for () {
	fn keymap(&self, _name: &str) -> Option<Keymap> {
		None
	}
}

impl<S: BuildHasher> KeymapSource for HashMap<String, Keymap, S> {
	fn keymap(&self, name: &str) -> Option<Keymap> {
		self.get(name).cloned()
	}
}

/// Result of looking up a key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	/// Complete match: run this command.
	Command(String),
	/// The sequence is a prefix of longer bindings; wait for more keys.
	Pending,
	/// No binding.
	None,
}

/// Errors from editing a keymap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeymapError {
	/// Key notation did not parse.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// An attempt to bind an empty key sequence.
	#[error("cannot bind an empty key sequence")]
	EmptySequence,
	/// A multi-key sequence passes through a key that is not an inline prefix.
	#[error("key sequence '{keys}' starts with non-prefix key '{prefix}'")]
	NonPrefixKey { keys: String, prefix: String },
}

/// A dispatch table from key events to bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
	/// Prompt shown while the keymap is waiting for more keys.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	prompt: Option<String>,
	/// Name of the keymap that misses fall back to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	parent: Option<String>,
	#[serde(default)]
	bindings: IndexMap<Node, Binding>,
}

impl Keymap {
	/// Creates an empty keymap with no parent.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
		self.prompt = Some(prompt.into());
		self
	}

	pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	pub fn prompt(&self) -> Option<&str> {
		self.prompt.as_deref()
	}

	pub fn parent(&self) -> Option<&str> {
		self.parent.as_deref()
	}

	pub fn set_parent(&mut self, parent: Option<String>) {
		self.parent = parent;
	}

	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	/// Iterates local bindings in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&Node, &Binding)> {
		self.bindings.iter()
	}

	/// Returns the local binding for a single key event, ignoring the parent.
	pub fn get(&self, node: &Node) -> Option<&Binding> {
		self.bindings.get(node)
	}

	/// Binds a key sequence, creating inline prefix keymaps for intermediate
	/// keys that are unbound.
	///
	/// Returns the binding previously stored at the full sequence.
	pub fn bind(&mut self, keys: &[Node], binding: Binding) -> Result<Option<Binding>, KeymapError> {
		let (last, prefix) = keys.split_last().ok_or(KeymapError::EmptySequence)?;

		let mut map = self;
		for (i, node) in prefix.iter().enumerate() {
			let slot = map.bindings.entry(*node).or_insert_with(|| Binding::Keymap(Keymap::new()));
			map = match slot {
				Binding::Keymap(inner) => inner,
				_ => {
					return Err(KeymapError::NonPrefixKey {
						keys: display_seq(keys),
						prefix: display_seq(&keys[..=i]),
					});
				}
			};
		}

		Ok(map.bindings.insert(*last, binding))
	}

	/// Parses `keys` and binds it to a command.
	pub fn bind_command(&mut self, keys: &str, command: impl Into<String>) -> Result<Option<Binding>, KeymapError> {
		let seq = parse_seq(keys)?;
		self.bind(&seq, Binding::Command(command.into()))
	}

	/// Removes the binding at `keys`, returning it.
	///
	/// Unlike binding [`Binding::Unbound`], this lets the parent's binding
	/// show through again.
	pub fn unbind(&mut self, keys: &[Node]) -> Option<Binding> {
		let (last, prefix) = keys.split_last()?;
		let mut map = self;
		for node in prefix {
			match map.bindings.get_mut(node)? {
				Binding::Keymap(inner) => map = inner,
				_ => return None,
			}
		}
		map.bindings.shift_remove(last)
	}

	/// Looks up a key sequence, following parents and prefixes through `source`.
	pub fn lookup(&self, keys: &[Node], source: &dyn KeymapSource) -> Lookup {
		self.lookup_at(keys, source, 0)
	}

	fn lookup_at(&self, keys: &[Node], source: &dyn KeymapSource, depth: usize) -> Lookup {
		let Some((first, rest)) = keys.split_first() else {
			return Lookup::Pending;
		};
		if depth > MAX_DEPTH {
			return Lookup::None;
		}

		match self.bindings.get(first) {
			Some(Binding::Command(command)) if rest.is_empty() => Lookup::Command(command.clone()),
			Some(Binding::Command(_) | Binding::Unbound) => Lookup::None,
			Some(Binding::Keymap(inner)) => inner.lookup_at(rest, source, depth + 1),
			Some(Binding::Prefix(name)) => match source.keymap(name) {
				Some(inner) => inner.lookup_at(rest, source, depth + 1),
				None => Lookup::None,
			},
			None => match self.parent.as_deref().and_then(|name| source.keymap(name)) {
				Some(parent) => parent.lookup_at(keys, source, depth + 1),
				None => Lookup::None,
			},
		}
	}
}

fn display_seq(keys: &[Node]) -> String {
	keys.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}
