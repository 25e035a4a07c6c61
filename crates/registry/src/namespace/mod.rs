//! The program's table of resource handles.
//!
//! Every value the registry can see lives in a [`Symbol`] owned by the
//! [`Namespace`]. Bulk operations iterate this table instead of scanning
//! ambient globals, and deferred standard values hold a handle to the symbol
//! rather than a copy of its value.

use std::sync::Arc;

use indexmap::IndexMap;
use keycustom_keymap::{Keymap, KeymapSource};
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

use crate::value::Value;

#[cfg(test)]
mod tests;

/// An executable definition stored in a symbol's command slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// A prefix command: invoking it dispatches through the keymap held in
	/// the value slot of the named symbol.
	Prefix(Arc<str>),
}

/// A named slot holding an optional value and an optional command.
#[derive(Debug)]
pub struct Symbol {
	name: Arc<str>,
	value: RwLock<Option<Value>>,
	command: RwLock<Option<Command>>,
}

impl Symbol {
	fn new(name: Arc<str>) -> Self {
		Self {
			name,
			value: RwLock::new(None),
			command: RwLock::new(None),
		}
	}

	pub fn name(&self) -> &Arc<str> {
		&self.name
	}

	/// Returns a copy of the current value.
	pub fn value(&self) -> Option<Value> {
		self.value.read().clone()
	}

	pub fn is_bound(&self) -> bool {
		self.value.read().is_some()
	}

	/// Returns `true` if the symbol is bound to a structured resource.
	pub fn holds_structured(&self) -> bool {
		self.value.read().as_ref().is_some_and(Value::is_structured)
	}

	/// Type name of the bound value, if any.
	pub fn type_name(&self) -> Option<&'static str> {
		self.value.read().as_ref().map(Value::type_name)
	}

	/// Assigns the value, replacing any previous one.
	pub fn set(&self, value: Value) {
		*self.value.write() = Some(value);
	}

	/// Binds the value produced by `init` only if the symbol is unbound.
	///
	/// Returns `true` if the symbol was bound by this call.
	pub fn set_default(&self, init: impl FnOnce() -> Value) -> bool {
		let mut slot = self.value.write();
		if slot.is_some() {
			return false;
		}
		*slot = Some(init());
		true
	}

	/// Replaces the value with one computed from the current value, under a
	/// single write lock.
	pub fn update(&self, f: impl FnOnce(Option<&Value>) -> Value) {
		let mut slot = self.value.write();
		let next = f(slot.as_ref());
		*slot = Some(next);
	}

	pub fn command(&self) -> Option<Command> {
		self.command.read().clone()
	}

	pub fn set_command(&self, command: Command) {
		*self.command.write() = Some(command);
	}
}

/// Process-wide table from names to symbol handles.
#[derive(Debug, Default)]
pub struct Namespace {
	symbols: RwLock<IndexMap<Arc<str>, Arc<Symbol>, FxBuildHasher>>,
}

impl Namespace {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the symbol for `name`, creating an unbound one if needed.
	pub fn intern(&self, name: &str) -> Arc<Symbol> {
		if let Some(symbol) = self.get(name) {
			return symbol;
		}
		let key: Arc<str> = Arc::from(name);
		let mut symbols = self.symbols.write();
		symbols.entry(key.clone()).or_insert_with(|| Arc::new(Symbol::new(key))).clone()
	}

	pub fn get(&self, name: &str) -> Option<Arc<Symbol>> {
		self.symbols.read().get(name).cloned()
	}

	pub fn value(&self, name: &str) -> Option<Value> {
		self.get(name)?.value()
	}

	pub fn is_bound(&self, name: &str) -> bool {
		self.get(name).is_some_and(|symbol| symbol.is_bound())
	}

	/// Ordinary assignment, as performed by program code.
	pub fn set(&self, name: &str, value: impl Into<Value>) {
		self.intern(name).set(value.into());
	}

	pub fn command(&self, name: &str) -> Option<Command> {
		self.get(name)?.command()
	}

	/// Snapshot of every symbol handle, in creation order.
	pub fn symbols(&self) -> Vec<Arc<Symbol>> {
		self.symbols.read().values().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.symbols.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.symbols.read().is_empty()
	}
}

impl KeymapSource for Namespace {
	/// Resolves a name to the keymap in its value slot, or failing that, the
	/// keymap its prefix command dispatches through.
	fn keymap(&self, name: &str) -> Option<Keymap> {
		let symbol = self.get(name)?;
		if let Some(Value::Keymap(map)) = symbol.value() {
			return Some(map);
		}
		match symbol.command()? {
			Command::Prefix(target) if *target != *name => self.value(&target)?.into_keymap(),
			Command::Prefix(_) => None,
		}
	}
}
