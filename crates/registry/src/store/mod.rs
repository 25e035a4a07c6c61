//! Resolution metadata for customizable settings.
//!
//! The [`CustomStore`] holds one [`CustomRecord`] per setting name. Records
//! are created at most once and afterwards only amended: the required-feature
//! set grows, every other field keeps the value from the first registration.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

use crate::error::CustomError;
use crate::namespace::{Namespace, Symbol};
use crate::options::CustomOption;
use crate::value::Value;


/// Custom type tag, used by the engine to pick an editor and a comparison
/// strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomType {
	/// A structured keymap resource.
	Keymap,
	Boolean,
	Integer,
	String,
}

impl CustomType {
	pub fn is_structured(self) -> bool {
		self == CustomType::Keymap
	}

	/// The tag matching a value's kind.
	pub fn of(value: &Value) -> Self {
		match value {
			Value::Keymap(_) => CustomType::Keymap,
			Value::Bool(_) => CustomType::Boolean,
			Value::Int(_) => CustomType::Integer,
			Value::String(_) => CustomType::String,
		}
	}

	/// Returns `true` if `value` can be stored in a setting of this type.
	pub fn accepts(self, value: &Value) -> bool {
		Self::of(value) == self
	}

	pub fn name(self) -> &'static str {
		match self {
			CustomType::Keymap => "keymap",
			CustomType::Boolean => "boolean",
			CustomType::Integer => "integer",
			CustomType::String => "string",
		}
	}
}

impl fmt::Display for CustomType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Function signature for setters.
pub type SetterFn = fn(&Namespace, &str, Value) -> Result<(), CustomError>;

/// The function the engine calls instead of plain assignment when applying a
/// saved value.
///
/// Setters are identified by name; two setters are equal when their names are.
#[derive(Clone, Copy)]
pub struct Setter {
	name: &'static str,
	apply: SetterFn,
}

impl Setter {
	pub const fn new(name: &'static str, apply: SetterFn) -> Self {
		Self { name, apply }
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Assigns `value` to the setting `name` in `ns`.
	pub fn apply(&self, ns: &Namespace, name: &str, value: Value) -> Result<(), CustomError> {
		(self.apply)(ns, name, value)
	}
}

impl PartialEq for Setter {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}

impl Eq for Setter {}

impl fmt::Debug for Setter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Setter").field(&self.name).finish()
	}
}

/// A deferred standard value.
///
/// Evaluating it re-reads the live value of the setting's symbol; it never
/// holds a snapshot.
#[derive(Clone)]
pub struct StandardValue(Arc<dyn Fn() -> Option<Value> + Send + Sync>);

impl StandardValue {
	/// Reads the current value of `symbol` each time it is evaluated.
	pub fn live(symbol: &Arc<Symbol>) -> Self {
		let symbol = Arc::clone(symbol);
		Self(Arc::new(move || symbol.value()))
	}

	/// Evaluates the deferred expression. `None` if the symbol is unbound.
	pub fn evaluate(&self) -> Option<Value> {
		(self.0)()
	}
}

impl fmt::Debug for StandardValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("StandardValue(<deferred>)")
	}
}

/// Registry-owned metadata for one customizable setting.
#[derive(Debug, Clone)]
pub struct CustomRecord {
	pub custom_type: CustomType,
	pub setter: Setter,
	pub standard: StandardValue,
	pub documentation: Option<String>,
	/// Options forwarded to the engine.
	pub options: Vec<CustomOption>,
	/// Features that must be loaded before the setting is guaranteed bound.
	pub required_features: IndexSet<Arc<str>, FxBuildHasher>,
}

impl CustomRecord {
	pub fn new(custom_type: CustomType, setter: Setter, standard: StandardValue) -> Self {
		Self {
			custom_type,
			setter,
			standard,
			documentation: None,
			options: Vec::new(),
			required_features: IndexSet::default(),
		}
	}

	pub fn with_documentation(mut self, documentation: Option<&str>) -> Self {
		self.documentation = documentation.map(str::to_owned);
		self
	}

	pub fn with_options(mut self, options: Vec<CustomOption>) -> Self {
		self.options = options;
		self
	}
}

/// Outcome of [`CustomStore::register_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
	/// A new record was created.
	Created,
	/// A record already existed and was left untouched.
	Existing,
}

/// Metadata store keyed by setting name.
#[derive(Debug, Default)]
pub struct CustomStore {
	records: RwLock<IndexMap<Arc<str>, CustomRecord, FxBuildHasher>>,
}

impl CustomStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates the record for `name` with `make` unless one already exists.
	///
	/// The check and the insert happen under one write lock; `make` is not
	/// called when a record exists.
	pub fn register_with(&self, name: &Arc<str>, make: impl FnOnce() -> CustomRecord) -> Registration {
		let mut records = self.records.write();
		if records.contains_key(&**name) {
			return Registration::Existing;
		}
		records.insert(Arc::clone(name), make());
		Registration::Created
	}

	/// Adds `feature` to the required features of `name`.
	///
	/// Returns `true` if the feature was not yet recorded. Does nothing and
	/// returns `false` when `name` has no record.
	pub fn add_required_feature(&self, name: &str, feature: &str) -> bool {
		let mut records = self.records.write();
		let Some(record) = records.get_mut(name) else {
			return false;
		};
		if record.required_features.contains(feature) {
			return false;
		}
		record.required_features.insert(Arc::from(feature))
	}

	/// Returns a copy of the record for `name`.
	pub fn get(&self, name: &str) -> Option<CustomRecord> {
		self.records.read().get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.records.read().contains_key(name)
	}

	pub fn custom_type(&self, name: &str) -> Option<CustomType> {
		self.records.read().get(name).map(|record| record.custom_type)
	}

	/// Required features of `name` in the order they were first recorded.
	pub fn required_features(&self, name: &str) -> Vec<Arc<str>> {
		self.records
			.read()
			.get(name)
			.map(|record| record.required_features.iter().cloned().collect())
			.unwrap_or_default()
	}

	/// Names of all registered settings, in registration order.
	pub fn names(&self) -> Vec<Arc<str>> {
		self.records.read().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.records.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.read().is_empty()
	}
}
