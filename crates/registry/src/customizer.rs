//! The registry facade.
//!
//! A [`Customizer`] owns the namespace of resource handles, the metadata
//! store and the feature loader. The declaration layer
//! ([`declare_resource`](Customizer::declare_resource)) and the retrofit layer
//! ([`promote_all_bound_resources`](Customizer::promote_all_bound_resources),
//! [`promote_resource_for_feature`](Customizer::promote_resource_for_feature))
//! are implemented on it in their own modules.
//!
//! All methods take `&self`. Locks are held only for the duration of a single
//! table access and never while a feature loader runs, so feature
//! initialization may call back into the registry.

use std::fmt;
use std::sync::Arc;

use keycustom_keymap::{Keymap, Lookup, Node};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{CustomError, LoadError, UsageError};
use crate::features::{Begin, FeatureLoader, FeatureState, NoFeatures};
use crate::namespace::{Command, Namespace};
use crate::store::{CustomRecord, CustomStore};
use crate::value::Value;

/// Outcome of [`Customizer::apply_saved_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
	/// The value was installed through the setting's setter.
	Set,
	/// Required features are not loaded yet; nothing was changed.
	Deferred(Vec<Arc<str>>),
}

/// Registry of customizable resources.
pub struct Customizer {
	namespace: Namespace,
	store: CustomStore,
	features: RwLock<FeatureState>,
	loader: Box<dyn FeatureLoader>,
}

impl Default for Customizer {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl fmt::Debug for Customizer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Customizer")
			.field("symbols", &self.namespace.len())
			.field("settings", &self.store.len())
			.field("loaded", &self.features.read().loaded())
			.finish_non_exhaustive()
	}
}

/// Builder for [`Customizer`].
#[derive(Default)]
pub struct CustomizerBuilder {
	loader: Option<Box<dyn FeatureLoader>>,
	provided: Vec<String>,
}

impl CustomizerBuilder {
	/// Sets the loader used by [`Customizer::require`]. Defaults to
	/// [`NoFeatures`].
	pub fn loader(mut self, loader: impl FeatureLoader + 'static) -> Self {
		self.loader = Some(Box::new(loader));
		self
	}

	/// Marks a feature as loaded from the start.
	pub fn provide(mut self, feature: impl Into<String>) -> Self {
		self.provided.push(feature.into());
		self
	}

	pub fn build(self) -> Customizer {
		let mut features = FeatureState::default();
		for feature in &self.provided {
			features.provide(feature);
		}
		Customizer {
			namespace: Namespace::new(),
			store: CustomStore::new(),
			features: RwLock::new(features),
			loader: self.loader.unwrap_or_else(|| Box::new(NoFeatures)),
		}
	}
}

impl Customizer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn builder() -> CustomizerBuilder {
		CustomizerBuilder::default()
	}

	pub fn namespace(&self) -> &Namespace {
		&self.namespace
	}

	pub fn store(&self) -> &CustomStore {
		&self.store
	}

	/// Loads `feature` unless it is already loaded.
	///
	/// Loader errors are returned unchanged. Requiring a feature from inside
	/// its own initialization fails with [`LoadError::Recursive`].
	pub fn require(&self, feature: &str) -> Result<(), LoadError> {
		if let Begin::AlreadyLoaded = self.features.write().begin(feature)? {
			return Ok(());
		}

		debug!(feature, "loading feature");
		let result = self.loader.load(feature, self);
		self.features.write().finish(feature, result.is_ok());

		if let Err(err) = &result {
			warn!(feature, %err, "feature failed to load");
		}
		result
	}

	/// Records `feature` as loaded without running the loader.
	pub fn provide(&self, feature: &str) {
		if self.features.write().provide(feature) {
			debug!(feature, "feature provided");
		}
	}

	pub fn is_loaded(&self, feature: &str) -> bool {
		self.features.read().is_loaded(feature)
	}

	/// Loaded features in load order.
	pub fn loaded_features(&self) -> Vec<Arc<str>> {
		self.features.read().loaded()
	}

	/// Returns a copy of the customization record for `name`.
	pub fn record(&self, name: &str) -> Option<CustomRecord> {
		self.store.get(name)
	}

	pub fn is_customizable(&self, name: &str) -> bool {
		self.store.contains(name)
	}

	/// Evaluates the deferred standard value of `name`.
	///
	/// `None` if `name` is not customizable or its resource is unbound.
	pub fn standard_value(&self, name: &str) -> Option<Value> {
		self.store.get(name)?.standard.evaluate()
	}

	pub fn required_features(&self, name: &str) -> Vec<Arc<str>> {
		self.store.required_features(name)
	}

	/// Required features of `name` that are not loaded yet.
	pub fn missing_features(&self, name: &str) -> Vec<Arc<str>> {
		let features = self.features.read();
		self.store
			.required_features(name)
			.into_iter()
			.filter(|feature| !features.is_loaded(feature))
			.collect()
	}

	/// Names of all customizable settings in registration order.
	pub fn customizable_names(&self) -> Vec<Arc<str>> {
		self.store.names()
	}

	/// Installs a saved value through the setting's setter.
	///
	/// When some of the setting's required features are not loaded, nothing
	/// is changed and the missing features are returned so the caller can
	/// retry after loading them.
	pub fn apply_saved_value(&self, name: &str, value: Value) -> Result<Applied, CustomError> {
		let record = self.store.get(name).ok_or_else(|| UsageError::NotCustomizable(name.to_string()))?;

		let missing = self.missing_features(name);
		if !missing.is_empty() {
			debug!(setting = name, ?missing, "deferring saved value");
			return Ok(Applied::Deferred(missing));
		}

		if !record.custom_type.accepts(&value) {
			return Err(CustomError::Setter {
				name: name.to_string(),
				reason: format!("expected {}, got {}", record.custom_type, value.type_name()),
			});
		}

		record.setter.apply(&self.namespace, name, value)?;
		debug!(setting = name, setter = record.setter.name(), "applied saved value");
		Ok(Applied::Set)
	}

	/// Invokes the prefix command `command` with the key sequence `keys`.
	///
	/// The lookup reads the live keymap the command dispatches through.
	/// Returns [`Lookup::None`] if `command` is not a prefix command.
	pub fn dispatch(&self, command: &str, keys: &[Node]) -> Lookup {
		let Some(Command::Prefix(resource)) = self.namespace.command(command) else {
			return Lookup::None;
		};
		match self.namespace.value(&resource).and_then(Value::into_keymap) {
			Some(keymap) => keymap.lookup(keys, &self.namespace),
			None => Lookup::None,
		}
	}

	/// Returns the live keymap bound to `name`.
	pub fn keymap(&self, name: &str) -> Option<Keymap> {
		self.namespace.value(name)?.into_keymap()
	}
}
