//! Feature loading.
//!
//! A feature is a named unit of program initialization that may bind
//! resources as a side effect. The registry loads features through a
//! [`FeatureLoader`] and remembers which ones have been loaded, so requiring
//! a feature twice runs its initialization once.

use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};

use crate::customizer::Customizer;
use crate::error::LoadError;

#[cfg(test)]
mod tests;

/// Makes a feature's bindings available.
pub trait FeatureLoader: Send + Sync {
	/// Runs the initialization of `feature` against `cx`.
	///
	/// Called at most once per successful load. The loader may call back into
	/// `cx`, including requiring other features.
	fn load(&self, feature: &str, cx: &Customizer) -> Result<(), LoadError>;
}

/// Loader that knows no features.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeatures;

impl FeatureLoader for NoFeatures {
	fn load(&self, feature: &str, _cx: &Customizer) -> Result<(), LoadError> {
		Err(LoadError::NotFound(feature.to_string()))
	}
}

/// Initialization function of a feature in a [`FeatureTable`].
pub type FeatureInit = fn(&Customizer) -> Result<(), LoadError>;

/// In-process loader mapping feature names to initialization functions.
#[derive(Debug, Default, Clone)]
pub struct FeatureTable {
	features: FxHashMap<Arc<str>, FeatureInit>,
}

impl FeatureTable {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, feature: &str, init: FeatureInit) -> Self {
		self.insert(feature, init);
		self
	}

	pub fn insert(&mut self, feature: &str, init: FeatureInit) {
		self.features.insert(Arc::from(feature), init);
	}

	pub fn contains(&self, feature: &str) -> bool {
		self.features.contains_key(feature)
	}
}

impl FeatureLoader for FeatureTable {
	fn load(&self, feature: &str, cx: &Customizer) -> Result<(), LoadError> {
		let init = self.features.get(feature).ok_or_else(|| LoadError::NotFound(feature.to_string()))?;
		init(cx)
	}
}

/// Load bookkeeping owned by the [`Customizer`].
#[derive(Debug, Default)]
pub(crate) struct FeatureState {
	loaded: IndexSet<Arc<str>, FxBuildHasher>,
	loading: FxHashSet<Arc<str>>,
}

/// What [`FeatureState::begin`] decided.
pub(crate) enum Begin {
	AlreadyLoaded,
	Started,
}

impl FeatureState {
	pub(crate) fn is_loaded(&self, feature: &str) -> bool {
		self.loaded.contains(feature)
	}

	pub(crate) fn loaded(&self) -> Vec<Arc<str>> {
		self.loaded.iter().cloned().collect()
	}

	/// Marks `feature` as loading unless it is loaded or already loading.
	pub(crate) fn begin(&mut self, feature: &str) -> Result<Begin, LoadError> {
		if self.loaded.contains(feature) {
			return Ok(Begin::AlreadyLoaded);
		}
		if !self.loading.insert(Arc::from(feature)) {
			return Err(LoadError::Recursive(feature.to_string()));
		}
		Ok(Begin::Started)
	}

	/// Clears the loading mark, recording the feature as loaded on success.
	pub(crate) fn finish(&mut self, feature: &str, ok: bool) {
		self.loading.remove(feature);
		if ok {
			self.provide(feature);
		}
	}

	/// Records `feature` as loaded. Returns `true` if it was not before.
	pub(crate) fn provide(&mut self, feature: &str) -> bool {
		if self.loaded.contains(feature) {
			return false;
		}
		self.loaded.insert(Arc::from(feature))
	}
}
