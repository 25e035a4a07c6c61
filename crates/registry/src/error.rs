//! Error types for the customization registry.

use thiserror::Error;

use crate::store::CustomType;

/// Errors returned by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomError {
	/// The caller misused a declaration or retrofit operation.
	#[error(transparent)]
	Usage(#[from] UsageError),

	/// A retrofit that needs a human to confirm the feature/name pair was
	/// invoked from program code.
	#[error("promoting '{name}' for feature '{feature}' must be invoked interactively")]
	InteractiveOnly {
		/// The feature the caller asked to load.
		feature: String,
		/// The resource the caller asked to promote.
		name: String,
	},

	/// The feature loader failed; passed through unchanged.
	#[error(transparent)]
	Load(#[from] LoadError),

	/// A setter rejected the value it was asked to apply.
	#[error("cannot set '{name}': {reason}")]
	Setter {
		/// The setting being assigned.
		name: String,
		/// Why the value was rejected.
		reason: String,
	},
}

/// Definition-time misuse of the registry.
///
/// These are contract violations by the caller, reported before any binding
/// or metadata is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
	/// The caller supplied an option that the declaration layer fixes itself.
	#[error("option '{option}' is reserved and cannot be given when declaring '{name}'")]
	ReservedOption {
		/// The resource being declared.
		name: String,
		/// The reserved option key.
		option: &'static str,
	},

	/// The name is already registered as a setting of another kind.
	#[error("'{name}' is already a {existing} setting and cannot be declared as {requested}")]
	IncompatibleSetting {
		/// The registered setting.
		name: String,
		/// The type the setting was first registered with.
		existing: CustomType,
		/// The type the caller declared it with.
		requested: CustomType,
	},

	/// The name is bound to a value that is not a keymap.
	#[error("'{name}' holds a {found} value, not a keymap")]
	NotStructured {
		/// The bound resource.
		name: String,
		/// Type name of the value it holds.
		found: &'static str,
	},

	/// A scalar setting was declared over a binding of another kind.
	#[error("'{name}' holds a {found} value, not {expected}")]
	MismatchedBinding {
		/// The bound resource.
		name: String,
		/// The type of the declared setting.
		expected: CustomType,
		/// Type name of the value it holds.
		found: &'static str,
	},

	/// An operation that needs a customization record found none.
	#[error("'{0}' is not a customizable setting")]
	NotCustomizable(String),
}

/// Failures reported by a [`FeatureLoader`](crate::FeatureLoader).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
	/// No feature with this name is known to the loader.
	#[error("cannot find feature '{0}'")]
	NotFound(String),

	/// The feature exists but its initialization failed.
	#[error("loading feature '{feature}' failed: {message}")]
	Failed {
		/// The feature being loaded.
		feature: String,
		/// Loader-provided description of the failure.
		message: String,
	},

	/// The feature was required again while it was still loading.
	#[error("recursive load of feature '{0}'")]
	Recursive(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, CustomError>;
