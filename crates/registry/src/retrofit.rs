//! Retrofit layer: promoting keymaps that were bound by ordinary program code
//! into customizable settings after the fact.
//!
//! Both operations create records only for names that have none, and the
//! records they create read the live value of the resource when their
//! standard value is evaluated. [`Customizer::promote_all_bound_resources`]
//! is meant to run once during startup, before saved values are applied.
//! Running it later is harmless but does not repair records created in the
//! meantime.

use tracing::{debug, warn};

use crate::customizer::Customizer;
use crate::error::{CustomError, UsageError};
use crate::store::Registration;

/// How an operation was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOrigin {
	/// A human invoked the operation and confirmed its arguments.
	Interactive,
	/// Program code invoked the operation.
	Program,
}

impl Customizer {
	/// Registers every bound keymap that is not yet a customizable setting.
	///
	/// Iterates the namespace's handle table; each candidate is independent,
	/// so the visiting order does not matter. Returns the number of records
	/// created. A second run creates none.
	pub fn promote_all_bound_resources(&self) -> usize {
		let mut promoted = 0;
		for symbol in self.namespace().symbols() {
			if !symbol.holds_structured() || self.store().contains(symbol.name()) {
				continue;
			}
			if self.register_keymap(&symbol, None, Vec::new()) == Registration::Created {
				promoted += 1;
			}
		}
		debug!(promoted, "promoted bound keymaps");
		promoted
	}

	/// Registers `name` as a customizable keymap that depends on `feature`.
	///
	/// Only valid for [`CallOrigin::Interactive`]; any other origin fails with
	/// [`CustomError::InteractiveOnly`]. Loads `feature` first (which may bind
	/// `name`); a load failure is returned unchanged and nothing is recorded.
	/// The record is created if absent, and `feature` is added to its required
	/// features in every case.
	///
	/// `name` may still be unbound after loading; its record then has no
	/// standard value until something binds it.
	pub fn promote_resource_for_feature(&self, origin: CallOrigin, feature: &str, name: &str) -> Result<(), CustomError> {
		if origin != CallOrigin::Interactive {
			warn!(feature, setting = name, "promotion refused outside interactive use");
			return Err(CustomError::InteractiveOnly {
				feature: feature.to_string(),
				name: name.to_string(),
			});
		}

		self.require(feature)?;
		self.check_keymap_slot(name).map_err(|err: UsageError| {
			warn!(feature, setting = name, %err, "promotion rejected");
			err
		})?;

		let symbol = self.namespace().intern(name);
		self.register_keymap(&symbol, None, Vec::new());
		if self.store().add_required_feature(name, feature) {
			debug!(feature, setting = name, "recorded required feature");
		}
		Ok(())
	}
}
