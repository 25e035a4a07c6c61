//! Declaration layer: settings that are customizable from the moment they are
//! declared.

use std::sync::Arc;

use keycustom_keymap::Keymap;
use tracing::debug;

use crate::customizer::Customizer;
use crate::error::{CustomError, UsageError};
use crate::namespace::{Command, Symbol};
use crate::options::{CustomOption, split_requirements, validate_options};
use crate::setter::{KEYMAP_SETTER, VALUE_SETTER};
use crate::store::{CustomRecord, CustomType, Registration, StandardValue};
use crate::value::Value;

impl Customizer {
	/// Declares `name` as a customizable keymap.
	///
	/// Binds `name` to `default` (or an empty keymap) if it is unbound, then
	/// registers its customization record unless one exists. The record's type
	/// tag and setter are fixed; passing [`CustomOption::Type`] or
	/// [`CustomOption::Set`] is a usage error reported before anything is
	/// changed. [`CustomOption::Require`] options accumulate into the
	/// required-feature set even when the record already existed.
	pub fn declare_resource(
		&self,
		name: &str,
		default: Option<Keymap>,
		documentation: &str,
		options: impl IntoIterator<Item = CustomOption>,
	) -> Result<(), CustomError> {
		let options: Vec<CustomOption> = options.into_iter().collect();
		validate_options(name, &options)?;
		self.check_keymap_slot(name)?;

		let symbol = self.namespace().intern(name);
		if symbol.set_default(|| Value::Keymap(default.unwrap_or_default())) {
			debug!(setting = name, "bound default keymap");
		}

		let (required, forwarded) = split_requirements(options);
		self.register_keymap(&symbol, Some(documentation), forwarded);
		for feature in required {
			self.store().add_required_feature(name, &feature);
		}
		Ok(())
	}

	/// Declares a keymap and a prefix command that dispatches through it.
	///
	/// The keymap is declared as by [`declare_resource`](Self::declare_resource)
	/// under `resource`, or under `command` when no resource name is given. In
	/// the latter case the command symbol itself holds the keymap and no
	/// separate backing symbol exists.
	pub fn declare_prefix_resource(
		&self,
		command: &str,
		resource: Option<&str>,
		default: Option<Keymap>,
		documentation: &str,
		options: impl IntoIterator<Item = CustomOption>,
	) -> Result<(), CustomError> {
		let resource = resource.unwrap_or(command);
		self.declare_resource(resource, default, documentation, options)?;
		self.namespace().intern(command).set_command(Command::Prefix(Arc::from(resource)));
		debug!(command, resource, "declared prefix command");
		Ok(())
	}

	/// Declares a scalar setting.
	///
	/// Keymap defaults are routed to [`declare_resource`](Self::declare_resource).
	/// Scalar settings take their type tag from the default and are assigned
	/// with a plain setter; the reserved options are still rejected. A name
	/// already bound to a value of another kind is rejected with
	/// [`UsageError::MismatchedBinding`].
	pub fn declare_setting(
		&self,
		name: &str,
		default: Value,
		documentation: &str,
		options: impl IntoIterator<Item = CustomOption>,
	) -> Result<(), CustomError> {
		let default = match default {
			Value::Keymap(map) => return self.declare_resource(name, Some(map), documentation, options),
			scalar => scalar,
		};
		let options: Vec<CustomOption> = options.into_iter().collect();
		validate_options(name, &options)?;

		let custom_type = CustomType::of(&default);
		if let Some(existing) = self.store().custom_type(name)
			&& existing != custom_type
		{
			return Err(UsageError::IncompatibleSetting {
				name: name.to_string(),
				existing,
				requested: custom_type,
			}
			.into());
		}
		if let Some(bound) = self.namespace().value(name)
			&& !custom_type.accepts(&bound)
		{
			return Err(UsageError::MismatchedBinding {
				name: name.to_string(),
				expected: custom_type,
				found: bound.type_name(),
			}
			.into());
		}

		let symbol = self.namespace().intern(name);
		symbol.set_default(|| default);

		let (required, forwarded) = split_requirements(options);
		self.store().register_with(symbol.name(), || {
			CustomRecord::new(custom_type, VALUE_SETTER, StandardValue::live(&symbol))
				.with_documentation(Some(documentation))
				.with_options(forwarded)
		});
		for feature in required {
			self.store().add_required_feature(name, &feature);
		}
		Ok(())
	}

	/// Rejects names registered as scalar settings or bound to scalar values.
	pub(crate) fn check_keymap_slot(&self, name: &str) -> Result<(), UsageError> {
		if let Some(existing) = self.store().custom_type(name)
			&& !existing.is_structured()
		{
			return Err(UsageError::IncompatibleSetting {
				name: name.to_string(),
				existing,
				requested: CustomType::Keymap,
			});
		}
		if let Some(symbol) = self.namespace().get(name)
			&& let Some(found) = symbol.type_name()
			&& !symbol.holds_structured()
		{
			return Err(UsageError::NotStructured {
				name: name.to_string(),
				found,
			});
		}
		Ok(())
	}

	/// Creates the keymap record for `symbol` unless one exists.
	pub(crate) fn register_keymap(
		&self,
		symbol: &Arc<Symbol>,
		documentation: Option<&str>,
		options: Vec<CustomOption>,
	) -> Registration {
		let registration = self.store().register_with(symbol.name(), || {
			CustomRecord::new(CustomType::Keymap, KEYMAP_SETTER, StandardValue::live(symbol))
				.with_documentation(documentation)
				.with_options(options)
		});
		if registration == Registration::Created {
			debug!(setting = &**symbol.name(), "registered customizable keymap");
		}
		registration
	}
}
