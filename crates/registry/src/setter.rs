//! Setters applied by the customization engine.

use tracing::debug;

use crate::error::CustomError;
use crate::namespace::Namespace;
use crate::store::Setter;
use crate::value::Value;

/// Setter fixed for every keymap setting.
pub const KEYMAP_SETTER: Setter = Setter::new("keymap", set_keymap);

/// Plain assignment, used for scalar settings.
pub const VALUE_SETTER: Setter = Setter::new("value", set_value);

/// Installs a keymap, keeping the live keymap's parent when the new value
/// names none.
///
/// Saved keymaps usually carry only bindings; the parent link is wiring set up
/// by the program and must survive the override.
fn set_keymap(ns: &Namespace, name: &str, value: Value) -> Result<(), CustomError> {
	let found = value.type_name();
	let Value::Keymap(mut keymap) = value else {
		return Err(CustomError::Setter {
			name: name.to_string(),
			reason: format!("expected a keymap, got {found}"),
		});
	};

	ns.intern(name).update(|current| {
		if keymap.parent().is_none()
			&& let Some(parent) = current.and_then(Value::as_keymap).and_then(|map| map.parent())
		{
			debug!(setting = name, parent, "keeping keymap parent");
			keymap.set_parent(Some(parent.to_owned()));
		}
		Value::Keymap(keymap)
	});
	Ok(())
}

fn set_value(ns: &Namespace, name: &str, value: Value) -> Result<(), CustomError> {
	ns.set(name, value);
	Ok(())
}
