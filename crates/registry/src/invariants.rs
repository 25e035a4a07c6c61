use std::sync::Arc;

use keycustom_keymap::{Keymap, Lookup, parse_seq};

use crate::error::{CustomError, LoadError, UsageError};
use crate::features::FeatureTable;
use crate::namespace::Command;
use crate::options::CustomOption;
use crate::retrofit::CallOrigin;
use crate::setter::KEYMAP_SETTER;
use crate::store::CustomType;
use crate::value::Value;
use crate::{Applied, Customizer};

fn load_view(cx: &Customizer) -> Result<(), LoadError> {
	let mut map = Keymap::new();
	map.bind_command("q", "view-quit").unwrap();
	cx.namespace().set("view-mode-map", map);
	Ok(())
}

fn load_view_extras(cx: &Customizer) -> Result<(), LoadError> {
	cx.require("view")
}

fn customizer() -> Customizer {
	Customizer::builder()
		.loader(FeatureTable::new().with("view", load_view).with("view-extras", load_view_extras))
		.build()
}

fn features(cx: &Customizer, name: &str) -> Vec<String> {
	cx.required_features(name).iter().map(|f| f.to_string()).collect()
}

/// Must create at most one record per name, keeping the first registration's
/// type tag and setter.
///
/// * Enforced in: `CustomStore::register_with`
/// * Failure symptom: a retrofit replaces a declared keymap's record and its
///   documentation, options and standard value binding are lost.
#[cfg_attr(test, test)]
pub(crate) fn test_record_created_at_most_once() {
	let cx = customizer();
	cx.declare_resource("view-mode-map", None, "Declared first.", [CustomOption::Group("view".into())])
		.unwrap();
	cx.promote_all_bound_resources();
	cx.promote_resource_for_feature(CallOrigin::Interactive, "view", "view-mode-map")
		.unwrap();
	cx.declare_resource("view-mode-map", None, "Declared again.", []).unwrap();

	assert_eq!(cx.customizable_names().len(), 1);
	let record = cx.record("view-mode-map").unwrap();
	assert_eq!(record.custom_type, CustomType::Keymap);
	assert_eq!(record.setter, KEYMAP_SETTER);
	assert_eq!(record.documentation.as_deref(), Some("Declared first."));
}

/// Must accumulate required features as a set.
///
/// * Enforced in: `CustomStore::add_required_feature`
/// * Failure symptom: a saved value is applied before one of the features that
///   shape the keymap is loaded, or the feature list grows duplicates.
#[cfg_attr(test, test)]
pub(crate) fn test_required_features_accumulate_without_duplicates() {
	let cx = customizer();
	cx.promote_resource_for_feature(CallOrigin::Interactive, "view", "view-mode-map")
		.unwrap();
	cx.promote_resource_for_feature(CallOrigin::Interactive, "view-extras", "view-mode-map")
		.unwrap();
	assert_eq!(features(&cx, "view-mode-map"), vec!["view", "view-extras"]);

	cx.promote_resource_for_feature(CallOrigin::Interactive, "view", "view-mode-map")
		.unwrap();
	assert_eq!(features(&cx, "view-mode-map"), vec!["view", "view-extras"]);
}

/// Must evaluate the standard value against the live resource, never a
/// snapshot taken at registration.
///
/// * Enforced in: `StandardValue::live`
/// * Failure symptom: a keymap changed by program code after registration is
///   reported as differing from its standard value.
#[cfg_attr(test, test)]
pub(crate) fn test_standard_value_is_deferred() {
	let cx = customizer();
	cx.namespace().set("help-map", Keymap::new().with_prompt("v1"));
	cx.promote_all_bound_resources();

	let v2 = Keymap::new().with_prompt("v2");
	cx.namespace().set("help-map", v2.clone());

	assert_eq!(cx.standard_value("help-map"), Some(Value::Keymap(v2)));
}

/// Must leave the registry unchanged when the bulk sweep runs a second time.
///
/// * Enforced in: `Customizer::promote_all_bound_resources`
/// * Failure symptom: repeated startup hooks replace records or duplicate
///   entries in the engine's view of customizable settings.
#[cfg_attr(test, test)]
pub(crate) fn test_bulk_sweep_is_idempotent() {
	let cx = customizer();
	cx.namespace().set("global-map", Keymap::new());
	cx.namespace().set("esc-map", Keymap::new());

	cx.promote_all_bound_resources();
	let names = cx.customizable_names();
	let setters: Vec<_> = names.iter().map(|n| cx.record(n).unwrap().setter).collect();

	assert_eq!(cx.promote_all_bound_resources(), 0);
	assert_eq!(cx.customizable_names(), names);
	let again: Vec<_> = names.iter().map(|n| cx.record(n).unwrap().setter).collect();
	assert_eq!(again, setters);
}

/// Must reject reserved options before binding or registering anything.
///
/// * Enforced in: `validate_options`, `Customizer::declare_resource`
/// * Failure symptom: a keymap is registered with a scalar type tag and the
///   engine edits it with the wrong widget or assigns it without its setter.
#[cfg_attr(test, test)]
pub(crate) fn test_reserved_options_rejected_before_mutation() {
	let cx = customizer();
	let err = cx
		.declare_resource("x", None, "doc", [CustomOption::Type(CustomType::String)])
		.unwrap_err();
	assert!(matches!(err, CustomError::Usage(UsageError::ReservedOption { .. })));

	let err = cx
		.declare_resource("x", None, "doc", [CustomOption::Set(crate::VALUE_SETTER)])
		.unwrap_err();
	assert!(matches!(err, CustomError::Usage(UsageError::ReservedOption { .. })));

	assert!(cx.namespace().is_empty());
	assert!(cx.customizable_names().is_empty());
}

/// Must share storage between a prefix command and its keymap when no
/// distinct resource name is given.
///
/// * Enforced in: `Customizer::declare_prefix_resource`
/// * Failure symptom: customizing the keymap has no effect on the prefix
///   command, or a stray backing symbol appears in the namespace.
#[cfg_attr(test, test)]
pub(crate) fn test_prefix_command_storage() {
	let mut map = Keymap::new();
	map.bind_command("a", "alpha").unwrap();

	let cx = customizer();
	cx.declare_prefix_resource("cmd", None, Some(map.clone()), "doc", []).unwrap();
	assert_eq!(cx.keymap("cmd"), Some(map.clone()));
	assert_eq!(cx.namespace().command("cmd"), Some(Command::Prefix(Arc::from("cmd"))));
	assert_eq!(cx.namespace().len(), 1);

	let cx = customizer();
	cx.declare_prefix_resource("cmd", Some("res"), Some(map.clone()), "doc", []).unwrap();
	assert_eq!(cx.keymap("res"), Some(map));
	assert!(!cx.namespace().is_bound("cmd"));
	assert_eq!(cx.dispatch("cmd", &parse_seq("a").unwrap()), Lookup::Command("alpha".into()));
}

/// Must refuse feature-aware promotion from program code without touching
/// the registry or loading the feature.
///
/// * Enforced in: `Customizer::promote_resource_for_feature`
/// * Failure symptom: startup code silently guesses a feature/name pairing and
///   records a wrong dependency.
#[cfg_attr(test, test)]
pub(crate) fn test_interactive_guard() {
	let cx = customizer();
	let err = cx
		.promote_resource_for_feature(CallOrigin::Program, "view", "view-mode-map")
		.unwrap_err();

	assert!(matches!(err, CustomError::InteractiveOnly { .. }));
	assert!(cx.loaded_features().is_empty());
	assert!(cx.namespace().is_empty());
	assert!(cx.customizable_names().is_empty());
}

/// Must defer a saved value until the setting's required features are loaded.
///
/// * Enforced in: `Customizer::apply_saved_value`
/// * Failure symptom: the feature's own initialization later overwrites the
///   user's saved keymap.
#[cfg_attr(test, test)]
pub(crate) fn test_saved_value_waits_for_required_features() {
	let cx = customizer();
	cx.declare_resource("view-mode-map", None, "", [CustomOption::Require("view".into())])
		.unwrap();

	let mut saved = Keymap::new();
	saved.bind_command("x", "user-command").unwrap();

	let applied = cx.apply_saved_value("view-mode-map", saved.clone().into()).unwrap();
	assert_eq!(applied, Applied::Deferred(vec![Arc::from("view")]));
	assert_eq!(cx.keymap("view-mode-map"), Some(Keymap::new()));

	cx.require("view").unwrap();
	assert_eq!(cx.apply_saved_value("view-mode-map", saved.into()).unwrap(), Applied::Set);
	let live = cx.keymap("view-mode-map").unwrap();
	assert_eq!(live.lookup(&parse_seq("x").unwrap(), cx.namespace()), Lookup::Command("user-command".into()));
}
