use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_intern_returns_same_handle() {
	let ns = Namespace::new();
	let a = ns.intern("global-map");
	let b = ns.intern("global-map");
	assert!(Arc::ptr_eq(&a, &b));
	assert_eq!(ns.len(), 1);
	assert!(!ns.is_bound("global-map"));
}

#[test]
fn test_set_default_only_binds_once() {
	let ns = Namespace::new();
	let symbol = ns.intern("fill-column");
	assert!(symbol.set_default(|| Value::Int(70)));
	assert!(!symbol.set_default(|| Value::Int(80)));
	assert_eq!(ns.value("fill-column"), Some(Value::Int(70)));
}

#[test]
fn test_handle_observes_later_assignment() {
	let ns = Namespace::new();
	let symbol = ns.intern("mode-map");
	ns.set("mode-map", Keymap::new().with_prompt("first"));
	ns.set("mode-map", Keymap::new().with_prompt("second"));

	let map = symbol.value().and_then(Value::into_keymap).unwrap();
	assert_eq!(map.prompt(), Some("second"));
}

#[test]
fn test_keymap_source_follows_prefix_command() {
	let ns = Namespace::new();
	ns.set("ctl-x-map", Keymap::new().with_prompt("C-x"));
	ns.intern("ctl-x-prefix").set_command(Command::Prefix("ctl-x-map".into()));
	ns.set("fill-column", 70_i64);

	assert_eq!(ns.keymap("ctl-x-prefix").unwrap().prompt(), Some("C-x"));
	assert_eq!(ns.keymap("ctl-x-map").unwrap().prompt(), Some("C-x"));
	assert_eq!(ns.keymap("fill-column"), None);
	assert_eq!(ns.keymap("missing"), None);
}

#[test]
fn test_self_referencing_prefix_without_value_resolves_to_none() {
	let ns = Namespace::new();
	ns.intern("orphan").set_command(Command::Prefix("orphan".into()));
	assert_eq!(ns.keymap("orphan"), None);
}
