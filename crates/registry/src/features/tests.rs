use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

static LOADS: AtomicUsize = AtomicUsize::new(0);

fn counted(cx: &Customizer) -> Result<(), LoadError> {
	LOADS.fetch_add(1, Ordering::SeqCst);
	cx.namespace().set("counted-loaded", true);
	Ok(())
}

fn self_requiring(cx: &Customizer) -> Result<(), LoadError> {
	cx.require("loop")
}

fn requires_base(cx: &Customizer) -> Result<(), LoadError> {
	cx.require("base")?;
	cx.namespace().set("derived-ready", true);
	Ok(())
}

fn base(cx: &Customizer) -> Result<(), LoadError> {
	cx.namespace().set("base-ready", true);
	Ok(())
}

#[test]
fn test_require_runs_initialization_once() {
	let cx = Customizer::builder().loader(FeatureTable::new().with("counted", counted)).build();
	let before = LOADS.load(Ordering::SeqCst);

	cx.require("counted").unwrap();
	cx.require("counted").unwrap();

	assert_eq!(LOADS.load(Ordering::SeqCst) - before, 1);
	assert!(cx.is_loaded("counted"));
	assert!(cx.namespace().is_bound("counted-loaded"));
}

#[test]
fn test_unknown_feature_is_not_found() {
	let cx = Customizer::new();
	assert_eq!(cx.require("nope"), Err(LoadError::NotFound("nope".into())));
	assert!(!cx.is_loaded("nope"));
}

#[test]
fn test_recursive_require_is_rejected() {
	let cx = Customizer::builder().loader(FeatureTable::new().with("loop", self_requiring)).build();
	assert_eq!(cx.require("loop"), Err(LoadError::Recursive("loop".into())));
	assert!(!cx.is_loaded("loop"));
}

#[test]
fn test_nested_require_loads_dependencies() {
	let table = FeatureTable::new().with("derived", requires_base).with("base", base);
	let cx = Customizer::builder().loader(table).build();

	cx.require("derived").unwrap();
	let loaded: Vec<String> = cx.loaded_features().iter().map(|f| f.to_string()).collect();
	assert_eq!(loaded, vec!["base", "derived"]);
	assert!(cx.namespace().is_bound("base-ready"));
	assert!(cx.namespace().is_bound("derived-ready"));
}

#[test]
fn test_provided_features_skip_the_loader() {
	let cx = Customizer::builder().provide("dired").build();
	assert!(cx.is_loaded("dired"));
	assert_eq!(cx.require("dired"), Ok(()));

	cx.provide("ibuffer");
	assert_eq!(cx.loaded_features().len(), 2);
}

#[test]
fn test_feature_table_lookup() {
	let mut table = FeatureTable::new().with("base", base);
	table.insert("derived", requires_base);

	assert!(table.contains("base"));
	assert!(table.contains("derived"));
	assert!(!table.contains("counted"));
}
