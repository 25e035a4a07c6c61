//! Declaration options forwarded to the customization engine.

use crate::error::UsageError;
use crate::store::{CustomType, Setter};

/// A keyword option attached to a setting declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomOption {
	/// Customization group the setting belongs to.
	Group(String),
	/// Short label shown instead of the setting name.
	Tag(String),
	/// Release in which the setting or its default last changed.
	Version(String),
	/// Reference to related documentation.
	Link(String),
	/// Feature to load before the setting is meaningful. Recorded in the
	/// required-feature set rather than forwarded.
	Require(String),
	/// The value may be dangerous to apply from an untrusted file.
	Risky,
	/// Any value of the right type is safe to apply.
	Safe,
	/// Custom type tag. Reserved when declaring keymaps.
	Type(CustomType),
	/// Setter. Reserved when declaring keymaps.
	Set(Setter),
}

impl CustomOption {
	/// The option's keyword.
	pub fn key(&self) -> &'static str {
		match self {
			CustomOption::Group(_) => "group",
			CustomOption::Tag(_) => "tag",
			CustomOption::Version(_) => "version",
			CustomOption::Link(_) => "link",
			CustomOption::Require(_) => "require",
			CustomOption::Risky => "risky",
			CustomOption::Safe => "safe",
			CustomOption::Type(_) => "type",
			CustomOption::Set(_) => "set",
		}
	}

	/// Options the keymap declaration layer fixes itself.
	pub fn is_reserved(&self) -> bool {
		matches!(self, CustomOption::Type(_) | CustomOption::Set(_))
	}
}

/// Rejects reserved options in a keymap declaration for `name`.
///
/// Runs before the declaration touches any binding or record.
pub fn validate_options(name: &str, options: &[CustomOption]) -> Result<(), UsageError> {
	match options.iter().find(|option| option.is_reserved()) {
		Some(option) => Err(UsageError::ReservedOption {
			name: name.to_string(),
			option: option.key(),
		}),
		None => Ok(()),
	}
}

/// Separates `Require` options from the ones forwarded to the record.
pub(crate) fn split_requirements(options: Vec<CustomOption>) -> (Vec<String>, Vec<CustomOption>) {
	let mut required = Vec::new();
	let mut forwarded = Vec::new();
	for option in options {
		match option {
			CustomOption::Require(feature) => required.push(feature),
			other => forwarded.push(other),
		}
	}
	(required, forwarded)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::setter::KEYMAP_SETTER;

	#[rstest]
	#[case(CustomOption::Type(CustomType::Integer), "type")]
	#[case(CustomOption::Type(CustomType::Keymap), "type")]
	#[case(CustomOption::Set(KEYMAP_SETTER), "set")]
	fn test_reserved_options_are_rejected(#[case] option: CustomOption, #[case] key: &'static str) {
		let options = vec![CustomOption::Group("keyboard".into()), option];
		let err = validate_options("my-map", &options).unwrap_err();
		assert_eq!(
			err,
			UsageError::ReservedOption {
				name: "my-map".into(),
				option: key,
			}
		);
	}

	#[test]
	fn test_forwardable_options_pass() {
		let options = vec![
			CustomOption::Group("keyboard".into()),
			CustomOption::Version("0.2".into()),
			CustomOption::Require("dired".into()),
			CustomOption::Risky,
		];
		assert_eq!(validate_options("my-map", &options), Ok(()));
	}

	#[test]
	fn test_split_requirements() {
		let (required, forwarded) = split_requirements(vec![
			CustomOption::Require("dired".into()),
			CustomOption::Safe,
			CustomOption::Require("dired-x".into()),
		]);
		assert_eq!(required, vec!["dired", "dired-x"]);
		assert_eq!(forwarded, vec![CustomOption::Safe]);
	}
}
