//! Declaration macros.

/// Selects a provided default keymap or none.
#[doc(hidden)]
#[macro_export]
macro_rules! __keymap_default {
	() => {
		::core::option::Option::None
	};
	($default:expr) => {
		::core::option::Option::Some($default)
	};
}

/// Declares a customizable keymap on a [`Customizer`](crate::Customizer).
///
/// Expands to a call to [`Customizer::declare_resource`](crate::Customizer::declare_resource)
/// and evaluates to its `Result`.
///
/// # Example
///
/// ```ignore
/// declare_keymap!(cx, "dired-mode-map", {
///     default: dired_defaults(),
///     doc: "Local keymap for directory listings.",
///     options: [CustomOption::Group("dired".into())],
/// })?;
/// ```
#[macro_export]
macro_rules! declare_keymap {
	($cx:expr, $name:expr, {
		$(default: $default:expr,)?
		doc: $doc:expr
		$(, options: [$($option:expr),* $(,)?])?
		$(,)?
	}) => {
		$cx.declare_resource(
			$name,
			$crate::__keymap_default!($($default)?),
			$doc,
			{
				let options: ::std::vec::Vec<$crate::CustomOption> = ::std::vec![$($($option),*)?];
				options
			},
		)
	};
}
