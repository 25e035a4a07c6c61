//! Lazy registry of customizable keymap resources.
//!
//! Keymaps live in a [`Namespace`] of named symbols. A [`Customizer`] turns
//! some of them into customizable settings by attaching a [`CustomRecord`]:
//!
//! - Declaration: [`Customizer::declare_resource`] and the [`declare_keymap!`]
//!   macro register a keymap up front, binding a default if needed
//! - Prefix commands: [`Customizer::declare_prefix_resource`] ties a command to
//!   the keymap it dispatches through
//! - Retrofit: [`Customizer::promote_all_bound_resources`] and
//!   [`Customizer::promote_resource_for_feature`] register keymaps that were
//!   bound by ordinary code
//!
//! Records never snapshot their keymap. The standard value is read from the
//! live symbol each time it is evaluated, so a keymap changed by program code
//! after registration still matches its standard value.

pub use customizer::{Applied, Customizer, CustomizerBuilder};
pub use error::{CustomError, LoadError, Result, UsageError};
pub use features::{FeatureInit, FeatureLoader, FeatureTable, NoFeatures};
pub use keycustom_keymap as keymap;
pub use namespace::{Command, Namespace, Symbol};
pub use options::{CustomOption, validate_options};
pub use retrofit::CallOrigin;
pub use setter::{KEYMAP_SETTER, VALUE_SETTER};
pub use store::{CustomRecord, CustomStore, CustomType, Registration, Setter, SetterFn, StandardValue};
pub use value::Value;

mod customizer;
mod declare;
pub mod error;
pub mod features;
mod macros;
pub mod namespace;
pub mod options;
mod retrofit;
mod setter;
pub mod store;
mod value;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod tests;
