//! Keymap dispatch tables.
//!
//! Provides the structured resource stored in the customization registry:
//! - Key notation: single keys (`a`), combinations (`ctrl-x`), sequences (`ctrl-x ctrl-s`)
//! - [`Keymap`]: an ordered table from key events to bindings, with an optional
//!   named parent that lookups fall back to
//! - Nested prefixes, either inline or by name through a [`KeymapSource`]

pub use keymap::{Binding, Keymap, KeymapError, KeymapSource, Lookup};
pub use node::{KEY_SEP, Key, Modifiers, Node};
pub use parser::{ParseError, parse, parse_seq};

mod keymap;
mod node;
mod parser;
