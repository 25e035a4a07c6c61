//! Key event representation.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator between modifiers and the key in a node (`ctrl-x`).
pub const KEY_SEP: char = '-';

bitflags::bitflags! {
	/// Modifier keys held while a key is pressed.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
	pub struct Modifiers: u8 {
		/// Control key.
		const CTRL = 1 << 0;
		/// Alt / meta key.
		const ALT = 1 << 1;
		/// Shift key.
		const SHIFT = 1 << 2;
		/// Super / command key.
		const SUPER = 1 << 3;
	}
}

impl Modifiers {
	/// Notation names in canonical display order.
	const NAMES: [(Modifiers, &'static str); 4] = [
		(Modifiers::CTRL, "ctrl"),
		(Modifiers::ALT, "alt"),
		(Modifiers::SHIFT, "shift"),
		(Modifiers::SUPER, "super"),
	];

	/// Parses a single modifier name such as `ctrl` or `cmd`.
	pub(crate) fn from_notation(name: &str) -> Option<Self> {
		match name {
			"ctrl" | "c" => Some(Self::CTRL),
			"alt" | "meta" | "m" => Some(Self::ALT),
			"shift" | "s" => Some(Self::SHIFT),
			"super" | "cmd" => Some(Self::SUPER),
			_ => None,
		}
	}
}

/// A key identifier without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
	Backspace,
	Delete,
	Down,
	End,
	Enter,
	Esc,
	Home,
	Insert,
	Left,
	PageDown,
	PageUp,
	Right,
	Space,
	Tab,
	Up,
	/// Function key `f1` through `f35`.
	F(u8),
	/// A printable ASCII character.
	Char(char),
}

impl Key {
	fn name(self) -> Option<&'static str> {
		Some(match self {
			Key::Backspace => "backspace",
			Key::Delete => "del",
			Key::Down => "down",
			Key::End => "end",
			Key::Enter => "enter",
			Key::Esc => "esc",
			Key::Home => "home",
			Key::Insert => "insert",
			Key::Left => "left",
			Key::PageDown => "pagedown",
			Key::PageUp => "pageup",
			Key::Right => "right",
			Key::Space => "space",
			Key::Tab => "tab",
			Key::Up => "up",
			Key::F(_) | Key::Char(_) => return None,
		})
	}
}

impl FromStr for Key {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"backspace" | "bs" => Key::Backspace,
			"del" | "delete" => Key::Delete,
			"down" => Key::Down,
			"end" => Key::End,
			"enter" | "ret" | "return" => Key::Enter,
			"esc" | "escape" => Key::Esc,
			"home" => Key::Home,
			"insert" | "ins" => Key::Insert,
			"left" => Key::Left,
			"pagedown" | "pgdn" => Key::PageDown,
			"pageup" | "pgup" => Key::PageUp,
			"right" => Key::Right,
			"space" | "spc" => Key::Space,
			"tab" => Key::Tab,
			"up" => Key::Up,
			_ => return Err(()),
		})
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::F(n) => write!(f, "f{n}"),
			Key::Char(' ') => f.write_str("space"),
			Key::Char(c) => write!(f, "{c}"),
			named => f.write_str(named.name().unwrap_or_default()),
		}
	}
}

/// A single key event: modifiers plus a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Node {
	pub modifiers: Modifiers,
	pub key: Key,
}

impl Node {
	pub const fn new(modifiers: Modifiers, key: Key) -> Self {
		Self { modifiers, key }
	}

	pub const fn ctrl(c: char) -> Self {
		Self::new(Modifiers::CTRL, Key::Char(c))
	}
}

impl From<Key> for Node {
	fn from(key: Key) -> Self {
		Self::new(Modifiers::empty(), key)
	}
}

impl From<char> for Node {
	fn from(c: char) -> Self {
		Key::Char(c).into()
	}
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (flag, name) in Modifiers::NAMES {
			if self.modifiers.contains(flag) {
				write!(f, "{name}{KEY_SEP}")?;
			}
		}
		write!(f, "{}", self.key)
	}
}

impl Serialize for Node {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Node {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(D::Error::custom)
	}
}
