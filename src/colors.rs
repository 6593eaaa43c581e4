//! Hoop colors and the registry that names them.
//!
//! Color names are interned once while loading a puzzle. Everything past the
//! loader works with the integer [`Color`] ids, so comparing and hashing hoops
//! never touches a string.

use std::fmt;

use rustc_hash::FxHashMap;

/// Identifier of a hoop color, an index into a [`ColorRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color(u16);

impl Color {
    /// Position of this color in its registry.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Maps color names to [`Color`] ids in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct ColorRegistry {
    names: Vec<String>,
    ids: FxHashMap<String, Color>,
}

impl ColorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, registering it if it is new.
    pub fn intern(&mut self, name: &str) -> Color {
        if let Some(&color) = self.ids.get(name) {
            return color;
        }
        let color = Color(self.names.len() as u16);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), color);
        color
    }

    /// Looks up an already registered name.
    pub fn get(&self, name: &str) -> Option<Color> {
        self.ids.get(name).copied()
    }

    /// Returns the name of `color`.
    ///
    /// Panics if the color came from a different registry.
    pub fn name(&self, color: Color) -> &str {
        &self.names[color.index()]
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Wraps `color` so it prints as its name.
    pub fn display(&self, color: Color) -> ColorName<'_> {
        ColorName {
            registry: self,
            color,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`ColorRegistry::display`].
pub struct ColorName<'a> {
    registry: &'a ColorRegistry,
    color: Color,
}

impl fmt::Display for ColorName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registry.name(self.color))
    }
}
