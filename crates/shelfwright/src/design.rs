//! Design files.
//!
//! A [`Design`] describes one configuration session: the unit the shelf is
//! built into and the drag gestures the user made, in order. Designs are
//! plain serde data, usually read from TOML:
//!
//! ```toml
//! [unit]
//! length = 300.0
//! height = 120.0
//! depth = 60.0
//! wall_thickness = 2.0
//!
//! [[drags]]
//! handle = "right"
//! offset = 25.0
//! ```

use serde::Deserialize;

use crate::{modifier::ModifierKind, shelf::Unit};

/// A unit plus the drag gestures to replay on its shelf.
#[derive(Debug, Clone, Deserialize)]
pub struct Design {
    unit: Unit,
    #[serde(default)]
    drags: Vec<Drag>,
}

impl Design {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            drags: Vec::new(),
        }
    }

    /// Appends a drag gesture (builder style).
    pub fn with_drag(mut self, handle: ModifierKind, offset: f32) -> Self {
        self.drags.push(Drag { handle, offset });
        self
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn drags(&self) -> &[Drag] {
        &self.drags
    }
}

/// One complete drag: grab `handle`, move it by `offset`, release.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Drag {
    #[serde(deserialize_with = "deserialize_handle")]
    handle: ModifierKind,
    offset: f32,
}

impl Drag {
    pub fn handle(&self) -> ModifierKind {
        self.handle
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

fn deserialize_handle<'de, D>(deserializer: D) -> Result<ModifierKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(|_| {
        serde::de::Error::invalid_value(
            serde::de::Unexpected::Str(&name),
            &"one of `left`, `right` or `move`",
        )
    })
}
