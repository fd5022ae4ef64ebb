//! The insert catalog.
//!
//! [`Catalog`] is the ordered registry of insert types known to the layout
//! engine. Registration validates each descriptor and fails fast, so a
//! catalog that exists is always usable. Registration order matters: the
//! fill loop enumerates inserts in catalog order and breaks score ties in
//! favour of the type registered first.

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::{
    error::CatalogError,
    geometry::ColumnGeometry,
    insert::{InsertDescriptor, Reference, Side, SlotFootprint},
};

/// Width at which a pull-out desk stops gaining from a wider column.
const DESK_COMFORT_WIDTH: f32 = 40.0;

/// Dense identifier of a registered insert type.
///
/// Ids are positions in registration order, so comparing two ids compares
/// their tie-break rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InsertId(usize);

impl InsertId {
    /// Registration position of this insert type
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for InsertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered, validated registry of insert descriptors.
///
/// # Examples
///
/// ```
/// use shelfwright_core::catalog::Catalog;
/// use shelfwright_core::insert::{InsertDescriptor, Side, SlotFootprint};
///
/// let mut catalog = Catalog::new();
/// let id = catalog
///     .register(
///         InsertDescriptor::new("Basket")
///             .with_footprint(Side::Center, SlotFootprint::new(1, 0)),
///     )
///     .expect("valid descriptor");
///
/// assert_eq!(catalog.id_of("Basket"), Some(id));
/// assert!(catalog.register(InsertDescriptor::new("Basket")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    inserts: IndexMap<String, InsertDescriptor>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from descriptors, registering them in iteration order.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] raised by [`Catalog::register`].
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = InsertDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }

    /// The standard insert set: drawers, pull-out desks, pull-out shelves and
    /// fixed shelves, in that tie-break order.
    pub fn builtin() -> Self {
        Self::from_descriptors(builtin_descriptors())
            .expect("builtin insert descriptors are valid")
    }

    /// Validate and register a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Duplicate`] if an insert with the same name is
    /// already registered, or the descriptor's validation error.
    pub fn register(&mut self, descriptor: InsertDescriptor) -> Result<InsertId, CatalogError> {
        if self.inserts.contains_key(descriptor.name()) {
            return Err(CatalogError::Duplicate(descriptor.name().to_string()));
        }
        descriptor.validate()?;

        let id = InsertId(self.inserts.len());
        debug!(insert = descriptor.name(), id = id.0; "Registered insert");
        self.inserts.insert(descriptor.name().to_string(), descriptor);
        Ok(id)
    }

    /// Look up a descriptor by id
    pub fn get(&self, id: InsertId) -> Option<&InsertDescriptor> {
        self.inserts.get_index(id.0).map(|(_, descriptor)| descriptor)
    }

    /// Look up an insert id by name
    pub fn id_of(&self, name: &str) -> Option<InsertId> {
        self.inserts.get_index_of(name).map(InsertId)
    }

    /// Iterate over all registered inserts in registration order
    pub fn iter(&self) -> impl Iterator<Item = (InsertId, &InsertDescriptor)> {
        self.inserts
            .values()
            .enumerate()
            .map(|(idx, descriptor)| (InsertId(idx), descriptor))
    }

    pub fn len(&self) -> usize {
        self.inserts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
    }
}

/// Desks lose appeal in columns narrower than a comfortable working width.
fn desk_score(base: f32, column: &ColumnGeometry, _anchor: u32) -> f32 {
    base * (column.width() / DESK_COMFORT_WIDTH).min(1.0)
}

fn builtin_descriptors() -> [InsertDescriptor; 4] {
    [
        InsertDescriptor::new("Drawer")
            .with_reference(Reference::Bottom)
            .with_ideal_distance(0.0)
            .with_min_distance(0.0)
            .with_vertical_weight(10.0)
            .with_footprint_all_sides(SlotFootprint::new(2, 1))
            .with_priority(7.0)
            .with_interactive(true),
        InsertDescriptor::new("PullDesk")
            .with_reference(Reference::Bottom)
            .with_ideal_distance(7.0)
            .with_min_distance(6.0)
            .with_vertical_weight(8.0)
            .with_footprint(Side::Center, SlotFootprint::new(1, 1))
            .with_priority(9.0)
            .with_one_per_column(true)
            .with_interactive(true)
            .with_min_column_width(30.0)
            .with_score_override(desk_score),
        InsertDescriptor::new("PullShelf")
            .with_reference(Reference::Bottom)
            .with_ideal_distance(5.0)
            .with_min_distance(3.0)
            .with_vertical_weight(4.0)
            .with_footprint(Side::Center, SlotFootprint::new(1, 0))
            .with_priority(5.0)
            .with_interactive(true),
        InsertDescriptor::new("FixedShelf")
            .with_reference(Reference::Top)
            .with_ideal_distance(3.0)
            .with_min_distance(1.0)
            .with_vertical_weight(2.0)
            .with_footprint(Side::Center, SlotFootprint::new(1, 0))
            .with_priority(3.0)
            .with_fill_per_column(true),
    ]
}
