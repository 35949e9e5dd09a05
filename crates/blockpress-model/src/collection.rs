//! Collection views: a column schema plus a row set, rendered as tables.

use std::collections::HashMap;

use serde_json::Value;

/// One column of a table view, identified by its property id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct TableProperty {
    pub property: String,
}

impl TableProperty {
    #[must_use]
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }
}

/// A view onto a collection. Only the column order is used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct CollectionView {
    pub id: String,
    pub table_properties: Vec<TableProperty>,
}

/// Schema entry for one property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct ColumnSchema {
    /// Display name shown in the header row.
    pub name: String,
    /// Property type as reported by the source (`"title"`, `"text"`, ...).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: String,
}

/// The collection backing a view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Collection {
    pub id: String,
    pub name: String,
    /// Property id to schema entry.
    pub schema: HashMap<String, ColumnSchema>,
}

impl Collection {
    /// Display name of a property, empty when the schema doesn't list it.
    #[must_use]
    pub fn column_name(&self, property: &str) -> &str {
        self.schema.get(property).map_or("", |c| c.name.as_str())
    }
}

/// One row: property id to raw cell value.
///
/// Cell values are opaque here; an inline parser turns them into spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct CollectionRow {
    pub id: String,
    pub properties: HashMap<String, Value>,
}

/// A view together with its collection and rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct CollectionViewInfo {
    pub view: CollectionView,
    pub collection: Collection,
    pub rows: Vec<CollectionRow>,
}
