//! FILENAME: app/server/src/table.rs
//! Table definitions.
//!
//! A table names its columns once; every column becomes a `FieldRef` whose
//! property is `"<table>.<column>"`, the key records carry on the wire.

use pivot_engine::{FieldRef, ValueDescriptor};

#[derive(Debug, Clone, PartialEq)]
pub struct TableDefinition {
    name: String,
    fields: Vec<FieldRef>,
}

/// Defines a table with the given columns, in order.
pub fn define_table<S: AsRef<str>>(name: &str, columns: &[S]) -> TableDefinition {
    TableDefinition {
        name: name.to_string(),
        fields: columns
            .iter()
            .map(|column| FieldRef::qualified(name, column.as_ref()))
            .collect(),
    }
}

impl TableDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field for `column`, or `None` if the table has no such column.
    pub fn field(&self, column: &str) -> Option<&FieldRef> {
        self.fields.iter().find(|f| f.name == column)
    }

    pub fn fields(&self) -> &[FieldRef] {
        &self.fields
    }

    /// Fully-qualified properties of every column.
    pub fn properties(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.property.clone()).collect()
    }

    /// Count of `column`, the default value descriptor for a pivot.
    pub fn count(&self, column: &str) -> Option<ValueDescriptor> {
        self.field(column).map(FieldRef::count)
    }
}
