use std::fmt;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Semantic roles
// ---------------------------------------------------------------------------

/// The semantic roles an inventory sheet can carry. Each role is detected
/// by a fixed keyword searched inside lower-cased column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Location,
    Product,
    Quantity,
    UnitPrice,
}

impl Role {
    /// All roles, in detection priority order.
    pub const ALL: [Role; 4] = [
        Role::Location,
        Role::Product,
        Role::Quantity,
        Role::UnitPrice,
    ];

    /// The keyword looked up (as a substring) in column names.
    pub fn keyword(self) -> &'static str {
        match self {
            Role::Location => "sede",
            Role::Product => "producto",
            Role::Quantity => "cantidad",
            Role::UnitPrice => "precio",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

// ---------------------------------------------------------------------------
// ColumnMapping – resolved role → column name correspondence
// ---------------------------------------------------------------------------

/// The columns detected for each role. Every role is independently optional;
/// an absent role simply disables the panels it would feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub location: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
}

impl ColumnMapping {
    pub fn get(&self, role: Role) -> Option<&str> {
        match role {
            Role::Location => self.location.as_deref(),
            Role::Product => self.product.as_deref(),
            Role::Quantity => self.quantity.as_deref(),
            Role::UnitPrice => self.unit_price.as_deref(),
        }
    }

    /// Number of roles that found a column.
    pub fn resolved_count(&self) -> usize {
        Role::ALL.iter().filter(|r| self.get(**r).is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Map each role to the FIRST column (in original column order) whose
/// lower-cased name contains the role keyword as a substring.
///
/// The match is deliberately loose: `Precio_Unitario` matches `precio`, but
/// so does `precio_corregido`. Spreadsheets in the wild rely on this, so the
/// substring semantics must not be tightened to exact equality.
pub fn resolve_columns(columns: &[String]) -> ColumnMapping {
    let find = |keyword: &str| {
        columns
            .iter()
            .find(|col| col.to_lowercase().contains(keyword))
            .cloned()
    };

    ColumnMapping {
        location: find(Role::Location.keyword()),
        product: find(Role::Product.keyword()),
        quantity: find(Role::Quantity.keyword()),
        unit_price: find(Role::UnitPrice.keyword()),
    }
}

/// Convenience wrapper resolving straight from a dataset's header.
pub fn resolve_dataset(dataset: &Dataset) -> ColumnMapping {
    resolve_columns(&dataset.columns)
}
