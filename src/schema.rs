// 📐 Warehouse Schema - six tables, fixed DDL, declared once, never migrated
//
// Keys and foreign keys are declared here; whether SQLite enforces the
// foreign keys is decided at load time (see db.rs).

// ============================================================================
// SCHEMA TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Real,
    Text,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: &'static str,
    pub references_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [(&'static str, SqlType)],
    pub foreign_keys: &'static [ForeignKey],
    /// Prepared file this table is loaded from
    pub prepared_file: &'static str,
}

impl TableSchema {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(c, _)| *c == name)
    }

    /// Other tables this one references (self-references excluded)
    pub fn dependencies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.foreign_keys
            .iter()
            .map(|fk| fk.references)
            .filter(move |t| *t != self.name)
    }

    pub fn create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|(name, ty)| {
                if *name == self.primary_key {
                    format!("{} {} PRIMARY KEY", name, ty.as_sql())
                } else {
                    format!("{} {}", name, ty.as_sql())
                }
            })
            .collect();

        lines.extend(self.foreign_keys.iter().map(|fk| {
            format!(
                "FOREIGN KEY ({}) REFERENCES {} ({})",
                fk.column, fk.references, fk.references_column
            )
        }));

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            lines.join(",\n    ")
        )
    }
}

// ============================================================================
// TABLES
// ============================================================================

use SqlType::{Integer, Real, Text};

pub const CUSTOMERS: TableSchema = TableSchema {
    name: "customers",
    primary_key: "CustomerID",
    columns: &[
        ("CustomerID", Integer),
        ("Name", Text),
        ("Region", Text),
        ("JoinDate", Text),
        ("StandardJoinDate", Text),
        ("ReferringCustomer", Integer),
        ("BirthYear", Integer),
    ],
    foreign_keys: &[ForeignKey {
        column: "ReferringCustomer",
        references: "customers",
        references_column: "CustomerID",
    }],
    prepared_file: "customers_data_prepared.csv",
};

pub const PRODUCTS: TableSchema = TableSchema {
    name: "products",
    primary_key: "ProductID",
    columns: &[
        ("ProductID", Integer),
        ("ProductName", Text),
        ("Category", Text),
        ("UnitPrice", Real),
        ("Supplier", Integer),
        ("RemainingInventory", Integer),
    ],
    foreign_keys: &[ForeignKey {
        column: "Supplier",
        references: "suppliers",
        references_column: "SupplierID",
    }],
    prepared_file: "products_data_prepared.csv",
};

pub const SALES: TableSchema = TableSchema {
    name: "sales",
    primary_key: "TransactionID",
    columns: &[
        ("TransactionID", Integer),
        ("CustomerID", Integer),
        ("ProductID", Integer),
        ("StoreID", Integer),
        ("CampaignID", Integer),
        ("SaleAmount", Real),
        ("SaleDate", Text),
        ("State", Text),
        ("Discount", Real),
        ("StateCode", Text),
    ],
    foreign_keys: &[
        ForeignKey {
            column: "CustomerID",
            references: "customers",
            references_column: "CustomerID",
        },
        ForeignKey {
            column: "ProductID",
            references: "products",
            references_column: "ProductID",
        },
        ForeignKey {
            column: "StoreID",
            references: "stores",
            references_column: "StoreID",
        },
        ForeignKey {
            column: "CampaignID",
            references: "campaigns",
            references_column: "CampaignID",
        },
    ],
    prepared_file: "sales_data_prepared.csv",
};

pub const STORES: TableSchema = TableSchema {
    name: "stores",
    primary_key: "StoreID",
    columns: &[("StoreID", Integer), ("StoreName", Text), ("StoreLocation", Text)],
    foreign_keys: &[],
    prepared_file: "stores_data_prepared.csv",
};

pub const CAMPAIGNS: TableSchema = TableSchema {
    name: "campaigns",
    primary_key: "CampaignID",
    columns: &[("CampaignID", Integer), ("CampaignName", Text)],
    foreign_keys: &[],
    prepared_file: "campaigns_data_prepared.csv",
};

pub const SUPPLIERS: TableSchema = TableSchema {
    name: "suppliers",
    primary_key: "SupplierID",
    columns: &[("SupplierID", Integer), ("SupplierName", Text)],
    foreign_keys: &[],
    prepared_file: "suppliers_data_prepared.csv",
};

/// Historical insertion order. Facts (sales) go in before three of the
/// dimensions they reference; only valid while FKs are not enforced.
pub const LOAD_ORDER: [TableSchema; 6] = [CUSTOMERS, PRODUCTS, SALES, SUPPLIERS, STORES, CAMPAIGNS];

/// Every referenced table precedes its referrers
pub const DEPENDENCY_ORDER: [TableSchema; 6] =
    [SUPPLIERS, STORES, CAMPAIGNS, CUSTOMERS, PRODUCTS, SALES];

/// Insertion order for a load
pub fn load_order(enforce_foreign_keys: bool) -> &'static [TableSchema; 6] {
    if enforce_foreign_keys {
        &DEPENDENCY_ORDER
    } else {
        &LOAD_ORDER
    }
}

/// Tables in `order` that are inserted before something they reference
pub fn order_violations(order: &[TableSchema]) -> Vec<(&'static str, &'static str)> {
    let mut violations = Vec::new();
    for (pos, table) in order.iter().enumerate() {
        for dep in table.dependencies() {
            let dep_pos = order.iter().position(|t| t.name == dep);
            if dep_pos.map_or(true, |p| p > pos) {
                violations.push((table.name, dep));
            }
        }
    }
    violations
}

// ============================================================================
// TESTS
// ============================================================================
