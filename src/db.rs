// 🗄️ Warehouse Loader - prepared CSV → SQLite
//
// One run: create schema if absent, then inside a single transaction
// truncate all six tables and bulk-append every prepared file. Any failure
// rolls the whole transaction back; the connection closes on every path.
// With foreign keys enforced, checks are deferred to commit so rows may
// reference rows later in the same file.

use crate::config::EtlConfig;
use crate::entities::FILL_VALUE;
use crate::error::{EtlError, Result, StorageSource};
use crate::frame;
use crate::parser::NullMarkers;
use crate::schema::{self, TableSchema};
use polars::prelude::{AnyValue, DataFrame};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// LOAD REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLoad {
    pub table: String,
    pub rows_inserted: usize,
    pub rows_in_table: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub foreign_keys_enforced: bool,
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    pub fn rows_in(&self, table: &str) -> Option<i64> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| t.rows_in_table)
    }

    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .tables
            .iter()
            .map(|t| format!("{}={}", t.table, t.rows_in_table))
            .collect();
        format!("Warehouse rows: {}", parts.join(", "))
    }
}

// ============================================================================
// CONNECTION + SCHEMA
// ============================================================================

/// Open (or create) the warehouse file, with WAL for crash recovery
pub fn open_warehouse(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EtlError::storage(parent.display(), e))?;
    }

    let conn = Connection::open(path).map_err(|e| EtlError::storage(path.display(), e))?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        .map_err(|e| EtlError::storage(path.display(), e))?;

    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    for table in &schema::LOAD_ORDER {
        conn.execute(&table.create_sql(), [])
            .map_err(|e| EtlError::storage(table.name, e))?;
    }
    Ok(())
}

/// Full-table delete of all six tables
pub fn delete_existing_records(tx: &Transaction, order: &[TableSchema]) -> Result<()> {
    for table in order {
        tx.execute(&format!("DELETE FROM {}", table.name), [])
            .map_err(|e| EtlError::storage(table.name, e))?;
    }
    Ok(())
}

/// Append every row of `data` to `table`, matching columns by header name.
///
/// With `enforce_foreign_keys`, the `"N/A"` fill sentinel in a foreign-key
/// column is stored as NULL so it cannot dangle.
pub fn insert_table(
    tx: &Transaction,
    table: &TableSchema,
    data: &DataFrame,
    enforce_foreign_keys: bool,
) -> Result<usize> {
    let names = frame::column_names(data);
    if let Some(unknown) = names.iter().find(|c| !table.has_column(c)) {
        return Err(EtlError::storage(
            table.name,
            StorageSource::Schema(format!(
                "prepared column '{}' has no counterpart in table '{}'",
                unknown, table.name
            )),
        ));
    }

    let columns: Vec<String> = names.iter().map(|c| format!("\"{}\"", c)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        columns.join(", "),
        placeholders.join(", ")
    );

    let mut stmt = tx
        .prepare_cached(&sql)
        .map_err(|e| EtlError::storage(table.name, e))?;

    let data = frame::render_timestamps(data)?;
    let values: Vec<Vec<Value>> = data
        .get_columns()
        .iter()
        .map(|column| {
            let nullable_key = enforce_foreign_keys
                && table.foreign_keys.iter().any(|fk| fk.column == column.name().as_str());

            (0..data.height())
                .map(|row| {
                    Ok(match sql_value(column.get(row)?) {
                        Value::Text(s) if nullable_key && s == FILL_VALUE => Value::Null,
                        value => value,
                    })
                })
                .collect::<Result<Vec<Value>>>()
        })
        .collect::<Result<_>>()?;

    for row in 0..data.height() {
        stmt.execute(params_from_iter(values.iter().map(|column| &column[row])))
            .map_err(|e| EtlError::storage(table.name, e))?;
    }

    Ok(data.height())
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::Integer(i64::from(v)),
        AnyValue::Int32(v) => Value::Integer(i64::from(v)),
        AnyValue::Int64(v) => Value::Integer(v),
        AnyValue::UInt32(v) => Value::Integer(i64::from(v)),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        other => Value::Text(other.to_string()),
    }
}

pub fn verify_count(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
        .map_err(|e| EtlError::storage(table, e))
}

// ============================================================================
// LOAD
// ============================================================================

/// Truncate and reload every warehouse table from `prepared_dir`.
///
/// With `enforce_foreign_keys` off, tables go in the historical order
/// (sales before suppliers/stores/campaigns), which SQLite accepts only
/// because it does not check foreign keys by default. With it on, FK
/// checking is switched on, deferred to commit, and the dependency-safe
/// order is used.
pub fn load_prepared(
    conn: &mut Connection,
    prepared_dir: &Path,
    enforce_foreign_keys: bool,
) -> Result<LoadReport> {
    let order = schema::load_order(enforce_foreign_keys);

    if !enforce_foreign_keys {
        let violations = schema::order_violations(order);
        if !violations.is_empty() {
            warn!(
                ?violations,
                "Load order inserts tables before tables they reference; relying on foreign keys not being enforced"
            );
        }
    }

    // Read everything up front so a missing file fails before any write
    let datasets = order
        .iter()
        .map(|table| {
            let path = prepared_dir.join(table.prepared_file);
            frame::read_csv(&path, NullMarkers::EmptyOnly).map(|data| (table, data))
        })
        .collect::<Result<Vec<_>>>()?;

    conn.pragma_update(None, "foreign_keys", enforce_foreign_keys)
        .map_err(|e| EtlError::storage("foreign_keys pragma", e))?;

    setup_database(conn)?;

    let tx = conn
        .transaction()
        .map_err(|e| EtlError::storage("warehouse transaction", e))?;

    if enforce_foreign_keys {
        // Self-references inside one table (customer referrals) need this
        tx.pragma_update(None, "defer_foreign_keys", true)
            .map_err(|e| EtlError::storage("defer_foreign_keys pragma", e))?;
    }

    // Referrers must be emptied before the tables they reference
    let delete_order: Vec<TableSchema> = order.iter().rev().copied().collect();
    delete_existing_records(&tx, &delete_order)?;

    let mut inserted = Vec::with_capacity(datasets.len());
    for (table, data) in &datasets {
        let rows = insert_table(&tx, table, data, enforce_foreign_keys)?;
        info!(table = table.name, rows, "Inserted prepared rows");
        inserted.push((table.name, rows));
    }

    tx.commit()
        .map_err(|e| EtlError::storage("warehouse transaction", e))?;

    let tables = inserted
        .into_iter()
        .map(|(name, rows_inserted)| {
            Ok(TableLoad {
                table: name.to_string(),
                rows_inserted,
                rows_in_table: verify_count(conn, name)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LoadReport {
        foreign_keys_enforced: enforce_foreign_keys,
        tables,
    })
}

/// Open the configured warehouse, load it, and close it again
pub fn load_warehouse(config: &EtlConfig) -> Result<LoadReport> {
    let mut conn = open_warehouse(&config.warehouse_path)?;
    let report = load_prepared(&mut conn, &config.prepared_dir, config.enforce_foreign_keys)?;
    info!("{}", report.summary());

    conn.close()
        .map_err(|(_, e)| EtlError::storage(config.warehouse_path.display(), e))?;

    Ok(report)
}

// ============================================================================
// TESTS
// ============================================================================
