//! Shipment statements: delete, column projection, package-size aggregate.

use super::errors::ExecResult;
use crate::query::{require_integer, ValidationError};
use crate::store::{Row, SqlValue, Store};

/// Columns a client may project from Shipment
pub const SHIPMENT_COLUMNS: [&str; 7] = [
    "trackingNumber",
    "shipmentStatus",
    "shippingTime",
    "shipmentDate",
    "supplierID",
    "licensePlate",
    "carrierID",
];

/// Delete a shipment (autocommit). True when a row was removed.
pub async fn delete_shipment(store: &dyn Store, tracking_number: &str) -> ExecResult<bool> {
    let tracking_number = require_integer("trackingNumber", tracking_number)?;
    let affected = store
        .execute(
            "DELETE FROM Shipment WHERE trackingNumber = $1",
            &[SqlValue::text(tracking_number)],
        )
        .await?;

    tracing::info!(event = "SHIPMENT_DELETED", tracking_number, affected);
    Ok(affected > 0)
}

/// Validate a comma-separated column list against the whitelist.
///
/// Exact match after trimming; the canonical names are returned.
pub fn projection_columns(fields: &str) -> Result<Vec<&'static str>, ValidationError> {
    let requested: Vec<&str> = fields.split(',').map(str::trim).collect();
    if requested.iter().all(|f| f.is_empty()) {
        return Err(ValidationError::MissingField("fields".to_string()));
    }

    requested
        .into_iter()
        .map(|field| {
            SHIPMENT_COLUMNS
                .iter()
                .copied()
                .find(|column| *column == field)
                .ok_or_else(|| ValidationError::InvalidProjection(field.to_string()))
        })
        .collect()
}

/// Project whitelisted Shipment columns
pub async fn project_shipments(store: &dyn Store, fields: &str) -> ExecResult<Vec<Row>> {
    let columns = projection_columns(fields)?;
    let sql = format!("SELECT {} FROM Shipment", columns.join(", "));
    Ok(store.query_rows(&sql, &[]).await?)
}

/// Shipments whose average package size beats the overall average
pub async fn shipments_above_average_package(store: &dyn Store) -> ExecResult<Vec<Row>> {
    Ok(store
        .query_rows(
            "SELECT shipmentNumber, AVG(package_size) AS avgPackageSize \
             FROM Package \
             GROUP BY shipmentNumber \
             HAVING AVG(package_size) > (SELECT AVG(package_size) FROM Package)",
            &[],
        )
        .await?)
}
