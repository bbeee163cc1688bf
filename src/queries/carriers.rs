//! Carrier and vehicle statements.

use super::errors::ExecResult;
use crate::query::ValidationError;
use crate::store::{Row, SqlValue, Store};

/// Best-rated carrier per service area
pub async fn best_carrier_per_area(store: &dyn Store) -> ExecResult<Vec<Row>> {
    Ok(store
        .query_rows(
            "SELECT MIN(name) AS name, serviceArea, MAX(overallRating) AS overallRating \
             FROM Carrier \
             GROUP BY serviceArea",
            &[],
        )
        .await?)
}

/// All known vehicle models
pub async fn vehicle_models(store: &dyn Store) -> ExecResult<Vec<Row>> {
    Ok(store.query_rows("SELECT model FROM VehicleModel", &[]).await?)
}

/// Split a comma-separated model list, dropping blanks
pub fn parse_models(models: &str) -> Result<Vec<String>, ValidationError> {
    let parsed: Vec<String> = models
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();

    if parsed.is_empty() {
        return Err(ValidationError::MissingField("models".to_string()));
    }
    Ok(parsed)
}

/// Relational division: carriers owning a vehicle of every listed model.
///
/// The model list is bound as one `text[]` parameter.
pub async fn carriers_with_all_models(store: &dyn Store, models: &str) -> ExecResult<Vec<Row>> {
    let models = parse_models(models)?;

    Ok(store
        .query_rows(
            "SELECT C.userID AS carrierID, C.name AS carrierName \
             FROM Carrier C \
             WHERE NOT EXISTS ( \
                 SELECT unnest($1::text[]) \
                 EXCEPT \
                 SELECT V.model FROM Vehicle V WHERE V.carrierID = C.userID \
             )",
            &[SqlValue::TextList(models)],
        )
        .await?)
}
