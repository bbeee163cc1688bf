//! Customer profile updates.

use super::errors::ExecResult;
use crate::query::require_integer;
use crate::store::{SqlValue, Store};

/// Replacement profile fields for one customer
#[derive(Debug, Clone)]
pub struct CustomerUpdate {
    pub customer_id: String,
    pub name: String,
    pub contact_number: String,
    pub home_address: String,
}

/// Overwrite a customer's profile (autocommit). True when a row changed.
pub async fn update_customer(store: &dyn Store, update: &CustomerUpdate) -> ExecResult<bool> {
    let customer_id = require_integer("customerId", &update.customer_id)?;
    let contact_number = require_integer("contactNumber", &update.contact_number)?;

    let params = [
        SqlValue::text(update.name.as_str()),
        SqlValue::text(contact_number),
        SqlValue::text(update.home_address.as_str()),
        SqlValue::text(customer_id),
    ];

    let affected = store
        .execute(
            "UPDATE Customer SET name = $1, contactNumber = $2, homeAddress = $3 WHERE userID = $4",
            &params,
        )
        .await?;

    tracing::info!(
        event = "CUSTOMER_UPDATED",
        customer = update.customer_id.as_str(),
        affected
    );
    Ok(affected > 0)
}
