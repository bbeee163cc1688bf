//! Order statements: insert, filtered selection, join, spending aggregate.

use super::errors::ExecResult;
use crate::query::{
    build, parse_date, require_integer, require_numeric, FilterCondition, ValidationError,
};
use crate::store::{Row, SqlValue, Store};

/// Order table; quoted because ORDER is reserved
pub const ORDER_TABLE: &str = "\"Order\"";

/// A new order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub num: String,
    pub date: String,
    pub total_cost: String,
    pub customer_id: String,
    pub supplier_id: Option<String>,
}

/// Insert an order (autocommit). True when a row was written.
pub async fn insert_order(store: &dyn Store, order: &NewOrder) -> ExecResult<bool> {
    let num = require_integer("num", &order.num)?;
    let total_cost = require_numeric("totalCost", &order.total_cost)?;
    let customer_id = require_integer("customerId", &order.customer_id)?;
    let supplier_id = match order.supplier_id.as_deref() {
        Some(id) => Some(require_integer("supplierId", id)?),
        None => None,
    };
    let date = parse_date(&order.date)
        .ok_or_else(|| ValidationError::InvalidDate(order.date.clone()))?;

    let sql = format!(
        "INSERT INTO {} (orderNumber, orderDate, totalCost, customerID, supplierID) \
         VALUES ($1, $2, $3, $4, $5)",
        ORDER_TABLE
    );
    let params = [
        SqlValue::text(num),
        SqlValue::Timestamp(date),
        SqlValue::text(total_cost),
        SqlValue::text(customer_id),
        supplier_id.into(),
    ];

    let affected = store.execute(&sql, &params).await?;
    tracing::info!(event = "ORDER_INSERTED", order = order.num.as_str(), affected);
    Ok(affected > 0)
}

/// Select orders matching dynamically built conditions
pub async fn select_orders(
    store: &dyn Store,
    conditions: &[FilterCondition],
) -> ExecResult<Vec<Row>> {
    let predicate = build(conditions)?;
    let sql = format!("SELECT * FROM {} WHERE {}", ORDER_TABLE, predicate.clause);

    tracing::debug!(
        event = "ORDER_SELECTION",
        clause = predicate.clause.as_str(),
        params = predicate.params.len()
    );
    Ok(store.query_rows(&sql, &predicate.params).await?)
}

/// Name and contact number of the customer who placed an order
pub async fn customer_for_order(store: &dyn Store, order_number: &str) -> ExecResult<Vec<Row>> {
    let order_number = require_integer("orderNumber", order_number)?;
    let sql = format!(
        "SELECT C.name AS name, C.contactNumber AS contactNumber \
         FROM Customer C, {} O \
         WHERE C.userID = O.customerID AND O.orderNumber = $1",
        ORDER_TABLE
    );
    Ok(store
        .query_rows(&sql, &[SqlValue::text(order_number)])
        .await?)
}

/// Average spending per customer with at least `min_orders` orders
pub async fn customer_spending(store: &dyn Store, min_orders: &str) -> ExecResult<Vec<Row>> {
    let min_orders = require_integer("minOrderAmount", min_orders)?;
    let sql = format!(
        "SELECT customerID, AVG(totalCost) AS spending \
         FROM {} \
         GROUP BY customerID \
         HAVING COUNT(orderNumber) >= $1",
        ORDER_TABLE
    );
    Ok(store
        .query_rows(&sql, &[SqlValue::text(min_orders)])
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::ExecError;
    use crate::store::RecordingStore;
    use chrono::NaiveDate;

    fn order(supplier: Option<&str>) -> NewOrder {
        NewOrder {
            num: "501".into(),
            date: "2024-06-30".into(),
            total_cost: "250.5".into(),
            customer_id: "12".into(),
            supplier_id: supplier.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_insert_binds_date_and_optional_supplier() {
        let store = RecordingStore::new().respond(crate::store::Scripted::Affected(1));

        assert!(insert_order(&store, &order(None)).await.unwrap());

        let calls = store.calls();
        let call = &calls[0];
        assert!(call.sql.starts_with("INSERT INTO \"Order\""));
        let date = NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            call.params,
            vec![
                SqlValue::text("501"),
                SqlValue::Timestamp(date),
                SqlValue::text("250.5"),
                SqlValue::text("12"),
                SqlValue::Null,
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_reports_no_rows() {
        let store = RecordingStore::new();
        assert!(!insert_order(&store, &order(Some("3"))).await.unwrap());
        assert_eq!(store.calls()[0].params[4], SqlValue::text("3"));
    }

    #[tokio::test]
    async fn test_selection_builds_query() {
        let store = RecordingStore::new();
        let conditions = [
            FilterCondition::new("totalCost", ">", "100"),
            FilterCondition::new("customerID", "=", "5").joined_by("AND"),
        ];

        select_orders(&store, &conditions).await.unwrap();

        let calls = store.calls();
        let call = &calls[0];
        assert_eq!(
            call.sql,
            "SELECT * FROM \"Order\" WHERE 1=1 AND totalCost > $1 AND customerID = $2"
        );
        assert_eq!(call.params, vec![SqlValue::text("100"), SqlValue::text("5")]);
    }

    #[tokio::test]
    async fn test_selection_validation_skips_store() {
        let store = RecordingStore::new();
        let result = select_orders(&store, &[FilterCondition::new("secret", "=", "1")]).await;

        assert!(matches!(
            result,
            Err(ExecError::Validation(ValidationError::InvalidField(_)))
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_join_and_aggregate_gate_numbers() {
        let store = RecordingStore::new();

        assert!(customer_for_order(&store, "12 OR 1=1").await.is_err());
        assert!(customer_spending(&store, "many").await.is_err());
        assert!(store.calls().is_empty());

        customer_spending(&store, " 3 ").await.unwrap();
        let calls = store.calls();
        assert!(calls[0].sql.contains("HAVING COUNT(orderNumber) >= $1"));
        assert_eq!(calls[0].params, vec![SqlValue::text("3")]);
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_supplier() {
        let store = RecordingStore::new();
        let result = insert_order(&store, &order(Some("acme"))).await;
        assert!(matches!(
            result,
            Err(ExecError::Validation(ValidationError::NotNumeric { .. }))
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_whole_number_inputs() {
        let store = RecordingStore::new();

        assert!(matches!(
            customer_spending(&store, "2.5").await,
            Err(ExecError::Validation(ValidationError::NotInteger { .. }))
        ));
        assert!(store.calls().is_empty());

        customer_for_order(&store, "1e3").await.unwrap();
        assert_eq!(store.calls()[0].params, vec![SqlValue::text("1e3")]);
    }
}
