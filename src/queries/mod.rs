//! # Fixed-Query Executors
//!
//! One-shot parameterized statements over the logistics schema. Mutations
//! run in autocommit mode; reads return rows as JSON objects.

pub mod carriers;
pub mod customers;
pub mod errors;
pub mod init;
pub mod orders;
pub mod shipments;

pub use carriers::{best_carrier_per_area, carriers_with_all_models, vehicle_models};
pub use customers::{update_customer, CustomerUpdate};
pub use errors::{ExecError, ExecResult};
pub use init::initialize_tables;
pub use orders::{customer_for_order, customer_spending, insert_order, select_orders, NewOrder};
pub use shipments::{delete_shipment, project_shipments, shipments_above_average_package};
