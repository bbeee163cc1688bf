//! # HTTP Gateway
//!
//! JSON endpoints over the credential resolver, the predicate builder and
//! the fixed statements.
//!
//! Routes:
//! - `POST /login`
//! - `POST /selection-orders`, `POST /insert-order`, `GET /join-query`
//! - `POST /update-customer`, `GET /aggregate-customer`
//! - `DELETE /delete-shipment`, `GET /shipments`,
//!   `GET /shipments-above-avg-package-size`
//! - `GET /aggregate-carrier`, `GET /models`, `GET /divModels`
//! - `GET /check-db-connection`, `POST /initiate-tables`

mod admin_routes;
mod carrier_routes;
pub mod config;
mod customer_routes;
pub mod errors;
mod login_routes;
mod order_routes;
mod request;
pub mod server;
mod shipment_routes;
pub mod state;

pub use admin_routes::{CONNECTED, UNREACHABLE};
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use order_routes::conditions_from_body;
pub use server::HttpServer;
pub use state::{GatewayState, ScriptSettings};
