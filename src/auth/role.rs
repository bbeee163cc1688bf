//! User roles.
//!
//! Each role names its backing table and the columns returned on login.
//! Table and column names are compile-time constants; nothing from the
//! request is spliced into the lookup statement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AuthError;

/// Where a role's credentials live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleProfile {
    /// Backing table
    pub table: &'static str,
    /// Role-specific columns; the JSON key is the column name
    pub attributes: &'static [&'static str],
}

/// Identifier column shared by all role tables
pub const ID_COLUMN: &str = "userID";

/// Display-name column shared by all role tables
pub const NAME_COLUMN: &str = "name";

/// Secret column shared by all role tables
pub const SECRET_COLUMN: &str = "password";

const CUSTOMER: RoleProfile = RoleProfile {
    table: "Customer",
    attributes: &["contactNumber", "homeAddress"],
};

const SUPPLIER: RoleProfile = RoleProfile {
    table: "Supplier",
    attributes: &["supplyType"],
};

const CARRIER: RoleProfile = RoleProfile {
    table: "Carrier",
    attributes: &["serviceArea", "overallRating"],
};

/// A user's role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Supplier,
    Carrier,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Customer, Role::Supplier, Role::Carrier];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Supplier => "supplier",
            Role::Carrier => "carrier",
        }
    }

    pub fn profile(&self) -> &'static RoleProfile {
        match self {
            Role::Customer => &CUSTOMER,
            Role::Supplier => &SUPPLIER,
            Role::Carrier => &CARRIER,
        }
    }

    /// Credential lookup with `$1` = identifier and `$2` = secret
    pub fn lookup_sql(&self) -> String {
        let profile = self.profile();
        let mut columns = vec![ID_COLUMN, NAME_COLUMN];
        columns.extend_from_slice(profile.attributes);

        format!(
            "SELECT {} FROM {} WHERE {} = $1 AND {} = $2",
            columns.join(", "),
            profile.table,
            ID_COLUMN,
            SECRET_COLUMN
        )
    }
}

impl FromStr for Role {
    type Err = AuthError;

    /// Exact, case-sensitive match on the role tag
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == tag)
            .ok_or_else(|| AuthError::InvalidRole(tag.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
