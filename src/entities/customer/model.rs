//! Customer entity model

use crate::core::Entity;

/// The park visitor behind an account
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub account_id: i64,
    pub family_members: i64,
}

/// Writable fields of a Customer
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFields {
    pub account_id: i64,
    pub family_members: i64,
}

impl Entity for Customer {
    type Fields = CustomerFields;

    fn resource_name() -> &'static str {
        "customers"
    }

    fn resource_name_singular() -> &'static str {
        "customer"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn from_parts(id: i64, fields: CustomerFields) -> Self {
        Self {
            id,
            account_id: fields.account_id,
            family_members: fields.family_members,
        }
    }

    fn references() -> &'static [&'static str] {
        &["account_id"]
    }

    fn reference(&self, field: &str) -> Option<i64> {
        match field {
            "account_id" => Some(self.account_id),
            _ => None,
        }
    }
}
