//! Group names and caller role resolution.
//!
//! Group names must match the seed data in
//! `20260301000002_create_groups_table.sql`.

use serde::Serialize;

pub const GROUP_MANAGER: &str = "Manager";
pub const GROUP_DELIVERY_CREW: &str = "Delivery Crew";

/// The three mutually exclusive caller roles that drive the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Delivery,
    Customer,
}

impl Role {
    /// Classify a caller from its superuser flag and group memberships.
    ///
    /// Manager membership (or superuser) wins over delivery crew membership;
    /// a caller in no known group is a customer.
    pub fn resolve<S: AsRef<str>>(is_superuser: bool, groups: &[S]) -> Role {
        let member_of = |name: &str| groups.iter().any(|g| g.as_ref() == name);

        if is_superuser || member_of(GROUP_MANAGER) {
            Role::Manager
        } else if member_of(GROUP_DELIVERY_CREW) {
            Role::Delivery
        } else {
            Role::Customer
        }
    }

    pub fn is_manager(self) -> bool {
        self == Role::Manager
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Delivery => "delivery",
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group roster that managers can edit through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roster {
    Manager,
    DeliveryCrew,
}

impl Roster {
    /// Name of the backing group row.
    pub fn group_name(self) -> &'static str {
        match self {
            Roster::Manager => GROUP_MANAGER,
            Roster::DeliveryCrew => GROUP_DELIVERY_CREW,
        }
    }
}
