//! Role-based capabilities for pool operations.
//!
//! The pool distinguishes two roles: [`Role::Admin`] drives the stake lifecycle and manages the
//! membership set, [`Role::Member`] may deposit into and withdraw from the pool. Admins are the
//! superset-granting role: only an admin can grant or revoke either role.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::types::AccountId;

/// A capability required to invoke a pool operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// May drive the stake lifecycle and mutate the membership set.
    Admin,

    /// May deposit into and withdraw from the pool.
    Member,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Member => write!(f, "member"),
        }
    }
}

/// The set of accounts holding each [`Role`].
///
/// Role grants are independent of the share ledger: removing a member does not forfeit their
/// shares, it only blocks further deposits and withdrawals until membership is granted again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTable {
    admins: BTreeSet<AccountId>,
    members: BTreeSet<AccountId>,
}

impl RoleTable {
    /// Creates a new table with `initial_admin` holding both roles.
    pub fn new(initial_admin: AccountId) -> Self {
        let mut table = RoleTable {
            admins: BTreeSet::new(),
            members: BTreeSet::new(),
        };
        table.grant(Role::Admin, initial_admin);
        table.grant(Role::Member, initial_admin);

        table
    }

    /// Returns whether `account` holds `role`.
    pub fn has_role(&self, role: Role, account: &AccountId) -> bool {
        match role {
            Role::Admin => self.admins.contains(account),
            Role::Member => self.members.contains(account),
        }
    }

    /// Grants `role` to `account`. Granting an already-held role is a no-op.
    pub fn grant(&mut self, role: Role, account: AccountId) {
        match role {
            Role::Admin => self.admins.insert(account),
            Role::Member => self.members.insert(account),
        };
    }

    /// Revokes `role` from `account`. Revoking a role that is not held is a no-op.
    pub fn revoke(&mut self, role: Role, account: &AccountId) {
        match role {
            Role::Admin => self.admins.remove(account),
            Role::Member => self.members.remove(account),
        };
    }

    /// Returns the number of accounts holding [`Role::Member`].
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
