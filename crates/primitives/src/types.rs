//! Core identifier and amount types used throughout the pool crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An amount of the staking currency, denominated in its smallest unit.
///
/// Shares in the pool ledger use the same denomination: one share corresponds to one unit
/// deposited.
pub type Balance = u64;

/// Number of bytes in an [`AccountId`].
pub const ACCOUNT_ID_SIZE: usize = 20;

/// A 20-byte account identifier.
///
/// This is the identity under which members deposit, the pool holds custody, and external
/// collators are addressed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; ACCOUNT_ID_SIZE]);

// Serialized as the `Display` hex string so the id can be used as a JSON map key.
impl Serialize for AccountId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let hex_str = s
            .strip_prefix("0x")
            .ok_or_else(|| serde::de::Error::custom("account id must start with 0x"))?;
        let bytes = hex::decode(hex_str).map_err(serde::de::Error::custom)?;
        let bytes: [u8; ACCOUNT_ID_SIZE] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("account id must be 20 bytes"))?;
        Ok(AccountId(bytes))
    }
}

impl AccountId {
    /// Creates a new account id from a byte array.
    pub const fn new(bytes: [u8; ACCOUNT_ID_SIZE]) -> Self {
        AccountId(bytes)
    }

    /// Returns the account id as a byte slice.
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the account id as a byte array.
    pub const fn as_array(&self) -> &[u8; ACCOUNT_ID_SIZE] {
        &self.0
    }
}

impl From<[u8; ACCOUNT_ID_SIZE]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_SIZE]) -> Self {
        AccountId(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId(0x{})", hex::encode(self.0))
    }
}

/// Identifier of an external collator candidate that the pool delegates to.
///
/// Collators live in the same address space as regular accounts.
pub type CollatorId = AccountId;
