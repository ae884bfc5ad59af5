//! Category ingestion, duplicate rejection and running statistics.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::common::{hex_encode, parse_address, Address, Leaf};
use crate::error::{AirdropError, Result};
use crate::key::{field_value, hash_leaf};

/// The airdrop categories, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Sponsors,
    Creators,
    Foss,
    Naming,
    Faucet,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Sponsors => "sponsors",
            Category::Creators => "creators",
            Category::Foss => "foss",
            Category::Naming => "naming",
            Category::Faucet => "faucet",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a record's committed value is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRule {
    /// The record carries its value directly.
    Direct,
    /// The record carries shares; value is `shares * unit_reward`.
    Shares,
}

/// Static description of one category.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub file_name: &'static str,
    pub external: bool,
    pub rule: ValueRule,
}

pub const CATEGORIES: [CategorySpec; 5] = [
    CategorySpec {
        category: Category::Sponsors,
        file_name: "sponsors.json",
        external: true,
        rule: ValueRule::Direct,
    },
    CategorySpec {
        category: Category::Creators,
        file_name: "creators.json",
        external: true,
        rule: ValueRule::Direct,
    },
    CategorySpec {
        category: Category::Foss,
        file_name: "foss.json",
        external: true,
        rule: ValueRule::Direct,
    },
    CategorySpec {
        category: Category::Naming,
        file_name: "naming.json",
        external: true,
        rule: ValueRule::Direct,
    },
    CategorySpec {
        category: Category::Faucet,
        file_name: "faucet.json",
        external: false,
        rule: ValueRule::Shares,
    },
];

/// Amount carried by an input record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Value(i128),
    Shares(u64),
}

/// One entitlement as read from a category file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub address: String,
    pub amount: Amount,
}

impl Record {
    pub fn with_value(address: impl Into<String>, value: i128) -> Self {
        Self {
            address: address.into(),
            amount: Amount::Value(value),
        }
    }

    pub fn with_shares(address: impl Into<String>, shares: u64) -> Self {
        Self {
            address: address.into(),
            amount: Amount::Shares(shares),
        }
    }
}

/// The fields needed to re-derive a leaf without storing its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofEntry {
    pub address: String,
    pub value: u64,
    pub is_external: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub participants: u64,
    pub total: u128,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    categories: [CategoryStats; 5],
    pub external_total: u128,
    pub faucet_total: u128,
    pub faucet_shares: u128,
}

impl Stats {
    pub fn category(&self, category: Category) -> CategoryStats {
        self.categories[category.index()]
    }
}

/// A record after validation. `shares` is zero outside share-valued categories.
struct Resolved {
    address: Address,
    value: u64,
    shares: u64,
}

/// Accumulates leaves and proof entries for a single build.
///
/// Categories must be ingested exactly once each, in the order of
/// [`CATEGORIES`]. The seen-set spans every category ingested so far.
#[derive(Debug)]
pub struct LeafRegistry {
    unit_reward: u64,
    next: usize,
    seen: HashSet<Leaf>,
    leaves: Vec<Leaf>,
    proofs: Vec<ProofEntry>,
    stats: Stats,
}

impl LeafRegistry {
    pub fn new(unit_reward: u64) -> Self {
        Self {
            unit_reward,
            next: 0,
            seen: HashSet::new(),
            leaves: Vec::new(),
            proofs: Vec::new(),
            stats: Stats::default(),
        }
    }

    /// Ingests every record of one category.
    ///
    /// # Errors
    /// `CategoryOrder` if `spec` is not the next category; otherwise the
    /// first derivation failure or `DuplicateLeaf`. A failed ingest leaves
    /// the registry unusable for the rest of the build.
    pub fn ingest(&mut self, spec: &CategorySpec, records: &[Record]) -> Result<usize> {
        let expected = CATEGORIES.get(self.next).map(|c| c.category);
        if expected != Some(spec.category) {
            return Err(AirdropError::CategoryOrder {
                expected: expected.map_or("none", Category::name),
                found: spec.category.name(),
            });
        }
        self.next += 1;

        for record in records {
            self.register(spec, record)?;
        }
        Ok(records.len())
    }

    fn register(&mut self, spec: &CategorySpec, record: &Record) -> Result<()> {
        let resolved = self.resolve(spec, record)?;
        let leaf = hash_leaf(&resolved.address, resolved.value, spec.external);

        if !self.seen.insert(leaf) {
            return Err(AirdropError::DuplicateLeaf {
                leaf: hex_encode(leaf),
            });
        }

        self.leaves.push(leaf);
        self.proofs.push(ProofEntry {
            address: hex_encode(resolved.address),
            value: resolved.value,
            is_external: spec.external,
        });

        let value = u128::from(resolved.value);
        let cat = &mut self.stats.categories[spec.category.index()];
        cat.participants += 1;
        cat.total += value;
        match spec.category {
            Category::Faucet => {
                self.stats.faucet_total += value;
                self.stats.faucet_shares += u128::from(resolved.shares);
            }
            _ => self.stats.external_total += value,
        }
        Ok(())
    }

    /// Validates a record once: amount against the category rule, then the
    /// address, then the committed value.
    fn resolve(&self, spec: &CategorySpec, record: &Record) -> Result<Resolved> {
        let (value, shares) = match (spec.rule, record.amount) {
            (ValueRule::Direct, Amount::Value(value)) => (value, 0),
            (ValueRule::Shares, Amount::Shares(shares)) => {
                let value = i128::from(shares)
                    .checked_mul(i128::from(self.unit_reward))
                    .ok_or_else(|| AirdropError::ValueOutOfRange {
                        address: record.address.clone(),
                        value: i128::MAX,
                    })?;
                (value, shares)
            }
            (rule, amount) => {
                return Err(AirdropError::MissingOrMalformedInputFile {
                    path: spec.file_name.into(),
                    reason: format!(
                        "record for {} carries {:?} but category uses {:?}",
                        record.address, amount, rule
                    ),
                })
            }
        };

        Ok(Resolved {
            address: parse_address(&record.address)?,
            value: field_value(&record.address, value)?,
            shares,
        })
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn proof_entries(&self) -> &[ProofEntry] {
        &self.proofs
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn into_parts(self) -> (Vec<Leaf>, Vec<ProofEntry>, Stats) {
        (self.leaves, self.proofs, self.stats)
    }
}
