//! Code and denomination types for the UC code ledger
//!
//! This module defines the in-memory records the ledger operates on. They are
//! decoupled from the persisted JSON schema, which lives in
//! [`crate::io::json_format`].

use super::error::LedgerError;
use rust_decimal::Decimal;

/// Face value of a code, in UC
///
/// Always positive; zero is rejected at the command boundary.
pub type Denomination = u32;

/// A single redeemable code
///
/// Identity is the trimmed string value. The `redeemed` flag is monotone:
/// once set it is never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    value: String,
    redeemed: bool,
}

impl Code {
    /// Create a fresh, unredeemed code from raw input
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyCode`] if nothing is left after trimming.
    pub fn new(raw: &str) -> Result<Self, LedgerError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(LedgerError::EmptyCode);
        }

        Ok(Code {
            value: value.to_string(),
            redeemed: false,
        })
    }

    /// Rebuild a code from its persisted form
    pub fn restore(value: String, redeemed: bool) -> Self {
        Code { value, redeemed }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_redeemed(&self) -> bool {
        self.redeemed
    }

    /// Flag the code as redeemed
    pub fn mark_redeemed(&mut self) {
        self.redeemed = true;
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

/// All codes of one denomination together with its price
///
/// A store holds at most one group per `amount`; [`CodeBook`] enforces this.
#[derive(Debug, Clone, PartialEq)]
pub struct DenominationGroup {
    /// Face value shared by every code in the group
    pub amount: Denomination,

    /// Price of one code, `None` when never set
    pub price: Option<Decimal>,

    /// Codes in insertion order
    codes: Vec<Code>,
}

impl DenominationGroup {
    /// Create an empty group
    pub fn new(amount: Denomination, price: Option<Decimal>) -> Self {
        DenominationGroup {
            amount,
            price,
            codes: Vec::new(),
        }
    }

    /// Create a group from already-decoded codes
    pub fn with_codes(amount: Denomination, price: Option<Decimal>, codes: Vec<Code>) -> Self {
        DenominationGroup {
            amount,
            price,
            codes,
        }
    }

    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Price of one code, treating an unset price as zero
    pub fn price_or_zero(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// Whether a code with this exact string is already in the group
    pub fn contains(&self, value: &str) -> bool {
        self.codes.iter().any(|code| code.value == value)
    }

    /// Number of codes that have not been redeemed yet
    pub fn available_count(&self) -> usize {
        self.codes.iter().filter(|code| !code.redeemed).count()
    }

    /// Insert a code unless the same string is already present
    ///
    /// # Returns
    ///
    /// `true` if the code was inserted, `false` if it was a duplicate
    pub fn insert(&mut self, code: Code) -> bool {
        if self.contains(&code.value) {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Append codes without duplicate checks (used-ledger side)
    pub fn append(&mut self, codes: Vec<Code>) {
        self.codes.extend(codes);
    }

    /// Remove the first `count` unredeemed codes and flag them as redeemed
    ///
    /// The check is all-or-nothing: if fewer than `count` codes are
    /// available the group is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientStock`] when not enough codes are available.
    pub fn take_available(&mut self, count: usize) -> Result<Vec<Code>, LedgerError> {
        let available = self.available_count();
        if available < count {
            return Err(LedgerError::insufficient_stock(self.amount, count, available));
        }

        let mut taken = Vec::with_capacity(count);
        let mut kept = Vec::with_capacity(self.codes.len() - count);
        for mut code in self.codes.drain(..) {
            if taken.len() < count && !code.redeemed {
                code.mark_redeemed();
                taken.push(code);
            } else {
                kept.push(code);
            }
        }
        self.codes = kept;

        Ok(taken)
    }

    /// Price multiplied by `count`, with overflow checking
    pub fn value_of(&self, count: usize) -> Result<Decimal, LedgerError> {
        let count = Decimal::from(count as u64);
        self.price_or_zero()
            .checked_mul(count)
            .ok_or_else(|| LedgerError::arithmetic_overflow("value", self.amount))
    }
}

/// A collection of denomination groups, one per amount
///
/// Used for both the inventory (available codes) and the used ledger.
/// Groups keep their insertion order for persistence; listings are sorted
/// by amount.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodeBook {
    groups: Vec<DenominationGroup>,
}

impl CodeBook {
    /// Create an empty book
    pub fn new() -> Self {
        CodeBook { groups: Vec::new() }
    }

    /// Build a book from groups, merging any that share an amount
    ///
    /// The first price seen for an amount wins; codes of later groups are
    /// appended in order.
    pub fn from_groups(groups: Vec<DenominationGroup>) -> Self {
        let mut book = CodeBook::new();
        for group in groups {
            match book.group_mut(group.amount) {
                Some(existing) => {
                    tracing::warn!(
                        amount = group.amount,
                        "Merging duplicate denomination group"
                    );
                    if existing.price.is_none() {
                        existing.price = group.price;
                    }
                    existing.append(group.codes);
                }
                None => book.groups.push(group),
            }
        }
        book
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Groups in stored order
    pub fn groups(&self) -> impl Iterator<Item = &DenominationGroup> {
        self.groups.iter()
    }

    pub fn group(&self, amount: Denomination) -> Option<&DenominationGroup> {
        self.groups.iter().find(|group| group.amount == amount)
    }

    pub fn group_mut(&mut self, amount: Denomination) -> Option<&mut DenominationGroup> {
        self.groups.iter_mut().find(|group| group.amount == amount)
    }

    /// Get or create the group for `amount`
    ///
    /// A newly created group gets `price`; an existing group keeps its own.
    pub fn get_or_create(
        &mut self,
        amount: Denomination,
        price: Option<Decimal>,
    ) -> &mut DenominationGroup {
        let index = match self.groups.iter().position(|group| group.amount == amount) {
            Some(index) => index,
            None => {
                self.groups.push(DenominationGroup::new(amount, price));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// All groups sorted by ascending amount
    pub fn sorted_groups(&self) -> Vec<&DenominationGroup> {
        let mut groups: Vec<&DenominationGroup> = self.groups.iter().collect();
        groups.sort_by_key(|group| group.amount);
        groups
    }

    /// Whether any group holds a code with this string
    pub fn contains_code(&self, value: &str) -> bool {
        self.groups.iter().any(|group| group.contains(value))
    }
}
