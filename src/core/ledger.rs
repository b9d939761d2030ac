//! Code ledger operations
//!
//! This module provides the `CodeLedger` that implements every inventory and
//! due-balance operation on top of a [`LedgerStore`].
//!
//! The ledger enforces these rules:
//! - At most one denomination group per amount in each book
//! - A code lives in the inventory or the used ledger, never both
//! - Redemption is all-or-nothing and is checked before any mutation
//! - The due balance grows by `price * count` on every redemption
//!
//! Each operation is a complete load, mutate and save cycle. Taking `&mut self`
//! for mutating operations keeps a single writer per store.

use crate::core::traits::{BookKind, LedgerStore};
use crate::types::{Code, CodeBook, Denomination, DenominationGroup, DueBalance, LedgerError};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Result of an upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Denomination the codes were added to
    pub amount: Denomination,
    /// Number of codes actually inserted
    pub added: usize,
    /// Codes skipped because the group already held them, in input order
    pub duplicates: Vec<String>,
}

/// Result of a successful redemption
#[derive(Debug, Clone, PartialEq)]
pub struct Redemption {
    pub amount: Denomination,
    /// Redeemed code strings in selection order
    pub codes: Vec<String>,
    /// Due balance before this redemption
    pub due_before: Decimal,
    /// Due balance after this redemption
    pub due_after: Decimal,
}

/// Result of a price change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceUpdate {
    pub amount: Denomination,
    pub price: Decimal,
    /// Whether an inventory group existed and was updated
    pub inventory_updated: bool,
    /// Whether a used-ledger group existed and was updated
    pub used_updated: bool,
}

/// One entry of the price list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEntry {
    pub amount: Denomination,
    pub price: Decimal,
}

/// Per-denomination line of a stock or due summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryLine {
    pub amount: Denomination,
    /// Number of codes counted for this group
    pub count: usize,
    /// Price of one code (zero when unset)
    pub price: Decimal,
    /// `price * count`
    pub value: Decimal,
}

/// Stock or due summary, ordered by ascending amount
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub lines: Vec<SummaryLine>,
    /// Sum of all line values
    pub total: Decimal,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line for a given amount, if the group exists
    pub fn line(&self, amount: Denomination) -> Option<&SummaryLine> {
        self.lines.iter().find(|line| line.amount == amount)
    }
}

/// Inventory and due-balance ledger over a [`LedgerStore`]
#[derive(Debug)]
pub struct CodeLedger<S> {
    store: S,
}

impl<S: LedgerStore> CodeLedger<S> {
    /// Create a ledger over the given store
    pub fn new(store: S) -> Self {
        CodeLedger { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Add codes to the inventory group for `amount`
    ///
    /// Each code is trimmed; blank tokens are ignored. A code whose string is
    /// already in the group (or earlier in the same batch) is skipped and
    /// reported in [`UploadOutcome::duplicates`]; the rest of the batch still
    /// goes in. A new group starts with a price of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is zero or the inventory cannot be
    /// loaded or saved.
    pub fn upload<I, T>(
        &mut self,
        amount: Denomination,
        codes: I,
    ) -> Result<UploadOutcome, LedgerError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        validate_amount(amount)?;

        let mut inventory = self.store.load_book(BookKind::Inventory)?;
        let group = inventory.get_or_create(amount, Some(Decimal::ZERO));

        let mut added = 0;
        let mut duplicates = Vec::new();
        for raw in codes {
            let code = match Code::new(raw.as_ref()) {
                Ok(code) => code,
                Err(_) => {
                    debug!(amount, "Ignoring blank code token");
                    continue;
                }
            };

            let value = code.value().to_string();
            if group.insert(code) {
                added += 1;
            } else {
                warn!(amount, code = %value, "Duplicate code detected");
                duplicates.push(value);
            }
        }

        self.store.save_book(BookKind::Inventory, &inventory)?;

        info!(amount, added, duplicates = duplicates.len(), "Added codes");
        Ok(UploadOutcome {
            amount,
            added,
            duplicates,
        })
    }

    /// Redeem the first `count` unredeemed codes of `amount`
    ///
    /// The selected codes leave the inventory, are flagged as redeemed and are
    /// appended to the used ledger. A used-ledger group created here takes a
    /// snapshot of the inventory price. The due balance grows by
    /// `price * count`, with the price read from the inventory.
    ///
    /// Stores are saved in the order used ledger, due balance, inventory, so
    /// a failure part-way can leave a code in both books but never in none.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientStock`] if the group is missing or
    /// holds fewer than `count` unredeemed codes; nothing is modified then.
    pub fn redeem(
        &mut self,
        amount: Denomination,
        count: usize,
    ) -> Result<Redemption, LedgerError> {
        validate_amount(amount)?;
        validate_count(count)?;

        let mut inventory = self.store.load_book(BookKind::Inventory)?;
        let group = inventory
            .group_mut(amount)
            .ok_or_else(|| LedgerError::insufficient_stock(amount, count, 0))?;

        let price = group.price_or_zero();
        let value = group.value_of(count)?;
        let taken = group.take_available(count)?;

        let mut used = self.store.load_book(BookKind::Used)?;
        let mut due = self.store.load_due()?;
        let due_before = due.total_due;
        due.credit(value, amount)?;

        let codes: Vec<String> = taken.iter().map(|code| code.value().to_string()).collect();
        used.get_or_create(amount, Some(price)).append(taken);

        self.store.save_book(BookKind::Used, &used)?;
        self.store.save_due(&due)?;
        self.store.save_book(BookKind::Inventory, &inventory)?;

        info!(amount, count, %value, due = %due.total_due, "Redeemed codes");
        Ok(Redemption {
            amount,
            codes,
            due_before,
            due_after: due.total_due,
        })
    }

    /// Set the price of `amount` in the inventory and the used ledger
    ///
    /// Each book is updated only if it already has a group for `amount`;
    /// a missing group is not an error. Both books are saved.
    pub fn set_price(
        &mut self,
        amount: Denomination,
        price: Decimal,
    ) -> Result<PriceUpdate, LedgerError> {
        validate_amount(amount)?;
        validate_price(price)?;

        let mut inventory = self.store.load_book(BookKind::Inventory)?;
        let mut used = self.store.load_book(BookKind::Used)?;

        let inventory_updated = set_group_price(&mut inventory, amount, price);
        let used_updated = set_group_price(&mut used, amount, price);

        self.store.save_book(BookKind::Inventory, &inventory)?;
        self.store.save_book(BookKind::Used, &used)?;

        info!(amount, %price, inventory_updated, used_updated, "Updated price");
        Ok(PriceUpdate {
            amount,
            price,
            inventory_updated,
            used_updated,
        })
    }

    /// Prices of every inventory group that has one, by ascending amount
    ///
    /// The sequence reflects the store at call time; call again for a fresh one.
    pub fn list_prices(&self) -> Result<impl Iterator<Item = PriceEntry>, LedgerError> {
        let inventory = self.store.load_book(BookKind::Inventory)?;

        let entries: Vec<PriceEntry> = inventory
            .sorted_groups()
            .into_iter()
            .filter_map(|group| {
                group.price.map(|price| PriceEntry {
                    amount: group.amount,
                    price,
                })
            })
            .collect();

        Ok(entries.into_iter())
    }

    /// Unredeemed count and value per inventory group
    pub fn stock_summary(&self) -> Result<Summary, LedgerError> {
        let inventory = self.store.load_book(BookKind::Inventory)?;
        summarize(&inventory, DenominationGroup::available_count)
    }

    /// Code count and value per used-ledger group
    ///
    /// Recomputed from the used ledger with current prices, so it can differ
    /// from [`CodeLedger::due_balance`].
    pub fn due_summary(&self) -> Result<Summary, LedgerError> {
        let used = self.store.load_book(BookKind::Used)?;
        summarize(&used, DenominationGroup::len)
    }

    /// Current running due balance
    pub fn due_balance(&self) -> Result<DueBalance, LedgerError> {
        self.store.load_due()
    }

    /// Empty the used ledger and reset the due balance to zero
    ///
    /// The inventory is not touched.
    pub fn clear_dues(&mut self) -> Result<(), LedgerError> {
        self.store.save_book(BookKind::Used, &CodeBook::new())?;
        self.store.save_due(&DueBalance::zero())?;

        info!("Cleared all dues");
        Ok(())
    }
}

fn set_group_price(book: &mut CodeBook, amount: Denomination, price: Decimal) -> bool {
    match book.group_mut(amount) {
        Some(group) => {
            group.price = Some(price);
            true
        }
        None => false,
    }
}

fn summarize(
    book: &CodeBook,
    counter: fn(&DenominationGroup) -> usize,
) -> Result<Summary, LedgerError> {
    let mut summary = Summary::default();

    for group in book.sorted_groups() {
        let count = counter(group);
        let value = group.value_of(count)?;
        summary.total = summary
            .total
            .checked_add(value)
            .ok_or_else(|| LedgerError::arithmetic_overflow("summary", group.amount))?;
        summary.lines.push(SummaryLine {
            amount: group.amount,
            count,
            price: group.price_or_zero(),
            value,
        });
    }

    Ok(summary)
}

fn validate_amount(amount: Denomination) -> Result<(), LedgerError> {
    if amount == 0 {
        return Err(LedgerError::invalid_argument(
            "amount",
            "0",
            "must be a positive number",
        ));
    }
    Ok(())
}

fn validate_count(count: usize) -> Result<(), LedgerError> {
    if count == 0 {
        return Err(LedgerError::invalid_argument(
            "count",
            "0",
            "must be a positive number",
        ));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), LedgerError> {
    if price < Decimal::ZERO {
        return Err(LedgerError::invalid_argument(
            "price",
            &price.to_string(),
            "must not be negative",
        ));
    }
    Ok(())
}
