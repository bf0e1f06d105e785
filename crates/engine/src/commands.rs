//! Command structs for engine operations.
//!
//! These types group parameters for write operations and queries, keeping
//! call sites readable and avoiding long argument lists. They carry raw
//! caller input; validation happens in the engine.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

use crate::{EngineError, Frequency, ResultEngine, TransactionKind};

/// Create or fully replace a transaction.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(
        kind: TransactionKind,
        account_id: i64,
        amount_minor: i64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            amount_minor,
            account_id,
            destination_account_id: None,
            category: None,
            description: None,
            date,
        }
    }

    #[must_use]
    pub fn income(account_id: i64, amount_minor: i64, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Income, account_id, amount_minor, date)
    }

    #[must_use]
    pub fn expense(account_id: i64, amount_minor: i64, date: DateTime<Utc>) -> Self {
        Self::new(TransactionKind::Expense, account_id, amount_minor, date)
    }

    #[must_use]
    pub fn destination(mut self, account_id: i64) -> Self {
        self.destination_account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Move money between two accounts.
#[derive(Clone, Debug)]
pub struct TransferCmd {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount_minor: i64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

impl TransferCmd {
    #[must_use]
    pub fn new(
        from_account_id: i64,
        to_account_id: i64,
        amount_minor: i64,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount_minor,
            category: None,
            description: None,
            date,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<TransferCmd> for TransactionCmd {
    fn from(cmd: TransferCmd) -> Self {
        Self {
            kind: TransactionKind::Transfer,
            amount_minor: cmd.amount_minor,
            account_id: cmd.from_account_id,
            destination_account_id: Some(cmd.to_account_id),
            category: cmd.category,
            description: cmd.description,
            date: cmd.date,
        }
    }
}

/// Open a new account with an initial balance.
#[derive(Clone, Debug)]
pub struct AccountCmd {
    pub name: String,
    pub account_type: String,
    pub balance: i64,
}

impl AccountCmd {
    #[must_use]
    pub fn new(name: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_type: account_type.into(),
            balance: 0,
        }
    }

    #[must_use]
    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }
}

/// Create a recurring rule.
#[derive(Clone, Debug)]
pub struct RecurringRuleCmd {
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub frequency: Frequency,
    pub interval: i32,
    pub start_date: DateTime<Utc>,
}

impl RecurringRuleCmd {
    #[must_use]
    pub fn new(
        kind: TransactionKind,
        account_id: i64,
        amount_minor: i64,
        frequency: Frequency,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            amount_minor,
            account_id,
            destination_account_id: None,
            category: None,
            description: None,
            frequency,
            interval: 1,
            start_date,
        }
    }

    #[must_use]
    pub fn interval(mut self, interval: i32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn destination(mut self, account_id: i64) -> Self {
        self.destination_account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Page request for list operations.
///
/// Absent, zero or negative inputs fall back to page 1 and 25 items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub page: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 25;

    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let positive = |v: Option<i64>| v.and_then(|v| u64::try_from(v).ok()).filter(|v| *v > 0);
        Self {
            page: positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Rows to skip, or `None` when the page starts beyond what the store
    /// can address.
    pub fn offset(&self) -> Option<u64> {
        (self.page - 1)
            .checked_mul(self.limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
    }

    pub fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Date range and optional account filter for summaries.
///
/// Both ends are inclusive calendar days in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub account_id: Option<i64>,
}

impl SummaryQuery {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            account_id: None,
        }
    }

    #[must_use]
    pub fn account(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Half-open `[from, to)` instant range covering the requested days.
    pub(crate) fn bounds(&self) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
        if self.start > self.end {
            return Err(EngineError::Validation(
                "invalid range: start must be <= end".to_string(),
            ));
        }
        let to = self
            .end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| EngineError::Validation("end date out of range".to_string()))?;
        Ok((
            self.start.and_time(NaiveTime::MIN).and_utc(),
            to.and_time(NaiveTime::MIN).and_utc(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn page_defaults_and_clamping() {
        assert_eq!(Page::new(None, None), Page { page: 1, limit: 25 });
        assert_eq!(Page::new(Some(0), Some(-3)), Page { page: 1, limit: 25 });
        assert_eq!(Page::new(Some(2), Some(10)), Page { page: 2, limit: 10 });
    }

    #[test]
    fn page_math() {
        let page = Page::new(Some(2), Some(25));
        assert_eq!(page.offset(), Some(25));
        assert_eq!(page.total_pages(30), 2);
        assert_eq!(page.total_pages(25), 1);
        assert_eq!(page.total_pages(0), 0);
    }

    #[test]
    fn unaddressable_offset_is_none() {
        assert_eq!(Page::new(Some(i64::MAX), Some(25)).offset(), None);
        assert_eq!(Page::new(Some(2), Some(i64::MAX)).offset(), Some(i64::MAX as u64));
        assert_eq!(Page::new(Some(3), Some(i64::MAX)).offset(), None);
    }

    #[test]
    fn summary_bounds_include_the_end_day() {
        let query = SummaryQuery::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        let (from, to) = query.bounds().unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn reversed_summary_range_is_rejected() {
        let query = SummaryQuery::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(matches!(query.bounds(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn transfer_becomes_transfer_transaction() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let cmd: TransactionCmd = TransferCmd::new(1, 2, 300, date).into();
        assert_eq!(cmd.kind, TransactionKind::Transfer);
        assert_eq!(cmd.destination_account_id, Some(2));
    }
}
