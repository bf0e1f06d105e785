use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

pub mod account {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub name: String,
        /// Free-text tag such as `bank`, `cash` or `credit`.
        #[serde(rename = "type")]
        pub account_type: String,
        #[serde(default)]
        pub balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub account_type: String,
        pub balance: i64,
        pub created_at: DateTime<FixedOffset>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
        Transfer,
    }

    /// Body of both create and full update.
    ///
    /// `amount` is in minor units; a negative value is taken as its magnitude.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub account_id: i64,
        pub destination_account_id: Option<i64>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub date: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferNew {
        pub from_account_id: i64,
        pub to_account_id: i64,
        pub amount: i64,
        pub category: Option<String>,
        pub description: Option<String>,
        pub date: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub category: String,
        pub description: String,
        pub date: DateTime<FixedOffset>,
        pub created_at: DateTime<FixedOffset>,
        pub account_id: i64,
        pub destination_account_id: Option<i64>,
    }

    /// Query string of the list endpoint. Invalid or missing values fall
    /// back to page 1 and 25 items.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        pub page: Option<String>,
        pub limit: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub data: Vec<TransactionView>,
        pub page: u64,
        pub limit: u64,
        pub total_items: u64,
        pub total_pages: u64,
    }
}

pub mod recurring {
    use super::*;
    use crate::transaction::TransactionKind;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Frequency {
        Daily,
        Weekly,
        Monthly,
        Yearly,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub account_id: i64,
        pub destination_account_id: Option<i64>,
        pub category: Option<String>,
        pub description: Option<String>,
        pub frequency: Frequency,
        /// Defaults to 1.
        pub interval: Option<i32>,
        pub start_date: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringView {
        pub id: i64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub amount: i64,
        pub account_id: i64,
        pub destination_account_id: Option<i64>,
        pub category: String,
        pub description: String,
        pub frequency: Frequency,
        pub interval: u32,
        pub start_date: DateTime<FixedOffset>,
        pub next_due_date: DateTime<FixedOffset>,
        pub created_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringRun {
        pub processed: u64,
    }
}

pub mod summary {
    use super::*;

    /// Inclusive date range; the server defaults to the current month.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SummaryGet {
        pub start: Option<NaiveDate>,
        pub end: Option<NaiveDate>,
        pub account_id: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Summary {
        pub total_income: i64,
        pub total_expense: i64,
        pub net_balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySummary {
        pub category: String,
        pub total_amount: i64,
    }
}
