//! Mapping between engine values and wire types.

use api_types::{
    account::AccountView,
    recurring::{Frequency as ApiFrequency, RecurringView},
    summary::{CategorySummary, Summary},
    transaction::{TransactionKind as ApiKind, TransactionView},
};

pub(crate) fn kind_from_api(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
        ApiKind::Transfer => engine::TransactionKind::Transfer,
    }
}

pub(crate) fn kind_to_api(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
        engine::TransactionKind::Transfer => ApiKind::Transfer,
    }
}

pub(crate) fn frequency_from_api(frequency: ApiFrequency) -> engine::Frequency {
    match frequency {
        ApiFrequency::Daily => engine::Frequency::Daily,
        ApiFrequency::Weekly => engine::Frequency::Weekly,
        ApiFrequency::Monthly => engine::Frequency::Monthly,
        ApiFrequency::Yearly => engine::Frequency::Yearly,
    }
}

fn frequency_to_api(frequency: engine::Frequency) -> ApiFrequency {
    match frequency {
        engine::Frequency::Daily => ApiFrequency::Daily,
        engine::Frequency::Weekly => ApiFrequency::Weekly,
        engine::Frequency::Monthly => ApiFrequency::Monthly,
        engine::Frequency::Yearly => ApiFrequency::Yearly,
    }
}

pub(crate) fn account_view(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        name: account.name,
        account_type: account.account_type,
        balance: account.balance,
        created_at: account.created_at.fixed_offset(),
    }
}

pub(crate) fn transaction_view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: kind_to_api(tx.kind),
        amount: tx.amount_minor,
        category: tx.category,
        description: tx.description,
        date: tx.date.fixed_offset(),
        created_at: tx.created_at.fixed_offset(),
        account_id: tx.account_id,
        destination_account_id: tx.destination_account_id,
    }
}

pub(crate) fn recurring_view(rule: engine::RecurringRule) -> RecurringView {
    RecurringView {
        id: rule.id,
        kind: kind_to_api(rule.kind),
        amount: rule.amount_minor,
        account_id: rule.account_id,
        destination_account_id: rule.destination_account_id,
        category: rule.category,
        description: rule.description,
        frequency: frequency_to_api(rule.frequency),
        interval: rule.interval,
        start_date: rule.start_date.fixed_offset(),
        next_due_date: rule.next_due_date.fixed_offset(),
        created_at: rule.created_at.fixed_offset(),
    }
}

pub(crate) fn summary_view(summary: engine::Summary) -> Summary {
    Summary {
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        net_balance: summary.net_balance,
    }
}

pub(crate) fn category_view(category: engine::CategorySummary) -> CategorySummary {
    CategorySummary {
        category: category.category,
        total_amount: category.total_amount,
    }
}
