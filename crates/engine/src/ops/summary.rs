//! Read-only projections over transactions and accounts.

use serde::{Deserialize, Serialize};

use sea_orm::{
    Condition, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
    sea_query::{Expr, SimpleExpr},
};

use crate::{ResultEngine, SummaryQuery, TransactionKind, accounts, transactions};

use super::{Engine, with_tx};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: i64,
    pub total_expense: i64,
    /// Sum of current stored balances, not income minus expense.
    pub net_balance: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_amount: i64,
}

fn range_condition(query: &SummaryQuery) -> ResultEngine<Condition> {
    let (from, to) = query.bounds()?;
    let mut condition = Condition::all()
        .add(transactions::Column::Date.gte(from))
        .add(transactions::Column::Date.lt(to));
    if let Some(account_id) = query.account_id {
        condition = condition.add(transactions::Column::AccountId.eq(account_id));
    }
    Ok(condition)
}

impl Engine {
    /// Income and expense totals over the range, plus the net balance.
    ///
    /// Transfers count as neither. The net balance is the stored balance of
    /// the filtered account, or of all accounts, at call time; it does not
    /// depend on the range.
    pub async fn summary(&self, query: SummaryQuery) -> ResultEngine<Summary> {
        let condition = range_condition(&query)?;
        with_tx!(self, |db_tx| {
            let (total_income, total_expense) = transactions::Entity::find()
                .select_only()
                .column_as(sum_of_kind(TransactionKind::Income), "total_income")
                .column_as(sum_of_kind(TransactionKind::Expense), "total_expense")
                .filter(condition)
                .into_tuple::<(i64, i64)>()
                .one(&db_tx)
                .await?
                .unwrap_or_default();
            let net_balance = net_balance(&db_tx, query.account_id).await?;
            Ok(Summary {
                total_income,
                total_expense,
                net_balance,
            })
        })
    }

    /// Expense totals per category, largest first.
    pub async fn category_summary(&self, query: SummaryQuery) -> ResultEngine<Vec<CategorySummary>> {
        let condition = range_condition(&query)?
            .add(transactions::Column::Kind.eq(TransactionKind::Expense.as_str()));
        let rows = transactions::Entity::find()
            .select_only()
            .column(transactions::Column::Category)
            .column_as(Expr::cust("SUM(amount_minor)"), "total_amount")
            .filter(condition)
            .group_by(transactions::Column::Category)
            .order_by_desc(Expr::cust("total_amount"))
            .order_by_asc(transactions::Column::Category)
            .into_tuple::<(String, i64)>()
            .all(&self.database)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(category, total_amount)| CategorySummary {
                category,
                total_amount,
            })
            .collect())
    }
}

fn sum_of_kind(kind: TransactionKind) -> SimpleExpr {
    Expr::cust(format!(
        "COALESCE(SUM(CASE WHEN kind = '{}' THEN amount_minor ELSE 0 END), 0)",
        kind.as_str()
    ))
}

async fn net_balance(db_tx: &DatabaseTransaction, account_id: Option<i64>) -> ResultEngine<i64> {
    let mut select = accounts::Entity::find()
        .select_only()
        .column_as(Expr::cust("COALESCE(SUM(balance), 0)"), "net_balance");
    if let Some(account_id) = account_id {
        select = select.filter(accounts::Column::Id.eq(account_id));
    }
    Ok(select
        .into_tuple::<i64>()
        .one(db_tx)
        .await?
        .unwrap_or_default())
}
