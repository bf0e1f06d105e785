use serde::{Deserialize, Serialize};

use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, prelude::*};

use crate::{EngineError, Page, ResultEngine, Transaction, transactions};

use super::super::Engine;

/// One page of transactions, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub data: Vec<Transaction>,
    pub page: u64,
    pub limit: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl Engine {
    /// Return a transaction by id.
    pub async fn transaction(&self, transaction_id: i64) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("transaction {transaction_id}")))?;
        Transaction::try_from(model)
    }

    /// List transactions ordered by `date DESC, id DESC`.
    ///
    /// A page past the end returns an empty `data` with the real totals.
    pub async fn list_transactions(&self, page: Page) -> ResultEngine<TransactionPage> {
        let total_items = transactions::Entity::find().count(&self.database).await?;
        let models = match page.offset() {
            Some(offset) => {
                transactions::Entity::find()
                    .order_by_desc(transactions::Column::Date)
                    .order_by_desc(transactions::Column::Id)
                    .offset(offset)
                    .limit(page.limit)
                    .all(&self.database)
                    .await?
            }
            None => Vec::new(),
        };

        let data = models
            .into_iter()
            .map(Transaction::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;
        Ok(TransactionPage {
            data,
            page: page.page,
            limit: page.limit,
            total_items,
            total_pages: page.total_pages(total_items),
        })
    }
}
