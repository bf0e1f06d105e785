use chrono::{DateTime, Utc};

use sea_orm::{ActiveValue, DatabaseTransaction, prelude::*};

use crate::{EngineError, ResultEngine, Transaction, transactions, transactions::TransactionDraft};

use super::Engine;

mod list;
mod write;

pub use list::TransactionPage;

impl Engine {
    /// Insert a validated draft and apply its effects.
    ///
    /// Shared by direct creation, transfers and recurring materialization so
    /// every path posts balances the same way.
    pub(crate) async fn insert_transaction(
        &self,
        db_tx: &DatabaseTransaction,
        draft: &TransactionDraft,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Transaction> {
        let mut model = draft.to_active_model();
        model.created_at = ActiveValue::Set(created_at);
        let model = model.insert(db_tx).await?;
        let transaction = Transaction::try_from(model)?;
        self.apply_effects(db_tx, &transaction.effects()?).await?;
        Ok(transaction)
    }

    pub(crate) async fn require_transaction(
        &self,
        db_tx: &DatabaseTransaction,
        transaction_id: i64,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id)
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("transaction {transaction_id}")))
    }
}
