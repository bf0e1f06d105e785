use chrono::Utc;

use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, Transaction, TransactionCmd, TransferCmd, reversal, transactions,
    transactions::TransactionDraft,
};

use super::super::{Engine, with_tx};

impl Engine {
    /// Create an income, expense or transfer.
    ///
    /// A negative amount is taken as its magnitude. The row insert and every
    /// balance adjustment commit together or not at all.
    pub async fn create_transaction(&self, cmd: TransactionCmd) -> ResultEngine<Transaction> {
        let draft = TransactionDraft::try_from(cmd)?;
        let created_at = Utc::now();
        let transaction = with_tx!(self, |db_tx| {
            self.insert_transaction(&db_tx, &draft, created_at).await
        })?;
        tracing::info!(
            transaction_id = transaction.id,
            kind = transaction.kind.as_str(),
            amount_minor = transaction.amount_minor,
            "transaction created"
        );
        Ok(transaction)
    }

    /// Move `amount_minor` from one account to another.
    ///
    /// Unlike [`Engine::create_transaction`] the amount must already be
    /// strictly positive.
    pub async fn create_transfer(&self, cmd: TransferCmd) -> ResultEngine<Transaction> {
        if cmd.amount_minor <= 0 {
            return Err(EngineError::Validation(
                "transfer amount must be > 0".to_string(),
            ));
        }
        self.create_transaction(cmd.into()).await
    }

    /// Replace every field of a transaction.
    ///
    /// The old effects are reversed and the new ones applied in the same
    /// unit of work, so balances never reflect both states at once. The kind
    /// may change (e.g. expense to transfer).
    pub async fn update_transaction(
        &self,
        transaction_id: i64,
        cmd: TransactionCmd,
    ) -> ResultEngine<Transaction> {
        let draft = TransactionDraft::try_from(cmd)?;
        let transaction = with_tx!(self, |db_tx| {
            let old_model = self.require_transaction(&db_tx, transaction_id).await?;
            let old = Transaction::try_from(old_model)?;
            self.apply_effects(&db_tx, &reversal(&old.effects()?))
                .await?;

            let mut model = draft.to_active_model();
            model.id = ActiveValue::Unchanged(transaction_id);
            model.created_at = ActiveValue::Unchanged(old.created_at);
            let model = model.update(&db_tx).await?;
            let updated = Transaction::try_from(model)?;

            self.apply_effects(&db_tx, &updated.effects()?).await?;
            Ok(updated)
        })?;
        tracing::info!(transaction_id, "transaction updated");
        Ok(transaction)
    }

    /// Remove a transaction after reversing its effects.
    ///
    /// Balances end exactly as if the transaction never existed. A row that
    /// vanished between read and delete fails with `NotFound`.
    pub async fn delete_transaction(&self, transaction_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self.require_transaction(&db_tx, transaction_id).await?;
            let old = Transaction::try_from(model)?;
            self.apply_effects(&db_tx, &reversal(&old.effects()?))
                .await?;

            let result = transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::NotFound(format!(
                    "transaction {transaction_id}"
                )));
            }
            Ok(())
        })?;
        tracing::info!(transaction_id, "transaction deleted");
        Ok(())
    }
}
