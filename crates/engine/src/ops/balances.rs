use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*, sea_query::Expr};

use crate::{Effect, EngineError, ResultEngine, accounts};

use super::Engine;

impl Engine {
    /// Add `delta` to one account's stored balance.
    ///
    /// The increment is a single `balance = balance + delta` statement so
    /// concurrent adjustments to the same row serialize in the store. The
    /// row only matches while the sum stays an integer. Zero affected rows
    /// means the account does not exist or the balance would overflow;
    /// either fails the enclosing unit of work.
    pub(crate) async fn adjust_balance(
        &self,
        db_tx: &DatabaseTransaction,
        account_id: i64,
        delta: i64,
    ) -> ResultEngine<()> {
        let result = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(delta),
            )
            .filter(accounts::Column::Id.eq(account_id))
            .filter(Expr::cust(format!(
                "typeof(\"balance\" + ({delta})) = 'integer'"
            )))
            .exec(db_tx)
            .await?;
        if result.rows_affected > 0 {
            return Ok(());
        }

        let exists = accounts::Entity::find_by_id(account_id)
            .one(db_tx)
            .await?
            .is_some();
        if exists {
            tracing::warn!(account_id, delta, "balance adjustment would overflow");
            return Err(EngineError::Validation(format!(
                "balance of account {account_id} out of range"
            )));
        }
        tracing::warn!(account_id, delta, "balance adjustment hit a missing account");
        Err(EngineError::AccountNotFound(account_id))
    }

    pub(crate) async fn apply_effects(
        &self,
        db_tx: &DatabaseTransaction,
        effects: &[Effect],
    ) -> ResultEngine<()> {
        for effect in effects {
            tracing::debug!(
                account_id = effect.account_id,
                delta = effect.delta,
                "adjusting balance"
            );
            self.adjust_balance(db_tx, effect.account_id, effect.delta)
                .await?;
        }
        Ok(())
    }
}
