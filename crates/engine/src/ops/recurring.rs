use chrono::{DateTime, Utc};
use tokio::sync::watch;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, RecurringRule, RecurringRuleCmd, ResultEngine, recurring,
    recurring::RecurringRuleDraft,
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_recurring_rule(&self, cmd: RecurringRuleCmd) -> ResultEngine<RecurringRule> {
        let draft = RecurringRuleDraft::try_from(cmd)?;
        let rule = with_tx!(self, |db_tx| {
            let model = draft.into_active_model(Utc::now()).insert(&db_tx).await?;
            RecurringRule::try_from(model)
        })?;
        tracing::info!(
            rule_id = rule.id,
            frequency = rule.frequency.as_str(),
            interval = rule.interval,
            "recurring rule created"
        );
        Ok(rule)
    }

    /// All rules, soonest due first.
    pub async fn list_recurring_rules(&self) -> ResultEngine<Vec<RecurringRule>> {
        recurring::Entity::find()
            .order_by_asc(recurring::Column::NextDueDate)
            .order_by_asc(recurring::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(RecurringRule::try_from)
            .collect()
    }

    /// Remove a schedule. Transactions it already produced stay.
    pub async fn delete_recurring_rule(&self, rule_id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = recurring::Entity::delete_by_id(rule_id)
                .exec(&db_tx)
                .await?;
            if result.rows_affected == 0 {
                return Err(EngineError::NotFound(format!("recurring rule {rule_id}")));
            }
            Ok(())
        })
    }

    /// Materialize every rule due at `now`.
    ///
    /// See [`Engine::run_recurring_tick_cancellable`].
    pub async fn run_recurring_tick(&self, now: DateTime<Utc>) -> ResultEngine<u64> {
        let (_cancel, rx) = watch::channel(false);
        self.run_recurring_tick_cancellable(now, &rx).await
    }

    /// Materialize every rule due at `now`, watching `cancel` between rules.
    ///
    /// Each due rule produces one transaction dated at its `next_due_date`,
    /// posted to balances like any other transaction, and its due date moves
    /// forward one period. The whole batch is a single unit of work: any
    /// failure or a raised `cancel` rolls back every rule. Returns the number
    /// of rules processed. Running it again at the same instant finds
    /// nothing due unless a rule was more than one period behind.
    pub async fn run_recurring_tick_cancellable(
        &self,
        now: DateTime<Utc>,
        cancel: &watch::Receiver<bool>,
    ) -> ResultEngine<u64> {
        if *cancel.borrow() {
            return Err(EngineError::Cancelled);
        }
        let processed = with_tx!(self, |db_tx| {
            let due = recurring::Entity::find()
                .filter(recurring::Column::NextDueDate.lte(now))
                .order_by_asc(recurring::Column::NextDueDate)
                .order_by_asc(recurring::Column::Id)
                .all(&db_tx)
                .await?;

            let mut processed = 0_u64;
            for model in due {
                if *cancel.borrow() {
                    tracing::warn!(processed, "recurring tick cancelled");
                    return Err(EngineError::Cancelled);
                }
                let rule = RecurringRule::try_from(model)?;
                let transaction = self
                    .insert_transaction(&db_tx, &rule.materialize(), now)
                    .await?;
                let next_due_date = rule.following_due_date()?;

                recurring::ActiveModel {
                    id: ActiveValue::Unchanged(rule.id),
                    next_due_date: ActiveValue::Set(next_due_date),
                    ..Default::default()
                }
                .update(&db_tx)
                .await?;

                tracing::info!(
                    rule_id = rule.id,
                    transaction_id = transaction.id,
                    %next_due_date,
                    "recurring rule materialized"
                );
                processed += 1;
            }
            Ok(processed)
        })?;
        tracing::info!(processed, %now, "recurring tick committed");
        Ok(processed)
    }
}
