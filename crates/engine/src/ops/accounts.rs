use chrono::Utc;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Account, AccountCmd, EngineError, ResultEngine, accounts, util::normalize_required_name};

use super::{Engine, with_tx};

impl Engine {
    /// Open a new account.
    ///
    /// The initial balance is stored as is; it is not modeled as a
    /// transaction. Names are unique.
    pub async fn create_account(&self, cmd: AccountCmd) -> ResultEngine<Account> {
        let name = normalize_required_name(&cmd.name, "account")?;
        let account_type = normalize_required_name(&cmd.account_type, "account type")?;
        with_tx!(self, |db_tx| {
            let exists = accounts::Entity::find()
                .filter(accounts::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::Conflict(name));
            }

            let model = accounts::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name.clone()),
                kind: ActiveValue::Set(account_type),
                balance: ActiveValue::Set(cmd.balance),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::from_db(err, &name))?;
            tracing::info!(account_id = model.id, name = %model.name, "account created");
            Ok(Account::from(model))
        })
    }

    /// All accounts, ordered by name.
    pub async fn accounts(&self) -> ResultEngine<Vec<Account>> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Account::from).collect())
    }

    pub async fn account(&self, account_id: i64) -> ResultEngine<Account> {
        accounts::Entity::find_by_id(account_id)
            .one(&self.database)
            .await?
            .map(Account::from)
            .ok_or_else(|| EngineError::NotFound(format!("account {account_id}")))
    }
}
