//! Transaction primitives.
//!
//! A `Transaction` is a movement of money that changes one account balance
//! (income, expense) or two (transfer). The stored amount is always a
//! non-negative magnitude; the sign of each balance change is derived from
//! the kind by [`effects_of`](crate::effects_of).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    Effect, EngineError, ResultEngine, TransactionCmd, effects_of,
    util::{normalize_amount, normalize_category, normalize_text, validate_account_refs},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            other => Err(EngineError::Validation(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub account_id: i64,
    /// Set if and only if `kind` is `Transfer`.
    pub destination_account_id: Option<i64>,
}

impl Transaction {
    /// Balance changes this transaction implies.
    pub fn effects(&self) -> ResultEngine<Vec<Effect>> {
        effects_of(
            self.kind,
            self.amount_minor,
            self.account_id,
            self.destination_account_id,
        )
    }
}

/// Validated and normalized field set of a transaction about to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TransactionDraft {
    pub(crate) kind: TransactionKind,
    pub(crate) amount_minor: i64,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) date: DateTime<Utc>,
    pub(crate) account_id: i64,
    pub(crate) destination_account_id: Option<i64>,
}

impl TryFrom<TransactionCmd> for TransactionDraft {
    type Error = EngineError;

    fn try_from(cmd: TransactionCmd) -> Result<Self, Self::Error> {
        let amount_minor = normalize_amount(cmd.amount_minor)?;
        validate_account_refs(cmd.kind, cmd.account_id, cmd.destination_account_id)?;
        Ok(Self {
            kind: cmd.kind,
            amount_minor,
            category: normalize_category(cmd.kind, cmd.category.as_deref()),
            description: normalize_text(cmd.description.as_deref()),
            date: cmd.date,
            account_id: cmd.account_id,
            destination_account_id: cmd.destination_account_id,
        })
    }
}

impl TransactionDraft {
    /// Active model carrying every draft field; `id` and `created_at` are left
    /// to the caller.
    pub(crate) fn to_active_model(&self) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            amount_minor: ActiveValue::Set(self.amount_minor),
            kind: ActiveValue::Set(self.kind.as_str().to_string()),
            category: ActiveValue::Set(self.category.clone()),
            description: ActiveValue::Set(self.description.clone()),
            date: ActiveValue::Set(self.date),
            created_at: ActiveValue::NotSet,
            account_id: ActiveValue::Set(self.account_id),
            destination_account_id: ActiveValue::Set(self.destination_account_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub amount_minor: i64,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount_minor: model.amount_minor,
            category: model.category,
            description: model.description,
            date: model.date,
            created_at: model.created_at,
            account_id: model.account_id,
            destination_account_id: model.destination_account_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(kind: TransactionKind, amount_minor: i64) -> TransactionCmd {
        TransactionCmd::new(kind, 1, amount_minor, Utc::now())
    }

    #[test]
    fn negative_amount_is_normalized_to_magnitude() {
        let draft = TransactionDraft::try_from(cmd(TransactionKind::Expense, -500)).unwrap();
        assert_eq!(draft.amount_minor, 500);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = TransactionDraft::try_from(cmd(TransactionKind::Income, 0)).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn transfer_requires_distinct_destination() {
        let missing = TransactionDraft::try_from(cmd(TransactionKind::Transfer, 100)).unwrap_err();
        assert!(matches!(missing, EngineError::Validation(_)));

        let same = TransactionDraft::try_from(cmd(TransactionKind::Transfer, 100).destination(1))
            .unwrap_err();
        assert!(matches!(same, EngineError::Validation(_)));

        let ok = TransactionDraft::try_from(cmd(TransactionKind::Transfer, 100).destination(2))
            .unwrap();
        assert_eq!(ok.category, "Transfer");
    }

    #[test]
    fn destination_on_expense_is_rejected() {
        let err = TransactionDraft::try_from(cmd(TransactionKind::Expense, 100).destination(2))
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn kind_round_trips_through_storage_string() {
        for kind in [
            TransactionKind::Income,
            TransactionKind::Expense,
            TransactionKind::Transfer,
        ] {
            assert_eq!(TransactionKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(TransactionKind::try_from("refund").is_err());
    }
}
