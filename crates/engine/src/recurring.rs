//! Recurring transaction rules.
//!
//! A [`RecurringRule`] is a transaction template plus a schedule. Each time the
//! scheduler finds it due it is materialized into one concrete transaction
//! dated at `next_due_date`, and `next_due_date` moves forward by exactly one
//! period.

use chrono::{DateTime, Days, Months, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, RecurringRuleCmd, ResultEngine, TransactionKind,
    transactions::TransactionDraft,
    util::{normalize_amount, normalize_category, normalize_text, validate_account_refs},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl TryFrom<&str> for Frequency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(EngineError::Validation(format!("invalid frequency: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringRule {
    pub id: i64,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub category: String,
    pub description: String,
    pub frequency: Frequency,
    pub interval: u32,
    pub start_date: DateTime<Utc>,
    pub next_due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
}

impl RecurringRule {
    /// The due date following `next_due_date`.
    ///
    /// Daily and weekly steps add whole days. Monthly and yearly steps add
    /// calendar months, clamped to the last day of a shorter target month.
    pub fn following_due_date(&self) -> ResultEngine<DateTime<Utc>> {
        let next = match self.frequency {
            Frequency::Daily => self
                .next_due_date
                .checked_add_days(Days::new(u64::from(self.interval))),
            Frequency::Weekly => self
                .next_due_date
                .checked_add_days(Days::new(7 * u64::from(self.interval))),
            Frequency::Monthly => self
                .next_due_date
                .checked_add_months(Months::new(self.interval)),
            Frequency::Yearly => self.interval.checked_mul(12).and_then(|months| {
                self.next_due_date.checked_add_months(Months::new(months))
            }),
        };
        next.ok_or_else(|| {
            EngineError::Validation(format!("rule {}: next due date out of range", self.id))
        })
    }

    /// The concrete transaction this rule produces for its current due date.
    pub(crate) fn materialize(&self) -> TransactionDraft {
        TransactionDraft {
            kind: self.kind,
            amount_minor: self.amount_minor,
            category: self.category.clone(),
            description: self.description.clone(),
            date: self.next_due_date,
            account_id: self.account_id,
            destination_account_id: self.destination_account_id,
        }
    }
}

/// Validated and normalized field set of a rule about to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RecurringRuleDraft {
    pub(crate) kind: TransactionKind,
    pub(crate) amount_minor: i64,
    pub(crate) category: String,
    pub(crate) description: String,
    pub(crate) frequency: Frequency,
    pub(crate) interval: u32,
    pub(crate) start_date: DateTime<Utc>,
    pub(crate) account_id: i64,
    pub(crate) destination_account_id: Option<i64>,
}

impl TryFrom<RecurringRuleCmd> for RecurringRuleDraft {
    type Error = EngineError;

    fn try_from(cmd: RecurringRuleCmd) -> Result<Self, Self::Error> {
        let amount_minor = normalize_amount(cmd.amount_minor)?;
        validate_account_refs(cmd.kind, cmd.account_id, cmd.destination_account_id)?;
        let interval = u32::try_from(cmd.interval)
            .ok()
            .filter(|interval| *interval >= 1)
            .ok_or_else(|| EngineError::Validation("interval must be >= 1".to_string()))?;
        Ok(Self {
            kind: cmd.kind,
            amount_minor,
            category: normalize_category(cmd.kind, cmd.category.as_deref()),
            description: normalize_text(cmd.description.as_deref()),
            frequency: cmd.frequency,
            interval,
            start_date: cmd.start_date,
            account_id: cmd.account_id,
            destination_account_id: cmd.destination_account_id,
        })
    }
}

impl RecurringRuleDraft {
    /// A new rule is first due on its start date.
    pub(crate) fn into_active_model(self, created_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            amount_minor: ActiveValue::Set(self.amount_minor),
            kind: ActiveValue::Set(self.kind.as_str().to_string()),
            category: ActiveValue::Set(self.category),
            description: ActiveValue::Set(self.description),
            frequency: ActiveValue::Set(self.frequency.as_str().to_string()),
            interval: ActiveValue::Set(i32::try_from(self.interval).unwrap_or(i32::MAX)),
            start_date: ActiveValue::Set(self.start_date),
            next_due_date: ActiveValue::Set(self.start_date),
            created_at: ActiveValue::Set(created_at),
            account_id: ActiveValue::Set(self.account_id),
            destination_account_id: ActiveValue::Set(self.destination_account_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recurring_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub amount_minor: i64,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub frequency: String,
    pub interval: i32,
    pub start_date: DateTimeUtc,
    pub next_due_date: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for RecurringRule {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let interval = u32::try_from(model.interval)
            .ok()
            .filter(|interval| *interval >= 1)
            .ok_or_else(|| {
                EngineError::Validation(format!("rule {}: stored interval is invalid", model.id))
            })?;
        Ok(Self {
            id: model.id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount_minor: model.amount_minor,
            category: model.category,
            description: model.description,
            frequency: Frequency::try_from(model.frequency.as_str())?,
            interval,
            start_date: model.start_date,
            next_due_date: model.next_due_date,
            created_at: model.created_at,
            account_id: model.account_id,
            destination_account_id: model.destination_account_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn rule(frequency: Frequency, interval: u32, start: DateTime<Utc>) -> RecurringRule {
        RecurringRule {
            id: 1,
            kind: TransactionKind::Expense,
            amount_minor: 1000,
            category: "Rent".to_string(),
            description: String::new(),
            frequency,
            interval,
            start_date: start,
            next_due_date: start,
            created_at: start,
            account_id: 1,
            destination_account_id: None,
        }
    }

    #[test]
    fn daily_and_weekly_add_days() {
        let daily = rule(Frequency::Daily, 3, at(2024, 2, 27));
        assert_eq!(daily.following_due_date().unwrap(), at(2024, 3, 1));

        let weekly = rule(Frequency::Weekly, 2, at(2024, 1, 1));
        assert_eq!(weekly.following_due_date().unwrap(), at(2024, 1, 15));
    }

    #[test]
    fn monthly_advances_from_current_due_date() {
        let mut monthly = rule(Frequency::Monthly, 1, at(2024, 1, 1));
        assert_eq!(monthly.following_due_date().unwrap(), at(2024, 2, 1));
        monthly.next_due_date = at(2024, 2, 1);
        assert_eq!(monthly.following_due_date().unwrap(), at(2024, 3, 1));
    }

    #[test]
    fn month_end_is_clamped_then_advances_from_the_clamped_date() {
        let mut monthly = rule(Frequency::Monthly, 1, at(2024, 1, 31));
        let feb = monthly.following_due_date().unwrap();
        assert_eq!(feb, at(2024, 2, 29));
        monthly.next_due_date = feb;
        assert_eq!(monthly.following_due_date().unwrap(), at(2024, 3, 29));
    }

    #[test]
    fn yearly_uses_interval_years() {
        let yearly = rule(Frequency::Yearly, 2, at(2024, 2, 29));
        assert_eq!(yearly.following_due_date().unwrap(), at(2026, 2, 28));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let cmd = RecurringRuleCmd::new(
            TransactionKind::Expense,
            1,
            100,
            Frequency::Monthly,
            at(2024, 1, 1),
        )
        .interval(0);
        let err = RecurringRuleDraft::try_from(cmd).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn materialized_transaction_is_dated_at_due_date() {
        let mut monthly = rule(Frequency::Monthly, 1, at(2024, 1, 1));
        monthly.next_due_date = at(2024, 2, 1);
        let draft = monthly.materialize();
        assert_eq!(draft.date, at(2024, 2, 1));
        assert_eq!(draft.amount_minor, 1000);
    }
}
