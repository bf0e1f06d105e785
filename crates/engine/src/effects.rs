//! Balance effects.
//!
//! An [`Effect`] is the signed change a transaction implies on one account.
//! [`effects_of`] is the only place that turns a transaction kind into signs:
//! creating, updating, deleting and materializing all go through it, and
//! undoing is [`reversal`] of the same set, so apply followed by reverse is
//! an exact identity on balances.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine, TransactionKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub account_id: i64,
    pub delta: i64,
}

impl Effect {
    fn new(account_id: i64, delta: i64) -> Self {
        Self { account_id, delta }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        Self::new(self.account_id, -self.delta)
    }
}

/// Maps `(kind, amount, accounts)` to the balance changes it implies.
///
/// - income: `+amount` on the account
/// - expense: `-amount` on the account
/// - transfer: `-amount` on the source, `+amount` on the destination
pub fn effects_of(
    kind: TransactionKind,
    amount_minor: i64,
    account_id: i64,
    destination_account_id: Option<i64>,
) -> ResultEngine<Vec<Effect>> {
    match kind {
        TransactionKind::Income => Ok(vec![Effect::new(account_id, amount_minor)]),
        TransactionKind::Expense => Ok(vec![Effect::new(account_id, -amount_minor)]),
        TransactionKind::Transfer => {
            let destination = destination_account_id.ok_or_else(|| {
                EngineError::Validation("transfer requires a destination account".to_string())
            })?;
            Ok(vec![
                Effect::new(account_id, -amount_minor),
                Effect::new(destination, amount_minor),
            ])
        }
    }
}

/// The effects that undo `effects`.
pub fn reversal(effects: &[Effect]) -> Vec<Effect> {
    effects.iter().map(|effect| effect.reversed()).collect()
}
