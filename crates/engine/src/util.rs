//! Internal helpers for input validation and normalization.
//!
//! These utilities are **not** part of the public API. Every write path runs
//! its input through them before anything touches the database.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine, TransactionKind};

pub(crate) const TRANSFER_CATEGORY: &str = "Transfer";

/// Amounts are stored as magnitudes; a negative input is taken as its
/// absolute value. Zero is never a valid amount.
pub(crate) fn normalize_amount(amount_minor: i64) -> ResultEngine<i64> {
    if amount_minor == 0 {
        return Err(EngineError::Validation(
            "amount must be non-zero".to_string(),
        ));
    }
    amount_minor
        .checked_abs()
        .ok_or_else(|| EngineError::Validation("amount out of range".to_string()))
}

/// A transfer names two distinct accounts; income and expense name exactly one.
pub(crate) fn validate_account_refs(
    kind: TransactionKind,
    account_id: i64,
    destination_account_id: Option<i64>,
) -> ResultEngine<()> {
    if account_id <= 0 {
        return Err(EngineError::Validation(format!(
            "invalid account id: {account_id}"
        )));
    }
    match (kind, destination_account_id) {
        (TransactionKind::Transfer, None) => Err(EngineError::Validation(
            "transfer requires a destination account".to_string(),
        )),
        (TransactionKind::Transfer, Some(dest)) if dest <= 0 => Err(EngineError::Validation(
            format!("invalid destination account id: {dest}"),
        )),
        (TransactionKind::Transfer, Some(dest)) if dest == account_id => Err(
            EngineError::Validation("transfer source and destination must differ".to_string()),
        ),
        (TransactionKind::Transfer, Some(_)) => Ok(()),
        (_, Some(_)) => Err(EngineError::Validation(format!(
            "{} must not have a destination account",
            kind.as_str()
        ))),
        (_, None) => Ok(()),
    }
}

/// Collapse runs of whitespace and NFC-normalize so that visually equal
/// categories group together in summaries.
pub(crate) fn normalize_category(kind: TransactionKind, value: Option<&str>) -> String {
    let collapsed = value
        .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if collapsed.is_empty() && kind == TransactionKind::Transfer {
        return TRANSFER_CATEGORY.to_string();
    }
    collapsed.nfc().collect()
}

pub(crate) fn normalize_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.nfc().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_rules() {
        assert_eq!(normalize_amount(-500).unwrap(), 500);
        assert_eq!(normalize_amount(42).unwrap(), 42);
        assert!(normalize_amount(0).is_err());
        assert!(normalize_amount(i64::MIN).is_err());
    }

    #[test]
    fn category_is_collapsed_and_defaulted_for_transfers() {
        assert_eq!(
            normalize_category(TransactionKind::Expense, Some("  Food \t and  drink ")),
            "Food and drink"
        );
        assert_eq!(normalize_category(TransactionKind::Expense, None), "");
        assert_eq!(
            normalize_category(TransactionKind::Transfer, Some("   ")),
            TRANSFER_CATEGORY
        );
    }

    #[test]
    fn category_is_nfc_normalized() {
        let decomposed = "Cafe\u{301}";
        assert_eq!(
            normalize_category(TransactionKind::Expense, Some(decomposed)),
            "Caf\u{e9}"
        );
    }

    #[test]
    fn account_refs() {
        assert!(validate_account_refs(TransactionKind::Income, 1, None).is_ok());
        assert!(validate_account_refs(TransactionKind::Income, 0, None).is_err());
        assert!(validate_account_refs(TransactionKind::Transfer, 1, Some(2)).is_ok());
        assert!(validate_account_refs(TransactionKind::Transfer, 1, Some(-2)).is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(normalize_required_name("   ", "account").is_err());
        assert_eq!(normalize_required_name(" Cash ", "account").unwrap(), "Cash");
    }
}
