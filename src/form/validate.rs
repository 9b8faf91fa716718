use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{NewTransaction, TransactionType};

pub(crate) const MAX_AMOUNT: i64 = 1_000_000;
pub(crate) const DESCRIPTION_MIN: usize = 3;
pub(crate) const DESCRIPTION_MAX: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum FieldError {
    #[error("Amount is required")]
    AmountRequired,
    #[error("Please enter a valid positive amount")]
    AmountInvalid,
    #[error("Amount cannot exceed $1,000,000")]
    AmountTooLarge,
    #[error("Please select a category")]
    CategoryRequired,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Description must be at least 3 characters")]
    DescriptionTooShort,
    #[error("Description cannot exceed 100 characters")]
    DescriptionTooLong,
}

/// Per-field validation results; `None` means the field is fine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors {
    pub(crate) amount: Option<FieldError>,
    pub(crate) category: Option<FieldError>,
    pub(crate) description: Option<FieldError>,
}

impl FieldErrors {
    pub(crate) fn is_empty(&self) -> bool {
        self.amount.is_none() && self.category.is_none() && self.description.is_none()
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Draft {
    pub(crate) kind: TransactionType,
    pub(crate) amount: String,
    pub(crate) category: String,
    pub(crate) description: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            kind: TransactionType::Expense,
            amount: String::new(),
            category: String::new(),
            description: String::new(),
        }
    }
}

pub(crate) fn validate_amount(raw: &str) -> Result<Decimal, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::AmountRequired);
    }
    let value = match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(value) => value,
        // Numeric but past what `Decimal` holds.
        Err(_) => {
            return Err(match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() && n > MAX_AMOUNT as f64 => FieldError::AmountTooLarge,
                _ => FieldError::AmountInvalid,
            })
        }
    };
    if value <= Decimal::ZERO {
        return Err(FieldError::AmountInvalid);
    }
    if value > Decimal::from(MAX_AMOUNT) {
        return Err(FieldError::AmountTooLarge);
    }
    Ok(value)
}

pub(crate) fn validate_category(category: &str) -> Result<(), FieldError> {
    if category.trim().is_empty() {
        return Err(FieldError::CategoryRequired);
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> Result<(), FieldError> {
    let len = description.trim().chars().count();
    match len {
        0 => Err(FieldError::DescriptionRequired),
        n if n < DESCRIPTION_MIN => Err(FieldError::DescriptionTooShort),
        n if n > DESCRIPTION_MAX => Err(FieldError::DescriptionTooLong),
        _ => Ok(()),
    }
}

/// Check every field and, if all pass, build the creation request with the
/// amount signed by type and the description trimmed.
pub(crate) fn validate(draft: &Draft) -> Result<NewTransaction, FieldErrors> {
    let amount = validate_amount(&draft.amount);
    let errors = FieldErrors {
        amount: amount.err(),
        category: validate_category(&draft.category).err(),
        description: validate_description(&draft.description).err(),
    };

    match amount {
        Ok(amount) if errors.is_empty() => Ok(NewTransaction {
            kind: draft.kind,
            amount: draft.kind.signed(amount),
            category: draft.category.clone(),
            description: draft.description.trim().to_string(),
        }),
        _ => Err(errors),
    }
}
