//! Product types and field validation for catalog entities (products, menus).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Money;

pub const TYPE_ENTREE: &str = "entree";
pub const TYPE_PLAT: &str = "plat";
pub const TYPE_DESSERT: &str = "dessert";
pub const TYPE_BOISSON: &str = "boisson";

/// All valid product type values. `boisson` is accepted alongside the courses.
pub const VALID_PRODUCT_TYPES: &[&str] = &[TYPE_ENTREE, TYPE_PLAT, TYPE_DESSERT, TYPE_BOISSON];

/// Maximum length of a catalog entity name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Decimal places kept by the `NUMERIC(10,2)` price columns.
pub const PRICE_SCALE: u32 = 2;

/// Largest value a `NUMERIC(10,2)` price column holds.
pub const MAX_PRICE: Money = Money::from_parts(1_410_065_407, 2, 0, false, PRICE_SCALE);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Entree,
    Plat,
    Dessert,
    Boisson,
}

impl ProductType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Entree => TYPE_ENTREE,
            ProductType::Plat => TYPE_PLAT,
            ProductType::Dessert => TYPE_DESSERT,
            ProductType::Boisson => TYPE_BOISSON,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            TYPE_ENTREE => Ok(ProductType::Entree),
            TYPE_PLAT => Ok(ProductType::Plat),
            TYPE_DESSERT => Ok(ProductType::Dessert),
            TYPE_BOISSON => Ok(ProductType::Boisson),
            other => Err(CoreError::Validation(format!(
                "Invalid product type '{other}'. Must be one of: {}",
                VALID_PRODUCT_TYPES.join(", ")
            ))),
        }
    }
}

/// Validate a catalog entity name: non-blank and at most [`MAX_NAME_LENGTH`] chars.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a price: not negative, at most [`PRICE_SCALE`] decimal places and
/// no larger than [`MAX_PRICE`], so it is stored without rounding.
pub fn validate_price(price: Money) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(CoreError::Validation(format!(
            "Price must have at most {PRICE_SCALE} decimal places"
        )));
    }
    ensure_within_price_range(price, "Price")
}

/// Reject amounts above [`MAX_PRICE`]. `label` names the amount in the message.
pub fn ensure_within_price_range(amount: Money, label: &str) -> Result<(), CoreError> {
    if amount > MAX_PRICE {
        return Err(CoreError::Validation(format!(
            "{label} must not exceed {MAX_PRICE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn every_declared_type_parses() {
        for name in VALID_PRODUCT_TYPES {
            let parsed = ProductType::from_str(name).unwrap();
            assert_eq!(parsed.as_str(), *name);
        }
    }

    #[test]
    fn boisson_is_a_valid_type() {
        assert_eq!("boisson".parse::<ProductType>().unwrap(), ProductType::Boisson);
    }

    #[test]
    fn unknown_type_rejected() {
        assert_matches!("soupe".parse::<ProductType>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_name_rejected() {
        assert!(validate_name("   ").is_err());
        assert!(validate_name("Salade César").is_ok());
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&name).is_err());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(validate_price(Money::from_str("-0.01").unwrap()).is_err());
        assert!(validate_price(Money::ZERO).is_ok());
        assert!(validate_price(Money::from_str("9.99").unwrap()).is_ok());
    }

    #[test]
    fn sub_cent_price_rejected() {
        assert_matches!(
            validate_price(Money::from_str("4.999").unwrap()),
            Err(CoreError::Validation(_))
        );
        // Trailing zeros carry no extra precision.
        assert!(validate_price(Money::from_str("4.9900").unwrap()).is_ok());
    }

    #[test]
    fn price_upper_bound_matches_column() {
        assert_eq!(MAX_PRICE.to_string(), "99999999.99");
        assert!(validate_price(MAX_PRICE).is_ok());
        assert_matches!(
            validate_price(Money::from_str("100000000.00").unwrap()),
            Err(CoreError::Validation(_))
        );
    }
}
