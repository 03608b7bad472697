//! How an order's total price is decided.

use std::str::FromStr;

use crate::catalog::{ensure_within_price_range, validate_price};
use crate::error::CoreError;
use crate::snapshot::OrderSnapshots;
use crate::types::Money;

pub const PRICING_COMPUTED: &str = "computed";
pub const PRICING_CLIENT: &str = "client";

/// Source of truth for the order price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricingPolicy {
    /// Sum of the snapshot prices. A client-supplied price is ignored.
    #[default]
    Computed,
    /// The price sent by the client, which is then required.
    Client,
}

impl FromStr for PricingPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRICING_COMPUTED => Ok(PricingPolicy::Computed),
            PRICING_CLIENT => Ok(PricingPolicy::Client),
            other => Err(CoreError::Validation(format!(
                "Invalid pricing policy '{other}'. Must be '{PRICING_COMPUTED}' or '{PRICING_CLIENT}'"
            ))),
        }
    }
}

impl PricingPolicy {
    /// Decide the price to persist for an order with the given lines.
    pub fn resolve(
        self,
        supplied: Option<Money>,
        snapshots: &OrderSnapshots,
    ) -> Result<Money, CoreError> {
        match self {
            PricingPolicy::Computed => {
                let total = snapshots.total();
                if let Some(supplied) = supplied {
                    if supplied != total {
                        tracing::debug!(
                            %supplied,
                            %total,
                            "Ignoring client-supplied order price"
                        );
                    }
                }
                ensure_within_price_range(total, "Order total")?;
                Ok(total)
            }
            PricingPolicy::Client => {
                let price = supplied
                    .ok_or_else(|| CoreError::Validation("Order price is required".into()))?;
                validate_price(price)?;
                Ok(price)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::snapshot::MenuSnapshot;

    fn one_menu(price: &str) -> OrderSnapshots {
        OrderSnapshots {
            menus: vec![MenuSnapshot {
                menu_id: 1,
                name: "Menu estival".into(),
                price: Money::from_str(price).unwrap(),
                description: None,
                image_url: None,
            }],
            products: vec![],
        }
    }

    #[test]
    fn computed_ignores_supplied_price() {
        let price = PricingPolicy::Computed
            .resolve(Some(Money::from_str("0.01").unwrap()), &one_menu("21.50"))
            .unwrap();
        assert_eq!(price.to_string(), "21.50");
    }

    #[test]
    fn client_uses_supplied_price() {
        let price = PricingPolicy::Client
            .resolve(Some(Money::from_str("19.90").unwrap()), &one_menu("21.50"))
            .unwrap();
        assert_eq!(price.to_string(), "19.90");
    }

    #[test]
    fn client_requires_a_price() {
        assert_matches!(
            PricingPolicy::Client.resolve(None, &one_menu("21.50")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn client_rejects_negative_price() {
        let result =
            PricingPolicy::Client.resolve(Some(Money::from_str("-1").unwrap()), &one_menu("1"));
        assert!(result.is_err());
    }

    #[test]
    fn client_rejects_sub_cent_price() {
        let result =
            PricingPolicy::Client.resolve(Some(Money::from_str("4.999").unwrap()), &one_menu("1"));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn computed_total_must_fit_price_column() {
        let mut snapshots = one_menu("99999999.99");
        snapshots.menus.push(snapshots.menus[0].clone());
        assert_matches!(
            PricingPolicy::Computed.resolve(None, &snapshots),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("computed".parse::<PricingPolicy>().unwrap(), PricingPolicy::Computed);
        assert_eq!("client".parse::<PricingPolicy>().unwrap(), PricingPolicy::Client);
        assert!("free".parse::<PricingPolicy>().is_err());
        assert_eq!(PricingPolicy::default(), PricingPolicy::Computed);
    }
}
