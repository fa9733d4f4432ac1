//! Annual leave entitlement lookup.

use rust_decimal::Decimal;

use crate::config::EntitlementTier;

/// Maps tenure to annual leave days through ordered tiers.
///
/// The highest tier whose lower bound is satisfied wins; tenure below every
/// tier is entitled to nothing.
///
/// # Examples
///
/// ```
/// use leave_adjudicator::config::EntitlementTier;
/// use leave_adjudicator::rules::EntitlementTable;
/// use rust_decimal::Decimal;
///
/// let table = EntitlementTable::new(vec![
///     EntitlementTier { min_years: Decimal::ONE, inclusive: true, days: 14 },
///     EntitlementTier { min_years: Decimal::from(5), inclusive: false, days: 20 },
///     EntitlementTier { min_years: Decimal::from(15), inclusive: true, days: 26 },
/// ]);
/// assert_eq!(table.entitlement_for(Decimal::new(5, 1)), 0);
/// assert_eq!(table.entitlement_for(Decimal::from(5)), 14);
/// assert_eq!(table.entitlement_for(Decimal::new(55, 1)), 20);
/// assert_eq!(table.entitlement_for(Decimal::from(15)), 26);
/// ```
#[derive(Debug, Clone)]
pub struct EntitlementTable {
    tiers: Vec<EntitlementTier>,
}

impl EntitlementTable {
    /// Creates a table, ordering the tiers by lower bound.
    pub fn new(tiers: Vec<EntitlementTier>) -> Self {
        let mut tiers = tiers;
        tiers.sort_by(|a, b| {
            a.min_years
                .cmp(&b.min_years)
                .then_with(|| b.inclusive.cmp(&a.inclusive))
        });
        Self { tiers }
    }

    /// Returns the annual entitlement in days for `tenure_years`.
    pub fn entitlement_for(&self, tenure_years: Decimal) -> u32 {
        self.tiers
            .iter()
            .filter(|tier| {
                tenure_years > tier.min_years
                    || (tier.inclusive && tenure_years == tier.min_years)
            })
            .map(|tier| tier.days)
            .next_back()
            .unwrap_or(0)
    }

    /// Returns the tiers in evaluation order.
    pub fn tiers(&self) -> &[EntitlementTier] {
        &self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn default_table() -> EntitlementTable {
        EntitlementTable::new(vec![
            EntitlementTier {
                min_years: dec("15"),
                inclusive: true,
                days: 26,
            },
            EntitlementTier {
                min_years: dec("1"),
                inclusive: true,
                days: 14,
            },
            EntitlementTier {
                min_years: dec("5"),
                inclusive: false,
                days: 20,
            },
        ])
    }

    #[test]
    fn test_below_one_year_is_zero() {
        let table = default_table();
        assert_eq!(table.entitlement_for(dec("0")), 0);
        assert_eq!(table.entitlement_for(dec("0.5")), 0);
    }

    #[test]
    fn test_one_to_five_inclusive_is_fourteen() {
        let table = default_table();
        assert_eq!(table.entitlement_for(dec("1")), 14);
        assert_eq!(table.entitlement_for(dec("3.5")), 14);
        assert_eq!(table.entitlement_for(dec("5")), 14);
    }

    #[test]
    fn test_above_five_below_fifteen_is_twenty() {
        let table = default_table();
        assert_eq!(table.entitlement_for(dec("5.5")), 20);
        assert_eq!(table.entitlement_for(dec("10")), 20);
        assert_eq!(table.entitlement_for(dec("14.5")), 20);
    }

    #[test]
    fn test_fifteen_and_above_is_twenty_six() {
        let table = default_table();
        assert_eq!(table.entitlement_for(dec("15")), 26);
        assert_eq!(table.entitlement_for(dec("32")), 26);
    }

    #[test]
    fn test_negative_tenure_is_zero() {
        assert_eq!(default_table().entitlement_for(dec("-2")), 0);
    }

    #[test]
    fn test_tiers_are_sorted_on_construction() {
        let table = default_table();
        let bounds: Vec<Decimal> = table.tiers().iter().map(|t| t.min_years).collect();
        assert_eq!(bounds, vec![dec("1"), dec("5"), dec("15")]);
    }
}
