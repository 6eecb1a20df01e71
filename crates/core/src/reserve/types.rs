//! Reserve study data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strata_shared::ReserveItemId;

/// One component in the reserve study.
///
/// Tracks a future capital expense (roof, paving, elevator) against the
/// money set aside for it so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveItem {
    /// Item id.
    pub id: ReserveItemId,
    /// Component name, e.g. "Roof replacement".
    pub name: String,
    /// Estimated cost at replacement time.
    pub estimated_cost: Decimal,
    /// Money set aside so far.
    pub current_funding: Decimal,
    /// Years until the expense is expected.
    pub years_remaining: u32,
    /// Contingency items are excluded from the recommended annual
    /// contribution.
    pub is_contingency: bool,
}

impl ReserveItem {
    /// Unfunded portion, floored at zero for overfunded items.
    #[must_use]
    pub fn funding_gap(&self) -> Decimal {
        (self.estimated_cost - self.current_funding).max(Decimal::ZERO)
    }

    /// Percent funded, rounded to two places.
    ///
    /// An item with no estimated cost is fully funded by definition,
    /// guarding the division.
    #[must_use]
    pub fn percent_funded(&self) -> Decimal {
        if self.estimated_cost.is_zero() {
            Decimal::ONE_HUNDRED
        } else {
            (self.current_funding / self.estimated_cost * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Contribution needed per remaining year to close the gap.
    ///
    /// When the expense is due now (`years_remaining == 0`) the whole
    /// gap is needed this year.
    #[must_use]
    pub fn annual_needed(&self) -> Decimal {
        let gap = self.funding_gap();
        if self.years_remaining == 0 {
            gap
        } else {
            (gap / Decimal::from(self.years_remaining)).round_dp(2)
        }
    }
}
