//! Sale price derivation for products.

use rust_decimal::{Decimal, RoundingStrategy};

/// Compute the final sale price from MRP, discount percent, and GST
/// percent.
///
/// The discount comes off the MRP first, GST is charged on the
/// discounted amount, and the result is rounded to two decimal places,
/// midpoints away from zero. No MRP means no price, never zero. A
/// missing discount counts as 0 and a missing GST rate as the baseline
/// 18 percent slab. Inputs are not range-checked here; the schema layer
/// validates before this hook runs.
pub fn derive_price(
    mrp: Option<Decimal>,
    discount_percent: Option<Decimal>,
    gst_percent: Option<Decimal>,
) -> Option<Decimal> {
    let mrp = mrp?;
    let discount = discount_percent.unwrap_or(Decimal::ZERO);
    let gst = gst_percent.unwrap_or_else(|| Decimal::from(18));

    let discounted = mrp - mrp * discount / Decimal::ONE_HUNDRED;
    let total = discounted + discounted * gst / Decimal::ONE_HUNDRED;

    Some(total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}
