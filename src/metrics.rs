//! Price-change computations for a selected week.
//!
//! Missing data is an expected state here, not an error: a week without a
//! point has a current price of 0, week 1 has no previous week, and a zero
//! reference or previous price never produces NaN or infinity.

use crate::models::{ChangeCategory, Extremes, PriceChange, ProductWithPrices};

/// Compute the change of `product` at `week`.
pub fn compute_change(product: &ProductWithPrices, week: u32) -> PriceChange<'_> {
    let current_price = product.price_at(week).unwrap_or(0.0);
    let reference_price = product.product.reference_price;

    let diff_vs_reference = current_price - reference_price;
    let percent_vs_reference = percent_of(diff_vs_reference, reference_price).unwrap_or(0.0);

    let previous_price = if week > 1 {
        product.price_at(week - 1)
    } else {
        None
    };
    let diff_vs_previous = previous_price.map(|prev| current_price - prev);
    let percent_vs_previous = previous_price.and_then(|prev| percent_of(current_price - prev, prev));

    PriceChange {
        product,
        week,
        current_price,
        reference_price,
        diff_vs_reference,
        percent_vs_reference,
        previous_price,
        diff_vs_previous,
        percent_vs_previous,
        category: ChangeCategory::of(percent_vs_reference),
    }
}

/// `diff` as a percentage of `base`, or `None` for a zero base.
fn percent_of(diff: f64, base: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let pct = diff / base * 100.0;
    pct.is_finite().then_some(pct)
}

/// Category of a percent change vs. the reference price.
pub fn category(percent: f64) -> ChangeCategory {
    ChangeCategory::of(percent)
}

/// Changes of every product at `week`, in model order.
pub fn compute_all(products: &[ProductWithPrices], week: u32) -> Vec<PriceChange<'_>> {
    products.iter().map(|p| compute_change(p, week)).collect()
}

/// Largest increase and largest decrease vs. reference across all products.
///
/// Both are absent for an empty list. On ties the earlier product wins.
/// With no product above its reference the "increase" is simply the
/// highest percentage, which may be negative.
pub fn extremes(products: &[ProductWithPrices], week: u32) -> Extremes<'_> {
    let changes = compute_all(products, week);

    let max_increase = changes
        .iter()
        .fold(None::<&PriceChange<'_>>, |best, c| match best {
            Some(b) if c.percent_vs_reference <= b.percent_vs_reference => Some(b),
            _ => Some(c),
        })
        .cloned();

    let max_decrease = changes
        .iter()
        .fold(None::<&PriceChange<'_>>, |best, c| match best {
            Some(b) if c.percent_vs_reference >= b.percent_vs_reference => Some(b),
            _ => Some(c),
        })
        .cloned();

    Extremes {
        max_increase,
        max_decrease,
    }
}
