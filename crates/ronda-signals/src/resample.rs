//! Month-end resampling of daily prices and returns.

use ronda_traits::Panel;

/// Last observed price of each calendar month.
#[must_use]
pub fn month_end_prices(prices: &Panel) -> Panel {
    prices.month_end()
}

/// Compounded return of each calendar month, `∏(1 + r) - 1`.
///
/// Only present daily returns are compounded. A month with no present
/// return for a symbol is missing rather than zero.
#[must_use]
pub fn monthly_returns(returns: &Panel) -> Panel {
    returns.resample_monthly(|observed| {
        if observed.is_empty() {
            None
        } else {
            Some(observed.iter().fold(1.0, |growth, r| growth * (1.0 + r)) - 1.0)
        }
    })
}
