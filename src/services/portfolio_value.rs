//! Aggregate portfolio value. The flat estimate multiplies cases by the
//! average debt; when a sigma is declared, each case's debt is drawn from a
//! normal distribution instead (Monte Carlo), clamped at zero.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::portfolio::DebtPortfolio;

pub fn flat_portfolio_value(portfolio: &DebtPortfolio) -> f64 {
    portfolio.face_value()
}

pub fn estimate_portfolio_value(portfolio: &DebtPortfolio) -> f64 {
    let mut rng = rand::thread_rng();
    estimate_portfolio_value_with_rng(portfolio, &mut rng)
}

pub fn estimate_portfolio_value_with_rng<R: Rng + ?Sized>(
    portfolio: &DebtPortfolio,
    rng: &mut R,
) -> f64 {
    let sigma = match portfolio.average_debt_sigma {
        Some(sigma) if sigma > 0.0 => sigma,
        _ => return flat_portfolio_value(portfolio),
    };

    let Ok(normal) = Normal::new(portfolio.average_debt_amount, sigma) else {
        log::warn!("invalid debt distribution parameters, falling back to the flat estimate");
        return flat_portfolio_value(portfolio);
    };

    (0..portfolio.total_cases)
        .map(|_| normal.sample(rng).max(0.0))
        .sum()
}
