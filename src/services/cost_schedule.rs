//! Turns declared cost items into monthly buckets for the modeled year.
//! Date ranges are intersected with the calendar year; periodicity decides
//! which months inside the range are charged.

use chrono::Datelike;

use crate::domain::cost::{CostBucket, CostItem, CostTag, Periodicity};

pub const MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCostBuckets {
    pub fixed_other: [f64; MONTHS],
    pub variable_other: [f64; MONTHS],
    pub capital: [f64; MONTHS],
    /// One-time Capital-tagged amounts: the upfront investment. Held out of
    /// the monthly arrays so NPV/IRR never count them twice.
    pub one_time_capital: f64,
}

/// Active month range (0-based, inclusive) of a cost item within `year`.
/// `None` when the declared dates leave no overlap with the year.
fn active_month_range(item: &CostItem, year: i32) -> Option<(usize, usize)> {
    let start = match item.start_date {
        None => 0,
        Some(date) if date.year() < year => 0,
        Some(date) if date.year() > year => return None,
        Some(date) => date.month0() as usize,
    };
    let end = match item.end_date {
        None => MONTHS - 1,
        Some(date) if date.year() > year => MONTHS - 1,
        Some(date) if date.year() < year => return None,
        Some(date) => date.month0() as usize,
    };
    if start > end { None } else { Some((start, end)) }
}

/// Whether the item's anchor month itself falls inside the modeled year.
/// One-time and yearly charges only fire in their anchor month; a start date
/// in another year means they are not charged this year at all.
fn anchor_month(item: &CostItem, year: i32) -> Option<usize> {
    match item.start_date {
        None => Some(0),
        Some(date) if date.year() == year => Some(date.month0() as usize),
        Some(_) => None,
    }
}

/// Monthly amounts for one cost item across the modeled year.
pub fn item_monthly_amounts(item: &CostItem, year: i32) -> [f64; MONTHS] {
    let mut months = [0.0; MONTHS];
    match item.periodicity {
        Periodicity::OneTime | Periodicity::Yearly => {
            if let Some(month) = anchor_month(item, year) {
                months[month] += item.amount;
            }
        }
        Periodicity::Monthly => {
            if let Some((start, end)) = active_month_range(item, year) {
                for month in months.iter_mut().take(end + 1).skip(start) {
                    *month += item.amount;
                }
            }
        }
        Periodicity::Quarterly => {
            if let Some((start, end)) = active_month_range(item, year) {
                let mut month = start;
                while month <= end {
                    months[month] += item.amount;
                    month += 3;
                }
            }
        }
    }
    months
}

/// All cost items aggregated into the three monthly buckets, with one-time
/// capital held out as the upfront investment figure.
pub fn monthly_cost_buckets(costs: &[CostItem], year: i32) -> MonthlyCostBuckets {
    let mut buckets = MonthlyCostBuckets {
        fixed_other: [0.0; MONTHS],
        variable_other: [0.0; MONTHS],
        capital: [0.0; MONTHS],
        one_time_capital: 0.0,
    };

    for item in costs {
        if item.tag == CostTag::Capital && item.periodicity == Periodicity::OneTime {
            if anchor_month(item, year).is_some() {
                buckets.one_time_capital += item.amount;
            }
            continue;
        }

        let months = item_monthly_amounts(item, year);
        let target = match item.tag.bucket() {
            CostBucket::FixedOther => &mut buckets.fixed_other,
            CostBucket::VariableOther => &mut buckets.variable_other,
            CostBucket::Capital => &mut buckets.capital,
        };
        for (bucket, amount) in target.iter_mut().zip(months) {
            *bucket += amount;
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cost_item, on_date};
    use crate::domain::cost::Periodicity;

    #[test]
    fn yearly_cost_charges_full_amount_in_start_month_only() {
        let item = cost_item(
            "audit",
            120_000.0,
            CostTag::Operating,
            Periodicity::Yearly,
            Some(on_date(2026, 5, 10)),
            None,
        );
        let months = item_monthly_amounts(&item, 2026);
        assert_eq!(months[4], 120_000.0);
        assert_eq!(months.iter().sum::<f64>(), 120_000.0);
    }

    #[test]
    fn one_time_cost_outside_the_year_charges_nothing() {
        let item = cost_item(
            "setup",
            50_000.0,
            CostTag::Operating,
            Periodicity::OneTime,
            Some(on_date(2025, 3, 1)),
            None,
        );
        assert_eq!(item_monthly_amounts(&item, 2026).iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn monthly_cost_fills_the_active_range() {
        let item = cost_item(
            "rent",
            100_000.0,
            CostTag::Overhead,
            Periodicity::Monthly,
            Some(on_date(2026, 3, 1)),
            Some(on_date(2026, 6, 30)),
        );
        let months = item_monthly_amounts(&item, 2026);
        assert_eq!(months[1], 0.0);
        assert_eq!(months[2], 100_000.0);
        assert_eq!(months[5], 100_000.0);
        assert_eq!(months[6], 0.0);
        assert_eq!(months.iter().sum::<f64>(), 400_000.0);
    }

    #[test]
    fn monthly_cost_without_dates_runs_the_whole_year() {
        let item = cost_item(
            "rent",
            10_000.0,
            CostTag::Overhead,
            Periodicity::Monthly,
            None,
            None,
        );
        assert_eq!(item_monthly_amounts(&item, 2026).iter().sum::<f64>(), 120_000.0);
    }

    #[test]
    fn quarterly_cost_anchors_to_the_start_month() {
        let item = cost_item(
            "licenses",
            30_000.0,
            CostTag::Operating,
            Periodicity::Quarterly,
            Some(on_date(2026, 2, 1)),
            None,
        );
        let months = item_monthly_amounts(&item, 2026);
        assert_eq!(months[1], 30_000.0);
        assert_eq!(months[4], 30_000.0);
        assert_eq!(months[7], 30_000.0);
        assert_eq!(months[10], 30_000.0);
        assert_eq!(months.iter().sum::<f64>(), 120_000.0);
    }

    #[test]
    fn start_date_in_an_earlier_year_clamps_ranges_to_january() {
        let item = cost_item(
            "rent",
            10_000.0,
            CostTag::Overhead,
            Periodicity::Monthly,
            Some(on_date(2025, 11, 1)),
            Some(on_date(2026, 2, 28)),
        );
        let months = item_monthly_amounts(&item, 2026);
        assert_eq!(months[0], 10_000.0);
        assert_eq!(months[1], 10_000.0);
        assert_eq!(months[2], 0.0);
    }

    #[test]
    fn buckets_route_by_tag_and_hold_out_one_time_capital() {
        let costs = vec![
            cost_item("laptops", 600_000.0, CostTag::Capital, Periodicity::OneTime, None, None),
            cost_item("leasing", 20_000.0, CostTag::Capital, Periodicity::Monthly, None, None),
            cost_item("sms", 5_000.0, CostTag::Variable, Periodicity::Monthly, None, None),
            cost_item("rent", 50_000.0, CostTag::Overhead, Periodicity::Monthly, None, None),
        ];
        let buckets = monthly_cost_buckets(&costs, 2026);

        assert_eq!(buckets.one_time_capital, 600_000.0);
        assert_eq!(buckets.capital[0], 20_000.0);
        assert_eq!(buckets.variable_other[0], 5_000.0);
        assert_eq!(buckets.fixed_other[0], 50_000.0);
        assert_eq!(buckets.capital.iter().sum::<f64>(), 240_000.0);
    }
}
