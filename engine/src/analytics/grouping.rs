// Grouped aggregates: daily series for the dual-axis chart and category shares for the funnel
use chrono::NaiveDate;
use shared::models::{CategoryShare, DailyTotals, PaymentTable};
use std::collections::BTreeMap;

/// Sums amount received and charges per payment date, ascending by date.
pub fn group_by_date(table: &PaymentTable) -> Vec<DailyTotals> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for record in table.iter() {
        let entry = by_date.entry(record.payment_date).or_insert((0.0, 0.0));
        entry.0 += record.amount_received;
        entry.1 += record.charges;
    }

    by_date
        .into_iter()
        .map(|(date, (amount_received, charges))| DailyTotals {
            date,
            amount_received,
            charges,
        })
        .collect()
}

/// Counts rows per `Remunerado` value and each value's share of all rows,
/// ordered by category label.
pub fn group_by_category(table: &PaymentTable) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in table.iter() {
        *counts.entry(record.paid_category.as_str()).or_insert(0) += 1;
    }

    let total = table.len();
    counts
        .into_iter()
        .map(|(category, count)| CategoryShare {
            category: category.to_string(),
            count,
            percentage: share(count as f64, total as f64),
        })
        .collect()
}

/// `100 * part / total`, defined as 0 when the total is 0.
pub fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::PaymentRecord;

    fn create_record(date: (i32, u32, u32), amount_received: f64, charges: f64, category: &str) -> PaymentRecord {
        PaymentRecord {
            line: 2,
            amount_received,
            charges,
            commission: 0.0,
            payment_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            delay: 0.0,
            paid_category: category.to_string(),
            passthrough: Vec::new(),
        }
    }

    fn table(records: Vec<PaymentRecord>) -> PaymentTable {
        PaymentTable::new(Vec::new(), records)
    }

    #[test]
    fn test_group_by_date_sorted_and_summed() {
        let t = table(vec![
            create_record((2024, 3, 5), 10.0, 1.0, "Sim"),
            create_record((2024, 1, 2), 20.0, 2.0, "Sim"),
            create_record((2024, 3, 5), 30.5, 3.5, "Não"),
            create_record((2023, 12, 31), 5.0, 0.5, "Não"),
        ]);
        let daily = group_by_date(&t);

        let dates: Vec<NaiveDate> = daily.iter().map(|d| d.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(daily.len(), 3);

        for entry in &daily {
            let expected: f64 = t
                .iter()
                .filter(|r| r.payment_date == entry.date)
                .map(|r| r.amount_received)
                .sum();
            assert!((entry.amount_received - expected).abs() < 1e-9);
        }
        assert_eq!(daily[2].amount_received, 40.5);
        assert_eq!(daily[2].charges, 4.5);
    }

    #[test]
    fn test_group_by_date_empty() {
        assert!(group_by_date(&PaymentTable::default()).is_empty());
    }

    #[test]
    fn test_group_by_category_percentages_sum_to_100() {
        let t = table(vec![
            create_record((2024, 1, 1), 1.0, 0.0, "Sim"),
            create_record((2024, 1, 1), 1.0, 0.0, "Não"),
            create_record((2024, 1, 1), 1.0, 0.0, "Sim"),
        ]);
        let shares = group_by_category(&t);

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category, "Não");
        assert_eq!(shares[0].count, 1);
        assert_eq!(shares[1].category, "Sim");
        assert_eq!(shares[1].count, 2);

        let total: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_group_by_category_uses_raw_text() {
        let t = table(vec![
            create_record((2024, 1, 1), 1.0, 0.0, "Sim"),
            create_record((2024, 1, 1), 1.0, 0.0, "SIM"),
        ]);
        assert_eq!(group_by_category(&t).len(), 2);
    }

    #[test]
    fn test_group_by_category_empty_table() {
        assert!(group_by_category(&PaymentTable::default()).is_empty());
        assert_eq!(share(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_group_by_category_disjoint_tables_do_not_mix() {
        let left = table(vec![
            create_record((2024, 1, 1), 1.0, 0.0, "A"),
            create_record((2024, 1, 1), 1.0, 0.0, "A"),
            create_record((2024, 1, 1), 1.0, 0.0, "B"),
        ]);
        let right = table(vec![
            create_record((2024, 1, 1), 1.0, 0.0, "C"),
            create_record((2024, 1, 1), 1.0, 0.0, "D"),
            create_record((2024, 1, 1), 1.0, 0.0, "D"),
            create_record((2024, 1, 1), 1.0, 0.0, "D"),
        ]);

        let expected: Vec<(String, usize)> = group_by_category(&left)
            .into_iter()
            .chain(group_by_category(&right))
            .map(|s| (s.category, s.count))
            .collect();
        let merged: Vec<(String, usize)> = group_by_category(&left.concat(right))
            .into_iter()
            .map(|s| (s.category, s.count))
            .collect();

        assert_eq!(merged, expected);
    }
}
