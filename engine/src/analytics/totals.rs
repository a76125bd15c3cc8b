// Whole-table totals for the summary cards and the charges/commission bars
use shared::models::{ChargesVsCommission, PaymentTable, PaymentTotals};

pub fn compute_totals(table: &PaymentTable) -> PaymentTotals {
    table.iter().fold(PaymentTotals::default(), |mut acc, record| {
        acc.amount_received += record.amount_received;
        acc.charges += record.charges;
        acc.commission += record.commission;
        acc.count += 1;
        acc
    })
}

pub fn compare_charges_commission(totals: &PaymentTotals) -> ChargesVsCommission {
    let commission_pct_of_charges = if totals.charges == 0.0 {
        0.0
    } else {
        totals.commission / totals.charges * 100.0
    };
    ChargesVsCommission {
        charges: totals.charges,
        commission: totals.commission,
        commission_pct_of_charges,
    }
}
