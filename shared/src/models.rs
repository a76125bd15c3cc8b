use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the payments file after every relevant field was normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Source line, header being line 1.
    pub line: usize,
    #[serde(rename = "Valor_Recebido")]
    pub amount_received: f64,
    #[serde(rename = "Encargos")]
    pub charges: f64,
    #[serde(rename = "comissao")]
    pub commission: f64,
    #[serde(rename = "Data_Pagamento")]
    pub payment_date: NaiveDate,
    #[serde(rename = "Atraso")]
    pub delay: f64,
    #[serde(rename = "Remunerado")]
    pub paid_category: String,
    /// Values of the columns the engine does not interpret, aligned with
    /// `PaymentTable::passthrough_columns`.
    #[serde(default)]
    pub passthrough: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTable {
    /// Trimmed labels of the passthrough columns, in file order.
    pub passthrough_columns: Vec<String>,
    pub records: Vec<PaymentRecord>,
}

impl PaymentTable {
    pub fn new(passthrough_columns: Vec<String>, records: Vec<PaymentRecord>) -> Self {
        Self {
            passthrough_columns,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaymentRecord> {
        self.records.iter()
    }

    /// Appends the records of `other`. The passthrough schema of `self` wins:
    /// values of `other` are realigned by column name and columns it lacks
    /// become empty strings.
    pub fn concat(mut self, other: PaymentTable) -> Self {
        let positions: Vec<Option<usize>> = self
            .passthrough_columns
            .iter()
            .map(|name| other.passthrough_columns.iter().position(|c| c == name))
            .collect();

        for mut record in other.records {
            let realigned = positions
                .iter()
                .map(|pos| {
                    pos.and_then(|p| record.passthrough.get(p).cloned())
                        .unwrap_or_default()
                })
                .collect();
            record.passthrough = realigned;
            self.records.push(record);
        }
        self
    }

    /// Value of a passthrough column for the given record, if the column exists.
    pub fn passthrough_value<'a>(&self, record: &'a PaymentRecord, column: &str) -> Option<&'a str> {
        self.passthrough_columns
            .iter()
            .position(|c| c == column)
            .and_then(|pos| record.passthrough.get(pos))
            .map(String::as_str)
    }
}

/// Whole-table totals shown on the summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub amount_received: f64,
    pub charges: f64,
    pub commission: f64,
    pub count: usize,
}

/// Amount received and charges for one payment date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub amount_received: f64,
    pub charges: f64,
}

/// Row count and share for one `Remunerado` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargesVsCommission {
    pub charges: f64,
    pub commission: f64,
    /// Commission expressed as a percentage of charges, 0 when there are no charges.
    pub commission_pct_of_charges: f64,
}

/// Box-plot summary of the `Atraso` column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelaySummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// One row of the actions file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    #[serde(rename = "Ação")]
    pub action: String,
    #[serde(rename = "Valor")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionShare {
    pub action: String,
    pub value: f64,
    pub percentage: f64,
}

/// Everything the renderer needs, computed once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub totals: PaymentTotals,
    pub daily: Vec<DailyTotals>,
    pub categories: Vec<CategoryShare>,
    pub comparison: ChargesVsCommission,
    pub delays: Vec<f64>,
    pub delay_summary: Option<DelaySummary>,
    pub actions: Vec<ActionShare>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, passthrough: Vec<&str>) -> PaymentRecord {
        PaymentRecord {
            line,
            amount_received: 1.0,
            charges: 0.0,
            commission: 0.0,
            payment_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            delay: 0.0,
            paid_category: "Sim".to_string(),
            passthrough: passthrough.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_concat_realigns_passthrough_by_name() {
        let left = PaymentTable::new(
            vec!["Cliente".to_string(), "Contrato".to_string()],
            vec![record(2, vec!["Ana", "C-1"])],
        );
        let right = PaymentTable::new(
            vec!["Contrato".to_string(), "Filial".to_string()],
            vec![record(2, vec!["C-9", "Centro"])],
        );

        let merged = left.concat(right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.records[1].passthrough, vec!["".to_string(), "C-9".to_string()]);
        assert_eq!(merged.passthrough_value(&merged.records[0], "Cliente"), Some("Ana"));
        assert_eq!(merged.passthrough_value(&merged.records[1], "Filial"), None);
    }

    #[test]
    fn test_record_serializes_with_source_column_names() {
        let json = serde_json::to_value(record(2, vec![])).unwrap();
        assert_eq!(json["Valor_Recebido"], 1.0);
        assert_eq!(json["Data_Pagamento"], "2024-01-01");
        assert_eq!(json["Remunerado"], "Sim");
    }
}
