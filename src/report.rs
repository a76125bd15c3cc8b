// Plain-text and JSON rendering of the dashboard payload
use shared::models::DashboardData;
use shared::utils::brazilian_format::{format_currency, format_decimal, format_percentage};
use std::fmt;

/// Text report over a prepared payload.
pub struct Report<'a>(pub &'a DashboardData);

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "\n{}\n{}", title, "-".repeat(title.chars().count()))
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0;

        writeln!(f, "Análise UNIMED")?;
        writeln!(f, "==============")?;
        writeln!(f, "Valor Recup     {}", format_currency(data.totals.amount_received))?;
        writeln!(f, "Juros Recup     {}", format_currency(data.totals.charges))?;
        writeln!(f, "Remuneração     {}", format_currency(data.totals.commission))?;
        writeln!(f, "Clientes Pagos  {}", data.totals.count)?;

        section(f, "Valor Recup. mais Juros por Dia")?;
        for day in &data.daily {
            writeln!(
                f,
                "{}  {:>18}  {:>16}",
                day.date.format("%d/%m/%Y"),
                format_currency(day.amount_received),
                format_currency(day.charges)
            )?;
        }

        section(f, "Funil Recuperado/Remunerado")?;
        for category in &data.categories {
            writeln!(
                f,
                "{:<20} {:>6}  {:>8}",
                category.category,
                category.count,
                format_percentage(category.percentage)
            )?;
        }

        section(f, "Totais de Juros e Comissão")?;
        writeln!(f, "Juros     {}", format_currency(data.comparison.charges))?;
        writeln!(f, "Comissão  {}", format_currency(data.comparison.commission))?;
        writeln!(
            f,
            "Comissão equivale a {} dos juros",
            format_percentage(data.comparison.commission_pct_of_charges)
        )?;

        section(f, "Distribuição do Atraso")?;
        match &data.delay_summary {
            Some(summary) => writeln!(
                f,
                "n={}  mín={}  q1={}  mediana={}  q3={}  máx={}  média={}",
                summary.count,
                format_decimal(summary.min, 1),
                format_decimal(summary.q1, 1),
                format_decimal(summary.median, 1),
                format_decimal(summary.q3, 1),
                format_decimal(summary.max, 1),
                format_decimal(summary.mean, 1)
            )?,
            None => writeln!(f, "sem registros")?,
        }

        section(f, "Percentual por Ação")?;
        for action in &data.actions {
            writeln!(
                f,
                "{:<20} {:>18}  {:>8}",
                action.action,
                format_currency(action.value),
                format_percentage(action.percentage)
            )?;
        }
        Ok(())
    }
}

pub fn render(data: &DashboardData) -> String {
    Report(data).to_string()
}

pub fn render_json(data: &DashboardData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{
        ActionShare, CategoryShare, ChargesVsCommission, DailyTotals, DelaySummary, PaymentTotals,
    };

    fn sample() -> DashboardData {
        DashboardData {
            totals: PaymentTotals { amount_received: 3000.5, charges: 150.25, commission: 15.0, count: 2 },
            daily: vec![DailyTotals {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                amount_received: 3000.5,
                charges: 150.25,
            }],
            categories: vec![
                CategoryShare { category: "Não".to_string(), count: 1, percentage: 50.0 },
                CategoryShare { category: "Sim".to_string(), count: 1, percentage: 50.0 },
            ],
            comparison: ChargesVsCommission { charges: 150.25, commission: 15.0, commission_pct_of_charges: 9.98 },
            delays: vec![5.0, 3.0],
            delay_summary: Some(DelaySummary { count: 2, min: 3.0, q1: 3.5, median: 4.0, q3: 4.5, max: 5.0, mean: 4.0 }),
            actions: vec![ActionShare { action: "Acordo".to_string(), value: 1500.0, percentage: 100.0 }],
        }
    }

    #[test]
    fn test_render_cards() {
        let text = render(&sample());
        assert!(text.contains("Valor Recup     R$ 3.000,50"));
        assert!(text.contains("Juros Recup     R$ 150,25"));
        assert!(text.contains("Remuneração     R$ 15,00"));
        assert!(text.contains("Clientes Pagos  2"));
    }

    #[test]
    fn test_render_series_and_shares() {
        let text = render(&sample());
        assert!(text.contains("01/01/2024"));
        assert!(text.contains("50,00%"));
        assert!(text.contains("mediana=4,0"));
        assert!(text.contains("Acordo"));
    }

    #[test]
    fn test_render_without_delays() {
        let mut data = sample();
        data.delay_summary = None;
        assert!(render(&data).contains("sem registros"));
    }

    #[test]
    fn test_render_json_round_trips_payload() {
        let data = sample();
        let json = render_json(&data).unwrap();
        assert!(json.contains("\"amount_received\": 3000.5"));
        assert!(json.contains("\"date\": \"2024-01-01\""));

        let parsed: DashboardData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.totals, data.totals);
        assert_eq!(parsed.daily, data.daily);
        assert_eq!(parsed.categories.len(), 2);
    }
}
