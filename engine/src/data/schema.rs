// Header validation run right after a CSV header is read.
use crate::error::EngineError;
use csv::StringRecord;

pub const VALOR_RECEBIDO: &str = "Valor_Recebido";
pub const ENCARGOS: &str = "Encargos";
pub const COMISSAO: &str = "comissao";
pub const DATA_PAGAMENTO: &str = "Data_Pagamento";
pub const ATRASO: &str = "Atraso";
pub const REMUNERADO: &str = "Remunerado";

pub const PAYMENT_COLUMNS: [&str; 6] = [VALOR_RECEBIDO, ENCARGOS, COMISSAO, DATA_PAGAMENTO, ATRASO, REMUNERADO];

pub const ACAO: &str = "Ação";
pub const VALOR: &str = "Valor";

pub const ACTION_COLUMNS: [&str; 2] = [ACAO, VALOR];

/// Strips incidental whitespace and a leading byte-order mark from a header label.
pub fn normalize_label(label: &str) -> String {
    label
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

/// Column positions resolved from a trimmed header row.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    labels: Vec<String>,
}

impl HeaderIndex {
    /// Normalises the header labels and checks that every `required` column is present.
    /// All missing columns are reported together.
    pub fn validate(headers: &StringRecord, required: &[&str], source: &str) -> Result<Self, EngineError> {
        let labels: Vec<String> = headers.iter().map(normalize_label).collect();

        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|name| !labels.iter().any(|label| label == name))
            .collect();

        if !missing.is_empty() {
            return Err(EngineError::SchemaError(format!(
                "'{}' is missing required column(s) {} (found: {})",
                source,
                missing.iter().map(|m| format!("'{}'", m)).collect::<Vec<_>>().join(", "),
                labels.join(", ")
            )));
        }

        Ok(HeaderIndex { labels })
    }

    /// Position of the first column carrying `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label == name)
    }

    /// Labels and positions of the columns not named in `required`.
    pub fn passthrough(&self, required: &[&str]) -> Vec<(usize, String)> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(pos, label)| {
                !required.contains(&label.as_str()) || self.position(label) != Some(*pos)
            })
            .map(|(pos, label)| (pos, label.clone()))
            .collect()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_labels() {
        let headers = StringRecord::from(vec![" Valor_Recebido", "Encargos ", "\u{feff}comissao", "Data_Pagamento", " Atraso ", "Remunerado", " Cliente "]);
        let index = HeaderIndex::validate(&headers, &PAYMENT_COLUMNS, "test.csv").unwrap();
        assert_eq!(index.position(VALOR_RECEBIDO), Some(0));
        assert_eq!(index.position(COMISSAO), Some(2));
        assert_eq!(index.position(ATRASO), Some(4));
        assert_eq!(index.passthrough(&PAYMENT_COLUMNS), vec![(6, "Cliente".to_string())]);
    }

    #[test]
    fn test_validate_reports_every_missing_column() {
        let headers = StringRecord::from(vec!["Valor_Recebido", "Encargos", "Data_Pagamento", "Remunerado"]);
        let err = HeaderIndex::validate(&headers, &PAYMENT_COLUMNS, "gborpgto.csv").unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, EngineError::SchemaError(_)));
        assert!(msg.contains("'comissao'"));
        assert!(msg.contains("'Atraso'"));
        assert!(msg.contains("gborpgto.csv"));
    }

    #[test]
    fn test_label_match_is_exact_after_trimming() {
        let headers = StringRecord::from(vec!["acao", "Valor"]);
        assert!(HeaderIndex::validate(&headers, &ACTION_COLUMNS, "acao.csv").is_err());
    }

    #[test]
    fn test_duplicate_required_label_is_passed_through() {
        let headers = StringRecord::from(vec!["Ação", "Valor", "Valor"]);
        let index = HeaderIndex::validate(&headers, &ACTION_COLUMNS, "acao.csv").unwrap();
        assert_eq!(index.position(VALOR), Some(1));
        assert_eq!(index.passthrough(&ACTION_COLUMNS), vec![(2, "Valor".to_string())]);
    }
}
