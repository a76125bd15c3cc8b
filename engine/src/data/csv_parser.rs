use crate::config::settings::EngineSettings;
use crate::data::schema::{self, HeaderIndex};
use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord};
use shared::models::{ActionRow, PaymentRecord, PaymentTable};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// Brazilian number and date handling for the recovery files
pub mod brazilian_format {
    use crate::config::settings::NumberStyle;
    use crate::error::EngineError;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn finite(value: f64, original: &str) -> Result<f64, EngineError> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EngineError::NumericFormatError(format!("'{}' is not a finite number", original)))
        }
    }

    // Parses decimals like "1.234,56" or "123,45" into f64
    pub fn parse_decimal(s: &str) -> Result<f64, EngineError> {
        if let Some(c) = s.trim().chars().find(|c| !matches!(c, '0'..='9' | '.' | ',' | '+' | '-')) {
            return Err(EngineError::NumericFormatError(format!(
                "Failed to parse decimal '{}': unexpected character '{}'",
                s, c
            )));
        }
        let normalized = s.trim()
            .replace('.', "")  // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        let value = f64::from_str(&normalized)
            .map_err(|e| EngineError::NumericFormatError(format!("Failed to parse decimal '{}': {}", s, e)))?;
        finite(value, s)
    }

    // Plain "1234.5" style numbers, as a spreadsheet export would write them
    pub fn parse_plain(s: &str) -> Result<f64, EngineError> {
        let value = f64::from_str(s.trim())
            .map_err(|e| EngineError::NumericFormatError(format!("Failed to parse number '{}': {}", s, e)))?;
        finite(value, s)
    }

    pub fn parse_number(s: &str, style: NumberStyle) -> Result<f64, EngineError> {
        match style {
            NumberStyle::Plain => parse_plain(s),
            NumberStyle::Brazilian => parse_decimal(s),
        }
    }

    fn parse_with_format(s: &str, format: &str) -> Option<NaiveDate> {
        if format.contains("%H") {
            NaiveDateTime::parse_from_str(s, format).ok().map(|dt| dt.date())
        } else {
            NaiveDate::parse_from_str(s, format).ok()
        }
    }

    /// Tries each format in order and returns the date with the index of the
    /// format that matched. A time part, when present, is discarded.
    pub fn parse_date(s: &str, formats: &[String]) -> Result<(NaiveDate, usize), EngineError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EngineError::DateFormatError("empty date".to_string()));
        }
        formats
            .iter()
            .enumerate()
            .find_map(|(idx, format)| parse_with_format(trimmed, format).map(|date| (date, idx)))
            .ok_or_else(|| {
                EngineError::DateFormatError(format!(
                    "Failed to parse date '{}' with any of [{}]",
                    s,
                    formats.join(", ")
                ))
            })
    }

    /// Date parser that locks onto the first format that succeeds, so every
    /// row of a file has to share it.
    pub struct DateFieldParser<'a> {
        formats: &'a [String],
        pinned: Option<usize>,
    }

    impl<'a> DateFieldParser<'a> {
        pub fn new(formats: &'a [String]) -> Self {
            Self { formats, pinned: None }
        }

        pub fn pinned_format(&self) -> Option<&'a str> {
            self.pinned.map(|idx| self.formats[idx].as_str())
        }

        pub fn parse(&mut self, s: &str) -> Result<NaiveDate, EngineError> {
            match self.pinned_format() {
                Some(format) => {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        return Err(EngineError::DateFormatError("empty date".to_string()));
                    }
                    parse_with_format(trimmed, format).ok_or_else(|| {
                        EngineError::DateFormatError(format!(
                            "Failed to parse date '{}' with the file's format '{}'",
                            s, format
                        ))
                    })
                }
                None => {
                    let (date, idx) = parse_date(s, self.formats)?;
                    self.pinned = Some(idx);
                    Ok(date)
                }
            }
        }
    }

}

pub struct BrazilianCsvParser;

impl BrazilianCsvParser {
    fn open(path: &Path) -> Result<BufReader<File>, EngineError> {
        let file = File::open(path).map_err(|source| EngineError::FileAccessError {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BufReader::new(file))
    }

    fn reader<R: Read>(reader: R, settings: &EngineSettings) -> Result<csv::Reader<R>, EngineError> {
        Ok(ReaderBuilder::new()
            .delimiter(settings.delimiter_byte()?)
            .has_headers(true)
            .from_reader(reader))
    }

    fn next_record(
        result: Result<StringRecord, csv::Error>,
        idx: usize,
        source: &str,
    ) -> Result<(StringRecord, usize), EngineError> {
        let record = result.map_err(|e| {
            EngineError::CsvDataFormatError(format!("'{}' record at line {}: {}", source, idx + 2, e))
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
        Ok((record, line))
    }

    fn blank_or<'a>(value: &'a str, fallback: &'a str) -> (&'a str, bool) {
        if value.trim().is_empty() {
            (fallback, true)
        } else {
            (value, false)
        }
    }

    // CSV Header: Valor_Recebido,Encargos,comissao,Data_Pagamento,Atraso,Remunerado[,passthrough...]
    // Example Row: "1.000,00","100,00","10,00",2024-01-01,5,Sim
    pub fn load_payments(path: &Path, settings: &EngineSettings) -> Result<PaymentTable, EngineError> {
        let reader = Self::open(path)?;
        Self::read_payments(reader, &path.display().to_string(), settings)
    }

    pub fn read_payments<R: Read>(reader: R, source: &str, settings: &EngineSettings) -> Result<PaymentTable, EngineError> {
        let mut rdr = Self::reader(reader, settings)?;
        let index = HeaderIndex::validate(rdr.headers()?, &schema::PAYMENT_COLUMNS, source)?;
        tracing::debug!(source, columns = ?index.labels(), "Payment header validated");

        let pos = |name: &str| index.position(name).unwrap_or_default();
        let (valor_pos, encargos_pos, comissao_pos) =
            (pos(schema::VALOR_RECEBIDO), pos(schema::ENCARGOS), pos(schema::COMISSAO));
        let (data_pos, atraso_pos, remunerado_pos) =
            (pos(schema::DATA_PAGAMENTO), pos(schema::ATRASO), pos(schema::REMUNERADO));
        let passthrough = index.passthrough(&schema::PAYMENT_COLUMNS);

        let mut dates = brazilian_format::DateFieldParser::new(&settings.date_formats);
        let mut records = Vec::new();
        let mut unknown_categories = 0usize;

        for (idx, result) in rdr.records().enumerate() {
            let (record, line) = Self::next_record(result, idx, source)?;
            let field = |pos: usize| record.get(pos).unwrap_or("");

            let amount_received = brazilian_format::parse_decimal(field(valor_pos))
                .map_err(|e| e.at(line, schema::VALOR_RECEBIDO))?;
            let charges = brazilian_format::parse_decimal(field(encargos_pos))
                .map_err(|e| e.at(line, schema::ENCARGOS))?;
            let commission = brazilian_format::parse_decimal(field(comissao_pos))
                .map_err(|e| e.at(line, schema::COMISSAO))?;
            let payment_date = dates
                .parse(field(data_pos))
                .map_err(|e| e.at(line, schema::DATA_PAGAMENTO))?;
            let delay = brazilian_format::parse_number(field(atraso_pos), settings.delay_style)
                .map_err(|e| e.at(line, schema::ATRASO))?;

            let (paid_category, was_blank) =
                Self::blank_or(field(remunerado_pos), &settings.unknown_category_label);
            if was_blank {
                unknown_categories += 1;
            }

            records.push(PaymentRecord {
                line,
                amount_received,
                charges,
                commission,
                payment_date,
                delay,
                paid_category: paid_category.to_string(),
                passthrough: passthrough.iter().map(|(pos, _)| field(*pos).to_string()).collect(),
            });
        }

        if unknown_categories > 0 {
            tracing::warn!(
                source,
                rows = unknown_categories,
                label = %settings.unknown_category_label,
                "Blank 'Remunerado' values grouped under the unknown label"
            );
        }
        tracing::info!(
            source,
            rows = records.len(),
            date_format = dates.pinned_format().unwrap_or("-"),
            "Loaded payments"
        );

        let columns = passthrough.into_iter().map(|(_, label)| label).collect();
        Ok(PaymentTable::new(columns, records))
    }

    // CSV Header: Ação,Valor
    pub fn load_actions(path: &Path, settings: &EngineSettings) -> Result<Vec<ActionRow>, EngineError> {
        let reader = Self::open(path)?;
        Self::read_actions(reader, &path.display().to_string(), settings)
    }

    pub fn read_actions<R: Read>(reader: R, source: &str, settings: &EngineSettings) -> Result<Vec<ActionRow>, EngineError> {
        let mut rdr = Self::reader(reader, settings)?;
        let index = HeaderIndex::validate(rdr.headers()?, &schema::ACTION_COLUMNS, source)?;
        let acao_pos = index.position(schema::ACAO).unwrap_or_default();
        let valor_pos = index.position(schema::VALOR).unwrap_or_default();

        let mut rows = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let (record, line) = Self::next_record(result, idx, source)?;
            let field = |pos: usize| record.get(pos).unwrap_or("");

            let value = brazilian_format::parse_number(field(valor_pos), settings.action_value_style)
                .map_err(|e| e.at(line, schema::VALOR))?;
            let (action, _) = Self::blank_or(field(acao_pos), &settings.unknown_category_label);

            rows.push(ActionRow {
                action: action.to_string(),
                value,
            });
        }

        tracing::info!(source, rows = rows.len(), "Loaded actions");
        Ok(rows)
    }
}
