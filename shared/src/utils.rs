// Display helpers shared by the engine logs and the report renderer.
// Parsing of Brazilian-formatted input lives in engine::data::csv_parser.

pub mod brazilian_format {
    /// Formats `value` with `.` as thousands separator and `,` as decimal separator.
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value.abs(), decimals = decimals);
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (formatted.as_str(), None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
            "-"
        } else {
            ""
        };
        match frac_part {
            Some(frac) => format!("{}{},{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }

    pub fn format_currency(value: f64) -> String {
        format!("R$ {}", format_decimal(value, 2))
    }

    pub fn format_percentage(value: f64) -> String {
        format!("{}%", format_decimal(value, 2))
    }

}
