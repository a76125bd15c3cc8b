// Data loading and schema handling
pub mod csv_parser;
pub mod schema;
