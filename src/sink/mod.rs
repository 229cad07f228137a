mod csv;

pub use csv::CsvSink;
