pub mod schema;
mod table;

pub use table::{
    TableFormatter, TableRenderer, TableStyle, TabulateFormatter, delimited_table,
};
