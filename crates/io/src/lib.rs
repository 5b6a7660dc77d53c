// File I/O operations

pub mod csv;
pub mod sheet;
pub mod xlsx;

pub use sheet::read_rows;
