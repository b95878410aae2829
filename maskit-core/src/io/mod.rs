mod table;

pub use table::write_table;
