pub mod format;
pub mod inputs_table;
pub mod panels;
