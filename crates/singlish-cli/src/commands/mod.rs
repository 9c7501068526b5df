pub mod accuracy;
pub mod convert_ops;
pub mod table_ops;
