pub mod converter;
pub mod gate;
pub mod mapper;
pub mod reassemble;
pub mod settings;
pub mod table;
pub mod token;
pub mod unicode;

pub use converter::{convert, ConvertError, Converter};
pub use reassemble::{ConversionResult, Warning, WarningKind};
pub use table::MappingTable;
