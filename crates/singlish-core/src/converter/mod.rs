//! Singlish-to-Sinhala conversion pipeline.
//!
//! Tokenizer → lexical mapper → reassembler, followed by the quality gate.
//! Conversion is pure: the table and settings are read-only, and each call
//! owns its tokens and result.

pub mod explain;

#[cfg(test)]
mod tests;

use tracing::{debug, debug_span};

use crate::gate;
use crate::mapper::{MappedToken, Mapper};
use crate::reassemble::{reassemble, ConversionResult, Warning};
use crate::settings::{settings, Settings};
use crate::table::MappingTable;
use crate::token::{tokenize, Token};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Intermediate state of one conversion, kept for diagnostics.
pub(crate) struct Pipeline<'a> {
    pub tokens: Vec<Token<'a>>,
    pub mapped: Vec<MappedToken>,
    pub result: ConversionResult,
}

#[derive(Clone, Copy)]
pub struct Converter<'r> {
    table: &'r MappingTable,
    settings: &'r Settings,
}

impl Converter<'static> {
    /// Converter over the global table and settings.
    pub fn global() -> Self {
        Self::new(MappingTable::global(), settings())
    }
}

impl<'r> Converter<'r> {
    pub fn new(table: &'r MappingTable, settings: &'r Settings) -> Self {
        Self { table, settings }
    }

    pub fn convert(&self, input: &str) -> Result<ConversionResult, ConvertError> {
        Ok(self.run(input)?.result)
    }

    pub(crate) fn run<'a>(&self, input: &'a str) -> Result<Pipeline<'a>, ConvertError> {
        self.check_input(input)?;
        let _span = debug_span!("convert", input_len = input.len()).entered();

        let tokens = tokenize(input, self.table, &self.settings.tokenizer);

        let mapper = Mapper::new(self.table, &self.settings.mapper);
        let mapped: Vec<MappedToken> = {
            let _span = debug_span!("map").entered();
            tokens.iter().map(|t| mapper.map_token(t)).collect()
        };

        let mut warnings: Vec<Warning> = mapped
            .iter()
            .enumerate()
            .flat_map(|(token_index, m)| {
                m.warning_kinds()
                    .into_iter()
                    .map(move |kind| Warning { token_index, kind })
            })
            .collect();
        warnings.extend(gate::inspect(&tokens, &mapped, &self.settings.gate));

        let result = reassemble(&mapped, warnings);
        debug!(
            token_count = tokens.len(),
            warning_count = result.warnings.len(),
            "converted"
        );
        Ok(Pipeline {
            tokens,
            mapped,
            result,
        })
    }

    fn check_input(&self, input: &str) -> Result<(), ConvertError> {
        if input.contains('\0') {
            return Err(ConvertError::InvalidArgument(
                "input contains NUL".to_string(),
            ));
        }
        let max = self.settings.converter.max_input_chars;
        // Byte length bounds char count from above.
        if input.len() > max && input.chars().count() > max {
            return Err(ConvertError::InvalidArgument(format!(
                "input exceeds {max} characters"
            )));
        }
        Ok(())
    }
}

/// Convert `input` with the global table and settings.
pub fn convert(input: &str) -> Result<ConversionResult, ConvertError> {
    Converter::global().convert(input)
}
