use serde::Serialize;

use crate::gate::symbol_density;
use crate::mapper::{Route, Syllable};
use crate::reassemble::{Warning, WarningKind};
use crate::token::{Span, TokenFlags, TokenKind};

use super::{ConvertError, Converter};

/// Full diagnostic trace for a single input.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub input: String,
    pub output: String,
    pub table_revision: String,
    pub symbol_density: f64,
    pub tokens: Vec<ExplainToken>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Serialize)]
pub struct ExplainToken {
    pub index: usize,
    pub text: String,
    pub kind: TokenKind,
    pub span: Span,
    pub flags: TokenFlags,
    pub route: Route,
    pub output: String,
    pub syllables: Vec<Syllable>,
    pub warnings: Vec<WarningKind>,
}

impl ExplainToken {
    /// `po+di` style rendering of the syllable walk; unmatched runs in brackets.
    pub fn syllable_path(&self) -> String {
        self.syllables
            .iter()
            .map(|s| {
                if s.matched {
                    s.source.clone()
                } else {
                    format!("[{}]", s.source)
                }
            })
            .collect::<Vec<_>>()
            .join("+")
    }
}

pub fn explain(converter: &Converter<'_>, input: &str) -> Result<ExplainResult, ConvertError> {
    let pipeline = converter.run(input)?;
    let density = symbol_density(&pipeline.tokens);

    let tokens = pipeline
        .tokens
        .iter()
        .zip(pipeline.mapped)
        .enumerate()
        .map(|(index, (t, m))| ExplainToken {
            index,
            text: t.text.to_string(),
            kind: t.kind,
            span: t.span,
            flags: t.flags,
            route: m.route,
            output: m.output,
            syllables: m.syllables,
            warnings: pipeline
                .result
                .warnings
                .iter()
                .filter(|w| w.token_index == index)
                .map(|w| w.kind)
                .collect(),
        })
        .collect();

    Ok(ExplainResult {
        input: input.to_string(),
        output: pipeline.result.output,
        table_revision: converter.table.revision().to_string(),
        symbol_density: density,
        tokens,
        warnings: pipeline.result.warnings,
    })
}
