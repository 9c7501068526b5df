//! Corpus-driven accuracy runs.
//!
//! A corpus case pins either the exact output, the warnings the quality gate
//! must raise, or both. Skipped cases are reported but not run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use singlish_engine::{Converter, WarningKind};

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse corpus TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("case {id}: unknown warning kind {name:?}")]
    UnknownWarning { id: String, name: String },
    #[error("case {0}: needs `expected` or `expect_warnings`")]
    NoExpectation(String),
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCorpus {
    pub cases: Vec<AccuracyCase>,
}

#[derive(Debug, Deserialize)]
pub struct AccuracyCase {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub input: String,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub expect_warnings: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyStatus {
    Pass,
    Fail,
    Skip,
}

#[derive(Debug, Serialize)]
pub struct AccuracyResult {
    pub id: String,
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expect_warnings: Vec<String>,
    pub actual: String,
    pub warnings: Vec<String>,
    pub status: AccuracyStatus,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
    pub pass_rate: String,
}

#[derive(Debug, Serialize)]
pub struct AccuracyReport {
    pub results: Vec<AccuracyResult>,
    pub summary: AccuracySummary,
}

#[derive(Debug, Default)]
pub struct CaseFilter<'a> {
    pub category: Option<&'a str>,
    pub tag: Option<&'a str>,
}

impl CaseFilter<'_> {
    fn accepts(&self, case: &AccuracyCase) -> bool {
        self.category.map_or(true, |c| case.category == c)
            && self.tag.map_or(true, |t| case.tags.iter().any(|x| x == t))
    }
}

pub fn parse_corpus(content: &str) -> Result<AccuracyCorpus, CorpusError> {
    let corpus: AccuracyCorpus = toml::from_str(content)?;
    for case in &corpus.cases {
        if !case.skip && case.expected.is_none() && case.expect_warnings.is_empty() {
            return Err(CorpusError::NoExpectation(case.id.clone()));
        }
        if let Some(name) = case
            .expect_warnings
            .iter()
            .find(|n| WarningKind::parse(n).is_none())
        {
            return Err(CorpusError::UnknownWarning {
                id: case.id.clone(),
                name: name.clone(),
            });
        }
    }
    Ok(corpus)
}

pub fn load_corpus(path: &Path) -> Result<AccuracyCorpus, CorpusError> {
    parse_corpus(&fs::read_to_string(path)?)
}

fn run_case(converter: &Converter<'_>, case: &AccuracyCase) -> AccuracyResult {
    let mut result = AccuracyResult {
        id: case.id.clone(),
        input: case.input.clone(),
        expected: case.expected.clone(),
        expect_warnings: case.expect_warnings.clone(),
        actual: String::new(),
        warnings: Vec::new(),
        status: AccuracyStatus::Skip,
        category: case.category.clone(),
        note: case.note.clone(),
    };
    if case.skip {
        return result;
    }

    let converted = match converter.convert(&case.input) {
        Ok(r) => r,
        Err(e) => {
            result.actual = e.to_string();
            result.status = AccuracyStatus::Fail;
            return result;
        }
    };

    let output_ok = case
        .expected
        .as_ref()
        .map_or(true, |exp| *exp == converted.output);
    // Names were checked in parse_corpus.
    let warnings_ok = case
        .expect_warnings
        .iter()
        .filter_map(|n| WarningKind::parse(n))
        .all(|k| converted.has(k));

    result.warnings = converted
        .kinds()
        .into_iter()
        .map(|k| k.as_str().to_string())
        .collect();
    result.actual = converted.output;
    result.status = if output_ok && warnings_ok {
        AccuracyStatus::Pass
    } else {
        AccuracyStatus::Fail
    };
    result
}

pub fn run_corpus(
    converter: &Converter<'_>,
    corpus: &AccuracyCorpus,
    filter: &CaseFilter<'_>,
) -> AccuracyReport {
    let results: Vec<AccuracyResult> = corpus
        .cases
        .iter()
        .filter(|c| filter.accepts(c))
        .map(|c| run_case(converter, c))
        .collect();

    let count = |s: AccuracyStatus| results.iter().filter(|r| r.status == s).count();
    let pass = count(AccuracyStatus::Pass);
    let fail = count(AccuracyStatus::Fail);
    let skip = count(AccuracyStatus::Skip);
    let total = results.len();
    let tested = total - skip;
    let rate = if tested > 0 {
        pass as f64 / tested as f64 * 100.0
    } else {
        0.0
    };

    AccuracyReport {
        results,
        summary: AccuracySummary {
            total,
            pass,
            fail,
            skip,
            pass_rate: format!("{:.1}%", rate),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const SMALL: &str = r#"
[[cases]]
id = "p1"
input = "mama adha gedhara inne"
expected = "මම අද ගෙදර ඉන්නේ"
category = "positive"
tags = ["short"]

[[cases]]
id = "p2"
input = "mama"
expected = "wrong"
category = "positive"

[[cases]]
id = "n1"
input = "hariiiii"
expect_warnings = ["repetition_distortion"]
category = "negative"

[[cases]]
id = "n2"
input = "la la"
category = "negative"
skip = true
note = "no signal"
"#;

    #[test]
    fn test_run_small_corpus() {
        let corpus = parse_corpus(SMALL).unwrap();
        let report = run_corpus(&Converter::global(), &corpus, &CaseFilter::default());
        let statuses: Vec<AccuracyStatus> = report.results.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                AccuracyStatus::Pass,
                AccuracyStatus::Fail,
                AccuracyStatus::Pass,
                AccuracyStatus::Skip,
            ]
        );
        assert_eq!(report.results[1].actual, "මම");
        assert_eq!(report.summary.pass_rate, "66.7%");
    }

    #[test]
    fn test_filters() {
        let corpus = parse_corpus(SMALL).unwrap();
        let filter = CaseFilter {
            category: Some("negative"),
            tag: None,
        };
        let report = run_corpus(&Converter::global(), &corpus, &filter);
        assert_eq!(report.summary.total, 2);

        let filter = CaseFilter {
            category: None,
            tag: Some("short"),
        };
        let report = run_corpus(&Converter::global(), &corpus, &filter);
        assert_eq!(report.summary.total, 1);
    }

    #[test]
    fn test_rejects_unknown_warning() {
        let bad = r#"
[[cases]]
id = "x"
input = "mama"
expect_warnings = ["bogus"]
category = "negative"
"#;
        assert!(matches!(
            parse_corpus(bad),
            Err(CorpusError::UnknownWarning { .. })
        ));
    }

    #[test]
    fn test_rejects_case_without_expectation() {
        let bad = r#"
[[cases]]
id = "x"
input = "mama"
category = "negative"
"#;
        assert!(matches!(
            parse_corpus(bad),
            Err(CorpusError::NoExpectation(id)) if id == "x"
        ));
    }

    #[test]
    fn test_bundled_corpus_passes() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/accuracy.toml");
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.cases.len(), 36);
        let report = run_corpus(&Converter::global(), &corpus, &CaseFilter::default());
        let failed: Vec<&str> = report
            .results
            .iter()
            .filter(|r| r.status == AccuracyStatus::Fail)
            .map(|r| r.id.as_str())
            .collect();
        assert!(failed.is_empty(), "failed cases: {failed:?}");
        assert_eq!(report.summary.skip, 3);
    }
}
