use std::fmt::Write as _;
use std::io::{self, BufRead};
use std::path::Path;
use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use singlish_engine::converter::explain::{explain, ExplainResult};
use singlish_engine::mapper::Route;
use singlish_engine::settings::settings;
use singlish_engine::token::TokenKind;
use singlish_engine::{Converter, MappingTable, Warning};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Serialize)]
struct ConvertLine<'a> {
    input: &'a str,
    output: &'a str,
    warnings: &'a [Warning],
}

fn open_table(table: Option<&str>) -> Option<MappingTable> {
    table.map(|path| {
        die!(
            MappingTable::open(Path::new(path)),
            "Error opening table {path}: {}"
        )
    })
}

fn convert_line(converter: &Converter<'_>, input: &str, json: bool) {
    let result = die!(converter.convert(input), "Error: {}");
    if json {
        let line = ConvertLine {
            input,
            output: &result.output,
            warnings: &result.warnings,
        };
        println!(
            "{}",
            serde_json::to_string(&line).expect("JSON serialization failed")
        );
        return;
    }
    println!("{}", result.output);
    for w in &result.warnings {
        eprintln!("  warning: token {}: {}", w.token_index, w.kind);
    }
}

/// Convert `text`, or each line of stdin when no text is given.
pub fn convert_cmd(text: Option<&str>, table: Option<&str>, json: bool) {
    let custom = open_table(table);
    let converter = match custom {
        Some(ref t) => Converter::new(t, settings()),
        None => Converter::global(),
    };

    if let Some(text) = text {
        convert_line(&converter, text, json);
        return;
    }
    for line in io::stdin().lock().lines() {
        let line = die!(line, "Failed to read line: {}");
        convert_line(&converter, &line, json);
    }
}

pub fn explain_cmd(text: &str, table: Option<&str>, json: bool) {
    let custom = open_table(table);
    let converter = match custom {
        Some(ref t) => Converter::new(t, settings()),
        None => Converter::global(),
    };
    let result = die!(explain(&converter, text), "Error: {}");
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).expect("JSON serialization failed")
        );
    } else {
        print!("{}", format_explain(&result));
    }
}

fn route_name(route: Route) -> &'static str {
    match route {
        Route::PassThrough => "pass",
        Route::Lexicon => "lexicon",
        Route::Syllables => "syllables",
    }
}

/// Left-align `s` to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

/// Render an explain trace as an aligned table.
pub fn format_explain(r: &ExplainResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Input:    {}", r.input);
    let _ = writeln!(out, "Output:   {}", r.output);
    let _ = writeln!(out, "Table:    {}", r.table_revision);
    let _ = writeln!(out, "Density:  {:.3}", r.symbol_density);
    let _ = writeln!(out);

    let header = ["#", "text", "kind", "route", "output", "detail"];
    let rows: Vec<[String; 6]> = r
        .tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .map(|t| {
            let mut detail = t.syllable_path();
            if !t.warnings.is_empty() {
                let names: Vec<&str> = t.warnings.iter().map(|k| k.as_str()).collect();
                if !detail.is_empty() {
                    detail.push(' ');
                }
                let _ = write!(detail, "! {}", names.join(","));
            }
            [
                t.index.to_string(),
                t.text.clone(),
                format!("{:?}", t.kind),
                route_name(t.route).to_string(),
                t.output.clone(),
                detail,
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let render = |cells: [&str; 6]| -> String {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(c, w)| pad(c, w))
            .collect();
        line.join("  ").trim_end().to_string()
    };

    let _ = writeln!(out, "{}", render(header));
    for row in &rows {
        let cells = [
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
            row[4].as_str(),
            row[5].as_str(),
        ];
        let _ = writeln!(out, "{}", render(cells));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("😍", 4), "😍  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }

    #[test]
    fn test_format_explain_lists_word_tokens() {
        let r = explain(&Converter::global(), "podi call@@").unwrap();
        let text = format_explain(&r);
        assert!(text.contains("Output:   පොඩි call@@"));
        assert!(text.contains("Density:  0.200"));

        let rows: Vec<&str> = text.lines().skip(5).collect();
        assert!(rows[0].starts_with("#"));
        // Whitespace tokens are omitted.
        assert_eq!(rows.len(), 4);
        assert!(rows[1].contains("po+di"));
        assert!(rows[2].contains("ForeignWord"));
        assert!(rows[3].contains("! symbol_disruption"));
    }
}
