use std::fs;
use std::path::Path;
use std::process;

use singlish_engine::settings;
use singlish_engine::table::{self, MappingTable};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn table_export() {
    print!("{}", table::default_toml());
}

pub fn table_validate(file: &str) {
    let t = die!(MappingTable::open(Path::new(file)), "Error: {}");
    println!(
        "OK: {} mappings, {} lexicon words, {} foreign words",
        t.entries().len(),
        t.source().words.len(),
        t.source().foreign.len()
    );
}

pub fn table_compile(input: &str, output: &str) {
    let t = die!(MappingTable::open(Path::new(input)), "Error reading {input}: {}");
    die!(t.save(Path::new(output)), "Error writing {output}: {}");
    let size = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Compiled {} mappings (revision {}) -> {output} ({size} bytes)",
        t.entries().len(),
        t.revision()
    );
}

pub fn table_inspect(file: &str) {
    let data = die!(fs::read(file), "Error reading {file}: {}");
    let format = if data.starts_with(table::MAGIC) {
        "compiled"
    } else {
        "toml"
    };
    let t = die!(MappingTable::open(Path::new(file)), "Error: {}");
    let src = t.source();
    let word_final = src
        .entries
        .iter()
        .filter(|e| e.anchor == table::Anchor::WordFinal)
        .count();
    let longest = src
        .entries
        .iter()
        .map(|e| e.pattern.len())
        .max()
        .unwrap_or(0);

    println!("Format:          {format}");
    println!("Size:            {} bytes", data.len());
    println!("Revision:        {}", src.revision);
    println!("Mappings:        {}", src.entries.len());
    println!("  word-final:    {word_final}");
    println!("  longest:       {longest}");
    println!("Lexicon words:   {}", src.words.len());
    println!("Foreign words:   {}", src.foreign.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: gate.symbol_density_threshold={}, gate.joined_word_min_len={}, converter.max_input_chars={}",
        s.gate.symbol_density_threshold, s.gate.joined_word_min_len, s.converter.max_input_chars
    );
}
