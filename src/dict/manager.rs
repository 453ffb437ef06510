use crate::checker::dictionary::Dictionary;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

pub struct DictionaryInfo {
    pub language: String,
    pub path: PathBuf,
    pub word_count: usize,
    pub size_bytes: u64,
}

/// Installed dictionaries in `data_dir`, sorted by language.
pub fn installed(data_dir: &Path) -> Result<Vec<DictionaryInfo>> {
    if !data_dir.exists() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("dict") {
            continue;
        }
        let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        found.push(info_for(language, &path)?);
    }

    found.sort_by(|a, b| a.language.cmp(&b.language));
    Ok(found)
}

fn info_for(language: &str, path: &Path) -> Result<DictionaryInfo> {
    let size_bytes = fs::metadata(path)?.len();
    let word_count = Dictionary::load_from_path(path)?.len();
    Ok(DictionaryInfo {
        language: language.to_string(),
        path: path.to_path_buf(),
        word_count,
        size_bytes,
    })
}

/// Build `<data_dir>/<language>.dict` from a word list, one word per line.
pub fn build_into(data_dir: &Path, wordlist: &Path, language: &str) -> Result<DictionaryInfo> {
    let content = fs::read_to_string(wordlist)
        .with_context(|| format!("Failed to read word list: {}", wordlist.display()))?;

    fs::create_dir_all(data_dir).context("Failed to create data directory")?;
    let dict_path = data_dir.join(format!("{}.dict", language));

    let words = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));
    Dictionary::build_from_words(words, &dict_path)?;

    info_for(language, &dict_path)
}

fn data_dir() -> Result<PathBuf> {
    Config::data_dir().context("Failed to get data directory")
}

pub fn list_dictionaries() -> Result<()> {
    let data_dir = data_dir()?;
    let dictionaries = installed(&data_dir)?;

    if dictionaries.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to build one from a word list.",
            "spellfix dict build <WORDLIST>".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();
    for dict in &dictionaries {
        println!(
            "  {} {} ({} words, {})",
            "✓".green(),
            dict.language.cyan().bold(),
            dict.word_count,
            format!("{}KB", dict.size_bytes / 1024).dimmed()
        );
    }
    println!();
    println!("Data directory: {}", data_dir.display().to_string().dimmed());

    Ok(())
}

pub fn build_dictionary(wordlist: &Path, language: &str) -> Result<()> {
    println!(
        "{} dictionary for {} from {}...",
        "Building".cyan().bold(),
        language.yellow(),
        wordlist.display()
    );

    let info = build_into(&data_dir()?, wordlist, language)?;

    println!(
        "{} Dictionary installed: {} ({} words)",
        "✓".green().bold(),
        info.path.display().to_string().cyan(),
        info.word_count.to_string().yellow()
    );

    Ok(())
}

pub fn show_info(language: &str) -> Result<()> {
    let dict_path = data_dir()?.join(format!("{}.dict", language));

    if !dict_path.exists() {
        println!(
            "{} Dictionary for {} not found, the built-in word list is used.",
            "✗".red().bold(),
            language.yellow()
        );
        return Ok(());
    }

    let info = info_for(language, &dict_path)?;
    println!("{}", format!("Dictionary: {}", info.language).bold());
    println!("  Path: {}", info.path.display());
    println!("  Size: {} KB", info.size_bytes / 1024);
    println!("  Words: {}", info.word_count);
    println!("  Format: FST (Finite State Transducer)");

    Ok(())
}
