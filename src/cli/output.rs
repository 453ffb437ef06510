use crate::CheckResult;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonError {
    file: String,
    line: usize,
    column: usize,
    word: String,
    suggestions: Vec<String>,
    context: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    files_checked: usize,
    total_errors: usize,
    errors: Vec<JsonError>,
}

/// Print the report for every checked file, in the order given.
pub fn print_errors(results: &[(PathBuf, CheckResult)], colored_output: bool, format: &OutputFormat) {
    match format {
        OutputFormat::Text => {
            for (file_path, result) in results {
                print_text_errors(file_path, result, colored_output);
            }
        }
        OutputFormat::Json => println!("{}", render_json(results)),
    }
}

fn print_text_errors(file_path: &Path, result: &CheckResult, colored_output: bool) {
    if result.errors.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();
    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for error in &result.errors {
        let line_info = format!("{}:{}", error.line, error.column);
        let suggestions: Vec<&str> = error.suggestions.iter().take(5).map(String::as_str).collect();

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                error.word.red().bold(),
                format_context(&error.context, &error.word, colored_output)
            );
            if !suggestions.is_empty() {
                let joined = suggestions
                    .iter()
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string());
                println!("    {} {}", "→".dimmed(), joined);
            }
        } else {
            println!("  {} {} {}", line_info, error.word, error.context);
            if !suggestions.is_empty() {
                println!("    → {}", suggestions.join(", "));
            }
        }
    }
}

fn render_json(results: &[(PathBuf, CheckResult)]) -> String {
    let errors: Vec<JsonError> = results
        .iter()
        .flat_map(|(file_path, result)| {
            result.errors.iter().map(move |e| JsonError {
                file: file_path.display().to_string(),
                line: e.line,
                column: e.column,
                word: e.word.clone(),
                suggestions: e.suggestions.clone(),
                context: e.context.clone(),
            })
        })
        .collect();

    let output = JsonOutput {
        files_checked: results.len(),
        total_errors: results.iter().map(|(_, r)| r.error_count).sum(),
        errors,
    };

    // plain data, serialization cannot fail
    serde_json::to_string_pretty(&output).unwrap_or_default()
}

fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replacen(word, &word.red().bold().to_string(), 1)
    } else {
        context.to_string()
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn print_summary(mark: &str, message: String, good: bool, colored: bool) {
    println!();
    match (colored, good) {
        (false, _) => println!("{} {}", mark, message),
        (true, true) => println!("{} {}", mark.green().bold(), message.green().bold()),
        (true, false) => println!("{} {}", mark.red().bold(), message),
    }
}

pub fn print_check_summary(total_errors: usize, files: &[impl AsRef<Path>], colored: bool) {
    if total_errors == 0 {
        print_summary("✓", "No spelling errors found!".to_string(), true, colored);
        return;
    }

    let message = format!(
        "{} {} found in {} {}",
        total_errors,
        plural(total_errors, "error", "errors"),
        files.len(),
        plural(files.len(), "file", "files")
    );
    print_summary("✗", message, false, colored);
}

pub fn print_fix_summary(result: &CheckResult, files: &[impl AsRef<Path>], colored: bool) {
    let message = format!(
        "{} {} reviewed, {} {} applied across {} {}",
        result.error_count,
        plural(result.error_count, "mistake", "mistakes"),
        result.fixed_count,
        plural(result.fixed_count, "correction", "corrections"),
        files.len(),
        plural(files.len(), "file", "files")
    );
    print_summary("✓", message, true, colored);
}

/// Heading printed before a file is fixed interactively.
pub fn print_file_header(index: usize, total_files: usize, file: &Path, colored: bool) {
    let heading = format!("[{}/{}] {}", index + 1, total_files, file.display());
    if colored {
        println!("\n{}", heading.bold().underline());
    } else {
        println!("\n{}", heading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpellError;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json_collects_all_files() {
        let result = CheckResult {
            error_count: 1,
            fixed_count: 0,
            errors: vec![SpellError {
                word: "wrod".to_string(),
                line: 2,
                column: 5,
                context: "the wrod".to_string(),
                suggestions: vec!["word".to_string()],
            }],
        };
        let results = vec![
            (PathBuf::from("a.md"), result),
            (PathBuf::from("b.md"), CheckResult::default()),
        ];

        let json: serde_json::Value = serde_json::from_str(&render_json(&results)).unwrap();
        assert_eq!(json["files_checked"], 2);
        assert_eq!(json["total_errors"], 1);
        assert_eq!(json["errors"][0]["file"], "a.md");
        assert_eq!(json["errors"][0]["suggestions"][0], "word");
    }
}
