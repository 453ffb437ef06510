use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::*;
use ignore::WalkBuilder;
use rayon::prelude::*;
use spellfix::cli::output::{self, OutputFormat};
use spellfix::cli::TerminalPrompter;
use spellfix::config::Overrides;
use spellfix::interactive::FileCorrectionWriter;
use spellfix::parser::FileType;
use spellfix::spelling::session::relative_spelling_path;
use spellfix::{dict, CheckResult, Config, DictionarySession, InteractiveFixer, SpellChecker};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spellfix")]
#[command(version, about = "Spellcheck markdown and text files, fixing mistakes interactively", long_about = None)]
struct Cli {
    /// Files or directories to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Resolve each mistake interactively and update the spelling files
    #[arg(short, long)]
    fix: bool,

    /// Do not look up suggestions
    #[arg(short = 'x', long)]
    no_suggestions: bool,

    /// Ignore acronyms (all capitals, optionally with a trailing 's)
    #[arg(short = 'a', long)]
    ignore_acronyms: bool,

    /// Ignore numbers such as 1st, 2,000 or #42
    #[arg(short = 'n', long)]
    ignore_numbers: bool,

    /// Also keep a .spelling file next to each document
    #[arg(long)]
    relative_spelling_files: bool,

    /// Language/dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Personal dictionary file
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// Pattern to ignore (regex)
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Build a dictionary from a word list, one word per line
    Build {
        /// Word list file
        wordlist: PathBuf,
        /// Language code to install it as
        #[arg(short, long, default_value = "en_US")]
        language: String,
    },
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellfix", &mut io::stdout());
        return Ok(());
    }

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let config = Config::load(Overrides {
        language: cli.language.clone(),
        personal_dictionary: cli.personal_dict.clone(),
        extra_ignore_patterns: cli.ignore_pattern.clone(),
        no_suggestions: cli.no_suggestions,
        relative_spelling_files: cli.relative_spelling_files,
        ignore_acronyms: cli.ignore_acronyms,
        ignore_numbers: cli.ignore_numbers,
    })?;
    debug!(?config, "Loaded configuration");

    let files = collect_files(&cli.files);
    if files.is_empty() {
        anyhow::bail!("No checkable files found.");
    }

    let mut checker = SpellChecker::new(&config)?;
    let colored_output = !cli.no_color;

    if cli.fix {
        return fix_files(&files, &config, &mut checker, colored_output);
    }

    let total_errors = check_files(&files, &config, &checker, colored_output, &cli.format);
    if total_errors > 0 && !cli.no_fail {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Expand directories into the markdown and text files below them.
fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            eprintln!("{} File not found: {}", "Error:".red().bold(), path.display());
            continue;
        }
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        files.extend(
            WalkBuilder::new(path)
                .build()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
                .map(|entry| entry.into_path())
                .filter(|path| FileType::is_checkable(path)),
        );
    }
    files
}

fn session_for(config: &Config, file: &Path) -> DictionarySession {
    let relative = config
        .relative_spelling_files
        .then(|| relative_spelling_path(file));
    DictionarySession::initialise(relative.as_deref())
}

/// Report mode. Returns the number of mistakes found.
fn check_files(
    files: &[PathBuf],
    config: &Config,
    checker: &SpellChecker,
    colored_output: bool,
    format: &OutputFormat,
) -> usize {
    let filter = config.filter();

    let results: Vec<(PathBuf, CheckResult)> = files
        .par_iter()
        .filter_map(|file| match fs::read_to_string(file) {
            Ok(content) => {
                let session = session_for(config, file);
                let result = checker.check(file, &content, &filter, &session);
                Some((file.clone(), result))
            }
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Skipping unreadable file");
                None
            }
        })
        .collect();

    let total_errors = results.iter().map(|(_, r)| r.error_count).sum();
    output::print_errors(&results, colored_output, format);
    if *format == OutputFormat::Text {
        output::print_check_summary(total_errors, files, colored_output);
    }
    total_errors
}

/// Fix mode. Files are handled one after another so each sees the
/// spelling files as the previous one left them.
fn fix_files(
    files: &[PathBuf],
    config: &Config,
    checker: &mut SpellChecker,
    colored_output: bool,
) -> Result<()> {
    let filter = config.filter();
    let mut prompter = TerminalPrompter::new();
    let mut writer = FileCorrectionWriter;
    let mut session = DictionarySession::initialise(None);
    let mut fixer = InteractiveFixer::new(
        &mut session,
        checker,
        &mut prompter,
        &filter,
        config.interactive_options(),
    );

    let mut total = CheckResult::default();
    for (index, file) in files.iter().enumerate() {
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %file.display(), error = %e, "Skipping unreadable file");
                continue;
            }
        };
        output::print_file_header(index, files.len(), file, colored_output);

        let next = session_for(config, file);
        let speller = fixer.speller_mut();
        speller.begin_file(&next, file);
        let mut mistakes = speller.scan(file, &content, &filter);
        fixer.replace_session(next);

        let result = fixer
            .spell_and_fix_file(file, &content, &mut mistakes, &mut writer)
            .with_context(|| format!("Failed to fix {}", file.display()))?;
        total.error_count += result.error_count;
        total.fixed_count += result.fixed_count;
    }

    output::print_fix_summary(&total, files, colored_output);
    Ok(())
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => {
                dict::manager::list_dictionaries()?;
            }
            DictCommands::Build { wordlist, language } => {
                dict::manager::build_dictionary(&wordlist, &language)?;
            }
            DictCommands::Info { language } => {
                dict::manager::show_info(&language)?;
            }
        },
    }
    Ok(())
}
