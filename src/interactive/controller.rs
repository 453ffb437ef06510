use super::context::describe_mistake;
use super::{Action, Choice, CorrectionWriter, MistakeSource, Prompter, SpellService, WordFilter};
use crate::error::{Result, SpellfixError};
use crate::spelling::{DictionarySession, Scope};
use crate::{CheckResult, Correction};
use colored::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const RETRY_MESSAGE: &str = "Corrected word is not in dictionary..";
const CORRECTION_PROMPT: &str = "correct word >";

#[derive(Debug, Clone, Copy)]
pub struct InteractiveOptions {
    pub suggestions: bool,
    pub relative_spelling_files: bool,
}

impl Default for InteractiveOptions {
    fn default() -> Self {
        Self {
            suggestions: true,
            relative_spelling_files: false,
        }
    }
}

/// A remembered answer for a word seen earlier in the run.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PreviousChoice {
    Action(Action),
    Replace(String),
}

/// Drives the per-mistake questions for one run.
pub struct InteractiveFixer<'a, S, P, F> {
    session: &'a mut DictionarySession,
    speller: &'a mut S,
    prompter: &'a mut P,
    filter: &'a F,
    options: InteractiveOptions,
    previous_choices: HashMap<String, PreviousChoice>,
}

impl<'a, S, P, F> InteractiveFixer<'a, S, P, F>
where
    S: SpellService,
    P: Prompter,
    F: WordFilter,
{
    pub fn new(
        session: &'a mut DictionarySession,
        speller: &'a mut S,
        prompter: &'a mut P,
        filter: &'a F,
        options: InteractiveOptions,
    ) -> Self {
        Self {
            session,
            speller,
            prompter,
            filter,
            options,
            previous_choices: HashMap::new(),
        }
    }

    /// Swap in the session loaded for the next document, keeping remembered choices.
    pub fn replace_session(&mut self, session: DictionarySession) {
        *self.session = session;
    }

    pub fn session(&self) -> &DictionarySession {
        &*self.session
    }

    pub fn speller_mut(&mut self) -> &mut S {
        &mut *self.speller
    }

    /// Resolve every mistake in `file`, apply corrections and save the dictionaries.
    pub fn spell_and_fix_file<M, W>(
        &mut self,
        file: &Path,
        src: &str,
        mistakes: &mut M,
        writer: &mut W,
    ) -> Result<CheckResult>
    where
        M: MistakeSource,
        W: CorrectionWriter,
    {
        let mut corrections = Vec::new();
        let mut error_count = 0;

        while let Some(word_info) = mistakes.next_mistake(&*self.speller) {
            error_count += 1;
            let message = describe_mistake(file, src, &word_info);
            if let Some(new_word) = self.resolve_mistake(&word_info.word, &message, file)? {
                corrections.push(Correction {
                    word_info,
                    new_word,
                });
            }
        }

        if !corrections.is_empty() {
            writer.write_corrections(src, file, &corrections)?;
        }

        self.session.flush(Scope::Shared)?;
        if self.options.relative_spelling_files {
            self.session.flush(Scope::Relative)?;
        }

        Ok(CheckResult {
            error_count,
            fixed_count: corrections.len(),
            errors: Vec::new(),
        })
    }

    /// Ask what to do with `word`. Returns the replacement, if any.
    pub fn resolve_mistake(
        &mut self,
        word: &str,
        message: &str,
        file: &Path,
    ) -> Result<Option<String>> {
        let mut suggestions = if self.options.suggestions {
            self.speller.suggest(word)
        } else {
            Vec::new()
        };

        let default_action = match self.previous_choices.get(word) {
            Some(PreviousChoice::Replace(previous)) => {
                match suggestions.iter().position(|s| s == previous) {
                    Some(index) => Action::Suggestion(index),
                    None => {
                        suggestions.insert(0, previous.clone());
                        Action::Suggestion(0)
                    }
                }
            }
            Some(PreviousChoice::Action(action)) => *action,
            None => Action::Enter,
        };

        let choices = self.build_choices(word, &suggestions);
        let default = choices
            .iter()
            .position(|c| c.action == default_action)
            .or_else(|| choices.iter().position(|c| c.action == Action::Enter))
            .unwrap_or(0);

        let action = self.prompter.select(message, &choices, default)?;
        if !choices.iter().any(|c| c.action == action) {
            return Err(SpellfixError::UnrecognisedAction(action.to_string()));
        }
        debug!(word, %action, "Resolved mistake");

        match action {
            Action::Ignore => {
                self.speller.add_word(word, false);
                Ok(None)
            }
            Action::Add { cased, scope } => {
                let word = if cased {
                    word.to_string()
                } else {
                    word.to_lowercase()
                };
                self.speller.add_word(&word, false);
                self.session.add_to_global_dictionary(&word, scope);
                Ok(None)
            }
            Action::FileIgnore { scope } => {
                self.speller.add_word(word, true);
                self.session.add_to_file_dictionary(file, word, scope);
                self.previous_choices
                    .insert(word.to_string(), PreviousChoice::Action(action));
                Ok(None)
            }
            Action::Enter => {
                let typed = self.correct_word(word, file)?;
                Ok(Some(typed).filter(|w| !w.is_empty()))
            }
            Action::Suggestion(index) => {
                let replacement = suggestions[index].clone();
                self.remember_replacement(word, &replacement);
                Ok(Some(replacement))
            }
        }
    }

    fn build_choices(&self, word: &str, suggestions: &[String]) -> Vec<Choice> {
        let cased = word.chars().any(char::is_uppercase);
        let mut scopes = vec![Scope::Shared];
        if self.options.relative_spelling_files && self.session.has_relative() {
            scopes.push(Scope::Relative);
        }

        let mut choices = vec![Choice::action(Action::Ignore)];
        for &scope in &scopes {
            choices.push(Choice::action(Action::FileIgnore { scope }));
        }
        for &scope in &scopes {
            choices.push(Choice::action(Action::Add { cased: false, scope }));
            if cased {
                choices.push(Choice::action(Action::Add { cased: true, scope }));
            }
        }
        choices.push(Choice::action(Action::Enter));
        choices.extend(
            suggestions
                .iter()
                .enumerate()
                .map(|(index, suggestion)| Choice::suggestion(index, suggestion)),
        );
        choices
    }

    /// Ask for a typed correction, re-asking when a single word is still wrong.
    fn correct_word(&mut self, word: &str, file: &Path) -> Result<String> {
        let typed = self.prompter.input(CORRECTION_PROMPT, word)?;

        let tokens: Vec<String> = typed.split_whitespace().map(str::to_string).collect();
        let checked = self.filter.filter(&tokens);
        let misspelt = checked
            .iter()
            .filter(|token| !self.speller.check_word(token))
            .count();

        if misspelt > 0 {
            if checked.len() == 1 {
                let retried = self.resolve_mistake(&typed, RETRY_MESSAGE, file)?;
                let new_word = retried.filter(|w| !w.is_empty()).unwrap_or(typed);
                self.remember_replacement(word, &new_word);
                return Ok(new_word);
            }

            println!(
                "{}",
                "Detected some words in your correction that may be invalid. Re-run to check."
                    .yellow()
            );
        }

        self.remember_replacement(word, &typed);
        Ok(typed)
    }

    fn remember_replacement(&mut self, word: &str, new_word: &str) {
        if !new_word.is_empty() {
            self.previous_choices
                .insert(word.to_string(), PreviousChoice::Replace(new_word.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::filters::ConfigFilter;
    use crate::WordInfo;
    use std::cell::Cell;
    use std::collections::{HashSet, VecDeque};
    use tempfile::{tempdir, TempDir};

    enum Answer {
        Select(Action),
        Input(&'static str),
    }

    #[derive(Default)]
    struct ScriptedPrompter {
        answers: VecDeque<Answer>,
        selects: Vec<(String, Vec<Choice>, usize)>,
        inputs: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: Vec<Answer>) -> Self {
            Self {
                answers: answers.into(),
                ..Default::default()
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&mut self, message: &str, choices: &[Choice], default: usize) -> Result<Action> {
            self.selects
                .push((message.to_string(), choices.to_vec(), default));
            match self.answers.pop_front() {
                Some(Answer::Select(action)) => Ok(action),
                _ => panic!("unexpected select prompt"),
            }
        }

        fn input(&mut self, _message: &str, default: &str) -> Result<String> {
            self.inputs.push(default.to_string());
            match self.answers.pop_front() {
                Some(Answer::Input(text)) => Ok(text.to_string()),
                _ => panic!("unexpected input prompt"),
            }
        }
    }

    #[derive(Default)]
    struct FakeSpeller {
        valid: HashSet<String>,
        suggestions: HashMap<String, Vec<String>>,
        added: Vec<(String, bool)>,
        checks: Cell<usize>,
    }

    impl FakeSpeller {
        fn with_valid(words: &[&str]) -> Self {
            Self {
                valid: words.iter().map(|w| w.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl SpellService for FakeSpeller {
        fn suggest(&self, word: &str) -> Vec<String> {
            self.suggestions.get(word).cloned().unwrap_or_default()
        }

        fn check_word(&self, word: &str) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.valid.contains(word) || self.added.iter().any(|(w, _)| w == word)
        }

        fn add_word(&mut self, word: &str, file_scoped: bool) {
            self.added.push((word.to_string(), file_scoped));
        }
    }

    struct Mistakes(VecDeque<WordInfo>);

    impl Mistakes {
        fn of(words: &[&str]) -> Self {
            Self(
                words
                    .iter()
                    .enumerate()
                    .map(|(i, w)| WordInfo {
                        word: w.to_string(),
                        index: i * 10,
                    })
                    .collect(),
            )
        }
    }

    impl MistakeSource for Mistakes {
        fn next_mistake<S: SpellService>(&mut self, _speller: &S) -> Option<WordInfo> {
            self.0.pop_front()
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        calls: Vec<Vec<Correction>>,
    }

    impl CorrectionWriter for RecordingWriter {
        fn write_corrections(&mut self, _src: &str, _file: &Path, corrections: &[Correction]) -> Result<()> {
            self.calls.push(corrections.to_vec());
            Ok(())
        }
    }

    fn session(dir: &TempDir) -> DictionarySession {
        DictionarySession::with_shared_path(dir.path().join(".spelling"), None)
    }

    fn run(
        session: &mut DictionarySession,
        speller: &mut FakeSpeller,
        prompter: &mut ScriptedPrompter,
        filter: &ConfigFilter,
        options: InteractiveOptions,
        words: &[&str],
    ) -> (Result<CheckResult>, RecordingWriter) {
        let mut writer = RecordingWriter::default();
        let mut fixer = InteractiveFixer::new(session, speller, prompter, filter, options);
        let result = fixer.spell_and_fix_file(
            Path::new("myfile.md"),
            "",
            &mut Mistakes::of(words),
            &mut writer,
        );
        (result, writer)
    }

    fn correction(word: &str, new_word: &str) -> Correction {
        Correction {
            word_info: WordInfo {
                word: word.to_string(),
                index: 0,
            },
            new_word: new_word.to_string(),
        }
    }

    #[test]
    fn test_no_mistakes() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::default();
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &[],
        );

        assert_eq!(result.unwrap().error_count, 0);
        assert!(writer.calls.is_empty());
        assert!(!dir.path().join(".spelling").exists());
    }

    #[test]
    fn test_single_ignore() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Ignore)]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["mispelt"],
        );

        let result = result.unwrap();
        assert_eq!(result.error_count, 1);
        assert_eq!(result.fixed_count, 0);
        assert_eq!(speller.added, [("mispelt".to_string(), false)]);
        assert!(writer.calls.is_empty());
        assert!(!session.store(Scope::Shared).unwrap().is_dirty());
        assert!(!dir.path().join(".spelling").exists());
    }

    #[test]
    fn test_correct_word_with_two_words() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::with_valid(&["two", "words"]);
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input("two words"),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["twowords"],
        );

        assert_eq!(result.unwrap().fixed_count, 1);
        assert_eq!(speller.checks.get(), 2);
        assert_eq!(writer.calls, [vec![correction("twowords", "two words")]]);
        assert_eq!(prompter.inputs, ["twowords"]);
    }

    #[test]
    fn test_correct_word_with_incorrect_word_retries() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::with_valid(&["incorrect"]);
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input("incorret"),
            Answer::Select(Action::Enter),
            Answer::Input("incorrect"),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["incorect"],
        );

        result.unwrap();
        assert_eq!(writer.calls, [vec![correction("incorect", "incorrect")]]);
        assert_eq!(prompter.selects[1].0, RETRY_MESSAGE);
        assert_eq!(prompter.inputs, ["incorect", "incorret"]);
    }

    #[test]
    fn test_empty_correction_leaves_document_unchanged() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input(""),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["mispelt"],
        );

        let result = result.unwrap();
        assert_eq!(result.error_count, 1);
        assert_eq!(result.fixed_count, 0);
        assert!(writer.calls.is_empty());
    }

    #[test]
    fn test_ignored_retry_keeps_typed_text() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input("incorret"),
            Answer::Select(Action::Ignore),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["incorect"],
        );

        result.unwrap();
        assert_eq!(prompter.selects[1].0, RETRY_MESSAGE);
        assert_eq!(writer.calls, [vec![correction("incorect", "incorret")]]);
        assert!(speller.added.contains(&("incorret".to_string(), false)));
    }

    #[test]
    fn test_correct_word_with_filtered_word() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input("ABS"),
        ]);
        let filter = ConfigFilter {
            ignore_acronyms: true,
            ..Default::default()
        };

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["incorect"],
        );

        result.unwrap();
        assert_eq!(speller.checks.get(), 0);
        assert_eq!(writer.calls, [vec![correction("incorect", "ABS")]]);
    }

    #[test]
    fn test_multiple_invalid_words_are_accepted_without_retry() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input("bda wrds"),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["bdawrds"],
        );

        result.unwrap();
        assert_eq!(prompter.selects.len(), 1);
        assert_eq!(writer.calls, [vec![correction("bdawrds", "bda wrds")]]);
    }

    #[test]
    fn test_add_lowercases_and_persists() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Add {
                cased: false,
                scope: Scope::Shared,
            }),
            Answer::Select(Action::Add {
                cased: true,
                scope: Scope::Shared,
            }),
        ]);
        let filter = ConfigFilter::default();

        let (result, _) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["Rustacean", "GitHub"],
        );

        result.unwrap();
        assert_eq!(
            speller.added,
            [("rustacean".to_string(), false), ("GitHub".to_string(), false)]
        );
        let saved = std::fs::read_to_string(dir.path().join(".spelling")).unwrap();
        assert!(saved.contains("\nrustacean\nGitHub\n"));
    }

    #[test]
    fn test_file_ignore_persists_and_becomes_default() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let file_ignore = Action::FileIgnore {
            scope: Scope::Shared,
        };
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(file_ignore),
            Answer::Select(Action::Ignore),
        ]);
        let filter = ConfigFilter::default();

        let (result, _) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["kubectl", "kubectl"],
        );

        result.unwrap();
        assert_eq!(speller.added[0], ("kubectl".to_string(), true));
        let (_, choices, default) = &prompter.selects[1];
        assert_eq!(choices[*default].action, file_ignore);
        assert_eq!(
            session.store(Scope::Shared).unwrap().file_words("myfile.md"),
            ["kubectl"]
        );
    }

    #[test]
    fn test_choice_set_without_uppercase_or_relative() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        speller
            .suggestions
            .insert("teh".to_string(), vec!["the".to_string(), "tech".to_string()]);
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Suggestion(0))]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["teh"],
        );

        result.unwrap();
        let (_, choices, default) = &prompter.selects[0];
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Ignore",
                "Add to file ignores",
                "Add to dictionary - case insensitive",
                "Enter correct spelling",
                "the",
                "tech"
            ]
        );
        assert_eq!(choices[*default].action, Action::Enter);
        assert_eq!(writer.calls, [vec![correction("teh", "the")]]);
    }

    #[test]
    fn test_choice_set_with_uppercase_and_relative() {
        let dir = tempdir().unwrap();
        let relative = dir.path().join("docs").join(".spelling");
        let mut session =
            DictionarySession::with_shared_path(dir.path().join(".spelling"), Some(relative.as_path()));
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Ignore)]);
        let filter = ConfigFilter::default();
        let options = InteractiveOptions {
            suggestions: false,
            relative_spelling_files: true,
        };

        let (result, _) = run(&mut session, &mut speller, &mut prompter, &filter, options, &["Teh"]);

        result.unwrap();
        let actions: Vec<Action> = prompter.selects[0].1.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            [
                Action::Ignore,
                Action::FileIgnore { scope: Scope::Shared },
                Action::FileIgnore { scope: Scope::Relative },
                Action::Add { cased: false, scope: Scope::Shared },
                Action::Add { cased: true, scope: Scope::Shared },
                Action::Add { cased: false, scope: Scope::Relative },
                Action::Add { cased: true, scope: Scope::Relative },
                Action::Enter,
            ]
        );
    }

    #[test]
    fn test_relative_choices_hidden_when_relative_file_is_shared() {
        let dir = tempdir().unwrap();
        let shared = dir.path().join(".spelling");
        let mut session = DictionarySession::with_shared_path(&shared, Some(shared.as_path()));
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Ignore)]);
        let filter = ConfigFilter::default();
        let options = InteractiveOptions {
            suggestions: false,
            relative_spelling_files: true,
        };

        let (result, _) = run(&mut session, &mut speller, &mut prompter, &filter, options, &["teh"]);

        result.unwrap();
        assert!(!session.has_relative());
        let actions: Vec<Action> = prompter.selects[0].1.iter().map(|c| c.action).collect();
        assert_eq!(
            actions,
            [
                Action::Ignore,
                Action::FileIgnore { scope: Scope::Shared },
                Action::Add { cased: false, scope: Scope::Shared },
                Action::Enter,
            ]
        );
    }

    #[test]
    fn test_previous_replacement_is_default_suggestion() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        speller
            .suggestions
            .insert("recieve".to_string(), vec!["relieve".to_string(), "receive".to_string()]);
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Suggestion(1)),
            Answer::Select(Action::Suggestion(1)),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["recieve", "recieve"],
        );

        result.unwrap();
        let (_, choices, default) = &prompter.selects[1];
        assert_eq!(choices[*default].action, Action::Suggestion(1));
        assert_eq!(choices[*default].label, "receive");
        assert_eq!(writer.calls[0].len(), 2);
    }

    #[test]
    fn test_previous_typed_replacement_is_prepended() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::with_valid(&["received"]);
        speller
            .suggestions
            .insert("recieved".to_string(), vec!["relieved".to_string()]);
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::Enter),
            Answer::Input("received"),
            Answer::Select(Action::Suggestion(0)),
        ]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["recieved", "recieved"],
        );

        result.unwrap();
        let (_, choices, default) = &prompter.selects[1];
        assert_eq!(choices[*default].action, Action::Suggestion(0));
        assert_eq!(choices[*default].label, "received");
        assert_eq!(choices.last().unwrap().label, "relieved");
        assert_eq!(writer.calls[0][1].new_word, "received");
    }

    #[test]
    fn test_previous_replacement_survives_changed_ranking() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        speller
            .suggestions
            .insert("wierd".to_string(), vec!["wired".to_string(), "weird".to_string()]);
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Suggestion(1))]);
        let filter = ConfigFilter::default();

        let mut writer = RecordingWriter::default();
        let mut fixer = InteractiveFixer::new(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
        );
        fixer
            .spell_and_fix_file(Path::new("a.md"), "", &mut Mistakes::of(&["wierd"]), &mut writer)
            .unwrap();
        drop(fixer);

        speller
            .suggestions
            .insert("wierd".to_string(), vec!["weird".to_string()]);
        prompter.answers.push_back(Answer::Select(Action::Suggestion(0)));

        let mut fixer = InteractiveFixer::new(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
        );
        fixer.previous_choices.insert(
            "wierd".to_string(),
            PreviousChoice::Replace("weird".to_string()),
        );
        let replaced = fixer
            .resolve_mistake("wierd", "", Path::new("a.md"))
            .unwrap();

        assert_eq!(replaced.as_deref(), Some("weird"));
        let (_, choices, default) = &prompter.selects[1];
        assert!(*default < choices.len());
        assert_eq!(choices[*default].action, Action::Suggestion(0));
    }

    #[test]
    fn test_unoffered_action_is_fatal() {
        let dir = tempdir().unwrap();
        let mut session = session(&dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Suggestion(3))]);
        let filter = ConfigFilter::default();

        let (result, writer) = run(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
            &["mispelt"],
        );

        assert!(matches!(result, Err(SpellfixError::UnrecognisedAction(_))));
        assert!(writer.calls.is_empty());
    }

    #[test]
    fn test_relative_scope_is_flushed_when_enabled() {
        let dir = tempdir().unwrap();
        let relative = dir.path().join("docs").join(".spelling");
        std::fs::create_dir_all(relative.parent().unwrap()).unwrap();
        let mut session =
            DictionarySession::with_shared_path(dir.path().join(".spelling"), Some(relative.as_path()));
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![Answer::Select(Action::Add {
            cased: false,
            scope: Scope::Relative,
        })]);
        let filter = ConfigFilter::default();
        let options = InteractiveOptions {
            suggestions: true,
            relative_spelling_files: true,
        };

        let (result, _) = run(&mut session, &mut speller, &mut prompter, &filter, options, &["tokio"]);

        result.unwrap();
        assert!(relative.exists());
        assert!(!dir.path().join(".spelling").exists());
    }

    #[test]
    fn test_replaced_session_keeps_remembered_choices() {
        let first_dir = tempdir().unwrap();
        let second_dir = tempdir().unwrap();
        let mut session = session(&first_dir);
        let mut speller = FakeSpeller::default();
        let mut prompter = ScriptedPrompter::new(vec![
            Answer::Select(Action::FileIgnore {
                scope: Scope::Shared,
            }),
            Answer::Select(Action::FileIgnore {
                scope: Scope::Shared,
            }),
        ]);
        let filter = ConfigFilter::default();
        let mut writer = RecordingWriter::default();

        let mut fixer = InteractiveFixer::new(
            &mut session,
            &mut speller,
            &mut prompter,
            &filter,
            InteractiveOptions::default(),
        );
        fixer
            .spell_and_fix_file(Path::new("a.md"), "", &mut Mistakes::of(&["kubectl"]), &mut writer)
            .unwrap();

        fixer.replace_session(DictionarySession::with_shared_path(
            second_dir.path().join(".spelling"),
            None,
        ));
        assert!(fixer.session().file_words(Path::new("a.md")).is_empty());
        fixer
            .spell_and_fix_file(Path::new("b.md"), "", &mut Mistakes::of(&["kubectl"]), &mut writer)
            .unwrap();
        drop(fixer);

        let (_, choices, default) = &prompter.selects[1];
        assert_eq!(
            choices[*default].action,
            Action::FileIgnore {
                scope: Scope::Shared
            }
        );
        assert_eq!(session.file_words(Path::new("b.md")), ["kubectl"]);
        assert!(first_dir.path().join(".spelling").exists());
        assert!(second_dir.path().join(".spelling").exists());
    }
}
