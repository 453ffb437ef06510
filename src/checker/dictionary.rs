use anyhow::{Context, Result};
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Words used when no dictionary has been built for a language.
const BASIC_WORDS: &str = "
    a about above after again against all also an and another any are around as at
    back be because been before being below between both but by
    call came can change check come could
    day did different do does done down during
    each end even every
    few file find first for found from
    get give go good great
    had has have he her here him his how
    i if in into is it its
    just
    keep kind know
    large last left less like line list little long look
    made make many may me might more most much must my
    name need never new next no not now number
    of off often old on once one only or other our out over own
    part people place point
    read right run
    said same say see set should show since small so some something sound spell
    spelling still such
    take than that the their them then there these they thing think this those
    through time to too try two
    under until up us use used
    very
    want was water way we well went were what when where which while who why will
    with word words work world would write
    year you your
    array async await boolean build callback class code compile configuration debug
    deploy dictionary error exception export function import integer markdown method
    object parameter promise return string test variable version
";

pub struct Dictionary {
    set: Set<Vec<u8>>,
}

impl Dictionary {
    /// Load the installed dictionary for `language`, or the built-in word list.
    pub fn load(language: &str) -> Result<Self> {
        match Self::installed_path(language) {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Self::basic(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes).context("Failed to parse dictionary")?;
        Ok(Self { set })
    }

    /// Build an in-memory dictionary.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = normalise(words);
        let set = Set::from_iter(words.iter()).context("Failed to build dictionary")?;
        Ok(Self { set })
    }

    fn basic() -> Result<Self> {
        Self::from_words(BASIC_WORDS.split_whitespace())
    }

    /// Write a dictionary file from a word list. Returns the number of words stored.
    pub fn build_from_words<I, S>(words: I, output_path: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = normalise(words);

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;
        let mut builder =
            SetBuilder::new(BufWriter::new(file)).context("Failed to create FST builder")?;
        for word in &words {
            builder
                .insert(word)
                .context("Failed to insert word into dictionary")?;
        }
        builder.finish().context("Failed to finalize dictionary")?;

        Ok(words.len())
    }

    /// `<data dir>/<language>.dict`
    pub fn installed_path(language: &str) -> Option<PathBuf> {
        crate::config::Config::data_dir().map(|dir| dir.join(format!("{}.dict", language)))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Get all words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                results.push(word.to_string());
            }
        }

        results
    }
}

/// Lowercased, sorted, deduplicated; single letters dropped.
fn normalise<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut words: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| w.chars().count() > 1 || w == "a" || w == "i")
        .collect();
    words.sort();
    words.dedup();
    words
}
