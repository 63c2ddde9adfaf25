//! # Vocabulary and Feature Caches
//!
//! Derived vocabulary state is persisted next to (or keyed by) the corpus path:
//!
//! * the symmetric-window vocabulary cache, keyed by corpus path alone:
//!   `"{corpus}.vocab.json"`, holding a [`VocabCounts`] archive
//!   (`words`, `n_tokens`, `n_total_tokens`).
//! * the split-window feature cache, keyed by corpus path and feature count:
//!   `"{corpus}.f{n_features}.json"`, holding a [`FeatureArchive`]
//!   `(n_total_tokens, words)` pair.
//!
//! ## Staleness
//!
//! Caches are trusted on read. No checksum of the corpus content is taken,
//! so a cache written before the corpus changed is still returned verbatim.
//! The vocabulary cache is also reused for any `vocab_size`; pass `reload`
//! to force a rebuild. A cache that fails to decode is an error; it is never
//! silently rebuilt.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    WCResult,
    WordContextError,
    corpus::CaseMode,
    disk_cache::CorpusCache,
    types::Token,
    vocab::{VocabCounts, build_vocabulary_path},
};

/// Cache key suffix of the symmetric-window vocabulary cache.
pub const VOCAB_CACHE_SUFFIX: &str = ".vocab.json";

/// Cache key suffix of the split-window feature cache for `n_features`.
pub fn feature_cache_suffix(n_features: usize) -> String {
    format!(".f{n_features}.json")
}

/// The persisted split-window feature list: `(n_total_tokens, words)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureArchive(pub u64, pub Vec<Token>);

impl FeatureArchive {
    /// The total corpus token count.
    pub fn n_total_tokens(&self) -> u64 {
        self.0
    }

    /// The ranked words.
    pub fn words(&self) -> &[Token] {
        &self.1
    }
}

/// Read a JSON archive.
///
/// I/O failures are [`WordContextError::Io`];
/// decode failures are [`WordContextError::Deserialization`].
pub fn read_archive<T, P>(path: P) -> WCResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|err| WordContextError::Deserialization {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Write a JSON archive, replacing any existing file.
pub fn write_archive<T, P>(
    value: &T,
    path: P,
) -> WCResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)
        .map_err(|err| WordContextError::Serialization(err.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Load the symmetric-window vocabulary, building and caching it on a miss.
///
/// Words are counted lower-cased.
///
/// ## Arguments
/// * `corpus` - the corpus path; also the cache key.
/// * `vocab_size` - the word count used when building; ignored on a cache hit.
/// * `reload` - rebuild and overwrite the cache even if it exists.
/// * `cache` - the cache location policy.
pub fn load_or_build_vocab<P: AsRef<Path>>(
    corpus: P,
    vocab_size: usize,
    reload: bool,
    cache: &CorpusCache,
) -> WCResult<VocabCounts> {
    let corpus = corpus.as_ref();
    let path = cache.cache_path(corpus, VOCAB_CACHE_SUFFIX);

    let counts = if path.exists() && !reload {
        log::info!("Loading vocabulary cache: {}", path.display());
        read_archive(&path)?
    } else {
        log::info!("Building vocabulary: {}", corpus.display());
        let counts = build_vocabulary_path(corpus, vocab_size, CaseMode::Lowercase)?;
        let path = cache.prepare_cache_path(corpus, VOCAB_CACHE_SUFFIX)?;
        write_archive(&counts, &path)?;
        log::debug!("Wrote vocabulary cache: {}", path.display());
        counts
    };

    log::info!(
        "{} tokens total, {} without {}",
        counts.n_total_tokens,
        counts.n_tokens,
        crate::vocab::UNKNOWN_TOKEN
    );
    Ok(counts)
}

/// Load the split-window feature list, building and caching it on a miss.
///
/// Words are counted case-sensitively; the `n_features` most frequent are kept.
pub fn load_or_build_features<P: AsRef<Path>>(
    corpus: P,
    n_features: usize,
    cache: &CorpusCache,
) -> WCResult<FeatureArchive> {
    let corpus = corpus.as_ref();
    let suffix = feature_cache_suffix(n_features);
    let path = cache.cache_path(corpus, &suffix);

    if path.exists() {
        log::info!("Loading feature cache: {}", path.display());
        return read_archive(&path);
    }

    log::info!("Getting words: {}", corpus.display());
    let counts = build_vocabulary_path(corpus, n_features, CaseMode::Preserve)?;
    let archive = FeatureArchive(counts.n_total_tokens, counts.words);

    let path = cache.prepare_cache_path(corpus, &suffix)?;
    write_archive(&archive, &path)?;
    log::debug!("Wrote feature cache: {}", path.display());

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;
    use crate::disk_cache::{CorpusCacheOptions, WORDCONTEXT_CACHE_DIR};

    fn sibling_cache() -> CorpusCache {
        CorpusCacheOptions::default()
            .with_cache_dir(None::<&str>)
            .init()
            .unwrap()
    }

    #[test]
    fn test_vocab_cache_round_trip() {
        let dir = TempDir::new("vocab_cache").unwrap();
        let corpus = dir.path().join("corpus.txt");
        fs::write(&corpus, "A b a\nc A B\n").unwrap();
        let cache = CorpusCacheOptions::default()
            .with_cache_dir(Some(dir.path().join("cache")))
            .init()
            .unwrap();

        let built = load_or_build_vocab(&corpus, 2, false, &cache).unwrap();
        assert_eq!(built.words, vec!["a", "b"]);
        assert_eq!(built.n_tokens, 5);
        assert_eq!(built.n_total_tokens, 6);

        let path = cache.cache_path(&corpus, VOCAB_CACHE_SUFFIX);
        assert!(path.exists());
        let bytes = fs::read(&path).unwrap();

        let loaded = load_or_build_vocab(&corpus, 2, false, &cache).unwrap();
        assert_eq!(loaded, built);

        let rebuilt = load_or_build_vocab(&corpus, 2, true, &cache).unwrap();
        assert_eq!(rebuilt, built);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    #[serial]
    fn test_vocab_cache_is_trusted() {
        let dir = TempDir::new("vocab_cache").unwrap();
        let corpus = dir.path().join("corpus.txt");
        fs::write(&corpus, "x x y\n").unwrap();

        let cache = sibling_cache();
        let first = load_or_build_vocab(&corpus, 10, false, &cache).unwrap();
        assert!(dir.path().join("corpus.txt.vocab.json").exists());

        // Neither a corpus change nor a new vocab size invalidates the cache.
        fs::write(&corpus, "z z z\n").unwrap();
        let stale = load_or_build_vocab(&corpus, 1, false, &cache).unwrap();
        assert_eq!(stale, first);

        let fresh = load_or_build_vocab(&corpus, 1, true, &cache).unwrap();
        assert_eq!(fresh.words, vec!["z"]);
    }

    #[test]
    #[serial]
    fn test_corrupt_cache_is_an_error() {
        let dir = TempDir::new("vocab_cache").unwrap();
        let corpus = dir.path().join("corpus.txt");
        fs::write(&corpus, "x y\n").unwrap();

        let cache = sibling_cache();
        fs::write(cache.cache_path(&corpus, VOCAB_CACHE_SUFFIX), "{not json").unwrap();

        let err = load_or_build_vocab(&corpus, 10, false, &cache).unwrap_err();
        assert!(matches!(err, WordContextError::Deserialization { .. }));

        // A forced reload replaces the corrupt cache.
        assert!(load_or_build_vocab(&corpus, 10, true, &cache).is_ok());
        assert!(load_or_build_vocab(&corpus, 10, false, &cache).is_ok());
    }

    #[test]
    #[serial]
    fn test_feature_cache_keyed_by_feature_count() {
        let dir = TempDir::new("feature_cache").unwrap();
        let corpus = dir.path().join("corpus.txt");
        fs::write(&corpus, "the The the cat the\n").unwrap();

        let cache = sibling_cache();
        let two = load_or_build_features(&corpus, 2, &cache).unwrap();
        assert_eq!(two.n_total_tokens(), 5);
        assert_eq!(two.words(), &["the", "The"]);

        let one = load_or_build_features(&corpus, 1, &cache).unwrap();
        assert_eq!(one.words(), &["the"]);

        assert!(dir.path().join("corpus.txt.f2.json").exists());
        assert!(dir.path().join("corpus.txt.f1.json").exists());

        let again = load_or_build_features(&corpus, 2, &cache).unwrap();
        assert_eq!(again, two);
    }

    #[test]
    #[serial]
    fn test_feature_cache_format_mismatch() {
        let dir = TempDir::new("feature_cache").unwrap();
        let corpus = dir.path().join("corpus.txt");
        fs::write(&corpus, "a b\n").unwrap();

        let cache = sibling_cache();
        // A vocabulary archive is not a feature archive.
        write_archive(
            &VocabCounts {
                words: vec!["a".into()],
                n_tokens: 1,
                n_total_tokens: 2,
            },
            cache.cache_path(&corpus, &feature_cache_suffix(4)),
        )
        .unwrap();

        let err = load_or_build_features(&corpus, 4, &cache).unwrap_err();
        assert!(matches!(err, WordContextError::Deserialization { .. }));
    }

    #[test]
    #[serial]
    fn test_missing_corpus() {
        let dir = TempDir::new("vocab_cache").unwrap();
        let corpus = dir.path().join("missing.txt");
        let err = load_or_build_vocab(&corpus, 10, false, &sibling_cache()).unwrap_err();
        assert!(matches!(err, WordContextError::Io(_)));
    }

    #[test]
    #[serial]
    fn test_env_cache_dir() {
        let dir = TempDir::new("vocab_cache").unwrap();
        let corpus = dir.path().join("corpus.txt");
        fs::write(&corpus, "x y x\n").unwrap();
        let cache_dir = dir.path().join("env_cache");

        let orig = std::env::var(WORDCONTEXT_CACHE_DIR);
        unsafe {
            std::env::set_var(WORDCONTEXT_CACHE_DIR, &cache_dir);
        }
        let cache = CorpusCache::default();
        match orig {
            Ok(orig) => unsafe { std::env::set_var(WORDCONTEXT_CACHE_DIR, orig) },
            Err(_) => unsafe { std::env::remove_var(WORDCONTEXT_CACHE_DIR) },
        }

        assert_eq!(cache.cache_dir(), Some(cache_dir.as_path()));
        let counts = load_or_build_vocab(&corpus, 1, false, &cache).unwrap();
        assert_eq!(counts.words, vec!["x"]);

        let path = cache.cache_path(&corpus, VOCAB_CACHE_SUFFIX);
        assert!(path.starts_with(&cache_dir));
        assert!(path.exists());
        assert!(!dir.path().join("corpus.txt.vocab.json").exists());
    }
}
