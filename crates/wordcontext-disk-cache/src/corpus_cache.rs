//! # Corpus Cache

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{WORDCONTEXT_CACHE_CONFIG, path_utils};

/// Options for [`CorpusCache`].
#[derive(Clone, Default, Debug)]
pub struct CorpusCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Fall back to the per-user project cache directory
    /// when no directory is configured.
    pub use_project_dirs: bool,
}

impl CorpusCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Enable or disable the project cache directory fallback.
    pub fn with_project_dirs(
        mut self,
        use_project_dirs: bool,
    ) -> Self {
        self.use_project_dirs = use_project_dirs;
        self
    }

    /// Build a [`CorpusCache`] from these options.
    pub fn init(self) -> anyhow::Result<CorpusCache> {
        CorpusCache::new(self)
    }
}

/// Maps a corpus path and a cache key suffix to a cache file path.
///
/// The mapping is a pure function of the corpus *path*; the corpus content
/// is never inspected. A cache written for a corpus stays valid, as far as
/// this type is concerned, after the corpus file changes.
#[derive(Clone, Debug)]
pub struct CorpusCache {
    /// Cache directory; `None` places caches next to the corpus.
    cache_dir: Option<PathBuf>,
}

impl Default for CorpusCache {
    fn default() -> Self {
        Self {
            cache_dir: WORDCONTEXT_CACHE_CONFIG.resolve_cache_dir(None::<PathBuf>, false),
        }
    }
}

impl CorpusCache {
    /// Construct a new [`CorpusCache`].
    pub fn new(options: CorpusCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = WORDCONTEXT_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir, options.use_project_dirs);

        if options.use_project_dirs && cache_dir.is_none() {
            anyhow::bail!("failed to resolve project cache directory");
        }

        Ok(Self { cache_dir })
    }

    /// Get the cache directory, if caches are not stored next to the corpus.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Get the cache path for a corpus and key suffix.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `corpus` - the corpus path, as given by the caller.
    /// * `suffix` - the cache key suffix, e.g. `".vocab.json"`.
    pub fn cache_path<P: AsRef<Path>>(
        &self,
        corpus: P,
        suffix: &str,
    ) -> PathBuf {
        match &self.cache_dir {
            None => path_utils::with_suffix(corpus, suffix),
            Some(dir) => path_utils::with_suffix(
                dir.join(path_utils::flatten_path(corpus)),
                suffix,
            ),
        }
    }

    /// Get the cache path for a corpus and key suffix,
    /// creating the containing directory if needed.
    pub fn prepare_cache_path<P: AsRef<Path>>(
        &self,
        corpus: P,
        suffix: &str,
    ) -> anyhow::Result<PathBuf> {
        let path = self.cache_path(corpus, suffix);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create cache dir: {}", parent.display()))?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;
    use crate::WORDCONTEXT_CACHE_DIR;

    #[test]
    #[serial]
    fn test_sibling_cache_path() {
        let orig = env::var(WORDCONTEXT_CACHE_DIR);
        unsafe {
            env::remove_var(WORDCONTEXT_CACHE_DIR);
        }

        let cache = CorpusCacheOptions::default().init().unwrap();
        assert_eq!(cache.cache_dir(), None);
        assert_eq!(
            cache.cache_path("data/corpus.txt", ".vocab.json"),
            PathBuf::from("data/corpus.txt.vocab.json")
        );

        if let Ok(orig) = orig {
            unsafe { env::set_var(WORDCONTEXT_CACHE_DIR, orig) }
        }
    }

    #[test]
    #[serial]
    fn test_env_cache_dir() {
        let orig = env::var(WORDCONTEXT_CACHE_DIR);
        unsafe {
            env::set_var(WORDCONTEXT_CACHE_DIR, "/tmp/wordcontext/env_cache");
        }

        let cache = CorpusCache::default();
        assert_eq!(
            cache.cache_path("/data/corpus.txt", ".f100.json"),
            PathBuf::from("/tmp/wordcontext/env_cache/__data__corpus.txt.f100.json")
        );

        match orig {
            Ok(orig) => unsafe { env::set_var(WORDCONTEXT_CACHE_DIR, orig) },
            Err(_) => unsafe { env::remove_var(WORDCONTEXT_CACHE_DIR) },
        }
    }

    #[test]
    fn test_explicit_cache_dir() {
        let cache = CorpusCacheOptions::default()
            .with_cache_dir(Some("/tmp/wordcontext/explicit"))
            .init()
            .unwrap();
        assert_eq!(
            cache.cache_dir(),
            Some(Path::new("/tmp/wordcontext/explicit"))
        );
        assert_eq!(
            cache.cache_path("corpus.txt", ".vocab.json"),
            PathBuf::from("/tmp/wordcontext/explicit/corpus.txt.vocab.json")
        );
    }
}
