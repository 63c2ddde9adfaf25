//! # wordcontext-disk-cache
//!
//! Resolves where derived corpus state (vocabulary and feature caches) lives on disk.
//!
//! By default a cache file sits next to the corpus it was derived from;
//! `corpus.txt` caches to `corpus.txt<suffix>`. A cache directory may be
//! supplied explicitly, through [`WORDCONTEXT_CACHE_DIR`], or (opt-in) through
//! the per-user project cache directory.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod corpus_cache;
pub mod path_resolver;
pub mod path_utils;

pub use corpus_cache::{CorpusCache, CorpusCacheOptions};

/// Environment variable key to override the default cache directory.
pub const WORDCONTEXT_CACHE_DIR: &str = "WORDCONTEXT_CACHE_DIR";

/// Default [`PathResolver`] for wordcontext.
pub const WORDCONTEXT_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.wordcontext",
    organization: "",
    application: "wordcontext",
    cache_env_vars: &[WORDCONTEXT_CACHE_DIR],
};
