//! # Cache Directory Resolver

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// Static configuration for cache directory resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// The resolution order for cache directory environment variables.
    pub cache_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// Resolve the cache directory for this config.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each `self.cache_env_vars`; in order.
    /// 3. `self.project_dirs().cache_dir()`, if `use_project_dirs` and present.
    /// 4. `None`; caches are then written next to their corpus.
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
        use_project_dirs: bool,
    ) -> Option<PathBuf> {
        if let Some(path) = path.as_ref() {
            return Some(path.as_ref().to_path_buf());
        }

        for env_var in self.cache_env_vars {
            if let Ok(path) = env::var(env_var)
                && !path.is_empty()
            {
                return Some(PathBuf::from(path));
            }
        }

        if use_project_dirs {
            return self.project_dirs().map(|pds| pds.cache_dir().to_path_buf());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const CACHE_ENV1: &str = "_WORDCONTEXT_TEST_CACHE_ENV1";
    const CACHE_ENV2: &str = "_WORDCONTEXT_TEST_CACHE_ENV2";

    const TEST_CONFIG: PathResolver = PathResolver {
        qualifier: "io",
        organization: "crates",
        application: "example",
        cache_env_vars: &[CACHE_ENV1, CACHE_ENV2],
    };

    #[test]
    #[serial]
    fn test_resolve_cache_dir() {
        let no_path: Option<PathBuf> = None;
        let user_dir = PathBuf::from("/tmp/wordcontext/user");
        let env_dir1 = PathBuf::from("/tmp/wordcontext/env.1");
        let env_dir2 = PathBuf::from("/tmp/wordcontext/env.2");

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
        }

        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(user_dir.clone()), false),
            Some(user_dir.clone())
        );
        assert_eq!(TEST_CONFIG.resolve_cache_dir(no_path.clone(), false), None);

        if let Some(pds) = TEST_CONFIG.project_dirs() {
            assert_eq!(
                TEST_CONFIG.resolve_cache_dir(no_path.clone(), true),
                Some(pds.cache_dir().to_path_buf())
            );
        }

        // Lowest priority env var.
        unsafe {
            env::set_var(CACHE_ENV2, env_dir2.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone(), true),
            Some(env_dir2.clone())
        );

        // Higher priority env var.
        unsafe {
            env::set_var(CACHE_ENV1, env_dir1.to_str().unwrap());
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone(), false),
            Some(env_dir1.clone())
        );

        // User overrides still win.
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(user_dir.clone()), true),
            Some(user_dir)
        );

        unsafe {
            env::remove_var(CACHE_ENV1);
            env::remove_var(CACHE_ENV2);
        }
    }
}
