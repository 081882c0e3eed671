use std::env;
use std::path::{Path, PathBuf};

/// Resolves an executable reference against the inherited search path.
///
/// A reference containing a path separator is taken verbatim (absolute or
/// relative to the current directory). Anything else is joined with each
/// search directory in order and the first existing candidate wins.
#[derive(Debug, Clone)]
pub struct ProgramResolver {
    search_dirs: Vec<PathBuf>,
}

impl Default for ProgramResolver {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ProgramResolver {
    pub fn from_env() -> Self {
        let search_dirs = env::var_os("PATH")
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();
        Self { search_dirs }
    }

    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        if program.contains('/') {
            return Some(PathBuf::from(program));
        }

        self.search_dirs
            .iter()
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.exists())
    }

    pub fn search_dirs(&self) -> impl Iterator<Item = &Path> {
        self.search_dirs.iter().map(PathBuf::as_path)
    }
}
