//! Path exclusions.
//!
//! Which documents get preprocessed is decided by the caller. The
//! preprocessor only honors a list of substring matchers: a document whose
//! path contains any of them is returned untouched.

/// Matchers for build output the SvelteKit toolchain generates.
pub const SVELTEKIT_EXCLUDES: &[&str] = &[
    ".svelte-kit/",
    "node_modules/",
    "generated/",
    "root.svelte",
];

/// A list of path substrings that disable preprocessing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathExclusions {
    patterns: Vec<String>,
}

impl PathExclusions {
    /// An empty list: nothing is excluded.
    pub fn new() -> Self {
        Self::default()
    }

    /// The generated-file matchers of a SvelteKit project.
    pub fn sveltekit_defaults() -> Self {
        SVELTEKIT_EXCLUDES.iter().copied().collect()
    }

    /// Adds a matcher. Empty matchers are ignored, since they would match
    /// every path.
    pub fn add(mut self, pattern: impl Into<String>) -> Self {
        self.push(pattern);
        self
    }

    /// Adds a matcher in place.
    pub fn push(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !pattern.is_empty() && !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Returns the first matcher contained in `path`, if any.
    pub fn matching(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| path.contains(pattern.as_str()))
            .map(String::as_str)
    }

    /// Whether `path` should be passed through unchanged.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matching(path).is_some()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PathExclusions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut exclusions = Self::new();
        for pattern in iter {
            exclusions.push(pattern);
        }
        exclusions
    }
}

impl<S: Into<String>> Extend<S> for PathExclusions {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for pattern in iter {
            self.push(pattern);
        }
    }
}
