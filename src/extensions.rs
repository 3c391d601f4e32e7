//! File extension selection
//!
//! Extensions are given as colon-separated lists (`log:cfg`). Entries longer than
//! [`MAX_EXTENSION_LEN`] are truncated, not rejected.

/// Maximum extension length in characters
///
/// ASCII extensions behave as a 4-byte cut; longer UTF-8 characters are never split.
pub const MAX_EXTENSION_LEN: usize = 4;

/// Extensions harvested when none are given
pub const DEFAULT_EXTENSIONS: [&str; 2] = ["txt", "text"];

/// Ordered set of distinct file extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    /// Parse a single colon-separated list
    pub fn parse(spec: &str) -> Self {
        let mut set = Self { extensions: Vec::new() };
        set.extend_from_spec(spec);
        set
    }

    /// Concatenate several colon-separated lists in order.
    /// No lists at all means the default set.
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Self {
        if specs.is_empty() {
            return Self::default();
        }

        let mut set = Self { extensions: Vec::new() };
        for spec in specs {
            set.extend_from_spec(spec.as_ref());
        }
        set
    }

    fn extend_from_spec(&mut self, spec: &str) {
        for entry in spec.split(':').filter(|e| !e.is_empty()) {
            let ext: String = entry.chars().take(MAX_EXTENSION_LEN).collect();
            if ext.len() < entry.len() {
                log::debug!("Extension '{}' truncated to '{}'", entry, ext);
            }
            if !self.extensions.contains(&ext) {
                self.extensions.push(ext);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.extensions
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}
