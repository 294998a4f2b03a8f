//! Ignore and binary-extension rules

use crate::types::SyncError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// File names that are never synchronized
pub const DEFAULT_IGNORE_FILES: &[&str] = &[".DS_Store"];

/// Suffixes of files copied byte-for-byte
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    ".jpg", ".png", ".gif", ".jpeg", ".pdf", ".svg", ".gz", ".zip", ".ser", ".jar", ".obj",
];

/// Immutable ignore set and binary extension set for one run
///
/// A rules file replaces whichever field it names; omitted fields keep their
/// defaults. Ignore names match exactly. Binary extensions match the end of
/// the file name ignoring ASCII case, so `LOGO.PNG` is binary under `.png`.
///
/// ```
/// use srcsync::config::SyncRules;
///
/// let rules = SyncRules::from_toml_str("binary_extensions = [\".bin\"]")?;
/// assert!(rules.is_binary_name("firmware.bin"));
/// assert!(rules.is_binary_name("FIRMWARE.BIN"));
/// assert!(!rules.is_binary_name("logo.png"));
/// assert!(rules.is_ignored_name(".DS_Store"));
/// # Ok::<(), srcsync::SyncError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncRules {
    /// Exact file names excluded from synchronization
    pub ignore: BTreeSet<String>,

    /// File name suffixes (with leading dot) that bypass text normalization
    pub binary_extensions: Vec<String>,
}

impl Default for SyncRules {
    fn default() -> Self {
        Self {
            ignore: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
            binary_extensions: DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SyncRules {
    /// Rules with no ignored names and no binary extensions
    pub fn empty() -> Self {
        Self {
            ignore: BTreeSet::new(),
            binary_extensions: Vec::new(),
        }
    }

    /// Parse rules from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, SyncError> {
        let mut rules: SyncRules = toml::from_str(content)
            .map_err(|e| SyncError::Config(format!("Invalid rules file: {}", e)))?;
        rules.binary_extensions = rules
            .binary_extensions
            .into_iter()
            .map(normalize_extension)
            .collect();
        Ok(rules)
    }

    /// Load rules from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Cannot read rules file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Add a file name to the ignore set
    pub fn with_ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.insert(name.into());
        self
    }

    /// Add a binary extension; a missing leading dot is added
    pub fn with_binary_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = normalize_extension(extension.into());
        if !self.binary_extensions.contains(&extension) {
            self.binary_extensions.push(extension);
        }
        self
    }

    /// Check whether a file name is in the ignore set
    pub fn is_ignored(&self, file_name: &OsStr) -> bool {
        file_name
            .to_str()
            .is_some_and(|name| self.ignore.contains(name))
    }

    /// String form of [`SyncRules::is_ignored`]
    pub fn is_ignored_name(&self, file_name: &str) -> bool {
        self.ignore.contains(file_name)
    }

    /// Check whether a path's file name ends with a binary extension
    pub fn is_binary(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.is_binary_name(&name.to_string_lossy()))
            .unwrap_or(false)
    }

    /// Suffix match is ASCII case-insensitive, so `LOGO.PNG` counts as `.png`
    pub fn is_binary_name(&self, file_name: &str) -> bool {
        let lowered = file_name.to_ascii_lowercase();
        self.binary_extensions
            .iter()
            .any(|ext| lowered.ends_with(&ext.to_ascii_lowercase()))
    }
}

fn normalize_extension(extension: String) -> String {
    if extension.starts_with('.') {
        extension
    } else {
        format!(".{}", extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_rules() {
        let rules = SyncRules::default();
        assert!(rules.is_ignored(OsStr::new(".DS_Store")));
        assert!(!rules.is_ignored(OsStr::new("DS_Store")));
        assert_eq!(rules.binary_extensions.len(), 11);
        assert!(rules.is_binary(Path::new("/tmp/a/photo.jpeg")));
        assert!(rules.is_binary(Path::new("archive.tar.gz")));
        assert!(!rules.is_binary(Path::new("notes.txt")));
    }

    #[test]
    fn test_binary_match_ignores_case() {
        let rules = SyncRules::default();
        assert!(rules.is_binary(&PathBuf::from("LOGO.PNG")));
        assert!(rules.is_binary_name("Report.Pdf"));
    }

    #[test]
    fn test_suffix_match_is_not_extension_parsing() {
        let rules = SyncRules::empty().with_binary_extension(".obj");
        // Plain ends-with on the name, so a bare dotfile matches too.
        assert!(rules.is_binary_name("model.obj"));
        assert!(rules.is_binary_name(".obj"));
        assert!(!rules.is_binary_name("model.objc"));
    }

    #[test]
    fn test_with_binary_extension_adds_dot_once() {
        let rules = SyncRules::empty()
            .with_binary_extension("woff")
            .with_binary_extension(".woff");
        assert_eq!(rules.binary_extensions, vec![".woff".to_string()]);
    }

    #[test]
    fn test_with_ignore() {
        let rules = SyncRules::default().with_ignore("Thumbs.db");
        assert!(rules.is_ignored_name("Thumbs.db"));
        assert!(rules.is_ignored_name(".DS_Store"));
    }

    #[test]
    fn test_toml_replaces_named_field_only() {
        let rules = SyncRules::from_toml_str("ignore = [\"desktop.ini\"]").unwrap();
        assert!(rules.is_ignored_name("desktop.ini"));
        assert!(!rules.is_ignored_name(".DS_Store"));
        assert_eq!(rules.binary_extensions, SyncRules::default().binary_extensions);
    }

    #[test]
    fn test_toml_normalizes_extensions() {
        let rules = SyncRules::from_toml_str("binary_extensions = [\"png\", \".ico\"]").unwrap();
        assert_eq!(
            rules.binary_extensions,
            vec![".png".to_string(), ".ico".to_string()]
        );
    }

    #[test]
    fn test_toml_rejects_unknown_fields() {
        let result = SyncRules::from_toml_str("ignored = [\"x\"]");
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let result = SyncRules::load(Path::new("/nonexistent/rules.toml"));
        assert!(matches!(result, Err(SyncError::Config(_))));
    }
}
