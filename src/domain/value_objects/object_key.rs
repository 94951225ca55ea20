/// The key of an object inside its bucket.
///
/// Keys are composed from caller-supplied filenames and are deliberately not
/// normalized: slashes and `..` segments in a filename are kept as sent.
/// A storage backend that cannot address a key verbatim rejects it instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Wrap a raw key without validation
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Compose `subdirectory/filename`, or just `filename` when there is no
    /// subdirectory. An empty subdirectory still contributes its separator.
    pub fn from_parts(subdirectory: Option<&str>, filename: &str) -> Self {
        match subdirectory {
            Some(subdirectory) => Self(format!("{}/{}", subdirectory, filename)),
            None => Self(filename.to_string()),
        }
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert_eq!(ObjectKey::from_parts(None, "report.txt").as_str(), "report.txt");
        assert_eq!(
            ObjectKey::from_parts(Some("2024"), "report.txt").as_str(),
            "2024/report.txt"
        );
        assert_eq!(ObjectKey::from_parts(Some(""), "report.txt").as_str(), "/report.txt");
    }

    #[test]
    fn test_filenames_pass_through_unchanged() {
        let key = ObjectKey::from_parts(Some("uploads"), "../etc/passwd");
        assert_eq!(key.as_str(), "uploads/../etc/passwd");

        let key = ObjectKey::from_parts(None, "a//b");
        assert_eq!(key.as_str(), "a//b");
    }
}
