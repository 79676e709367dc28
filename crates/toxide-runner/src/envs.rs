// ABOUTME: Environment name newtype and the `tox -a` output parser
// ABOUTME: Listing output is trimmed line-wise with order preserved and blanks dropped

/// Represents a tox environment name (e.g., "py39", "lint")
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnvName(String);

impl EnvName {
    /// Create a new environment name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Get the environment name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EnvName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EnvName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for EnvName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EnvName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse the stdout of `tox -a` into environment names.
///
/// One name per line; surrounding whitespace (including `\r` from CRLF
/// output) is stripped from each line, blank lines are dropped, and the
/// listing order is kept as tox printed it.
pub fn parse_env_list(stdout: &str) -> Vec<EnvName> {
    stdout
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(EnvName::from)
        .collect()
}
