use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// String value, either owning its buffer or borrowing another one.
///
/// Both representations expose the same read-only interface, and comparison
/// only looks at the contents. A borrowed view cannot outlive the buffer it
/// points into.
#[derive(Debug, Clone)]
pub enum Str<'a> {
    Owned(String),
    Borrowed(&'a str),
}

impl<'a> Str<'a> {
    pub fn as_str(&self) -> &str {
        match self {
            Str::Owned(s) => s.as_str(),
            Str::Borrowed(s) => s,
        }
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Str::Owned(_))
    }

    /// Byte at `index`.
    ///
    /// # Panics
    /// When `index` is out of bounds.
    pub fn byte_at(&self, index: usize) -> u8 {
        let bytes = self.as_str().as_bytes();
        assert!(
            index < bytes.len(),
            "string index {} out of bounds for length {}",
            index,
            bytes.len()
        );
        bytes[index]
    }

    /// Concatenate two strings into a freshly allocated owned buffer.
    pub fn concat(&self, other: &Str<'_>) -> Str<'static> {
        let mut buffer = String::with_capacity(self.len() + other.len());
        buffer.push_str(self.as_str());
        buffer.push_str(other.as_str());
        Str::Owned(buffer)
    }

    /// Detach from the borrowed buffer by copying it if necessary.
    pub fn into_owned(self) -> Str<'static> {
        match self {
            Str::Owned(s) => Str::Owned(s),
            Str::Borrowed(s) => Str::Owned(s.to_string()),
        }
    }
}

impl PartialEq for Str<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Str<'_> {}

impl PartialEq<str> for Str<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Str<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for Str<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Str<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Str<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl AsRef<str> for Str<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<'a> From<&'a str> for Str<'a> {
    fn from(s: &'a str) -> Self {
        Str::Borrowed(s)
    }
}

impl From<String> for Str<'static> {
    fn from(s: String) -> Self {
        Str::Owned(s)
    }
}

impl fmt::Display for Str<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
