/// Username as chess.com compares them: case does not matter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaseInsensitiveString(String);

impl From<&str> for CaseInsensitiveString {
    fn from(s: &str) -> Self {
        Self(s.to_lowercase())
    }
}

impl From<&String> for CaseInsensitiveString {
    fn from(s: &String) -> Self {
        Self(s.to_lowercase())
    }
}

impl PartialEq<str> for CaseInsensitiveString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.to_lowercase()
    }
}

impl PartialEq<String> for CaseInsensitiveString {
    fn eq(&self, other: &String) -> bool {
        *self == *other.as_str()
    }
}
