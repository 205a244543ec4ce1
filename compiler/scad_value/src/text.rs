//! Shared UTF-8 string with a lazily counted codepoint length.

use std::cell::OnceCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Immutable, reference-shared string.
///
/// Byte length is known up front; the codepoint count is computed on first
/// request and cached in the shared allocation, so every clone benefits.
#[derive(Clone)]
pub struct Utf8String {
    inner: Rc<Utf8Inner>,
}

struct Utf8Inner {
    text: String,
    char_count: OnceCell<usize>,
}

impl Utf8String {
    pub fn new(text: impl Into<String>) -> Self {
        Utf8String {
            inner: Rc::new(Utf8Inner {
                text: text.into(),
                char_count: OnceCell::new(),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.inner.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    /// Length in codepoints, counted once per shared allocation.
    pub fn char_count(&self) -> usize {
        *self
            .inner
            .char_count
            .get_or_init(|| self.inner.text.chars().count())
    }

    /// The codepoint at `index` as its own UTF-8 slice.
    ///
    /// Indexing is by codepoint, never by byte: in `"aßc"` index 1 is `"ß"`.
    pub fn char_at(&self, index: usize) -> Option<&str> {
        if index >= self.char_count() {
            return None;
        }
        let text = self.as_str();
        let (start, ch) = text.char_indices().nth(index)?;
        Some(&text[start..start + ch.len_utf8()])
    }

    /// Each codepoint as a one-character string.
    pub fn chars(&self) -> impl Iterator<Item = Utf8String> + '_ {
        self.as_str().chars().map(|ch| {
            let mut buf = [0u8; 4];
            Utf8String::new(&*ch.encode_utf8(&mut buf))
        })
    }

    /// Whether both handles share one allocation.
    pub fn ptr_eq(&self, other: &Utf8String) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Utf8String {
    fn default() -> Self {
        Utf8String::new(String::new())
    }
}

impl PartialEq for Utf8String {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Utf8String {}

impl PartialOrd for Utf8String {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Utf8String {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl From<&str> for Utf8String {
    fn from(text: &str) -> Self {
        Utf8String::new(text)
    }
}

impl From<String> for Utf8String {
    fn from(text: String) -> Self {
        Utf8String::new(text)
    }
}

impl fmt::Display for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}
