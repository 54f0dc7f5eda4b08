use std::fmt;

/// Messages must be strictly longer than this many characters.
pub const MIN_MESSAGE_CHARS: usize = 10;
/// Messages may be at most this many characters.
pub const MAX_MESSAGE_CHARS: usize = 200;
pub const MAX_BATCH_LEN: usize = 3;

/// A single validated outreach message: `10 < chars <= 200`.
///
/// Only constructible through [`CandidateMessage::new`], so every value in a
/// [`MessageBatch`] satisfies the length bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMessage(String);

impl CandidateMessage {
    /// Trim `line` and accept it if its character count is in bounds.
    pub fn new(line: &str) -> Option<Self> {
        let line = line.trim();
        let chars = line.chars().count();
        (chars > MIN_MESSAGE_CHARS && chars <= MAX_MESSAGE_CHARS).then(|| Self(line.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in Unicode scalar values, the unit the bounds are expressed in.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CandidateMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Up to three messages in backend order. Never padded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBatch(Vec<CandidateMessage>);

impl MessageBatch {
    /// Split a raw backend reply into lines, drop blank and out-of-bounds
    /// lines, keep the first three. Fewer than three is not an error.
    pub fn from_response(raw: &str) -> Self {
        Self(
            raw.lines()
                .filter_map(CandidateMessage::new)
                .take(MAX_BATCH_LEN)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateMessage> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[CandidateMessage] {
        &self.0
    }

    pub fn into_strings(self) -> Vec<String> {
        self.0.into_iter().map(CandidateMessage::into_inner).collect()
    }
}

impl<'a> IntoIterator for &'a MessageBatch {
    type Item = &'a CandidateMessage;
    type IntoIter = std::slice::Iter<'a, CandidateMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
