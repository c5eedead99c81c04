//! Source descriptors handed to the merge engine.

/// One raw question-bank file.
#[derive(Clone)]
pub struct SourceFile {
    /// Stable identifier; prefixes every question id from this source.
    pub id: String,
    /// Name shown to users and stored as each question's source file.
    pub display_name: String,
    /// Raw database bytes.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}
