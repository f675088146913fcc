use serde::{Deserialize, Serialize};

/// Extensions recognized as chat/narrative transcripts.
const CHAT_EXTENSIONS: &[&str] = &["md", "txt"];

/// Extensions recognized as session code artifacts.
const CODE_EXTENSIONS: &[&str] = &["js", "ts"];

/// MIME types the upload boundary accepts. This list validates acceptance
/// independently of the extension allow-lists and never overrides the
/// extension-derived category.
const ACCEPTED_MIME_TYPES: &[&str] = &[
    "text/markdown",
    "text/plain",
    "text/javascript",
    "application/javascript",
    "application/typescript",
];

/// An uploaded file considered for one generation request.
///
/// Request-scoped: built from the inbound payload, consulted during
/// selection, and discarded when the request completes.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub content: String,
}

impl CandidateFile {
    pub fn category(&self) -> FileCategory {
        categorize(&self.name)
    }
}

/// Category derived from a file's extension. Never changes once derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Chat,
    Code,
    Unrecognized,
}

/// Lower-cased suffix after the last `.` in a file name.
///
/// Names without a dot, names ending in a dot, and dotfiles like
/// `.bashrc` all yield an empty string, which no allow-list matches.
pub fn file_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// Derive a [`FileCategory`] from a file name via the extension allow-lists.
pub fn categorize(name: &str) -> FileCategory {
    let ext = file_extension(name);
    if CHAT_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Chat
    } else if CODE_EXTENSIONS.contains(&ext.as_str()) {
        FileCategory::Code
    } else {
        FileCategory::Unrecognized
    }
}

/// The chat transcript and code artifact chosen for one request.
#[derive(Debug, Clone)]
pub struct SelectedSources<'a> {
    pub chat: Option<&'a CandidateFile>,
    pub code: Option<&'a CandidateFile>,
}

impl SelectedSources<'_> {
    /// Both a chat document and a code document were found. Generation
    /// must not proceed unless this holds.
    pub fn has_required_files(&self) -> bool {
        self.chat.is_some() && self.code.is_some()
    }
}

/// Select the chat and code documents from a candidate set.
///
/// Each category is picked independently: the first file in
/// caller-supplied order whose category matches wins. Unrecognized files
/// are skipped entirely.
pub fn select_sources(files: &[CandidateFile]) -> SelectedSources<'_> {
    SelectedSources {
        chat: files.iter().find(|f| f.category() == FileCategory::Chat),
        code: files.iter().find(|f| f.category() == FileCategory::Code),
    }
}

/// Whether the upload boundary should accept a file at all.
///
/// A file passes on a recognized extension or on a declared MIME type
/// from the accept list; the MIME check is a secondary gate and does not
/// affect which category the file lands in during selection.
pub fn is_accepted_upload(name: &str, mime: Option<&str>) -> bool {
    categorize(name) != FileCategory::Unrecognized
        || mime.is_some_and(|m| ACCEPTED_MIME_TYPES.contains(&m))
}
