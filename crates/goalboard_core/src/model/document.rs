//! Goals document model.
//!
//! # Responsibility
//! - Represent a goals document as ordered paragraph blocks of text runs.
//! - Provide the default template assigned to new participants.
//!
//! # Invariants
//! - A document always holds at least one block.
//! - A block always holds at least one text run (possibly empty text).
//! - Documents are values: equality is structural over blocks and runs.
//!
//! # See also
//! - `crate::model::participant` for document ownership.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Text of the single paragraph in a freshly created document.
pub const DEFAULT_GOALS_TEXT: &str = "Write your goals here...";

/// Structural kind of one block node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Plain paragraph text.
    Paragraph,
}

/// One plain inline text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    text: String,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Block node holding inline text runs.
///
/// Serialized as `{ "type": "paragraph", "children": [{ "text": ".." }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    #[serde(rename = "type")]
    kind: BlockKind,
    children: Vec<TextRun>,
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    kind: BlockKind,
    #[serde(default)]
    children: Vec<TextRun>,
}

impl From<RawBlock> for Block {
    fn from(value: RawBlock) -> Self {
        Self::new(value.kind, value.children)
    }
}

impl Block {
    /// Creates a block; an empty run list is padded with one empty run.
    pub fn new(kind: BlockKind, children: Vec<TextRun>) -> Self {
        let children = if children.is_empty() {
            vec![TextRun::new("")]
        } else {
            children
        };
        Self { kind, children }
    }

    /// Creates a paragraph holding one text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph, vec![TextRun::new(text)])
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn children(&self) -> &[TextRun] {
        &self.children
    }

    /// Concatenated text of all runs in this block.
    pub fn text(&self) -> String {
        self.children.iter().map(TextRun::text).collect()
    }
}

/// Document validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    /// A document may never lose its last block.
    EmptyDocument,
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "document must contain at least one block"),
        }
    }
}

impl Error for DocumentError {}

/// Goals document value.
///
/// Serialized as a bare block array; deserializing an empty array fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Block>", into = "Vec<Block>")]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    /// Single-paragraph template with [`DEFAULT_GOALS_TEXT`].
    fn default() -> Self {
        Self {
            blocks: vec![Block::paragraph(DEFAULT_GOALS_TEXT)],
        }
    }
}

impl TryFrom<Vec<Block>> for Document {
    type Error = DocumentError;

    fn try_from(value: Vec<Block>) -> Result<Self, Self::Error> {
        Self::from_blocks(value)
    }
}

impl From<Document> for Vec<Block> {
    fn from(value: Document) -> Self {
        value.blocks
    }
}

impl Document {
    /// Builds a document from blocks.
    ///
    /// # Errors
    /// - `DocumentError::EmptyDocument` when `blocks` is empty.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, DocumentError> {
        if blocks.is_empty() {
            return Err(DocumentError::EmptyDocument);
        }
        Ok(Self { blocks })
    }

    /// Builds a document with one paragraph per input line.
    pub fn from_paragraphs<I, S>(paragraphs: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_blocks(paragraphs.into_iter().map(Block::paragraph).collect())
    }

    /// Returns a new document holding `blocks`, leaving `self` untouched.
    ///
    /// No structural validation beyond non-emptiness is performed; empty
    /// text runs are accepted.
    pub fn replace_blocks(&self, blocks: Vec<Block>) -> Result<Self, DocumentError> {
        Self::from_blocks(blocks)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Plain text rendering: one line per block.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
