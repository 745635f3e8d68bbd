use serde::{Deserialize, Serialize};

/// The description of a certificate handed to the PDF renderer: a title and the
/// body paragraphs, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescription {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl DocumentDescription {
    /// A description the renderer can lay out: a title and at least one paragraph.
    pub fn is_renderable(&self) -> bool {
        !self.title.trim().is_empty() && !self.paragraphs.is_empty()
    }
}

/// File name used when the certificate is saved.
pub const DOWNLOAD_FILE_NAME: &str = "certificate.pdf";
