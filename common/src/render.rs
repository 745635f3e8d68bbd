//! Boundary to the PDF renderer.
//!
//! The renderer turns a `DocumentDescription` into PDF bytes. Jobs are rendered
//! without borrowing the controller, so several previews can be in flight while
//! the form keeps changing; `FormController::finish_preview` sorts out which
//! result is still wanted.

use crate::error::RenderError;
use crate::model::document::DocumentDescription;
use crate::preview::GenerationToken;
use log::warn;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Why a rendition is requested. Both produce the same bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPurpose {
    Preview,
    Download,
}

impl RenderPurpose {
    /// Backend route that produces this rendition.
    pub fn endpoint(self) -> &'static str {
        match self {
            RenderPurpose::Preview => "/api/certificates/preview",
            RenderPurpose::Download => "/api/certificates/download",
        }
    }
}

pub trait DocumentRenderer {
    fn render(
        &self,
        document: &DocumentDescription,
        purpose: RenderPurpose,
    ) -> impl Future<Output = Result<Vec<u8>, RenderError>>;
}

/// A preview generation waiting to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewJob {
    pub token: GenerationToken,
    pub document: DocumentDescription,
}

/// The result of rendering a `PreviewJob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOutcome {
    pub token: GenerationToken,
    pub result: Result<Vec<u8>, RenderError>,
}

/// Renders one preview job. Never fails itself: a renderer error is carried in the outcome.
pub async fn render_preview<R: DocumentRenderer>(renderer: &R, job: PreviewJob) -> PreviewOutcome {
    let result = renderer.render(&job.document, RenderPurpose::Preview).await;
    if let Err(err) = &result {
        warn!("preview {} failed: {}", job.token.value(), err);
    }
    PreviewOutcome {
        token: job.token,
        result,
    }
}
