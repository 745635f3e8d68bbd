//! Component state for the certificate form.

use common::controller::FormController;
use common::render::PreviewJob;

use super::helpers::BlobUrl;
use crate::renderer::HttpRenderer;

/// Main state container for the `CertificateFormComponent`.
///
/// Fields are `pub` because they are accessed by `view` and `update` modules.
pub struct CertificateFormComponent {
    /// The form model, its validity and the live preview URL.
    /// Dropping the component drops the controller, which revokes that URL.
    pub controller: FormController<BlobUrl>,

    /// The newest preview generation, waiting for its debounce window to end.
    pub pending_preview: Option<PreviewJob>,

    pub renderer: HttpRenderer,
}

impl CertificateFormComponent {
    /// Empty internship request, default study instructions, no preview.
    pub fn new() -> Self {
        Self {
            controller: FormController::new(),
            pending_preview: None,
            renderer: HttpRenderer,
        }
    }

    /// The URL to show in the preview frame, if any preview was rendered.
    pub fn preview_url(&self) -> Option<&str> {
        self.controller.preview().map(BlobUrl::as_str)
    }
}
