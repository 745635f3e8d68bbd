use common::error::RenderError;
use common::model::field::{Field, FileField};
use common::model::template::Template;
use common::preview::GenerationToken;
use common::render::PreviewOutcome;

#[derive(Clone)]
pub enum Msg {
    UpdateField(Field, String),
    FileSelected(FileField, Option<web_sys::File>),
    SelectTemplate(Template),
    /// The debounce window of a preview generation ended.
    DebounceElapsed(GenerationToken),
    PreviewRendered(PreviewOutcome),
    Download,
    DownloadRendered(Result<Vec<u8>, RenderError>),
}
