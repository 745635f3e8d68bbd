//! The form controller: owns the certificate request being edited, the
//! instructions text, the live preview and the download status.
//!
//! The controller is UI-free. A front end feeds it input events, asks it for a
//! `PreviewJob` after every change, renders the job however it likes and hands the
//! outcome back through `finish_preview`.

use crate::compose::{compose_document, DEFAULT_STUDY_INSTRUCTIONS};
use crate::error::{FormError, RenderError};
use crate::model::certificate::{Attachment, CertificateRequest};
use crate::model::document::DocumentDescription;
use crate::model::field::{Field, FileField};
use crate::model::template::Template;
use crate::preview::{PreviewSlot, PreviewStatus, Publish, Release};
use crate::render::{PreviewJob, PreviewOutcome};
use crate::validation;
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadStatus {
    #[default]
    Idle,
    /// The download rendition is being produced.
    Preparing,
    /// The last requested download was handed to the browser.
    Ready,
    Failed(String),
}

/// How `finish_preview` dealt with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewApplied {
    Published,
    /// The outcome belonged to an older generation and was dropped.
    Stale,
    /// The latest generation failed; the previous preview is kept.
    Failed,
}

pub struct FormController<H: Release> {
    request: CertificateRequest,
    instructions: String,
    preview: PreviewSlot<H>,
    download: DownloadStatus,
}

impl<H: Release> Default for FormController<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Release> FormController<H> {
    pub fn new() -> Self {
        Self::with_instructions(DEFAULT_STUDY_INSTRUCTIONS)
    }

    pub fn with_instructions(instructions: impl Into<String>) -> Self {
        Self {
            request: CertificateRequest::default(),
            instructions: instructions.into(),
            preview: PreviewSlot::new(),
            download: DownloadStatus::Idle,
        }
    }

    pub fn request(&self) -> &CertificateRequest {
        &self.request
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn selected_template(&self) -> &Template {
        &self.request.selected_template
    }

    /// Sets one text field. No validation happens here.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        let changed = self.request.set(field, value);
        if changed {
            self.model_changed();
        }
        changed
    }

    /// Same as `update_field`, addressing the field by its input name.
    pub fn update_field_named(&mut self, name: &str, value: impl Into<String>) -> Result<bool, FormError> {
        let field: Field = name.parse()?;
        Ok(self.update_field(field, value))
    }

    /// Attaches (or with `None`, detaches) a file. The file's content is not inspected.
    pub fn update_file(&mut self, field: FileField, attachment: Option<Attachment>) {
        self.request.set_attachment(field, attachment);
        self.model_changed();
    }

    pub fn update_file_named(&mut self, name: &str, attachment: Option<Attachment>) -> Result<(), FormError> {
        let field: FileField = name.parse()?;
        self.update_file(field, attachment);
        Ok(())
    }

    /// Switches the active template. Fields of other templates are kept.
    pub fn select_template(&mut self, template: Template) -> bool {
        if self.request.selected_template == template {
            return false;
        }
        if !template.is_recognized() {
            warn!("unrecognized certificate template `{}`", template);
        }
        self.request.selected_template = template;
        self.model_changed();
        true
    }

    pub fn select_template_named(&mut self, name: &str) -> bool {
        self.select_template(Template::from(name))
    }

    /// Replaces the note printed on study certificates.
    pub fn set_instructions(&mut self, instructions: impl Into<String>) -> bool {
        let instructions = instructions.into();
        if self.instructions == instructions {
            return false;
        }
        self.instructions = instructions;
        self.model_changed();
        true
    }

    pub fn is_valid(&self) -> bool {
        validation::is_valid(&self.request)
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        validation::missing_fields(&self.request)
    }

    pub fn document(&self) -> DocumentDescription {
        compose_document(&self.request, &self.instructions)
    }

    /// Opens a new preview generation for the current model.
    ///
    /// Returns `None` while the form is invalid. The displayed preview stays, and
    /// a generation still in flight is closed so its result is never published.
    pub fn regenerate_preview(&mut self) -> Option<PreviewJob> {
        if !self.is_valid() {
            self.preview.cancel();
            return None;
        }
        let token = self.preview.begin();
        debug!("preview generation {} opened", token.value());
        Some(PreviewJob {
            token,
            document: self.document(),
        })
    }

    /// Applies a rendered preview.
    ///
    /// `to_handle` wraps the bytes into a displayable handle and is only called for
    /// the latest generation; a failure to wrap counts as a render failure.
    pub fn finish_preview<F>(&mut self, outcome: PreviewOutcome, to_handle: F) -> PreviewApplied
    where
        F: FnOnce(Vec<u8>) -> Result<H, RenderError>,
    {
        let PreviewOutcome { token, result } = outcome;
        if !self.preview.is_current(token) {
            debug!("preview generation {} superseded", token.value());
            return PreviewApplied::Stale;
        }
        match result.and_then(to_handle) {
            Ok(handle) => match self.preview.publish(token, handle) {
                Publish::Published => PreviewApplied::Published,
                Publish::Stale => PreviewApplied::Stale,
            },
            Err(err) => {
                warn!("keeping previous preview: {}", err);
                self.preview.fail(token, err.message());
                PreviewApplied::Failed
            }
        }
    }

    pub fn preview(&self) -> Option<&H> {
        self.preview.current()
    }

    pub fn preview_status(&self) -> &PreviewStatus {
        self.preview.status()
    }

    /// Starts a download. Returns the document to render, or `None` while the form
    /// is invalid or another download is still being prepared.
    pub fn request_download(&mut self) -> Option<DocumentDescription> {
        if !self.is_valid() || self.download == DownloadStatus::Preparing {
            return None;
        }
        self.download = DownloadStatus::Preparing;
        Some(self.document())
    }

    pub fn finish_download(&mut self, result: Result<(), RenderError>) {
        self.download = match result {
            Ok(()) => DownloadStatus::Ready,
            Err(err) => {
                warn!("download failed: {}", err);
                DownloadStatus::Failed(err.message().to_string())
            }
        };
    }

    pub fn download_status(&self) -> &DownloadStatus {
        &self.download
    }

    pub fn is_preparing_download(&self) -> bool {
        self.download == DownloadStatus::Preparing
    }

    fn model_changed(&mut self) {
        // A finished download described the previous model.
        if matches!(self.download, DownloadStatus::Ready | DownloadStatus::Failed(_)) {
            self.download = DownloadStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::testing::{tracker, TrackedHandle};
    use crate::render::{render_preview, DocumentRenderer, RenderPurpose};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    type Controller = FormController<TrackedHandle>;

    fn valid_course(controller: &mut Controller) {
        controller.update_field(Field::StudentName, "Jane Doe");
        controller.update_field(Field::RollNumber, "R1");
        controller.update_field(Field::RegistrationNumber, "G1");
        controller.select_template(Template::Course);
        controller.update_field(Field::CourseName, "Algorithms");
    }

    fn ok(token: crate::preview::GenerationToken, bytes: &[u8]) -> PreviewOutcome {
        PreviewOutcome {
            token,
            result: Ok(bytes.to_vec()),
        }
    }

    #[test]
    fn switching_templates_keeps_other_fields() {
        let mut controller = Controller::new();
        controller.select_template(Template::Research);
        controller.update_field(Field::ResearchTopic, "Topology");
        controller.update_field(Field::ResearchDomain, "Mathematics");
        controller.update_field(Field::ResearchDescription, "Knots");

        controller.select_template(Template::Course);
        controller.select_template(Template::Research);

        let request = controller.request();
        assert_eq!(request.research_topic, "Topology");
        assert_eq!(request.research_domain, "Mathematics");
        assert_eq!(request.research_description, "Knots");
    }

    #[test]
    fn named_updates_reject_unknown_inputs() {
        let mut controller = Controller::new();
        assert_eq!(controller.update_field_named("studentName", "Jane"), Ok(true));
        assert_eq!(controller.request().student_name, "Jane");
        assert!(controller.update_field_named("nickname", "JD").is_err());

        let attachment = Attachment {
            name: "report.docx".into(),
            size: 42,
            mime_type: String::new(),
        };
        assert!(controller.update_file_named("projectReport", Some(attachment.clone())).is_ok());
        assert_eq!(controller.request().project_report, Some(attachment));
        assert!(controller.update_file_named("projectSlides", None).is_err());
    }

    #[test]
    fn attachments_do_not_affect_validity() {
        let mut controller = Controller::new();
        valid_course(&mut controller);
        controller.update_file(FileField::ProjectPpt, None);
        assert!(controller.is_valid());
    }

    #[test]
    fn unknown_template_name_makes_form_invalid() {
        let mut controller = Controller::new();
        valid_course(&mut controller);
        assert!(controller.is_valid());

        controller.select_template_named("diploma");
        assert!(!controller.is_valid());
        assert!(controller.regenerate_preview().is_none());
        assert!(controller.request_download().is_none());

        controller.select_template_named("course");
        assert!(controller.is_valid());
    }

    #[test]
    fn invalid_form_opens_no_generation() {
        let mut controller = Controller::new();
        controller.update_field(Field::StudentName, "Jane Doe");
        assert!(controller.regenerate_preview().is_none());
        assert_eq!(controller.preview_status(), &PreviewStatus::Idle);
        assert!(controller.preview().is_none());
    }

    #[test]
    fn invalidating_the_form_closes_the_open_generation() {
        let (released, handle) = tracker();
        let mut controller = Controller::new();
        valid_course(&mut controller);
        let shown = controller.regenerate_preview().unwrap();
        controller.finish_preview(ok(shown.token, b"shown"), |_| Ok(handle("shown")));

        let in_flight = controller.regenerate_preview().unwrap();
        controller.update_field(Field::StudentName, "");
        assert!(controller.regenerate_preview().is_none());
        assert_eq!(controller.preview_status(), &PreviewStatus::Ready);

        let applied = controller.finish_preview(ok(in_flight.token, b"late"), |_| Ok(handle("late")));
        assert_eq!(applied, PreviewApplied::Stale);
        assert_eq!(controller.preview().map(|h| h.id), Some("shown"));
        assert!(released.borrow().is_empty());
    }

    #[test]
    fn invalidating_before_first_preview_leaves_nothing_rendering() {
        let mut controller = Controller::new();
        valid_course(&mut controller);
        let pending = controller.regenerate_preview().unwrap();
        controller.update_field(Field::CourseName, "");
        assert!(controller.regenerate_preview().is_none());

        assert_eq!(controller.preview_status(), &PreviewStatus::Idle);
        let applied = controller.finish_preview(ok(pending.token, b"late"), |_| {
            panic!("stale results are never wrapped")
        });
        assert_eq!(applied, PreviewApplied::Stale);
        assert!(controller.preview().is_none());
    }

    #[test]
    fn attachments_do_not_change_the_document() {
        let mut controller = Controller::new();
        valid_course(&mut controller);
        let before = controller.document();
        controller.update_file(
            FileField::ProjectReport,
            Some(Attachment {
                name: "report.pdf".into(),
                size: 1024,
                mime_type: "application/pdf".into(),
            }),
        );
        assert_eq!(controller.document(), before);
    }

    #[test]
    fn study_preview_carries_current_instructions() {
        let mut controller = Controller::with_instructions("Bring your ID.");
        controller.update_field(Field::StudentName, "Jane Doe");
        controller.update_field(Field::RollNumber, "R1");
        controller.update_field(Field::RegistrationNumber, "G1");
        controller.select_template(Template::Study);
        controller.update_field(Field::StudyProgram, "Physics");

        let job = controller.regenerate_preview().unwrap();
        assert_eq!(job.document.paragraphs[1], "Note: Bring your ID.");

        assert!(controller.set_instructions("Keep this safe."));
        let job = controller.regenerate_preview().unwrap();
        assert_eq!(job.document.paragraphs[1], "Note: Keep this safe.");
    }

    #[test]
    fn out_of_order_results_publish_latest_only() {
        let (released, handle) = tracker();
        let mut controller = Controller::new();
        valid_course(&mut controller);

        let a = controller.regenerate_preview().unwrap();
        controller.update_field(Field::CourseName, "Compilers");
        let b = controller.regenerate_preview().unwrap();

        let applied = controller.finish_preview(ok(b.token, b"B"), |_| Ok(handle("b")));
        assert_eq!(applied, PreviewApplied::Published);

        let mut wrapped_stale = false;
        let applied = controller.finish_preview(ok(a.token, b"A"), |_| {
            wrapped_stale = true;
            Ok(handle("a"))
        });
        assert_eq!(applied, PreviewApplied::Stale);
        assert!(!wrapped_stale);
        assert_eq!(controller.preview().map(|h| h.id), Some("b"));
        assert!(released.borrow().is_empty());
    }

    #[test]
    fn successive_previews_release_each_predecessor_once() {
        let (released, handle) = tracker();
        let mut controller = Controller::new();
        valid_course(&mut controller);

        for (id, course) in [("one", "A"), ("two", "B"), ("three", "C")] {
            controller.update_field(Field::CourseName, course);
            let job = controller.regenerate_preview().unwrap();
            controller.finish_preview(ok(job.token, b"%PDF"), |_| Ok(handle(id)));
        }
        assert_eq!(*released.borrow(), vec!["one", "two"]);

        drop(controller);
        assert_eq!(*released.borrow(), vec!["one", "two", "three"]);
    }

    #[test]
    fn render_failure_is_recoverable() {
        let (released, handle) = tracker();
        let mut controller = Controller::new();
        valid_course(&mut controller);

        let first = controller.regenerate_preview().unwrap();
        controller.finish_preview(ok(first.token, b"%PDF"), |_| Ok(handle("first")));

        controller.update_field(Field::CourseName, "Compilers");
        let second = controller.regenerate_preview().unwrap();
        let applied = controller.finish_preview(
            PreviewOutcome {
                token: second.token,
                result: Err(RenderError::new("font cache exhausted")),
            },
            |_| Ok(handle("never")),
        );
        assert_eq!(applied, PreviewApplied::Failed);
        assert_eq!(controller.preview().map(|h| h.id), Some("first"));
        assert_eq!(
            controller.preview_status(),
            &PreviewStatus::Failed("font cache exhausted".to_string())
        );
        assert!(released.borrow().is_empty());

        // The next change simply tries again.
        controller.update_field(Field::CourseName, "Databases");
        let third = controller.regenerate_preview().unwrap();
        controller.finish_preview(ok(third.token, b"%PDF"), |_| Ok(handle("third")));
        assert_eq!(controller.preview_status(), &PreviewStatus::Ready);
        assert_eq!(*released.borrow(), vec!["first"]);
    }

    #[test]
    fn handle_creation_failure_counts_as_render_failure() {
        let mut controller = Controller::new();
        valid_course(&mut controller);
        let job = controller.regenerate_preview().unwrap();
        let applied = controller.finish_preview(ok(job.token, b"%PDF"), |_| {
            Err(RenderError::new("blob rejected"))
        });
        assert_eq!(applied, PreviewApplied::Failed);
        assert!(controller.preview().is_none());
    }

    #[test]
    fn download_lifecycle() {
        let mut controller = Controller::new();
        assert!(controller.request_download().is_none());

        valid_course(&mut controller);
        let document = controller.request_download().unwrap();
        assert_eq!(document.title, "COURSE CERTIFICATE");
        assert!(controller.is_preparing_download());
        assert!(controller.request_download().is_none());

        controller.finish_download(Ok(()));
        assert_eq!(controller.download_status(), &DownloadStatus::Ready);

        controller.update_field(Field::CourseName, "Compilers");
        assert_eq!(controller.download_status(), &DownloadStatus::Idle);

        controller.request_download();
        controller.finish_download(Err(RenderError::new("offline")));
        assert_eq!(
            controller.download_status(),
            &DownloadStatus::Failed("offline".to_string())
        );
    }

    /// Renderer whose calls complete only when the test opens their gate.
    struct GatedRenderer {
        gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
    }

    impl DocumentRenderer for GatedRenderer {
        fn render(
            &self,
            document: &DocumentDescription,
            _purpose: RenderPurpose,
        ) -> impl std::future::Future<Output = Result<Vec<u8>, RenderError>> {
            let sentence = document.paragraphs[0].clone();
            let gate = self.gates.borrow_mut().remove(&sentence);
            async move {
                match gate {
                    Some(gate) => {
                        gate.await.map_err(|_| RenderError::new("gate dropped"))?;
                        Ok(sentence.into_bytes())
                    }
                    None => Err(RenderError::new("no gate")),
                }
            }
        }
    }

    #[tokio::test]
    async fn slower_earlier_render_never_replaces_newer_one() {
        let (released, handle) = tracker();
        let mut controller = Controller::new();
        valid_course(&mut controller);

        let a = controller.regenerate_preview().unwrap();
        controller.update_field(Field::CourseName, "Compilers");
        let b = controller.regenerate_preview().unwrap();

        let (open_a, gate_a) = oneshot::channel();
        let (open_b, gate_b) = oneshot::channel();
        let renderer = GatedRenderer {
            gates: RefCell::new(HashMap::from([
                (a.document.paragraphs[0].clone(), gate_a),
                (b.document.paragraphs[0].clone(), gate_b),
            ])),
        };

        let completed = RefCell::new(Vec::new());
        tokio::join!(
            async {
                let outcome = render_preview(&renderer, a).await;
                completed.borrow_mut().push(outcome);
            },
            async {
                let outcome = render_preview(&renderer, b).await;
                completed.borrow_mut().push(outcome);
            },
            async {
                open_b.send(()).unwrap();
                while completed.borrow().is_empty() {
                    tokio::task::yield_now().await;
                }
                open_a.send(()).unwrap();
            },
        );

        let completed = completed.into_inner();
        assert_eq!(completed.len(), 2);
        // B finished first.
        assert!(String::from_utf8_lossy(completed[0].result.as_ref().unwrap()).contains("Compilers"));

        let mut published = Vec::new();
        for outcome in completed {
            let applied = controller.finish_preview(outcome, |bytes| {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                Ok(handle(if text.contains("Compilers") { "b" } else { "a" }))
            });
            published.push(applied);
        }

        assert_eq!(published, vec![PreviewApplied::Published, PreviewApplied::Stale]);
        assert_eq!(controller.preview().map(|h| h.id), Some("b"));
        assert!(released.borrow().is_empty());
    }
}
