//! Update function for the certificate form component.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`, mutates the
//! state and returns whether the view should re-render.
//!
//! Key behaviors
//! - Every change to the printed text opens a preview generation in the controller. The render
//!   request is sent only once the generation survives `PREVIEW_DEBOUNCE_MS`
//!   without being superseded.
//! - Rendered previews go back through the controller, which publishes only the
//!   newest generation and revokes the URL it replaces.
//! - Downloads render on demand and are saved as `certificate.pdf`.

use common::controller::PreviewApplied;
use common::model::document::DOWNLOAD_FILE_NAME;
use common::render::{render_preview, DocumentRenderer, RenderPurpose};
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{attachment_from, save_pdf, show_toast, BlobUrl};
use super::messages::Msg;
use super::state::CertificateFormComponent;

/// Quiet period after the last change before a preview is requested.
const PREVIEW_DEBOUNCE_MS: u32 = 300;

pub fn update(
    component: &mut CertificateFormComponent,
    ctx: &Context<CertificateFormComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::UpdateField(field, value) => {
            if component.controller.update_field(field, value) {
                schedule_preview(component, ctx);
            }
            true
        }
        // Attachments are not printed, so the preview stays as it is.
        Msg::FileSelected(field, file) => {
            component
                .controller
                .update_file(field, file.map(attachment_from));
            true
        }
        Msg::SelectTemplate(template) => {
            if component.controller.select_template(template) {
                schedule_preview(component, ctx);
            }
            true
        }
        Msg::DebounceElapsed(token) => {
            let due = component
                .pending_preview
                .as_ref()
                .is_some_and(|job| job.token == token);
            if !due {
                return false;
            }
            if let Some(job) = component.pending_preview.take() {
                let renderer = component.renderer.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let outcome = render_preview(&renderer, job).await;
                    link.send_message(Msg::PreviewRendered(outcome));
                });
            }
            false
        }
        Msg::PreviewRendered(outcome) => {
            let token = outcome.token;
            match component
                .controller
                .finish_preview(outcome, |bytes| BlobUrl::from_pdf_bytes(&bytes))
            {
                PreviewApplied::Published => true,
                PreviewApplied::Stale => {
                    gloo_console::debug!(format!("preview {} superseded", token.value()));
                    false
                }
                PreviewApplied::Failed => {
                    show_toast("The preview could not be generated. Keep editing to try again.");
                    true
                }
            }
        }
        Msg::Download => {
            if let Some(document) = component.controller.request_download() {
                let renderer = component.renderer.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = renderer.render(&document, RenderPurpose::Download).await;
                    link.send_message(Msg::DownloadRendered(result));
                });
            }
            true
        }
        Msg::DownloadRendered(result) => {
            let saved = result.and_then(|bytes| save_pdf(&bytes, DOWNLOAD_FILE_NAME));
            if let Err(err) = &saved {
                gloo_console::error!(err.to_string());
                show_toast("The certificate could not be prepared. Please try again.");
            }
            component.controller.finish_download(saved);
            true
        }
    }
}

/// Opens a preview generation for the current model and starts its debounce timer.
///
/// While the form is invalid nothing is scheduled and the last preview stays on screen.
fn schedule_preview(component: &mut CertificateFormComponent, ctx: &Context<CertificateFormComponent>) {
    match component.controller.regenerate_preview() {
        Some(job) => {
            let token = job.token;
            component.pending_preview = Some(job);
            let link = ctx.link().clone();
            spawn_local(async move {
                TimeoutFuture::new(PREVIEW_DEBOUNCE_MS).await;
                link.send_message(Msg::DebounceElapsed(token));
            });
        }
        None => component.pending_preview = None,
    }
}
