//! Browser utilities for the certificate form.
//!
//! - **Blob URLs**: wrapping rendered PDF bytes into an object URL the preview
//!   `<iframe>` can show, and revoking it when it is replaced.
//! - **Saving**: handing a rendered certificate to the browser as a file download.
//! - **Attachments**: reading picker metadata into the shared model.
//! - **User Feedback**: temporary toast notifications.

use common::error::RenderError;
use common::model::certificate::Attachment;
use common::preview::Release;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, HtmlElement, Url};

const PDF_MIME: &str = "application/pdf";

/// An object URL pointing at an in-memory PDF.
///
/// Not `Clone`: each URL is revoked exactly once, through `Release`.
#[derive(Debug, PartialEq)]
pub struct BlobUrl(String);

impl BlobUrl {
    pub fn from_pdf_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&array);
        let options = BlobPropertyBag::new();
        options.set_type(PDF_MIME);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
        Url::create_object_url_with_blob(&blob)
            .map(BlobUrl)
            .map_err(js_error)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Release for BlobUrl {
    fn release(self) {
        Url::revoke_object_url(&self.0).ok();
    }
}

fn js_error(value: JsValue) -> RenderError {
    RenderError::new(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// Offers `bytes` to the user as a download named `file_name`.
///
/// The object URL is revoked a moment after the click so the browser can start
/// reading it first.
pub fn save_pdf(bytes: &[u8], file_name: &str) -> Result<(), RenderError> {
    let url = BlobUrl::from_pdf_bytes(bytes)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RenderError::new("no document available"))?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .unchecked_into();
    anchor.set_href(url.as_str());
    anchor.set_download(file_name);
    anchor.click();

    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1_000).await;
        url.release();
    });
    Ok(())
}

/// Metadata of a file chosen in an attachment picker. The content is not read.
pub fn attachment_from(file: web_sys::File) -> Attachment {
    let file = gloo_file::File::from(file);
    Attachment {
        name: file.name(),
        size: file.size(),
        mime_type: file.raw_mime_type(),
    }
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
