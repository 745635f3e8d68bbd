//! Client side of the backend rendering API.

use common::error::RenderError;
use common::model::document::DocumentDescription;
use common::render::{DocumentRenderer, RenderPurpose};
use gloo_net::http::Request;
use std::future::Future;

/// Renders certificates by posting their description to the backend.
#[derive(Clone, Debug, Default)]
pub struct HttpRenderer;

impl DocumentRenderer for HttpRenderer {
    fn render(
        &self,
        document: &DocumentDescription,
        purpose: RenderPurpose,
    ) -> impl Future<Output = Result<Vec<u8>, RenderError>> {
        let document = document.clone();
        async move {
            let response = Request::post(purpose.endpoint())
                .json(&document)
                .map_err(|e| RenderError::new(e.to_string()))?
                .send()
                .await
                .map_err(|e| RenderError::new(e.to_string()))?;

            if !response.ok() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(RenderError::new(format!("{} {}", status, body)));
            }
            response
                .binary()
                .await
                .map_err(|e| RenderError::new(e.to_string()))
        }
    }
}
