//! # Certificate Rendering Service
//!
//! HTTP endpoints that turn a `DocumentDescription` (title plus body paragraphs,
//! composed by the form) into a PDF. Both routes produce identical bytes; they
//! differ only in how the browser is told to treat the response.
//!
//! ## Sub-modules:
//! - `pdf`: genpdf layout of the certificate and the `GenPdfRenderer`.

pub mod pdf;

use actix_web::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::web::{post, scope, Data, Json};
use actix_web::{HttpResponse, Scope};
use common::model::document::{DocumentDescription, DOWNLOAD_FILE_NAME};
use common::render::{DocumentRenderer, RenderPurpose};
use log::{info, warn};
use pdf::GenPdfRenderer;

/// The base path for all certificate endpoints.
const API_PATH: &str = "/api/certificates";

/// Configures and returns the Actix `Scope` for the certificate routes.
///
/// # Registered Routes:
///
/// *   **`POST /preview`**: renders the posted description for inline display
///     (`Content-Disposition: inline`).
/// *   **`POST /download`**: renders the posted description as an attachment named
///     `certificate.pdf`.
///
/// Both answer `400 Bad Request` for a description without title or paragraphs and
/// `503 Service Unavailable` when rendering fails.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/preview", post().to(preview))
        .route("/download", post().to(download))
}

async fn preview(renderer: Data<GenPdfRenderer>, payload: Json<DocumentDescription>) -> HttpResponse {
    respond(renderer.get_ref(), payload.into_inner(), RenderPurpose::Preview).await
}

async fn download(renderer: Data<GenPdfRenderer>, payload: Json<DocumentDescription>) -> HttpResponse {
    respond(renderer.get_ref(), payload.into_inner(), RenderPurpose::Download).await
}

/// `Content-Disposition` value for a rendition.
fn content_disposition(purpose: RenderPurpose) -> String {
    let disposition = match purpose {
        RenderPurpose::Preview => "inline",
        RenderPurpose::Download => "attachment",
    };
    format!("{}; filename=\"{}\"", disposition, DOWNLOAD_FILE_NAME)
}

async fn respond<R: DocumentRenderer>(
    renderer: &R,
    description: DocumentDescription,
    purpose: RenderPurpose,
) -> HttpResponse {
    if !description.is_renderable() {
        warn!("rejected {:?} request without title or paragraphs", purpose);
        return HttpResponse::BadRequest().body("A certificate needs a title and at least one paragraph");
    }

    match renderer.render(&description, purpose).await {
        Ok(bytes) => {
            info!("rendered {} ({} bytes) for {:?}", description.title, bytes.len(), purpose);
            HttpResponse::Ok()
                .insert_header((CONTENT_TYPE, "application/pdf"))
                .insert_header((CONTENT_DISPOSITION, content_disposition(purpose)))
                .body(bytes)
        }
        Err(e) => {
            warn!("{}", e);
            HttpResponse::ServiceUnavailable().body(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::error::RenderError;
    use std::future::Future;

    struct FixedRenderer(Result<Vec<u8>, RenderError>);

    impl DocumentRenderer for FixedRenderer {
        fn render(
            &self,
            _document: &DocumentDescription,
            _purpose: RenderPurpose,
        ) -> impl Future<Output = Result<Vec<u8>, RenderError>> {
            let result = self.0.clone();
            async move { result }
        }
    }

    fn certificate() -> DocumentDescription {
        DocumentDescription {
            title: "COURSE CERTIFICATE".into(),
            paragraphs: vec!["This is to certify that Jane Doe ...".into()],
        }
    }

    fn unavailable_fonts() -> Data<GenPdfRenderer> {
        Data::new(GenPdfRenderer::new("/nonexistent/certgen-fonts", false))
    }

    #[::core::prelude::v1::test]
    fn disposition_names_the_certificate_file() {
        assert_eq!(
            content_disposition(RenderPurpose::Preview),
            "inline; filename=\"certificate.pdf\""
        );
        assert_eq!(
            content_disposition(RenderPurpose::Download),
            "attachment; filename=\"certificate.pdf\""
        );
    }

    #[actix_web::test]
    async fn successful_render_is_served_as_pdf() {
        let renderer = FixedRenderer(Ok(b"%PDF-1.4".to_vec()));
        let resp = respond(&renderer, certificate(), RenderPurpose::Download).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap(), "application/pdf");
        assert_eq!(
            resp.headers().get(CONTENT_DISPOSITION).unwrap().to_str().unwrap(),
            "attachment; filename=\"certificate.pdf\""
        );
    }

    #[actix_web::test]
    async fn render_failure_maps_to_service_unavailable() {
        let renderer = FixedRenderer(Err(RenderError::new("out of memory")));
        let resp = respond(&renderer, certificate(), RenderPurpose::Preview).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn empty_description_is_rejected() {
        let app = test::init_service(App::new().app_data(unavailable_fonts()).service(configure_routes())).await;
        let req = test::TestRequest::post()
            .uri("/api/certificates/preview")
            .set_json(DocumentDescription::default())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_json_is_rejected() {
        let app = test::init_service(App::new().app_data(unavailable_fonts()).service(configure_routes())).await;
        let req = test::TestRequest::post()
            .uri("/api/certificates/download")
            .insert_header((CONTENT_TYPE, "application/json"))
            .set_payload("{\"title\": 42")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_fonts_yield_service_unavailable() {
        let app = test::init_service(App::new().app_data(unavailable_fonts()).service(configure_routes())).await;
        let req = test::TestRequest::post()
            .uri("/api/certificates/download")
            .set_json(certificate())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("no usable font family"));
    }
}
