use common::error::RenderError;
use common::model::document::DocumentDescription;
use common::render::{DocumentRenderer, RenderPurpose};
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, PaperSize, SimplePageDecorator};
use log::{debug, error};
use std::future::Future;
use std::path::{Path, PathBuf};

const PAGE_MARGIN_MM: i32 = 30;
const TITLE_FONT_SIZE: u8 = 24;
const BODY_FONT_SIZE: u8 = 14;
/// Vertical gap between title and body, in lines.
const TITLE_GAP_LINES: f64 = 2.0;

/// Families tried in the configured fonts directory, in order.
const BUNDLED_FAMILIES: [&str; 2] = ["Arial", "LiberationSans"];

const SYSTEM_FONT_DIRS: [&str; 4] = [
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/TTF",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
];
const SYSTEM_FAMILIES: [&str; 3] = ["LiberationSans", "DejaVuSans", "Arial"];

/// Renders certificates with genpdf on the blocking thread pool.
#[derive(Clone, Debug)]
pub struct GenPdfRenderer {
    fonts_dir: PathBuf,
    system_fonts: bool,
}

impl GenPdfRenderer {
    pub fn new(fonts_dir: impl Into<PathBuf>, system_fonts: bool) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            system_fonts,
        }
    }
}

impl DocumentRenderer for GenPdfRenderer {
    fn render(
        &self,
        document: &DocumentDescription,
        purpose: RenderPurpose,
    ) -> impl Future<Output = Result<Vec<u8>, RenderError>> {
        let renderer = self.clone();
        let document = document.clone();
        async move {
            debug!("rendering {:?} for {:?}", document.title, purpose);
            tokio::task::spawn_blocking(move || render_certificate(&document, &renderer))
                .await
                .map_err(|e| RenderError::new(format!("render task aborted: {}", e)))?
                .map_err(RenderError::new)
        }
    }
}

/// Load the font family: the configured directory first, then system directories.
fn load_font(renderer: &GenPdfRenderer) -> Result<FontFamily<FontData>, String> {
    if let Some(family) = BUNDLED_FAMILIES
        .iter()
        .find_map(|name| genpdf::fonts::from_files(&renderer.fonts_dir, name, None).ok())
    {
        return Ok(family);
    }
    if renderer.system_fonts {
        let system = SYSTEM_FONT_DIRS
            .iter()
            .map(Path::new)
            .filter(|dir| dir.exists())
            .find_map(|dir| {
                SYSTEM_FAMILIES
                    .iter()
                    .find_map(|name| genpdf::fonts::from_files(dir, name, None).ok())
            });
        if let Some(family) = system {
            return Ok(family);
        }
    }
    Err(format!(
        "no usable font family in {} (expected Arial or LiberationSans TTF files)",
        renderer.fonts_dir.display()
    ))
}

/// Configure an A4 genpdf Document with font, margins and metadata title.
fn configure_document(renderer: &GenPdfRenderer, title: &str) -> Result<Document, String> {
    let font_family = load_font(renderer)?;
    let mut doc = Document::new(font_family);
    doc.set_title(title);
    doc.set_paper_size(PaperSize::A4);
    doc.set_font_size(BODY_FONT_SIZE);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// Lays out the title and body paragraphs and returns the PDF bytes.
pub fn render_certificate(
    description: &DocumentDescription,
    renderer: &GenPdfRenderer,
) -> Result<Vec<u8>, String> {
    let mut doc = configure_document(renderer, &description.title)?;

    doc.push(
        Paragraph::new(description.title.as_str())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(TITLE_FONT_SIZE)),
    );
    doc.push(Break::new(TITLE_GAP_LINES));

    for (i, text) in description.paragraphs.iter().enumerate() {
        if i > 0 {
            doc.push(Break::new(1));
        }
        doc.push(Paragraph::new(text.as_str()));
    }

    let mut bytes = Vec::new();
    doc.render(&mut bytes).map_err(|e| {
        error!("genpdf failed on {:?}: {}", description.title, e);
        e.to_string()
    })?;
    Ok(bytes)
}
