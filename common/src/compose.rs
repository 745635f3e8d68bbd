//! Turns a certificate request into the title and paragraphs given to the renderer.

use crate::model::certificate::CertificateRequest;
use crate::model::document::DocumentDescription;
use crate::model::field::Field;
use crate::model::template::Template;

/// Advisory text printed under study certificates.
pub const DEFAULT_STUDY_INSTRUCTIONS: &str = "This certificate is awarded for successful completion of a study program. It verifies the student's participation and achievement in the specified course of study.";

/// Fields tried, in order, for the "completed the ..." part of the sentence.
const COURSE_LIKE_FIELDS: [Field; 4] = [
    Field::InternshipCourse,
    Field::StudyProgram,
    Field::ResearchTopic,
    Field::CourseName,
];

type ExtraParagraphs = fn(&CertificateRequest, &str) -> Vec<String>;

struct BodyRule {
    template: Template,
    extra: ExtraParagraphs,
}

fn no_extra(_: &CertificateRequest, _: &str) -> Vec<String> {
    Vec::new()
}

fn study_note(_: &CertificateRequest, instructions: &str) -> Vec<String> {
    vec![format!("Note: {}", instructions)]
}

// Research and project fields are collected by the form but intentionally not printed.
static BODY_RULES: [BodyRule; 4] = [
    BodyRule {
        template: Template::Internship,
        extra: no_extra,
    },
    BodyRule {
        template: Template::Study,
        extra: study_note,
    },
    BodyRule {
        template: Template::Research,
        extra: no_extra,
    },
    BodyRule {
        template: Template::Course,
        extra: no_extra,
    },
];

fn extra_paragraphs(template: &Template) -> ExtraParagraphs {
    BODY_RULES
        .iter()
        .find(|rule| &rule.template == template)
        .map(|rule| rule.extra)
        .unwrap_or(no_extra)
}

/// `<TEMPLATE> CERTIFICATE`
pub fn title(template: &Template) -> String {
    format!("{} CERTIFICATE", template.name().to_uppercase())
}

/// First non-empty course-like field, or an empty string.
pub fn course_like(request: &CertificateRequest) -> &str {
    COURSE_LIKE_FIELDS
        .iter()
        .map(|field| request.get(*field))
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

/// The certification sentence shared by every template.
pub fn certification_sentence(request: &CertificateRequest) -> String {
    let mut sentence = format!(
        "This is to certify that {} (Roll No: {}, Reg No: {}) has successfully completed the {}",
        request.student_name,
        request.roll_number,
        request.registration_number,
        course_like(request)
    );
    if !request.from_date.is_empty() && !request.to_date.is_empty() {
        sentence.push_str(&format!(" from {} to {}", request.from_date, request.to_date));
    }
    sentence.push('.');
    sentence
}

/// Builds the document description for `request`.
///
/// Does not check validity; callers only render valid requests.
pub fn compose_document(request: &CertificateRequest, instructions: &str) -> DocumentDescription {
    let mut paragraphs = vec![certification_sentence(request)];
    paragraphs.extend(extra_paragraphs(&request.selected_template)(request, instructions));
    DocumentDescription {
        title: title(&request.selected_template),
        paragraphs,
    }
}
