//! Validity of a certificate request.
//!
//! Every template shares the three identity fields and adds its own required
//! fields, listed once in `REQUIRED_FIELDS`. Rendering rules live separately in
//! `compose`, so either table can change without touching the other.

use crate::model::certificate::CertificateRequest;
use crate::model::field::Field;
use crate::model::template::Template;

struct RequiredFields {
    template: Template,
    fields: &'static [Field],
}

static REQUIRED_FIELDS: [RequiredFields; 4] = [
    RequiredFields {
        template: Template::Internship,
        fields: &[Field::FromDate, Field::ToDate, Field::InternshipCourse],
    },
    RequiredFields {
        template: Template::Study,
        fields: &[Field::StudyProgram],
    },
    RequiredFields {
        template: Template::Research,
        fields: &[Field::ResearchTopic],
    },
    RequiredFields {
        template: Template::Course,
        fields: &[Field::CourseName],
    },
];

/// Template-specific required fields, or `None` for a template the form does not know.
pub fn required_fields(template: &Template) -> Option<&'static [Field]> {
    REQUIRED_FIELDS
        .iter()
        .find(|entry| &entry.template == template)
        .map(|entry| entry.fields)
}

/// Required fields that are still empty, common fields first.
///
/// An unrecognized template reports only the empty common fields; use `is_valid`
/// to decide whether the form can be rendered.
pub fn missing_fields(request: &CertificateRequest) -> Vec<Field> {
    let specific = required_fields(&request.selected_template).unwrap_or(&[]);
    Field::COMMON
        .iter()
        .chain(specific)
        .copied()
        .filter(|field| request.get(*field).is_empty())
        .collect()
}

/// `true` iff the identity fields and the selected template's fields are all filled in.
pub fn is_valid(request: &CertificateRequest) -> bool {
    match required_fields(&request.selected_template) {
        Some(_) => missing_fields(request).is_empty(),
        None => false,
    }
}
