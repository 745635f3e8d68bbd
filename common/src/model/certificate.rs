//! The certificate request edited by the form.
//!
//! A `CertificateRequest` is created with empty defaults when the page loads and is
//! mutated one field at a time. Fields belonging to a template that is no longer
//! selected are kept as they are; only the selected template decides which of them
//! matter for validity and rendering.

use crate::model::field::{Field, FileField};
use crate::model::template::Template;
use serde::{Deserialize, Serialize};

/// Metadata of a file chosen in one of the attachment pickers.
///
/// The picker's `.pdf` filter is only a hint to the browser, so `mime_type` may be
/// anything, including empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateRequest {
    pub student_name: String,
    pub roll_number: String,
    pub registration_number: String,
    pub internship_course: String,
    pub study_program: String,
    pub research_topic: String,
    pub research_domain: String,
    pub research_description: String,
    pub course_name: String,
    pub from_date: String,
    pub to_date: String,
    pub project_title: String,
    pub project_description: String,
    pub project_report: Option<Attachment>,
    #[serde(rename = "projectPPT")]
    pub project_ppt: Option<Attachment>,
    pub selected_template: Template,
}

impl CertificateRequest {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::StudentName => &self.student_name,
            Field::RollNumber => &self.roll_number,
            Field::RegistrationNumber => &self.registration_number,
            Field::InternshipCourse => &self.internship_course,
            Field::StudyProgram => &self.study_program,
            Field::ResearchTopic => &self.research_topic,
            Field::ResearchDomain => &self.research_domain,
            Field::ResearchDescription => &self.research_description,
            Field::CourseName => &self.course_name,
            Field::FromDate => &self.from_date,
            Field::ToDate => &self.to_date,
            Field::ProjectTitle => &self.project_title,
            Field::ProjectDescription => &self.project_description,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::StudentName => &mut self.student_name,
            Field::RollNumber => &mut self.roll_number,
            Field::RegistrationNumber => &mut self.registration_number,
            Field::InternshipCourse => &mut self.internship_course,
            Field::StudyProgram => &mut self.study_program,
            Field::ResearchTopic => &mut self.research_topic,
            Field::ResearchDomain => &mut self.research_domain,
            Field::ResearchDescription => &mut self.research_description,
            Field::CourseName => &mut self.course_name,
            Field::FromDate => &mut self.from_date,
            Field::ToDate => &mut self.to_date,
            Field::ProjectTitle => &mut self.project_title,
            Field::ProjectDescription => &mut self.project_description,
        }
    }

    /// Stores `value` as is. Returns `true` when the stored value changed.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = self.slot_mut(field);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    pub fn attachment(&self, field: FileField) -> Option<&Attachment> {
        match field {
            FileField::ProjectReport => self.project_report.as_ref(),
            FileField::ProjectPpt => self.project_ppt.as_ref(),
        }
    }

    pub fn set_attachment(&mut self, field: FileField, attachment: Option<Attachment>) {
        match field {
            FileField::ProjectReport => self.project_report = attachment,
            FileField::ProjectPpt => self.project_ppt = attachment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_request_is_empty_internship() {
        let request = CertificateRequest::default();
        assert_eq!(request.selected_template, Template::Internship);
        assert!(Field::ALL.iter().all(|f| request.get(*f).is_empty()));
        assert!(request.project_report.is_none());
        assert!(request.project_ppt.is_none());
    }

    #[test]
    fn set_reports_whether_the_value_changed() {
        let mut request = CertificateRequest::default();
        assert!(request.set(Field::CourseName, "Algorithms"));
        assert!(!request.set(Field::CourseName, "Algorithms"));
        assert_eq!(request.get(Field::CourseName), "Algorithms");
    }

    #[test]
    fn deserializes_form_payload_with_camel_case_names() {
        let request: CertificateRequest = serde_json::from_str(
            r#"{
                "studentName": "Jane Doe",
                "rollNumber": "R1",
                "registrationNumber": "G1",
                "courseName": "Algorithms",
                "projectPPT": {"name": "slides.pdf", "size": 10, "mimeType": "application/pdf"},
                "selectedTemplate": "course"
            }"#,
        )
        .unwrap();
        assert_eq!(request.student_name, "Jane Doe");
        assert_eq!(request.selected_template, Template::Course);
        assert_eq!(
            request.attachment(FileField::ProjectPpt).map(|a| a.name.as_str()),
            Some("slides.pdf")
        );
        assert!(request.research_topic.is_empty());
    }
}
