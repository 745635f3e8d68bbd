//! Addressing of the individual form fields.
//!
//! Inputs in the form are identified by the camelCase names the page uses for its
//! `name` attributes. `Field` covers every scalar text input, `FileField` the two
//! attachment pickers.

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    StudentName,
    RollNumber,
    RegistrationNumber,
    InternshipCourse,
    StudyProgram,
    ResearchTopic,
    ResearchDomain,
    ResearchDescription,
    CourseName,
    FromDate,
    ToDate,
    ProjectTitle,
    ProjectDescription,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::StudentName,
        Field::RollNumber,
        Field::RegistrationNumber,
        Field::InternshipCourse,
        Field::StudyProgram,
        Field::ResearchTopic,
        Field::ResearchDomain,
        Field::ResearchDescription,
        Field::CourseName,
        Field::FromDate,
        Field::ToDate,
        Field::ProjectTitle,
        Field::ProjectDescription,
    ];

    /// Fields required by every template.
    pub const COMMON: [Field; 3] = [
        Field::StudentName,
        Field::RollNumber,
        Field::RegistrationNumber,
    ];

    /// The input `name` attribute for this field.
    pub fn name(self) -> &'static str {
        match self {
            Field::StudentName => "studentName",
            Field::RollNumber => "rollNumber",
            Field::RegistrationNumber => "registrationNumber",
            Field::InternshipCourse => "internshipCourse",
            Field::StudyProgram => "studyProgram",
            Field::ResearchTopic => "researchTopic",
            Field::ResearchDomain => "researchDomain",
            Field::ResearchDescription => "researchDescription",
            Field::CourseName => "courseName",
            Field::FromDate => "fromDate",
            Field::ToDate => "toDate",
            Field::ProjectTitle => "projectTitle",
            Field::ProjectDescription => "projectDescription",
        }
    }

    /// Human readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::StudentName => "Student Name",
            Field::RollNumber => "Roll Number",
            Field::RegistrationNumber => "Registration Number",
            Field::InternshipCourse => "Internship Course",
            Field::StudyProgram => "Study Program",
            Field::ResearchTopic => "Research Topic",
            Field::ResearchDomain => "Research Domain",
            Field::ResearchDescription => "Research Description",
            Field::CourseName => "Course Name",
            Field::FromDate => "From Date",
            Field::ToDate => "To Date",
            Field::ProjectTitle => "Project Title",
            Field::ProjectDescription => "Project Description",
        }
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two optional attachment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileField {
    #[serde(rename = "projectReport")]
    ProjectReport,
    #[serde(rename = "projectPPT")]
    ProjectPpt,
}

impl FileField {
    pub const ALL: [FileField; 2] = [FileField::ProjectReport, FileField::ProjectPpt];

    pub fn name(self) -> &'static str {
        match self {
            FileField::ProjectReport => "projectReport",
            FileField::ProjectPpt => "projectPPT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileField::ProjectReport => "Project Report",
            FileField::ProjectPpt => "Project PPT",
        }
    }
}

impl FromStr for FileField {
    type Err = FormError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        FileField::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| FormError::UnknownFileField(name.to_string()))
    }
}
