use serde::{Deserialize, Serialize};
use std::fmt;

/// The certificate variant selected in the form.
///
/// Only the four named variants are offered by the UI. `Unrecognized` keeps whatever
/// arrived through an untyped boundary (a JSON payload or a template name) so the
/// model can hold it; such a form is never valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Template {
    #[default]
    Internship,
    Study,
    Research,
    Course,
    Unrecognized(String),
}

impl Template {
    /// The selectable templates, in the order the template buttons are shown.
    pub const ALL: [Template; 4] = [
        Template::Internship,
        Template::Study,
        Template::Research,
        Template::Course,
    ];

    /// Lower-case wire name (`"internship"`, `"study"`, ...).
    pub fn name(&self) -> &str {
        match self {
            Template::Internship => "internship",
            Template::Study => "study",
            Template::Research => "research",
            Template::Course => "course",
            Template::Unrecognized(raw) => raw,
        }
    }

    /// Button label: the name with its first letter capitalised.
    pub fn label(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Template::Unrecognized(_))
    }
}

impl From<&str> for Template {
    fn from(raw: &str) -> Self {
        match raw {
            "internship" => Template::Internship,
            "study" => Template::Study,
            "research" => Template::Research,
            "course" => Template::Course,
            other => Template::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Template {
    fn from(raw: String) -> Self {
        Template::from(raw.as_str())
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.name().to_string()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
