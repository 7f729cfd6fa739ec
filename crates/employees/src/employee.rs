use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use roster_core::DomainError;

/// Job titles offered by the employee form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobTitle {
    Accountant,
    SoftwareDeveloper,
    SoftwareTester,
    Manager,
}

impl JobTitle {
    pub const ALL: [JobTitle; 4] = [
        JobTitle::Accountant,
        JobTitle::SoftwareDeveloper,
        JobTitle::SoftwareTester,
        JobTitle::Manager,
    ];

    /// Wire value, as stored and sent.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobTitle::Accountant => "accountant",
            JobTitle::SoftwareDeveloper => "software-developer",
            JobTitle::SoftwareTester => "software-tester",
            JobTitle::Manager => "manager",
        }
    }

    /// Display label for the select input.
    pub fn label(&self) -> &'static str {
        match self {
            JobTitle::Accountant => "Accountant",
            JobTitle::SoftwareDeveloper => "Software Developer",
            JobTitle::SoftwareTester => "Software Tester",
            JobTitle::Manager => "Manager",
        }
    }
}

impl core::fmt::Display for JobTitle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for JobTitle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|title| title.as_str() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown job title: {s}")))
    }
}

/// Reference to an uploaded CV file.
///
/// The bytes are not held here; the file is read in the background to
/// derive the preview reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvFile {
    pub name: String,
    pub path: PathBuf,
}

impl CvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    /// Media type announced in the preview reference.
    pub fn mime_type(&self) -> &'static str {
        let is_pdf = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            "application/pdf"
        } else {
            "application/octet-stream"
        }
    }
}

/// One employee slot's data.
///
/// Every field is optional on the wire because a record is created on the
/// first edit of any single field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<JobTitle>,
    /// Last age that parsed as an integer; cleared by unparsable input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<CvFile>,
    /// Displayable reference derived from `cv` once its content is read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

/// Employee form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmployeeField {
    Name,
    Email,
    JobTitle,
    Age,
    Cv,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 5] = [
        EmployeeField::Name,
        EmployeeField::Email,
        EmployeeField::JobTitle,
        EmployeeField::Age,
        EmployeeField::Cv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeField::Name => "name",
            EmployeeField::Email => "email",
            EmployeeField::JobTitle => "jobTitle",
            EmployeeField::Age => "age",
            EmployeeField::Cv => "cv",
        }
    }
}

impl core::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field edit coming from an employee panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeEdit {
    Name(String),
    Email(String),
    JobTitle(JobTitle),
    Age(String),
    Cv(CvFile),
}

impl EmployeeEdit {
    pub fn field(&self) -> EmployeeField {
        match self {
            EmployeeEdit::Name(_) => EmployeeField::Name,
            EmployeeEdit::Email(_) => EmployeeField::Email,
            EmployeeEdit::JobTitle(_) => EmployeeField::JobTitle,
            EmployeeEdit::Age(_) => EmployeeField::Age,
            EmployeeEdit::Cv(_) => EmployeeField::Cv,
        }
    }
}

impl EmployeeRecord {
    /// Write the edited value into the record.
    ///
    /// A new CV drops the previous preview reference until it is derived
    /// again.
    pub fn apply(&mut self, edit: EmployeeEdit) {
        match edit {
            EmployeeEdit::Name(name) => self.name = name,
            EmployeeEdit::Email(email) => self.email = email,
            EmployeeEdit::JobTitle(title) => self.job_title = Some(title),
            EmployeeEdit::Age(age) => self.age = age.trim().parse().ok(),
            EmployeeEdit::Cv(file) => {
                self.cv = Some(file);
                self.pdf_url = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_title_parses_wire_values() {
        assert_eq!("software-developer".parse::<JobTitle>(), Ok(JobTitle::SoftwareDeveloper));
        assert_eq!("manager".parse::<JobTitle>(), Ok(JobTitle::Manager));
        assert!(matches!(
            "ceo".parse::<JobTitle>(),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(JobTitle::SoftwareTester.label(), "Software Tester");
    }

    #[test]
    fn cv_file_takes_name_and_mime_from_path() {
        let cv = CvFile::new("/tmp/uploads/Resume.PDF");
        assert_eq!(cv.name, "Resume.PDF");
        assert_eq!(cv.mime_type(), "application/pdf");
        assert_eq!(CvFile::new("notes.txt").mime_type(), "application/octet-stream");
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let mut record = EmployeeRecord::default();
        record.apply(EmployeeEdit::Name("Alice".to_string()));
        record.apply(EmployeeEdit::JobTitle(JobTitle::SoftwareTester));
        record.apply(EmployeeEdit::Age("31".to_string()));
        record.pdf_url = Some("data:application/pdf;base64,AA==".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Alice",
                "email": "",
                "jobTitle": "software-tester",
                "age": 31,
                "pdfUrl": "data:application/pdf;base64,AA==",
            })
        );
    }

    #[test]
    fn unparsable_age_clears_stored_value() {
        let mut record = EmployeeRecord::default();
        record.apply(EmployeeEdit::Age("40".to_string()));
        assert_eq!(record.age, Some(40));
        record.apply(EmployeeEdit::Age("forty".to_string()));
        assert_eq!(record.age, None);
    }

    #[test]
    fn new_cv_drops_stale_preview() {
        let mut record = EmployeeRecord {
            pdf_url: Some("data:application/pdf;base64,AA==".to_string()),
            ..EmployeeRecord::default()
        };
        record.apply(EmployeeEdit::Cv(CvFile::new("cv.pdf")));
        assert_eq!(record.cv.as_ref().map(|cv| cv.name.as_str()), Some("cv.pdf"));
        assert_eq!(record.pdf_url, None);
    }
}
