//! Structured input for the academic report generator

use serde::{Deserialize, Serialize};

/// Kind of submission printed on the cover page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectType {
    #[default]
    #[serde(rename = "Major Project")]
    MajorProject,
    #[serde(rename = "Mini Project")]
    MiniProject,
    #[serde(rename = "Internship Report")]
    InternshipReport,
    #[serde(rename = "Thesis")]
    Thesis,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MajorProject => "Major Project",
            Self::MiniProject => "Mini Project",
            Self::InternshipReport => "Internship Report",
            Self::Thesis => "Thesis",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInfo {
    pub name: String,
    pub register_number: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorInfo {
    pub name: String,
    pub designation: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HodInfo {
    pub name: String,
    pub department: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryGuideInfo {
    pub name: String,
    pub designation: String,
    pub company: String,
}

/// One bibliography entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub authors: Vec<String>,
    pub title: String,
    pub journal: Option<String>,
    pub conference: Option<String>,
    pub year: i32,
    pub pages: Option<String>,
    pub publisher: Option<String>,
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbstractSection {
    pub background: String,
    pub objectives: String,
    pub methodology: String,
    pub results: String,
    pub conclusions: String,
    pub keywords: Vec<String>,
}

/// Body text of the seven report chapters; conclusions and future work share chapter 7
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Chapters {
    pub introduction: String,
    pub literature_survey: String,
    pub objectives: String,
    pub methodology: String,
    pub proposed_work: String,
    pub results: String,
    pub conclusions: String,
    pub future_work: String,
}

/// Institution printed on the cover, certificate, and declaration pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstitutionProfile {
    pub name: String,
    /// Line under the name, e.g. "(Autonomous)"
    pub status: Option<String>,
    pub address: String,
    /// Place printed next to the declaration date
    pub place: String,
    pub degree: String,
    pub logo_placeholder: String,
}

impl Default for InstitutionProfile {
    fn default() -> Self {
        Self {
            name: "Bannari Amman Institute of Technology".to_string(),
            status: Some("(Autonomous)".to_string()),
            address: "Sathyamangalam – 638 401, Erode District, Tamil Nadu".to_string(),
            place: "Sathyamangalam".to_string(),
            degree: "Bachelor of Engineering".to_string(),
            logo_placeholder: "[COLLEGE LOGO]".to_string(),
        }
    }
}

/// Everything needed to materialize an academic project report
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicReportData {
    pub project_title: String,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub academic_year: String,
    #[serde(default)]
    pub submission_date: String,
    pub students: Vec<StudentInfo>,
    #[serde(default)]
    pub supervisor: SupervisorInfo,
    #[serde(default)]
    pub hod: HodInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry_guide: Option<IndustryGuideInfo>,
    #[serde(rename = "abstract", default)]
    pub abstract_section: AbstractSection,
    #[serde(default)]
    pub chapters: Chapters,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub institution: InstitutionProfile,
}

impl AcademicReportData {
    /// Department of the first student, used on the cover and in the degree line
    pub fn department(&self) -> &str {
        self.students
            .first()
            .map(|s| s.department.as_str())
            .unwrap_or_default()
    }

    /// Student names joined with `sep`
    pub fn student_names(&self, sep: &str) -> String {
        self.students
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Demonstration data used by the built-in template
    pub fn sample() -> Self {
        let department = "Information Technology";
        let student = |name: &str, register_number: &str| StudentInfo {
            name: name.to_string(),
            register_number: register_number.to_string(),
            department: department.to_string(),
            year: Some("Fourth Year".to_string()),
            section: Some("A".to_string()),
        };

        Self {
            project_title: "Smart Document Management Using Machine Learning".to_string(),
            project_type: ProjectType::MajorProject,
            academic_year: "2024-2025".to_string(),
            submission_date: "April 2025".to_string(),
            students: vec![student("John Doe", "19IT001"), student("Jane Smith", "19IT002")],
            supervisor: SupervisorInfo {
                name: "Dr. Rajesh Kumar".to_string(),
                designation: "Professor".to_string(),
                department: department.to_string(),
            },
            hod: HodInfo {
                name: "Dr. Priya Sharma".to_string(),
                department: department.to_string(),
            },
            industry_guide: Some(IndustryGuideInfo {
                name: "Mr. Arun Patel".to_string(),
                designation: "Senior Software Engineer".to_string(),
                company: "TechCorp Solutions Pvt. Ltd.".to_string(),
            }),
            abstract_section: AbstractSection {
                background: "Organizations store large volumes of documents that are hard to \
                             classify and search with folder-based tools."
                    .to_string(),
                objectives: "The project builds a document manager that classifies uploads \
                             automatically and answers natural language queries."
                    .to_string(),
                methodology: "A web front end talks to a REST service; text classifiers are \
                              trained on labelled archives and served behind the search index."
                    .to_string(),
                results: "Classification reached 92% accuracy and median search latency \
                          stayed under two seconds on 10,000 documents."
                    .to_string(),
                conclusions: "Automated tagging and semantic search reduce retrieval time and \
                              keep access control auditable."
                    .to_string(),
                keywords: vec![
                    "Document Management".to_string(),
                    "Machine Learning".to_string(),
                    "Information Retrieval".to_string(),
                ],
            },
            chapters: Chapters {
                introduction: "1.1 OVERVIEW\n\nDigital archives grow faster than the tools \
                               used to organize them."
                    .to_string(),
                literature_survey: "Prior work on supervised text classification and \
                                    vector search is summarized here."
                    .to_string(),
                objectives: "1. Classify documents automatically.\n2. Support semantic \
                             search.\n3. Enforce role-based access."
                    .to_string(),
                methodology: "The system is split into ingestion, classification, indexing, \
                              and presentation layers."
                    .to_string(),
                proposed_work: "Uploads are parsed, embedded, classified, and indexed before \
                                they become searchable."
                    .to_string(),
                results: "Accuracy, latency, and throughput measurements are reported for \
                          each component."
                    .to_string(),
                conclusions: "7.1 CONCLUSIONS\n\nThe prototype meets its accuracy and \
                              latency targets."
                    .to_string(),
                future_work: "Support for scanned handwriting and multilingual corpora."
                    .to_string(),
            },
            references: vec![
                Reference {
                    authors: vec!["A. Smith".to_string(), "B. Jones".to_string()],
                    title: "Deep learning for document classification".to_string(),
                    journal: Some("IEEE Transactions on Knowledge and Data Engineering".to_string()),
                    volume: Some("35".to_string()),
                    issue: Some("4".to_string()),
                    pages: Some("1021-1034".to_string()),
                    year: 2023,
                    doi: Some("10.1109/TKDE.2023.0001".to_string()),
                    ..Default::default()
                },
                Reference {
                    authors: vec!["C. Lee".to_string()],
                    title: "Semantic search over enterprise archives".to_string(),
                    conference: Some("International Conference on Information Retrieval".to_string()),
                    pages: Some("45-52".to_string()),
                    year: 2022,
                    publisher: Some("ACM".to_string()),
                    ..Default::default()
                },
            ],
            institution: InstitutionProfile::default(),
        }
    }
}
