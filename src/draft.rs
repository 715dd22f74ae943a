//! The resume draft and the aggregator that projects the form into it.

use serde::{Deserialize, Serialize};

use crate::error::ControllerError;
use crate::form::{FieldReader, FormSource, SectionKind, SkillGroup, PERSONAL_SECTION, SUMMARY_FIELD};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDraft {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Skills,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
}

/// Skill groups keyed by their display label. A struct rather than a map so
/// the serialized key order never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(rename = "Technical Skills")]
    pub technical: Vec<String>,
    #[serde(rename = "Soft Skills")]
    pub soft: Vec<String>,
}

impl Experience {
    fn is_identified(&self) -> bool {
        !self.title.is_empty() || !self.company.is_empty()
    }
}

impl Education {
    fn is_identified(&self) -> bool {
        !self.degree.is_empty() || !self.institution.is_empty()
    }
}

impl Project {
    fn is_identified(&self) -> bool {
        !self.name.is_empty() || !self.description.is_empty()
    }
}

impl ResumeDraft {
    /// JSON carried in the `data` field of the transport payload.
    pub fn to_payload(&self) -> Result<String, ControllerError> {
        serde_json::to_string(self).map_err(|e| ControllerError::Encode(e.to_string()))
    }
}

/// Build a draft from the current state of the form.
///
/// Missing fields read as empty strings. Entries whose identifying fields are
/// all blank are dropped, as are blank responsibilities and skills.
pub fn build_draft<F: FormSource>(form: &F) -> ResumeDraft {
    let personal = form.section(PERSONAL_SECTION);
    let personal_field = |name: &str| {
        personal
            .as_ref()
            .map(|block| read(block, name))
            .unwrap_or_default()
    };

    ResumeDraft {
        personal_info: PersonalInfo {
            name: personal_field("name"),
            email: personal_field("email"),
            phone: personal_field("phone"),
            github: personal_field("github"),
            linkedin: personal_field("linkedin"),
        },
        summary: read(form, SUMMARY_FIELD),
        experience: form
            .blocks(SectionKind::Experience.container_id())
            .iter()
            .map(|block| Experience {
                title: read(block, "title"),
                company: read(block, "company"),
                duration: read(block, "duration"),
                description: read(block, "description"),
                responsibilities: read_all(block, "responsibility"),
            })
            .filter(Experience::is_identified)
            .collect(),
        education: form
            .blocks(SectionKind::Education.container_id())
            .iter()
            .map(|block| Education {
                degree: read(block, "degree"),
                institution: read(block, "institution"),
                year: read(block, "year"),
                gpa: read(block, "gpa"),
            })
            .filter(Education::is_identified)
            .collect(),
        projects: form
            .blocks(SectionKind::Projects.container_id())
            .iter()
            .map(|block| Project {
                name: read(block, "name"),
                description: read(block, "description"),
                link: read(block, "link"),
            })
            .filter(Project::is_identified)
            .collect(),
        skills: Skills {
            technical: read_all(form, SkillGroup::Technical.field_name()),
            soft: read_all(form, SkillGroup::Soft.field_name()),
        },
    }
}

/// Whether the form already has content worth previewing on load.
pub fn needs_initial_preview<F: FormSource>(form: &F) -> bool {
    form.section(PERSONAL_SECTION)
        .map(|block| !read(&block, "name").is_empty())
        .unwrap_or(false)
}

fn read<R: FieldReader + ?Sized>(reader: &R, name: &str) -> String {
    reader
        .value(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn read_all<R: FieldReader + ?Sized>(reader: &R, name: &str) -> Vec<String> {
    reader
        .values(name)
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::form::testing::{FakeBlock, FakeForm};

    fn experience_block(title: &str, company: &str, duration: &str, description: &str) -> FakeBlock {
        FakeBlock::default()
            .with("title", title)
            .with("company", company)
            .with("duration", duration)
            .with("description", description)
            .with("responsibility", "")
            .with("responsibility", "")
    }

    #[test]
    fn test_end_to_end_draft() {
        let form = FakeForm::default()
            .personal("name", "Jane Doe")
            .entry(SectionKind::Experience, experience_block("Engineer", "Acme", "", ""))
            .field("skills_group1[]", "Go");

        let draft = build_draft(&form);
        let value = serde_json::to_value(&draft).unwrap();

        assert_eq!(
            value,
            json!({
                "personal_info": {
                    "name": "Jane Doe",
                    "email": "",
                    "phone": "",
                    "github": "",
                    "linkedin": ""
                },
                "summary": "",
                "experience": [{
                    "title": "Engineer",
                    "company": "Acme",
                    "duration": "",
                    "description": "",
                    "responsibilities": []
                }],
                "education": [],
                "projects": [],
                "skills": {"Technical Skills": ["Go"], "Soft Skills": []}
            })
        );
    }

    #[test]
    fn test_unidentified_experience_is_dropped() {
        let form = FakeForm::default()
            .entry(SectionKind::Experience, experience_block("", "", "2020-2022", "Did things"))
            .entry(SectionKind::Experience, experience_block("Engineer", "", "", ""));

        let draft = build_draft(&form);
        assert_eq!(draft.experience.len(), 1);
        assert_eq!(
            draft.experience[0],
            Experience {
                title: "Engineer".to_string(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_blank_placeholders_are_omitted() {
        let form = FakeForm::default()
            .entry(
                SectionKind::Education,
                FakeBlock::default()
                    .with("degree", "  ")
                    .with("institution", "")
                    .with("year", "2019"),
            )
            .entry(
                SectionKind::Education,
                FakeBlock::default().with("institution", "MIT"),
            )
            .entry(
                SectionKind::Projects,
                FakeBlock::default().with("name", "").with("link", "https://example.com"),
            )
            .entry(
                SectionKind::Projects,
                FakeBlock::default().with("description", "A compiler"),
            );

        let draft = build_draft(&form);
        assert_eq!(draft.education.len(), 1);
        assert_eq!(draft.education[0].institution, "MIT");
        assert_eq!(draft.education[0].gpa, "");
        assert_eq!(draft.projects.len(), 1);
        assert_eq!(draft.projects[0].description, "A compiler");
    }

    #[test]
    fn test_skill_filtering() {
        let form = FakeForm::default()
            .field("skills_group1[]", "Python")
            .field("skills_group1[]", "  ")
            .field("skills_group1[]", "")
            .field("skills_group2[]", "Writing")
            .field("skills_group2[]", "Writing");

        let draft = build_draft(&form);
        assert_eq!(draft.skills.technical, vec!["Python"]);
        assert_eq!(draft.skills.soft, vec!["Writing", "Writing"]);
    }

    #[test]
    fn test_responsibilities_keep_dom_order() {
        let block = FakeBlock::default()
            .with("title", "Lead")
            .with("responsibility", " Hiring ")
            .with("responsibility", "")
            .with("responsibility", "Roadmap");
        let form = FakeForm::default().entry(SectionKind::Experience, block);

        let draft = build_draft(&form);
        assert_eq!(draft.experience[0].responsibilities, vec!["Hiring", "Roadmap"]);
    }

    #[test]
    fn test_entries_follow_dom_order() {
        let form = FakeForm::default()
            .entry(SectionKind::Projects, FakeBlock::default().with("name", "first"))
            .entry(SectionKind::Projects, FakeBlock::default().with("name", "second"))
            .entry(SectionKind::Projects, FakeBlock::default().with("name", "third"));

        let names: Vec<_> = build_draft(&form).projects.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let draft = build_draft(&FakeForm::default());
        assert_eq!(draft, ResumeDraft::default());
        assert!(!needs_initial_preview(&FakeForm::default()));
    }

    #[test]
    fn test_build_is_idempotent() {
        let form = FakeForm::default()
            .personal("name", "Jane Doe")
            .personal("email", "jane@example.com")
            .field("summary", "Builds things.")
            .entry(SectionKind::Experience, experience_block("Engineer", "Acme", "2y", "Backend"))
            .field("skills_group1[]", "Rust");

        let first = build_draft(&form);
        let second = build_draft(&form);
        assert_eq!(first, second);
        assert_eq!(first.to_payload().unwrap(), second.to_payload().unwrap());
    }

    #[test]
    fn test_payload_is_the_wire_json() {
        let form = FakeForm::default().personal("name", "Jane Doe");
        let payload = build_draft(&form).to_payload().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["personal_info"]["name"], "Jane Doe");
    }

    #[test]
    fn test_needs_initial_preview() {
        let blank = FakeForm::default().personal("name", "   ");
        assert!(!needs_initial_preview(&blank));

        let restored = FakeForm::default().personal("name", "Jane");
        assert!(needs_initial_preview(&restored));
    }
}
