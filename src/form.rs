//! Structure of the resume form.
//!
//! The aggregator never holds a list of element ids. It asks a [`FormSource`]
//! for the blocks inside a section container and reads named fields within
//! each block, so entries added at runtime are picked up the same way as the
//! ones rendered initially.

/// Class carried by every repeatable block inside a section container.
pub const ENTRY_CLASS: &str = "entry";

/// Id of the block holding the personal info fields.
pub const PERSONAL_SECTION: &str = "personal-info";

pub const SUMMARY_FIELD: &str = "summary";

/// Personal info fields in wire order: (field name, placeholder).
pub const PERSONAL_FIELDS: &[(&str, &str)] = &[
    ("name", "Full Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("github", "GitHub URL"),
    ("linkedin", "LinkedIn URL"),
];

/// Reads control values by `name` attribute within some scope.
pub trait FieldReader {
    /// Value of the first control with this name, `None` if there is none.
    fn value(&self, name: &str) -> Option<String>;

    /// Values of every control with this name, in document order.
    fn values(&self, name: &str) -> Vec<String>;
}

/// The whole form: a field reader plus structural lookups.
pub trait FormSource: FieldReader {
    type Block: FieldReader;

    /// A single named block (e.g. the personal info fieldset).
    fn section(&self, id: &str) -> Option<Self::Block>;

    /// Every `.entry` block inside the container with this id, in document order.
    fn blocks(&self, container_id: &str) -> Vec<Self::Block>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub placeholder: &'static str,
    pub multiline: bool,
}

const fn line(name: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec { name, placeholder, multiline: false }
}

const fn text(name: &'static str, placeholder: &'static str) -> FieldSpec {
    FieldSpec { name, placeholder, multiline: true }
}

const EXPERIENCE_FIELDS: &[FieldSpec] = &[
    line("title", "Title"),
    line("company", "Company"),
    line("duration", "Duration"),
    text("description", "Description"),
    line("responsibility", "Responsibility"),
    line("responsibility", "Responsibility"),
];

const EDUCATION_FIELDS: &[FieldSpec] = &[
    line("degree", "Degree"),
    line("institution", "Institution"),
    line("year", "Year"),
    line("gpa", "GPA (optional)"),
];

const PROJECT_FIELDS: &[FieldSpec] = &[
    line("name", "Project Name"),
    text("description", "Project Description"),
    line("link", "Project Link (optional)"),
];

/// Repeatable entry sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Experience,
    Education,
    Projects,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Projects,
    ];

    pub fn container_id(self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Projects => "projects",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Experience => "Work Experience",
            SectionKind::Education => "Education",
            SectionKind::Projects => "Projects",
        }
    }

    pub fn add_label(self) -> &'static str {
        match self {
            SectionKind::Experience => "Add Experience",
            SectionKind::Education => "Add Education",
            SectionKind::Projects => "Add Project",
        }
    }

    /// Controls of one block, in the order they are rendered and serialized.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            SectionKind::Experience => EXPERIENCE_FIELDS,
            SectionKind::Education => EDUCATION_FIELDS,
            SectionKind::Projects => PROJECT_FIELDS,
        }
    }
}

/// Skill groups. Labels double as the keys of the draft's `skills` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillGroup {
    Technical,
    Soft,
}

impl SkillGroup {
    pub const ALL: [SkillGroup; 2] = [SkillGroup::Technical, SkillGroup::Soft];

    pub fn field_name(self) -> &'static str {
        match self {
            SkillGroup::Technical => "skills_group1[]",
            SkillGroup::Soft => "skills_group2[]",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SkillGroup::Technical => "Technical Skills",
            SkillGroup::Soft => "Soft Skills",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SkillGroup::Technical => "Technical Skill",
            SkillGroup::Soft => "Soft Skill",
        }
    }

    pub fn container_id(self) -> &'static str {
        match self {
            SkillGroup::Technical => "skills-technical",
            SkillGroup::Soft => "skills-soft",
        }
    }
}

/// Appends a fresh key to a keyed block list, leaving existing keys in place.
pub fn append_block(keys: &mut Vec<usize>) -> usize {
    let next = keys.iter().max().map_or(0, |last| last + 1);
    keys.push(next);
    next
}
