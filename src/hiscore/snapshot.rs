use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One category's numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SkillStats {
    /// Position on the hiscores, `-1` when unranked
    pub rank: i32,
    pub level: u32,
    pub experience: i64,
}

impl SkillStats {
    pub const UNRANKED: i32 = -1;

    pub fn new(rank: i32, level: u32, experience: i64) -> Self {
        Self {
            rank,
            level,
            experience,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.rank != Self::UNRANKED
    }
}

/// The result of one player lookup, success or failure.
///
/// `skills` is non-empty exactly when `success` is true, and is ordered the
/// way the categories were recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// The requested name, echoed back verbatim
    pub name: String,
    pub success: bool,
    /// Failure reason, empty on success
    pub error: String,
    pub skills: Vec<(String, SkillStats)>,
}

impl PlayerSnapshot {
    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            success: false,
            error: error.into(),
            skills: Vec::new(),
        }
    }

    /// Builds a snapshot from recorded categories. An empty list is a
    /// failure carrying `no_data`.
    pub fn from_skills(
        name: impl Into<String>,
        skills: Vec<(String, SkillStats)>,
        no_data: &str,
    ) -> Self {
        if skills.is_empty() {
            return Self::failure(name, no_data);
        }

        Self {
            name: name.into(),
            success: true,
            error: String::new(),
            skills,
        }
    }

    /// Looks up a category by name.
    pub fn skill(&self, name: &str) -> Option<&SkillStats> {
        self.skills
            .iter()
            .find(|(skill, _)| skill == name)
            .map(|(_, stats)| stats)
    }
}

/// Serializes as `{"name", "success", "error"?, "skills"?}`.
///
/// `error` is written only for a failure with a non-empty reason, and
/// `skills` only on success, as an object keyed by category in recorded
/// order.
impl Serialize for PlayerSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_error = !self.success && !self.error.is_empty();
        let len = 2 + usize::from(with_error) + usize::from(self.success);

        let mut state = serializer.serialize_struct("PlayerSnapshot", len)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("success", &self.success)?;
        if with_error {
            state.serialize_field("error", &self.error)?;
        }
        if self.success {
            state.serialize_field("skills", &OrderedSkills(&self.skills))?;
        }
        state.end()
    }
}

struct OrderedSkills<'a>(&'a [(String, SkillStats)]);

impl Serialize for OrderedSkills<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(skill, stats)| (skill, stats)))
    }
}
