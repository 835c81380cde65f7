use serde::{Deserialize, Serialize};

/// Username given to a fresh installation until the player picks one.
pub const DEFAULT_USERNAME: &str = "Guest_Engineer";

/// Every installation starts here.
pub const STARTING_LEVEL: u32 = 1;

/// Mission difficulty tier, purely informational.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
            Difficulty::Expert => "Expert",
        }
    }
}

/// A single puzzle in the hunt. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mission {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Narrative shown above the terminal
    pub storyline: String,
    /// External material the player has to inspect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue_url: Option<String>,
    pub difficulty: Difficulty,
    pub xp_reward: u32,
    /// Expected answer in plain text. Compared after normalisation, never hashed.
    pub answer_hash: String,
    pub hint: String,
    pub required_level: u32,
}

impl Mission {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        storyline: &str,
        difficulty: Difficulty,
        xp_reward: u32,
        answer: &str,
        hint: &str,
        required_level: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            storyline: storyline.to_string(),
            clue_url: None,
            difficulty,
            xp_reward,
            answer_hash: answer.to_string(),
            hint: hint.to_string(),
            required_level,
        }
    }

    pub fn with_clue_url(mut self, url: &str) -> Self {
        self.clue_url = Some(url.to_string());
        self
    }

    /// Digits of the id, used as the protocol number on mission cards ("m001" -> "001").
    pub fn number(&self) -> String {
        self.id.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// Cosmetic reward descriptor. Unlock conditions live in the rule table, not here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl Badge {
    pub fn new(id: &str, name: &str, icon: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            description: description.to_string(),
        }
    }
}

/// The player's persisted progress.
///
/// `completed_missions` and `unlocked_badges` are ordered lists with set
/// semantics: insertion order is kept for display and each id appears at most
/// once. Field names serialize in camelCase to stay compatible with the
/// `codex_save_v1` snapshot format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub level: u32,
    pub current_xp: u32,
    #[serde(default)]
    pub completed_missions: Vec<String>,
    #[serde(default)]
    pub unlocked_badges: Vec<String>,
    #[serde(default = "default_username")]
    pub username: String,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            level: STARTING_LEVEL,
            current_xp: 0,
            completed_missions: Vec::new(),
            unlocked_badges: Vec::new(),
            username: default_username(),
        }
    }
}

impl UserState {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            ..Self::default()
        }
    }

    pub fn has_completed(&self, mission_id: &str) -> bool {
        self.completed_missions.iter().any(|id| id == mission_id)
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.unlocked_badges.iter().any(|id| id == badge_id)
    }
}

/// Derived view of a mission for a given user. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionStatus {
    Locked,
    Active,
    Completed,
}

impl MissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MissionStatus::Locked => "LOCKED",
            MissionStatus::Active => "ACTIVE",
            MissionStatus::Completed => "COMPLETED",
        }
    }
}
