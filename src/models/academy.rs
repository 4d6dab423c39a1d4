//! Academy domain model: roles, branches, and person records

use serde::{Deserialize, Serialize};

/// Role held by a member of the Magaambya
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Initiate,
    Attendant,
    Conversant,
    #[serde(rename = "Lore-Speaker")]
    LoreSpeaker,
    #[serde(rename = "Learned One")]
    LearnedOne,
    Service,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Initiate,
        Role::Attendant,
        Role::Conversant,
        Role::LoreSpeaker,
        Role::LearnedOne,
        Role::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Initiate => "Initiate",
            Role::Attendant => "Attendant",
            Role::Conversant => "Conversant",
            Role::LoreSpeaker => "Lore-Speaker",
            Role::LearnedOne => "Learned One",
            Role::Service => "Service",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "initiate" => Some(Role::Initiate),
            "attendant" => Some(Role::Attendant),
            "conversant" => Some(Role::Conversant),
            "lore-speaker" => Some(Role::LoreSpeaker),
            "learned one" => Some(Role::LearnedOne),
            "service" => Some(Role::Service),
            _ => None,
        }
    }

    /// Comma-separated listing for help and validation replies
    pub fn list() -> String {
        Self::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Branch of the Magaambya a member belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "Cascade Bearers")]
    CascadeBearers,
    #[serde(rename = "Emerald Boughs")]
    EmeraldBoughs,
    #[serde(rename = "Rain-Scribes")]
    RainScribes,
    #[serde(rename = "Tempest-Sun Mages")]
    TempestSunMages,
    Uzunjati,
    Magaambya,
}

impl Branch {
    pub const ALL: [Branch; 6] = [
        Branch::CascadeBearers,
        Branch::EmeraldBoughs,
        Branch::RainScribes,
        Branch::TempestSunMages,
        Branch::Uzunjati,
        Branch::Magaambya,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::CascadeBearers => "Cascade Bearers",
            Branch::EmeraldBoughs => "Emerald Boughs",
            Branch::RainScribes => "Rain-Scribes",
            Branch::TempestSunMages => "Tempest-Sun Mages",
            Branch::Uzunjati => "Uzunjati",
            Branch::Magaambya => "Magaambya",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cascade bearers" => Some(Branch::CascadeBearers),
            "emerald boughs" => Some(Branch::EmeraldBoughs),
            "rain-scribes" => Some(Branch::RainScribes),
            "tempest-sun mages" => Some(Branch::TempestSunMages),
            "uzunjati" => Some(Branch::Uzunjati),
            "magaambya" => Some(Branch::Magaambya),
            _ => None,
        }
    }

    pub fn list() -> String {
        Self::ALL
            .iter()
            .map(|b| b.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered member of the academy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub role: Role,
    pub branch: Branch,
}
