//! herocard-core: the data model behind a hero ability page.
//!
//! Design rules:
//! - Everything the page renders lives in `HeroData`; the editor never keeps side tables.
//! - Wire names are camelCase so templates stay readable next to the web tooling.
//! - Defaults are documented constants; the template importer substitutes them for broken fields.
//! - All structs are serializable for template export/import.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role used when a hero has none (or an unreadable one).
pub const DEFAULT_ROLE: &str = "Vanguard";

/// Difficulty used when a hero has none. Rendered as filled stars.
pub const DEFAULT_DIFFICULTY: f64 = 1.0;

/// Banner color used when a hero has none.
pub const DEFAULT_BANNER_COLOR: &str = "#dc2626";

/// Roles the page has artwork for. Other strings are kept verbatim.
pub const KNOWN_ROLES: [&str; 3] = ["Vanguard", "Duelist", "Strategist"];

/// Build a fresh item id, e.g. `ability-6f1c...`.
pub fn new_item_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// PC and console key labels shown next to an ability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hotkeys {
    pub pc: String,
    pub console: String,
}

impl Hotkeys {
    pub fn new(pc: impl Into<String>, console: impl Into<String>) -> Self {
        Self {
            pc: pc.into(),
            console: console.into(),
        }
    }
}

/// One "label: value" row under an ability (damage, cooldown, range...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

/// Normal attack (primary fire, melee, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    pub id: String,
    pub name: String,
    pub kind: String, // "Primary Attack", "Melee", ...
    pub description: String,
    pub hotkeys: Hotkeys,
    pub stats: Vec<StatLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>, // data URL
    pub hotkeys: Hotkeys,
    pub stats: Vec<StatLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passive {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub stats: Vec<StatLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ultimate {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub hotkeys: Hotkeys,
    pub stats: Vec<StatLine>,
}

impl Default for Ultimate {
    fn default() -> Self {
        Self {
            id: "ultimate".into(),
            name: "Ultimate".into(),
            description: "Describe the ultimate ability.".into(),
            icon: None,
            hotkeys: Hotkeys::new("Q", "L1 + R1"),
            stats: Vec::new(),
        }
    }
}

/// Ability unlocked when the hero is fielded with specific partners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpAbility {
    pub id: String,
    pub name: String,
    pub description: String,
    pub partners: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub hotkeys: Hotkeys,
    pub stats: Vec<StatLine>,
}

/// The hero acts as the anchor of a team-up and grants a bonus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamUpAnchor {
    pub hero_name: String,
    pub bonus_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Extra free-form page appended after the ability card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalPage {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Normalized crop rectangle over the portrait image (0..1 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for CropRect {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortraitSettings {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub crop: CropRect,
}

impl Default for PortraitSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            crop: CropRect::default(),
        }
    }
}

/// How the name/role/difficulty header is laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroInfoSettings {
    pub show_role: bool,
    pub show_difficulty: bool,
    pub name_font_size: f64,
    pub alignment: String, // "left" | "center" | "right"
}

impl Default for HeroInfoSettings {
    fn default() -> Self {
        Self {
            show_role: true,
            show_difficulty: true,
            name_font_size: 64.0,
            alignment: "left".into(),
        }
    }
}

/// Everything shown on the hero page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroData {
    pub name: String,
    pub role: String,
    /// Filled stars. Any number is kept as imported.
    pub difficulty: f64,
    pub banner_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait_image: Option<String>,
    pub portrait_settings: PortraitSettings,
    pub hero_info_settings: HeroInfoSettings,
    pub attacks: Vec<Attack>,
    pub abilities: Vec<Ability>,
    pub passives: Vec<Passive>,
    pub ultimate: Ultimate,
    pub team_up_abilities: Vec<TeamUpAbility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_up_anchor: Option<TeamUpAnchor>,
    pub additional_pages: Vec<AdditionalPage>,
}

impl Default for HeroData {
    fn default() -> Self {
        Self::new("")
    }
}

impl HeroData {
    /// Blank hero with documented defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: DEFAULT_ROLE.into(),
            difficulty: DEFAULT_DIFFICULTY,
            banner_color: DEFAULT_BANNER_COLOR.into(),
            portrait_image: None,
            portrait_settings: PortraitSettings::default(),
            hero_info_settings: HeroInfoSettings::default(),
            attacks: vec![],
            abilities: vec![],
            passives: vec![],
            ultimate: Ultimate::default(),
            team_up_abilities: vec![],
            team_up_anchor: None,
            additional_pages: vec![],
        }
    }

    /// True when the role has dedicated artwork.
    pub fn has_known_role(&self) -> bool {
        KNOWN_ROLES.contains(&self.role.as_str())
    }
}

pub mod collection;
pub mod display;

pub use collection::{CollectionItem, HeroCollection, ModelError};
pub use display::DisplaySettings;
