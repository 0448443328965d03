//! Template envelope and the encode/decode pair.
//!
//! Decoding is split in two: this module enforces the fatal checks and the
//! envelope fields, `repair` turns the loosely-typed hero JSON into `HeroData`.

use chrono::{DateTime, Utc};
use herocard_core::{DisplaySettings, HeroData};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::repair::{Repair, RepairKind, Repairer};

/// Schema version written by `encode`.
pub const TEMPLATE_VERSION: u32 = 1;

/// Envelope name used when the hero has no name yet.
pub const UNTITLED_HERO: &str = "Untitled Hero";

/// The display settings a template carries. Every field is optional so older
/// or hand-trimmed files only override what they mention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDisplaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_hotkeys: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_stats: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_scale: Option<f64>,
}

impl TemplateDisplaySettings {
    /// Take the exportable subset of the live settings.
    pub fn from_settings(settings: &DisplaySettings) -> Self {
        Self {
            theme: Some(settings.theme.clone()),
            background_color: Some(settings.background_color.clone()),
            accent_color: Some(settings.accent_color.clone()),
            show_hotkeys: Some(settings.show_hotkeys),
            show_stats: Some(settings.show_stats),
            export_scale: Some(settings.export_scale),
        }
    }

    /// Overwrite the fields this template mentions.
    pub fn apply_to(&self, settings: &mut DisplaySettings) {
        if let Some(theme) = &self.theme {
            settings.theme = theme.clone();
        }
        if let Some(color) = &self.background_color {
            settings.background_color = color.clone();
        }
        if let Some(color) = &self.accent_color {
            settings.accent_color = color.clone();
        }
        if let Some(show) = self.show_hotkeys {
            settings.show_hotkeys = show;
        }
        if let Some(show) = self.show_stats {
            settings.show_stats = show;
        }
        if let Some(scale) = self.export_scale {
            settings.export_scale = scale;
        }
    }
}

/// A shareable snapshot of a hero page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    pub hero_data: HeroData,
    pub display_settings: TemplateDisplaySettings,
    /// Base64 preview image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Template {
    /// Snapshot the live state at `exported_at`.
    pub fn from_state(
        hero: &HeroData,
        display: &DisplaySettings,
        exported_at: DateTime<Utc>,
    ) -> Self {
        let name = if hero.name.is_empty() {
            UNTITLED_HERO.to_string()
        } else {
            hero.name.clone()
        };

        Self {
            version: TEMPLATE_VERSION,
            name,
            exported_at: Some(exported_at),
            hero_data: hero.clone(),
            display_settings: TemplateDisplaySettings::from_settings(display),
            thumbnail: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Pretty JSON, the on-disk format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// `base` with this template's display overrides applied.
    pub fn display_settings_over(&self, base: &DisplaySettings) -> DisplaySettings {
        let mut settings = base.clone();
        self.display_settings.apply_to(&mut settings);
        settings
    }
}

/// Encode the live state as template JSON, stamped with the current time.
pub fn encode(hero: &HeroData, display: &DisplaySettings) -> serde_json::Result<String> {
    encode_at(hero, display, Utc::now())
}

/// Same as `encode` with an explicit export time.
pub fn encode_at(
    hero: &HeroData,
    display: &DisplaySettings,
    exported_at: DateTime<Utc>,
) -> serde_json::Result<String> {
    let template = Template::from_state(hero, display, exported_at);
    let json = template.to_json()?;
    tracing::info!(
        name = %template.name,
        bytes = json.len(),
        "template encoded"
    );
    Ok(json)
}

/// Decode template text, repairing what can be repaired.
pub fn decode(text: &str) -> Result<Template, FormatError> {
    decode_with_report(text).map(|(template, _)| template)
}

/// Decode template text and report every repair that was applied.
pub fn decode_with_report(text: &str) -> Result<(Template, Vec<Repair>), FormatError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        tracing::error!(error = %e, "template is not valid JSON");
        FormatError::InvalidJson(e)
    })?;
    decode_value(value)
}

/// Decode an already-parsed JSON value.
pub fn decode_value(value: Value) -> Result<(Template, Vec<Repair>), FormatError> {
    let Value::Object(root) = value else {
        tracing::error!("template root is not an object");
        return Err(FormatError::InvalidFormat);
    };

    let mut repairer = Repairer::default();

    let version = match root.get("version") {
        Some(v) if v.is_number() => match v.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => n,
            None => {
                repairer.record("version", RepairKind::WrongType);
                TEMPLATE_VERSION
            }
        },
        Some(_) => {
            repairer.record("version", RepairKind::WrongType);
            TEMPLATE_VERSION
        }
        None => {
            // Unversioned files predate the envelope version field.
            repairer.record("version", RepairKind::Missing);
            TEMPLATE_VERSION
        }
    };

    let root = migrate(root, version);

    let hero = match root.get("heroData") {
        Some(Value::Object(hero)) => hero,
        _ => {
            tracing::error!("template has no heroData object");
            return Err(FormatError::MissingHeroData);
        }
    };
    if !matches!(hero.get("name"), Some(Value::String(_))) {
        tracing::error!("template heroData has no name");
        return Err(FormatError::MissingHeroName);
    }

    let hero_data = repairer.hero(hero);

    let name = match root.get("name") {
        Some(Value::String(name)) => name.clone(),
        other => {
            repairer.record_presence("name", other);
            if hero_data.name.is_empty() {
                UNTITLED_HERO.to_string()
            } else {
                hero_data.name.clone()
            }
        }
    };

    let exported_at = match root.get("exportedAt") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => Some(at.with_timezone(&Utc)),
            Err(_) => {
                repairer.record("exportedAt", RepairKind::WrongType);
                None
            }
        },
        Some(_) => {
            repairer.record("exportedAt", RepairKind::WrongType);
            None
        }
    };

    let display_settings = match root.get("displaySettings") {
        None | Some(Value::Null) => TemplateDisplaySettings::default(),
        Some(Value::Object(display)) => repairer.display_settings(display),
        Some(_) => {
            repairer.record("displaySettings", RepairKind::WrongType);
            TemplateDisplaySettings::default()
        }
    };

    let thumbnail = repairer.optional_string(&root, "", "thumbnail");

    let repairs = repairer.finish();
    tracing::info!(
        name = %name,
        version,
        repairs = repairs.len(),
        "template decoded"
    );

    Ok((
        Template {
            version,
            name,
            exported_at,
            hero_data,
            display_settings,
            thumbnail,
        },
        repairs,
    ))
}

/// Bring an older document up to the current layout. Version 1 is the only
/// layout so far.
fn migrate(root: Map<String, Value>, version: u32) -> Map<String, Value> {
    match version {
        TEMPLATE_VERSION => root,
        newer if newer > TEMPLATE_VERSION => {
            tracing::warn!(
                version = newer,
                supported = TEMPLATE_VERSION,
                "template is newer than this build, reading it as the current version"
            );
            root
        }
        older => {
            tracing::debug!(version = older, "no migration registered for version");
            root
        }
    }
}

/// Fatal template defects. Nothing is applied when one of these is returned.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("invalid template format")]
    InvalidFormat,

    #[error("missing hero data")]
    MissingHeroData,

    #[error("missing hero name")]
    MissingHeroName,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use herocard_core::HeroCollection;
    use serde_json::json;

    fn sample_hero() -> HeroData {
        let mut hero = HeroData::new("Storm");
        hero.role = "Strategist".into();
        hero.difficulty = 3.0;
        let id = hero.add_item(HeroCollection::Abilities);
        hero.abilities[0].description = "Summons a gale.".into();
        hero.abilities[0].icon = Some("data:image/png;base64,AAAA".into());
        hero.move_item(HeroCollection::Abilities, &id, 0).unwrap();
        hero.add_item(HeroCollection::Attacks);
        hero.portrait_settings.offset_x = -12.5;
        hero
    }

    #[test]
    fn test_encode_envelope() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let json = encode_at(&sample_hero(), &DisplaySettings::default(), at).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["name"], "Storm");
        assert_eq!(value["exportedAt"], "2025-03-01T12:00:00Z");
        assert_eq!(value["heroData"]["difficulty"], 3.0);
        // pretty printed
        assert!(json.contains("\n  \"version\""));
    }

    #[test]
    fn test_encode_excludes_transient_display_fields() {
        let display = DisplaySettings {
            show_crop_guides: true,
            show_safe_area: true,
            ..Default::default()
        };
        let json = encode(&sample_hero(), &display).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let settings = value["displaySettings"].as_object().unwrap();
        assert!(settings.contains_key("showHotkeys"));
        assert!(settings.contains_key("exportScale"));
        assert!(!settings.contains_key("showCropGuides"));
        assert!(!settings.contains_key("showSafeArea"));
    }

    #[test]
    fn test_untitled_name_fallback() {
        let json = encode(&HeroData::new(""), &DisplaySettings::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], UNTITLED_HERO);
    }

    #[test]
    fn test_roundtrip_preserves_hero() {
        let hero = sample_hero();
        let display = DisplaySettings {
            show_stats: false,
            ..Default::default()
        };
        let json = encode(&hero, &display).unwrap();
        let (template, repairs) = decode_with_report(&json).unwrap();

        assert_eq!(template.hero_data, hero);
        assert!(repairs.is_empty(), "unexpected repairs: {:?}", repairs);
        assert_eq!(template.display_settings.show_stats, Some(false));
    }

    #[test]
    fn test_thumbnail_survives_roundtrip() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let json = Template::from_state(&sample_hero(), &DisplaySettings::default(), at)
            .with_thumbnail("iVBORw0KGgo=")
            .to_json()
            .unwrap();
        let template = decode(&json).unwrap();
        assert_eq!(template.thumbnail.as_deref(), Some("iVBORw0KGgo="));
        assert_eq!(template.exported_at, Some(at));
    }

    #[test]
    fn test_fatal_defects() {
        assert!(matches!(decode("not json"), Err(FormatError::InvalidJson(_))));
        assert!(matches!(decode("[1, 2]"), Err(FormatError::InvalidFormat)));
        assert!(matches!(decode("\"hero\""), Err(FormatError::InvalidFormat)));
        assert!(matches!(decode("{}"), Err(FormatError::MissingHeroData)));
        assert!(matches!(
            decode(r#"{"heroData": []}"#),
            Err(FormatError::MissingHeroData)
        ));
        assert!(matches!(
            decode(r#"{"heroData": {"role": "Duelist"}}"#),
            Err(FormatError::MissingHeroName)
        ));
        assert!(matches!(
            decode(r#"{"heroData": {"name": 7}}"#),
            Err(FormatError::MissingHeroName)
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(decode("nope").unwrap_err().to_string(), "invalid JSON");
        assert_eq!(
            FormatError::InvalidFormat.to_string(),
            "invalid template format"
        );
        assert_eq!(decode("{}").unwrap_err().to_string(), "missing hero data");
        assert_eq!(
            FormatError::MissingHeroName.to_string(),
            "missing hero name"
        );
    }

    #[test]
    fn test_version_coercion() {
        let template = decode(r#"{"heroData": {"name": "A"}}"#).unwrap();
        assert_eq!(template.version, 1);

        let template = decode(r#"{"version": "two", "heroData": {"name": "A"}}"#).unwrap();
        assert_eq!(template.version, 1);

        // newer versions are read as-is
        let template = decode(r#"{"version": 4, "heroData": {"name": "A"}}"#).unwrap();
        assert_eq!(template.version, 4);
    }

    #[test]
    fn test_envelope_name_falls_back_to_hero() {
        let template = decode(r#"{"heroData": {"name": "Storm"}}"#).unwrap();
        assert_eq!(template.name, "Storm");

        let template = decode(r#"{"name": 5, "heroData": {"name": ""}}"#).unwrap();
        assert_eq!(template.name, UNTITLED_HERO);
    }

    #[test]
    fn test_partial_display_settings() {
        let value = json!({
            "heroData": {"name": "Storm"},
            "displaySettings": {"theme": "light", "showStats": "yes", "showCropGuides": true}
        });
        let (template, repairs) = decode_value(value).unwrap();

        assert_eq!(template.display_settings.theme.as_deref(), Some("light"));
        assert_eq!(template.display_settings.show_stats, None);
        assert!(repairs
            .iter()
            .any(|r| r.path == "displaySettings.showStats" && r.kind == RepairKind::WrongType));

        let applied = template.display_settings_over(&DisplaySettings::default());
        assert_eq!(applied.theme, "light");
        assert!(applied.show_stats);
        assert!(!applied.show_crop_guides);
    }

    #[test]
    fn test_bad_timestamp_is_dropped() {
        let template =
            decode(r#"{"exportedAt": "yesterday", "heroData": {"name": "Storm"}}"#).unwrap();
        assert_eq!(template.exported_at, None);
    }
}
