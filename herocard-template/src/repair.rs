//! Loosely-typed JSON -> `HeroData`.
//!
//! Every reader takes the parent object, the parent's path and a key, and
//! returns a well-typed value: the stored one when its JSON type is right,
//! otherwise the documented default. Each substitution is recorded.

use std::fmt;

use herocard_core::{
    Ability, AdditionalPage, Attack, CropRect, HeroData, HeroInfoSettings, Hotkeys, Passive,
    PortraitSettings, StatLine, TeamUpAbility, TeamUpAnchor, Ultimate, DEFAULT_BANNER_COLOR,
    DEFAULT_DIFFICULTY, DEFAULT_ROLE,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::codec::TemplateDisplaySettings;

type Object = Map<String, Value>;

/// What was wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepairKind {
    /// Required field absent; default substituted.
    Missing,
    /// Field present with the wrong JSON type; default substituted.
    WrongType,
    /// List entry that could not be read at all; removed.
    DroppedEntry,
}

/// One substitution made while decoding, e.g. `heroData.attacks[2].name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repair {
    pub path: String,
    pub kind: RepairKind,
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RepairKind::Missing => write!(f, "{}: missing, default used", self.path),
            RepairKind::WrongType => write!(f, "{}: wrong type, default used", self.path),
            RepairKind::DroppedEntry => write!(f, "{}: unreadable entry dropped", self.path),
        }
    }
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Collects repairs while reading one document.
#[derive(Debug, Default)]
pub(crate) struct Repairer {
    repairs: Vec<Repair>,
}

impl Repairer {
    pub(crate) fn record(&mut self, path: impl Into<String>, kind: RepairKind) {
        let path = path.into();
        tracing::warn!(path = %path, kind = ?kind, "template field repaired");
        self.repairs.push(Repair { path, kind });
    }

    /// Record `Missing` for an absent/null value, `WrongType` otherwise.
    pub(crate) fn record_presence(&mut self, path: impl Into<String>, value: Option<&Value>) {
        match value {
            None | Some(Value::Null) => self.record(path, RepairKind::Missing),
            Some(_) => self.record(path, RepairKind::WrongType),
        }
    }

    pub(crate) fn finish(self) -> Vec<Repair> {
        self.repairs
    }

    fn string(&mut self, obj: &Object, parent: &str, key: &str, default: &str) -> String {
        match obj.get(key) {
            Some(Value::String(s)) => s.clone(),
            other => {
                self.record_presence(join(parent, key), other);
                default.to_string()
            }
        }
    }

    /// Absent and `null` both mean "not set" for optional strings.
    pub(crate) fn optional_string(&mut self, obj: &Object, parent: &str, key: &str) -> Option<String> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.record(join(parent, key), RepairKind::WrongType);
                None
            }
        }
    }

    fn number(&mut self, obj: &Object, parent: &str, key: &str, default: f64) -> f64 {
        match obj.get(key).and_then(Value::as_f64) {
            Some(n) => n,
            None => {
                self.record_presence(join(parent, key), obj.get(key));
                default
            }
        }
    }

    fn boolean(&mut self, obj: &Object, parent: &str, key: &str, default: bool) -> bool {
        match obj.get(key) {
            Some(Value::Bool(b)) => *b,
            other => {
                self.record_presence(join(parent, key), other);
                default
            }
        }
    }

    fn object<'a>(&mut self, obj: &'a Object, parent: &str, key: &str) -> Option<&'a Object> {
        match obj.get(key) {
            Some(Value::Object(inner)) => Some(inner),
            other => {
                self.record_presence(join(parent, key), other);
                None
            }
        }
    }

    /// Read a list, dropping entries `read` cannot make sense of.
    fn list<T>(
        &mut self,
        obj: &Object,
        parent: &str,
        key: &str,
        mut read: impl FnMut(&mut Self, &Object, &str) -> T,
    ) -> Vec<T> {
        let path = join(parent, key);
        let Some(Value::Array(entries)) = obj.get(key) else {
            self.record_presence(path, obj.get(key));
            return Vec::new();
        };

        let mut items = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let entry_path = format!("{}[{}]", path, i);
            match entry {
                Value::Object(inner) => items.push(read(self, inner, &entry_path)),
                _ => self.record(entry_path, RepairKind::DroppedEntry),
            }
        }
        items
    }

    fn string_list(&mut self, obj: &Object, parent: &str, key: &str) -> Vec<String> {
        let path = join(parent, key);
        let Some(Value::Array(entries)) = obj.get(key) else {
            self.record_presence(path, obj.get(key));
            return Vec::new();
        };

        entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| match entry {
                Value::String(s) => Some(s.clone()),
                _ => {
                    self.record(format!("{}[{}]", path, i), RepairKind::DroppedEntry);
                    None
                }
            })
            .collect()
    }

    fn hotkeys(&mut self, obj: &Object, parent: &str, default: &Hotkeys) -> Hotkeys {
        let path = join(parent, "hotkeys");
        match self.object(obj, parent, "hotkeys") {
            Some(keys) => Hotkeys {
                pc: self.string(keys, &path, "pc", &default.pc),
                console: self.string(keys, &path, "console", &default.console),
            },
            None => default.clone(),
        }
    }

    fn stats(&mut self, obj: &Object, parent: &str) -> Vec<StatLine> {
        self.list(obj, parent, "stats", |r, stat, path| StatLine {
            label: r.string(stat, path, "label", ""),
            value: r.string(stat, path, "value", ""),
        })
    }

    fn attack(&mut self, obj: &Object, path: &str) -> Attack {
        Attack {
            id: self.string(obj, path, "id", ""),
            name: self.string(obj, path, "name", ""),
            kind: self.string(obj, path, "kind", ""),
            description: self.string(obj, path, "description", ""),
            hotkeys: self.hotkeys(obj, path, &Hotkeys::default()),
            stats: self.stats(obj, path),
        }
    }

    fn ability(&mut self, obj: &Object, path: &str) -> Ability {
        Ability {
            id: self.string(obj, path, "id", ""),
            name: self.string(obj, path, "name", ""),
            description: self.string(obj, path, "description", ""),
            icon: self.optional_string(obj, path, "icon"),
            hotkeys: self.hotkeys(obj, path, &Hotkeys::default()),
            stats: self.stats(obj, path),
        }
    }

    fn passive(&mut self, obj: &Object, path: &str) -> Passive {
        Passive {
            id: self.string(obj, path, "id", ""),
            name: self.string(obj, path, "name", ""),
            description: self.string(obj, path, "description", ""),
            icon: self.optional_string(obj, path, "icon"),
            stats: self.stats(obj, path),
        }
    }

    fn team_up(&mut self, obj: &Object, path: &str) -> TeamUpAbility {
        TeamUpAbility {
            id: self.string(obj, path, "id", ""),
            name: self.string(obj, path, "name", ""),
            description: self.string(obj, path, "description", ""),
            partners: self.string_list(obj, path, "partners"),
            icon: self.optional_string(obj, path, "icon"),
            hotkeys: self.hotkeys(obj, path, &Hotkeys::default()),
            stats: self.stats(obj, path),
        }
    }

    fn page(&mut self, obj: &Object, path: &str) -> AdditionalPage {
        AdditionalPage {
            id: self.string(obj, path, "id", ""),
            title: self.string(obj, path, "title", ""),
            body: self.string(obj, path, "body", ""),
            image: self.optional_string(obj, path, "image"),
        }
    }

    fn ultimate(&mut self, hero: &Object, parent: &str) -> Ultimate {
        let default = Ultimate::default();
        let path = join(parent, "ultimate");
        let Some(obj) = self.object(hero, parent, "ultimate") else {
            return default;
        };

        Ultimate {
            id: self.string(obj, &path, "id", &default.id),
            name: self.string(obj, &path, "name", &default.name),
            description: self.string(obj, &path, "description", &default.description),
            icon: self.optional_string(obj, &path, "icon"),
            hotkeys: self.hotkeys(obj, &path, &default.hotkeys),
            stats: self.stats(obj, &path),
        }
    }

    fn team_up_anchor(&mut self, hero: &Object, parent: &str) -> Option<TeamUpAnchor> {
        let path = join(parent, "teamUpAnchor");
        match hero.get("teamUpAnchor") {
            None | Some(Value::Null) => None,
            Some(Value::Object(obj)) => Some(TeamUpAnchor {
                hero_name: self.string(obj, &path, "heroName", ""),
                bonus_description: self.string(obj, &path, "bonusDescription", ""),
                icon: self.optional_string(obj, &path, "icon"),
            }),
            Some(_) => {
                self.record(path, RepairKind::WrongType);
                None
            }
        }
    }

    fn portrait_settings(&mut self, hero: &Object, parent: &str) -> PortraitSettings {
        let default = PortraitSettings::default();
        let path = join(parent, "portraitSettings");
        let Some(obj) = self.object(hero, parent, "portraitSettings") else {
            return default;
        };

        let crop_path = join(&path, "crop");
        let crop = match self.object(obj, &path, "crop") {
            Some(crop) => CropRect {
                x: self.number(crop, &crop_path, "x", default.crop.x),
                y: self.number(crop, &crop_path, "y", default.crop.y),
                width: self.number(crop, &crop_path, "width", default.crop.width),
                height: self.number(crop, &crop_path, "height", default.crop.height),
            },
            None => default.crop,
        };

        PortraitSettings {
            scale: self.number(obj, &path, "scale", default.scale),
            offset_x: self.number(obj, &path, "offsetX", default.offset_x),
            offset_y: self.number(obj, &path, "offsetY", default.offset_y),
            crop,
        }
    }

    fn hero_info_settings(&mut self, hero: &Object, parent: &str) -> HeroInfoSettings {
        let default = HeroInfoSettings::default();
        let path = join(parent, "heroInfoSettings");
        let Some(obj) = self.object(hero, parent, "heroInfoSettings") else {
            return default;
        };

        HeroInfoSettings {
            show_role: self.boolean(obj, &path, "showRole", default.show_role),
            show_difficulty: self.boolean(obj, &path, "showDifficulty", default.show_difficulty),
            name_font_size: self.number(obj, &path, "nameFontSize", default.name_font_size),
            alignment: self.string(obj, &path, "alignment", &default.alignment),
        }
    }

    /// Read `heroData`. The caller has already checked that `name` is a string.
    pub(crate) fn hero(&mut self, hero: &Object) -> HeroData {
        let p = "heroData";
        HeroData {
            name: self.string(hero, p, "name", ""),
            role: self.string(hero, p, "role", DEFAULT_ROLE),
            difficulty: self.number(hero, p, "difficulty", DEFAULT_DIFFICULTY),
            banner_color: self.string(hero, p, "bannerColor", DEFAULT_BANNER_COLOR),
            portrait_image: self.optional_string(hero, p, "portraitImage"),
            portrait_settings: self.portrait_settings(hero, p),
            hero_info_settings: self.hero_info_settings(hero, p),
            attacks: self.list(hero, p, "attacks", Self::attack),
            abilities: self.list(hero, p, "abilities", Self::ability),
            passives: self.list(hero, p, "passives", Self::passive),
            ultimate: self.ultimate(hero, p),
            team_up_abilities: self.list(hero, p, "teamUpAbilities", Self::team_up),
            team_up_anchor: self.team_up_anchor(hero, p),
            additional_pages: self.list(hero, p, "additionalPages", Self::page),
        }
    }

    /// Allow-listed display fields; anything else in the object is ignored.
    pub(crate) fn display_settings(&mut self, obj: &Object) -> TemplateDisplaySettings {
        let p = "displaySettings";
        TemplateDisplaySettings {
            theme: self.optional_string(obj, p, "theme"),
            background_color: self.optional_string(obj, p, "backgroundColor"),
            accent_color: self.optional_string(obj, p, "accentColor"),
            show_hotkeys: self.optional_bool(obj, p, "showHotkeys"),
            show_stats: self.optional_bool(obj, p, "showStats"),
            export_scale: self.optional_number(obj, p, "exportScale"),
        }
    }

    fn optional_bool(&mut self, obj: &Object, parent: &str, key: &str) -> Option<bool> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.record(join(parent, key), RepairKind::WrongType);
                None
            }
        }
    }

    fn optional_number(&mut self, obj: &Object, parent: &str, key: &str) -> Option<f64> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(v) => match v.as_f64() {
                Some(n) => Some(n),
                None => {
                    self.record(join(parent, key), RepairKind::WrongType);
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read(value: Value) -> (HeroData, Vec<Repair>) {
        let Value::Object(hero) = value else {
            panic!("test input must be an object");
        };
        let mut r = Repairer::default();
        let data = r.hero(&hero);
        (data, r.finish())
    }

    fn has(repairs: &[Repair], path: &str, kind: RepairKind) -> bool {
        repairs.iter().any(|r| r.path == path && r.kind == kind)
    }

    #[test]
    fn test_minimal_hero_gets_every_default() {
        let (hero, repairs) = read(json!({"name": "Storm"}));

        assert_eq!(hero, HeroData::new("Storm"));
        assert!(has(&repairs, "heroData.attacks", RepairKind::Missing));
        assert!(has(&repairs, "heroData.ultimate", RepairKind::Missing));
        assert!(has(&repairs, "heroData.role", RepairKind::Missing));
        // optional fields are not defects
        assert!(!repairs.iter().any(|r| r.path == "heroData.teamUpAnchor"));
        assert!(!repairs.iter().any(|r| r.path == "heroData.portraitImage"));
    }

    #[test]
    fn test_wrong_typed_scalars_use_defaults() {
        let (hero, repairs) = read(json!({
            "name": "Storm",
            "role": 4,
            "difficulty": "three",
            "bannerColor": false,
        }));

        assert_eq!(hero.role, "Vanguard");
        assert_eq!(hero.difficulty, 1.0);
        assert_eq!(hero.banner_color, "#dc2626");
        assert!(has(&repairs, "heroData.difficulty", RepairKind::WrongType));
    }

    #[test]
    fn test_well_typed_values_pass_through() {
        let (hero, repairs) = read(json!({
            "name": "Storm",
            "role": "Support",
            "difficulty": 99,
            "bannerColor": "not-a-color",
        }));

        assert_eq!(hero.role, "Support");
        assert_eq!(hero.difficulty, 99.0);
        assert_eq!(hero.banner_color, "not-a-color");
        assert!(!repairs.iter().any(|r| r.path == "heroData.difficulty"));
    }

    #[test]
    fn test_any_difficulty_number_passes_through() {
        for (raw, expected) in [
            (json!(3.0), 3.0),
            (json!(2.5), 2.5),
            (json!(-1), -1.0),
            (json!(5_000_000_000u64), 5_000_000_000.0),
        ] {
            let (hero, repairs) = read(json!({"name": "A", "difficulty": raw}));
            assert_eq!(hero.difficulty, expected);
            assert!(!repairs.iter().any(|r| r.path == "heroData.difficulty"));
        }
    }

    #[test]
    fn test_collections_that_are_not_arrays_become_empty() {
        let (hero, repairs) = read(json!({
            "name": "Storm",
            "attacks": "none",
            "abilities": {"0": {}},
            "passives": null,
        }));

        assert!(hero.attacks.is_empty());
        assert!(hero.abilities.is_empty());
        assert!(hero.passives.is_empty());
        assert!(has(&repairs, "heroData.attacks", RepairKind::WrongType));
        assert!(has(&repairs, "heroData.passives", RepairKind::Missing));
    }

    #[test]
    fn test_unreadable_entries_are_dropped() {
        let (hero, repairs) = read(json!({
            "name": "Storm",
            "abilities": [
                {"id": "a1", "name": "Gale", "hotkeys": {"pc": "E", "console": "R1"}},
                "garbage",
                {"id": "a2", "name": 12},
            ],
        }));

        assert_eq!(hero.abilities.len(), 2);
        assert_eq!(hero.abilities[0].hotkeys.pc, "E");
        assert_eq!(hero.abilities[1].id, "a2");
        assert_eq!(hero.abilities[1].name, "");
        assert!(has(&repairs, "heroData.abilities[1]", RepairKind::DroppedEntry));
        assert!(has(&repairs, "heroData.abilities[2].name", RepairKind::WrongType));
    }

    #[test]
    fn test_broken_ultimate_is_replaced() {
        let (hero, _) = read(json!({"name": "Storm", "ultimate": "big boom"}));
        assert_eq!(hero.ultimate, Ultimate::default());

        let (hero, _) = read(json!({"name": "Storm", "ultimate": {"name": "Eye of the Storm"}}));
        assert_eq!(hero.ultimate.name, "Eye of the Storm");
        assert_eq!(hero.ultimate.id, "ultimate");
        assert_eq!(hero.ultimate.hotkeys, Ultimate::default().hotkeys);
    }

    #[test]
    fn test_settings_records() {
        let (hero, repairs) = read(json!({
            "name": "Storm",
            "portraitSettings": [],
            "heroInfoSettings": {"showRole": false, "nameFontSize": "huge"},
        }));

        assert_eq!(hero.portrait_settings, PortraitSettings::default());
        assert!(!hero.hero_info_settings.show_role);
        assert_eq!(hero.hero_info_settings.name_font_size, 64.0);
        assert!(has(&repairs, "heroData.portraitSettings", RepairKind::WrongType));
        assert!(has(
            &repairs,
            "heroData.heroInfoSettings.nameFontSize",
            RepairKind::WrongType
        ));
    }

    #[test]
    fn test_team_up_partners_and_anchor() {
        let (hero, _) = read(json!({
            "name": "Storm",
            "teamUpAbilities": [{"id": "t1", "partners": ["Thor", 3, "Jean"]}],
            "teamUpAnchor": {"heroName": "Thor", "bonusDescription": "+10% damage"},
        }));

        assert_eq!(hero.team_up_abilities[0].partners, ["Thor", "Jean"]);
        let anchor = hero.team_up_anchor.unwrap();
        assert_eq!(anchor.hero_name, "Thor");
        assert_eq!(anchor.icon, None);

        let (hero, _) = read(json!({"name": "Storm", "teamUpAnchor": "Thor"}));
        assert_eq!(hero.team_up_anchor, None);
    }

    #[test]
    fn test_repair_display() {
        let repair = Repair {
            path: "heroData.role".into(),
            kind: RepairKind::WrongType,
        };
        assert_eq!(repair.to_string(), "heroData.role: wrong type, default used");
    }
}
