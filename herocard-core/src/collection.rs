//! Add/remove/reorder operations over the hero's item lists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    new_item_id, Ability, AdditionalPage, Attack, HeroData, Hotkeys, Passive, TeamUpAbility,
};

/// The five list-valued fields of `HeroData`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeroCollection {
    Attacks,
    Abilities,
    Passives,
    TeamUpAbilities,
    AdditionalPages,
}

impl HeroCollection {
    pub const ALL: [HeroCollection; 5] = [
        HeroCollection::Attacks,
        HeroCollection::Abilities,
        HeroCollection::Passives,
        HeroCollection::TeamUpAbilities,
        HeroCollection::AdditionalPages,
    ];

    /// Field name in the JSON template.
    pub fn key(&self) -> &'static str {
        match self {
            HeroCollection::Attacks => "attacks",
            HeroCollection::Abilities => "abilities",
            HeroCollection::Passives => "passives",
            HeroCollection::TeamUpAbilities => "teamUpAbilities",
            HeroCollection::AdditionalPages => "additionalPages",
        }
    }

    /// Prefix for ids of freshly added items.
    fn id_prefix(&self) -> &'static str {
        match self {
            HeroCollection::Attacks => "attack",
            HeroCollection::Abilities => "ability",
            HeroCollection::Passives => "passive",
            HeroCollection::TeamUpAbilities => "teamup",
            HeroCollection::AdditionalPages => "page",
        }
    }
}

/// Something stored in one of the hero's lists.
pub trait CollectionItem {
    fn id(&self) -> &str;

    /// Placeholder item shown right after the user presses "add".
    fn blank(id: String) -> Self;
}

impl CollectionItem for Attack {
    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            name: "New Attack".into(),
            kind: "Primary Attack".into(),
            hotkeys: Hotkeys::new("LMB", "R2"),
            ..Default::default()
        }
    }
}

impl CollectionItem for Ability {
    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            name: "New Ability".into(),
            hotkeys: Hotkeys::new("E", "R1"),
            ..Default::default()
        }
    }
}

impl CollectionItem for Passive {
    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            name: "New Passive".into(),
            ..Default::default()
        }
    }
}

impl CollectionItem for TeamUpAbility {
    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            name: "New Team-Up".into(),
            hotkeys: Hotkeys::new("C", "D-Pad Up"),
            ..Default::default()
        }
    }
}

impl CollectionItem for AdditionalPage {
    fn id(&self) -> &str {
        &self.id
    }

    fn blank(id: String) -> Self {
        Self {
            id,
            title: "New Page".into(),
            ..Default::default()
        }
    }
}

fn push_blank<I: CollectionItem>(items: &mut Vec<I>, id: String) {
    items.push(I::blank(id));
}

fn remove_by_id<I: CollectionItem>(items: &mut Vec<I>, id: &str) -> bool {
    match items.iter().position(|item| item.id() == id) {
        Some(index) => {
            items.remove(index);
            true
        }
        None => false,
    }
}

fn move_by_id<I: CollectionItem>(items: &mut Vec<I>, id: &str, to: usize) -> bool {
    let Some(from) = items.iter().position(|item| item.id() == id) else {
        return false;
    };
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    true
}

impl HeroData {
    /// Number of items in a collection.
    pub fn item_count(&self, collection: HeroCollection) -> usize {
        match collection {
            HeroCollection::Attacks => self.attacks.len(),
            HeroCollection::Abilities => self.abilities.len(),
            HeroCollection::Passives => self.passives.len(),
            HeroCollection::TeamUpAbilities => self.team_up_abilities.len(),
            HeroCollection::AdditionalPages => self.additional_pages.len(),
        }
    }

    /// Append a placeholder item. Returns the new item's id.
    pub fn add_item(&mut self, collection: HeroCollection) -> String {
        let id = new_item_id(collection.id_prefix());
        match collection {
            HeroCollection::Attacks => push_blank(&mut self.attacks, id.clone()),
            HeroCollection::Abilities => push_blank(&mut self.abilities, id.clone()),
            HeroCollection::Passives => push_blank(&mut self.passives, id.clone()),
            HeroCollection::TeamUpAbilities => push_blank(&mut self.team_up_abilities, id.clone()),
            HeroCollection::AdditionalPages => push_blank(&mut self.additional_pages, id.clone()),
        }
        tracing::debug!(collection = collection.key(), id = %id, "item added");
        id
    }

    pub fn remove_item(&mut self, collection: HeroCollection, id: &str) -> Result<(), ModelError> {
        let removed = match collection {
            HeroCollection::Attacks => remove_by_id(&mut self.attacks, id),
            HeroCollection::Abilities => remove_by_id(&mut self.abilities, id),
            HeroCollection::Passives => remove_by_id(&mut self.passives, id),
            HeroCollection::TeamUpAbilities => remove_by_id(&mut self.team_up_abilities, id),
            HeroCollection::AdditionalPages => remove_by_id(&mut self.additional_pages, id),
        };

        if !removed {
            tracing::warn!(collection = collection.key(), id = %id, "remove of unknown item");
            return Err(ModelError::UnknownItem {
                collection: collection.key(),
                id: id.to_string(),
            });
        }
        tracing::debug!(collection = collection.key(), id = %id, "item removed");
        Ok(())
    }

    /// Move an item to position `to` (clamped to the end of the list).
    pub fn move_item(
        &mut self,
        collection: HeroCollection,
        id: &str,
        to: usize,
    ) -> Result<(), ModelError> {
        let moved = match collection {
            HeroCollection::Attacks => move_by_id(&mut self.attacks, id, to),
            HeroCollection::Abilities => move_by_id(&mut self.abilities, id, to),
            HeroCollection::Passives => move_by_id(&mut self.passives, id, to),
            HeroCollection::TeamUpAbilities => move_by_id(&mut self.team_up_abilities, id, to),
            HeroCollection::AdditionalPages => move_by_id(&mut self.additional_pages, id, to),
        };

        if !moved {
            return Err(ModelError::UnknownItem {
                collection: collection.key(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// Model-level errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("no item '{id}' in {collection}")]
    UnknownItem {
        collection: &'static str,
        id: String,
    },
}
