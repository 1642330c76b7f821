//! Type definitions for Open5e list payloads.
//!
//! Open5e documents are loosely typed: booleans arrive as "yes"/"no", numbers
//! as strings, and most fields may be missing. Anything whose shape varies is
//! kept as a raw `serde_json::Value` and normalised during conversion.

use serde::Deserialize;
use serde_json::Value;

/// One page of an Open5e list endpoint, or a bare array of records.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Open5eDump {
    Page(Open5ePage),
    Records(Vec<Value>),
}

#[derive(Debug, Deserialize)]
pub struct Open5ePage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Damage block shared by spells and weapons.
#[derive(Debug, Default, Deserialize)]
pub struct Open5eDamage {
    #[serde(default)]
    pub damage_type: Option<String>,
    #[serde(default)]
    pub damage_dice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Open5eCost {
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eSpell {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub level: Option<Value>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub casting_time: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub components: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub concentration: Option<Value>,
    #[serde(default)]
    pub ritual: Option<Value>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub higher_level: Option<String>,
    #[serde(default)]
    pub damage: Option<Open5eDamage>,
    #[serde(default)]
    pub save: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
    #[serde(default)]
    pub classes: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eMagicItem {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub requires_attunement: Option<Value>,
    #[serde(default)]
    pub cost: Option<Open5eCost>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eWeapon {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<Open5eCost>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
    #[serde(default)]
    pub damage: Option<Open5eDamage>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub properties: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eArmor {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub cost: Option<Open5eCost>,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
    #[serde(default)]
    pub ac_base: Option<Value>,
    #[serde(default)]
    pub ac_add_dex: Option<Value>,
    #[serde(default)]
    pub ac_cap_dex: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eRace {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub asi: Option<Value>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub speed: Option<Value>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub proficiencies: Option<String>,
    #[serde(default)]
    pub traits: Option<String>,
    #[serde(default)]
    pub subraces: Option<Value>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eClass {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub hit_die: Option<Value>,
    #[serde(default)]
    pub prof_armor: Option<String>,
    #[serde(default)]
    pub prof_weapons: Option<String>,
    #[serde(default)]
    pub prof_tools: Option<String>,
    #[serde(default)]
    pub prof_saving_throws: Option<String>,
    #[serde(default)]
    pub prof_skills: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub spellcasting_ability: Option<String>,
    #[serde(default)]
    pub subtypes_name: Option<String>,
    #[serde(default)]
    pub archetypes: Option<Value>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Open5eBackground {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub skill_proficiencies: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub equipment: Option<String>,
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub feature_desc: Option<String>,
    #[serde(default, rename = "document__slug")]
    pub document_slug: Option<String>,
}
