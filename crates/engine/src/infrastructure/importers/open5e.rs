//! Open5e record conversion.
//!
//! Turns raw Open5e list records into [`ReferenceRow`]s for the reference
//! tables. Each feed has its own column mapping; values Open5e serves in
//! inconsistent shapes are normalised here.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::open5e_types::*;
use crate::infrastructure::ports::{ReferenceFeed, ReferenceRow};

/// Armor with no dexterity cap is stored with this sentinel.
const UNCAPPED_DEX_BONUS: i64 = 999;

/// Why a raw record could not become a reference row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("record has no {0}")]
    MissingField(&'static str),
    #[error("record is malformed: {0}")]
    Malformed(String),
}

/// Convert one raw record from `feed` into a reference row.
pub fn transform(feed: ReferenceFeed, record: Value) -> Result<ReferenceRow, SkipReason> {
    match feed {
        ReferenceFeed::Spells => spell_row(decode(record)?),
        ReferenceFeed::MagicItems => magic_item_row(decode(record)?),
        ReferenceFeed::Weapons => weapon_row(decode(record)?),
        ReferenceFeed::Armor => armor_row(decode(record)?),
        ReferenceFeed::Races => race_row(decode(record)?),
        ReferenceFeed::Classes => class_row(decode(record)?),
        ReferenceFeed::Backgrounds => background_row(decode(record)?),
    }
}

fn decode<T: DeserializeOwned>(record: Value) -> Result<T, SkipReason> {
    serde_json::from_value(record).map_err(|e| SkipReason::Malformed(e.to_string()))
}

fn identity(
    slug: Option<String>,
    name: Option<String>,
) -> Result<(String, String), SkipReason> {
    let slug = slug
        .filter(|s| !s.trim().is_empty())
        .ok_or(SkipReason::MissingField("slug"))?;
    let name = name
        .filter(|s| !s.trim().is_empty())
        .ok_or(SkipReason::MissingField("name"))?;
    Ok((slug, name))
}

fn row(
    slug: String,
    name: String,
    document_slug: Option<String>,
    data: Map<String, Value>,
) -> ReferenceRow {
    ReferenceRow {
        slug,
        name,
        document_slug,
        data: Value::Object(data),
    }
}

fn spell_row(spell: Open5eSpell) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(spell.slug, spell.name)?;
    let mut data = Map::new();
    data.insert("level".into(), json!(spell.level));
    data.insert("school".into(), json!(spell.school));
    data.insert("casting_time".into(), json!(spell.casting_time));
    data.insert("range_value".into(), json!(spell.range));
    data.insert("components".into(), json!(spell.components));
    data.insert("material".into(), json!(spell.material));
    data.insert("duration".into(), json!(spell.duration));
    data.insert(
        "concentration".into(),
        json!(lenient_bool(spell.concentration.as_ref())),
    );
    data.insert("ritual".into(), json!(lenient_bool(spell.ritual.as_ref())));
    data.insert("description".into(), json!(spell.desc));
    data.insert("higher_level".into(), json!(spell.higher_level));
    data.insert(
        "damage_type".into(),
        json!(spell.damage.and_then(|d| d.damage_type)),
    );
    data.insert("save_type".into(), json!(spell.save));
    data.insert("attack_type".into(), json!(spell.attack_type));
    data.insert("classes".into(), list_or_empty(spell.classes));
    Ok(row(slug, name, spell.document_slug, data))
}

/// Columns every equipment row carries, whatever feed it came from.
fn equipment_base(
    kind: &str,
    rarity: Option<String>,
    requires_attunement: bool,
    cost: Option<Open5eCost>,
    weight: Option<Value>,
    desc: Option<String>,
) -> Map<String, Value> {
    let cost = cost.unwrap_or_default();
    let mut data = Map::new();
    data.insert("type".into(), json!(kind));
    data.insert(
        "rarity".into(),
        json!(rarity
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| "common".to_string())),
    );
    data.insert("requires_attunement".into(), json!(requires_attunement));
    data.insert("cost_quantity".into(), json!(cost.quantity));
    data.insert("cost_unit".into(), json!(cost.unit));
    data.insert("weight".into(), json!(weight));
    data.insert("description".into(), json!(desc));
    data
}

fn magic_item_row(item: Open5eMagicItem) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(item.slug, item.name)?;
    let data = equipment_base(
        "magic item",
        item.rarity,
        lenient_bool(item.requires_attunement.as_ref()),
        item.cost,
        item.weight,
        item.desc,
    );
    Ok(row(slug, name, item.document_slug, data))
}

fn weapon_row(weapon: Open5eWeapon) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(weapon.slug, weapon.name)?;
    let mut data = equipment_base(
        "weapon",
        None,
        false,
        weapon.cost,
        weapon.weight,
        weapon.desc,
    );
    let damage = weapon.damage.unwrap_or_default();
    data.insert("damage_dice".into(), json!(damage.damage_dice));
    data.insert("damage_type".into(), json!(damage.damage_type));
    data.insert("category".into(), json!(weapon.category));
    data.insert("properties".into(), list_or_empty(weapon.properties));
    Ok(row(slug, name, weapon.document_slug, data))
}

fn armor_row(armor: Open5eArmor) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(armor.slug, armor.name)?;
    let mut data = equipment_base("armor", None, false, armor.cost, armor.weight, armor.desc);

    let ac_base = lenient_int(armor.ac_base.as_ref());
    // Only an explicit false disables the dexterity bonus.
    let adds_dex = !matches!(armor.ac_add_dex, Some(Value::Bool(false)));
    let dex_cap = lenient_int(armor.ac_cap_dex.as_ref()).filter(|cap| *cap != 0);

    data.insert("ac".into(), json!(ac_base));
    data.insert("ac_base".into(), json!(ac_base));
    data.insert("ac_add_dex".into(), json!(adds_dex));
    data.insert("ac_cap_dex".into(), json!(dex_cap));
    data.insert("dex_bonus".into(), json!(adds_dex));
    data.insert(
        "max_dex_bonus".into(),
        json!(dex_cap.unwrap_or(UNCAPPED_DEX_BONUS)),
    );
    data.insert("category".into(), json!("armor"));
    Ok(row(slug, name, armor.document_slug, data))
}

fn race_row(race: Open5eRace) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(race.slug, race.name)?;
    let mut data = Map::new();
    data.insert("description".into(), json!(race.desc));
    data.insert("asi".into(), list_or_empty(race.asi));
    data.insert("age".into(), json!(race.age));
    data.insert("alignment".into(), json!(race.alignment));
    data.insert("size".into(), json!(race.size));
    data.insert(
        "speed".into(),
        race.speed
            .filter(|s| !s.is_null())
            .unwrap_or_else(|| json!({ "walk": 30 })),
    );
    data.insert("languages".into(), json!(race.languages));
    data.insert("proficiencies".into(), json!(race.proficiencies));
    data.insert("traits".into(), json!(race.traits));
    data.insert("subraces".into(), list_or_empty(race.subraces));
    Ok(row(slug, name, race.document_slug, data))
}

fn class_row(class: Open5eClass) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(class.slug, class.name)?;
    let mut data = Map::new();
    data.insert("description".into(), json!(class.desc));
    data.insert("hit_die".into(), json!(hit_die(class.hit_die.as_ref())));
    data.insert("prof_armor".into(), json!(class.prof_armor));
    data.insert("prof_weapons".into(), json!(class.prof_weapons));
    data.insert("prof_tools".into(), json!(class.prof_tools));
    data.insert("prof_saving_throws".into(), json!(class.prof_saving_throws));
    data.insert("prof_skills".into(), json!(class.prof_skills));
    data.insert("equipment".into(), json!(class.equipment));
    data.insert(
        "spellcasting_ability".into(),
        json!(class.spellcasting_ability),
    );
    data.insert("subtypes_name".into(), json!(class.subtypes_name));
    data.insert("archetypes".into(), list_or_empty(class.archetypes));
    Ok(row(slug, name, class.document_slug, data))
}

fn background_row(background: Open5eBackground) -> Result<ReferenceRow, SkipReason> {
    let (slug, name) = identity(background.slug, background.name)?;
    let mut data = Map::new();
    data.insert("description".into(), json!(background.desc));
    data.insert(
        "skill_proficiencies".into(),
        json!(background.skill_proficiencies),
    );
    data.insert("languages".into(), json!(background.languages));
    data.insert("equipment".into(), json!(background.equipment));
    data.insert("feature".into(), json!(background.feature));
    data.insert("feature_desc".into(), json!(background.feature_desc));
    Ok(row(slug, name, background.document_slug, data))
}

fn list_or_empty(value: Option<Value>) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(items),
        _ => Value::Array(Vec::new()),
    }
}

/// Open5e mixes real booleans with "yes"/"no" strings and 0/1 numbers.
fn lenient_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim().to_ascii_lowercase();
            !matches!(s.as_str(), "" | "no" | "false" | "0")
        }
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

fn lenient_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Hit die size from `"1d10"`, `"d10"`, `"10"` or a bare number.
fn hit_die(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            let sides = s.rsplit_once(['d', 'D']).map_or(s, |(_, sides)| sides);
            sides.trim().parse().ok()
        }
        other => lenient_int(Some(other)),
    }
}
