//! Trigger vocabulary: homophone groups and item names.
//!
//! A group maps a canonical phrase name to the variant spellings a speech
//! recognizer produces for it; item display names are a second source of
//! trigger strings. Both are loaded once at startup and immutable for the
//! process lifetime. Matching is substring-based and case-insensitive, so
//! variants are lowercased at load time.

use crate::error::{Result, StreamcueError};
use std::fs;
use std::path::Path;

/// A canonical phrase with the variant spellings treated as the same trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerGroup {
    /// Canonical phrase name.
    pub name: String,
    /// Lowercased variant spellings, in declaration order.
    pub variants: Vec<String>,
}

/// Immutable trigger vocabulary.
///
/// Group order is declaration order (file order when loaded from JSON);
/// `find_in_word` reports the first variant hit in that order, then item
/// names in their load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerDictionary {
    groups: Vec<TriggerGroup>,
    /// (lowercased display name, opaque item id), in load order.
    items: Vec<(String, String)>,
}

/// Built-in homophone table, tuned for French Whisper error modes.
///
/// Used when no trigger file is configured.
const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    ("corbeau", &["corbeau", "corbeaux"]),
    ("flèches", &["flèches", "flèche", "fleches", "fleche"]),
    ("ours", &["ours", "ourse", "oursse"]),
    ("axolotl", &["axolotl", "axolotol"]),
    ("zombie", &["zombie", "zombis"]),
    ("squelette", &["squelette", "skelette"]),
    ("cochon", &["cochon", "cochons", "cochant"]),
    ("surprise", &["surprise"]),
    ("creeper", &["creeper", "cripeur", "creepeur"]),
    ("blaze", &["blaze", "blaize"]),
    ("enderman", &["enderman", "endermen", "endermane"]),
    ("nether", &["nether", "nézer"]),
    ("caverne", &["caverne", "cavern"]),
    ("trou", &["trou", "trous"]),
    ("nuit", &["nuit", "nuits"]),
    ("fantôme", &["fantôme", "fantomes", "fantom"]),
    ("bateau", &["bateau", "bateaux"]),
    ("dragon", &["dragon", "dragons"]),
    ("supercreeper", &["supercreeper", "super creeper", "supercri peur"]),
    ("charbon", &["charbon", "charbons"]),
    ("fer", &["fer", "fers"]),
    ("or", &["or", "ors"]),
    ("diamant", &["diamant", "diamants"]),
    ("sac", &["sac", "sacs"]),
    ("portail", &["portail", "portails"]),
    ("noyade", &["noyade", "noyades"]),
    ("lapin", &["lapin", "lapins"]),
    ("voler", &["voler", "volé", "volée"]),
    ("obsidienne", &["obsidienne"]),
    ("sorcière", &["sorcière", "sorcières"]),
    ("minerai", &["minerai", "minerais"]),
    ("explosion", &["explosion", "explosions"]),
    ("éclair", &["éclair", "eclair", "éclairs"]),
    ("encre", &["encre", "encres"]),
    ("pousser", &["pousser", "poussée", "poussées"]),
    ("lave", &["lave", "laves"]),
    ("soin", &["soin", "soins"]),
    ("invincible", &["invincible", "invincibles"]),
    ("cauchemar", &["cauchemar", "cauchemars"]),
    ("ferraille", &["ferraille", "ferrailles"]),
    ("force", &["force", "forces"]),
    ("troll", &["troll", "trolls"]),
];

impl TriggerDictionary {
    /// Creates a dictionary from explicit groups and items.
    ///
    /// Variants and item names are lowercased; empty variant lists are kept
    /// as harmless no-ops (a group with no variants never matches).
    pub fn new(groups: Vec<TriggerGroup>, items: Vec<(String, String)>) -> Self {
        let groups = groups
            .into_iter()
            .map(|g| TriggerGroup {
                name: g.name,
                variants: g.variants.iter().map(|v| v.to_lowercase()).collect(),
            })
            .collect();
        let items = items
            .into_iter()
            .map(|(name, id)| (name.to_lowercase(), id))
            .collect();
        Self { groups, items }
    }

    /// The built-in homophone table with no item names.
    pub fn builtin() -> Self {
        let groups = BUILTIN_GROUPS
            .iter()
            .map(|(name, variants)| TriggerGroup {
                name: (*name).to_string(),
                variants: variants.iter().map(|v| (*v).to_string()).collect(),
            })
            .collect();
        Self {
            groups,
            items: Vec::new(),
        }
    }

    /// Loads trigger groups from a JSON object: canonical name → variant array.
    ///
    /// File order is match order.
    pub fn load_groups(path: &Path) -> Result<Vec<TriggerGroup>> {
        let contents = read_dictionary_file(path)?;
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&contents).map_err(|e| StreamcueError::DictionaryParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut groups = Vec::with_capacity(map.len());
        for (name, value) in map {
            let variants: Vec<String> =
                serde_json::from_value(value).map_err(|e| StreamcueError::DictionaryParse {
                    path: path.display().to_string(),
                    message: format!("group {:?}: {}", name, e),
                })?;
            groups.push(TriggerGroup { name, variants });
        }
        Ok(groups)
    }

    /// Loads the item index from a JSON object: item id → display name.
    ///
    /// Returns (lowercased display name, id) pairs in file order. The id is
    /// opaque to matching; only the name participates.
    pub fn load_items(path: &Path) -> Result<Vec<(String, String)>> {
        let contents = read_dictionary_file(path)?;
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&contents).map_err(|e| StreamcueError::DictionaryParse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut items = Vec::with_capacity(map.len());
        for (id, value) in map {
            let name: String =
                serde_json::from_value(value).map_err(|e| StreamcueError::DictionaryParse {
                    path: path.display().to_string(),
                    message: format!("item {:?}: {}", id, e),
                })?;
            items.push((name, id));
        }
        Ok(items)
    }

    /// Loads a dictionary from optional group and item files.
    ///
    /// Falls back to the built-in homophone table when no group file is given.
    pub fn load(groups_path: Option<&Path>, items_path: Option<&Path>) -> Result<Self> {
        let groups = match groups_path {
            Some(path) => Self::load_groups(path)?,
            None => Self::builtin().groups,
        };
        let items = match items_path {
            Some(path) => Self::load_items(path)?,
            None => Vec::new(),
        };
        Ok(Self::new(groups, items))
    }

    /// Trigger groups in declaration order.
    pub fn groups(&self) -> &[TriggerGroup] {
        &self.groups
    }

    /// Item (lowercased name, id) pairs in load order.
    pub fn items(&self) -> &[(String, String)] {
        &self.items
    }

    /// All trigger strings in match order: group variants first, then item names.
    pub fn trigger_strings(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.variants.iter().map(String::as_str))
            .chain(self.items.iter().map(|(name, _)| name.as_str()))
    }

    /// Total number of trigger strings.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.variants.len()).sum::<usize>() + self.items.len()
    }

    /// Returns true when the dictionary has no trigger strings at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_dictionary_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(StreamcueError::DictionaryNotFound {
            path: path.display().to_string(),
        });
    }
    // Tolerate a UTF-8 BOM; item exports commonly carry one
    let contents = fs::read_to_string(path)?;
    Ok(contents.trim_start_matches('\u{feff}').to_string())
}
