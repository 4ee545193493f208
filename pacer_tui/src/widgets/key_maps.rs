use std::collections::{hash_map, BTreeMap, HashMap};

use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings a component currently answers to, with their help text.
#[derive(Clone, Default)]
pub struct KeyMaps(HashMap<KeyId, KeyDesc>);

#[derive(Eq, Hash, PartialEq, Clone, Debug)]
pub struct KeyId {
    pub key_code: KeyCode,
    pub key_modifiers: KeyModifiers,
}

/// Help text; lower `prio` sorts first in the help bar.
#[derive(Eq, Hash, PartialEq, Clone, PartialOrd, Ord, Debug)]
pub struct KeyDesc {
    pub prio: i64,
    pub desc: String,
}

/// One help-bar entry: every key sharing a description.
#[derive(Debug, PartialEq)]
pub struct KeyMap {
    pub key_ids: Vec<KeyId>,
    pub description: KeyDesc,
}

impl KeyMaps {
    pub fn with(mut self, key_id: impl Into<KeyId>, description: impl Into<KeyDesc>) -> Self {
        self.0.insert(key_id.into(), description.into());
        self
    }

    pub fn contains(&self, key_id: &KeyId) -> bool {
        self.0.contains_key(key_id)
    }

    pub fn merge_mappings(higher_prio: &Self, lower_prio: &Self) -> Self {
        let mut merged_mappings = higher_prio.0.clone();
        for (k, v) in lower_prio {
            merged_mappings.entry(k.clone()).or_insert_with(|| v.clone());
        }
        KeyMaps(merged_mappings)
    }

    /// Entries grouped by description, in help-bar order.
    pub fn grouped(&self) -> Vec<KeyMap> {
        let mut groups: BTreeMap<&KeyDesc, Vec<KeyId>> = BTreeMap::new();
        for (k, v) in self {
            groups.entry(v).or_default().push(k.clone());
        }
        groups
            .into_iter()
            .map(|(description, mut key_ids)| {
                key_ids.sort_by_key(KeyId::to_string);
                KeyMap {
                    key_ids,
                    description: description.clone(),
                }
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a KeyMaps {
    type Item = (&'a KeyId, &'a KeyDesc);

    type IntoIter = hash_map::Iter<'a, KeyId, KeyDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = match self.key_code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            code => code.to_string(),
        };
        let modifiers = self
            .key_modifiers
            .iter()
            .filter_map(|m| match m {
                KeyModifiers::CONTROL => Some("Ctrl"),
                KeyModifiers::ALT => Some("Alt"),
                KeyModifiers::SHIFT => Some("Shift"),
                _ => None,
            })
            .collect::<Vec<&'static str>>()
            .join("+");
        if modifiers.is_empty() {
            write!(f, "{key}")
        } else {
            write!(f, "{modifiers}-{key}")
        }
    }
}

impl From<char> for KeyId {
    fn from(ch: char) -> Self {
        KeyId {
            key_code: KeyCode::Char(ch),
            key_modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<KeyCode> for KeyId {
    fn from(key_code: KeyCode) -> Self {
        KeyId {
            key_code,
            key_modifiers: KeyModifiers::NONE,
        }
    }
}

impl KeyDesc {
    pub fn prio(mut self, prio: i64) -> Self {
        self.prio = prio;
        self
    }
}

impl From<&str> for KeyDesc {
    fn from(desc: &str) -> Self {
        KeyDesc {
            prio: 0,
            desc: desc.to_string(),
        }
    }
}

impl KeyMap {
    pub fn key_ids_to_string(&self) -> String {
        self.key_ids
            .iter()
            .map(KeyId::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    }
}
