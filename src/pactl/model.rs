//! Card directory data model as reported by `pactl -f json list cards`.
//!
//! Profile and port maps keep the order the utility listed them in. Nothing
//! here depends on that order: the UI always presents profile keys sorted
//! via [`Card::sorted_profile_keys`].

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Full, wholesale-replaced collection of known cards.
pub type Directory = Vec<Card>;

/// A hardware audio card with its selectable profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Server-side index. Informational; identity is the card name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Stable card identifier, also the operand for profile changes.
    pub name: String,
    #[serde(default)]
    pub driver: String,
    #[serde(default)]
    pub properties: Properties,
    pub profiles: OrderedMap<Profile>,
    #[serde(default)]
    pub active_profile: String,
    #[serde(default)]
    pub ports: OrderedMap<Port>,
}

/// Human-readable card metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    #[serde(rename = "device.description", default)]
    pub device_description: String,
    #[serde(rename = "device.nick", default)]
    pub device_nick: String,
    #[serde(rename = "device.product.name", default)]
    pub device_product_name: String,
}

/// A named card configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub description: String,
    /// Informational only: unavailable profiles can still be requested.
    #[serde(default)]
    pub available: bool,
}

/// Hardware port entry. Carried through, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub port_type: String,
    #[serde(default)]
    pub properties: PortProperties,
    #[serde(default)]
    pub profiles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortProperties {
    #[serde(rename = "device.product.name", default)]
    pub device_product_name: String,
}

impl Card {
    /// Profile keys in lexicographic order.
    #[must_use]
    pub fn sorted_profile_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.profiles.keys().map(str::to_owned).collect();
        keys.sort_unstable();
        keys
    }

    /// Whether `key` is the active profile and actually exists on the card.
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        !self.active_profile.is_empty()
            && self.active_profile == key
            && self.profiles.contains_key(key)
    }

    /// Short label for list rows: nick, then description, then the raw name.
    #[must_use]
    pub fn label(&self) -> &str {
        [
            self.properties.device_nick.as_str(),
            self.properties.device_description.as_str(),
        ]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(&self.name)
    }
}

/// Locate a card by name. Returns its position and the card.
#[must_use]
pub fn find_card<'a>(cards: &'a [Card], name: &str) -> Option<(usize, &'a Card)> {
    cards.iter().enumerate().find(|(_, card)| card.name == name)
}

// ──────────────────── ordered map ────────────────────

/// String-keyed map that preserves the listing order of a JSON object.
///
/// Duplicate keys are rejected during deserialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map with unique string keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(de::Error::custom(format!("duplicate key `{key}`")));
            }
            entries.push((key, value));
        }
        Ok(OrderedMap { entries })
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

// ──────────────────── tests ────────────────────
