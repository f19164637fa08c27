//! Attribute-name mapping between the provider and application conventions.
//!
//! The provider ships attributes as an ordered list of `{Name, Value}` pairs
//! using flat, separator-delimited names (`phone_number`) and a reserved
//! `custom:` namespace for tenant-defined attributes. Callers work with an
//! ordered camelCase mapping instead (`phoneNumber`, `customRole`).
//!
//! Only the custom-namespace transform round-trips exactly. The forward
//! direction also collapses `-x`/`_x` into `X`, but the reverse direction
//! never re-expands camelCase, so `phone_number` comes back as
//! `phoneNumber`. Existing callers rely on that asymmetry.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved provider prefix for tenant-defined attributes.
pub const CUSTOM_NAMESPACE_PREFIX: &str = "custom:";

/// Application-side prefix produced for namespaced attributes.
pub const CUSTOM_KEY_PREFIX: &str = "custom";

/// One attribute in provider wire form.
///
/// Either field may be missing on responses; such entries are skipped when
/// converting into an [`AttributeMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderAttribute {
    /// Provider attribute name, for example `custom:role`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attribute value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ProviderAttribute {
    /// Build a fully populated attribute pair.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

/// Ordered application-form attribute mapping.
///
/// ## Invariants
/// - Keys are unique; inserting an existing key replaces its value in place
///   and keeps the original position.
/// - Iteration follows first-insertion order, which is also the order used
///   when converting back to provider form.
///
/// # Examples
/// ```
/// use idp_facade::domain::AttributeMap;
///
/// let mut attributes = AttributeMap::new();
/// attributes.insert("email", "a@b.com");
/// attributes.insert("customRole", "admin");
/// attributes.insert("email", "c@d.com");
///
/// assert_eq!(attributes.get("email"), Some("c@d.com"));
/// assert_eq!(attributes.keys().collect::<Vec<_>>(), ["email", "customRole"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(Vec<(String, String)>);

impl AttributeMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a value, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for AttributeMap {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributeMapVisitor;

        impl<'de> Visitor<'de> for AttributeMapVisitor {
            type Value = AttributeMap;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of attribute names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AttributeMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(AttributeMapVisitor)
    }
}

/// Translate a provider attribute name into its application key.
///
/// `custom:role` becomes `customRole`; separators followed by a lowercase
/// ASCII letter collapse into the uppercased letter (`phone_number` becomes
/// `phoneNumber`). A bare `custom:` has no suffix to promote and is left in
/// place before the separator pass.
///
/// # Examples
/// ```
/// use idp_facade::domain::attributes::to_application_name;
///
/// assert_eq!(to_application_name("custom:role"), "customRole");
/// assert_eq!(to_application_name("device-name"), "deviceName");
/// assert_eq!(to_application_name("email"), "email");
/// ```
pub fn to_application_name(provider_name: &str) -> String {
    let namespaced = match provider_name.strip_prefix(CUSTOM_NAMESPACE_PREFIX) {
        Some(suffix) if !suffix.is_empty() => {
            let mut chars = suffix.chars();
            let mut key = String::with_capacity(CUSTOM_KEY_PREFIX.len() + suffix.len());
            key.push_str(CUSTOM_KEY_PREFIX);
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
            }
            key.push_str(chars.as_str());
            key
        }
        _ => provider_name.to_owned(),
    };
    collapse_separators(&namespaced)
}

/// Translate an application key into its provider attribute name.
///
/// Only the custom namespace is reversed: any key longer than `custom`
/// that starts with it has the prefix stripped, the next character
/// lowercased and `custom:` prepended, so `customRole` becomes
/// `custom:role`. Everything else is used verbatim. Provider-form names are
/// not recognised, so `custom:role` becomes `custom::role`.
///
/// # Examples
/// ```
/// use idp_facade::domain::attributes::to_provider_name;
///
/// assert_eq!(to_provider_name("customRole"), "custom:role");
/// assert_eq!(to_provider_name("phoneNumber"), "phoneNumber");
/// assert_eq!(to_provider_name("custom"), "custom");
/// assert_eq!(to_provider_name("custom:role"), "custom::role");
/// ```
pub fn to_provider_name(key: &str) -> String {
    let Some(rest) = key.strip_prefix(CUSTOM_KEY_PREFIX) else {
        return key.to_owned();
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => {
            let mut name = String::with_capacity(CUSTOM_NAMESPACE_PREFIX.len() + rest.len());
            name.push_str(CUSTOM_NAMESPACE_PREFIX);
            name.extend(first.to_lowercase());
            name.push_str(chars.as_str());
            name
        }
        None => key.to_owned(),
    }
}

fn collapse_separators(name: &str) -> String {
    let mut collapsed = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if matches!(ch, '-' | '_') {
            if let Some(next) = chars.next_if(char::is_ascii_lowercase) {
                collapsed.push(next.to_ascii_uppercase());
                continue;
            }
        }
        collapsed.push(ch);
    }
    collapsed
}

/// Convert provider attribute pairs into an application mapping.
///
/// Entries with a missing or empty name or value are skipped entirely. When
/// two provider names collapse to the same key, the later entry wins.
///
/// # Examples
/// ```
/// use idp_facade::domain::attributes::{ProviderAttribute, to_application_attributes};
///
/// let attributes = to_application_attributes(&[
///     ProviderAttribute::new("email", "a@b.com"),
///     ProviderAttribute::new("custom:role", "admin"),
/// ]);
/// assert_eq!(attributes.get("customRole"), Some("admin"));
/// ```
pub fn to_application_attributes<'a, I>(attributes: I) -> AttributeMap
where
    I: IntoIterator<Item = &'a ProviderAttribute>,
{
    let mut mapped = AttributeMap::new();
    for attribute in attributes {
        let (Some(name), Some(value)) = (attribute.name.as_deref(), attribute.value.as_deref())
        else {
            continue;
        };
        if name.is_empty() || value.is_empty() {
            continue;
        }
        mapped.insert(to_application_name(name), value);
    }
    mapped
}

/// Convert an application mapping into provider attribute pairs, keeping the
/// mapping's iteration order.
pub fn to_provider_attributes(attributes: &AttributeMap) -> Vec<ProviderAttribute> {
    attributes
        .iter()
        .map(|(key, value)| ProviderAttribute::new(to_provider_name(key), value))
        .collect()
}

/// Convert application keys into provider names, for delete-style calls
/// that only carry names.
pub fn to_provider_names<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    keys.iter().map(|key| to_provider_name(key.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for attribute-name mapping.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("email", "email")]
    #[case("custom:role", "customRole")]
    #[case("phone_number", "phoneNumber")]
    #[case("device-name", "deviceName")]
    #[case("custom:first_name", "customFirstName")]
    #[case("custom:", "custom:")]
    #[case("family__name", "family_Name")]
    #[case("zone_9", "zone_9")]
    #[case("trailing_", "trailing_")]
    #[case("name_Upper", "name_Upper")]
    fn forward_name_transform(#[case] provider: &str, #[case] expected: &str) {
        assert_eq!(to_application_name(provider), expected);
    }

    #[rstest]
    #[case("customRole", "custom:role")]
    #[case("custom", "custom")]
    #[case("custom:role", "custom::role")]
    #[case("custom:", "custom::")]
    #[case("email", "email")]
    #[case("phoneNumber", "phoneNumber")]
    #[case("customerId", "custom:erId")]
    fn reverse_name_transform(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(to_provider_name(key), expected);
    }

    #[test]
    fn maps_mixed_provider_attributes() {
        let attributes = to_application_attributes(&[
            ProviderAttribute::new("email", "a@b.com"),
            ProviderAttribute::new("custom:role", "admin"),
            ProviderAttribute::new("phone_number", "+15551234"),
        ]);

        let expected: AttributeMap = [
            ("email", "a@b.com"),
            ("customRole", "admin"),
            ("phoneNumber", "+15551234"),
        ]
        .into_iter()
        .collect();
        assert_eq!(attributes, expected);
    }

    #[test]
    fn reverse_mapping_keeps_iteration_order() {
        let attributes: AttributeMap = [("email", "a@b.com"), ("customRole", "admin")]
            .into_iter()
            .collect();

        assert_eq!(
            to_provider_attributes(&attributes),
            vec![
                ProviderAttribute::new("email", "a@b.com"),
                ProviderAttribute::new("custom:role", "admin"),
            ]
        );
    }

    #[rstest]
    #[case(ProviderAttribute { name: None, value: Some("v".to_owned()) })]
    #[case(ProviderAttribute { name: Some("n".to_owned()), value: None })]
    #[case(ProviderAttribute { name: Some(String::new()), value: Some("v".to_owned()) })]
    #[case(ProviderAttribute { name: Some("n".to_owned()), value: Some(String::new()) })]
    #[case(ProviderAttribute::default())]
    fn skips_incomplete_entries(#[case] incomplete: ProviderAttribute) {
        let attributes =
            to_application_attributes(&[incomplete, ProviderAttribute::new("email", "a@b.com")]);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("email"), Some("a@b.com"));
    }

    #[test]
    fn colliding_names_keep_the_last_value() {
        let attributes = to_application_attributes(&[
            ProviderAttribute::new("given_name", "first"),
            ProviderAttribute::new("given-name", "second"),
        ]);
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes.get("givenName"), Some("second"));
    }

    #[rstest]
    #[case("custom:role")]
    #[case("custom:tier")]
    #[case("custom:x")]
    #[case("custom:plan_level")]
    fn lowercase_custom_names_round_trip(#[case] name: &str) {
        let original = vec![ProviderAttribute::new(name, "value")];
        let round_tripped = to_provider_attributes(&to_application_attributes(&original));
        if name.contains('_') {
            assert_eq!(round_tripped, vec![ProviderAttribute::new("custom:planLevel", "value")]);
        } else {
            assert_eq!(round_tripped, original);
        }
    }

    #[test]
    fn names_without_separators_are_unchanged() {
        for name in ["email", "locale", "zoneinfo", "sub", "nickname"] {
            assert_eq!(to_application_name(name), name);
        }
    }

    #[test]
    fn provider_names_translate_custom_keys() {
        assert_eq!(
            to_provider_names(&["customRole", "email"]),
            vec!["custom:role".to_owned(), "email".to_owned()]
        );
    }

    #[test]
    fn attribute_map_serialises_in_insertion_order() {
        let attributes: AttributeMap = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&attributes).expect("serialise attribute map");
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);

        let decoded: AttributeMap = serde_json::from_str(&json).expect("decode attribute map");
        assert_eq!(decoded, attributes);
    }

    #[test]
    fn provider_attribute_uses_pascal_case_on_the_wire() {
        let json = serde_json::to_value(ProviderAttribute::new("email", "a@b.com"))
            .expect("serialise attribute");
        assert_eq!(json, serde_json::json!({ "Name": "email", "Value": "a@b.com" }));
    }
}
