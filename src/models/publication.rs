use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Label → URL pairs in the order the data file lists them.
///
/// Keys are free-form ("paper", "code", "slides", ...). A plain `HashMap`
/// would lose the source order, so the map is kept as a vector of pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Links(Vec<(String, String)>);

impl Links {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Links(pairs)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LinksVisitor;

        impl<'de> Visitor<'de> for LinksVisitor {
            type Value = Links;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of link labels to URLs")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Links, E> {
                Ok(Links::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Links, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    pairs.push((k, v));
                }
                Ok(Links(pairs))
            }
        }

        deserializer.deserialize_any(LinksVisitor)
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Publication {
    /// URL-safe; used both as the `id` query value and as a route segment.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub venue: String,
    pub year: i32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub links: Links,
    #[serde(default)]
    pub featured: bool,
}

impl Publication {
    pub fn abstract_text(&self) -> Option<&str> {
        self.abstract_text.as_deref().filter(|a| !a.is_empty())
    }

    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_keep_source_order() {
        let p: Publication = serde_json::from_str(
            r#"{"id":"x","title":"T","year":2020,"type":"journal",
                "links":{"paper":"https://p","code":"https://c","slides":"https://s"}}"#,
        )
        .unwrap();
        let keys: Vec<&str> = p.links.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["paper", "code", "slides"]);
        assert_eq!(p.links.get("code"), Some("https://c"));
        assert_eq!(p.links.get("poster"), None);
    }

    #[test]
    fn optional_fields_default() {
        let p: Publication =
            serde_json::from_str(r#"{"id":"x","title":"T","year":2020,"links":null}"#).unwrap();
        assert!(p.links.is_empty());
        assert!(p.tags().is_empty());
        assert!(p.abstract_text().is_none());
        assert!(!p.featured);
    }
}
