use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProfileLink {
    pub href: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ProfileLink {
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref().filter(|i| !i.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Profile {
    pub name: String,
    pub role: String,
    #[serde(alias = "organization")]
    pub org: String,
    pub bio: String,
    pub location: String,
    /// Rendered in supplied order, no dedup.
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}
