use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Project {
    pub name: String,
    pub href: String,
    #[serde(rename = "desc", alias = "description")]
    pub description: String,
    #[serde(default)]
    pub stack: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Project {
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.is_empty())
    }
}
