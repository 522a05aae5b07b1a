use serde::{Deserialize, Serialize};

/// A labelled badge set. Items keep their source order, duplicates included.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InterestCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}
