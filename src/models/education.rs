use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON scalar that is shown verbatim (e.g. `2019` or `"2019 - 2021"`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: Scalar,
    #[serde(default)]
    pub details: Option<String>,
}

impl EducationEntry {
    /// Details text, treating an empty string as absent.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.is_empty())
    }
}
