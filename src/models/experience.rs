use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub location: String,
    /// Free text such as "2021 - Present".
    pub period: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

impl ExperienceEntry {
    /// Derived view property: the period mentions "present" in any case.
    pub fn is_current(&self) -> bool {
        self.period.to_lowercase().contains("present")
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref().filter(|l| !l.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(period: &str) -> ExperienceEntry {
        ExperienceEntry {
            role: "Engineer".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            period: period.into(),
            level: None,
            details: vec![],
        }
    }

    #[test]
    fn current_is_case_insensitive() {
        assert!(entry("2022 - Present").is_current());
        assert!(entry("2022 - PRESENT").is_current());
        assert!(entry("since 2020 (present)").is_current());
        assert!(!entry("2019 - 2021").is_current());
    }
}
