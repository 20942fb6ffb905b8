//! Careers catalog.
//!
//! Job postings are loaded once at startup from a YAML file and served
//! read-only. There is no admin surface; editing the catalog means editing
//! the file and restarting.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One open position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub location: String,

    /// Employment type, e.g. "Full-time".
    #[serde(rename = "type")]
    pub employment_type: String,

    /// Experience expectation as displayed, e.g. "5+ years".
    pub experience: String,

    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub responsibilities: Vec<String>,

    #[serde(default)]
    pub requirements: Vec<String>,
}

/// Load the catalog from a YAML file.
///
/// A missing file is an empty catalog; a malformed one is a startup error.
pub fn load_catalog(path: &Path) -> Result<Vec<JobPosting>> {
    if !path.exists() {
        warn!(path = %path.display(), "careers catalog not found, serving an empty list");
        return Ok(Vec::new());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read careers catalog at {}", path.display()))?;

    let postings: Vec<JobPosting> = serde_yml::from_str(&raw)
        .with_context(|| format!("failed to parse careers catalog at {}", path.display()))?;

    Ok(postings)
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_empty_catalog() {
        let postings = load_catalog(Path::new("./no-such-catalog.yml")).unwrap();
        assert!(postings.is_empty());
    }

    #[test]
    fn catalog_yaml_parses() {
        let yaml = r#"
- id: marine-engineer
  title: Marine Engineer
  location: Mumbai, India
  type: Full-time
  experience: 5+ years
  description: Ship maintenance and repair operations.
  tags:
    - Marine Engineering
    - Ship Maintenance
  responsibilities:
    - Inspect marine equipment and machinery
  requirements:
    - Bachelor's degree in Marine Engineering
"#;
        let postings: Vec<JobPosting> = serde_yml::from_str(yaml).unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].id, "marine-engineer");
        assert_eq!(postings[0].employment_type, "Full-time");
        assert_eq!(postings[0].tags.len(), 2);
    }

    #[test]
    fn type_field_round_trips_under_its_wire_name() {
        let posting = JobPosting {
            id: "x".to_string(),
            title: "X".to_string(),
            location: "Y".to_string(),
            employment_type: "Contract".to_string(),
            experience: "2+ years".to_string(),
            description: "d".to_string(),
            tags: vec![],
            responsibilities: vec![],
            requirements: vec![],
        };
        let json = serde_json::to_string(&posting).unwrap();
        assert!(json.contains("\"type\":\"Contract\""));
    }
}
