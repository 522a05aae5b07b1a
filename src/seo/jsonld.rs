use serde_json::{json, Value};

use crate::base_path::is_external;
use crate::models::{EducationEntry, Profile, Publication};

/// Wrap a schema object in its script tag. `</` is escaped so string
/// values can never close the script element early.
fn ld_script(schema: &Value) -> String {
    let body = serde_json::to_string_pretty(schema).unwrap_or_else(|_| "{}".to_string());
    format!(
        "<script type=\"application/ld+json\">\n{}\n</script>",
        body.replace("</", "<\\/")
    )
}

/// Build schema.org `Person` data for the home page
pub fn person_jsonld(profile: &Profile, education: &[EducationEntry], site_url: &str) -> String {
    let alumni: Vec<Value> = education
        .iter()
        .map(|e| {
            json!({
                "@type": "EducationalOccupationalCredential",
                "credentialCategory": e.degree,
                "recognizedBy": { "@type": "EducationalOrganization", "name": e.school },
            })
        })
        .collect();
    let same_as: Vec<&str> = profile
        .links
        .iter()
        .map(|l| l.href.as_str())
        .filter(|h| h.starts_with("http") && is_external(h))
        .collect();

    ld_script(&json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": profile.name,
        "jobTitle": profile.role,
        "worksFor": { "@type": "Organization", "name": profile.org },
        "url": format!("{}/", site_url.trim_end_matches('/')),
        "sameAs": same_as,
        "alumniOf": alumni,
    }))
}

/// Build schema.org `ScholarlyArticle` data for one publication page
pub fn scholarly_article_jsonld(p: &Publication, site_url: &str) -> String {
    let authors: Vec<Value> = p
        .authors
        .iter()
        .map(|a| json!({ "@type": "Person", "name": a }))
        .collect();
    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "ScholarlyArticle",
        "name": p.title,
        "headline": p.title,
        "author": authors,
        "datePublished": p.year.to_string(),
        "isPartOf": { "@type": "Periodical", "name": p.venue },
        "description": p.abstract_text().unwrap_or(""),
        "url": format!("{}/publications/{}/", site_url.trim_end_matches('/'), p.id),
    });
    if let Some(paper) = p.links.get("paper") {
        schema["sameAs"] = Value::String(paper.to_string());
    }
    ld_script(&schema)
}
