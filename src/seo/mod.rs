pub mod jsonld;
pub mod sitemap;

pub use jsonld::{person_jsonld, scholarly_article_jsonld};
pub use sitemap::generate_sitemap;

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
