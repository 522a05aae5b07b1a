use chrono::NaiveDate;

use crate::models::Publication;

use super::xml_escape;

fn url_entry(loc: &str, lastmod: &str, changefreq: &str, priority: &str) -> String {
    format!(
        "   <url>\n      <loc>{}</loc>\n      <lastmod>{}</lastmod>\n      <changefreq>{}</changefreq>\n      <priority>{}</priority>\n   </url>\n",
        xml_escape(loc),
        lastmod,
        changefreq,
        priority
    )
}

/// Generate sitemap.xml content: home, publications index, then one entry
/// per publication. Every entry carries the build date as `lastmod`.
pub fn generate_sitemap(site_url: &str, publications: &[Publication], today: NaiveDate) -> String {
    let site_url = site_url.trim_end_matches('/');
    let lastmod = today.format("%Y-%m-%d").to_string();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    xml.push_str(&url_entry(&format!("{}/", site_url), &lastmod, "monthly", "1.0"));
    xml.push_str(&url_entry(&format!("{}/publications/", site_url), &lastmod, "monthly", "0.8"));
    for p in publications {
        xml.push_str(&url_entry(
            &format!("{}/publications/{}/", site_url, p.id),
            &lastmod,
            "yearly",
            "0.6",
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}
