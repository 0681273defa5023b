//! SEO artifacts: robots.txt, sitemap.xml and hreflang alternates.
//!
//! Every URL here is absolute and built with the path localizer, so the
//! default locale is always unprefixed and `x-default` points at it.

use crate::i18n::{absolute_url_for, localized_path, Locale};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io;

/// Pages listed in the sitemap, as unprefixed paths.
pub const SITEMAP_PAGES: [&str; 2] = ["/", "/about"];

/// Paths hidden from crawlers in every locale.
pub const DISALLOWED_PATHS: [&str; 2] = ["/dashboard", "/admin"];

/// hreflang value pointing at the default locale.
pub const X_DEFAULT: &str = "x-default";

/// One hreflang alternate: `<link rel="alternate" hreflang=".." href="..">`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: String,
    pub href: String,
}

/// Canonical URL and alternates of one page in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAlternates {
    pub canonical: String,
    pub alternates: Vec<Alternate>,
}

/// Canonical URL for `locale` and absolute alternates for every locale
/// plus `x-default`.
pub fn page_alternates(origin: &str, locale: Locale, path: &str) -> PageAlternates {
    PageAlternates {
        canonical: absolute_url_for(origin, locale, path),
        alternates: alternates(origin, path),
    }
}

fn alternates(origin: &str, path: &str) -> Vec<Alternate> {
    let mut out: Vec<Alternate> = Locale::all()
        .into_iter()
        .map(|locale| Alternate {
            hreflang: locale.code().to_string(),
            href: absolute_url_for(origin, locale, path),
        })
        .collect();
    out.push(Alternate {
        hreflang: X_DEFAULT.to_string(),
        href: absolute_url_for(origin, Locale::default_locale(), path),
    });
    out
}

/// Every locale variant of a path, default locale first:
/// `/dashboard` -> [`/dashboard`, `/fr/dashboard`].
pub fn expand_all_locales(path: &str) -> Vec<String> {
    Locale::all()
        .into_iter()
        .map(|locale| localized_path(locale, path))
        .collect()
}

/// robots.txt contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robots {
    pub user_agent: String,
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
    pub host: String,
    pub sitemap: String,
}

impl Robots {
    pub fn render(&self) -> String {
        let mut out = format!("User-Agent: {}\n", self.user_agent);
        for path in &self.allow {
            out.push_str(&format!("Allow: {}\n", path));
        }
        for path in &self.disallow {
            out.push_str(&format!("Disallow: {}\n", path));
        }
        out.push_str(&format!("\nHost: {}\n", self.host));
        out.push_str(&format!("Sitemap: {}\n", self.sitemap));
        out
    }
}

/// Crawl rules for the site: everything allowed except the locale variants
/// of [`DISALLOWED_PATHS`].
pub fn robots(origin: &str) -> Robots {
    let default = Locale::default_locale();
    Robots {
        user_agent: "*".to_string(),
        allow: vec!["/".to_string()],
        disallow: DISALLOWED_PATHS
            .iter()
            .flat_map(|path| expand_all_locales(path))
            .collect(),
        host: absolute_url_for(origin, default, "/"),
        sitemap: absolute_url_for(origin, default, "/sitemap.xml"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    pub alternates: Vec<Alternate>,
}

/// One entry per page in [`SITEMAP_PAGES`], located at the default-locale
/// URL with alternates for every locale.
pub fn sitemap_entries(origin: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let default = Locale::default_locale();
    SITEMAP_PAGES
        .iter()
        .map(|page| SitemapEntry {
            url: absolute_url_for(origin, default, page),
            last_modified: now,
            change_frequency: ChangeFrequency::Monthly,
            priority: if *page == "/" { 1.0 } else { 0.7 },
            alternates: alternates(origin, page),
        })
        .collect()
}

/// Render entries as a sitemap-protocol document with `xhtml:link`
/// alternates.
pub fn render_sitemap(entries: &[SitemapEntry]) -> io::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let urlset = BytesStart::new("urlset").with_attributes([
        ("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"),
        ("xmlns:xhtml", "http://www.w3.org/1999/xhtml"),
    ]);
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        writer
            .create_element("loc")
            .write_text_content(BytesText::new(&entry.url))?;
        for alternate in &entry.alternates {
            writer
                .create_element("xhtml:link")
                .with_attribute(("rel", "alternate"))
                .with_attribute(("hreflang", alternate.hreflang.as_str()))
                .with_attribute(("href", alternate.href.as_str()))
                .write_empty()?;
        }
        writer
            .create_element("lastmod")
            .write_text_content(BytesText::new(
                &entry.last_modified.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            ))?;
        writer
            .create_element("changefreq")
            .write_text_content(BytesText::new(entry.change_frequency.as_str()))?;
        writer
            .create_element("priority")
            .write_text_content(BytesText::new(&format!("{:.1}", entry.priority)))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ORIGIN: &str = "https://example.com";

    #[test]
    fn test_expand_all_locales() {
        assert_eq!(
            expand_all_locales("/dashboard"),
            vec!["/dashboard", "/fr/dashboard"]
        );
    }

    #[test]
    fn test_robots_disallows_every_locale_variant() {
        let robots = robots(ORIGIN);
        assert_eq!(
            robots.disallow,
            vec!["/dashboard", "/fr/dashboard", "/admin", "/fr/admin"]
        );
        assert_eq!(robots.host, "https://example.com/");
        assert_eq!(robots.sitemap, "https://example.com/sitemap.xml");
    }

    #[test]
    fn test_robots_render() {
        let text = robots(ORIGIN).render();
        assert!(text.starts_with("User-Agent: *\nAllow: /\nDisallow: /dashboard\n"));
        assert!(text.contains("Disallow: /fr/admin\n"));
        assert!(text.ends_with("Host: https://example.com/\nSitemap: https://example.com/sitemap.xml\n"));
    }

    #[test]
    fn test_page_alternates() {
        let page = page_alternates(ORIGIN, Locale::FRENCH, "/about");
        assert_eq!(page.canonical, "https://example.com/fr/about");
        assert_eq!(
            page.alternates,
            vec![
                Alternate {
                    hreflang: "en".into(),
                    href: "https://example.com/about".into()
                },
                Alternate {
                    hreflang: "fr".into(),
                    href: "https://example.com/fr/about".into()
                },
                Alternate {
                    hreflang: "x-default".into(),
                    href: "https://example.com/about".into()
                },
            ]
        );
    }

    #[test]
    fn test_sitemap_entries() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let entries = sitemap_entries(ORIGIN, now);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "https://example.com/");
        assert_eq!(entries[0].priority, 1.0);
        assert_eq!(entries[1].url, "https://example.com/about");
        assert_eq!(entries[1].priority, 0.7);
        assert_eq!(entries[1].change_frequency, ChangeFrequency::Monthly);
        assert_eq!(entries[0].alternates[1].href, "https://example.com/fr");
    }

    #[test]
    fn test_render_sitemap() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let xml = render_sitemap(&sitemap_entries(ORIGIN, now)).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns:xhtml=\"http://www.w3.org/1999/xhtml\""));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
        assert!(xml.contains(
            "<xhtml:link rel=\"alternate\" hreflang=\"fr\" href=\"https://example.com/fr/about\"/>"
        ));
        assert!(xml.contains("hreflang=\"x-default\""));
        assert!(xml.contains("<lastmod>2026-01-02T03:04:05Z</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }
}
