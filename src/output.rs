// src/output.rs
// =============================================================================
// Writers for the crawl results.
//
// - Sitemap as XML (sitemaps.org format, only the mandatory <loc> field)
// - Sitemap as plain text (one URL per line)
//
// The tree has its own renderer in tree.rs and the JSON report is produced
// with serde_json in main.rs.
// =============================================================================

use quick_xml::escape::escape;
use std::io::{self, Write};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>

<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#;

// Writes a minimal sitemap
//
// Sample output:
//
// <?xml version="1.0" encoding="UTF-8"?>
//
// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//   <url>
//     <loc>http://foo.com/</loc>
//   </url>
// </urlset>
pub fn write_sitemap_xml(urls: &[String], writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(XML_HEADER.as_bytes())?;
    for url in urls {
        writeln!(writer, "  <url>")?;
        writeln!(writer, "    <loc>{}</loc>", escape(url.as_str()))?;
        writeln!(writer, "  </url>")?;
    }
    writeln!(writer, "</urlset>")
}

pub fn write_sitemap_text(urls: &[String], writer: &mut impl Write) -> io::Result<()> {
    for url in urls {
        writeln!(writer, "{}", url)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_write_sitemap_xml() {
        let mut buf = Vec::new();
        write_sitemap_xml(&urls(&["/foo", "/bar", "/helloWorld"]), &mut buf).unwrap();

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>

<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>/foo</loc>
  </url>
  <url>
    <loc>/bar</loc>
  </url>
  <url>
    <loc>/helloWorld</loc>
  </url>
</urlset>
"#;
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn test_empty_sitemap_xml() {
        let mut buf = Vec::new();
        write_sitemap_xml(&[], &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.ends_with("0.9\">\n</urlset>\n"));
    }

    #[test]
    fn test_sitemap_xml_escapes_urls() {
        let mut buf = Vec::new();
        write_sitemap_xml(&urls(&["mailto:a&b@<x>.com"]), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("<loc>mailto:a&amp;b@&lt;x&gt;.com</loc>"));
    }

    #[test]
    fn test_write_sitemap_text() {
        let mut buf = Vec::new();
        write_sitemap_text(&urls(&["https://g.org/", "https://g.org/pkg/"]), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "https://g.org/\nhttps://g.org/pkg/\n");
    }
}
