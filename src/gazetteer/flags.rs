//! Flag-image inventory: the set of codes for which a flag image is known to
//! exist. Normally populated by scanning a local images directory; when that
//! directory is empty or missing, a remote index page is scraped instead.

use crate::gazetteer::error::Error;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

// -----------------------------------------------------------------------------

/// `href="us.png"`-style links on the remote flag index page.
static FLAG_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([a-z]{2}(?:-[a-z]{2,3})?)\.(?:png|gif)""#).unwrap());

// -----------------------------------------------------------------------------
//
/// Scans a local directory of flag images, collecting the lower-cased file
/// stems (`us.png` → `us`). Missing directories yield an empty set rather
/// than an error, so the remote fallback can take over.
pub fn scan_flag_directory(dir: &Path) -> HashSet<String> {
    let mut codes = HashSet::new();

    let Ok(entries) = std::fs::read_dir(dir) else {
        return codes;
    }; // let

    for entry in entries.flatten() {
        let path = entry.path();

        let is_image = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("png" | "gif")
        ); // matches

        if !is_image {
            continue;
        } // if

        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            codes.insert(stem.to_lowercase());
        } // if
    } // for

    codes
} // fn

// -----------------------------------------------------------------------------
//
/// Fetches the remote flag index page and extracts every linked flag code.
pub async fn scrape_flag_index(
    http: &reqwest::Client,
    url: &str,
) -> Result<HashSet<String>, Error> {
    let body = http.get(url).send().await?.error_for_status()?.text().await?;

    let codes: HashSet<String> = FLAG_LINK
        .captures_iter(&body)
        .map(|captures| captures[1].to_string())
        .collect();

    if codes.is_empty() {
        return Err(Error::FlagInventory(format!("no flag links found at {url}")));
    } // if

    Ok(codes)
} // fn

// -------------------------------------------------------------------------------------------------
//
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_page_links() {
        let html = r#"<a href="us.png">us</a> <a href="gb.png">gb</a>
                      <a href="gb-sct.png">scotland</a> <a href="notes.txt">n</a>"#;
        let codes: HashSet<String> = FLAG_LINK
            .captures_iter(html)
            .map(|captures| captures[1].to_string())
            .collect();
        assert!(codes.contains("us"));
        assert!(codes.contains("gb-sct"));
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn missing_directory_is_empty() {
        assert!(scan_flag_directory(Path::new("/no/such/directory")).is_empty());
    }
} // mod
