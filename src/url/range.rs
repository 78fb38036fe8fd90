use crate::url::resolve_reference;
use crate::UrlError;
use url::Url;

/// Builds the fixed range of page URLs used by the parallel strategy
///
/// `pattern` is a site-relative path with a `{}` placeholder that receives the
/// page number, from 1 to `page_count` inclusive. The count is taken as given;
/// it is not checked against the site's real pagination depth.
///
/// # Examples
///
/// ```
/// use quote_ripple::url::{page_urls, parse_base};
///
/// let base = parse_base("http://quotes.toscrape.com").unwrap();
/// let urls = page_urls(&base, "/page/{}/", 2).unwrap();
/// assert_eq!(urls[1].as_str(), "http://quotes.toscrape.com/page/2/");
/// ```
pub fn page_urls(base: &Url, pattern: &str, page_count: u32) -> Result<Vec<Url>, UrlError> {
    (1..=page_count)
        .map(|page| resolve_reference(base, &pattern.replace("{}", &page.to_string())))
        .collect()
}
