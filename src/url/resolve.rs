use crate::UrlError;
use url::Url;

/// Parses the configured base URL
///
/// Only HTTP and HTTPS are accepted; anything else could never be fetched.
///
/// # Examples
///
/// ```
/// use quote_ripple::url::parse_base;
///
/// let base = parse_base("http://quotes.toscrape.com").unwrap();
/// assert_eq!(base.as_str(), "http://quotes.toscrape.com/");
/// ```
pub fn parse_base(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Resolves a site-relative reference (e.g. `/page/2/`) against the base URL
///
/// The fragment is dropped so that two references to the same page compare
/// equal.
///
/// # Examples
///
/// ```
/// use quote_ripple::url::{parse_base, resolve_reference};
///
/// let base = parse_base("http://quotes.toscrape.com").unwrap();
/// let next = resolve_reference(&base, "/page/2/").unwrap();
/// assert_eq!(next.as_str(), "http://quotes.toscrape.com/page/2/");
/// ```
pub fn resolve_reference(base: &Url, reference: &str) -> Result<Url, UrlError> {
    let reference = reference.trim();

    let unresolvable = || UrlError::Unresolvable {
        base: base.to_string(),
        reference: reference.to_string(),
    };

    if reference.is_empty() {
        return Err(unresolvable());
    }

    let mut url = base.join(reference).map_err(|_| unresolvable())?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Reference '{}' resolved to a non-HTTP URL: {}",
            reference, url
        )));
    }

    url.set_fragment(None);
    Ok(url)
}
