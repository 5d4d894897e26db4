//! Platform host recognition and legacy-domain rewriting.

use crate::error::{Result, SessionError};
use url::Url;

/// Host suffixes that identify a page served by the platform.
pub const PLATFORM_SUFFIXES: &[&str] = &[
    ".lightning.force.com",
    ".vf.force.com",
    ".salesforce.com",
    ".my.salesforce.com",
    ".sandbox.my.salesforce.com",
    ".visual.force.com",
];

/// Legacy UI suffixes and the API-capable suffix they map to.
const LEGACY_SUFFIXES: &[(&str, &str)] = &[
    (".lightning.force.com", ".my.salesforce.com"),
    (".vf.force.com", ".my.salesforce.com"),
];

/// Marker appended to the first label of sandbox/container hosts.
const SANDBOX_MARKER: &str = "--c";

/// Extracts the lowercase host from the active tab URL.
pub fn tab_host(tab_url: &str) -> Result<String> {
    let parsed = Url::parse(tab_url.trim())
        .map_err(|err| SessionError::InvalidTabUrl(format!("{tab_url}: {err}")))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_ascii_lowercase()),
        _ => Err(SessionError::NotOnPlatform {
            host: String::new(),
        }),
    }
}

pub fn is_platform_host(host: &str) -> bool {
    PLATFORM_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
}

pub fn https_origin(host: &str) -> String {
    format!("https://{host}")
}

/// Origin of the active tab, validated against the platform allow-list.
pub fn tab_origin(tab_url: &str) -> Result<String> {
    let host = tab_host(tab_url)?;
    if !is_platform_host(&host) {
        return Err(SessionError::NotOnPlatform { host });
    }
    Ok(https_origin(&host))
}

/// Rewrites a legacy UI host to its API-canonical form.
///
/// `acme--c.sandbox.lightning.force.com` becomes `acme.sandbox.my.salesforce.com`.
/// Hosts without a legacy suffix come back unchanged.
pub fn api_host_for(host: &str) -> String {
    let Some((suffix, replacement)) = LEGACY_SUFFIXES
        .iter()
        .find(|(suffix, _)| host.ends_with(suffix))
    else {
        return host.to_string();
    };

    let stem = &host[..host.len() - suffix.len()];
    let stem = match stem.split_once('.') {
        Some((first, rest)) => {
            let first = first.strip_suffix(SANDBOX_MARKER).unwrap_or(first);
            format!("{first}.{rest}")
        }
        None => stem.strip_suffix(SANDBOX_MARKER).unwrap_or(stem).to_string(),
    };
    format!("{stem}{replacement}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recognizes_platform_hosts() {
        assert!(is_platform_host("acme.lightning.force.com"));
        assert!(is_platform_host("acme--c.vf.force.com"));
        assert!(is_platform_host("acme.my.salesforce.com"));
        assert!(is_platform_host("acme--dev.sandbox.my.salesforce.com"));
        assert!(is_platform_host("acme--c.na12.visual.force.com"));
        assert!(!is_platform_host("example.com"));
        assert!(!is_platform_host("salesforce.com.evil.io"));
    }

    #[test]
    fn rewrites_sandbox_lightning_host() {
        assert_eq!(
            api_host_for("foo--c.sandbox.lightning.force.com"),
            "foo.sandbox.my.salesforce.com"
        );
    }

    #[test]
    fn rewrites_lightning_and_vf_hosts() {
        assert_eq!(api_host_for("acme.lightning.force.com"), "acme.my.salesforce.com");
        assert_eq!(api_host_for("acme--c.vf.force.com"), "acme.my.salesforce.com");
    }

    #[test]
    fn marker_is_only_stripped_from_the_label_end() {
        assert_eq!(
            api_host_for("my--cool--c.sandbox.lightning.force.com"),
            "my--cool.sandbox.my.salesforce.com"
        );
        assert_eq!(
            api_host_for("my--cool.lightning.force.com"),
            "my--cool.my.salesforce.com"
        );
    }

    #[test]
    fn api_hosts_are_left_alone() {
        assert_eq!(api_host_for("acme.my.salesforce.com"), "acme.my.salesforce.com");
        assert_eq!(
            api_host_for("acme--c.na12.visual.force.com"),
            "acme--c.na12.visual.force.com"
        );
    }

    #[test]
    fn tab_origin_validates_allow_list() {
        assert_eq!(
            tab_origin("https://Acme.lightning.force.com/lightning/page/home").unwrap(),
            "https://acme.lightning.force.com"
        );
        assert_eq!(
            tab_origin("https://example.com/").unwrap_err(),
            SessionError::NotOnPlatform {
                host: "example.com".to_string()
            }
        );
        assert!(matches!(
            tab_origin("not a url"),
            Err(SessionError::InvalidTabUrl(_))
        ));
    }
}
