//! Email address syntax checks and canonicalisation.

use std::sync::OnceLock;

use regex::Regex;

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;

static LOCAL_PART_RE: OnceLock<Regex> = OnceLock::new();
static DOMAIN_LABEL_RE: OnceLock<Regex> = OnceLock::new();
static TLD_RE: OnceLock<Regex> = OnceLock::new();

fn local_part_regex() -> &'static Regex {
    LOCAL_PART_RE.get_or_init(|| {
        // Dot-atom form; quoted local parts are not accepted.
        let atom = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
        Regex::new(&format!(r"^{atom}(\.{atom})*$"))
            .unwrap_or_else(|error| panic!("local part regex failed to compile: {error}"))
    })
}

fn domain_label_regex() -> &'static Regex {
    DOMAIN_LABEL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$")
            .unwrap_or_else(|error| panic!("domain label regex failed to compile: {error}"))
    })
}

fn tld_regex() -> &'static Regex {
    TLD_RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z]{2,}|xn--[A-Za-z0-9-]{2,})$")
            .unwrap_or_else(|error| panic!("tld regex failed to compile: {error}"))
    })
}

/// Whether `address` is a syntactically valid `local@domain` address with a
/// fully qualified domain.
///
/// The contact pipeline calls this on escaped text, so an address with an
/// apostrophe passes here but is rejected there.
///
/// # Examples
/// ```
/// use contacts_api::domain::validation::is_valid_email;
///
/// assert!(is_valid_email("jo@x.com"));
/// assert!(!is_valid_email("jo@localhost"));
/// assert!(!is_valid_email("not an email"));
/// ```
#[must_use]
pub fn is_valid_email(address: &str) -> bool {
    if address.len() > MAX_ADDRESS_LEN {
        return false;
    }
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_LEN || !local_part_regex().is_match(local) {
        return false;
    }
    is_valid_domain(domain)
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let [.., tld] = labels.as_slice() else {
        return false;
    };
    if labels.len() < 2 || !tld_regex().is_match(tld) {
        return false;
    }
    labels
        .iter()
        .all(|label| label.len() <= MAX_LABEL_LEN && domain_label_regex().is_match(label))
}

/// Provider families whose mailboxes ignore certain local-part formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Provider {
    Gmail,
    Outlook,
    Icloud,
    Yahoo,
    Yandex,
    Other,
}

fn provider_for(domain: &str) -> Provider {
    let first_label = domain.split('.').next().unwrap_or_default();
    match domain {
        "gmail.com" | "googlemail.com" => Provider::Gmail,
        "icloud.com" | "me.com" => Provider::Icloud,
        "msn.com" | "passport.com" => Provider::Outlook,
        "ymail.com" | "rocketmail.com" => Provider::Yahoo,
        "ya.ru" => Provider::Yandex,
        _ => match first_label {
            "hotmail" | "live" | "outlook" => Provider::Outlook,
            "yahoo" => Provider::Yahoo,
            "yandex" => Provider::Yandex,
            _ => Provider::Other,
        },
    }
}

fn strip_subaddress(local: &str, separator: char) -> &str {
    local.split(separator).next().unwrap_or(local)
}

/// Rewrite `address` into the canonical form used for storage and
/// comparison.
///
/// The whole address is lowercased. Provider-specific rules then drop
/// formatting the mailbox ignores: Gmail dots and `+tag`, Outlook and iCloud
/// `+tag`, Yahoo `-tag`. Gmail and Yandex domain aliases collapse to one
/// domain. Input that has no `@` is returned lowercased.
///
/// # Examples
/// ```
/// use contacts_api::domain::validation::normalize_email;
///
/// assert_eq!(normalize_email("J.O.Doe+news@GoogleMail.com"), "jodoe@gmail.com");
/// assert_eq!(normalize_email("Jo@Example.COM"), "jo@example.com");
/// ```
#[must_use]
pub fn normalize_email(address: &str) -> String {
    let lowered = address.to_lowercase();
    let Some((local, domain)) = lowered.rsplit_once('@') else {
        return lowered;
    };

    let (local, domain) = match provider_for(domain) {
        Provider::Gmail => (strip_subaddress(local, '+').replace('.', ""), "gmail.com"),
        Provider::Outlook | Provider::Icloud => (strip_subaddress(local, '+').to_owned(), domain),
        Provider::Yahoo => (strip_subaddress(local, '-').to_owned(), domain),
        Provider::Yandex => (local.to_owned(), "yandex.ru"),
        Provider::Other => (local.to_owned(), domain),
    };
    format!("{local}@{domain}")
}
