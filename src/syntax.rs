use std::sync::LazyLock;

use regex::Regex;

/// Local part: alphanumeric runs joined by one separator each; domain: one
/// label then one or more 2-3 letter groups.
const EMAIL_PATTERN: &str =
    r"^([A-Za-z0-9]+[.\-_!#$%&?+'*/=^])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,3})+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("static email pattern compiles"));

/// Full-string match against the fixed address pattern.
pub fn is_syntactically_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailParts {
    pub prefix: String,
    pub domain: String,
}

/// Split on the rightmost `@`.
pub fn split_email(email: &str) -> Option<EmailParts> {
    let (prefix, domain) = email.rsplit_once('@')?;
    Some(EmailParts {
        prefix: prefix.to_string(),
        domain: domain.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for ok in [
            "jane.doe@example.com",
            "jane_doe@example.co.fr",
            "j-d+news@example.co.uk",
            "a1@b-c.org",
        ] {
            assert!(is_syntactically_valid(ok), "{ok}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "not-an-email",
            "",
            "jane..doe@example.com",
            ".jane@example.com",
            "jane.@example.com",
            "jane@example",
            "jane@example.comm",
            "jane@@example.com",
            "jane doe@example.com",
            "jane@example.c0m",
        ] {
            assert!(!is_syntactically_valid(bad), "{bad}");
        }
    }

    #[test]
    fn domain_takes_one_free_label_only() {
        // labels after the first must be 2-3 letters
        assert!(!is_syntactically_valid("jane_doe@mail.example.fr"));
        assert!(!is_syntactically_valid("jane@sub.domain.com"));
        assert!(is_syntactically_valid("jane@domain.co.uk"));
    }

    #[test]
    fn split_uses_rightmost_at() {
        let parts = split_email("a@b@example.com").unwrap();
        assert_eq!(parts.prefix, "a@b");
        assert_eq!(parts.domain, "example.com");
        assert!(split_email("nope").is_none());
    }
}
