use validator::validate_email;

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if validate_email(&s) && has_public_domain_shape(&s) {
            Ok(Self(s))
        } else {
            Err(INVALID_EMAIL.to_string())
        }
    }
}

// `validate_email` also takes bare hosts (`localhost`) and IP literals. A
// subscriber address needs a dotted domain ending in an alphabetic TLD.
fn has_public_domain_shape(s: &str) -> bool {
    let domain = match s.rsplit_once('@') {
        Some((_, domain)) => domain,
        None => return false,
    };
    if domain.starts_with('[') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
