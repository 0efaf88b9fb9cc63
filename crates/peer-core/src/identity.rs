//! Sign-in gating by institutional email domain.

/// Domain accepted when none is configured.
pub const DEFAULT_ALLOWED_DOMAIN: &str = "asl.org";

/// The lowercased part after the last `@`, or `None` if there is none.
pub fn email_domain(email: &str) -> Option<String> {
  let (_, domain) = email.trim().rsplit_once('@')?;
  let domain = domain.trim().to_lowercase();
  (!domain.is_empty()).then_some(domain)
}

pub fn is_allowed_email(email: &str, allowed_domain: &str) -> bool {
  email_domain(email)
    .is_some_and(|d| d == allowed_domain.trim().to_lowercase())
}
