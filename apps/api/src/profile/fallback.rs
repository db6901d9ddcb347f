//! Regex-only profile used when model extraction fails. Pure and total: any
//! input, including empty, yields a profile with at most email and phone set.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::profile::Profile;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-z]{2,}").expect("email regex is valid")
});

// Optional +91 country code, then ten ASCII digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+91[\s-]?)?[0-9]{10}").expect("phone regex is valid"));

pub fn fallback_profile(text: &str) -> Profile {
    Profile {
        email: first_match(&EMAIL_RE, text),
        phone_number: first_match(&PHONE_RE, text),
        ..Profile::default()
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
