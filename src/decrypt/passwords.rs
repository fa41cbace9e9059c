//! Candidate password dictionary
//!
//! Tried strictly in order when no password is supplied. The empty
//! string comes first so documents sealed with an empty user password
//! unlock before the rest of the list is touched.

pub(crate) const CANDIDATE_PASSWORDS: &[&str] = &[
    "",
    "123456",
    "password",
    "123456789",
    "qwerty",
    "abc123",
    "111111",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "1234567890",
    "password1",
    "123123",
    "000000",
    "iloveyou",
    // guesses derived from common PDF producers
    "aspose",
    "aspose.pdf",
    "pdf",
    "decrypt",
    "unlock",
];

pub(crate) fn candidate_passwords() -> Vec<String> {
    CANDIDATE_PASSWORDS.iter().map(|p| p.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_is_first() {
        assert_eq!(CANDIDATE_PASSWORDS[0], "");
    }

    #[test]
    fn test_no_duplicate_candidates() {
        let mut seen = std::collections::HashSet::new();
        for pwd in CANDIDATE_PASSWORDS {
            assert!(seen.insert(pwd), "duplicate candidate: {:?}", pwd);
        }
    }
}
