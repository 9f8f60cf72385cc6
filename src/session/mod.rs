use leptos::logging::log;
use leptos::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase, hyphenated RFC 4122 version-4 UUID.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("token pattern is a valid regex")
});

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum TokenError {
    #[error("Access token is empty")]
    Empty,
    #[error("Invalid token format")]
    Malformed,
    #[error("Already logged in")]
    AlreadyLoggedIn,
}

pub(crate) fn validate_token(token: &str) -> Result<(), TokenError> {
    if token.is_empty() {
        Err(TokenError::Empty)
    } else if TOKEN_PATTERN.is_match(token) {
        Ok(())
    } else {
        Err(TokenError::Malformed)
    }
}

/// Format state of the token field while the user types.
///
/// An empty field is not flagged as malformed, but it still cannot log in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CandidateStatus {
    Empty,
    Valid,
    Malformed,
}

impl CandidateStatus {
    pub fn of(candidate: &str) -> Self {
        match validate_token(candidate) {
            Ok(()) => Self::Valid,
            Err(TokenError::Empty) => Self::Empty,
            Err(_) => Self::Malformed,
        }
    }

    pub fn is_format_error(self) -> bool {
        self == Self::Malformed
    }
}

/// A fresh v4 token used to pre-fill the login field.
///
/// This is a convenience default for demo servers that pre-seed a matching record;
/// it is not a secret.
pub(crate) fn random_candidate_token() -> String {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string(),
        Err(_) => String::new(),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionData {
    pub logged_in: bool,
    pub access_token: String,
}

impl SessionData {
    /// One-way transition to logged-in. Rejected attempts leave the session untouched.
    pub fn login(&mut self, token: &str) -> Result<(), TokenError> {
        if self.logged_in {
            return Err(TokenError::AlreadyLoggedIn);
        }
        validate_token(token)?;

        self.logged_in = true;
        self.access_token = token.to_string();
        Ok(())
    }
}

/// Process-wide session store. There is no logout.
#[derive(Clone, Copy)]
pub(crate) struct Session(RwSignal<SessionData>);

impl Session {
    pub fn new() -> Self {
        Self(RwSignal::new(SessionData::default()))
    }

    pub fn logged_in(&self) -> bool {
        self.0.with(|s| s.logged_in)
    }

    pub fn access_token_untracked(&self) -> String {
        self.0.with_untracked(|s| s.access_token.clone())
    }

    pub fn login(&self, token: &str) -> Result<(), TokenError> {
        let mut next = self.0.get_untracked();
        next.login(token)?;
        self.0.set(next);
        log!("session: logged in");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
