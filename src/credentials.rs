use serde::Deserialize;

/// Which credential field carries the bearer token.
///
/// Only one strategy is active per deployment.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
    /// The JWT is sent as the password, the username is free-form
    #[default]
    Password,
    /// The JWT is sent as the username itself
    Username,
}

/// Credentials supplied by a client on login
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    password: Option<String>,
}

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TokenSource {
    /// Pull the token out of a login attempt. Empty strings count as absent.
    pub(crate) fn extract<'a>(
        self,
        username: Option<&'a str>,
        credentials: &'a Credentials,
    ) -> Option<&'a str> {
        let token = match self {
            TokenSource::Password => credentials.password(),
            TokenSource::Username => username,
        };

        token.filter(|token| !token.is_empty())
    }

    /// The client supplied username usable as a fallback identity name
    pub(crate) fn fallback_username(self, username: Option<&str>) -> Option<String> {
        match self {
            TokenSource::Password => username.filter(|name| !name.is_empty()).map(String::from),
            // The username field holds the token, never expose it as a name
            TokenSource::Username => None,
        }
    }
}
