// SPDX-License-Identifier: GPL-3.0-only

/// Authentication state passed into every call.
///
/// A session never changes after creation; re-authenticating produces a new
/// one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookies: Vec<(String, String)>,
    authenticated: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(cookies: Vec<(String, String)>) -> Self {
        Self {
            cookies,
            authenticated: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    /// `Cookie` header value; `None` when there is nothing to send
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}
