//! Redirect policies.
//!
//! A request may carry several [`RedirectPolicy`]s. They are checked in order
//! on every redirect hop. The first one to object stops the chain: the last
//! 3xx response is handed back as-is, and its status shows up as a response
//! error on the reply.

use reqwest::{redirect, Url};
use std::{fmt, sync::Arc};
use thiserror::Error;
use tracing::debug;

/// Why a redirect was refused.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("stopped after {0} redirects")]
    TooMany(usize),
    #[error("auto redirect is disabled")]
    Disabled,
    #[error("redirect to {0:?} is not allowed")]
    DomainNotAllowed(String),
    #[error("{0}")]
    Rejected(String),
}

type CustomCheck = Arc<dyn Fn(&Url, &[Url]) -> Result<(), String> + Send + Sync>;

/// A rule applied to every redirect hop.
#[derive(Clone)]
pub enum RedirectPolicy {
    /// Follow at most this many redirects.
    Flexible(usize),
    /// Refuse every redirect.
    NoRedirect,
    /// Only follow redirects to one of these hosts.
    DomainCheck(Vec<String>),
    /// Caller supplied check; receives the next URL and the URLs visited so far.
    Custom(CustomCheck),
}

impl fmt::Debug for RedirectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectPolicy::Flexible(n) => f.debug_tuple("Flexible").field(n).finish(),
            RedirectPolicy::NoRedirect => f.write_str("NoRedirect"),
            RedirectPolicy::DomainCheck(hosts) => {
                f.debug_tuple("DomainCheck").field(hosts).finish()
            }
            RedirectPolicy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Default for RedirectPolicy {
    fn default() -> Self {
        RedirectPolicy::Flexible(Self::DEFAULT_MAX_REDIRECTS)
    }
}

impl RedirectPolicy {
    pub const DEFAULT_MAX_REDIRECTS: usize = 10;

    pub fn flexible(max: usize) -> Self {
        RedirectPolicy::Flexible(max)
    }

    pub fn no_redirect() -> Self {
        RedirectPolicy::NoRedirect
    }

    pub fn domain_check<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RedirectPolicy::DomainCheck(
            hosts
                .into_iter()
                .map(|h| h.into().to_ascii_lowercase())
                .collect(),
        )
    }

    pub fn custom<F>(check: F) -> Self
    where
        F: Fn(&Url, &[Url]) -> Result<(), String> + Send + Sync + 'static,
    {
        RedirectPolicy::Custom(Arc::new(check))
    }

    /// Check one hop. `previous` holds every URL requested so far.
    pub fn check(&self, next: &Url, previous: &[Url]) -> Result<(), RedirectError> {
        match self {
            RedirectPolicy::Flexible(max) if previous.len() > *max => {
                Err(RedirectError::TooMany(*max))
            }
            RedirectPolicy::Flexible(_) => Ok(()),
            RedirectPolicy::NoRedirect => Err(RedirectError::Disabled),
            RedirectPolicy::DomainCheck(hosts) => {
                let host = next.host_str().unwrap_or_default().to_ascii_lowercase();
                if hosts.iter().any(|h| *h == host) {
                    Ok(())
                } else {
                    Err(RedirectError::DomainNotAllowed(host))
                }
            }
            RedirectPolicy::Custom(check) => check(next, previous).map_err(RedirectError::Rejected),
        }
    }

    /// Fold a list of policies into a single `reqwest` redirect policy.
    pub fn compose(policies: Vec<RedirectPolicy>) -> redirect::Policy {
        redirect::Policy::custom(move |attempt| {
            let verdict = policies
                .iter()
                .try_for_each(|p| p.check(attempt.url(), attempt.previous()));
            match verdict {
                Ok(()) => attempt.follow(),
                Err(e) => {
                    debug!("Not following redirect to {}: {}", attempt.url(), e);
                    attempt.stop()
                }
            }
        })
    }
}
