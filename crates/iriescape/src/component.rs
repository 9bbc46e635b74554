//! The closed set of URI component kinds the codec knows how to handle.
//!
//! Each kind carries its own set of ASCII delimiters that are copied verbatim
//! instead of being escaped. Composite kinds (for example
//! [`Component::PathAndQuery`]) reserve the union of their parts plus the
//! delimiter that joins them.
//!
//! A [`Policy`] is a component plus the "keep delimiter" modifier, which
//! additionally keeps the character that introduces or terminates that
//! component (`?` for a query, `#` for a fragment) and nothing else.

use core::{fmt, str::FromStr};

use thiserror::Error;

/// Builds a 128-bit membership mask over ASCII from a byte string.
const fn ascii_set(chars: &[u8]) -> u128 {
    let mut mask = 0u128;
    let mut i = 0;
    while i < chars.len() {
        mask |= 1u128 << chars[i];
        i += 1;
    }
    mask
}

const SUB_DELIMS: u128 = ascii_set(b"!$&'()*+,;=");
const GEN_DELIMS: u128 = ascii_set(b":/?#[]@");

const SCHEME: u128 = ascii_set(b"+");
const USER_INFO: u128 = SUB_DELIMS | ascii_set(b":");
const HOST: u128 = SUB_DELIMS | ascii_set(b":[]");
const PATH: u128 = SUB_DELIMS | ascii_set(b":@/");
const QUERY: u128 = PATH;
const FRAGMENT: u128 = SUB_DELIMS | ascii_set(b":@");
const PATH_AND_QUERY: u128 = PATH | ascii_set(b"?");
const STRONG_AUTHORITY: u128 = USER_INFO | HOST | ascii_set(b"@");
const SCHEME_AND_SERVER: u128 = SCHEME | HOST | ascii_set(b"/@");
const HTTP_REQUEST_URL: u128 = SCHEME_AND_SERVER | PATH_AND_QUERY;
const ALL_DELIMS: u128 = GEN_DELIMS | SUB_DELIMS;

/// Which part of a URI is being escaped or unescaped.
///
/// The set is closed: every variant selects one row of the character-class
/// table used by [`classify`](crate::classify).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Component {
    /// A complete absolute URI; every delimiter is kept.
    AbsoluteUri,
    /// The scheme, without its trailing `:`.
    Scheme,
    /// The user information, without its trailing `@`.
    UserInfo,
    /// A host name or IP literal.
    Host,
    /// The port, without its leading `:`.
    Port,
    /// The path.
    Path,
    /// The query, without its leading `?`.
    Query,
    /// The fragment, without its leading `#`.
    Fragment,
    /// The port, including a default port that was not written explicitly.
    StrongPort,
    /// A host in its normalized form.
    NormalizedHost,
    /// Host plus port.
    HostAndPort,
    /// User information, host and port.
    StrongAuthority,
    /// Scheme, host and port.
    SchemeAndServer,
    /// Scheme, host, port, path and query.
    HttpRequestUrl,
    /// Path plus query.
    PathAndQuery,
    /// The serialized form of a complete URI.
    Serialization,
    /// No component of its own: only the component-boundary characters
    /// (`: / ? # [ ] @`) are kept.
    KeepDelimiter,
}

impl Component {
    /// Every component kind, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::AbsoluteUri,
        Self::Scheme,
        Self::UserInfo,
        Self::Host,
        Self::Port,
        Self::Path,
        Self::Query,
        Self::Fragment,
        Self::StrongPort,
        Self::NormalizedHost,
        Self::HostAndPort,
        Self::StrongAuthority,
        Self::SchemeAndServer,
        Self::HttpRequestUrl,
        Self::PathAndQuery,
        Self::Serialization,
        Self::KeepDelimiter,
    ];

    /// The kebab-case name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AbsoluteUri => "absolute-uri",
            Self::Scheme => "scheme",
            Self::UserInfo => "user-info",
            Self::Host => "host",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
            Self::StrongPort => "strong-port",
            Self::NormalizedHost => "normalized-host",
            Self::HostAndPort => "host-and-port",
            Self::StrongAuthority => "strong-authority",
            Self::SchemeAndServer => "scheme-and-server",
            Self::HttpRequestUrl => "http-request-url",
            Self::PathAndQuery => "path-and-query",
            Self::Serialization => "serialization",
            Self::KeepDelimiter => "keep-delimiter",
        }
    }

    /// ASCII characters outside `unreserved` that this component copies
    /// verbatim, as a bit mask indexed by code point.
    pub(crate) const fn reserved_ascii(self) -> u128 {
        match self {
            Self::AbsoluteUri | Self::Serialization => ALL_DELIMS,
            Self::Scheme => SCHEME,
            Self::UserInfo => USER_INFO,
            Self::Host | Self::NormalizedHost | Self::HostAndPort => HOST,
            Self::Port | Self::StrongPort => 0,
            Self::Path => PATH,
            Self::Query => QUERY,
            Self::Fragment => FRAGMENT,
            Self::PathAndQuery => PATH_AND_QUERY,
            Self::StrongAuthority => STRONG_AUTHORITY,
            Self::SchemeAndServer => SCHEME_AND_SERVER,
            Self::HttpRequestUrl => HTTP_REQUEST_URL,
            Self::KeepDelimiter => GEN_DELIMS,
        }
    }

    /// The delimiter that sets this component off from its neighbours, for
    /// kinds that do not already reserve it.
    const fn boundary_ascii(self) -> u128 {
        match self {
            Self::Scheme | Self::Port | Self::StrongPort => ascii_set(b":"),
            Self::UserInfo => ascii_set(b"@"),
            Self::Query => ascii_set(b"?"),
            Self::Fragment => ascii_set(b"#"),
            // Already reserved, or no single delimiter of their own.
            Self::AbsoluteUri
            | Self::Host
            | Self::Path
            | Self::NormalizedHost
            | Self::HostAndPort
            | Self::StrongAuthority
            | Self::SchemeAndServer
            | Self::HttpRequestUrl
            | Self::PathAndQuery
            | Self::Serialization
            | Self::KeepDelimiter => 0,
        }
    }

    /// This component with its boundary delimiter kept verbatim.
    #[must_use]
    pub const fn keep_delimiter(self) -> Policy {
        Policy {
            component: self,
            keep_delimiter: true,
        }
    }

    /// Whether RFC 3987 `iprivate` code points may appear unescaped.
    ///
    /// Only a bare query admits private-use characters.
    pub(crate) const fn allows_private_use(self) -> bool {
        matches!(self, Self::Query)
    }
}

/// A [`Component`] together with the "keep delimiter" modifier.
///
/// Every codec entry point accepts `impl Into<Policy>`, so a bare
/// [`Component`] works wherever a policy is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Policy {
    component: Component,
    keep_delimiter: bool,
}

impl Policy {
    /// The component whose reserved set applies.
    #[must_use]
    pub const fn component(self) -> Component {
        self.component
    }

    /// Whether the component's boundary delimiter is kept verbatim.
    #[must_use]
    pub const fn keeps_delimiter(self) -> bool {
        self.keep_delimiter
    }

    pub(crate) const fn reserved_ascii(self) -> u128 {
        let reserved = self.component.reserved_ascii();
        if self.keep_delimiter {
            reserved | self.component.boundary_ascii()
        } else {
            reserved
        }
    }

    pub(crate) const fn allows_private_use(self) -> bool {
        self.component.allows_private_use()
    }
}

impl From<Component> for Policy {
    fn from(component: Component) -> Self {
        Self {
            component,
            keep_delimiter: false,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component.name())?;
        if self.keep_delimiter {
            f.write_str("+keep-delimiter")?;
        }
        Ok(())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The string did not name a [`Component`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown component kind")]
pub struct ParseComponentError;

impl FromStr for Component {
    type Err = ParseComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(ParseComponentError)
    }
}
