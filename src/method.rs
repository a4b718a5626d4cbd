//! HTTP method as a typed enum.
//!
//! Covers the RFC 9110 standard methods. Any other token is routed as
//! [`Method::Other`], which only routes registered with
//! [`Router::any`](crate::Router::any) answer; elsewhere it gets `405`.

use std::fmt;
use std::str::FromStr;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    /// An extension method token, e.g. `PROPFIND`.
    Other,
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`), or `"OTHER"`
    /// for an extension method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Delete  => "DELETE",
            Self::Get     => "GET",
            Self::Head    => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch   => "PATCH",
            Self::Post    => "POST",
            Self::Put     => "PUT",
            Self::Trace   => "TRACE",
            Self::Other   => "OTHER",
        }
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
/// Fails for anything but the standard methods; callers decide whether that
/// means [`Method::Other`].
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT" => Ok(Self::Connect),
            "DELETE"  => Ok(Self::Delete),
            "GET"     => Ok(Self::Get),
            "HEAD"    => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "PATCH"   => Ok(Self::Patch),
            "POST"    => Ok(Self::Post),
            "PUT"     => Ok(Self::Put),
            "TRACE"   => Ok(Self::Trace),
            _         => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("GET".parse(), Ok(Method::Get));
        assert_eq!("DELETE".parse(), Ok(Method::Delete));
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn rejects_lowercase_and_unknown() {
        assert_eq!("get".parse::<Method>(), Err(()));
        assert_eq!("PROPFIND".parse::<Method>(), Err(()));
    }
}
