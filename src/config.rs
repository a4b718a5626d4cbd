//! Fixed service settings.
//!
//! Nothing here is read from the environment: the listen address and the
//! seed articles are constants.

use std::net::{Ipv4Addr, SocketAddr};

use crate::article::Article;

/// Port the service listens on.
pub const PORT: u16 = 9090;

/// Settings for one server instance.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address the listener binds.
    pub addr: SocketAddr,
    /// Articles the collection holds at startup.
    pub seed: Vec<Article>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT)),
            seed: seed_articles(),
        }
    }
}

/// The two articles every fresh process starts with.
pub fn seed_articles() -> Vec<Article> {
    vec![
        Article::new("1", "Golang Tutorial", "Tutorial for Golang", "Go is good"),
        Article::new("2", "Rest APIs", "About Rest APIs", "All about REST"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.addr.to_string(), "0.0.0.0:9090");
        let ids: Vec<_> = config.seed.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }
}
