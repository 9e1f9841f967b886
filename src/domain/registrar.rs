//! Registrar search links

use crate::error::{DomainForgeError, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Registrars we can build a search link for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Registrar {
    #[default]
    GoDaddy,
    Namecheap,
    Porkbun,
}

impl Registrar {
    pub const ALL: [Registrar; 3] = [Registrar::GoDaddy, Registrar::Namecheap, Registrar::Porkbun];

    /// Search page for a fully-qualified domain
    pub fn search_url(&self, domain: &str) -> Result<Url> {
        let (base, param) = match self {
            Registrar::GoDaddy => ("https://www.godaddy.com/domainsearch/find", "domainToCheck"),
            Registrar::Namecheap => ("https://www.namecheap.com/domains/registration/results/", "domain"),
            Registrar::Porkbun => ("https://porkbun.com/checkout/search", "q"),
        };
        Url::parse_with_params(base, &[(param, domain)])
            .map_err(|e| DomainForgeError::internal(format!("Invalid registrar URL: {}", e)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Registrar::GoDaddy => "GoDaddy",
            Registrar::Namecheap => "Namecheap",
            Registrar::Porkbun => "Porkbun",
        }
    }
}

impl std::fmt::Display for Registrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Registrar {
    type Err = DomainForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "godaddy" => Ok(Registrar::GoDaddy),
            "namecheap" => Ok(Registrar::Namecheap),
            "porkbun" => Ok(Registrar::Porkbun),
            other => Err(DomainForgeError::config(format!(
                "Unknown registrar '{}' (expected godaddy, namecheap or porkbun)",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_godaddy_link() {
        let url = Registrar::default().search_url("zenly.com").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.godaddy.com/domainsearch/find?domainToCheck=zenly.com"
        );
    }

    #[test]
    fn test_all_registrars_embed_domain() {
        for registrar in Registrar::ALL {
            let url = registrar.search_url("zenly.io").unwrap();
            assert_eq!(url.scheme(), "https");
            assert!(url.query_pairs().any(|(_, v)| v == "zenly.io"), "{}", registrar);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("Namecheap".parse::<Registrar>().unwrap(), Registrar::Namecheap);
        assert_eq!(" porkbun ".parse::<Registrar>().unwrap(), Registrar::Porkbun);
        assert!("gandi".parse::<Registrar>().is_err());
    }
}
