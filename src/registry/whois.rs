//! WHOIS client (pure Rust over TCP/43, no external `whois` binary)

use super::{RawRecord, RegistryLookup, RegistryRecord};
use crate::error::{DomainForgeError, Result};
use crate::types::RecordSource;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

const WHOIS_PORT: u16 = 43;
const IANA_WHOIS: &str = "whois.iana.org";

/// WHOIS client with a static server table and IANA discovery for the rest
pub struct WhoisClient {
    timeout: Duration,
    discovered: RwLock<HashMap<String, String>>,
}

impl WhoisClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            discovered: RwLock::new(HashMap::new()),
        }
    }

    /// Minimal convention-based mapping for high-usage TLDs
    fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
        match tld {
            "com" | "net" => Some("whois.verisign-grs.com"),
            "org" => Some("whois.pir.org"),
            "io" => Some("whois.nic.io"),
            "ai" => Some("whois.nic.ai"),
            "co" => Some("whois.nic.co"),
            "me" => Some("whois.nic.me"),
            "xyz" => Some("whois.nic.xyz"),
            "dev" | "app" => Some("whois.nic.google"),
            "tech" => Some("whois.nic.tech"),
            _ => None,
        }
    }

    async fn server_for(&self, tld: &str) -> Result<String> {
        if let Some(server) = Self::whois_server_for_tld(tld) {
            return Ok(server.to_string());
        }
        if let Some(server) = self.discovered.read().get(tld) {
            return Ok(server.clone());
        }

        let iana = self.query_whois(IANA_WHOIS, tld).await?;
        let server = Self::parse_iana_server(&iana, "whois:")
            .or_else(|| Self::parse_iana_server(&iana, "refer:"))
            .ok_or_else(|| {
                DomainForgeError::domain_check(
                    tld,
                    format!("No WHOIS server found for TLD: {}", tld),
                    Some("whois".to_string()),
                )
            })?;

        tracing::debug!(tld = %tld, server = %server, "Discovered WHOIS server via IANA");
        self.discovered.write().insert(tld.to_string(), server.clone());
        Ok(server)
    }

    async fn query_whois(&self, server: &str, query: &str) -> Result<String> {
        self.query_addr(format!("{}:{}", server, WHOIS_PORT), query).await
    }

    async fn query_addr(&self, addr: String, query: &str) -> Result<String> {
        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| DomainForgeError::timeout("WHOIS connect", self.timeout))?
            .map_err(|e| DomainForgeError::network(format!("WHOIS connect failed: {}", e), None, Some(addr.clone())))?;

        timeout(self.timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| DomainForgeError::timeout("WHOIS write", self.timeout))?
            .map_err(|e| DomainForgeError::network(format!("WHOIS write failed: {}", e), None, Some(addr.clone())))?;

        let mut buf = Vec::new();
        timeout(self.timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| DomainForgeError::timeout("WHOIS read", self.timeout))?
            .map_err(|e| DomainForgeError::network(format!("WHOIS read failed: {}", e), None, Some(addr)))?;

        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    fn parse_iana_server(iana: &str, key: &str) -> Option<String> {
        iana.lines()
            .map(str::trim)
            .find_map(|line| {
                if line.to_lowercase().starts_with(key) {
                    Some(line.splitn(2, ':').nth(1)?.trim().to_string())
                } else {
                    None
                }
            })
            .filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl RegistryLookup for WhoisClient {
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
        let tld = domain
            .rsplit('.')
            .next()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DomainForgeError::validation("Invalid domain format - no TLD found"))?
            .to_lowercase();

        let server = self.server_for(&tld).await?;
        let raw = self.query_whois(&server, domain).await?;
        Ok(RegistryRecord::Found(RawRecord::whois(raw)))
    }

    fn protocol(&self) -> RecordSource {
        RecordSource::Whois
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RecordClass;
    use tokio::net::TcpListener;

    #[test]
    fn test_static_servers() {
        assert_eq!(WhoisClient::whois_server_for_tld("com"), Some("whois.verisign-grs.com"));
        assert_eq!(WhoisClient::whois_server_for_tld("app"), Some("whois.nic.google"));
        assert_eq!(WhoisClient::whois_server_for_tld("zz"), None);
    }

    #[test]
    fn test_iana_whois_parsing() {
        let sample = r#"
domain:       COM
organisation: Verisign Global Registry Services
whois:        whois.verisign-grs.com
status:       ACTIVE
"#;
        assert_eq!(
            WhoisClient::parse_iana_server(sample, "whois:").as_deref(),
            Some("whois.verisign-grs.com")
        );
        assert_eq!(WhoisClient::parse_iana_server(sample, "refer:"), None);
    }

    #[test]
    fn test_iana_refer_parsing() {
        let sample = "refer: whois.nic.io\n";
        assert_eq!(
            WhoisClient::parse_iana_server(sample, "refer:").as_deref(),
            Some("whois.nic.io")
        );
    }

    #[tokio::test]
    async fn test_query_against_local_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], b"zenly.com\r\n");
            socket
                .write_all(b"Domain Name: ZENLY.COM\r\nRegistrar: Example Registrar\r\n")
                .await
                .unwrap();
        });

        let client = WhoisClient::new(Duration::from_secs(2));
        let body = client.query_addr(addr.to_string(), "zenly.com").await.unwrap();
        assert!(body.contains("ZENLY.COM"));

        let record = RegistryRecord::Found(RawRecord::whois(body));
        assert!(matches!(record.classify(), RecordClass::Registered { .. }));
        assert_eq!(client.protocol(), RecordSource::Whois);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = WhoisClient::new(Duration::from_millis(200));
        // TEST-NET-1 is unroutable
        let err = client.query_whois("192.0.2.1", "zenly.com").await.unwrap_err();
        assert!(err.is_transport());
    }
}
