//! A-record lookups against one explicitly chosen server.
//!
//! Route generation must know which resolver answered, so this does not
//! reuse a system resolver: one query goes to one server over UDP.

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RData, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use route_sync_application::ports::HostResolver;
use route_sync_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;
const DNS_PORT: u16 = 53;

pub struct UdpHostResolver {
    timeout: Duration,
}

impl UdpHostResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// `1.1.1.1` or `1.1.1.1:5353`.
    pub fn parse_server(server: &str) -> Result<SocketAddr, DomainError> {
        let server = server.trim();
        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Ok(addr);
        }
        server
            .parse::<std::net::IpAddr>()
            .map(|ip| SocketAddr::new(ip, DNS_PORT))
            .map_err(|_| DomainError::DnsQuery(format!("Invalid DNS server address '{}'", server)))
    }

    fn build_query(domain: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let fqdn = format!("{}.", domain.trim_end_matches('.'));
        let name = Name::from_str(&fqdn)
            .map_err(|e| DomainError::DnsQuery(format!("Invalid domain '{}': {}", domain, e)))?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::A);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::DnsQuery(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok((id, buf))
    }

    fn parse_answers(
        bytes: &[u8],
        expected_id: u16,
        server: SocketAddr,
    ) -> Result<Vec<Ipv4Addr>, DomainError> {
        let message = Message::from_vec(bytes).map_err(|e| {
            DomainError::DnsQuery(format!("Malformed DNS response from {}: {}", server, e))
        })?;

        if message.id() != expected_id {
            return Err(DomainError::DnsQuery(format!(
                "DNS response ID mismatch from {}",
                server
            )));
        }

        let rcode = message.response_code();
        if rcode != ResponseCode::NoError {
            return Err(DomainError::DnsQuery(format!("{} from {}", rcode, server)));
        }

        Ok(message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect())
    }

    async fn exchange(&self, server: SocketAddr, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr = if server.is_ipv4() {
            SocketAddr::from(([0, 0, 0, 0], 0))
        } else {
            SocketAddr::from(([0u16; 8], 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| DomainError::DnsQuery(format!("Failed to bind UDP socket: {}", e)))?;

        tokio::time::timeout(self.timeout, socket.send_to(query, server))
            .await
            .map_err(|_| DomainError::DnsQuery(format!("Timeout sending query to {}", server)))?
            .map_err(|e| DomainError::DnsQuery(format!("Failed to send query to {}: {}", server, e)))?;

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let (received, from) = tokio::time::timeout(self.timeout, socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| DomainError::DnsQuery(format!("Timeout waiting for {}", server)))?
            .map_err(|e| {
                DomainError::DnsQuery(format!("Failed to receive from {}: {}", server, e))
            })?;

        if from.ip() != server.ip() {
            warn!(expected = %server, received_from = %from, "DNS response from unexpected source");
        }

        recv_buf.truncate(received);
        Ok(recv_buf)
    }
}

#[async_trait]
impl HostResolver for UdpHostResolver {
    async fn lookup_a(&self, server: &str, domain: &str) -> Result<Vec<Ipv4Addr>, DomainError> {
        let addr = Self::parse_server(server)?;
        let (id, query) = Self::build_query(domain)?;

        let response = self.exchange(addr, &query).await?;
        let answers = Self::parse_answers(&response, id, addr)?;

        debug!(server = %addr, domain = %domain, answers = answers.len(), "A lookup completed");
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::rr::rdata::A;
    use hickory_proto::rr::Record;

    fn respond(query: &[u8], rcode: ResponseCode, answers: &[Ipv4Addr]) -> Vec<u8> {
        let request = Message::from_vec(query).unwrap();
        let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
        response.set_response_code(rcode);
        let name = request.queries()[0].name().clone();
        for query in request.queries() {
            response.add_query(query.clone());
        }
        for addr in answers {
            response.add_answer(Record::from_rdata(name.clone(), 60, RData::A(A(*addr))));
        }
        let mut buf = Vec::new();
        let mut encoder = BinEncoder::new(&mut buf);
        response.emit(&mut encoder).unwrap();
        buf
    }

    async fn fake_server(rcode: ResponseCode, answers: Vec<Ipv4Addr>) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            if let Ok((n, peer)) = socket.recv_from(&mut buf).await {
                let reply = respond(&buf[..n], rcode, &answers);
                let _ = socket.send_to(&reply, peer).await;
            }
        });
        addr
    }

    #[test]
    fn test_parse_server_defaults_to_port_53() {
        assert_eq!(
            UdpHostResolver::parse_server("1.1.1.1").unwrap(),
            "1.1.1.1:53".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            UdpHostResolver::parse_server("9.9.9.9:5353").unwrap().port(),
            5353
        );
        assert!(UdpHostResolver::parse_server("not-an-ip").is_err());
    }

    #[test]
    fn test_query_has_recursion_desired() {
        let (_, bytes) = UdpHostResolver::build_query("example.com").unwrap();
        assert!(bytes.len() >= 12);
        assert_eq!(bytes[2] & 0x01, 0x01);
    }

    #[tokio::test]
    async fn test_lookup_returns_a_records() {
        let addr = fake_server(
            ResponseCode::NoError,
            vec![Ipv4Addr::new(93, 184, 216, 34), Ipv4Addr::new(93, 184, 216, 35)],
        )
        .await;

        let resolver = UdpHostResolver::new(Duration::from_secs(2));
        let answers = resolver
            .lookup_a(&addr.to_string(), "example.com")
            .await
            .unwrap();

        assert_eq!(
            answers,
            vec![Ipv4Addr::new(93, 184, 216, 34), Ipv4Addr::new(93, 184, 216, 35)]
        );
    }

    #[tokio::test]
    async fn test_servfail_is_an_error() {
        let addr = fake_server(ResponseCode::ServFail, vec![]).await;

        let resolver = UdpHostResolver::new(Duration::from_secs(2));
        let result = resolver.lookup_a(&addr.to_string(), "example.com").await;

        assert!(matches!(result, Err(DomainError::DnsQuery(_))));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();

        let resolver = UdpHostResolver::new(Duration::from_millis(100));
        let err = resolver
            .lookup_a(&addr.to_string(), "example.com")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Timeout"));
        drop(socket);
    }
}
