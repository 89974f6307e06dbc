use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub fn query(id: u16, name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

/// Self-signed certificate for `localhost`, written out as PEM files.
pub struct TestCertificate {
    pub cert_file: NamedTempFile,
    pub key_file: NamedTempFile,
    pub cert_der: rustls::pki_types::CertificateDer<'static>,
}

impl TestCertificate {
    pub fn generate() -> Self {
        let certified =
            rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();

        let mut cert_file = NamedTempFile::new().unwrap();
        cert_file.write_all(certified.cert.pem().as_bytes()).unwrap();
        let mut key_file = NamedTempFile::new().unwrap();
        key_file
            .write_all(certified.key_pair.serialize_pem().as_bytes())
            .unwrap();

        Self {
            cert_file,
            key_file,
            cert_der: certified.cert.der().clone(),
        }
    }

    pub fn cert_path(&self) -> &str {
        self.cert_file.path().to_str().unwrap()
    }

    pub fn key_path(&self) -> &str {
        self.key_file.path().to_str().unwrap()
    }

    /// Client config that trusts only this certificate.
    pub fn client_config(&self) -> Arc<rustls::ClientConfig> {
        passdns_infrastructure::tls::ensure_crypto_provider();
        let mut roots = rustls::RootCertStore::empty();
        roots.add(self.cert_der.clone()).unwrap();
        Arc::new(
            rustls::ClientConfig::builder()
                .with_root_certificates(roots)
                .with_no_client_auth(),
        )
    }
}
