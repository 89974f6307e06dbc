//! Server-side TLS material and the process-wide rustls crypto provider.

use passdns_domain::ConfigError;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use std::fs::File;
use std::io::BufReader;
use std::sync::{Arc, OnceLock};
use tokio_rustls::TlsAcceptor;
use tracing::info;

/// Installs aws-lc-rs as the default provider, once per process.
pub fn ensure_crypto_provider() {
    static CRYPTO_INIT: OnceLock<()> = OnceLock::new();
    CRYPTO_INIT.get_or_init(|| {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// Loads a PEM certificate chain and private key into an acceptor.
///
/// `key_path` may name the certificate file itself when both live in one
/// PEM bundle.
pub fn load_tls_acceptor(cert_path: &str, key_path: &str) -> Result<TlsAcceptor, ConfigError> {
    ensure_crypto_provider();

    let material_error = |reason: String| ConfigError::TlsMaterial {
        cert: cert_path.to_string(),
        key: key_path.to_string(),
        reason,
    };

    let certs = load_certs(cert_path).map_err(&material_error)?;
    let key = load_private_key(key_path).map_err(&material_error)?;

    let server_config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|e| material_error(e.to_string()))?;

    info!(cert = %cert_path, key = %key_path, "TLS certificate loaded");
    Ok(TlsAcceptor::from(Arc::new(server_config)))
}

fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path, e))?;
    let mut reader = BufReader::new(file);

    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("failed to parse certificate: {}", e))?;

    if certs.is_empty() {
        return Err(format!("no certificate found in {}", path));
    }
    Ok(certs)
}

fn load_private_key(path: &str) -> Result<PrivateKeyDer<'static>, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path, e))?;
    let mut reader = BufReader::new(file);

    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| format!("failed to parse private key: {}", e))?
        .ok_or_else(|| format!("no private key found in {}", path))
}
