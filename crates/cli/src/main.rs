use clap::Parser;
use passdns_application::services::{DebounceGate, PassiveCache};
use passdns_application::use_cases::HandleDnsQueryUseCase;
use passdns_domain::{CliOverrides, Config};
use passdns_infrastructure::dns::{DnsServerHandler, UpstreamRouter};
use passdns_infrastructure::store::RedbPtrStore;
use passdns_infrastructure::tls::load_tls_acceptor;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "passdns")]
#[command(version)]
#[command(about = "Forwarding DNS resolver with a passive reverse-lookup cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream server, `[domain=][proto://]host:port`; repeat for more routes
    #[arg(short = 'u', long = "upstream", value_name = "SPEC")]
    upstreams: Vec<String>,

    /// UDP listen address, `host:port` or `:port` ("" disables)
    #[arg(long)]
    listen: Option<String>,

    /// DNS-over-TLS listen address, `host:port` or `:port`
    #[arg(long)]
    tls_listen: Option<String>,

    /// PEM certificate for the TLS listener
    #[arg(long)]
    cert: Option<String>,

    /// PEM private key (defaults to the certificate file)
    #[arg(long)]
    key: Option<String>,

    /// Debounce window per source IP, e.g. 200ms
    #[arg(long, value_name = "DURATION")]
    debounce: Option<String>,

    /// Replies allowed inside one debounce window
    #[arg(long, value_name = "N")]
    count: Option<u32>,

    /// Durable passive-DNS store ("" disables)
    #[arg(long, value_name = "PATH")]
    store: Option<String>,

    /// Directory to chroot into ("" disables)
    #[arg(long, value_name = "DIR")]
    chroot: Option<String>,

    /// Only log warnings and errors
    #[arg(short = 's', long)]
    silent: bool,

    /// Upstream exchange timeout, 0 for none
    #[arg(long, value_name = "DURATION")]
    client_timeout: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        listen: cli.listen,
        tls_listen: cli.tls_listen,
        cert: cli.cert,
        key: cli.key,
        upstreams: cli.upstreams,
        client_timeout: cli.client_timeout,
        debounce_window: cli.debounce,
        debounce_burst: cli.count,
        store_path: cli.store,
        chroot: cli.chroot,
        log_level: cli.log_level,
        silent: cli.silent,
    };

    let config = Config::load(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);
    config.validate()?;

    info!("Starting passdns v{}", env!("CARGO_PKG_VERSION"));

    let specs = config.upstream.specs()?;
    let client_timeout = config.upstream.client_timeout()?;
    let debounce_window = config.debounce.window()?;

    let acceptor = if config.server.tls_enabled() {
        Some(load_tls_acceptor(
            &config.server.cert,
            config.server.key_path(),
        )?)
    } else {
        None
    };

    bootstrap::drop_privileges(&config.privileges)?;

    let cache = if config.store.enabled() {
        let store = RedbPtrStore::open(&config.store.path)?;
        PassiveCache::with_store(Arc::new(store))
    } else {
        PassiveCache::new()
    };
    cache.load().await?;

    let use_case = HandleDnsQueryUseCase::new(
        Arc::new(DebounceGate::new(debounce_window, config.debounce.burst)),
        Arc::new(cache),
        Arc::new(UpstreamRouter::new(specs, client_timeout)),
    );
    let handler = DnsServerHandler::new(Arc::new(use_case));

    server::start_dns_listeners(&config.server, acceptor, handler)?;
    server::wait_for_shutdown().await;

    Ok(())
}
