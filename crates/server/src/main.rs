use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use soroscope_server::{service, AttestationCache, ProxyConfig, ProxyService};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "soroscope-server",
    about = "Attestation lookup proxy and static asset server"
)]
struct ServerArgs {
    /// Address to bind the HTTP endpoint to
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Directory the dashboard's static assets are served from
    #[arg(long, default_value = "static")]
    static_root: PathBuf,

    /// Base URL of the attestation registry
    #[arg(long, default_value = "https://api.github.com")]
    upstream: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("soroscope_server=info".parse()?),
        )
        .init();

    let args = ServerArgs::parse();
    let cache = Arc::new(AttestationCache::new());
    let proxy = Arc::new(ProxyService::new(
        ProxyConfig {
            upstream_base: args.upstream,
            static_root: args.static_root,
        },
        cache,
    ));

    service::serve(args.bind, proxy).await
}
