//! Helpers shared by the demo programs

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber honouring `RUST_LOG`, defaulting to INFO
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::INFO.into()))
        .init();
}

/// Print `label` followed by a yes/no marker
pub fn report(label: &str, matched: bool) {
    println!("  {:<60} {}", label, if matched { "yes" } else { "no" });
}
