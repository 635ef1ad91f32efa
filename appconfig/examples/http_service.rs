//! Minimal service wiring: derive a schema, embed the standard controls,
//! and load from defaults, flags, environment, and an optional YAML file.
//!
//! Try:
//!
//! ```text
//! cargo run --example http_service -- --help
//! cargo run --example http_service -- --example
//! DEMO_TITLE=prod cargo run --example http_service -- --http-addr=:9090
//! ```

use appconfig::{AppConfig, ConfigBase};

#[derive(Debug, Default, AppConfig)]
struct HttpConfig {
    #[conf(flag = "addr", default = ":8080", help = "listen address")]
    address: String,
    #[conf(default = "30", help = "request timeout in seconds")]
    timeout_secs: u64,
    #[conf(help = "serve over TLS")]
    use_tls: bool,
}

#[derive(Debug, Default, AppConfig)]
struct ServiceConfig {
    #[conf(flatten)]
    base: ConfigBase,
    #[conf(default = "demo service", help = "service display name")]
    title: String,
    #[conf(nested)]
    http: HttpConfig,
}

fn main() {
    let mut cfg = ServiceConfig::default();
    match appconfig::load(&mut cfg, "DEMO") {
        Ok(()) => {}
        Err(err) if err.is_stop_request() => return,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
    println!("{cfg:#?}");
}
