//! Startup banner and URL display

use super::config::{BackendKind, is_all_interfaces};
use super::constants::APP_NAME;
use crate::utils::terminal::terminal_link;

const LABEL_WIDTH: usize = 10;

fn entry(label: &str, value: &str) {
    println!(
        "  \x1b[32m➜\x1b[0m  \x1b[1m{:<LABEL_WIDTH$}\x1b[0m {}",
        label, value
    );
}

fn hint(label: &str, value: &str) {
    println!("  \x1b[90m➜  {:<LABEL_WIDTH$} {}\x1b[0m", label, value);
}

/// Addresses other machines can use to reach the server
fn network_urls(host: &str, port: u16) -> Vec<String> {
    if is_all_interfaces(host) {
        local_ip_address::list_afinet_netifas()
            .map(|interfaces| {
                interfaces
                    .into_iter()
                    .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
                    .map(|(_, ip)| format!("http://{}:{}", ip, port))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        vec![format!("http://{}:{}", host, port)]
    }
}

/// Print the startup banner with URLs
pub fn print_banner(host: &str, port: u16, backend: BackendKind, supabase_url: &str) {
    let display_host = if is_all_interfaces(host) {
        "localhost"
    } else {
        host
    };
    let local_url = format!("http://{}:{}", display_host, port);

    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90mv{}\x1b[0m",
        APP_NAME,
        env!("CARGO_PKG_VERSION")
    );
    println!();

    entry("Local:", &terminal_link(&local_url));
    entry("API docs:", &terminal_link(&format!("{}/api/docs", local_url)));

    if matches!(host, "127.0.0.1" | "localhost") {
        hint("Network:", "use --host 0.0.0.0 to expose");
    } else {
        for url in network_urls(host, port) {
            entry("Network:", &terminal_link(&url));
        }
    }

    match backend {
        BackendKind::Supabase => hint("Backend:", supabase_url),
        BackendKind::Memory => hint("Backend:", "in-memory (data is lost on restart)"),
    }
    println!();
}
