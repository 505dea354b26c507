//! isupportd - print the ISUPPORT burst a client would receive, and rebuild
//! it on SIGHUP.

use slircd_isupport::config::{Config, validate};
use slircd_isupport::isupport::{IsupportManager, ModuleHost};
use slircd_isupport::modules::builtin_contributors;
use slircd_isupport::telemetry::init_tracing;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let nick = args.next().unwrap_or_else(|| "*".to_string());

    let config = load_config(&config_path)?;
    info!(
        server = %config.server.name,
        network = %config.server.network,
        "Starting isupportd"
    );

    let host = ModuleHost::with_contributors(
        IsupportManager::from_config(&config),
        builtin_contributors(&config),
    );
    host.boot();

    for line in host.send_to(&nick)? {
        print!("{line}");
    }

    wait_for_signals(&host, &config_path, &nick).await
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    let config = Config::load(path).inspect_err(|e| {
        error!(path = %path, error = %e, "Failed to load config");
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(path = %path, error = %e, "Invalid configuration");
        }
        anyhow::bail!("{} configuration error(s) in {path}", errors.len());
    }
    Ok(config)
}

#[cfg(unix)]
async fn wait_for_signals(host: &ModuleHost, config_path: &str, nick: &str) -> anyhow::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sighup = signal(SignalKind::hangup())?;
    loop {
        tokio::select! {
            _ = sighup.recv() => {
                info!("Received SIGHUP, reloading configuration");
                reload(host, config_path, nick);
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                info!("Received SIGINT, shutting down");
                return Ok(());
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signals(
    _host: &ModuleHost,
    _config_path: &str,
    _nick: &str,
) -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Received Ctrl-C, shutting down");
    Ok(())
}

/// Recreate the built-in contributors and line limits from a fresh
/// configuration and print what changed. The server name keeps its startup
/// value.
#[cfg(unix)]
fn reload(host: &ModuleHost, config_path: &str, nick: &str) {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Keeping previous configuration");
            return;
        }
    };
    if config.server.name != host.manager().server_name() {
        warn!(
            configured = %config.server.name,
            running = %host.manager().server_name(),
            "server.name changes need a restart"
        );
    }

    // The reserve follows the reloaded NICKLEN but the running server name.
    let limits = config
        .isupport
        .line_limits(host.manager().server_name(), config.limits.nicklen);
    let report = host.reconfigure(limits, builtin_contributors(&config));
    for line in host.manager().send_delta_to(nick, &report) {
        print!("{line}");
    }
}
