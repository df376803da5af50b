//! Prometheus metrics.

use super::env::{parse_bool_env, parse_port_env};
use crate::config::MetricsSettings;
use crate::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Default Prometheus listener port.
pub const DEFAULT_METRICS_PORT: u16 = 9464;

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,
    /// Address to bind the metrics exporter.
    pub listen_addr: SocketAddr,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_METRICS_PORT),
        }
    }
}

impl MetricsConfig {
    /// Builds metrics configuration from config settings with env overrides.
    ///
    /// `WORKFACTS_METRICS_ENABLED` and `WORKFACTS_METRICS_PORT` win over the file.
    #[must_use]
    pub fn from_settings(settings: Option<&MetricsSettings>) -> Self {
        let enabled = settings.and_then(|config| config.enabled).unwrap_or(false);
        let port = settings
            .and_then(|config| config.port)
            .unwrap_or(DEFAULT_METRICS_PORT);

        let mut config = Self {
            enabled,
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
        };

        if let Some(enabled) = parse_bool_env("WORKFACTS_METRICS_ENABLED") {
            config.enabled = enabled;
        }
        if let Some(port) = parse_port_env("WORKFACTS_METRICS_PORT") {
            config.listen_addr.set_port(port);
        }

        config
    }
}

/// Installed recorder handle.
#[derive(Debug, Clone)]
pub struct MetricsHandle {
    prometheus: PrometheusHandle,
}

impl MetricsHandle {
    /// Renders the current metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.prometheus.render()
    }
}

/// Installs the Prometheus recorder, with an HTTP listener when `expose` is set.
///
/// Returns `None` when metrics are disabled. The listener runs on the current
/// tokio runtime.
///
/// # Errors
///
/// Returns an error if a global recorder is already installed, or if the
/// listener is requested outside a runtime or cannot be built.
pub fn install_prometheus(config: &MetricsConfig, expose: bool) -> Result<Option<MetricsHandle>> {
    if !config.enabled {
        return Ok(None);
    }

    let builder = PrometheusBuilder::new();
    let prometheus = if expose {
        spawn_listener(builder.with_http_listener(config.listen_addr))?
    } else {
        builder.install_recorder().map_err(install_error)?
    };

    tracing::debug!(expose, addr = %config.listen_addr, "Prometheus recorder installed");
    Ok(Some(MetricsHandle { prometheus }))
}

fn spawn_listener(builder: PrometheusBuilder) -> Result<PrometheusHandle> {
    let runtime = tokio::runtime::Handle::try_current().map_err(install_error)?;
    let (recorder, exporter) = {
        let _entered = runtime.enter();
        builder.build().map_err(install_error)?
    };
    let prometheus = recorder.handle();
    metrics::set_global_recorder(recorder).map_err(install_error)?;
    runtime.spawn(exporter);
    Ok(prometheus)
}

fn install_error(e: impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: "metrics_install".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_without_env() {
        let settings = MetricsSettings {
            enabled: Some(true),
            port: Some(9100),
        };
        let config = MetricsConfig::from_settings(Some(&settings));
        if std::env::var("WORKFACTS_METRICS_ENABLED").is_err() {
            assert!(config.enabled);
        }
        if std::env::var("WORKFACTS_METRICS_PORT").is_err() {
            assert_eq!(config.listen_addr.port(), 9100);
        }
    }

    #[test]
    fn test_disabled_installs_nothing() {
        let config = MetricsConfig::default();
        assert!(install_prometheus(&config, false).unwrap().is_none());
    }
}
