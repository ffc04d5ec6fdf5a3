//! Fans a status request out over the registry and assembles the response.

use serde::Serialize;
use tracing::warn;

use crate::launchctl_client::{ProbeOutcome, Prober};
use crate::parser::{self, StatusRecord};
use crate::registry::ServiceDescriptor;

/// One registry entry merged with its freshly probed state.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub label: String,
    pub name: String,
    #[serde(flatten)]
    pub record: StatusRecord,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub services: Vec<ServiceStatus>,
}

/// Probe every registered service and collect the results in registry
/// order. A failed probe becomes a degraded record for that entry; it
/// never aborts the remaining probes. No caching, every call re-probes.
pub async fn aggregate(registry: &[ServiceDescriptor], prober: &dyn Prober) -> StatusResponse {
    let mut services = Vec::with_capacity(registry.len());

    for descriptor in registry {
        let record = match prober.probe(&descriptor.label).await {
            ProbeOutcome::Completed { exit_code, stdout } => parser::parse(exit_code, &stdout),
            ProbeOutcome::TimedOut => {
                warn!(label = %descriptor.label, "probe timed out");
                StatusRecord::timed_out()
            }
            ProbeOutcome::LaunchFailed(message) => {
                warn!(label = %descriptor.label, error = %message, "probe failed to launch");
                StatusRecord::launch_failed(message)
            }
        };

        services.push(ServiceStatus {
            label: descriptor.label.clone(),
            name: descriptor.display_name.clone(),
            record,
        });
    }

    StatusResponse { services }
}
