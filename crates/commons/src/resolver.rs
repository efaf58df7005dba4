//! Address resolution with uniform random load distribution.

use rand::Rng;
use thiserror::Error;

use crate::discovery::{DiscoveryError, Registry};

/// Errors returned when resolving a logical service name.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No healthy instance of the service is currently known.
    #[error("no healthy address for service '{service}'")]
    ServiceUnavailable { service: String },
}

/// Resolves a logical service name to the address of one healthy
/// instance, chosen uniformly at random.
///
/// The choice is stateless: nothing is cached between calls, so
/// consecutive calls may land on different instances. An empty or
/// unknown service fails with `ServiceUnavailable` before any network
/// activity happens.
pub async fn resolve<R>(registry: &R, service_name: &str) -> Result<String, ResolveError>
where
    R: Registry + ?Sized,
{
    let addrs = match registry.service_addresses(service_name).await {
        Ok(addrs) => addrs,
        Err(DiscoveryError::NotRegistered(_)) => {
            return Err(ResolveError::ServiceUnavailable {
                service: service_name.to_string(),
            });
        }
    };

    if addrs.is_empty() {
        return Err(ResolveError::ServiceUnavailable {
            service: service_name.to_string(),
        });
    }

    let index = rand::rng().random_range(0..addrs.len());
    Ok(addrs[index].clone())
}
