//! Service discovery registry.
//!
//! The registry maps logical service names to the network addresses of
//! their live instances. Instances register themselves, report health
//! periodically, and are treated as absent once their last report is
//! older than the health TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Default window within which an instance must report healthy to be
/// considered alive.
pub const DEFAULT_HEALTH_TTL: Duration = Duration::from_secs(5);

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The requested service or instance is not registered.
    #[error("service or instance not registered: {0}")]
    NotRegistered(String),
}

/// A single registered instance of a service.
#[derive(Debug, Clone)]
pub struct ServiceInstance {
    pub instance_id: String,
    pub address: String,
    pub last_seen: Instant,
}

/// Registry of live service instances.
///
/// Only `service_addresses` is consumed by this workspace's gateways;
/// the remaining operations exist for instances managing their own
/// registration lifecycle.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Registers an instance of a service under the given address.
    async fn register(
        &self,
        instance_id: &str,
        service_name: &str,
        address: &str,
    ) -> Result<(), DiscoveryError>;

    /// Removes an instance from a service.
    async fn deregister(&self, instance_id: &str, service_name: &str)
    -> Result<(), DiscoveryError>;

    /// Refreshes the health timestamp of an instance.
    async fn report_healthy(
        &self,
        instance_id: &str,
        service_name: &str,
    ) -> Result<(), DiscoveryError>;

    /// Returns the addresses of all currently healthy instances of a
    /// service. Fails with `NotRegistered` when none are known.
    async fn service_addresses(&self, service_name: &str) -> Result<Vec<String>, DiscoveryError>;
}

type Services = HashMap<String, HashMap<String, ServiceInstance>>;

/// In-memory registry implementation.
///
/// Constructed with a health TTL for dynamically registered instances,
/// or without one for topologies seeded statically from configuration.
#[derive(Clone)]
pub struct InMemoryRegistry {
    services: Arc<RwLock<Services>>,
    health_ttl: Option<Duration>,
}

impl InMemoryRegistry {
    /// Creates a registry with the default health TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_HEALTH_TTL)
    }

    /// Creates a registry with a custom health TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
            health_ttl: Some(ttl),
        }
    }

    /// Creates a registry whose instances never expire.
    ///
    /// Used when the topology is seeded once from configuration and no
    /// instance reports health.
    pub fn without_ttl() -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
            health_ttl: None,
        }
    }

    fn is_alive(&self, instance: &ServiceInstance) -> bool {
        match self.health_ttl {
            Some(ttl) => instance.last_seen.elapsed() <= ttl,
            None => true,
        }
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for InMemoryRegistry {
    async fn register(
        &self,
        instance_id: &str,
        service_name: &str,
        address: &str,
    ) -> Result<(), DiscoveryError> {
        let mut services = self.services.write().await;
        let instances = services.entry(service_name.to_string()).or_default();
        instances.insert(
            instance_id.to_string(),
            ServiceInstance {
                instance_id: instance_id.to_string(),
                address: address.to_string(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(service = service_name, instance = instance_id, address, "instance registered");
        Ok(())
    }

    async fn deregister(
        &self,
        instance_id: &str,
        service_name: &str,
    ) -> Result<(), DiscoveryError> {
        let mut services = self.services.write().await;
        let instances = services
            .get_mut(service_name)
            .ok_or_else(|| DiscoveryError::NotRegistered(service_name.to_string()))?;

        if instances.remove(instance_id).is_none() {
            return Err(DiscoveryError::NotRegistered(instance_id.to_string()));
        }
        if instances.is_empty() {
            services.remove(service_name);
        }
        Ok(())
    }

    async fn report_healthy(
        &self,
        instance_id: &str,
        service_name: &str,
    ) -> Result<(), DiscoveryError> {
        let mut services = self.services.write().await;
        let instance = services
            .get_mut(service_name)
            .and_then(|instances| instances.get_mut(instance_id))
            .ok_or_else(|| DiscoveryError::NotRegistered(instance_id.to_string()))?;

        instance.last_seen = Instant::now();
        Ok(())
    }

    async fn service_addresses(&self, service_name: &str) -> Result<Vec<String>, DiscoveryError> {
        let services = self.services.read().await;
        let instances = services
            .get(service_name)
            .ok_or_else(|| DiscoveryError::NotRegistered(service_name.to_string()))?;

        let addrs: Vec<String> = instances
            .values()
            .filter(|instance| self.is_alive(instance))
            .map(|instance| instance.address.clone())
            .collect();

        if addrs.is_empty() {
            return Err(DiscoveryError::NotRegistered(service_name.to_string()));
        }

        Ok(addrs)
    }
}
