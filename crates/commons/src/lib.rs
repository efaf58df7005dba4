//! Shared infrastructure for the storefront services.
//!
//! Provides the service discovery registry abstraction and the address
//! resolver the HTTP gateways use to locate healthy service instances.

pub mod discovery;
pub mod resolver;

pub use discovery::{DiscoveryError, InMemoryRegistry, Registry, ServiceInstance};
pub use resolver::{ResolveError, resolve};
