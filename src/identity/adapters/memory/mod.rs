//! In-memory adapters for identity ports, used by tests and local tooling.

mod credentials;
mod owner;

pub use credentials::InMemoryCredentialService;
pub use owner::InMemoryOwnerRepository;
