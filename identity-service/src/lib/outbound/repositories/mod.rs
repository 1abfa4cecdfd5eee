pub mod credential;
pub mod in_memory;

pub use credential::PostgresCredentialStore;
pub use in_memory::InMemoryCredentialStore;
