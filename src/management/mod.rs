mod provider;
mod token_store;

pub use provider::TokenProvider;
pub use token_store::FileTokenStore;
pub use token_store::MemoryTokenStore;
pub use token_store::TokenStore;
