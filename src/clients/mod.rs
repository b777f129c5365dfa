pub mod trim_client;

pub use trim_client::TrimClient;
