pub mod remote;

pub use remote::BackendClient;
