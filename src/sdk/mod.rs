pub mod client;
pub mod config;
pub mod map;
pub mod routing;
pub mod util;
