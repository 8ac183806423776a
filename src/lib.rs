pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::ConsoleConfig;
pub use crate::core::{
    context::ConsoleContext, devices::DeviceInventory, discovery::ServiceDiscovery,
    transport::HttpTransport, user_catalogue::UserCatalogueClient,
};
pub use domain::model::{ApiResponse, Device, DeviceAssignment, Resolution, User, UserId};
pub use utils::error::{ConsoleError, ErrorKind, Result};
