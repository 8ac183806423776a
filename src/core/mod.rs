pub mod context;
pub mod devices;
pub mod discovery;
pub mod transport;
pub mod user_catalogue;

pub use crate::domain::model::{
    ApiResponse, Device, DeviceAssignment, HttpMethod, Resolution, ResolvedEndpoint, ServiceRecord,
    User, UserId,
};
pub use crate::domain::ports::{ConfigProvider, ServiceResolver, Transport};
pub use crate::utils::error::Result;
