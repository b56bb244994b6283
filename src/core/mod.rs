pub mod catalog;
pub mod display;
pub mod report;
pub mod search;

pub use crate::domain::model::{Card, Cylinder, CylinderRow, SearchMatch};
pub use crate::domain::ports::{ConfigProvider, DataSource};
pub use crate::utils::error::Result;
