pub mod command;
pub mod dispatcher;
pub mod engine;
pub mod filtered_view;
pub mod parser;
pub mod store;
pub mod unique_list;

pub use crate::domain::model::{Course, Person};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
