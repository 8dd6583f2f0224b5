mod persist;
mod report;

pub use persist::{PersistError, persist};
pub use report::report;
