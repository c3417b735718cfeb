pub mod batch;
pub mod sources;
pub mod store;

pub use batch::{render_file, BatchDriver, BatchPaths, BatchReport, RenderSummary};
pub use store::{FileLog, MemoryLog, ProcessedLog};
