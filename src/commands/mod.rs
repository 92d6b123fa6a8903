pub mod context;
pub mod report;
pub mod snapshot;

pub use context::{CommandContext, load_config};
pub use report::run_report;
pub use snapshot::run_snapshot;
