mod loader;
mod model;

pub use loader::{ConfigLoader, FileConfigLoader, FileSystem, LoadResult, RealFileSystem};
pub use model::{
    CONFIG_VERSION, ColorSetting, Config, ReportConfig, ReportStream, SnapshotConfig,
};
