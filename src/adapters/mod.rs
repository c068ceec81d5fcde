// Adapters - External system implementations

pub mod exec_process;
pub mod fs_local;
pub mod probe_mkvinfo;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_process::ProcessExecAdapter;
pub use fs_local::FsLocalAdapter;
pub use probe_mkvinfo::MkvinfoProbeAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::{LogLevel, TracingLogAdapter};
