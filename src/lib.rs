pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::supabase::SupabaseSink;
pub use config::{CliConfig, SinkConfig};
pub use core::{loader::Importer, reader::read_songs, recorder::FailureRecorder};
pub use domain::model::{ImportSummary, RawCell, RawRow, SourceTable};
pub use domain::ports::SongSink;
pub use utils::error::{ImportError, Result};
