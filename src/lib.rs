pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use config::{Dataset, Endpoints};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui, UiApp};
