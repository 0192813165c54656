//! Command implementations, one module per subcommand.

mod completions;
mod config;
mod generate;
mod scan;

pub use completions::generate as generate_completions;
pub use config::execute as show_config;
pub use generate::execute as generate;
pub use scan::execute as scan_file;
