//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - one section per combination with ranking checks
    #[default]
    Pretty,
    /// Table format - one flat table of every result row
    Table,
    /// JSON format - structured for scripts
    Json,
}
