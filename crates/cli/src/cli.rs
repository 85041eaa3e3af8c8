//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::EventKind;
use std::path::PathBuf;

/// Pipeline Events - inspect and produce document-pipeline event messages
#[derive(Parser, Debug)]
#[command(
    name = "pipeline-events",
    author,
    version,
    about = "Inspect and produce document-pipeline event messages",
    long_about = "Decode, validate and generate the JSON messages exchanged by the \n\
                  PDF → page image → text → speech → final audio pipeline.\n\n\
                  Messages are untagged (kind given by the channel, use --kind) \n\
                  or tagged with an `eventType` field."
)]
pub struct Cli {
    /// Increase logging verbosity (default warn; -v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PIPELINE_EVENTS_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "PIPELINE_EVENTS_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode one message and print its canonical encoding
    Decode(DecodeArgs),

    /// Decode and validate message files
    Validate(ValidateArgs),

    /// Print a sample message of the given kind
    Sample(SampleArgs),

    /// List event kinds in pipeline order
    Kinds(KindsArgs),
}

/// Arguments for the `decode` command
#[derive(Parser, Debug, Clone)]
pub struct DecodeArgs {
    /// Message kind (the channel's kind); omit for tagged messages
    #[arg(short, long, value_enum, env = "PIPELINE_EVENTS_KIND")]
    pub kind: Option<KindArg>,

    /// Input file, `-` for stdin
    #[arg(short, long, default_value = "-")]
    pub input: PathBuf,

    /// Run publish-time validation after decoding
    #[arg(long)]
    pub validate: bool,

    /// Print with the `eventType` tag
    #[arg(long)]
    pub tagged: bool,

    /// Pretty-print the output (keys sorted)
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Message files to validate
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Message kind shared by all files; omit for tagged messages
    #[arg(short, long, value_enum, env = "PIPELINE_EVENTS_KIND")]
    pub kind: Option<KindArg>,

    /// Output validation results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `sample` command
#[derive(Parser, Debug, Clone)]
pub struct SampleArgs {
    /// Kind of message to generate
    #[arg(short, long, value_enum)]
    pub kind: KindArg,

    /// Include the `eventType` tag
    #[arg(long)]
    pub tagged: bool,

    /// Pretty-print the output (keys sorted)
    #[arg(long)]
    pub pretty: bool,

    /// Workflow id for the header
    #[arg(long, default_value = "workflow-123", env = "PIPELINE_EVENTS_WORKFLOW_ID")]
    pub workflow_id: String,

    /// User id for the header
    #[arg(long, default_value = "user-456", env = "PIPELINE_EVENTS_USER_ID")]
    pub user_id: String,

    /// Tenant id for the header
    #[arg(long, default_value = "tenant-789", env = "PIPELINE_EVENTS_TENANT_ID")]
    pub tenant_id: String,
}

/// Arguments for the `kinds` command
#[derive(Parser, Debug)]
pub struct KindsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Event kind as given on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    PdfCreated,
    PngCreated,
    TextProcessed,
    AudioChunkCreated,
    WavFileCreated,
    FinalAudioCreated,
}

impl From<KindArg> for EventKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::PdfCreated => EventKind::PdfCreated,
            KindArg::PngCreated => EventKind::PngCreated,
            KindArg::TextProcessed => EventKind::TextProcessed,
            KindArg::AudioChunkCreated => EventKind::AudioChunkCreated,
            KindArg::WavFileCreated => EventKind::WavFileCreated,
            KindArg::FinalAudioCreated => EventKind::FinalAudioCreated,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
