//! Command-line surface of `storefront`.
//!
//! Kept free of crate-internal imports so `build.rs` can include it for
//! man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// storefront -- compose and preview the storefront homepage
#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Manage and preview storefront homepage sections",
    long_about = "Author the ordered list of homepage sections, resolve them against \n\
        a store snapshot, and render the resulting page as HTML or JSON.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Store snapshot file (JSON)
    #[arg(long, short = 's', env = "STOREFRONT_STORE", global = true)]
    pub store: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'c', env = "STOREFRONT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "STOREFRONT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Color status lines on stderr
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Assume yes for destructive actions
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Presentation ────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
    /// JSON on one line
    JsonCompact,
    /// YAML
    Yaml,
    /// One id per line
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Only when stderr is a terminal
    Auto,
    /// Even when piped
    Always,
    /// Never
    Never,
}

// ── Commands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage homepage sections
    #[command(alias = "sec")]
    Sections(SectionsArgs),

    /// Resolve and render the public homepage
    #[command(alias = "home")]
    Homepage(HomepageArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

// ── Sections ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SectionsArgs {
    #[command(subcommand)]
    pub command: SectionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SectionsCommand {
    /// List sections in display order
    #[command(alias = "ls")]
    List {
        /// Only active, published sections
        #[arg(long)]
        public: bool,
    },

    /// Show one section
    Get {
        /// Section ID or name
        id: String,
    },

    /// Create a new section
    Create {
        /// Section name (unique)
        #[arg(long, required_unless_present = "from_file")]
        name: Option<String>,

        /// Section type tag, e.g. heroSlider, productCarousel
        #[arg(long = "type", short = 't', required_unless_present = "from_file")]
        section_type: Option<String>,

        /// Heading shown above the section
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        subtitle: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Type-specific config as a JSON object
        #[arg(long)]
        config: Option<String>,

        /// Position (defaults to after the last section)
        #[arg(long)]
        ordering: Option<i32>,

        /// Create as inactive
        #[arg(long)]
        inactive: bool,

        /// Create as unpublished
        #[arg(long)]
        draft: bool,

        /// Read the whole section from a JSON file
        #[arg(long, short = 'F', conflicts_with_all = &["name", "section_type"])]
        from_file: Option<PathBuf>,
    },

    /// Update an existing section
    Update {
        /// Section ID or name
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "type", short = 't')]
        section_type: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        subtitle: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Replacement config as a JSON object
        #[arg(long)]
        config: Option<String>,

        #[arg(long)]
        ordering: Option<i32>,

        /// Set active (true/false)
        #[arg(long, action = clap::ArgAction::Set)]
        active: Option<bool>,

        /// Set published (true/false)
        #[arg(long, action = clap::ArgAction::Set)]
        published: Option<bool>,

        /// Read the changes from a JSON file (camelCase keys)
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Delete a section
    #[command(alias = "rm")]
    Delete {
        /// Section ID or name
        id: String,
    },

    /// Set the ordering of several sections at once
    Reorder {
        /// ID=ORDERING pairs
        #[arg(value_name = "ID=ORDERING", required_unless_present = "from_file")]
        entries: Vec<String>,

        /// JSON array of {"id", "ordering"} objects
        #[arg(long, short = 'F', conflicts_with = "entries")]
        from_file: Option<PathBuf>,
    },

    /// Report stored sections that fail validation
    Validate,

    /// List the recognized section types
    Types,
}

// ── Homepage ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HomepageArgs {
    #[command(subcommand)]
    pub command: HomepageCommand,
}

#[derive(Debug, Subcommand)]
pub enum HomepageCommand {
    /// Resolve public sections and report what each one produced
    Resolve,

    /// Render the public homepage
    Render {
        /// Page format
        #[arg(long, short = 'f', value_enum, default_value = "html")]
        format: RenderFormat,

        /// HTML fragment placed between the announcement bar and main content (HTML only)
        #[arg(long)]
        header: Option<PathBuf>,

        /// Write to a file instead of stdout
        #[arg(long = "out", short = 'O')]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RenderFormat {
    /// HTML fragment
    Html,
    /// The page layout as JSON
    Json,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (file, env and defaults)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
