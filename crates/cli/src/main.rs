mod cmd;
mod completions;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::engine::ArgValueCompleter;
use clap_complete::{CompleteEnv, Shell};
use sitemigrate_core::ContentType;
use sitemigrate_core::transcript::Dialect;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "smig", version, about = "Migrate Hugo blog content and chat transcripts to Astro")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and print resolved paths
    Doctor,

    /// Translate a Hugo TOML header into Astro YAML frontmatter
    Frontmatter(FrontmatterArgs),

    /// Replace Hugo shortcodes in an MDX file with Astro components
    Shortcodes(ShortcodesArgs),

    /// Restore shortcode images in an MDX file converted without them
    PatchMdx(PatchMdxArgs),

    /// Convert a Hugo page bundle into an Astro post with its assets
    ConvertPost(ConvertPostArgs),

    /// Convert a window of Hugo micro content into the review directory
    ConvertBatch(ConvertBatchArgs),

    /// Add a contentType field to every post based on its directory
    ContentTypes(ContentTypesArgs),

    /// Convert an exported AI chat transcript into a TypeScript module
    Transcript(TranscriptArgs),

    /// Move content into the unified content/<slug>/index.mdx layout
    Migrate(MigrateArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct FrontmatterArgs {
    /// Hugo markdown file with a +++ header
    pub file: PathBuf,

    /// Section the file belongs to; selects type-specific fields
    #[arg(long, add = ArgValueCompleter::new(completions::complete_content_types))]
    pub content_type: Option<ContentType>,

    /// Write the result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ShortcodesArgs {
    /// MDX file to convert in place
    pub file: PathBuf,

    /// Image directory name used in the postDir attribute
    #[arg(long)]
    pub post_dir: String,

    /// Show conversions without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct PatchMdxArgs {
    /// Existing MDX file to patch in place
    pub mdx: PathBuf,

    /// Hugo source file that still has the shortcodes
    pub hugo_source: PathBuf,

    /// Image directory name used in the postDir attribute
    pub post_dir: String,

    /// Show conversions without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ConvertPostArgs {
    /// Hugo page bundle directory containing index.md
    #[arg(add = ArgValueCompleter::new(completions::complete_bundles))]
    pub bundle_dir: PathBuf,

    /// Name of the Astro post (output file stem and asset directory)
    pub post_name: String,

    /// Show targets without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ConvertBatchArgs {
    /// Hugo section to convert (micro, elsewhere, quote, imagery)
    #[arg(add = ArgValueCompleter::new(completions::complete_content_types))]
    pub content_type: ContentType,

    /// Number of files to convert
    #[arg(long, default_value_t = 5)]
    pub batch_size: usize,

    /// Index of the first file to convert
    #[arg(long, default_value_t = 0)]
    pub start_index: usize,
}

#[derive(Debug, Args)]
pub struct ContentTypesArgs {
    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Auto,
    ClaudeCode,
    Cursor,
    Extractor,
    ClaudeAi,
    Chatgpt,
}

impl FormatArg {
    /// The forced dialect, or `None` to detect.
    pub fn dialect(self) -> Option<Dialect> {
        match self {
            FormatArg::Auto => None,
            FormatArg::ClaudeCode => Some(Dialect::ClaudeCode),
            FormatArg::Cursor => Some(Dialect::Cursor),
            FormatArg::Extractor => Some(Dialect::Extractor),
            FormatArg::ClaudeAi => Some(Dialect::WebChat),
            FormatArg::Chatgpt => Some(Dialect::ChatGPT),
        }
    }
}

#[derive(Debug, Args)]
pub struct TranscriptArgs {
    /// Raw transcript (text or markdown export)
    pub input: PathBuf,

    /// TypeScript module to write
    pub output: PathBuf,

    /// Name of the exported constant (default: derived from the input filename)
    #[arg(long)]
    pub export_name: Option<String>,

    /// Transcript format
    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    pub format: FormatArg,
}

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Record what would happen without writing content
    #[arg(long)]
    pub dry_run: bool,

    /// Migrate at most N files per content type
    #[arg(long)]
    pub limit: Option<usize>,

    /// Undo a previous run using its migration map
    #[arg(long, value_name = "MAP", conflicts_with_all = ["dry_run", "limit"])]
    pub rollback: Option<PathBuf>,

    /// Skip the rollback confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    pub shell: Shell,
}

fn main() {
    CompleteEnv::with_factory(Cli::command).complete();

    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(config, profile),
        Commands::Frontmatter(args) => cmd::frontmatter::run(config, profile, args),
        Commands::Shortcodes(args) => cmd::shortcodes::run(config, profile, args),
        Commands::PatchMdx(args) => cmd::patch_mdx::run(config, profile, args),
        Commands::ConvertPost(args) => cmd::convert_post::run(config, profile, args),
        Commands::ConvertBatch(args) => cmd::convert_batch::run(config, profile, args),
        Commands::ContentTypes(args) => cmd::content_types::run(config, profile, args),
        Commands::Transcript(args) => cmd::transcript::run(config, profile, args),
        Commands::Migrate(args) => cmd::migrate::run(config, profile, args),
        Commands::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "smig", &mut std::io::stdout());
        }
    }

    logging::shutdown();
}
