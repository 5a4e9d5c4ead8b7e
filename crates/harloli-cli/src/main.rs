use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use harloli_cli::OutputFormat;
use harloli_cli::commands::{self, config::ConfigOptions, config::SelectMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "harloli")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Turn HTTP Archive (HAR) captures into LoliCode generation configs",
    long_about = "harloli normalizes HAR files, renders the request dependency graph computed \
                  by an external analyzer, and assembles the configuration handed to a LoliCode generator."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List normalized HAR entries
    Entries {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show the dependency graph and critical path
    Graph {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dependency matrix JSON computed for this HAR file
        #[arg(short, long, value_name = "MATRIX")]
        matrix: PathBuf,
    },

    /// Build the LoliCode generation config (JSON)
    Config {
        /// Path to the HAR file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Dependency matrix JSON computed for this HAR file
        #[arg(short, long, value_name = "MATRIX")]
        matrix: Option<PathBuf>,

        /// Starting selection
        #[arg(long, value_enum, default_value = "all")]
        select: SelectMode,

        /// Add an entry index to the selection (repeatable)
        #[arg(long, value_name = "INDEX")]
        include: Vec<usize>,

        /// Remove an entry index from the selection (repeatable)
        #[arg(long, value_name = "INDEX")]
        exclude: Vec<usize>,

        /// JSON file with base execution settings
        #[arg(long, value_name = "SETTINGS")]
        settings: Option<PathBuf>,

        /// Route generated requests through a proxy
        #[arg(long)]
        proxy: bool,

        /// Do not follow redirects
        #[arg(long)]
        no_follow_redirects: bool,

        /// Request timeout in seconds (1-300, invalid input becomes 30)
        #[arg(long, env = "HARLOLI_TIMEOUT", allow_hyphen_values = true)]
        timeout: Option<String>,

        /// Retries per request (0-10, invalid input becomes 0)
        #[arg(long, env = "HARLOLI_RETRIES", allow_hyphen_values = true)]
        retries: Option<String>,

        /// Custom header applied to every request, as "Name: value" (repeatable)
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Write the config to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    #[command(after_help = "SUPPORTED SHELLS:\n  bash, zsh, fish, powershell, elvish\n\n\
                            INSTALLATION:\n  \
                            bash:  harloli completion --shell bash >> ~/.bashrc\n  \
                            zsh:   harloli completion --shell zsh >> ~/.zshrc\n  \
                            fish:  harloli completion --shell fish > ~/.config/fish/completions/harloli.fish")]
    Completion {
        /// Target shell
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Execute the command
    match cli.command {
        Commands::Entries { file } => commands::entries::execute(&file, cli.format),
        Commands::Graph { file, matrix } => commands::graph::execute(&file, &matrix, cli.format),
        Commands::Config {
            file,
            matrix,
            select,
            include,
            exclude,
            settings,
            proxy,
            no_follow_redirects,
            timeout,
            retries,
            headers,
            output,
        } => commands::config::execute(&ConfigOptions {
            file,
            matrix,
            select,
            include,
            exclude,
            settings,
            proxy,
            no_follow_redirects,
            timeout,
            retries,
            headers,
            output,
        }),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("harloli=debug,harloli_cli=debug,harloli_core=debug")
    } else {
        EnvFilter::new("harloli=info,harloli_cli=info,harloli_core=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
