use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "pushout-energy",
    about = "Per-cycle energy contributions of cyclic push-out measurements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse measurement files and write elastic, plastic, friction and plastic-total energies.
    Analyze(AnalyzeArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DelimiterArg {
    Whitespace,
    Tab,
    Comma,
}

#[derive(Parser, Debug)]
struct AnalyzeArgs {
    /// Directory holding the raw measurement files.
    #[arg(long, default_value = "./")]
    source: String,

    /// Analyse only this file (exact name relative to --source, no wildcards) instead of every matching file.
    #[arg(long)]
    filename: Option<String>,

    /// Extension of measurement files picked up from --source (case-sensitive; `.gz` allowed on top).
    #[arg(long, default_value = "TXT")]
    extension: String,

    /// Output directory for plots and energy tables (created if missing).
    #[arg(long, default_value = "./plots/")]
    dest: String,

    /// Optional TOML file overriding analysis parameters; defaults are embedded.
    #[arg(long)]
    params: Option<String>,

    /// Zero-based column holding the displacement.
    #[arg(long, default_value_t = 2)]
    x_col: usize,

    /// Zero-based column holding the force.
    #[arg(long, default_value_t = 3)]
    y_col: usize,

    /// Column separator of the measurement tables.
    #[arg(long, value_enum, default_value_t = DelimiterArg::Whitespace)]
    delimiter: DelimiterArg,

    /// Skip the SVG energy overview per measurement.
    #[arg(long)]
    no_plot: bool,

    /// Skip the per-quantity energy tables.
    #[arg(long)]
    no_savetxt: bool,

    /// Number of threads (rayon worker threads).
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze(args) => {
            let delimiter = match args.delimiter {
                DelimiterArg::Whitespace => pushout_energy::Delimiter::Whitespace,
                DelimiterArg::Tab => pushout_energy::Delimiter::Tab,
                DelimiterArg::Comma => pushout_energy::Delimiter::Comma,
            };
            let cfg = pushout_energy::AnalyzeConfig {
                source: args.source,
                filename: args.filename,
                extension: args.extension,
                dest: args.dest,
                params_path: args.params,
                layout: pushout_energy::ColumnLayout {
                    x_col: args.x_col,
                    y_col: args.y_col,
                    delimiter,
                },
                plot: !args.no_plot,
                save_txt: !args.no_savetxt,
                threads: args.threads,
            };
            pushout_energy::analyze(cfg).map(|_| ())
        }
    }
}
