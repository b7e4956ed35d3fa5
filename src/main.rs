use clap::Parser;
use gopkg_graph::config::{self, CliOverrides, Settings};
use gopkg_graph::namespace::NamespaceResolver;
use gopkg_graph::output::{self, OutputFormat};
use gopkg_graph::{analysis, classify};
use log::{debug, info, warn};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Generate a graph of the internal package imports of a Go project"
)]
struct Args {
    /// Directory to scan
    #[arg(value_name = "SCAN_DIR")]
    scan_dir: PathBuf,

    /// Write the graph to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Module path to treat as internal (defaults to the go.mod declaration)
    #[arg(short = 'm', long)]
    module: Option<String>,

    /// Output format (defaults to one inferred from the output file extension, else dot)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Highlight packages whose path contains this marker
    #[arg(long)]
    highlight: Option<String>,

    /// Scan files whose name contains this marker
    #[arg(long)]
    source_marker: Option<String>,

    /// Wildcard pattern of directories to skip (can be repeated)
    #[arg(long = "exclude")]
    exclude: Vec<String>,

    /// Log and skip unreadable files instead of failing
    #[arg(long)]
    skip_unreadable: bool,

    /// Fail instead of asking for the module name when it cannot be resolved
    #[arg(long)]
    no_prompt: bool,

    /// Enable verbose output
    #[arg(short = 'v')]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            output_file: self.output_file.clone(),
            format: self.format,
            module: self.module.clone(),
            highlight: self.highlight.clone(),
            source_marker: self.source_marker.clone(),
            exclude: self.exclude.clone(),
            skip_unreadable: self.skip_unreadable,
            no_prompt: self.no_prompt,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!("{args:?}");

    analysis::ensure_scan_root(&args.scan_dir)?;

    let file_config = config::load_config(&args.scan_dir)?.unwrap_or_default();
    let mut settings = Settings::new(args.scan_dir.clone(), file_config);
    settings.apply_overrides(args.overrides());
    debug!("{settings:?}");

    let namespace = NamespaceResolver::new(std::io::stdin().lock(), std::io::stderr())
        .resolve(&settings.scan_directory, &settings.namespace_sources())?;

    let graph =
        analysis::analyze_project(&settings.scan_directory, &namespace, &settings.analysis)?;

    info!("Generating graph...");
    let classification = classify(graph.nodes(), &settings.highlight);
    let dependency_graph = output::to_dependency_graph(&graph, &classification);

    for cycle in dependency_graph.import_cycles() {
        let members: Vec<String> = cycle.iter().map(ToString::to_string).collect();
        warn!("Import cycle between packages: {}", members.join(", "));
    }

    let rendered = output::render(&dependency_graph, settings.output_format())?;

    if let Some(path) = &settings.output_file {
        info!("Saving to {}...", path.display());
    }
    output::write_output(&rendered, settings.output_file.as_deref())?;

    Ok(())
}
