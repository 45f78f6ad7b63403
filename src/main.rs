//! temascope CLI: serve the exported topic-model artifacts as a dashboard.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use temascope::artifact::ArtifactStore;
use temascope::config::DashboardConfig;
use temascope::pages::RenderOptions;
use temascope::paths::ProjectPaths;
use temascope::server::{self, AppState};

#[derive(Parser)]
#[command(
    name = "temascope",
    version,
    about = "Read-only dashboard over exported topic-model artifacts"
)]
struct Cli {
    /// Project root (skips marker discovery).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Configuration file (defaults to <root>/temascope.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the artifacts and serve the dashboard (the default).
    Serve {
        /// Listen port.
        #[arg(long)]
        port: Option<u16>,

        /// Bind address.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Load the artifacts and print table counts and the export manifest.
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let paths = locate(cli.root)?;
    let config = load_config(&paths, cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        bind: None,
    }) {
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }

            let store = Arc::new(ArtifactStore::load(&paths)?);
            let options = RenderOptions {
                overview_top_topics: config.overview_top_topics,
            };
            server::serve(AppState::new(store, options), &config.bind, config.port).await?;
        }

        Commands::Info => {
            let store = ArtifactStore::load(&paths)?;
            print_info(&paths, &store);
        }
    }

    Ok(())
}

/// Resolve the project root: an explicit `--root` is trusted as-is, otherwise
/// discovery walks up from the working directory.
fn locate(explicit: Option<PathBuf>) -> Result<ProjectPaths> {
    match explicit {
        Some(root) => Ok(ProjectPaths::at_root(root)),
        None => {
            let cwd = std::env::current_dir().into_diagnostic()?;
            Ok(ProjectPaths::discover(&cwd)?)
        }
    }
}

/// Read the TOML configuration. An explicit `--config` path must exist; the
/// default location may be absent.
fn load_config(paths: &ProjectPaths, explicit: Option<&Path>) -> Result<DashboardConfig> {
    let config = match explicit {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::load_if_present(&paths.config_file())?,
    };
    Ok(config)
}

fn print_info(paths: &ProjectPaths, store: &ArtifactStore) {
    let counts = store.table_counts();
    println!("Project root:     {}", paths.root.display());
    println!("Export directory: {}", paths.export_dir.display());
    println!();
    println!("  documents         {}", counts.documents);
    println!("  topics            {}", counts.topics);
    println!("  topics_current    {}", counts.topics_current);
    println!("  doc_topics        {}", counts.doc_topics);
    println!("  topic_trends      {}", counts.topic_trends);
    println!("  advisor_profiles  {}", counts.advisor_profiles);
    println!("  advisor_topics    {}", counts.advisor_topics);

    let manifest = store.manifest();
    if manifest.is_empty() {
        println!();
        println!("No export manifest (_manifest.json).");
        return;
    }

    println!();
    println!("Manifest:");
    if let Some(generated) = &manifest.generated_at {
        println!("  generated_at           {generated}");
    }
    if let Some(selection) = &manifest.selection {
        if let Some(method) = &selection.method {
            println!("  selection.method       {method}");
        }
        if let Some(run) = &selection.run {
            println!("  selection.run          {run}");
        }
        if let Some(trial) = selection.trial {
            println!("  selection.trial        {trial}");
        }
        if let Some(k) = selection.k {
            println!("  selection.K            {k}");
        }
        if let Some(pct) = selection.reported_outliers_pct {
            println!("  reported_outliers_pct  {:.1}%", pct * 100.0);
        }
    }
    if let Some(corpus) = &manifest.corpus {
        if let Some(n_docs) = corpus.n_docs {
            println!("  corpus.n_docs          {n_docs}");
        }
        if let Some(years) = &corpus.years {
            if let (Some(min), Some(max)) = (years.min, years.max) {
                println!("  corpus.years           {min}-{max}");
            }
        }
    }
}
