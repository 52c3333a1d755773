use clap::{Parser, Subcommand, ValueEnum};
use of_app::{
    AppError, AppResult, FilterSession, SessionConfig, SpecFormat, load_presets, load_spec,
    parse_edit, parse_script, save_presets, save_spec,
};
use of_core::format_real;
use of_spec::{FilterSpec, derive::range_display};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oceanfilter")]
#[command(
    about = "Build, inspect and store oceanographic filter specifications",
    long_about = None
)]
struct Cli {
    /// Session settings (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl From<Format> for SpecFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Json => SpecFormat::Json,
            Format::Yaml => SpecFormat::Yaml,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default (cleared) specification
    Defaults {
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Check a specification file against every invariant
    Validate {
        /// Path to a .json, .yaml or .yml specification
        spec_path: PathBuf,
    },
    /// Show the active filter count and tags of a specification
    Summary {
        spec_path: PathBuf,
    },
    /// Apply edits to a specification
    Apply {
        /// Starting specification (defaults when omitted)
        #[arg(long)]
        from: Option<PathBuf>,
        /// Single edit, e.g. `add:regions=North Pacific` (repeatable)
        #[arg(short, long = "edit")]
        edits: Vec<String>,
        /// File with one edit per line
        #[arg(long)]
        script: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Manage saved presets
    #[command(subcommand)]
    Preset(PresetCommands),
}

#[derive(Subcommand)]
enum PresetCommands {
    /// Save a specification as a named preset
    Save {
        #[arg(long)]
        store: PathBuf,
        name: String,
        spec_path: PathBuf,
    },
    /// List presets in a store
    List {
        #[arg(long)]
        store: PathBuf,
    },
    /// Write a preset's snapshot out as a specification
    Load {
        #[arg(long)]
        store: PathBuf,
        name: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Remove a preset
    Delete {
        #[arg(long)]
        store: PathBuf,
        name: String,
    },
    /// Rename a preset
    Rename {
        #[arg(long)]
        store: PathBuf,
        from: String,
        to: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => SessionConfig::load_yaml(path)?,
        None => SessionConfig::default(),
    };

    match cli.command {
        Commands::Defaults { format } => emit(&FilterSpec::default(), None, format),
        Commands::Validate { spec_path } => cmd_validate(&spec_path),
        Commands::Summary { spec_path } => cmd_summary(&spec_path),
        Commands::Apply {
            from,
            edits,
            script,
            output,
            format,
        } => cmd_apply(
            config,
            from.as_deref(),
            &edits,
            script.as_deref(),
            output.as_deref(),
            format,
        ),
        Commands::Preset(cmd) => cmd_preset(config, cmd),
    }
}

fn emit(spec: &FilterSpec, output: Option<&Path>, format: Format) -> AppResult<()> {
    match output {
        Some(path) => {
            save_spec(path, spec)?;
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{}", SpecFormat::from(format).encode(spec)?),
    }
    Ok(())
}

fn cmd_validate(spec_path: &Path) -> AppResult<()> {
    println!("Validating specification: {}", spec_path.display());
    load_spec(spec_path)?;
    println!("✓ Specification is valid");
    Ok(())
}

fn cmd_summary(spec_path: &Path) -> AppResult<()> {
    let spec = load_spec(spec_path)?;
    print_summary(&spec);
    Ok(())
}

fn print_summary(spec: &FilterSpec) {
    let summary = of_spec::summarize(spec);
    println!("Active filters: {}", summary.active_filter_count);
    if summary.tags.is_empty() {
        return;
    }
    println!("Tags:");
    for tag in &summary.tags {
        println!("  {}", tag.label());
    }
    println!(
        "Completeness: ≥ {}%",
        format_real(spec.data_completeness)
    );
    println!("Temperature: {}", range_display(&spec.temperature));
    println!("Salinity:    {}", range_display(&spec.salinity));
    println!("Depth:       {}", range_display(&spec.depth));
}

fn cmd_apply(
    config: SessionConfig,
    from: Option<&Path>,
    edits: &[String],
    script: Option<&Path>,
    output: Option<&Path>,
    format: Format,
) -> AppResult<()> {
    let start = match from {
        Some(path) => load_spec(path)?,
        None => FilterSpec::default(),
    };
    let mut session = FilterSession::with_spec(start, config);

    let mut all = Vec::new();
    if let Some(path) = script {
        let text = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        all.extend(parse_script(&text)?);
    }
    for line in edits {
        all.push(parse_edit(line)?);
    }

    tracing::debug!(count = all.len(), "parsed edits");
    let changed = session.edit_all(all)?;
    eprintln!(
        "{} edit(s) changed the specification; {} active filter(s)",
        changed,
        session.active_filter_count()
    );
    emit(session.current(), output, format)
}

fn cmd_preset(config: SessionConfig, cmd: PresetCommands) -> AppResult<()> {
    match cmd {
        PresetCommands::Save {
            store,
            name,
            spec_path,
        } => {
            let mut session = FilterSession::with_spec(load_spec(&spec_path)?, config);
            session.set_presets(load_presets(&store)?);
            let id = session.save_preset(&name)?;
            save_presets(&store, session.presets())?;
            println!("✓ Saved preset '{}' ({})", name.trim(), id);
        }
        PresetCommands::List { store } => {
            let presets = load_presets(&store)?;
            if presets.is_empty() {
                println!("No presets found in {}", store.display());
            } else {
                println!("Presets in {}:", store.display());
                for preset in presets.iter() {
                    println!(
                        "  {} - saved {} ({} active filters)",
                        preset.name,
                        preset.saved_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        of_spec::active_filter_count(&preset.snapshot)
                    );
                }
            }
        }
        PresetCommands::Load {
            store,
            name,
            output,
            format,
        } => {
            let mut session = FilterSession::new(config);
            session.set_presets(load_presets(&store)?);
            session.require_preset(&name)?;
            emit(session.current(), output.as_deref(), format)?;
        }
        PresetCommands::Delete { store, name } => {
            let mut presets = load_presets(&store)?;
            if !presets.delete(&name) {
                return Err(AppError::PresetNotFound(name));
            }
            save_presets(&store, &presets)?;
            println!("✓ Deleted preset '{}'", name);
        }
        PresetCommands::Rename { store, from, to } => {
            let mut presets = load_presets(&store)?;
            presets.rename(&from, &to)?;
            save_presets(&store, &presets)?;
            println!("✓ Renamed preset '{}' to '{}'", from, to.trim());
        }
    }
    Ok(())
}
