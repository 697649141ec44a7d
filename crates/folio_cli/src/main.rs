//! Folio CLI
//!
//! Inspect and change the persisted presentation preferences, look up
//! capability implementations, and run effect surfaces against a synthetic
//! pointer.
//!
//! ```bash
//! folio show
//! folio set-variant liquid-glass
//! folio set-intensity heavy
//! folio params --intensity whisper
//! folio resolve BookCard --variant classic
//! folio simulate --kind droplet --mode auto --duration-ms 10000 --seed 7
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_effects::{Bounds, TriggerMode};
use folio_theme::{
    registry, CapabilityTable, IntensityLevel, KeyValuePersistence, PersistenceAdapter,
    PresentationVariant, ThemeStore, TomlFileStore, Update,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod simulate;

use config::FolioConfig;
use simulate::SimulationOptions;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio presentation runtime - theme preferences and effect surfaces")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (default: <config dir>/folio/folio.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Preference file (overrides [theme].storage_path)
    #[arg(short, long, global = true)]
    storage: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current theme state
    Show,

    /// Switch the presentation variant (classic, liquid-glass)
    SetVariant { variant: String },

    /// Set the glass intensity (whisper, light, medium, heavy, extreme)
    SetIntensity { intensity: String },

    /// Flip between the two variants
    Toggle,

    /// Restore the configured defaults
    Reset,

    /// Print the glass parameters for an intensity
    Params {
        /// Intensity to show (default: the current one)
        #[arg(short, long)]
        intensity: Option<IntensityLevel>,
    },

    /// Show which implementation a capability resolves to
    Resolve {
        /// Capability name, e.g. BookCard
        capability: String,

        /// Variant to resolve for (default: the current one)
        #[arg(long)]
        variant: Option<PresentationVariant>,
    },

    /// List every capability with both implementations
    Capabilities,

    /// Run an effect surface in real time and report what it did
    Simulate {
        /// Effect table name or kind (ripple, droplet, shimmer-sweep)
        #[arg(short, long, default_value = "ripple")]
        kind: String,

        /// Override the trigger mode (hover, click, auto)
        #[arg(short, long)]
        mode: Option<TriggerMode>,

        #[arg(long, default_value = "3000")]
        duration_ms: u64,

        #[arg(long, default_value = "16")]
        frame_ms: u64,

        #[arg(long, default_value = "320")]
        width: f32,

        #[arg(long, default_value = "200")]
        height: f32,

        /// Seed for ambient placement and magnitudes
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FolioConfig::load(cli.config.as_deref())?;
    let storage = cli.storage.as_deref();

    match cli.command {
        Commands::Show => {
            let store = open_store(&config, storage)?;
            print_state(&store);
        }
        Commands::SetVariant { variant } => {
            let mut store = open_store(&config, storage)?;
            let update = store.set_variant_named(&variant);
            report(&store, update).with_context(|| format!("Cannot set variant {variant:?}"))?;
        }
        Commands::SetIntensity { intensity } => {
            let mut store = open_store(&config, storage)?;
            let update = store.set_intensity_named(&intensity);
            report(&store, update)
                .with_context(|| format!("Cannot set intensity {intensity:?}"))?;
        }
        Commands::Toggle => {
            let mut store = open_store(&config, storage)?;
            let update = store.toggle_variant();
            report(&store, update)?;
        }
        Commands::Reset => {
            let mut store = open_store(&config, storage)?;
            let update = store.reset_to_default();
            report(&store, update)?;
        }
        Commands::Params { intensity } => {
            let intensity = match intensity {
                Some(intensity) => intensity,
                None => open_store(&config, storage)?.intensity(),
            };
            let params = intensity.parameters();
            println!("{} ({})", intensity.display_name(), intensity);
            println!("  blur radius   {:>6.1}", params.blur_radius);
            println!("  base opacity  {:>6.2}", params.base_opacity);
            println!("  peak opacity  {:>6.2}", params.peak_opacity);
            println!("  border alpha  {:>6.2}", params.border_alpha);
            println!("  shadow depth  {:>6.1}", params.shadow_depth);
        }
        Commands::Resolve {
            capability,
            variant,
        } => {
            let variant = match variant {
                Some(variant) => variant,
                None => open_store(&config, storage)?.variant(),
            };
            let handle = registry()
                .resolve(&capability, variant)
                .with_context(|| format!("Cannot resolve {capability}"))?;
            println!("{} [{}] -> {}", handle.capability, handle.variant, handle.implementation);
        }
        Commands::Capabilities => {
            for name in CapabilityTable::NAMES {
                let classic = registry().resolve(name, PresentationVariant::Classic)?;
                let glass = registry().resolve(name, PresentationVariant::Glass)?;
                println!("{:<12} {:<20} {}", name, classic.implementation, glass.implementation);
            }
        }
        Commands::Simulate {
            kind,
            mode,
            duration_ms,
            frame_ms,
            width,
            height,
            seed,
        } => {
            let mut effect = config.effect(&kind)?;
            if let Some(mode) = mode {
                effect.trigger_mode = mode;
            }
            let effect_kind = effect.kind;
            let effect_mode = effect.trigger_mode;
            let parameters = open_store(&config, storage)?.parameters();

            let report = simulate::run(
                effect,
                parameters,
                SimulationOptions {
                    duration_ms,
                    frame_ms,
                    bounds: Bounds::new(width, height),
                    seed,
                },
            )?;

            println!("{effect_kind} ({effect_mode}) for {duration_ms}ms");
            println!("  frames         {}", report.frames);
            println!("  spawned        {}", report.spawned);
            println!("  expired        {}", report.expired);
            println!("  peak live      {}", report.peak_live);
            println!("  rendered       {}", report.rendered);
            println!("  leaked timers  {}", report.timers_after_dispose);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Theme store over the preference file, hydrated before use
fn open_store(config: &FolioConfig, storage: Option<&Path>) -> Result<ThemeStore> {
    let defaults = config.theme.defaults();
    if !config.theme.persistence {
        return Ok(ThemeStore::initialize(defaults, None));
    }

    let Some(path) = config.storage_path(storage) else {
        tracing::warn!("no config directory; preferences will not be saved");
        return Ok(ThemeStore::initialize(defaults, None));
    };
    tracing::debug!("preferences at {}", path.display());

    let adapter: Box<dyn PersistenceAdapter> =
        Box::new(KeyValuePersistence::new(TomlFileStore::new(path)));
    Ok(ThemeStore::initialize(defaults, Some(adapter)))
}

fn print_state(store: &ThemeStore) {
    let state = store.state();
    println!("variant    {} ({})", state.variant.display_name(), state.variant);
    println!("intensity  {} ({})", state.intensity.display_name(), state.intensity);
    if let Some(params) = state.glass_parameters() {
        println!(
            "glass      blur {:.0}px, opacity {:.2}-{:.2}",
            params.blur_radius, params.base_opacity, params.peak_opacity
        );
    }
}

fn report(store: &ThemeStore, update: Update) -> Result<()> {
    match update {
        Update::Applied => print_state(store),
        Update::Unchanged => {
            println!("unchanged");
            print_state(store);
        }
        Update::Rejected(error) => return Err(error.into()),
        Update::NotReady | Update::Disposed => {
            anyhow::bail!("theme store is not accepting changes")
        }
    }
    Ok(())
}
