//! mapgpx CLI - Google Maps URL to GPX converter
//!
//! Paste a Maps link, get a GPX file for your GPS device or fitness app.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{default_config_toml, Config, CONFIG_FILE_NAME};
use mapgpx::{
    extract, save_gpx, suggested_filename, write_gpx, Coordinate, ElevationMode, GpxGenerator,
    RouteInfo,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Default log filter when RUST_LOG is unset
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "mapgpx",
    about = "Convert Google Maps links to GPX files",
    long_about = "Convert Google Maps links to GPX files.\n\
                  \n\
                  Recognizes directions links, links with @lat,lng coordinates, and place links.\n\
                  Shortened links (maps.app.goo.gl) are matched as text and never followed.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Use this config file instead of ./.mapgpx.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a Google Maps URL to a GPX file
    #[command(long_about = "Convert a Google Maps URL to a GPX file.\n\
                      \n\
                      The file name is derived from the route or location unless -o is given:\n\
                      route_<start>_to_<end>.gpx or location_<name>.gpx.\n\
                      \n\
                      Defaults can be set via .mapgpx.toml configuration file.")]
    Convert {
        /// Google Maps URL
        #[arg(value_name = "URL")]
        url: String,

        /// Output file path
        #[arg(short, long, value_name = "OUTPUT", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Directory for the derived file name
        #[arg(short = 'd', long, value_name = "DIR", conflicts_with = "output")]
        output_dir: Option<PathBuf>,

        /// Print the GPX document instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Show what would be written without writing
        #[arg(long)]
        dry_run: bool,

        /// Track point elevation strategy (constant or seeded)
        #[arg(long, value_name = "MODE")]
        elevation: Option<ElevationMode>,

        /// Seed for the seeded elevation strategy
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        /// Track type written to <type> (cycling, running, hiking, ...)
        #[arg(long, value_name = "TYPE")]
        track_type: Option<String>,
    },

    /// Show what a Google Maps URL resolves to
    Inspect {
        /// Google Maps URL
        #[arg(value_name = "URL")]
        url: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage .mapgpx.toml configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the merged configuration
    Show,

    /// Create a new .mapgpx.toml with defaults
    Init {
        /// Create in user home directory (~/.mapgpx.toml) instead of current directory
        #[arg(long)]
        user: bool,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .format_timestamp(None)
    .init();
}

fn main() {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    if let Err(e) = run(args, verbosity) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(args: Args, verbosity: Verbosity) -> Result<()> {
    match args.command {
        Commands::Convert {
            url,
            output,
            output_dir,
            stdout,
            force,
            dry_run,
            elevation,
            seed,
            track_type,
        } => {
            let config = Config::resolve(args.config.as_deref())?;
            let mut generator_config = config.generator_config();
            if let Some(elevation) = elevation {
                generator_config.elevation = elevation;
            }
            if let Some(seed) = seed {
                generator_config.seed = seed;
            }
            if let Some(track_type) = track_type {
                generator_config.track_type = track_type;
            }
            generator_config
                .validate()
                .context("Invalid generator configuration")?;

            let info = extract(&url).context("Could not parse Google Maps URL")?;
            let gpx = GpxGenerator::new(generator_config)
                .generate(&info)
                .context("Failed to generate GPX")?;

            if stdout {
                print!("{gpx}");
                return Ok(());
            }

            let force = force || config.force();
            let target = match &output {
                Some(path) => path.clone(),
                None => output_dir
                    .clone()
                    .unwrap_or_else(|| config.output_dir())
                    .join(suggested_filename(&info)),
            };

            if dry_run {
                println!(
                    "Would write {} ({} bytes)",
                    target.display(),
                    gpx.len()
                );
                return Ok(());
            }

            if target.exists() && !force {
                bail!(
                    "Output file already exists: {} (use --force to overwrite)",
                    target.display()
                );
            }

            let written = match output {
                Some(path) => {
                    write_gpx(&path, &gpx)?;
                    path
                }
                None => {
                    let dir = output_dir.unwrap_or_else(|| config.output_dir());
                    save_gpx(&dir, &info, &gpx)
                        .with_context(|| format!("Failed to write into {}", dir.display()))?
                }
            };

            if verbosity.should_show_output() {
                println!("{} {}", "Saved".green().bold(), written.display());
            }
            Ok(())
        }

        Commands::Inspect { url, json } => {
            let info = extract(&url).context("Could not parse Google Maps URL")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print_route_info(&info);
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = Config::resolve(args.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Init { user, force } => {
                let path = if user {
                    Config::user_config_path().context("Could not determine home directory")?
                } else {
                    PathBuf::from(CONFIG_FILE_NAME)
                };
                init_config(&path, force)?;
                if verbosity.should_show_output() {
                    println!("{} {}", "Created".green().bold(), path.display());
                }
                Ok(())
            }
        },
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }
    fs::write(path, default_config_toml())
        .with_context(|| format!("Failed to write config file: {}", path.display()))
}

fn format_coordinate(coordinate: Option<&Coordinate>) -> String {
    coordinate.map_or_else(
        || "unknown".dimmed().to_string(),
        |c| format!("{:.6}, {:.6}", c.lat, c.lng),
    )
}

fn print_route_info(info: &RouteInfo) {
    match info {
        RouteInfo::Route {
            start_point,
            end_point,
            start_coordinates,
            end_coordinates,
            waypoints,
        } => {
            println!("{} route", "Type:".bold());
            println!("{} {start_point}", "Start:".bold());
            println!("{} {end_point}", "End:".bold());
            println!(
                "{} {}",
                "Start coordinates:".bold(),
                format_coordinate(start_coordinates.as_ref())
            );
            println!(
                "{} {}",
                "End coordinates:".bold(),
                format_coordinate(end_coordinates.as_ref())
            );
            println!("{} {}", "Waypoints:".bold(), waypoints.len());
        }
        RouteInfo::Location {
            location_name,
            coordinates,
        } => {
            println!("{} location", "Type:".bold());
            println!("{} {location_name}", "Name:".bold());
            println!(
                "{} {}",
                "Coordinates:".bold(),
                format_coordinate(coordinates.as_ref())
            );
        }
    }
    println!("{} {}", "File name:".bold(), suggested_filename(info));
}
