use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use loops_assets::config::{self, CONFIG_FILE_NAME};
use loops_assets::icon::{self, IconStyle};
use loops_assets::logger::{self, log_line};
use loops_assets::manifest::IconManifest;
use loops_assets::screenshots::{self, Target};
use loops_assets::svg;

#[derive(Parser, Debug)]
#[command(name = "loops-assets", version, about = "Generate icons and store screenshots for the Loops extension")]
struct Cli {
    /// Config file (default: ./loops-assets.conf, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the PNG icon set
    Icons {
        /// loop, gradient, solid or placeholder
        #[arg(long)]
        style: Option<IconStyle>,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Comma separated, e.g. 16,32,48,128
        #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..))]
        sizes: Vec<u32>,
        /// Also write icons.json for manifest.json
        #[arg(long)]
        manifest: bool,
    },
    /// Write the SVG master icon
    Svg {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Crop and resize screenshots for store upload
    Screenshots {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: Option<u32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        height: Option<u32>,
    },
    /// Print the effective configuration
    Config {
        /// Write it to the --config path (or ./loops-assets.conf)
        #[arg(long)]
        save: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error("loops-assets", &e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> loops_assets::Result<()> {
    let cfg = config::read_config(cli.config.as_deref())?;

    match cli.command {
        Command::Icons { style, out, sizes, manifest } => {
            let dir = out.unwrap_or_else(|| cfg.icons_dir.clone());
            let sizes = if sizes.is_empty() { cfg.icon_sizes.clone() } else { sizes };
            let style = style.unwrap_or(cfg.icon_style);
            let written = icon::generate_icon_set(&dir, &sizes, style)?;
            if manifest {
                let path = IconManifest::new(&sizes, &cfg.manifest_prefix).write(&dir)?;
                log_line(&format!("Created {}", path.display()));
            }
            log_line(&format!("All {} icons created ({} files)", style, written.len()));
        }
        Command::Svg { out } => {
            let dir = out.unwrap_or_else(|| cfg.icons_dir.clone());
            std::fs::create_dir_all(&dir)?;
            let path = svg::write_svg(&dir)?;
            log_line(&format!("Created {}", path.display()));
        }
        Command::Screenshots { input, output, width, height } => {
            let input = input.unwrap_or_else(|| cfg.screenshots_dir.clone());
            let output = output.unwrap_or_else(|| cfg.webstore_dir.clone());
            let target = Target {
                width: width.unwrap_or(cfg.target_width),
                height: height.unwrap_or(cfg.target_height),
            };
            let report = screenshots::process_dir(&input, &output, target)?;
            log_line(&format!("Processed {} screenshots", report.processed));
            if !report.failed.is_empty() {
                log::warn!("{} screenshots failed", report.failed.len());
            }
            log_line(&format!("Output directory: {}", output.display()));
            log_line(&format!("All images resized to {}x{}", target.width, target.height));
        }
        Command::Config { save } => {
            config::write_config(&cfg, &mut io::stdout().lock())?;
            if save {
                let path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
                config::save_config(&cfg, &path)?;
            }
        }
    }
    Ok(())
}
