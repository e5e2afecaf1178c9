use clap::{Parser, Subcommand};
use folio::{config, content, generate, logging, output, view};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("FOLIO_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("FOLIO_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Bilingual (Thai / English) portfolio page generator")]
#[command(long_about = "\
Bilingual (Thai / English) portfolio page generator

One JSON document holds every string and list on the page. Each language
gets its own static page with a language switcher, and a missing
translation shows up as the text 'undefined' instead of breaking the build.

Layout:

  data.json                        # Content document (skills, projects, experience, i18n)
  config.toml                      # Optional site config (defaults + overrides)
  assets/                          # Icons and other files, copied to the output root

Output:

  dist/
  ├── index.html                   # Default language (th unless configured)
  ├── en/index.html                # Every other language under its code
  ├── data.json                    # Copy of the content document
  └── assets/...

Run 'folio check' to list missing translations.
Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content document (defaults to `content_path` from the config)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Assets directory copied into the output
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Site config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log debug events
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render one page per language into the output directory
    Build,
    /// Load the content document and report missing translations
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Command::Build => {
            let (site_config, content_path) = load_inputs(&cli)?;
            let generator = format!("folio {}", version_string());
            let report = generate::build(
                &site_config,
                &generate::BuildOptions {
                    content_path: &content_path,
                    assets_dir: cli.assets.as_deref(),
                    output_dir: &cli.output,
                    generator: &generator,
                },
            )?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let (_, content_path) = load_inputs(&cli)?;
            let doc = content::load(&content_path)?;
            let gaps = view::localization_gaps(&doc);
            output::print_check_output(&doc, &gaps);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the site config; `--content` overrides its `content_path`.
fn load_inputs(cli: &Cli) -> Result<(config::SiteConfig, PathBuf), config::ConfigError> {
    let site_config = config::load_config(&cli.config)?;
    let content_path = cli
        .content
        .clone()
        .unwrap_or_else(|| PathBuf::from(&site_config.content_path));
    Ok((site_config, content_path))
}
