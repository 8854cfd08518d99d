use clap::Parser;
use pwap8::config::{self, BuildConfig, FaviconStyle, Settings};
use pwap8::{output, pipeline};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("PWAP8_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("PWAP8_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "pwap8")]
#[command(about = "Add Progressive Web App elements to a PICO-8 HTML export")]
#[command(long_about = "\
Add Progressive Web App elements to a PICO-8 HTML export

Takes the .html and .js files written by PICO-8's web export and produces a
build directory that browsers can install and play offline:

  build/
  ├── index.html          # the export, with manifest/icon/service worker tags
  ├── <short>.manifest    # web app manifest (unless --inline-manifest)
  ├── sw.js               # service worker precaching every file below
  ├── favicon-32.png      # or favicon.ico with --favicon ico
  ├── <export>.js         # copied unchanged
  └── images/
      └── <short>-icon-<size>.png

With --index, the game moves to app.html and the given page becomes
index.html; the untouched export is kept as original.html.

Defaults for icon sizes, colors and texts can be overridden with a TOML
settings file passed via --config.")]
#[command(version = version_string())]
struct Cli {
    /// Full project name (manifest name, service worker cache name)
    #[arg(long)]
    name: String,

    /// Short name used in the manifest and in filenames [default: --name]
    #[arg(long)]
    short: Option<String>,

    /// Source image for the icons (built-in placeholder if omitted)
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Also copy the untouched export HTML to original.html
    #[arg(long)]
    original: bool,

    /// PICO-8 exported HTML
    #[arg(long)]
    html: PathBuf,

    /// PICO-8 exported JavaScript
    #[arg(long)]
    js: PathBuf,

    /// Page to serve as index.html in front of the game (implies --original)
    #[arg(long)]
    index: Option<PathBuf>,

    /// Output directory
    #[arg(long, default_value = config::DEFAULT_BUILD_DIR)]
    build: PathBuf,

    /// TOML settings file with icon, manifest and page defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Favicon format [default: png]
    #[arg(long, value_enum)]
    favicon: Option<FaviconStyle>,

    /// Embed the manifest in the HTML as a data URI instead of a file
    #[arg(long)]
    inline_manifest: bool,

    /// Icon sizes to generate, comma separated (e.g. 32,192,512)
    #[arg(long, value_delimiter = ',')]
    sizes: Option<Vec<u32>>,
}

impl Cli {
    /// Merge CLI flags over `settings`.
    fn into_build_config(self, settings: Settings) -> BuildConfig {
        let mut config = BuildConfig::new(self.name, self.html, self.js).with_settings(settings);
        if let Some(short) = self.short {
            config.short_name = short;
        }
        config.icon = self.icon;
        config.copy_original = self.original;
        config.index = self.index;
        config.build_dir = self.build;
        if let Some(favicon) = self.favicon {
            config.favicon = favicon;
        }
        if self.inline_manifest {
            config.manifest.inline = true;
        }
        if let Some(sizes) = self.sizes {
            config.icon_sizes = config::normalize_sizes(&sizes);
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = match &cli.config {
        Some(path) => config::load_settings(path)?,
        None => Settings::default(),
    };
    let config = cli.into_build_config(settings);
    config.validate()?;

    println!("==> Building {}", config.name);
    output::print_build_plan(&config);

    let report = pipeline::build(&config)?;
    output::print_build_report(&report);
    Ok(())
}
