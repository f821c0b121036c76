use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use resumegen::config::{self, GeneratorConfig};
use resumegen::pipeline::{generate, GenerateOptions};
use resumegen::style::RenderVariant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse()?;

    let root = match &args.root {
        Some(root) => root.clone(),
        None => config::run_root()?,
    };
    let mut config = config::load_or_default(args.config.as_deref(), &root)?;
    args.apply(&mut config);
    config.validate()?;

    if args.write_config {
        let path = config::local_config_path(&root);
        config::save(&config, &path)?;
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let options = GenerateOptions::from_config(&config, &root);
    let generated = generate(&options).with_context(|| {
        format!(
            "Resume generation failed (data: {}, output: {})",
            options.data_dir.display(),
            options.output_dir.display()
        )
    })?;

    println!(
        "Resume generated successfully: {}",
        generated.output.path.display()
    );
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resumegen=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[derive(Default)]
struct CliArgs {
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    variant: Option<RenderVariant>,
    write_config: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut parsed = CliArgs::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--root" => {
                    let value = args.next().context("Expected a directory after --root")?;
                    parsed.root = Some(PathBuf::from(value));
                }
                "--config" => {
                    let value = args.next().context("Expected a file after --config")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--data" => {
                    let value = args.next().context("Expected a directory after --data")?;
                    parsed.data = Some(PathBuf::from(value));
                }
                "--output" => {
                    let value = args.next().context("Expected a directory after --output")?;
                    parsed.output = Some(PathBuf::from(value));
                }
                "--variant" => {
                    let value = args.next().context("Expected a variant after --variant")?;
                    parsed.variant = Some(value.parse().map_err(|err: String| anyhow!(err))?);
                }
                "--write-config" => parsed.write_config = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    return Err(anyhow!(
                        "Unknown argument '{other}'. Run with --help for usage instructions."
                    ));
                }
            }
        }
        Ok(parsed)
    }

    /// Command-line flags win over file values.
    fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(data) = &self.data {
            config.data_dir = data.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
    }
}

fn print_usage() {
    println!("generate-resume");
    println!("Renders data/*.json into a versioned .docx under generated/.");
    println!("Usage: generate-resume [options]");
    println!("Options:");
    println!("  --root <dir>        Run root (default: $RESUMEGEN_HOME or the current directory)");
    println!("  --config <file>     Config file (default: <root>/resumegen.toml or user config)");
    println!("  --data <dir>        Record directory, relative to the root (default: data)");
    println!("  --output <dir>      Output directory, relative to the root (default: generated)");
    println!("  --variant <name>    compact | classic | banner (default: compact)");
    println!("  --write-config      Save the resolved settings to <root>/resumegen.toml and exit");
}
