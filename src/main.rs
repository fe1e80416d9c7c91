// Command line front-end for the emotion-art generator.
//
// Usage:
//   emotion-art generate -e joy=0.7 -e neutral=0.3 --style mandala --seed 42 -o joy.png
//   emotion-art generate --emotions-json '{"sadness": 0.8}' --style watercolor
//   emotion-art palettes

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use emotion_art::{ArtConfig, ArtGenerator, EmotionVector, RenderParameters, Style};

#[derive(Parser, Debug)]
#[command(name = "emotion-art", version, about = "Turn emotion intensities into procedural art")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML config with [render] defaults and [palettes] overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate an image and write it as PNG
    Generate(GenerateArgs),
    /// List the palette table
    Palettes,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Emotion intensity as name=value (repeatable)
    #[arg(short, long = "emotion", value_parser = parse_emotion)]
    emotions: Vec<(String, f64)>,

    /// Emotion intensities as a JSON object, e.g. '{"joy": 0.7}'
    #[arg(long)]
    emotions_json: Option<String>,

    /// Mandala, Abstract, Watercolor or Hybrid
    #[arg(short, long)]
    style: Option<Style>,

    #[arg(short, long)]
    complexity: Option<u32>,

    #[arg(long)]
    color_intensity: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Output PNG path
    #[arg(short, long, default_value = "emotion_art.png")]
    output: PathBuf,
}

fn parse_emotion(s: &str) -> std::result::Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid intensity in '{s}': {e}"))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match &cli.config {
        Some(path) => ArtConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ArtConfig::default(),
    };
    let palettes = config.palette_table().context("invalid palette in config")?;

    match cli.command {
        Command::Generate(args) => cmd_generate(args, config.render, ArtGenerator::with_palettes(palettes)),
        Command::Palettes => {
            for (name, colors) in palettes.iter() {
                let hex: Vec<String> = colors.iter().map(|c| c.to_hex()).collect();
                println!("{name:>8}: {}", hex.join(", "));
            }
            Ok(())
        }
    }
}

fn cmd_generate(args: GenerateArgs, defaults: RenderParameters, generator: ArtGenerator) -> Result<()> {
    let mut pairs: Vec<(String, f64)> = Vec::new();
    if let Some(json) = &args.emotions_json {
        let map: std::collections::BTreeMap<String, f64> =
            serde_json::from_str(json).context("--emotions-json must be a JSON object of numbers")?;
        pairs.extend(map);
    }
    pairs.extend(args.emotions);
    if pairs.is_empty() {
        bail!("no emotions given; use --emotion name=value or --emotions-json");
    }
    let emotions = EmotionVector::new(pairs)?;

    let params = RenderParameters {
        style: args.style.unwrap_or(defaults.style),
        complexity: args.complexity.unwrap_or(defaults.complexity),
        color_intensity: args.color_intensity.unwrap_or(defaults.color_intensity),
        seed: args.seed.or(defaults.seed),
        width: args.width.unwrap_or(defaults.width),
        height: args.height.unwrap_or(defaults.height),
    };
    tracing::info!(?params, dominant = emotions.dominant(), "generating");

    let art = generator.generate(&emotions, &params)?;
    art.canvas
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    let (w, h) = art.canvas.dimensions();
    println!(
        "wrote {} ({}x{}, style {}, dominant {}, palette {}, seed {})",
        args.output.display(),
        w,
        h,
        art.style,
        art.dominant,
        art.palette.name(),
        art.seed.map_or_else(|| "-".to_string(), |s| s.to_string()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emotion() {
        assert_eq!(parse_emotion("joy=0.7").unwrap(), ("joy".to_string(), 0.7));
        assert_eq!(parse_emotion(" hope = 1 ").unwrap(), ("hope".to_string(), 1.0));
        assert!(parse_emotion("joy").is_err());
        assert!(parse_emotion("joy=lots").is_err());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "emotion-art", "-vv", "generate", "-e", "joy=0.7", "-e", "neutral=0.3",
            "--style", "hybrid", "--seed", "42", "-o", "out.png",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.emotions.len(), 2);
                assert_eq!(args.style, Some(Style::Hybrid));
                assert_eq!(args.seed, Some(42));
                assert_eq!(args.output, PathBuf::from("out.png"));
            }
            Command::Palettes => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_style() {
        let res = Cli::try_parse_from(["emotion-art", "generate", "-e", "joy=1", "--style", "cubist"]);
        assert!(res.is_err());
    }
}
