use std::io::Write;
use std::{
    env,
    fs::{self, OpenOptions},
};

use anyhow::Context;
use curriculum::extraction::ExtractionDocument;
use curriculum::seed::{transform_extraction, ModuleSeed, DEFAULT_CATEGORY};
use tracing_subscriber::EnvFilter;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const DEFAULT_OUTPUT_DIR: &str = "output/seed";

pub struct Config {
    pub extraction_path: String,
    pub category: String,
    pub output_dir: String,
}

fn parse_config(mut args: impl Iterator<Item = String>) -> anyhow::Result<Config> {
    let extraction_path = args
        .next()
        .context("extraction_path is required, pass the JSON saved from the extractor")?;
    let category = args.next().unwrap_or(DEFAULT_CATEGORY.to_string());
    let output_dir = args.next().unwrap_or(DEFAULT_OUTPUT_DIR.to_string());

    Ok(Config {
        extraction_path,
        category,
        output_dir,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "curriculum=info".into()),
        )
        .init();

    let config = match parse_config(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Usage: cargo run --bin preview_seed <extraction.json> [category] [output_dir]");
            return Err(e);
        }
    };

    let raw = fs::read_to_string(&config.extraction_path)
        .context(format!("failed to read {}", config.extraction_path))?;
    let extraction: ExtractionDocument =
        serde_json::from_str(&raw).context("extraction is not valid JSON")?;

    let module = transform_extraction(&extraction, &config.category)
        .context("failed to build module from extraction")?;

    create_output_dir(&config.output_dir).context("failed to create output directory")?;
    write_module(&module, &config.output_dir).context("failed to write module seed")?;

    println!("Module: {BOLD}{}{RESET}", module.title);
    println!(
        "Lessons: {} ({} content + {} quiz)",
        module.lessons.len(),
        module.content_lesson_count(),
        module.lessons.len() - module.content_lesson_count()
    );
    println!("Content blocks: {}", module.block_count());
    println!("Quiz questions: {}", module.question_count());
    println!("Estimated duration: {} minutes", module.estimated_duration_minutes);
    println!("Total XP: {}", module.xp_reward);
    println!(
        "\nwrote {BOLD}module.yaml{RESET} to {BOLD}{}{RESET}",
        &config.output_dir
    );

    Ok(())
}

fn write_module(module: &ModuleSeed, output_dir: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(format!("{}/module.yaml", output_dir))
        .context("failed to open file for module.yaml")?;

    let content = serde_yaml_ng::to_string(module).context("failed to serialize module seed")?;
    write!(file, "{}", content).context("failed to write module seed")?;

    Ok(())
}

fn create_output_dir(output_dir: &str) -> anyhow::Result<()> {
    if fs::metadata(output_dir).is_ok() {
        fs::remove_dir_all(output_dir)?;
    }

    fs::create_dir_all(output_dir)?;
    Ok(())
}
