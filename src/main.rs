use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use curriculum::{
    config::Config,
    extraction::ExtractorClient,
    seed::{transform_extraction, DEFAULT_CATEGORY},
    store::{Owner, SupabaseStore},
    SeedProgress, SeedStage, Seeder,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

struct Args {
    pdf_path: PathBuf,
    category: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let pdf_path = args.next().context("path to a PDF is required")?;
    let category = args.next().unwrap_or(DEFAULT_CATEGORY.to_string());

    Ok(Args {
        pdf_path: PathBuf::from(pdf_path),
        category,
    })
}

fn print_progress(progress: &SeedProgress) {
    match progress.lesson_progress {
        Some(p) => println!("[{}/{}] {}", p.current, p.total, progress.message),
        None => println!("{}", progress.message),
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "curriculum=info".into()),
        )
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Usage: cargo run <file.pdf> [category]");
            return Err(e);
        }
    };
    let config = Config::from_env().context("failed to load configuration")?;

    print_progress(&SeedProgress::new(
        SeedStage::Extracting,
        format!("Extracting {}", args.pdf_path.display()),
    ));
    let extractor = ExtractorClient::new(&config.extractor_url, config.timeout);
    let extraction = extractor
        .extract_file(&args.pdf_path)
        .context("failed to extract PDF")?;

    print_progress(&SeedProgress::new(
        SeedStage::Transforming,
        "Building module from extraction",
    ));
    let module = transform_extraction(&extraction, &args.category)
        .context("failed to build module from extraction")?;

    let store = SupabaseStore::new(&config.supabase_url, &config.supabase_key, config.timeout);
    let owner = Owner::new(&config.user_id, &config.tenant_id);
    let mut seeder = Seeder::new(&store, &owner).on_progress(print_progress);

    match seeder.seed(&module) {
        Ok(record) => {
            println!(
                "created module {BOLD}{}{RESET} ({}) with {BOLD}{}{RESET} lessons, {} minutes, {} XP",
                module.title,
                record.id,
                module.lessons.len(),
                module.estimated_duration_minutes,
                module.xp_reward
            );
            Ok(())
        }
        Err(e) => {
            error!(created = seeder.created().len(), "seeding stopped: {}", e);
            if config.rollback_on_failure {
                let failed = seeder.compensate();
                info!(failed, "rolled back partially seeded module");
            } else if let Some((_, module_id)) = seeder.created().first() {
                eprintln!("partially created module {} left in place for review", module_id);
            }
            Err(e).context("failed to seed module")
        }
    }
}
