mod cli;
mod config;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use fairsim_core::config::load_dotenv;
use fairsim_core::{format_tasks, generate_tasks, read_tasks, write_tasks, GeneratorConfig};
use fairsim_scheduler::{text_report, FairnessReport, Scheduler};
use fairsim_tree::{NaturalOrder, Timeline};

use crate::cli::{CliArgs, Command, GenerateArgs, RunArgs, SweepArgs};
use crate::config::CliConfig;
use crate::terminal::Terminal;

fn main() -> Result<()> {
    load_dotenv();
    let args = CliArgs::parse();

    // Initialize tracing
    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let terminal = Terminal::new();

    // Load config
    let config = CliConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    if let Err(e) = dispatch(args.command, &config, &terminal) {
        terminal.print_error(&format!("{:#}", e))?;
        std::process::exit(1);
    }
    Ok(())
}

fn dispatch(command: Command, config: &CliConfig, terminal: &Terminal) -> Result<()> {
    match command {
        Command::Run(args) => run(args, config, terminal),
        Command::Generate(args) => generate(args, config, terminal),
        Command::Read { file } => {
            let tasks = read_tasks(&file)
                .with_context(|| format!("failed to read task file: {}", file.display()))?;
            terminal.print(&format_tasks(&tasks))
        }
        Command::Sweep(args) => sweep(args, config, terminal),
        Command::Fairness { file, timeline } => {
            let tasks = read_tasks(&file)
                .with_context(|| format!("failed to read task file: {}", file.display()))?;
            let mut scheduler_config = config.resolve_scheduler()?;
            if let Some(kind) = timeline {
                scheduler_config.timeline = kind;
            }
            scheduler_config.record_ticks = false;

            let mut report = FairnessReport::new(&tasks);
            Scheduler::new(scheduler_config)
                .run_with(&tasks, |tick, state| report.record(tick, state))
                .context("scheduler run failed")?;
            terminal.print(&report.finish())
        }
        Command::Tree { timeline, heap, values } => {
            let defaults = config.resolve_scheduler()?;
            let kind = timeline.unwrap_or(defaults.timeline);
            let heap_type = heap.unwrap_or(defaults.heap_type);
            let mut structure = kind.build::<i64, _>(heap_type, NaturalOrder);
            for value in values {
                structure.insert(value);
            }
            structure
                .validate()
                .with_context(|| format!("{} ended up malformed", kind))?;
            terminal.print(&structure.to_dot(&|v: &i64| v.to_string()))
        }
    }
}

fn run(args: RunArgs, config: &CliConfig, terminal: &Terminal) -> Result<()> {
    let tasks = read_tasks(&args.file)
        .with_context(|| format!("failed to read task file: {}", args.file.display()))?;

    let mut scheduler_config = config.resolve_scheduler()?;
    if let Some(kind) = args.timeline {
        scheduler_config.timeline = kind;
    }
    if let Some(heap_type) = args.heap {
        scheduler_config.heap_type = heap_type;
    }
    if args.verify {
        scheduler_config.verify_invariants = true;
    }
    if args.detailed || args.json {
        scheduler_config.record_ticks = true;
    }
    info!(file = %args.file.display(), timeline = %scheduler_config.timeline, "Running task file");

    let results = Scheduler::new(scheduler_config)
        .run(&tasks)
        .context("scheduler run failed")?;

    if results.summary.unfinished > 0 {
        warn!(
            unfinished = results.summary.unfinished,
            total_time = results.total_time,
            "Timeline ended before every task completed"
        );
    }

    if args.json {
        let json = results.to_json().context("failed to serialize results")?;
        terminal.print(&json)
    } else {
        terminal.print(&text_report(&results, args.detailed))
    }
}

fn generator_for(base: GeneratorConfig, args: &GenerateArgs) -> Result<GeneratorConfig> {
    let config = GeneratorConfig {
        start: args.start.unwrap_or(base.start),
        start_max: args.start_max.or(base.start_max),
        duration: args.duration.unwrap_or(base.duration),
        duration_max: args.duration_max.or(base.duration_max),
        seed: args.seed.or(base.seed),
    };
    config.validate().context("invalid generator settings")?;
    Ok(config)
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn generate(args: GenerateArgs, config: &CliConfig, terminal: &Terminal) -> Result<()> {
    let generator = generator_for(config.resolve_generator()?, &args)?;
    let mut rng = rng_for(generator.seed);
    let tasks = generate_tasks(args.tasks, &generator, &mut rng);
    write_tasks(&args.file, &tasks)
        .with_context(|| format!("failed to write task file: {}", args.file.display()))?;
    terminal.print_success(&format!(
        "Wrote {} tasks (total time {}) to {}",
        tasks.len(),
        tasks.total_time,
        args.file.display()
    ))
}

fn sweep(args: SweepArgs, config: &CliConfig, terminal: &Terminal) -> Result<()> {
    anyhow::ensure!(args.from <= args.to, "--from {} is above --to {}", args.from, args.to);
    anyhow::ensure!(args.to < 32, "--to {} would generate more than 2^31 tasks", args.to);

    let mut generator = config.resolve_generator()?;
    if args.seed.is_some() {
        generator.seed = args.seed;
    }
    let mut scheduler_config = config.resolve_scheduler()?;
    if let Some(kind) = args.timeline {
        scheduler_config.timeline = kind;
    }
    scheduler_config.record_ticks = false;
    let scheduler = Scheduler::new(scheduler_config);

    let mut rng = rng_for(generator.seed);
    for power in args.from..=args.to {
        let n = 1usize << power;
        let tasks = generate_tasks(n, &generator, &mut rng);
        terminal.print_header(&format!("2^{} = {} tasks", power, n))?;
        let results = scheduler
            .run(&tasks)
            .with_context(|| format!("scheduler run failed for {} tasks", n))?;
        terminal.print(&text_report(&results, false))?;
        terminal.print_note(&format!(
            "{} compares, {} swaps",
            results.stats.compares, results.stats.swaps
        ))?;
    }
    Ok(())
}
