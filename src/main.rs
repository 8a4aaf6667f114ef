use std::collections::HashMap;
use std::ops::ControlFlow;

use anyhow::{anyhow, ensure, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sluice::dynamic::{builtins, Callable, Value};
use sluice::{drive, Counter, FilterKind, PipelineConfig, TransformKind};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sluice", about = "Run lazy iteration pipelines")]
struct Cli {
    /// Log protocol activity at debug level (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every value of a counting source, one per line.
    Range {
        /// Exclusive upper bound.
        stop: i64,
        /// First value.
        #[arg(long, default_value_t = 0)]
        start: i64,
    },
    /// Materialize `filter(map(range(start, stop)))` and print it as a list.
    Pipeline {
        /// First value of the source.
        #[arg(long, default_value_t = 0)]
        start: i64,
        /// Exclusive upper bound of the source.
        #[arg(long)]
        stop: i64,
        /// Transform applied to each value.
        #[arg(long = "map", value_enum, default_value_t = MapArg::Identity)]
        transform: MapArg,
        /// Filter applied after the transform.
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        /// Stop after this many values.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the `filter(is_even, [1..9])` loop through the dynamic builtins.
    Demo,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MapArg {
    Identity,
    Double,
    Square,
    Negate,
}

impl From<MapArg> for TransformKind {
    fn from(arg: MapArg) -> Self {
        match arg {
            MapArg::Identity => TransformKind::Identity,
            MapArg::Double => TransformKind::Double,
            MapArg::Square => TransformKind::Square,
            MapArg::Negate => TransformKind::Negate,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterArg {
    All,
    Even,
    Odd,
}

impl From<FilterArg> for FilterKind {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => FilterKind::All,
            FilterArg::Even => FilterKind::Even,
            FilterArg::Odd => FilterKind::Odd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Range { stop, start } => run_range(start, stop)?,
        Commands::Pipeline {
            start,
            stop,
            transform,
            filter,
            limit,
        } => {
            let mut config = PipelineConfig::between(start, stop)
                .with_transform(transform.into())
                .with_filter(filter.into());
            if let Some(limit) = limit {
                config = config.with_limit(limit);
            }
            run_pipeline(&config)?
        }
        Commands::Demo => run_demo()?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_range(start: i64, stop: i64) -> Result<()> {
    drive::for_each(Counter::between(start, stop), |value| {
        println!("{value}");
        Ok(ControlFlow::Continue(()))
    })
    .context("range iteration failed")?;
    Ok(())
}

fn run_pipeline(config: &PipelineConfig) -> Result<()> {
    let values = config
        .run()
        .with_context(|| format!("pipeline {}..{} failed", config.start, config.stop))?;
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    println!("[{}]", rendered.join(", "));
    Ok(())
}

fn run_demo() -> Result<()> {
    let mut globals = HashMap::new();
    builtins::install(&mut globals);

    let is_even = Value::Func(Callable::new("is_even", |args| {
        Ok(Value::Bool(args[0].as_int()? % 2 == 0))
    }));
    let some_list = Value::list((1..=9).map(Value::Int).collect());

    let filter = lookup(&globals, "filter")?;
    let list = lookup(&globals, "list")?;

    // for item in filter(is_even, some_list): print(item)
    let filtered = filter.call(&[is_even.clone(), some_list.clone()])?;
    let summary = drive::for_each(builtins::produce_iterator(&filtered)?, |item| {
        println!("{item}");
        Ok(ControlFlow::Continue(()))
    })
    .context("demo loop failed")?;
    tracing::debug!(iterations = summary.iterations, "demo loop done");

    // materialized = list(filter(is_even, some_list))
    let materialized = list
        .call(&[filter.call(&[is_even, some_list])?])
        .context("materializing demo pipeline failed")?;
    println!("{materialized}");

    let expected = Value::list(vec![
        Value::Int(2),
        Value::Int(4),
        Value::Int(6),
        Value::Int(8),
    ]);
    ensure!(
        materialized == expected,
        "expected {expected}, got {materialized}"
    );
    Ok(())
}

fn lookup(globals: &HashMap<String, Value>, name: &str) -> Result<Callable> {
    match globals.get(name) {
        Some(Value::Func(func)) => Ok(func.clone()),
        Some(other) => Err(anyhow!("'{name}' is a {}, not a function", other.type_name())),
        None => Err(anyhow!("name '{name}' is not defined")),
    }
}
