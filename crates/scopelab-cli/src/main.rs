use clap::{Args, Parser, Subcommand};
use miette::Result;
use scopelab_driver::{DemoConfig, Illustration, Runner};
use scopelab_runtime::{BindingPolicy, Pacing, StdHost};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "scopelab")]
#[command(author, version, about = "Demonstrations of closures, hoisting and scoping")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// `run` when no subcommand is given.
    fn command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the illustrations (the default)
    Run(RunArgs),

    /// List the illustrations in the order they run
    List,

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file to load
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Configuration file to load
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run only these illustrations
    #[arg(long, value_enum)]
    only: Vec<IllustrationArg>,

    /// Which loop counter binding the deferred illustration uses
    #[arg(long, value_enum)]
    binding: Option<BindingArg>,

    /// Actually wait out timer delays instead of skipping ahead
    #[arg(long)]
    real_time: bool,

    /// Don't wait for Enter after alerts (they wait when stdin is a terminal)
    #[arg(long)]
    no_wait: bool,
}

impl RunArgs {
    /// Load the config file, then apply flag overrides.
    fn config(&self) -> Result<DemoConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(binding) = self.binding {
            config.deferred.policies = binding.policies();
        }
        Ok(config)
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum IllustrationArg {
    Pure,
    Impure,
    Encapsulation,
    Factory,
    Deferred,
}

impl From<IllustrationArg> for Illustration {
    fn from(arg: IllustrationArg) -> Self {
        match arg {
            IllustrationArg::Pure => Illustration::Pure,
            IllustrationArg::Impure => Illustration::Impure,
            IllustrationArg::Encapsulation => Illustration::Encapsulation,
            IllustrationArg::Factory => Illustration::Factory,
            IllustrationArg::Deferred => Illustration::Deferred,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BindingArg {
    /// One hoisted counter shared by every iteration (`var`)
    Shared,
    /// A fresh counter per iteration (`let`)
    Fresh,
    /// Shared, then fresh
    Both,
}

impl BindingArg {
    fn policies(self) -> Vec<BindingPolicy> {
        match self {
            BindingArg::Shared => vec![BindingPolicy::Shared],
            BindingArg::Fresh => vec![BindingPolicy::Fresh],
            BindingArg::Both => BindingPolicy::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    // stdout carries the transcript; diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command() {
        Commands::Run(args) => {
            let config = args.config()?;
            let mut host = StdHost::new();
            if args.no_wait {
                host = host.blocking(false);
            }
            let pacing = if args.real_time {
                Pacing::RealTime
            } else {
                Pacing::Virtual
            };
            let selection: Vec<Illustration> = args.only.into_iter().map(Into::into).collect();

            let report = Runner::new(config, Rc::new(host))
                .with_pacing(pacing)
                .run(&selection)?;
            info!(ran = report.ran.len(), timers = report.timers_run, "done");
        }

        Commands::List => {
            for illustration in Illustration::ALL {
                println!("{:<14} {}", illustration.name(), illustration.description());
            }
        }

        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            DemoConfig::from_file(path)?
        }
        None => DemoConfig::default(),
    };
    Ok(config)
}
