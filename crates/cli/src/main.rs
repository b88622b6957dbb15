//! mbdefaults CLI - default pipeline scripts for multibranch branch jobs.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mbdefaults_binder::{
    register, DefaultsDescriptor, DefinitionResolver, ExtensionRegistry, ScriptDefinitionRuntime, StaticHost,
};
use mbdefaults_core::{
    BranchRun, Checkout, ConfigTarget, ExecutionHandle, Job, MultiBranchKind, ParentKind, RunContext,
    TracingListener,
};
use mbdefaults_storage::{GlobalConfigFiles, ManagedConfig, TieredConfigStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "mbdefaults")]
#[command(about = "Default pipeline scripts for multibranch branch jobs", long_about = None)]
struct Cli {
    /// Config file (defaults to .mbdefaults/config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the default script for a branch run
    Resolve {
        /// Branch job name
        #[arg(long)]
        job: String,
        /// Branch name
        #[arg(long)]
        branch: String,
        /// Run number
        #[arg(long, default_value = "1")]
        number: u32,
        /// Git repository holding the branch checkout
        #[arg(long)]
        repo: Option<PathBuf>,
        /// Revision to read instead of the branch head
        #[arg(long, requires = "repo")]
        revision: Option<String>,
        /// Workspace directory of the run
        #[arg(long)]
        workspace: Option<PathBuf>,
    },
    /// Manage global managed files
    Global {
        #[command(subcommand)]
        command: GlobalCommands,
    },
    /// List definition providers offered for a configuration target
    Providers {
        /// What is being configured
        #[arg(long, value_enum, default_value = "job")]
        target: TargetArg,
        /// Container of the job
        #[arg(long, value_enum, default_value = "root")]
        parent: ParentArg,
    },
}

#[derive(Subcommand)]
enum GlobalCommands {
    /// Add or replace a managed file from a local file
    Add {
        /// Managed file ID
        id: String,
        /// File to read the content from
        file: PathBuf,
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Comment
        #[arg(long)]
        comment: Option<String>,
    },
    /// List managed files
    List,
    /// Print a managed file
    Show {
        /// Managed file ID
        id: String,
    },
    /// Remove a managed file
    Remove {
        /// Managed file ID
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Job,
    Folder,
    Global,
}

#[derive(Clone, Copy, ValueEnum)]
enum ParentArg {
    Root,
    Folder,
    Multibranch,
    MultibranchDefaults,
}

impl From<ParentArg> for ParentKind {
    fn from(arg: ParentArg) -> Self {
        match arg {
            ParentArg::Root => ParentKind::Root,
            ParentArg::Folder => ParentKind::Folder,
            ParentArg::Multibranch => ParentKind::MultiBranch(MultiBranchKind::Standard),
            ParentArg::MultibranchDefaults => ParentKind::MultiBranch(MultiBranchKind::WithDefaults),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    let global = GlobalConfigFiles::open(&config.global_dir)
        .with_context(|| format!("opening global files at {}", config.global_dir.display()))?;

    match cli.command {
        Commands::Resolve { job, branch, number, repo, revision, workspace } => {
            let mut run = BranchRun::new(job, branch, number);
            if let Some(repo) = repo {
                let mut checkout = Checkout::new(repo);
                if let Some(rev) = revision {
                    checkout = checkout.at(rev);
                }
                run = run.with_checkout(checkout);
            }
            if let Some(ws) = workspace {
                run = run.with_workspace(ws);
            }

            let registry = build_registry(&config, global)?;
            let descriptor = registry
                .descriptor(DefaultsDescriptor::ID)
                .context("defaults provider is not registered")?;

            let handle = ExecutionHandle::new(RunContext::BranchJobRun(run));
            let definition = descriptor.create(&handle, &TracingListener, &[])?;
            info!(handle = %definition.handle(), sandboxed = definition.is_sandboxed(), "Definition ready");
            println!("{}", definition.script());
        }
        Commands::Global { command } => match command {
            GlobalCommands::Add { id, file, name, comment } => {
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let mut managed = ManagedConfig::new(id, content);
                if let Some(name) = name {
                    managed = managed.with_name(name);
                }
                if let Some(comment) = comment {
                    managed = managed.with_comment(comment);
                }
                global.save(&managed)?;
                println!("Saved managed file: {}", managed.id);
            }
            GlobalCommands::List => {
                let files = global.list()?;
                println!("Managed files ({})", files.len());
                for f in files {
                    println!("  {} | {} | {} | {}", f.id, f.name, f.updated_at.to_rfc3339(), f.comment);
                }
            }
            GlobalCommands::Show { id } => {
                let Some(managed) = global.get(&id)? else {
                    println!("Managed file not found");
                    return Ok(());
                };
                println!("{}", managed.content);
            }
            GlobalCommands::Remove { id } => {
                if global.remove(&id)? {
                    println!("Removed managed file: {}", id);
                } else {
                    println!("Managed file not found");
                }
            }
        },
        Commands::Providers { target, parent } => {
            let target = match target {
                TargetArg::Job => ConfigTarget::Job(Job::new("job", parent.into())),
                TargetArg::Folder => ConfigTarget::Folder { name: "folder".to_string() },
                TargetArg::Global => ConfigTarget::Global,
            };
            let registry = build_registry(&config, global)?;
            for descriptor in registry.visible_descriptors(&target) {
                println!("  {} | {}", descriptor.id(), descriptor.display_name());
            }
        }
    }

    Ok(())
}

fn build_registry(config: &CliConfig, global: GlobalConfigFiles) -> Result<ExtensionRegistry> {
    let resolver = DefinitionResolver::new(
        Arc::new(StaticHost::running(config.instance_name.clone())),
        Arc::new(TieredConfigStore::standard(global)),
        Arc::new(ScriptDefinitionRuntime::new()),
    );

    let mut registry = ExtensionRegistry::new();
    register(&mut registry, Arc::new(resolver))?;
    Ok(registry)
}
