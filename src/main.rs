use clap::{Parser, Subcommand};
use gitrefs::config::Config;
use gitrefs::error::{AppError, AppResult};
use gitrefs::git::{
    CreateBranchOptions, DeleteBranchOptions, DiffOptions, GitExecutor, GitVersion, Repository,
    ShowRefOptions, SymbolicRefOptions, VerifyOptions,
};
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// Resolve git references and summarize branch diffs
#[derive(Parser, Debug)]
#[command(name = "gitrefs")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Repository to operate on; discovered from the current directory when omitted
    #[arg(long, global = true)]
    repo: Option<PathBuf>,

    /// Timeout in seconds for each git invocation (overrides the config file)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the commit ID of a fully qualified reference
    Resolve { refspec: String },
    /// Exit 0 when the fully qualified reference exists
    Exists { refspec: String },
    /// Print the commit ID of a branch
    BranchId { branch: String },
    /// Print the commit ID of a tag
    TagId { tag: String },
    /// Exit 0 when the branch exists
    HasBranch { branch: String },
    /// Exit 0 when the tag exists
    HasTag { tag: String },
    /// Read a symbolic ref, or point it at TARGET
    SymbolicRef {
        #[arg(long, default_value = "HEAD")]
        name: String,
        target: Option<String>,
    },
    /// List references as JSON
    ShowRef {
        #[arg(long)]
        heads: bool,
        #[arg(long)]
        tags: bool,
        patterns: Vec<String>,
    },
    /// List local branch names
    Branches,
    /// Create a branch at BASE
    CreateBranch { name: String, base: String },
    /// Delete a branch
    DeleteBranch {
        name: String,
        /// Delete even if not fully merged
        #[arg(short, long)]
        force: bool,
    },
    /// Summarize the diff between two branches as JSON
    Diff { source: String, target: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<ExitCode> {
    let config = Config::load_or_default()?;
    let mut executor = GitExecutor::from_config(&config)?;
    if let Some(secs) = cli.timeout {
        executor = executor.with_default_timeout(Duration::from_secs(secs));
    }

    GitVersion::validate(&executor)?;

    let repo = match cli.repo {
        Some(path) => Repository::with_runner(path, executor),
        None => Repository::discover_with(env::current_dir()?, executor)?,
    };

    let verify = VerifyOptions::default();

    match cli.command {
        Command::Resolve { refspec } => println!("{}", repo.resolve_ref(&refspec, &verify)?),
        Command::Exists { refspec } => return Ok(exists(repo.has_reference(&refspec, &verify))),
        Command::BranchId { branch } => println!("{}", repo.branch_commit_id(&branch, &verify)?),
        Command::TagId { tag } => println!("{}", repo.tag_commit_id(&tag, &verify)?),
        Command::HasBranch { branch } => return Ok(exists(repo.has_branch(&branch, &verify))),
        Command::HasTag { tag } => return Ok(exists(repo.has_tag(&tag, &verify))),
        Command::SymbolicRef { name, target } => {
            let opts = SymbolicRefOptions {
                name,
                target,
                timeout: None,
            };
            let output = repo.symbolic_ref(&opts)?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Command::ShowRef {
            heads,
            tags,
            patterns,
        } => {
            let refs = repo.show_ref(&ShowRefOptions {
                heads,
                tags,
                patterns,
                timeout: None,
            })?;
            print_json(&refs)?;
        }
        Command::Branches => {
            for branch in repo.branches()? {
                println!("{}", branch);
            }
        }
        Command::CreateBranch { name, base } => {
            repo.create_branch(&name, &base, &CreateBranchOptions::default())?
        }
        Command::DeleteBranch { name, force } => repo.delete_branch(
            &name,
            &DeleteBranchOptions {
                force,
                timeout: None,
            },
        )?,
        Command::Diff { source, target } => {
            match repo.diff_branches(&source, &target, &DiffOptions::default()) {
                Ok(summary) => print_json(&summary)?,
                Err(failure) => {
                    // Print the partial summary too so its error message is not lost
                    print_json(&failure.summary)?;
                    return Err(AppError::Diff(failure));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn exists(found: bool) -> ExitCode {
    println!("{}", found);
    if found { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
