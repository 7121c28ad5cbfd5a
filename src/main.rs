use clap::{Args, Parser, Subcommand};

use git_merger::changes::Format;
use git_merger::config;
use git_merger::gateway::GitGateway;
use git_merger::ui::{self, ConsoleObserver};
use git_merger::version::VersionPart;
use git_merger::workflow::{self, MergeRequest};

#[derive(Parser)]
#[command(
    name = "git-merger",
    about = "Merge release branches through a staging branch and tag semantic versions"
)]
struct Cli {
    #[arg(short, long, help = "Custom configuration file path", global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge branches and increment the major version
    Major(MergeArgs),
    /// Merge branches and increment the minor version
    Minor(MergeArgs),
    /// Merge branches and increment the patch version
    Patch(MergeArgs),
    /// Print the changelog for a released version
    Changes(ChangesArgs),
}

#[derive(Args)]
struct MergeArgs {
    #[arg(short, long, help = "Branch to merge from")]
    source: Option<String>,

    #[arg(short, long, help = "Branch to merge into")]
    target: Option<String>,

    #[arg(long, help = "Explicit tag name, bypasses auto-increment")]
    tag: Option<String>,
}

#[derive(Args)]
struct ChangesArgs {
    #[arg(short, long, help = "Version to list changes for")]
    version: String,

    #[arg(short, long, value_enum, default_value = "text", help = "Output format")]
    format: Format,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let gateway = GitGateway::open(".")?;

    match cli.command {
        Command::Major(args) => run_merge(&gateway, cli.config.as_deref(), args, VersionPart::Major),
        Command::Minor(args) => run_merge(&gateway, cli.config.as_deref(), args, VersionPart::Minor),
        Command::Patch(args) => run_merge(&gateway, cli.config.as_deref(), args, VersionPart::Patch),
        Command::Changes(args) => {
            let changes = workflow::run_changes(&gateway, &args.version, args.format)?;
            println!("{}", changes);
            Ok(())
        }
    }
}

fn run_merge(
    gateway: &GitGateway,
    config_path: Option<&str>,
    args: MergeArgs,
    part: VersionPart,
) -> anyhow::Result<()> {
    let config = config::load_config(config_path)?;

    let request = MergeRequest {
        source: args.source.unwrap_or(config.branches.source),
        target: args.target.unwrap_or(config.branches.target),
        part,
        tag: args.tag,
    };

    let summary = workflow::run_merge(gateway, &ConsoleObserver, &request)?;

    ui::display_success(&format!("Merged and tagged release {}", summary.tag));
    println!("Changes:");
    println!("{}", summary.changes);
    Ok(())
}
