use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use crm_cli::config::{AppConfig, ConfigManager, get_config};
use crm_cli::error::CliError;
use crm_cli::orchestrators::clone_orchestrator::{CloneOptions, CloneOrchestrator, clone_context};
use crm_cli::orchestrators::init_orchestrator::{InitOrchestrator, init_context};
use crm_cli::progress::CloneProgressBar;
use crm_cli::prompt::DialoguerSelector;
use crm_cli::{output, student, terminal};
use crm_client_core::{RestClassroomApi, cloner_for};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crm")]
#[command(author, version, about = "Classroom repository manager - clone GitHub Classroom submissions into named folders", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind the current folder to a classroom
    Init {
        /// Classroom id (prompted for when omitted)
        #[arg(short, long, value_name = "ID")]
        classroom: Option<i64>,
    },

    /// Clone the starter code and every accepted submission of an assignment
    Clone {
        /// Assignment id (ignored inside a bound assignment folder)
        #[arg(short, long, value_name = "ID")]
        assignment: Option<i64>,

        /// Folder for the starter code clone
        #[arg(short, long, value_name = "FOLDER")]
        starter_folder: Option<String>,

        /// List every failed repository
        #[arg(short, long)]
        verbose: bool,

        /// Disable progress bar display
        #[arg(long)]
        no_progress: bool,
    },

    /// Manage the classroom roster
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum StudentCommand {
    /// Add a student, replacing any entry with the same login
    Add {
        /// Full name, e.g. "Ada Lovelace"
        name: String,

        email: String,

        /// GitHub login
        login: String,
    },

    /// Remove a student by GitHub login
    Remove { login: String },

    /// List the roster
    List,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., api.page_size)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., clone.program)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("crm_client_core", log::LevelFilter::Debug)
            .filter_module("crm_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(error) = run(cli.command).await {
        let error = CliError::from(error);
        eprint!("{}", error.format_for_user(cli.debug));
        std::process::exit(error.exit_code() as i32);
    }
}

async fn run(command: Commands) -> Result<()> {
    let config = get_config()?;
    if !terminal::should_use_color(config.output.color_enabled) {
        colored::control::set_override(false);
    }

    match command {
        Commands::Init { classroom } => {
            let cwd = current_dir()?;
            init_command(&config, &cwd, classroom).await
        }
        Commands::Clone {
            assignment,
            starter_folder,
            verbose,
            no_progress,
        } => {
            let cwd = current_dir()?;
            let mut config = config;
            config.apply_cli_overrides(starter_folder.as_deref(), no_progress);
            clone_command(&config, &cwd, assignment, verbose).await
        }
        Commands::Student { command } => {
            let cwd = current_dir()?;
            student_command(command, &cwd)
        }
        Commands::Config { command } => config_command(command),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to determine the current directory")
}

async fn init_command(config: &AppConfig, cwd: &Path, classroom_id: Option<i64>) -> Result<()> {
    // Location problems are reported before any network access
    let context = init_context(cwd)?;

    let api = RestClassroomApi::from_environment(&config.api)
        .await
        .context("Failed to create the GitHub Classroom client")?;
    let selector = DialoguerSelector;

    let report = InitOrchestrator::new(&api, &selector)
        .run(context, classroom_id)
        .await?;

    println!(
        "{} {} ({}) in {}",
        "Initialized classroom".green(),
        report.classroom.classroom.name.bold(),
        report.classroom.organization.login,
        report.path.display()
    );
    if report.kept_students > 0 {
        println!("Kept {} student(s) from the existing roster.", report.kept_students);
    }
    Ok(())
}

async fn clone_command(
    config: &AppConfig,
    cwd: &Path,
    assignment_id: Option<i64>,
    verbose: bool,
) -> Result<()> {
    // Fail fast outside a classroom or assignment folder
    clone_context(cwd)?;

    let api = RestClassroomApi::from_environment(&config.api)
        .await
        .context("Failed to create the GitHub Classroom client")?;
    let cloner = cloner_for(&config.clone);
    let selector = DialoguerSelector;
    let progress = CloneProgressBar::for_terminal(
        config.output.progress_enabled && terminal::should_show_progress_by_default(),
    );

    let options = CloneOptions {
        assignment_id,
        starter_folder: config.clone.starter_folder.clone(),
        page_size: config.api.page_size,
    };

    let report = CloneOrchestrator::new(&api, cloner.as_ref(), &selector)
        .with_progress(&progress)
        .run(cwd, &options)
        .await?;

    if report.newly_bound {
        eprintln!(
            "Bound {} to assignment {}",
            report.assignment_path.display(),
            report.assignment.title.bold()
        );
    }
    output::print_summary(&report.result, verbose);
    Ok(())
}

fn student_command(command: StudentCommand, cwd: &Path) -> Result<()> {
    match command {
        StudentCommand::Add { name, email, login } => {
            let bound = student::add_student(cwd, &name, &email, &login)?;
            eprintln!(
                "{}",
                format!("Added {login} to {}", bound.value.classroom.name).green()
            );
        }
        StudentCommand::Remove { login } => {
            let bound = student::remove_student(cwd, &login)?;
            eprintln!(
                "{}",
                format!("Removed {login} from {}", bound.value.classroom.name).green()
            );
        }
        StudentCommand::List => {
            let students = student::list_students(cwd)?;
            if students.is_empty() {
                eprintln!("The roster is empty. Add students with 'crm student add'.");
            }
            for line in output::roster_lines(&students) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn config_command(command: ConfigCommand) -> Result<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            println!("{}", manager.get(&key)?);
        }
        ConfigCommand::Set { key, value } => {
            manager.set(&key, &value)?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;
            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());
            eprintln!();

            let mut current_section = "";
            for (key, value) in &items {
                let (section, field) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if section != current_section {
                    if !current_section.is_empty() {
                        eprintln!();
                    }
                    eprintln!("[{}]", section.yellow());
                    current_section = section;
                }
                println!("  {} = {}", field.cyan(), value);
            }
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
