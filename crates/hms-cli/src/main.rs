use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use hms_config::{Config, ConfigManager};
use hms_core::chat::{ChatMessage, ChatRequest};
use hms_directory::{
    department_description, group_by_department, DirectoryClient, Doctor, DoctorFilter,
};
use hms_llm::{ClientConfig, OpenRouterClient};

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "Hospital management assistant")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, env = "HMS_CONFIG", default_value = "~/.hms/config.json")]
    config: String,

    /// Enable debug output
    #[arg(long, short, default_value = "false")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the AI assistant a question
    Ask {
        /// The question to send
        question: String,
        /// Override the configured model
        #[arg(long)]
        model: Option<String>,
    },
    /// Browse the doctor directory
    Doctors {
        /// Match against name or specialization
        #[arg(long)]
        search: Option<String>,
        /// Filter by department
        #[arg(long)]
        department: Option<String>,
        /// Filter by experience level (senior, specialist, ...)
        #[arg(long)]
        experience: Option<String>,
        /// Only show doctors currently available
        #[arg(long, default_value = "false")]
        available: bool,
    },
    /// List hospital departments
    Departments,
    /// Check backend connectivity
    Ping,
    /// Configuration commands
    Config(ConfigArgs),
}

#[derive(Args, Clone)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Get a config value
    Get {
        /// Config key (e.g. ai.model, backend.base_url)
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key (e.g. ai.model, backend.base_url)
        key: String,
        /// New value
        value: String,
    },
    /// Initialize a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long, default_value = "false")]
        force: bool,
    },
    /// Show the current config
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = hms_config::expand_tilde(&cli.config)
        .unwrap_or_else(|| PathBuf::from(&cli.config));

    if cli.debug {
        eprintln!("{}", format!("[DEBUG] Config path: {:?}", config_path).dimmed());
    }

    match cli.command {
        Commands::Ask { question, model } => ask(&config_path, &question, model, cli.debug).await,
        Commands::Doctors {
            search,
            department,
            experience,
            available,
        } => doctors(&config_path, search, department, experience, available, cli.debug).await,
        Commands::Departments => departments(&config_path, cli.debug).await,
        Commands::Ping => ping(&config_path, cli.debug).await,
        Commands::Config(args) => handle_config(args, &config_path).await,
    }
}

async fn load_config(config_path: &PathBuf) -> anyhow::Result<Config> {
    let manager = ConfigManager::load(config_path).await?;
    let config = manager.get().read().await.clone();
    Ok(config)
}

async fn ask(
    config_path: &PathBuf,
    question: &str,
    model_override: Option<String>,
    debug: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;

    let Some(api_key) = config.ai.resolve_api_key() else {
        println!(
            "{}",
            format!(
                "No API key found. Set the {} environment variable.",
                config.ai.api_key_env
            )
            .red()
        );
        std::process::exit(1);
    };

    let mut client_config =
        ClientConfig::new(api_key).with_header("X-Title", config.ai.title.as_str());
    if let Some(referer) = config.ai.referer.as_deref().filter(|r| !r.is_empty()) {
        client_config = client_config.with_header("HTTP-Referer", referer);
    }

    let model = model_override.unwrap_or_else(|| config.ai.model.clone());
    if debug {
        eprintln!("{}", format!("[DEBUG] Model: {}", model).dimmed());
        eprintln!("{}", format!("[DEBUG] Client: {:?}", client_config).dimmed());
    }

    let client = OpenRouterClient::new(client_config);
    let request = ChatRequest::new(model).with_message(ChatMessage::user(question));

    println!("{}", "Asking AI...".dimmed());

    match client.send(request).await {
        Ok(response) => {
            match response.primary_content().filter(|c| !c.is_empty()) {
                Some(answer) => println!("{}", answer),
                None => {
                    // Could be a service-reported error body; show it in debug
                    if debug {
                        eprintln!(
                            "{}",
                            format!("[DEBUG] Response: {}", response.as_value()).dimmed()
                        );
                    }
                    println!("{}", "No response received.".yellow());
                }
            }
        }
        Err(e) => {
            if debug {
                eprintln!("{}", format!("[DEBUG] Error: {:?}", e).dimmed());
            }
            println!(
                "{}",
                "There was an error contacting the AI service. Please try again later.".red()
            );
        }
    }

    Ok(())
}

async fn doctors(
    config_path: &PathBuf,
    search: Option<String>,
    department: Option<String>,
    experience: Option<String>,
    available: bool,
    debug: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let client = DirectoryClient::new(&config.backend.base_url);

    if debug {
        eprintln!("{}", format!("[DEBUG] Backend: {}", client.base_url()).dimmed());
    }

    let all_doctors = match client.get_doctors().await {
        Ok(doctors) => doctors,
        Err(e) => {
            if debug {
                eprintln!("{}", format!("[DEBUG] Error: {:?}", e).dimmed());
            }
            println!("{}", "Failed to load doctors. Please try again later.".red());
            return Ok(());
        }
    };

    let mut filter = DoctorFilter::new();
    if let Some(term) = search {
        filter = filter.with_search(term);
    }
    if let Some(dept) = department {
        filter = filter.with_department(dept);
    }
    if let Some(level) = experience {
        filter = filter.with_experience(level);
    }

    let mut filtered = filter.apply(&all_doctors);
    if available {
        filtered.retain(|d| d.is_available);
    }

    if filtered.is_empty() {
        println!("{}", "No doctors found".yellow());
        println!("{}", "Try adjusting your search or filter criteria".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("Showing {} of {} doctors", filtered.len(), all_doctors.len()).dimmed()
    );

    for (department, doctors) in group_by_department(&filtered) {
        println!();
        let plural = if doctors.len() == 1 { "doctor" } else { "doctors" };
        println!(
            "{} {}",
            department.cyan().bold(),
            format!("({} {})", doctors.len(), plural).dimmed()
        );
        for doctor in doctors {
            print_doctor(&doctor);
        }
    }

    Ok(())
}

fn print_doctor(doctor: &Doctor) {
    let availability = if doctor.is_available {
        "Available".green()
    } else {
        "Unavailable".dimmed()
    };

    let experience = doctor
        .experience_level
        .as_deref()
        .map(|level| match level.to_lowercase().as_str() {
            "senior" => level.green(),
            "specialist" => level.blue(),
            _ => level.normal(),
        });

    print!("  {} [{}]", doctor.name.bold(), availability);
    if let Some(experience) = experience {
        print!(" {}", experience);
    }
    println!();

    if let Some(qualification) = doctor.qualification.as_deref() {
        println!("    {}", qualification.dimmed());
    }
    if let Some(specialization) = doctor.specialization.as_deref() {
        println!("    {}", specialization.dimmed());
    }
}

async fn departments(config_path: &PathBuf, debug: bool) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let client = DirectoryClient::new(&config.backend.base_url);

    let mut departments = match client.get_departments().await {
        Ok(departments) => departments,
        Err(e) => {
            if debug {
                eprintln!("{}", format!("[DEBUG] Error: {:?}", e).dimmed());
            }
            println!("{}", "Failed to load departments.".red());
            return Ok(());
        }
    };
    departments.sort();

    for department in departments {
        match department_description(&department) {
            Some(description) => {
                println!("{} {}", department.cyan().bold(), format!("- {}", description).dimmed())
            }
            None => println!("{}", department.cyan().bold()),
        }
    }

    Ok(())
}

async fn ping(config_path: &PathBuf, debug: bool) -> anyhow::Result<()> {
    let config = load_config(config_path).await?;
    let client = DirectoryClient::new(&config.backend.base_url);

    match client.check_connection().await {
        Ok(()) => {
            println!("{}", "Successfully connected to backend server!".green());
        }
        Err(e) => {
            if debug {
                eprintln!("{}", format!("[DEBUG] Error: {:?}", e).dimmed());
            }
            println!("{}", "Cannot connect to backend server.".red());
            println!(
                "{}",
                format!("Make sure backend is running on {}", config.backend.base_url).dimmed()
            );
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn handle_config(args: ConfigArgs, config_path: &PathBuf) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Get { key } => {
            let manager = ConfigManager::load(config_path).await?;
            let config = manager.get().read().await.clone();

            match config.get_value(&key) {
                Some(value) => {
                    println!("{}", format!("{} = {}", key, value).green());
                }
                None => {
                    println!("{}", format!("Key not found: {}", key).red());
                    std::process::exit(1);
                }
            }
        }
        ConfigCommands::Set { key, value } => {
            let manager = ConfigManager::load(config_path).await?;

            manager
                .update(|config| {
                    if let Err(e) = config.set_value(&key, &value) {
                        eprintln!("{}", format!("Failed to set value: {}", e).red());
                        std::process::exit(1);
                    }
                })
                .await?;

            println!("{}", format!("Set {} = {}", key, value).green());
        }
        ConfigCommands::Init { force } => {
            if config_path.exists() && !force {
                println!("{}", format!("Config already exists at {:?}", config_path).yellow());
                println!("{}", "Use --force to overwrite".dimmed());
                return Ok(());
            }

            let manager = ConfigManager::new(Config::default(), config_path.clone());
            manager.save().await?;

            println!("{}", format!("Config initialized at {:?}", config_path).green());
            println!("{}", "You can edit this file to customize your settings".dimmed());
        }
        ConfigCommands::Show => {
            let manager = ConfigManager::load(config_path).await?;
            let config = manager.get().read().await.clone();

            println!("{}", "Current configuration:".cyan().bold());
            println!();
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
    }

    Ok(())
}
