use anyhow::Result;
use clap::{Parser, Subcommand};
use ledsdk_client::{
    ClientConfig, ConfigLoader, DeviceClient, DeviceOutcome, HttpDeviceClient, PeriodicTask,
    PushStatusTask, ScheduledTask,
};
use ledsdk_types::{FileInfo, PeriodicTaskInfo, ScheduledTaskInfo};
use log::LevelFilter;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

mod input;

#[derive(Parser, Debug)]
#[clap(name = "ledsdk", author, version = "0.1.0", about = "LED display controller client")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, default_value = "ledsdk.yaml", help = "Client configuration file")]
    config: PathBuf,

    #[clap(long, help = "Gateway URL, overrides the configuration file")]
    server_url: Option<String>,

    #[clap(long, short, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Weekly repeating device tasks
    Periodic {
        #[clap(subcommand)]
        action: TaskCommands,
    },
    /// Date-bound device tasks
    Scheduled {
        #[clap(subcommand)]
        action: TaskCommands,
    },
    /// Push status values to devices
    Status {
        #[clap(long = "device", short = 'd', required = true, num_args = 1..)]
        devices: Vec<String>,

        #[clap(help = "KEY=VALUE pairs; values are parsed as JSON when possible")]
        values: Vec<String>,
    },
    /// Upload media files and print their device URLs
    Upload {
        #[clap(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Check that the gateway is reachable
    Health,
}

#[derive(Subcommand, Debug)]
enum TaskCommands {
    /// Read the tasks configured on devices
    Get {
        #[clap(long = "device", short = 'd', required = true, num_args = 1..)]
        devices: Vec<String>,
    },
    /// Replace the tasks of devices with the ones in a YAML/JSON file
    Set {
        #[clap(long = "device", short = 'd', required = true, num_args = 1..)]
        devices: Vec<String>,

        #[clap(long, short)]
        file: PathBuf,
    },
}

fn outcomes_to_json<T: Serialize>(outcomes: &[DeviceOutcome<T>]) -> Result<Value> {
    outcomes
        .iter()
        .map(|outcome| -> Result<Value> {
            Ok(match &outcome.result {
                Ok(tasks) => json!({"id": outcome.id, "tasks": serde_json::to_value(tasks)?}),
                Err(message) => json!({"id": outcome.id, "error": message}),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let config = ConfigLoader::load_with(&cli.config, |config| {
        if let Some(url) = &cli.server_url {
            config.server_url = url.clone();
        }
    })
    .await?;
    Ok(config)
}

async fn run_periodic(client: &dyn DeviceClient, action: TaskCommands) -> Result<()> {
    let periodic = PeriodicTask::new(client);
    match action {
        TaskCommands::Get { devices } => {
            let outcomes = periodic.get_periodic_task(devices).await?;
            print_json(&outcomes_to_json(&outcomes)?)
        }
        TaskCommands::Set { devices, file } => {
            let tasks: Vec<PeriodicTaskInfo> = input::load_items(&file).await?;
            log::info!("Setting {} periodic task(s) from {}", tasks.len(), file.display());
            let replies = periodic.set_periodic_task(devices, tasks).await?;
            print_json(&serde_json::to_value(replies)?)
        }
    }
}

async fn run_scheduled(client: &dyn DeviceClient, action: TaskCommands) -> Result<()> {
    let scheduled = ScheduledTask::new(client);
    match action {
        TaskCommands::Get { devices } => {
            let outcomes = scheduled.get_scheduled_task(devices).await?;
            print_json(&outcomes_to_json(&outcomes)?)
        }
        TaskCommands::Set { devices, file } => {
            let tasks: Vec<ScheduledTaskInfo> = input::load_items(&file).await?;
            log::info!("Setting {} scheduled task(s) from {}", tasks.len(), file.display());
            let replies = scheduled.set_scheduled_task(devices, tasks).await?;
            print_json(&serde_json::to_value(replies)?)
        }
    }
}

async fn run_upload(client: &HttpDeviceClient, paths: Vec<PathBuf>) -> Result<()> {
    let mut uploaded = Vec::new();
    for path in paths {
        let mut file = FileInfo::from_path(&path)?;
        let url = client.upload_file(&file).await?;
        log::info!("Uploaded {} -> {}", file.name, url);
        file.set_url(url);
        uploaded.push(file);
    }
    print_json(&serde_json::to_value(uploaded)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .init();

    let config = load_config(&cli).await?;
    log::debug!("Using gateway {}", config.server_url);
    let client = HttpDeviceClient::from_config(&config);

    match cli.command {
        Commands::Periodic { action } => run_periodic(&client, action).await,
        Commands::Scheduled { action } => run_scheduled(&client, action).await,
        Commands::Status { devices, values } => {
            let status = input::parse_status_args(&values)?;
            let replies = PushStatusTask::new(&client)
                .push_status(devices, status)
                .await?;
            print_json(&serde_json::to_value(replies)?)
        }
        Commands::Upload { paths } => run_upload(&client, paths).await,
        Commands::Health => {
            client.health_check().await?;
            println!("ok");
            Ok(())
        }
    }
}
