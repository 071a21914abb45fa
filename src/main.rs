use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use nodedeck::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use nodedeck::models::{Instance, Provider};
use nodedeck::views::DeleteOutcome;
use nodedeck::{ApiClient, AppState, CloudBackend, InstanceListView, NodeCreator, TerminalPrompt};

fn build_client(env_file: Option<&str>) -> ApiClient {
    config::load_env_file(env_file);
    let client = match reqwest::Client::builder()
        .user_agent(format!("nodedeck/{}", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    };
    ApiClient::new(client, config::get_api_base_url(), config::get_api_token())
}

async fn start_server(client: ApiClient, host: &str, port: u16, stylesheet: Option<String>) {
    let mut state = AppState::new(
        Arc::new(client.clone()),
        client.base_url().to_string(),
        config::get_creator_defaults(),
    );
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = nodedeck::build_router(state);
    tracing::info!(%addr, backend = client.base_url(), "Starting nodedeck console");
    println!("{} {}", yansi::Paint::new("Console running on").green(), yansi::Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(header);
    table
}

fn print_instances(provider: Provider, instances: Vec<Instance>) {
    println!("\n{}", yansi::Paint::new(format!("{} Instances", provider.label())).bold());
    if instances.is_empty() {
        println!("{}", yansi::Paint::new("No active instances found.").dim().italic());
        return;
    }
    let header = match provider {
        Provider::Gcp => vec!["Name", "Zone | Type", "IP", "Status"],
        Provider::Aws => vec!["Name", "Instance ID", "IP", "Status"],
    };
    let mut table = new_table(header);
    for inst in &instances {
        let status = if inst.is_running() {
            yansi::Paint::new(inst.status()).green().to_string()
        } else {
            yansi::Paint::new(inst.status()).dim().to_string()
        };
        table.add_row(vec![inst.title().to_string(), inst.subtitle(), inst.ip_display(), status]);
    }
    println!("{table}");
}

fn print_listing(view: &InstanceListView) {
    print_instances(Provider::Gcp, view.instances(Provider::Gcp));
    print_instances(Provider::Aws, view.instances(Provider::Aws));
    if let Some(at) = view.last_loaded_at() {
        println!("\n{}", yansi::Paint::new(format!("Last refreshed {}", at.format("%Y-%m-%d %H:%M:%S"))).dim());
    }
    println!();
}

fn print_catalog(creator: &NodeCreator) {
    let mut table = new_table(vec!["Type", "vCPU", "RAM (GB)"]);
    let rows: Vec<(String, u32, f64)> = match creator.provider() {
        Provider::Gcp => creator.gcp.machine_types.iter().map(|t| (t.name.clone(), t.cpus, t.ram_gb)).collect(),
        Provider::Aws => creator.aws.instance_types.iter().map(|t| (t.instance_type.clone(), t.vcpus, t.memory_gb)).collect(),
    };
    if rows.is_empty() {
        println!("{}", yansi::Paint::new("No matching instance types.").dim());
        return;
    }
    for (name, cpus, ram) in rows {
        let marker = if name == creator.selected_type() { " (default)" } else { "" };
        table.add_row(vec![format!("{}{}", name, marker), cpus.to_string(), ram.to_string()]);
    }
    println!("\n{table}\n");
}

async fn run_create(client: &ApiClient, mut creator: NodeCreator) {
    if creator.selected_type().is_empty() {
        creator.refresh_catalog(client).await;
        if !creator.selected_type().is_empty() {
            println!("{} {}", yansi::Paint::new("Using type").dim(), yansi::Paint::new(creator.selected_type()).cyan());
        }
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let submitted = {
        let (ticket, request) = match creator.begin_submit() {
            Ok(pending) => pending,
            Err(e) => {
                spinner.finish_and_clear();
                eprintln!("{}: {}", yansi::Paint::red("Refusing to submit"), e);
                process::exit(1);
            }
        };
        spinner.set_message(creator.submit_label());
        let outcome = nodedeck::views::node_creator::send_create(client, &request).await;
        creator.finish_submit(ticket, outcome)
    };
    spinner.finish_and_clear();

    if submitted {
        if let Some(result) = creator.result() {
            println!("{}", yansi::Paint::new("Success!").green().bold());
            println!("{}", nodedeck::utils::value_to_pretty_string(result));
            return;
        }
    }
    eprintln!(
        "{} {}",
        yansi::Paint::new("Error:").red().bold(),
        creator.error().unwrap_or(nodedeck::error::GENERIC_ERROR_MESSAGE)
    );
    process::exit(1);
}

#[derive(Parser)]
#[command(
    name = "nodedeck",
    author,
    version,
    about = "Console for provisioning GCP and AWS instances",
    long_about = r#"nodedeck: list, create and delete GCP and AWS instances through the provisioning backend.

The web console (`nodedeck serve`) offers an instance listing page and a deploy form. The same operations are available from the command line. Point the tool at the backend with API_BASE_URL (and API_TOKEN if the backend expects one), either in the environment or in a .env file.

Examples:
  1) Run the console:
      nodedeck serve --host 127.0.0.1 --port 8080
  2) List instances of both providers:
      nodedeck instances list
  3) Deploy two AWS instances:
      nodedeck create aws --region us-west-2 --count 2
"#,
    after_help = "Use `nodedeck <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web console
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration and backend connectivity
    #[command(about = "Validate configuration and ensure backend connectivity.", long_about = "Check that API_BASE_URL is set and that both instance list endpoints of the backend answer.")]
    CheckConfig,
    /// List or delete instances
    Instances {
        #[command(subcommand)]
        sub: InstanceCommands,
    },
    /// Show the instance type catalog of a provider
    Types {
        #[command(subcommand)]
        sub: TypeCommands,
    },
    /// Create instances
    Create {
        #[command(subcommand)]
        sub: CreateCommands,
    },
}

#[derive(Subcommand)]
enum InstanceCommands {
    #[command(about = "List instances of both providers")]
    List,
    #[command(about = "Delete an instance", long_about = "Permanently delete an instance. You are asked to confirm unless --yes is given. Both lists are reloaded after a successful delete.")]
    Delete {
        #[command(subcommand)]
        target: DeleteCommands,
    },
}

#[derive(Subcommand)]
enum DeleteCommands {
    /// Delete a GCP instance by name
    Gcp {
        name: String,
        #[arg(long)]
        zone: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Delete an AWS instance by id
    Aws {
        id: String,
        #[arg(long)]
        region: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum TypeCommands {
    /// GCP machine types in a zone
    Gcp {
        #[arg(long)]
        zone: Option<String>,
        #[arg(long, default_value_t = 2)]
        min_cpus: u32,
        #[arg(long, default_value_t = 4)]
        min_ram: u32,
    },
    /// AWS instance types in a region
    Aws {
        #[arg(long)]
        region: Option<String>,
        #[arg(long, default_value_t = 2)]
        min_vcpus: u32,
        #[arg(long, default_value_t = 4)]
        min_memory: u32,
    },
}

#[derive(Subcommand)]
enum CreateCommands {
    /// Create GCP instances
    #[command(long_about = "Create one or more GCP instances. Without --machine-type the first type of the filtered catalog is used.")]
    Gcp {
        #[arg(long, default_value = "gcp-node")]
        name: String,
        #[arg(long)]
        zone: Option<String>,
        #[arg(long)]
        machine_type: Option<String>,
        #[arg(long, default_value_t = 2)]
        min_cpus: u32,
        #[arg(long, default_value_t = 4)]
        min_ram: u32,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long)]
        image_project: Option<String>,
        #[arg(long)]
        image_family: Option<String>,
        /// Generated by the backend when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Create AWS instances
    #[command(long_about = "Create one or more AWS instances. Without --instance-type the first type of the filtered catalog is used.")]
    Aws {
        #[arg(long, default_value = "aws-node")]
        name: String,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        instance_type: Option<String>,
        #[arg(long, default_value_t = 2)]
        min_vcpus: u32,
        #[arg(long, default_value_t = 4)]
        min_memory: u32,
        #[arg(long, default_value_t = 1)]
        count: u32,
        #[arg(long)]
        image_id: Option<String>,
        /// Generated by the backend when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        nodedeck::api::set_silent(true);
    }

    let client = build_client(cli.env_file.as_deref());

    let Some(command) = cli.command else {
        start_server(client, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve { host, port, stylesheet } => {
            start_server(client, &host, port, stylesheet).await;
        }
        Commands::CheckConfig => {
            if std::env::var("API_BASE_URL").map(|v| v.trim().is_empty()).unwrap_or(true) {
                eprintln!("{} (using {})", yansi::Paint::new("API_BASE_URL is not configured").yellow(), client.base_url());
            }
            let (gcp, aws) = tokio::join!(client.list_gcp_instances(), client.list_aws_instances());
            let mut ok = true;
            for (provider, result) in [(Provider::Gcp, gcp.map(|r| r.success)), (Provider::Aws, aws.map(|r| r.success))] {
                match result {
                    Ok(true) => println!("{} {}", yansi::Paint::new(provider.label()).bold(), yansi::Paint::new("reachable").green()),
                    Ok(false) => {
                        ok = false;
                        eprintln!("{} {}", yansi::Paint::new(provider.label()).bold(), yansi::Paint::new("answered success=false").red());
                    }
                    Err(e) => {
                        ok = false;
                        eprintln!("{} {}", yansi::Paint::new(provider.label()).bold(), yansi::Paint::new(e.to_string()).red());
                    }
                }
            }
            if !ok {
                process::exit(1);
            }
            println!("{}", yansi::Paint::new("Configuration looks valid").green());
        }
        Commands::Instances { sub } => {
            let mut view = InstanceListView::new();
            match sub {
                InstanceCommands::List => {
                    view.load(&client).await;
                    print_listing(&view);
                }
                InstanceCommands::Delete { target } => {
                    let outcome = match target {
                        DeleteCommands::Gcp { name, zone, yes } => {
                            let prompt = TerminalPrompt::new(yes);
                            view.delete_gcp(&client, &prompt, &name, zone.as_deref()).await
                        }
                        DeleteCommands::Aws { id, region, yes } => {
                            let prompt = TerminalPrompt::new(yes);
                            view.delete_aws(&client, &prompt, &id, region.as_deref()).await
                        }
                    };
                    match outcome {
                        DeleteOutcome::Declined => println!("{}", yansi::Paint::new("Aborted").yellow()),
                        DeleteOutcome::Deleted => {
                            println!("{}", yansi::Paint::new("Instance deleted").green());
                            print_listing(&view);
                        }
                        DeleteOutcome::Failed => process::exit(1),
                    }
                }
            }
        }
        Commands::Types { sub } => {
            let mut creator = NodeCreator::new(&config::get_creator_defaults());
            match sub {
                TypeCommands::Gcp { zone, min_cpus, min_ram } => {
                    creator.set_provider(Provider::Gcp);
                    if let Some(z) = zone {
                        creator.gcp.zone = z;
                    }
                    creator.gcp.min_cpus = min_cpus;
                    creator.gcp.min_ram_gb = min_ram;
                }
                TypeCommands::Aws { region, min_vcpus, min_memory } => {
                    creator.set_provider(Provider::Aws);
                    if let Some(r) = region {
                        creator.aws.region = r;
                    }
                    creator.aws.min_vcpus = min_vcpus;
                    creator.aws.min_memory_gb = min_memory;
                }
            }
            creator.refresh_catalog(&client).await;
            print_catalog(&creator);
        }
        Commands::Create { sub } => {
            let mut creator = NodeCreator::new(&config::get_creator_defaults());
            match sub {
                CreateCommands::Gcp { name, zone, machine_type, min_cpus, min_ram, count, image_project, image_family, password } => {
                    creator.set_provider(Provider::Gcp);
                    creator.set_name(name);
                    if let Some(z) = zone {
                        creator.gcp.zone = z;
                    }
                    creator.gcp.min_cpus = min_cpus;
                    creator.gcp.min_ram_gb = min_ram;
                    if let Some(t) = machine_type {
                        creator.set_selected_type(t);
                    }
                    if let Some(p) = image_project {
                        creator.gcp.image_project = p;
                    }
                    if let Some(f) = image_family {
                        creator.gcp.image_family = f;
                    }
                    creator.count = count;
                    creator.password = password.unwrap_or_default();
                }
                CreateCommands::Aws { name, region, instance_type, min_vcpus, min_memory, count, image_id, password } => {
                    creator.set_provider(Provider::Aws);
                    creator.set_name(name);
                    if let Some(r) = region {
                        creator.aws.region = r;
                    }
                    creator.aws.min_vcpus = min_vcpus;
                    creator.aws.min_memory_gb = min_memory;
                    if let Some(t) = instance_type {
                        creator.set_selected_type(t);
                    }
                    if let Some(i) = image_id {
                        creator.aws.image_id = i;
                    }
                    creator.count = count;
                    creator.password = password.unwrap_or_default();
                }
            }
            run_create(&client, creator).await;
        }
    }
}

