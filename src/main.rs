use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use carta_admin::cli::{
    handle_admin_command, handle_backup_command, handle_cart_command, handle_export_command,
    handle_log_command, handle_novela_command, handle_prices_command, handle_zone_command,
    CliContext, Credentials, ExportFormat,
};
use carta_admin::config::{CartaPaths, Settings};
use carta_admin::crypto::SecureString;
use carta_admin::storage::{initialize_storage, needs_initialization};

#[derive(Parser)]
#[command(
    name = "carta",
    version,
    about = "Admin tool for the TV a la Carta storefront",
    long_about = "carta manages the TV a la Carta storefront configuration: prices, \
                  delivery zones and the novela catalog. Every change is recorded \
                  and the whole configuration can be exported as a backup."
)]
struct Cli {
    /// Base directory for settings and data
    #[arg(long, global = true, env = "CARTA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Admin username
    #[arg(short, long, global = true, env = "CARTA_ADMIN_USER")]
    user: Option<String>,

    /// Admin password; prompted for when a command needs it
    #[arg(long, global = true, env = "CARTA_ADMIN_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the settings file and seed the catalog
    Init,

    /// Show current configuration and paths
    Config,

    /// Price list commands
    #[command(subcommand)]
    Prices(carta_admin::cli::PricesCommands),

    /// Delivery zone commands
    #[command(subcommand)]
    Zone(carta_admin::cli::ZoneCommands),

    /// Novela catalog commands
    #[command(subcommand)]
    Novela(carta_admin::cli::NovelaCommands),

    /// Shopping cart commands
    #[command(subcommand)]
    Cart(carta_admin::cli::CartCommands),

    /// Export the whole configuration
    Export {
        #[arg(short, long, value_enum, default_value = "archive")]
        format: ExportFormat,

        /// Directory to write to, instead of the configured export directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Backup listing, retention and restore
    #[command(subcommand)]
    Backup(carta_admin::cli::BackupCommands),

    /// Show the change history
    Log {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Admin account commands
    #[command(subcommand)]
    Admin(carta_admin::cli::AdminCommands),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => CartaPaths::with_base_dir(dir),
        None => CartaPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    if needs_initialization(&paths)
        && !matches!(cli.command, None | Some(Commands::Init) | Some(Commands::Config))
    {
        eprintln!("Note: no settings found, using the seeded catalog. Run 'carta init' to set up.");
    }
    let credentials = Credentials {
        username: cli.user,
        password: cli.password.map(SecureString::from),
    };
    let mut ctx = CliContext::new(paths, settings, credentials);

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing carta at: {}", ctx.paths.base_dir().display());
            let seeded = initialize_storage(&ctx.paths)?;
            ctx.settings.save(&ctx.paths)?;
            if seeded {
                println!("Seeded the base delivery zones and the novela catalog.");
            } else {
                println!("Existing data kept.");
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'carta novela list' to see the catalog.");
        }
        Some(Commands::Config) => {
            let paths = &ctx.paths;
            let settings = &ctx.settings;
            println!("carta Configuration");
            println!("===================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", settings.export_dir(paths).display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency:         {}", settings.currency);
            println!("  Admin user:       {}", settings.admin.username);
            println!(
                "  Admin password:   {}",
                if settings.admin.password_hash.is_some() { "custom" } else { "default" }
            );
            println!("  Export retention: {}", settings.export.retention);
            println!("  Audit enabled:    {}", settings.audit_enabled);
        }
        Some(Commands::Prices(cmd)) => handle_prices_command(&ctx, cmd)?,
        Some(Commands::Zone(cmd)) => handle_zone_command(&ctx, cmd)?,
        Some(Commands::Novela(cmd)) => handle_novela_command(&ctx, cmd)?,
        Some(Commands::Cart(cmd)) => handle_cart_command(&ctx, cmd)?,
        Some(Commands::Export { format, output_dir }) => {
            handle_export_command(&ctx, format, output_dir)?
        }
        Some(Commands::Backup(cmd)) => handle_backup_command(&ctx, cmd)?,
        Some(Commands::Log { limit }) => handle_log_command(&ctx, limit)?,
        Some(Commands::Admin(cmd)) => handle_admin_command(&mut ctx, cmd)?,
        None => {
            println!("carta - TV a la Carta admin");
            println!();
            println!("Run 'carta --help' for usage information.");
        }
    }

    Ok(())
}
