use crate::config::toml_config::TomlConfig;
use crate::config::Preset;
use crate::core::ReservationForm;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "clinic-reserve")]
#[command(about = "Book clinic appointment slots and submit them to the clinic API")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override schedule and phone rules with a preset
    #[arg(long, value_enum, global = true)]
    pub preset: Option<Preset>,

    /// Override the storage file from config
    #[arg(long, global = true)]
    pub storage: Option<String>,

    /// Override the submission endpoint from config
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the offered time slots
    Slots {
        /// Mark slots already reserved on this date
        #[arg(long)]
        date: Option<String>,
    },
    /// Validate, reserve and submit an appointment
    Book(BookArgs),
    /// List reserved slot keys
    List,
    /// Load and validate the configuration
    CheckConfig,
}

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    #[arg(long, default_value = "")]
    pub first_name: String,

    #[arg(long, default_value = "")]
    pub last_name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    /// Appointment date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date: String,

    /// Slot label as printed by `slots`, e.g. "9:00 AM"
    #[arg(long, default_value = "")]
    pub time: String,

    /// Check the booking without reserving or submitting
    #[arg(long)]
    pub dry_run: bool,
}

impl From<BookArgs> for ReservationForm {
    fn from(args: BookArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            date: args.date,
            time: args.time,
        }
    }
}

impl CliConfig {
    /// 載入 TOML 配置並套用命令列覆蓋設定
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(preset) = self.preset {
            config.apply_preset(preset);
            tracing::info!("🔧 Preset overridden to: {:?}", preset);
        }
        if let Some(storage) = &self.storage {
            config.storage.path = storage.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.submission.endpoint = endpoint.clone();
        }

        Ok(config)
    }
}
