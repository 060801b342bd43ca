use clap::Parser;
use clinic_reserve::config::cli::Command;
use clinic_reserve::core::ConfigProvider;
use clinic_reserve::utils::error::ErrorSeverity;
use clinic_reserve::utils::{logger, validation::Validate};
use clinic_reserve::{
    CliConfig, LocalStorage, Notification, ReservationError, ReservationForm, ReservationService,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(cli.command, config).await {
        exit_with(&e);
    }

    Ok(())
}

async fn run(command: Command, config: TomlConfig) -> clinic_reserve::Result<()> {
    let storage = LocalStorage::new(config.storage_path());
    let mut service = ReservationService::load(storage, config).await?;

    match command {
        Command::Slots { date } => {
            for label in service.slots().labels() {
                let taken = date
                    .as_deref()
                    .map(|d| service.is_reserved(d, &label))
                    .unwrap_or(false);
                if taken {
                    println!("{}  (reservado)", label);
                } else {
                    println!("{}", label);
                }
            }
        }
        Command::List => {
            let keys = service.reserved_keys();
            tracing::info!("📋 {} reserved slot(s)", keys.len());
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Book(args) => {
            let dry_run = args.dry_run;
            let form = ReservationForm::from(args);

            if dry_run {
                tracing::info!("🔍 DRY RUN MODE - nothing will be reserved or submitted");
                let request = service.check(&form)?;
                println!("✅ {} is available", request.slot_key());
                println!("{}", serde_json::to_string_pretty(&request)?);
                return Ok(());
            }

            // 本地預約成功後即顯示成功訊息，再送出至遠端
            let request = service.reserve(form).await?;
            println!("{}", Notification::booked());

            service.submit(&request).await?;
        }
        Command::CheckConfig => {
            display_config_summary(service.config());
            println!(
                "✅ Configuration is valid ({} stored reservation(s))",
                service.reserved_keys().len()
            );
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 {}", config.clinic_name());
    println!(
        "   Schedule: {:02}:00 - {:02}:00",
        config.start_hour(),
        config.end_hour()
    );
    println!(
        "   Phone: {} to {} digits",
        config.phone_min_digits(),
        config.phone_max_digits()
    );
    println!(
        "   Storage: {} (entry '{}')",
        config.storage_path(),
        config.storage_entry()
    );
    println!("   Endpoint: {}", config.submission_endpoint());
}

fn exit_with(e: &ReservationError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", Notification::from_error(e));
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
