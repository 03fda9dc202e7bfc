use anyhow::Context;
use clap::Parser;
use edubase::core::Storage;
use edubase::utils::{logger, validation::Validate};
use edubase::{AppConfig, CliConfig, EduBase, EduError, JsonFileStorage, LogFormat};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            // The logger is not installed yet, so report straight to stderr.
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    init_logging(&config);
    tracing::info!("Starting eduBase");
    tracing::debug!("Resolved config: {:?}", config);

    let storage = JsonFileStorage::from_config(&config);
    tracing::info!(
        "Using data files {} and {}",
        storage.students_path().display(),
        storage.courses_path().display()
    );

    let mut app = match EduBase::load(storage).await {
        Ok(app) => app,
        Err(e) => exit_on_fatal(&e),
    };

    repl(&mut app).await.context("terminal input/output failed")?;

    tracing::info!("eduBase stopped");
    Ok(())
}

fn init_logging(config: &AppConfig) {
    let level = config.log_level.as_deref();
    match config.log_format {
        LogFormat::Json => logger::init_json_logger(config.verbose, level),
        LogFormat::Compact => logger::init_cli_logger(config.verbose, level),
    }
}

fn exit_on_fatal(e: &EduError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

async fn repl<S: Storage>(app: &mut EduBase<S>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    print_views(app, &mut stdout).await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            // End of input behaves like `exit`.
            break;
        };

        match app.run_command(&line).await {
            Ok(result) => {
                stdout
                    .write_all(format!("{}\n", result.feedback).as_bytes())
                    .await?;
                if result.exit {
                    break;
                }
                print_views(app, &mut stdout).await?;
            }
            Err(e) if e.is_fatal() => exit_on_fatal(&e),
            Err(e) => {
                tracing::debug!("Command failed: {}", e);
                stdout
                    .write_all(format!("{}\n", e.user_friendly_message()).as_bytes())
                    .await?;
            }
        }
    }

    if let Err(e) = app.save().await {
        exit_on_fatal(&e);
    }
    Ok(())
}

async fn print_views<S: Storage, W: AsyncWrite + Unpin>(
    app: &EduBase<S>,
    out: &mut W,
) -> std::io::Result<()> {
    let mut listing = String::from("Students:\n");
    for (index, person) in app.store().filtered_persons().iter().enumerate() {
        listing.push_str(&format!("  {}. {}\n", index + 1, person));
    }
    listing.push_str("Courses:\n");
    for (index, course) in app.store().filtered_courses().iter().enumerate() {
        listing.push_str(&format!("  {}. {}\n", index + 1, course));
    }
    out.write_all(listing.as_bytes()).await?;
    out.flush().await
}
