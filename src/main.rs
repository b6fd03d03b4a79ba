//! Resume analyzer: deterministic analysis reports for uploaded PDF resumes

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction};
use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::error::{Result, ResumeAnalyzerError};
use resume_analyzer::input::descriptor::UploadedFile;
use resume_analyzer::input::manager::InputManager;
use resume_analyzer::output::{save_export, suggest_filename, ExportDocument, ReportGenerator};
use resume_analyzer::processing::AnalysisReport;
use resume_analyzer::session::AnalysisSession;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> Result<()> {
    match command {
        Commands::Analyze {
            file,
            output,
            save,
            detailed,
            skip_gate,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;

            let input_manager = InputManager::new();
            let descriptor = input_manager.describe(&file).await?;
            info!(
                "Loaded '{}' ({} bytes, modified {})",
                descriptor.name, descriptor.byte_size, descriptor.last_modified_millis
            );

            let session = AnalysisSession::new(&config)?;
            let report = if skip_gate {
                cli::validate_file_extension(&file, &["pdf"]).map_err(ResumeAnalyzerError::InvalidInput)?;
                session.analyze_now(&descriptor).await
            } else {
                upload_with_spinner(&session, descriptor.clone()).await?
            };

            emit_report(&report, &descriptor, format, save, detailed, &config)
        }

        Commands::Inspect {
            name,
            size,
            modified,
            output,
            save,
            detailed,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let descriptor = UploadedFile::new(name, size, modified);

            let session = AnalysisSession::new(&config)?;
            let report = session.analyze_now(&descriptor).await;
            emit_report(&report, &descriptor, format, save, detailed, &config)
        }

        Commands::Check { file } => {
            let input_manager = InputManager::new();
            let descriptor = input_manager.describe(&file).await?;

            let session = AnalysisSession::new(&config)?;
            match session.gate().check(&descriptor).await {
                Ok(()) => {
                    println!("✅ '{}' would be accepted", descriptor.name);
                    Ok(())
                }
                Err(reason) => {
                    println!("❌ '{}' rejected [{}]: {}", descriptor.name, reason.code(), reason);
                    Err(reason.into())
                }
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    let rendered = toml::to_string_pretty(&config)
                        .map_err(|e| ResumeAnalyzerError::Configuration(format!("Failed to render config: {}", e)))?;
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("{}", rendered);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", path.display());
                }
            }
            Ok(())
        }
    }
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(ResumeAnalyzerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

async fn upload_with_spinner(session: &AnalysisSession, descriptor: UploadedFile) -> Result<std::sync::Arc<AnalysisReport>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(format!("Uploading and analyzing {}...", descriptor.name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = session.upload(descriptor).await;
    spinner.finish_and_clear();
    result
}

fn emit_report(
    report: &AnalysisReport,
    descriptor: &UploadedFile,
    format: OutputFormat,
    save: Option<PathBuf>,
    detailed: bool,
    config: &Config,
) -> Result<()> {
    let doc = ExportDocument::today(report, &descriptor.name);
    let generator = ReportGenerator::with_options(
        config.output.color_output && save.is_none(),
        detailed || config.output.detailed,
        true,
        detailed,
        true,
    );

    // binary output always goes to a file
    let target = match (format, save) {
        (_, Some(path)) => Some(path),
        (OutputFormat::Pdf, None) => Some(PathBuf::from(suggest_filename(format, &descriptor.name))),
        _ => None,
    };

    match target {
        Some(path) => {
            let bytes = generator.generate(&doc, format)?;
            save_export(&bytes, &path)?;
            println!("💾 Report saved to {}", path.display());
        }
        None => println!("{}", generator.generate_report(&doc, format)?),
    }
    Ok(())
}
