use clap::Parser;
use std::path::{Path, PathBuf};
use svc_scaffold::adapters::prompt::{
    collect_inputs, DefaultsPrompter, InputOverrides, LinePrompter,
};
use svc_scaffold::config::toml_config::TomlConfig;
use svc_scaffold::utils::error::{ErrorSeverity, ScaffoldError};
use svc_scaffold::utils::{logger, validation::Validate};
use svc_scaffold::{
    resolve, BootstrapDir, CliConfig, HttpFetcher, Phase, RunError, ScaffoldEngine, ScaffoldPlan,
    ServiceInputs, TemplateSource,
};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_json);

    tracing::info!("Starting svc-scaffold");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let (engine, plan, inputs) = match prepare(&config) {
        Ok(prepared) => prepared,
        Err(e) => fail(e),
    };

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be downloaded or written");
        if let Err(e) = perform_dry_run(&plan, &inputs) {
            fail(e);
        }
        return;
    }

    match engine.run(&plan, &inputs).await {
        Ok(outcome) => {
            println!("{}", outcome.project_dir.display());
            println!(
                "✅ {} scaffolded successfully!",
                outcome.record.service_name_title()
            );
        }
        Err(e) => fail(e),
    }
}

/// Everything before the first network call: settings, template source,
/// destination and the three answers.
fn prepare(
    config: &CliConfig,
) -> Result<(ScaffoldEngine<HttpFetcher>, ScaffoldPlan, ServiceInputs), RunError> {
    let configure = |e: ScaffoldError| RunError::new(Phase::Configure, e);

    config.validate().map_err(configure)?;

    let default_root = config
        .bootstrap_dir
        .clone()
        .unwrap_or_else(BootstrapDir::default_location);
    let settings = TomlConfig::load(
        config.config.as_deref(),
        &BootstrapDir::new(&default_root).settings_path(),
    )
    .map_err(configure)?;
    settings.validate().map_err(configure)?;

    let workspace = BootstrapDir::new(
        config
            .bootstrap_dir
            .clone()
            .or_else(|| settings.bootstrap_dir())
            .unwrap_or(default_root),
    );

    let source = TemplateSource::parse(&config.template).map_err(configure)?;
    let archive_url = source.archive_url(&settings.source).map_err(configure)?;
    tracing::debug!("Template source {} -> {}", source, archive_url);

    let output_dir = absolute_dir(config.output.as_deref()).map_err(configure)?;
    let fetcher = HttpFetcher::with_timeout(settings.source.timeout_seconds).map_err(configure)?;

    let overrides = InputOverrides {
        name: config.name.clone(),
        route: config.route.clone(),
        port: config.port.clone(),
    };
    let inputs = if config.no_input {
        collect_inputs(&mut DefaultsPrompter, &settings.defaults, &overrides)
    } else {
        collect_inputs(&mut LinePrompter::stdio(), &settings.defaults, &overrides)
    }
    .map_err(|e| RunError::new(Phase::Resolve, e))?;

    Ok((
        ScaffoldEngine::new(fetcher, workspace),
        ScaffoldPlan {
            archive_url,
            output_dir,
        },
        inputs,
    ))
}

fn absolute_dir(dir: Option<&Path>) -> svc_scaffold::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match dir {
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

fn perform_dry_run(plan: &ScaffoldPlan, inputs: &ServiceInputs) -> Result<(), RunError> {
    let record =
        resolve(&inputs.name, &inputs.route, &inputs.port).map_err(|e| RunError::new(Phase::Resolve, e))?;

    let summary = serde_json::json!({
        "archive_url": plan.archive_url,
        "destination": plan.destination(&record),
        "record": record,
    });
    let rendered = serde_json::to_string_pretty(&summary)
        .map_err(|e| RunError::new(Phase::Configure, e.into()))?;
    println!("{}", rendered);
    Ok(())
}

fn fail(e: RunError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        e.phase,
        e.source,
        e.source.category(),
        e.source.severity()
    );

    eprintln!("❌ {}: {}", e.phase, e.source.user_friendly_message());
    eprintln!("💡 {}", e.source.recovery_suggestion());

    let exit_code = match e.source.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2, // retryable
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
