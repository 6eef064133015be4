use clap::Parser;
use test_recorder::cli::commands::{cmd_generate, cmd_normalize, cmd_review, cmd_suggest};
use test_recorder::cli::config::{Cli, Commands, load_config, resolve_ai_settings};
use test_recorder::trace::logger::TraceLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve AI settings: CLI > config > empty defaults
    let settings = resolve_ai_settings(cli.ai_endpoint.as_deref(), cli.ai_model.as_deref(), &config);
    let tracer = TraceLogger::new(&config.trace.file);

    match cli.command {
        Commands::Normalize {
            response,
            evaluations,
            output,
        } => {
            cmd_normalize(
                &response,
                evaluations.as_deref(),
                output.as_deref(),
                cli.verbose,
            )?;
        }
        Commands::Generate {
            events,
            framework,
            language,
            output,
        } => {
            let framework = framework.unwrap_or_else(|| config.codegen.framework.clone());
            let language = language.unwrap_or_else(|| config.codegen.language.clone());
            cmd_generate(
                &events,
                &framework,
                &language,
                output.as_deref(),
                cli.verbose,
                &tracer,
            )?;
        }
        Commands::Suggest {
            events,
            index,
            evaluations,
            test_name,
            url,
        } => {
            let ok = cmd_suggest(
                &events,
                index,
                evaluations.as_deref(),
                &test_name,
                &url,
                &config.codegen.framework,
                &config.codegen.language,
                &settings,
                &tracer,
                cli.verbose,
            )?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Review {
            code,
            test_name,
            output,
        } => {
            let ok = cmd_review(
                &code,
                &test_name,
                output.as_deref(),
                &settings,
                &tracer,
            )?;
            if !ok {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
