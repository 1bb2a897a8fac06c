use apigw_find_api::utils::logger;
use apigw_find_api::{run_action, ActionsEnv, ActionsOutput, CliConfig, LayeredInputs};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_step_logger(config.verbose, config.json_logs);

    tracing::info!("Starting apigw-find-api");

    let env = ActionsEnv::from_env();
    let output_file = env.output_file();
    if let Some(path) = &output_file {
        tracing::debug!("Writing outputs to {}", path.display());
    }

    let inputs = LayeredInputs::new(&config, env);
    let mut sink = ActionsOutput::new(std::io::stdout(), output_file);

    let status = run_action(&inputs, &mut sink).await;
    tracing::info!("Step finished: {:?}", status);

    if status.exit_code() != 0 {
        std::process::exit(status.exit_code());
    }

    Ok(())
}
