// src/main.rs

use cascade::{cli, logging, run};

#[tokio::main]
async fn main() {
    let code = match run_main().await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "cascade failed");
            1
        }
    };
    std::process::exit(code);
}

async fn run_main() -> anyhow::Result<i32> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;

    let outcome = run(args).await?;
    Ok(outcome.map_or(0, |o| o.exit_code()))
}
