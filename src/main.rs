mod cli;
use log::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::process::ExitCode {
    // A missing .env file is fine, the variables may come from the shell
    dotenvy::dotenv().ok();
    env_logger::init();

    match cli::run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
