use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match jogjahub_api::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jogjahub: {err}");
            ExitCode::FAILURE
        }
    }
}
