use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    ply_core::run().await
}
