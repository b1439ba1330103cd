use clap::Parser;
use craas_client::cli::{Args, Runner};
use craas_client::logging::init_tracing;
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let runner = Runner::new(args);
    if let Err(e) = runner.run().await {
        runner.output().error(&e.to_string());
        if let Some(not_found) = e.outcome().and_then(|outcome| outcome.not_found()) {
            runner
                .output()
                .detail(&format!("Object id: {}", not_found.error.id));
        }
        process::exit(1);
    }
}
