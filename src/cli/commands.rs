//! CLI command execution.

use crate::cli::args::{Command, LorikeetArgs, ServeArgs, TrainArgs};
use crate::corpus::{CorpusContext, dataset};
use crate::error::Result;
use crate::server::ControlServer;
use crate::training::{self, TrainingConfig};

/// Execute the parsed command.
pub fn execute_command(args: LorikeetArgs) -> Result<()> {
    match args.command {
        Command::Train(train_args) => execute_train(train_args),
        Command::Serve(serve_args) => execute_serve(serve_args),
    }
}

fn execute_train(args: TrainArgs) -> Result<()> {
    let context = CorpusContext::from_data_dir(&args.data_dir, &args.locale)?;
    let config = TrainingConfig {
        locale: args.locale.clone(),
        rate: args.rate,
        hidden_width: args.hidden_nodes,
        iterations: args.iterations,
    };

    let output = args
        .output
        .unwrap_or_else(|| dataset::snapshot_path(&args.data_dir, &args.locale));

    let network = training::train_and_save(&context, &config, &output)?;

    println!(
        "Trained the {} network in {}s ({} error samples); snapshot at {}",
        network.locale(),
        network.elapsed_seconds(),
        network.errors().len(),
        output.display()
    );

    Ok(())
}

fn execute_serve(args: ServeArgs) -> Result<()> {
    let addr = format!("{}:{}", args.address, args.port);
    let server = ControlServer::new(args.data_dir, args.locale);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.run(&addr))
}
