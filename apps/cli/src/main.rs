mod main_lib;

use clap::Parser;
use main_lib::{run, startup, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = startup();

    let output = run(&args, config).await?;
    println!("{}", output);
    Ok(())
}
