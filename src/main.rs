use anyhow::Context;
use clap::Parser;

use psim_model::load;

#[derive(Parser, Debug)]
#[command(version, about = "Load a phonon simulation model", long_about = None)]
struct Args {
    /// Model document, JSON or JSON5
    #[arg(default_value = "model.json5")]
    model: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let loaded = load(&args.model).with_context(|| format!("Loading {}", args.model))?;
    for event in &loaded.events {
        println!("{event}");
    }
    println!("{:#?}", loaded.model);

    anyhow::Result::Ok(())
}
