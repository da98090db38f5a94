use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::LevelFilter;
use polypad_core::{
    DisabledInterpreter, Dispatcher, LanguageId, LocalRuntime, PolypadConfig, PythonInterpreter,
    RemoteRunClient,
};
use polypad_term::WorkbenchProps;
use tokio::sync::watch;

#[derive(Parser, Debug)]
#[clap(
    name = "polypad",
    version = "0.1.0",
    about = "Terminal workbench for editing and running code in several languages"
)]
struct Cli {
    #[clap(
        long,
        short,
        default_value = "polypad.yaml",
        help = "Path to the configuration file"
    )]
    config: String,

    #[clap(long, default_value = "info")]
    log_level: String,

    #[clap(long, short, default_value = "python", help = "Language selected at startup")]
    language: String,

    #[clap(long, help = "Disable the embedded Python interpreter")]
    no_local: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so logs go to a file.
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("polypad.log")?;
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        polypad_term::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let language = LanguageId::parse(&cli.language)
        .ok_or_else(|| anyhow!("unknown language: {}", cli.language))?;

    let mut config = PolypadConfig::load(&cli.config).await?;
    if cli.no_local {
        config.interpreter.enabled = false;
    }

    let (local, ready): (Arc<dyn LocalRuntime>, Option<watch::Receiver<bool>>) =
        if config.interpreter.enabled {
            let interpreter = Arc::new(PythonInterpreter::spawn()?);
            let ready = interpreter.ready_signal();
            (interpreter, Some(ready))
        } else {
            log::info!("embedded interpreter disabled; all runs go remote");
            (Arc::new(DisabledInterpreter), None)
        };

    let remote = Arc::new(RemoteRunClient::new(&config.remote)?);
    let dispatcher = Arc::new(Dispatcher::new(local, remote));

    polypad_term::start_loop(WorkbenchProps {
        dispatcher,
        language,
        ready,
    })
    .await
}
