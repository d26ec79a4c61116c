mod app;
mod config;
mod data;
mod report;
mod state;

use std::io;
use std::process::ExitCode;

use app::PriceAnalyzerApp;
use log::error;

fn main() -> ExitCode {
    env_logger::init();

    let mut app = PriceAnalyzerApp::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match app.run(stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("session failed: {err:#}");
            eprintln!("Ошибка: {err:#}");
            ExitCode::FAILURE
        }
    }
}
