use anyhow::Result;
use log::{error, info, warn};

use crate::config::AppConfig;
use crate::data::filter::find_text;
use crate::data::loader::{LoadReport, load_dir};
use crate::data::model::{PriceCatalog, PriceRecord};
use crate::report::export_html;

// ---------------------------------------------------------------------------
// Shell state machine
// ---------------------------------------------------------------------------

/// Lifecycle of the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Prompting,
    Terminated,
}

/// What one line of operator input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Exit,
    Search(&'a str),
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything a session owns, independent of console I/O.
pub struct AppState {
    pub config: AppConfig,

    /// Records accumulated by the startup load; read-only afterwards.
    pub catalog: PriceCatalog,

    /// Outcome of the startup load (None until `load` ran or if it failed).
    pub load_report: Option<LoadReport>,

    pub shell: ShellState,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalog: PriceCatalog::new(),
            load_report: None,
            shell: ShellState::Prompting,
        }
    }

    /// Run the ingestion pass and return how many records it added.
    ///
    /// A scan directory that cannot be listed yields zero records; the
    /// session still continues.
    pub fn load(&mut self) -> usize {
        match load_dir(&self.config.scan_dir, &self.config.file_marker, &mut self.catalog) {
            Ok(report) => {
                if self.catalog.is_empty() {
                    warn!(
                        "no price records found in {}",
                        self.config.scan_dir.display()
                    );
                }
                let loaded = report.loaded;
                self.load_report = Some(report);
                loaded
            }
            Err(err) => {
                error!("price loading failed: {err:#}");
                0
            }
        }
    }

    /// Interpret one input line (without its line terminator).
    pub fn parse_command<'a>(&self, line: &'a str) -> Command<'a> {
        if line.to_lowercase() == self.config.exit_command.to_lowercase() {
            Command::Exit
        } else {
            Command::Search(line)
        }
    }

    pub fn search(&self, text: &str) -> Vec<&PriceRecord> {
        find_text(&self.catalog, text)
    }

    /// Leave the prompt loop. Further commands are not expected.
    pub fn terminate(&mut self) {
        info!("session terminated");
        self.shell = ShellState::Terminated;
    }

    /// Write the full catalog to the configured report file.
    pub fn export(&self) -> Result<()> {
        export_html(&self.catalog, &self.config.output_file)
    }
}
