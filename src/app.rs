use std::io::{BufRead, Write};

use anyhow::Result;
use log::{debug, warn};

use crate::config::AppConfig;
use crate::data::model::PriceRecord;
use crate::state::{AppState, Command, ShellState};

const PROMPT: &str =
    "Введите название товара для поиска (или 'exit' для выхода): ";

/// Interactive console front-end around [`AppState`].
pub struct PriceAnalyzerApp {
    pub state: AppState,
}

impl Default for PriceAnalyzerApp {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl PriceAnalyzerApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }

    /// Load prices once, then answer searches until the exit command (or end
    /// of input), and finally export the HTML report.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        let count = self.state.load();
        if let Some(report) = &self.state.load_report {
            if !report.unreadable_files.is_empty() {
                debug!("unreadable price files: {:?}", report.unreadable_files);
            }
            if !report.files_missing_columns.is_empty() {
                debug!(
                    "price files without usable columns: {:?}",
                    report.files_missing_columns
                );
            }
            for (reason, n) in &report.skipped_rows {
                debug!("{n} rows skipped: {reason}");
            }
        }
        writeln!(out, "Загружено товаров: {count}")?;

        let mut buf = Vec::new();
        while self.state.shell == ShellState::Prompting {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            buf.clear();
            // A failed read ends the session like end of input does, so the
            // report is still written.
            let read = input.read_until(b'\n', &mut buf).unwrap_or_else(|err| {
                warn!("reading operator input failed: {err}");
                0
            });
            let line = String::from_utf8_lossy(&buf);
            let text = line.trim_end_matches(['\n', '\r']);

            let command = if read == 0 {
                Command::Exit
            } else {
                self.state.parse_command(text)
            };

            match command {
                Command::Exit => {
                    writeln!(out, "Работа программы завершена.")?;
                    self.state.terminate();
                }
                Command::Search(text) => {
                    let results = self.state.search(text);
                    print_results(out, &results)?;
                }
            }
        }

        self.state.export()?;
        writeln!(
            out,
            "Данные экспортированы в {}.",
            self.state.config.output_file.display()
        )?;
        Ok(())
    }
}

fn print_results<W: Write>(out: &mut W, results: &[&PriceRecord]) -> std::io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "Товар не найден.");
    }

    writeln!(out, "\nНайдено {} позиций:\n", results.len())?;
    writeln!(
        out,
        "{:<2} {:<25} {:<8} {:<3} {:<12} {:<7}",
        "№", "Наименование", "Цена", "Вес", "Файл", "Цена за кг."
    )?;
    for (rank, rec) in results.iter().enumerate() {
        writeln!(
            out,
            "{:<2} {:<25} {:<8.2} {:<3.0} {:<12} {:.2}",
            rank + 1,
            rec.product,
            rec.price,
            rec.weight,
            rec.source_file,
            rec.price_per_kg
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    fn app_in(dir: &Path) -> PriceAnalyzerApp {
        PriceAnalyzerApp::new(AppConfig {
            scan_dir: dir.to_path_buf(),
            output_file: dir.join("output.html"),
            ..AppConfig::default()
        })
    }

    fn run(app: &mut PriceAnalyzerApp, input: &str) -> String {
        let mut out = Vec::new();
        app.run(Cursor::new(input.as_bytes().to_vec()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn search_then_exit_exports_everything() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("price_1.csv"),
            "товар,цена,вес\nbread loaf,50,2\nmilk,80,1\nrye bread,30,2\n",
        )
        .unwrap();

        let mut app = app_in(dir.path());
        let out = run(&mut app, "BREAD\ncheese\nExit\nmilk\n");

        assert!(out.starts_with("Загружено товаров: 3\n"));
        assert!(out.contains("Найдено 2 позиций:"));
        let rye = out.find("rye bread").unwrap();
        let loaf = out.find("bread loaf").unwrap();
        assert!(rye < loaf, "results sorted by price per kg");
        assert!(out.contains("15.00"));
        assert!(out.contains("Товар не найден."));
        assert!(out.contains("Работа программы завершена."));
        assert!(out.trim_end().ends_with("output.html."));
        assert_eq!(app.state.shell, ShellState::Terminated);

        let html = fs::read_to_string(dir.path().join("output.html")).unwrap();
        assert_eq!(html.matches("<tr>").count(), 4);
        // Input after the exit command is never searched.
        assert_eq!(out.matches("Найдено").count(), 1);
    }

    #[test]
    fn result_rows_use_fixed_widths() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("price_1.csv"), "товар,цена,вес\nmilk,80,1\n").unwrap();

        let mut app = app_in(dir.path());
        let out = run(&mut app, "milk\r\nexit\r\n");

        let row = format!(
            "{:<2} {:<25} {:<8} {:<3} {:<12} {}",
            1, "milk", "80.00", "1", "price_1.csv", "80.00"
        );
        assert!(out.lines().any(|l| l == row), "missing row {row:?} in {out}");
    }

    #[test]
    fn end_of_input_still_exports() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let out = run(&mut app, "");

        assert!(out.starts_with("Загружено товаров: 0\n"));
        assert!(out.contains("Работа программы завершена."));
        assert!(dir.path().join("output.html").exists());
    }

    #[test]
    fn invalid_utf8_input_is_searched_lossily() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("price_1.csv"), "товар,цена,вес\nmilk,80,1\n").unwrap();

        let mut app = app_in(dir.path());
        let mut out = Vec::new();
        app.run(Cursor::new(b"\xff\xfe\nexit\n".to_vec()), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Товар не найден."));
        assert!(out.contains("Работа программы завершена."));
        let html = fs::read_to_string(dir.path().join("output.html")).unwrap();
        assert_eq!(html.matches("<tr>").count(), 2);
    }

    struct BrokenInput;

    impl std::io::Read for BrokenInput {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "terminal gone"))
        }
    }

    #[test]
    fn read_failure_ends_session_with_export() {
        let dir = tempdir().unwrap();
        let mut app = app_in(dir.path());
        let mut out = Vec::new();
        app.run(std::io::BufReader::new(BrokenInput), &mut out).unwrap();

        assert_eq!(app.state.shell, ShellState::Terminated);
        assert!(String::from_utf8(out).unwrap().contains("Работа программы завершена."));
        assert!(dir.path().join("output.html").exists());
    }
}
