// ============================================================
// SESSION HANDLER USE CASE
// ============================================================
// One interaction in, one render model out. Nothing survives the call.

use tracing::{info, warn};

use super::error_reporter;
use super::presenter::Presenter;
use crate::domain::config::AppConfig;
use crate::domain::error::ParseError;
use crate::domain::upload::UploadedFile;
use crate::domain::views::RenderModel;
use crate::infrastructure::csv::CsvParser;

pub const UPLOAD_PROMPT: &str = "Please upload a CSV file to get started.";

pub const SUCCESS_MESSAGE: &str = "CSV file loaded successfully!";

pub struct SessionHandler {
    parser: CsvParser,
    presenter: Presenter,
}

impl Default for SessionHandler {
    fn default() -> Self {
        Self::new(CsvParser::new(), Presenter::default())
    }
}

impl SessionHandler {
    pub fn new(parser: CsvParser, presenter: Presenter) -> Self {
        Self { parser, presenter }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            CsvParser::from_config(config),
            Presenter::new(config.preview_rows),
        )
    }

    /// Evaluate one interaction from the current upload (if any) and toggle state
    pub fn handle(&self, upload: Option<&UploadedFile>, show_full_table: bool) -> RenderModel {
        let Some(file) = upload else {
            return RenderModel::NoFileProvided {
                prompt: UPLOAD_PROMPT.to_string(),
            };
        };

        info!(file_name = %file.file_name, bytes = file.len(), "Parsing upload");

        match self.parser.parse(file) {
            Ok(dataset) => {
                info!(
                    file_name = %file.file_name,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    show_full_table,
                    "Upload parsed"
                );

                RenderModel::FileProvidedAndValid {
                    file_name: file.file_name.clone(),
                    success: SUCCESS_MESSAGE.to_string(),
                    show_full_table,
                    report: self.presenter.present(&dataset, show_full_table),
                }
            }
            Err(err) => self.reject(Some(file.file_name.clone()), &err),
        }
    }

    /// Render model for an upload that failed before or during parsing
    pub fn reject(&self, file_name: Option<String>, error: &ParseError) -> RenderModel {
        warn!(file_name = ?file_name, error = %error, "Upload rejected");

        RenderModel::FileProvidedAndInvalid {
            file_name,
            error: error_reporter::report(error),
        }
    }
}
