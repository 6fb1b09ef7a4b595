use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use crate::domain::error::ParseError;
use crate::domain::upload::UploadedFile;

/// Fields submitted by the viewer page
#[derive(Debug, Default, Deserialize)]
pub struct InteractionForm {
    #[serde(default)]
    pub file_name: Option<String>,

    /// Base64 file content; empty for a zero-byte file
    #[serde(default)]
    pub file_data: Option<String>,

    /// Checkbox value, present only when ticked
    #[serde(default)]
    pub show_full: Option<String>,
}

impl InteractionForm {
    pub fn show_full_table(&self) -> bool {
        self.show_full
            .as_deref()
            .map(|value| !value.is_empty() && value != "off" && value != "false")
            .unwrap_or(false)
    }
}

/// JSON body for `POST /api/inspect`
#[derive(Debug, Default, Deserialize)]
pub struct InspectRequest {
    #[serde(default)]
    pub file_name: Option<String>,

    #[serde(default)]
    pub file_data: Option<String>,

    #[serde(default)]
    pub show_full: bool,
}

/// Accept at most one `.csv` upload.
///
/// A file is present when it has a name; its content may be empty. Returns `Ok(None)`
/// when nothing has been uploaded yet.
pub fn accept_upload(
    file_name: Option<&str>,
    file_data: Option<&str>,
    max_upload_bytes: usize,
) -> Result<Option<UploadedFile>, ParseError> {
    let Some(file_name) = file_name.map(str::trim).filter(|name| !name.is_empty()) else {
        return Ok(None);
    };

    if !has_csv_extension(file_name) {
        return Err(ParseError::new(format!(
            "unsupported file type for '{}'; only .csv files are accepted",
            file_name
        )));
    }

    let encoded = file_data.map(str::trim).unwrap_or("");
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ParseError::new(format!("upload payload is not valid base64: {}", e)))?;

    if bytes.len() > max_upload_bytes {
        return Err(ParseError::new(format!(
            "file is {} bytes, which exceeds the {} byte upload limit",
            bytes.len(),
            max_upload_bytes
        )));
    }

    Ok(Some(UploadedFile::new(file_name, bytes)))
}

fn has_csv_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Encode bytes for the page's hidden field
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1024;

    #[test]
    fn test_absent_without_file_name() {
        assert_eq!(accept_upload(None, None, LIMIT), Ok(None));
        assert_eq!(accept_upload(Some("  "), Some("YSxi"), LIMIT), Ok(None));
    }

    #[test]
    fn test_accepts_csv_upload() {
        let upload = accept_upload(Some("Data.CSV"), Some(&encode_payload(b"a,b\n1,2\n")), LIMIT)
            .unwrap()
            .unwrap();
        assert_eq!(upload.file_name, "Data.CSV");
        assert_eq!(upload.bytes, b"a,b\n1,2\n");
    }

    #[test]
    fn test_empty_file_is_present() {
        let upload = accept_upload(Some("empty.csv"), Some(""), LIMIT).unwrap().unwrap();
        assert!(upload.is_empty());

        let upload = accept_upload(Some("empty.csv"), None, LIMIT).unwrap().unwrap();
        assert!(upload.is_empty());
    }

    #[test]
    fn test_rejects_other_extensions() {
        let err = accept_upload(Some("report.xlsx"), Some(""), LIMIT).unwrap_err();
        assert!(err.message().contains("only .csv files are accepted"));
        assert!(accept_upload(Some("noextension"), Some(""), LIMIT).is_err());
    }

    #[test]
    fn test_rejects_bad_base64() {
        let err = accept_upload(Some("a.csv"), Some("***"), LIMIT).unwrap_err();
        assert!(err.message().starts_with("upload payload is not valid base64"));
    }

    #[test]
    fn test_rejects_oversized_upload() {
        let payload = encode_payload(&vec![b'x'; LIMIT + 1]);
        let err = accept_upload(Some("big.csv"), Some(&payload), LIMIT).unwrap_err();
        assert!(err.message().contains("exceeds the 1024 byte upload limit"));
    }

    #[test]
    fn test_show_full_checkbox_values() {
        let mut form = InteractionForm::default();
        assert!(!form.show_full_table());

        form.show_full = Some("on".to_string());
        assert!(form.show_full_table());

        form.show_full = Some("false".to_string());
        assert!(!form.show_full_table());
    }
}
