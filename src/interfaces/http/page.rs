use crate::domain::upload::UploadedFile;
use crate::domain::views::{DatasetReport, DescriptiveStatistics, RenderModel, TableView};

use super::upload::encode_payload;

pub const PAGE_TITLE: &str = "CSV Data Viewer";
pub const PAGE_INTRO: &str = "Upload a CSV file to view its contents and basic information.";

const STYLE: &str = r#"<style>
  body { font-family: system-ui, sans-serif; margin: 2rem; color: #1f2933; }
  .message { padding: 0.75rem 1rem; border-radius: 6px; margin: 1rem 0; }
  .info { background: #e8f1fb; }
  .success { background: #e6f6ea; }
  .error { background: #fdecea; }
  .warning { background: #fff6e0; }
  .table-wrap { overflow-x: auto; max-height: 32rem; }
  table { border-collapse: collapse; font-size: 0.9rem; }
  th, td { border: 1px solid #d9dee3; padding: 0.3rem 0.6rem; text-align: right; white-space: nowrap; }
  th { background: #f4f6f8; }
  pre { background: #f4f6f8; padding: 1rem; border-radius: 6px; }
</style>"#;

// Reads the chosen file in the browser and submits it base64-encoded
const UPLOAD_SCRIPT: &str = r#"<script>
(function () {
  'use strict';
  const input = document.getElementById('file-input');
  const form = document.getElementById('viewer');
  input.addEventListener('change', function () {
    const file = input.files && input.files[0];
    if (!file) return;
    const reader = new FileReader();
    reader.onload = function () {
      const result = String(reader.result || '');
      const comma = result.indexOf(',');
      document.getElementById('file-name').value = file.name;
      document.getElementById('file-data').value = comma >= 0 ? result.slice(comma + 1) : '';
      form.submit();
    };
    reader.readAsDataURL(file);
  });
})();
</script>"#;

/// Render the whole page for one interaction.
///
/// `retained` is echoed back in hidden fields so toggling the full table re-submits
/// the same upload.
pub fn render_page(model: &RenderModel, retained: Option<&UploadedFile>) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n<p>{}</p>\n", PAGE_TITLE, PAGE_INTRO));

    match model {
        RenderModel::NoFileProvided { prompt } => {
            body.push_str(&render_form(None, None));
            body.push_str(&message("info", prompt));
        }
        RenderModel::FileProvidedAndInvalid { error, .. } => {
            body.push_str(&render_form(None, None));
            body.push_str(&message("error", &error.message));
            body.push_str(&message("warning", &error.hint));
        }
        RenderModel::FileProvidedAndValid {
            success,
            show_full_table,
            report,
            ..
        } => {
            body.push_str(&render_form(retained, Some(*show_full_table)));
            body.push_str(&message("success", success));
            body.push_str(&render_report(report));
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n{}\n</head>\n<body>\n{}{}\n</body>\n</html>\n",
        PAGE_TITLE, STYLE, body, UPLOAD_SCRIPT
    )
}

/// Upload control, hidden retention fields and (after a valid load) the toggle
fn render_form(retained: Option<&UploadedFile>, toggle: Option<bool>) -> String {
    let (name, data) = retained
        .map(|file| (escape_html(&file.file_name), encode_payload(&file.bytes)))
        .unwrap_or_default();

    let mut form = String::from("<form id=\"viewer\" method=\"post\" action=\"/\">\n");
    form.push_str(
        "<label for=\"file-input\">Choose a CSV file</label>\n\
         <input type=\"file\" id=\"file-input\" accept=\".csv,text/csv\">\n",
    );
    form.push_str(&format!(
        "<input type=\"hidden\" name=\"file_name\" id=\"file-name\" value=\"{}\">\n\
         <input type=\"hidden\" name=\"file_data\" id=\"file-data\" value=\"{}\">\n",
        name, data
    ));

    if let Some(checked) = toggle {
        form.push_str(&format!(
            "<p><label><input type=\"checkbox\" id=\"show-full\" name=\"show_full\" \
             onchange=\"this.form.submit()\"{}> Show full DataFrame</label></p>\n",
            if checked { " checked" } else { "" }
        ));
    }

    form.push_str("</form>\n");
    form
}

fn render_report(report: &DatasetReport) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        "<h2>Data Preview (First {} Rows):</h2>\n",
        report.preview_limit
    ));
    html.push_str(&render_table(&report.preview));

    html.push_str("<h2>DataFrame Information:</h2>\n");
    html.push_str(&format!("<pre>{}</pre>\n", escape_html(&report.structure.info_text)));

    html.push_str("<h2>Descriptive Statistics:</h2>\n");
    html.push_str(&render_statistics(&report.statistics));

    if let Some(full_table) = &report.full_table {
        html.push_str("<h2>Full DataFrame:</h2>\n");
        html.push_str(&render_table(full_table));
    }

    html
}

fn render_table(table: &TableView) -> String {
    let header: String = table
        .columns
        .iter()
        .map(|column| format!("<th>{}</th>", escape_html(column)))
        .collect();

    let rows: String = table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(&cell.to_string())))
                .collect();
            format!("<tr><th>{}</th>{}</tr>\n", index, cells)
        })
        .collect();

    format!(
        "<div class=\"table-wrap\"><table>\n<thead><tr><th></th>{}</tr></thead>\n<tbody>\n{}</tbody>\n</table></div>\n",
        header, rows
    )
}

fn render_statistics(statistics: &DescriptiveStatistics) -> String {
    let header: String = statistics
        .column_names()
        .into_iter()
        .map(|column| format!("<th>{}</th>", escape_html(column)))
        .collect();

    let rows: String = statistics
        .labeled_rows()
        .into_iter()
        .map(|(label, values)| {
            let cells: String = values
                .iter()
                .map(|value| format!("<td>{}</td>", escape_html(value)))
                .collect();
            format!("<tr><th>{}</th>{}</tr>\n", escape_html(label), cells)
        })
        .collect();

    format!(
        "<div class=\"table-wrap\"><table>\n<thead><tr><th></th>{}</tr></thead>\n<tbody>\n{}</tbody>\n</table></div>\n",
        header, rows
    )
}

fn message(kind: &str, text: &str) -> String {
    format!("<div class=\"message {}\">{}</div>\n", kind, escape_html(text))
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
