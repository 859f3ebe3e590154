//! Text Extractor — writes the upload to a scoped temporary PDF, pulls the
//! text of every page, then deletes the file.
//!
//! Parser failures (unreadable file, page error, parser panic) are logged and
//! end extraction early: pages read before the failure are kept, the rest are
//! dropped. Temp-file I/O failures, including a failed deletion, are returned
//! as errors.

use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use lopdf::Document;
use pdf_extract::{OutputError, PlainTextOutput};
use tempfile::{Builder, NamedTempFile};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
enum PageError {
    #[error("{0}")]
    Parse(#[from] OutputError),

    #[error("parser panicked: {0}")]
    Panic(String),
}

/// Extracts the concatenated page text of `data`, trimmed.
pub async fn extract_text(data: &[u8], temp_dir: Option<&Path>) -> std::io::Result<String> {
    let temp_pdf = write_temp_pdf(data, temp_dir)?;
    extract_and_release(temp_pdf).await
}

/// Reads the text out of `temp_pdf`, then deletes it.
async fn extract_and_release(temp_pdf: NamedTempFile) -> std::io::Result<String> {
    let path = temp_pdf.path().to_path_buf();

    let text = match tokio::task::spawn_blocking(move || read_pages(&path)).await {
        Ok(pages) => join_pages(pages),
        Err(e) => {
            warn!("PDF parser aborted: {e}");
            String::new()
        }
    };

    // `close` surfaces deletion errors; an early return above still deletes on drop.
    temp_pdf.close()?;

    debug!("Extracted {} characters from PDF", text.chars().count());
    Ok(text)
}

fn write_temp_pdf(data: &[u8], temp_dir: Option<&Path>) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix("roast-").suffix(".pdf");

    let mut file = match temp_dir {
        Some(dir) => builder.tempfile_in(dir)?,
        None => builder.tempfile()?,
    };
    file.write_all(data)?;
    file.flush()?;
    Ok(file)
}

/// Text of each page in document order, up to the first page that fails.
fn read_pages(path: &Path) -> Vec<String> {
    let mut doc = match Document::load(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Erreur lecture PDF: {e}");
            return Vec::new();
        }
    };
    if doc.is_encrypted() {
        if let Err(e) = doc.decrypt("") {
            warn!("Erreur lecture PDF (document chiffré): {e}");
            return Vec::new();
        }
    }

    let mut pages = Vec::new();
    for page_num in doc.get_pages().into_keys() {
        match read_page(&doc, page_num) {
            Ok(text) => pages.push(text),
            Err(e) => {
                warn!(
                    "Erreur lecture PDF page {page_num}: {e}; keeping {} page(s) read so far",
                    pages.len()
                );
                break;
            }
        }
    }
    pages
}

fn read_page(doc: &Document, page_num: u32) -> Result<String, PageError> {
    let mut text = String::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut output = PlainTextOutput::new(&mut text);
        pdf_extract::output_doc_page(doc, &mut output, page_num)
    }));

    match outcome {
        Ok(result) => result.map(|()| text).map_err(PageError::from),
        Err(payload) => Err(PageError::Panic(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Joins non-empty pages with a newline and trims the result.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    pages
        .into_iter()
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
