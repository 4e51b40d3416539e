//! Request/response task boundary between the pure core and a host.
//!
//! A [`Session`] runs generation and export on background threads and hands
//! results back over a channel. Each [`Operation`] kind has one in-flight
//! flag; starting a second operation of the same kind while the first is
//! running fails with [`Error::Busy`]. Nothing is cancelled.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use textgen::api::TextSource;
//! use textgen::host::{Completion, Session};
//!
//! struct Echo;
//!
//! impl TextSource for Echo {
//!     fn fetch_generated_text(&self, prompt: &str) -> textgen::Result<String> {
//!         Ok(format!("# {}", prompt))
//!     }
//! }
//!
//! fn main() -> textgen::Result<()> {
//!     let session = Session::new(Echo);
//!     session.generate("Hello")?;
//!     if let Some(Completion::Generated(result)) = session.recv_timeout(Duration::from_secs(5)) {
//!         println!("{} blocks", result?.document.block_count());
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::api::TextSource;
use crate::error::{Error, Result};
use crate::layout::LayoutOptions;
use crate::model::{Document, Metadata};
use crate::parser::{classify_and_format_with_options, ParseOptions};
use crate::render::{export_pdf, ExportSummary, PdfOptions};

/// Kinds of background work a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch text for a prompt and format it
    Generate,
    /// Write a document to a PDF file
    Export,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Generate => write!(f, "generate"),
            Operation::Export => write!(f, "export"),
        }
    }
}

/// Result of a finished generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// Prompt that was sent
    pub prompt: String,
    /// Text returned by the source
    pub text: String,
    /// Formatted document
    pub document: Document,
}

/// Completion message delivered to the host.
#[derive(Debug)]
pub enum Completion {
    Generated(Result<Generated>),
    Exported(Result<ExportSummary>),
}

impl Completion {
    /// Operation this completion belongs to.
    pub fn operation(&self) -> Operation {
        match self {
            Completion::Generated(_) => Operation::Generate,
            Completion::Exported(_) => Operation::Export,
        }
    }
}

/// Holds an in-flight flag; clears it on drop.
struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>, operation: Operation) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::Busy(operation))?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Host-side session running generation and export in the background.
pub struct Session {
    source: Arc<dyn TextSource>,
    parse_options: ParseOptions,
    layout_options: LayoutOptions,
    pdf_options: PdfOptions,
    generating: Arc<AtomicBool>,
    exporting: Arc<AtomicBool>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl Session {
    /// Create a session around a text source.
    pub fn new(source: impl TextSource + 'static) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            source: Arc::new(source),
            parse_options: ParseOptions::default(),
            layout_options: LayoutOptions::default(),
            pdf_options: PdfOptions::default(),
            generating: Arc::new(AtomicBool::new(false)),
            exporting: Arc::new(AtomicBool::new(false)),
            sender,
            receiver,
        }
    }

    /// Set the options used to format generated text.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Set the page layout used for export.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout_options = options;
        self
    }

    /// Set the PDF writer options used for export.
    pub fn with_pdf_options(mut self, options: PdfOptions) -> Self {
        self.pdf_options = options;
        self
    }

    fn flag(&self, operation: Operation) -> &Arc<AtomicBool> {
        match operation {
            Operation::Generate => &self.generating,
            Operation::Export => &self.exporting,
        }
    }

    /// Whether an operation of this kind is in flight.
    pub fn is_busy(&self, operation: Operation) -> bool {
        self.flag(operation).load(Ordering::Acquire)
    }

    /// Start fetching and formatting text for a prompt.
    ///
    /// Returns immediately; the outcome arrives as [`Completion::Generated`].
    pub fn generate(&self, prompt: impl Into<String>) -> Result<()> {
        let guard = BusyGuard::acquire(self.flag(Operation::Generate), Operation::Generate)?;
        let prompt = prompt.into();
        let source = Arc::clone(&self.source);
        let options = self.parse_options.clone();
        let sender = self.sender.clone();

        thread::Builder::new()
            .name("textgen-generate".into())
            .spawn(move || {
                let result = {
                    let _guard = guard;
                    run_generate(source.as_ref(), prompt, &options)
                };
                if let Err(err) = &result {
                    log::warn!("Generation failed: {}", err);
                }
                if sender.send(Completion::Generated(result)).is_err() {
                    log::debug!("Session dropped; generation result discarded");
                }
            })?;
        Ok(())
    }

    /// Start exporting a document to a PDF file.
    ///
    /// Returns immediately; the outcome arrives as [`Completion::Exported`].
    pub fn export(&self, document: Document, path: impl Into<PathBuf>) -> Result<()> {
        let guard = BusyGuard::acquire(self.flag(Operation::Export), Operation::Export)?;
        let path = path.into();
        let layout = self.layout_options.clone();
        let pdf = self.pdf_options.clone();
        let sender = self.sender.clone();

        thread::Builder::new()
            .name("textgen-export".into())
            .spawn(move || {
                let result = {
                    let _guard = guard;
                    export_pdf(&document, &path, &layout, &pdf)
                };
                if let Err(err) = &result {
                    log::warn!("Export to {} failed: {}", path.display(), err);
                }
                if sender.send(Completion::Exported(result)).is_err() {
                    log::debug!(
                        "Session dropped; export result for {} discarded",
                        path.display()
                    );
                }
            })?;
        Ok(())
    }

    /// Channel on which completions arrive.
    pub fn completions(&self) -> &Receiver<Completion> {
        &self.receiver
    }

    /// Wait up to `timeout` for the next completion.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Next completion if one is ready.
    pub fn try_recv(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }
}

fn run_generate(source: &dyn TextSource, prompt: String, options: &ParseOptions) -> Result<Generated> {
    let text = source.fetch_generated_text(&prompt)?;
    let document = classify_and_format_with_options(&text, options).with_metadata(Metadata {
        prompt: Some(prompt.clone()),
        ..Metadata::default()
    });
    log::info!(
        "Generated {} characters, {} blocks",
        text.chars().count(),
        document.block_count()
    );
    Ok(Generated {
        prompt,
        text,
        document,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Mutex;

    struct Fixed(&'static str);

    impl TextSource for Fixed {
        fn fetch_generated_text(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// Blocks until released through the paired channel.
    struct Gated(Mutex<mpsc::Receiver<()>>);

    impl TextSource for Gated {
        fn fetch_generated_text(&self, _prompt: &str) -> Result<String> {
            let gate = self.0.lock().map_err(|e| Error::Other(e.to_string()))?;
            gate.recv().map_err(|e| Error::Other(e.to_string()))?;
            Ok("done".to_string())
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Generate.to_string(), "generate");
        assert_eq!(Operation::Export.to_string(), "export");
    }

    #[test]
    fn test_generate_completes() {
        let session = Session::new(Fixed("# Title\nBody"));
        session.generate("subject").unwrap();

        match session.recv_timeout(Duration::from_secs(5)) {
            Some(Completion::Generated(Ok(generated))) => {
                assert_eq!(generated.prompt, "subject");
                assert_eq!(generated.document.block_count(), 2);
                assert_eq!(generated.document.metadata.prompt.as_deref(), Some("subject"));
            }
            other => panic!("unexpected completion: {:?}", other),
        }
        assert!(!session.is_busy(Operation::Generate));
    }

    #[test]
    fn test_second_generate_is_busy() {
        let (release, gate) = mpsc::channel();
        let session = Session::new(Gated(Mutex::new(gate)));

        session.generate("first").unwrap();
        assert!(session.is_busy(Operation::Generate));
        assert!(matches!(
            session.generate("second"),
            Err(Error::Busy(Operation::Generate))
        ));
        assert!(!session.is_busy(Operation::Export));

        release.send(()).unwrap();
        let completion = session.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(completion.operation(), Operation::Generate);
        assert!(!session.is_busy(Operation::Generate));
        session.generate("third").unwrap();
        release.send(()).unwrap();
        assert!(session.recv_timeout(Duration::from_secs(5)).is_some());
    }

    #[test]
    fn test_export_finishes_after_session_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orphan.pdf");
        let session = Session::new(Fixed(""));
        let doc = classify_and_format_with_options("# Notes\nbody", &ParseOptions::default());
        session.export(doc, &path).unwrap();
        drop(session);

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while lopdf::Document::load(&path).is_err() {
            assert!(std::time::Instant::now() < deadline, "export never finished");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_busy_guard_clears_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let guard = BusyGuard::acquire(&flag, Operation::Export).unwrap();
        assert!(BusyGuard::acquire(&flag, Operation::Export).is_err());
        drop(guard);
        assert!(BusyGuard::acquire(&flag, Operation::Export).is_ok());
    }
}
