//! OCR backends.
//!
//! Only [`TesseractBackend`] ships built in; it is registered under the name
//! `tesseract` in the global OCR registry. Other engines can be plugged in through
//! [`crate::plugins::OcrBackend`].

pub mod tesseract;

pub use tesseract::TesseractBackend;
