pub mod classification;
pub mod document;

pub use classification::{Category, Classification, FeatureVector};
pub use document::{Document, DocumentFormat, UnsupportedFormatError};
