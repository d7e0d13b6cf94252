//! Shared test fixtures: small frozen artifacts and in-memory documents.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as PdfDocument, Object, Stream};
use serde_json::{json, Value};

use crate::classification::classifier::LinearClassifier;
use crate::classification::label_decoder::LabelEncoder;
use crate::classification::vectorizer::TfidfVectorizer;
use crate::classification::ModelArtifacts;

pub const BOUNDARY: &str = "screener-test-boundary";

/// Six-term vocabulary: rust, engineer, python, data, sales, marketing.
pub fn tfidf_json() -> Value {
    json!({
        "format_version": 1,
        "vocabulary": {
            "rust": 0, "engineer": 1, "python": 2,
            "data": 3, "sales": 4, "marketing": 5
        },
        "idf": [1.5, 1.2, 1.5, 1.1, 1.8, 1.6],
        "stop_words": ["and", "the", "with"]
    })
}

/// Rows: 0 = data terms, 1 = rust terms, 2 = sales terms.
/// With no known terms the intercepts pick label 0.
pub fn classifier_json() -> Value {
    json!({
        "format_version": 1,
        "classes": [0, 1, 2],
        "coef": [
            [0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 1.0, 1.0]
        ],
        "intercept": [0.05, -0.05, 0.0]
    })
}

pub fn encoder_json(labels: &[&str]) -> Value {
    json!({ "format_version": 1, "classes": labels })
}

fn artifacts_with_labels(labels: &[&str]) -> ModelArtifacts {
    let vectorizer =
        TfidfVectorizer::from_artifact(serde_json::from_value(tfidf_json()).unwrap()).unwrap();
    let classifier =
        LinearClassifier::from_artifact(serde_json::from_value(classifier_json()).unwrap())
            .unwrap();
    let decoder =
        LabelEncoder::from_artifact(serde_json::from_value(encoder_json(labels)).unwrap())
            .unwrap();
    ModelArtifacts::new(vectorizer, classifier, decoder).unwrap()
}

/// Labels: "Data Science", "Rust Developer", "Sales".
pub fn fixture_artifacts() -> ModelArtifacts {
    artifacts_with_labels(&["Data Science", "Rust Developer", "Sales"])
}

/// Encoder one label short of the classifier: predicting "Sales" cannot be decoded.
pub fn mismatched_artifacts() -> ModelArtifacts {
    artifacts_with_labels(&["Data Science", "Rust Developer"])
}

/// A .docx with one paragraph per entry; empty strings become empty paragraphs.
pub fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        let paragraph = if text.is_empty() {
            Paragraph::new()
        } else {
            Paragraph::new().add_run(Run::new().add_text(*text))
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build().pack(&mut buf).unwrap();
    buf.into_inner()
}

/// A PDF with one page per entry, each page drawing its text in Courier.
pub fn pdf_fixture(pages: &[&str]) -> Vec<u8> {
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A multipart/form-data body with a single file field, delimited by `BOUNDARY`.
pub fn multipart_body(field: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
