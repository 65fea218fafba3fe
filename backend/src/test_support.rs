//! Fixtures shared by the unit tests of several modules.

use crate::app_state::AppState;
use crate::config::AppConfig;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream};
use tempfile::TempDir;

/// DejaVu Sans Mono, checked in so the embedded-font path always runs.
pub const FIXTURE_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/DejaVuSansMono.ttf"
);

/// A template with `pages` pages. Fonts and the Letter MediaBox live on the
/// page tree node, page 2 overrides the box with A5.
pub fn sample_template(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let page_tree_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Times-Roman".to_vec())),
    ]));

    let mut kids = Vec::with_capacity(pages);
    for n in 1..=pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page {n}"))]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

        let mut page = Dictionary::from_iter([
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(page_tree_id)),
            ("Contents", Object::Reference(content_id)),
        ]);
        if n == 2 {
            page.set(
                "MediaBox",
                Object::Array(vec![0.into(), 0.into(), 420.into(), 595.into()]),
            );
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let page_tree = Dictionary::from_iter([
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(pages as i64)),
        (
            "MediaBox",
            Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()]),
        ),
        (
            "Resources",
            Object::Dictionary(Dictionary::from_iter([(
                "Font",
                Object::Dictionary(Dictionary::from_iter([("F1", Object::Reference(font_id))])),
            )])),
        ),
    ]);
    doc.objects.insert(page_tree_id, Object::Dictionary(page_tree));

    let catalog_id = doc.add_object(Dictionary::from_iter([
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(page_tree_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output).unwrap();
    output
}

/// Offline application state rooted in `dir`: a fresh database, a four page
/// template, no remote translation and the Helvetica fallback font.
pub fn offline_state(dir: &TempDir) -> AppState {
    let mut config = AppConfig::default();
    config.database.path = dir.path().join("invitations.db");
    config.invitation.template_path = dir.path().join("Invitation card.pdf");
    config.invitation.font_path = dir.path().join("missing.ttf");
    config.translation.enabled = false;
    std::fs::write(&config.invitation.template_path, sample_template(4)).unwrap();
    AppState::from_config(config).unwrap()
}
