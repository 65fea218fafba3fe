//! Stamps a guest name onto every configured page of the invitation
//! template.
//!
//! The template is read on every call so it can be swapped without a
//! restart. Rendering is pure CPU and file work; callers on the async side
//! should run it through `spawn_blocking`.

mod font;
mod page;

pub use font::{PreparedText, StampFont};

use log::{debug, info};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{InvitationConfig, StampConfig};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invitation template not found at {0}")]
    TemplateMissing(PathBuf),
    #[error("failed to read invitation template: {0}")]
    TemplateIo(#[from] std::io::Error),
    #[error("invitation template is not a readable PDF: {0}")]
    TemplateUnreadable(String),
    #[error("template has {total} pages, cannot stamp page {page}")]
    PageOutOfRange { page: usize, total: usize },
    #[error("font {path} unusable: {reason}")]
    Font { path: PathBuf, reason: String },
    #[error("PDF structure error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// Where and how one copy of the name is drawn. `x`/`y` are points from
/// the top-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Stamp {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: [f32; 3],
}

impl Stamp {
    fn from_config(stamp: &StampConfig, defaults: &InvitationConfig) -> Self {
        let [r, g, b] = stamp.color.unwrap_or(defaults.color);
        Self {
            page: stamp.page,
            x: stamp.x,
            y: stamp.y,
            font_size: stamp.font_size.unwrap_or(defaults.font_size),
            color: [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0],
        }
    }
}

pub struct InvitationRenderer {
    template_path: PathBuf,
    font: StampFont,
    stamps: Vec<Stamp>,
}

impl InvitationRenderer {
    pub fn new(template_path: impl Into<PathBuf>, font: StampFont, stamps: Vec<Stamp>) -> Self {
        Self {
            template_path: template_path.into(),
            font,
            stamps,
        }
    }

    pub fn from_config(config: &InvitationConfig) -> Self {
        let stamps = config
            .stamps
            .iter()
            .map(|s| Stamp::from_config(s, config))
            .collect();
        Self::new(
            &config.template_path,
            StampFont::load_or_fallback(&config.font_path),
            stamps,
        )
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn has_embedded_font(&self) -> bool {
        self.font.is_embedded()
    }

    /// Reads the template from disk and stamps `name` onto it.
    pub fn render(&self, name: &str) -> Result<Vec<u8>, RenderError> {
        let template = std::fs::read(&self.template_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RenderError::TemplateMissing(self.template_path.clone())
            } else {
                RenderError::TemplateIo(e)
            }
        })?;
        self.render_bytes(&template, name)
    }

    /// Stamps `name` onto an in-memory template. Identical inputs give
    /// byte-identical output.
    pub fn render_bytes(&self, template: &[u8], name: &str) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::load_mem(template)
            .map_err(|e| RenderError::TemplateUnreadable(e.to_string()))?;

        let pages = doc.get_pages();
        let targets = self
            .stamps
            .iter()
            .map(|stamp| {
                u32::try_from(stamp.page)
                    .ok()
                    .and_then(|n| pages.get(&n).copied())
                    .map(|page_id| (stamp, page_id))
                    .ok_or(RenderError::PageOutOfRange {
                        page: stamp.page,
                        total: pages.len(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let text = self.font.prepare(name)?;
        let font_id = self.font.add_to_document(&mut doc, &text)?;

        for (stamp, page_id) in targets {
            let [x0, y0, _, y1] = page::media_box(&doc, page_id);
            let font_name = page::register_font(&mut doc, page_id, font_id)?;
            let x = x0 + stamp.x;
            let y = y0 + (y1 - y0) - stamp.y;
            debug!("stamping page {} at ({}, {})", stamp.page, x, y);

            let overlay = Content {
                operations: stamp_operations(stamp, &font_name, x, y, &text),
            }
            .encode()?;
            page::append_overlay(&mut doc, page_id, overlay)?;
        }

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| RenderError::Write(e.to_string()))?;
        info!(
            "rendered invitation: {} pages, {} stamps, {} bytes",
            pages.len(),
            self.stamps.len(),
            out.len()
        );
        Ok(out)
    }
}

fn stamp_operations(
    stamp: &Stamp,
    font_name: &str,
    x: f32,
    y: f32,
    text: &PreparedText,
) -> Vec<Operation> {
    let [r, g, b] = stamp.color;
    [
        Operation::new("q", vec![]),
        Operation::new("rg", vec![Object::Real(r), Object::Real(g), Object::Real(b)]),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font_name.as_bytes().to_vec()),
                Object::Real(stamp.font_size),
            ],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
    ]
    .into_iter()
    .chain(font::show_text_operations(text, stamp.font_size))
    .chain([Operation::new("ET", vec![]), Operation::new("Q", vec![])])
    .collect()
}
