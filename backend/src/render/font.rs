//! Fonts for the stamped name.
//!
//! Gujarati needs complex shaping (conjuncts, pre-base vowel signs), so a
//! plain character-to-glyph map is not enough. Text is shaped with
//! `rustybuzz` and written as glyph ids through a composite font:
//!
//! ```text
//! Type0 (/Identity-H, /ToUnicode)
//!   └─ CIDFontType2 (/CIDToGIDMap /Identity, /W widths)
//!        └─ FontDescriptor (/FontFile2 = the whole TrueType program)
//! ```
//!
//! Vertical mark offsets from GPOS are applied with the text rise (`Ts`).
//! The font program is embedded whole, not subset, so every card carries the
//! full file; a Gujarati face adds a few hundred kilobytes.
//!
//! Without a usable font file the standard Helvetica face is used instead;
//! it can only show Latin-1 text.

use log::{info, warn};
use lopdf::content::Operation;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use rustybuzz::ttf_parser::GlyphId;
use rustybuzz::{Face, UnicodeBuffer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::RenderError;

/// One glyph of a shaped run. Distances are in 1/1000 text space units.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedGlyph {
    pub gid: u16,
    /// Advance stored in the font's `hmtx`, i.e. what the PDF viewer applies.
    pub default_advance: i32,
    /// Advance after shaping (kerning, mark positioning).
    pub x_advance: i32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Source text of the cluster this glyph starts, empty for the other
    /// glyphs of the same cluster.
    pub text: String,
}

/// Text ready to be written with a particular `StampFont`.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedText {
    Glyphs(Vec<ShapedGlyph>),
    WinAnsi(Vec<u8>),
}

pub struct TrueTypeFont {
    path: PathBuf,
    base_name: String,
    data: Vec<u8>,
    units_per_em: i32,
}

impl TrueTypeFont {
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let data = std::fs::read(path).map_err(|e| RenderError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let units_per_em = Face::from_slice(&data, 0)
            .ok_or_else(|| RenderError::Font {
                path: path.to_path_buf(),
                reason: "not a TrueType/OpenType font".to_string(),
            })?
            .units_per_em();

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("StampFont");
        Ok(Self {
            path: path.to_path_buf(),
            base_name: sanitize_font_name(stem),
            data,
            units_per_em: units_per_em.max(1),
        })
    }

    fn face(&self) -> Result<Face<'_>, RenderError> {
        Face::from_slice(&self.data, 0).ok_or_else(|| RenderError::Font {
            path: self.path.clone(),
            reason: "font data could not be parsed".to_string(),
        })
    }

    fn scale(&self, units: i32) -> i32 {
        (units as f32 * 1000.0 / self.units_per_em as f32).round() as i32
    }

    fn pdf_units(&self, units: i16) -> Object {
        Object::Integer(self.scale(units as i32) as i64)
    }

    pub fn shape(&self, text: &str) -> Result<Vec<ShapedGlyph>, RenderError> {
        let face = self.face()?;
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let output = rustybuzz::shape(&face, &[], buffer);

        let infos = output.glyph_infos();
        let positions = output.glyph_positions();
        let mut glyphs = Vec::with_capacity(infos.len());
        for (i, (info, pos)) in infos.iter().zip(positions).enumerate() {
            let gid = info.glyph_id as u16;
            let cluster = info.cluster as usize;
            let starts_cluster = i == 0 || infos[i - 1].cluster != info.cluster;
            let cluster_text = if starts_cluster {
                let end = infos[i + 1..]
                    .iter()
                    .map(|g| g.cluster as usize)
                    .find(|&c| c > cluster)
                    .unwrap_or(text.len());
                text.get(cluster..end).unwrap_or_default().to_string()
            } else {
                String::new()
            };

            let default_advance = face
                .glyph_hor_advance(GlyphId(gid))
                .map(|a| self.scale(a as i32))
                .unwrap_or(0);
            glyphs.push(ShapedGlyph {
                gid,
                default_advance,
                x_advance: self.scale(pos.x_advance),
                x_offset: self.scale(pos.x_offset),
                y_offset: self.scale(pos.y_offset),
                text: cluster_text,
            });
        }
        Ok(glyphs)
    }

    fn add_to_document(
        &self,
        doc: &mut Document,
        glyphs: &[ShapedGlyph],
    ) -> Result<ObjectId, RenderError> {
        let face = self.face()?;

        let mut program = Dictionary::new();
        program.set("Length1", Object::Integer(self.data.len() as i64));
        let program_id = doc.add_object(Stream::new(program, self.data.clone()));

        let bbox = face.global_bounding_box();
        let descriptor = Dictionary::from_iter([
            ("Type", Object::Name(b"FontDescriptor".to_vec())),
            ("FontName", Object::Name(self.base_name.clone().into_bytes())),
            ("Flags", Object::Integer(4)),
            (
                "FontBBox",
                Object::Array(vec![
                    self.pdf_units(bbox.x_min),
                    self.pdf_units(bbox.y_min),
                    self.pdf_units(bbox.x_max),
                    self.pdf_units(bbox.y_max),
                ]),
            ),
            ("ItalicAngle", Object::Integer(0)),
            ("Ascent", self.pdf_units(face.ascender())),
            ("Descent", self.pdf_units(face.descender())),
            (
                "CapHeight",
                self.pdf_units(face.capital_height().unwrap_or(face.ascender())),
            ),
            ("StemV", Object::Integer(80)),
            ("FontFile2", Object::Reference(program_id)),
        ]);
        let descriptor_id = doc.add_object(descriptor);

        let mut widths: BTreeMap<u16, i32> = BTreeMap::new();
        for glyph in glyphs {
            widths.entry(glyph.gid).or_insert(glyph.default_advance);
        }
        let mut w = Vec::with_capacity(widths.len() * 2);
        for (gid, width) in &widths {
            w.push(Object::Integer(*gid as i64));
            w.push(Object::Array(vec![Object::Integer(*width as i64)]));
        }

        let cid_font = Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"CIDFontType2".to_vec())),
            ("BaseFont", Object::Name(self.base_name.clone().into_bytes())),
            (
                "CIDSystemInfo",
                Object::Dictionary(Dictionary::from_iter([
                    ("Registry", Object::string_literal("Adobe")),
                    ("Ordering", Object::string_literal("Identity")),
                    ("Supplement", Object::Integer(0)),
                ])),
            ),
            ("FontDescriptor", Object::Reference(descriptor_id)),
            ("DW", Object::Integer(1000)),
            ("W", Object::Array(w)),
            ("CIDToGIDMap", Object::Name(b"Identity".to_vec())),
        ]);
        let cid_font_id = doc.add_object(cid_font);

        let to_unicode = to_unicode_cmap(glyphs);
        let to_unicode_id = doc.add_object(Stream::new(Dictionary::new(), to_unicode.into_bytes()));

        Ok(doc.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type0".to_vec())),
            ("BaseFont", Object::Name(self.base_name.clone().into_bytes())),
            ("Encoding", Object::Name(b"Identity-H".to_vec())),
            (
                "DescendantFonts",
                Object::Array(vec![Object::Reference(cid_font_id)]),
            ),
            ("ToUnicode", Object::Reference(to_unicode_id)),
        ])))
    }
}

pub enum StampFont {
    Embedded(TrueTypeFont),
    Helvetica,
}

impl StampFont {
    /// Loads the configured font, falling back to Helvetica with a warning.
    pub fn load_or_fallback(path: &Path) -> Self {
        match TrueTypeFont::load(path) {
            Ok(font) => {
                info!("Gujarati font embedded from {}", path.display());
                StampFont::Embedded(font)
            }
            Err(e) => {
                warn!("{}; using Helvetica, Gujarati text will not render", e);
                StampFont::Helvetica
            }
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, StampFont::Embedded(_))
    }

    pub fn prepare(&self, text: &str) -> Result<PreparedText, RenderError> {
        Ok(match self {
            StampFont::Embedded(font) => PreparedText::Glyphs(font.shape(text)?),
            StampFont::Helvetica => PreparedText::WinAnsi(encode_latin1(text)),
        })
    }

    /// Adds the font objects for `text` and returns the font dictionary id.
    pub fn add_to_document(
        &self,
        doc: &mut Document,
        text: &PreparedText,
    ) -> Result<ObjectId, RenderError> {
        match (self, text) {
            (StampFont::Embedded(font), PreparedText::Glyphs(glyphs)) => {
                font.add_to_document(doc, glyphs)
            }
            _ => Ok(doc.add_object(Dictionary::from_iter([
                ("Type", Object::Name(b"Font".to_vec())),
                ("Subtype", Object::Name(b"Type1".to_vec())),
                ("BaseFont", Object::Name(b"Helvetica".to_vec())),
                ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
            ]))),
        }
    }
}

/// Text-showing operators for `text`: `[<gid>... adj...] TJ` runs for shaped
/// glyphs, split by `Ts` wherever the vertical offset changes, or a single
/// `(text) Tj` otherwise.
pub fn show_text_operations(text: &PreparedText, font_size: f32) -> Vec<Operation> {
    match text {
        PreparedText::WinAnsi(bytes) => vec![Operation::new(
            "Tj",
            vec![Object::String(bytes.clone(), StringFormat::Literal)],
        )],
        PreparedText::Glyphs(glyphs) => {
            let mut ops = Vec::new();
            let mut parts = Vec::with_capacity(glyphs.len() * 2);
            let mut rise = 0;
            for glyph in glyphs {
                if glyph.y_offset != rise {
                    if !parts.is_empty() {
                        let run = std::mem::take(&mut parts);
                        ops.push(Operation::new("TJ", vec![Object::Array(run)]));
                    }
                    rise = glyph.y_offset;
                    ops.push(text_rise(rise, font_size));
                }
                // TJ numbers move the pen left by n/1000 em.
                if glyph.x_offset != 0 {
                    parts.push(Object::Integer(-(glyph.x_offset as i64)));
                }
                parts.push(Object::String(
                    glyph.gid.to_be_bytes().to_vec(),
                    StringFormat::Hexadecimal,
                ));
                let adjust = glyph.default_advance + glyph.x_offset - glyph.x_advance;
                if adjust != 0 {
                    parts.push(Object::Integer(adjust as i64));
                }
            }
            if !parts.is_empty() || ops.is_empty() {
                ops.push(Operation::new("TJ", vec![Object::Array(parts)]));
            }
            if rise != 0 {
                ops.push(text_rise(0, font_size));
            }
            ops
        }
    }
}

/// `Ts` is in unscaled text space, so the 1/1000 em offset is scaled by size.
fn text_rise(offset: i32, font_size: f32) -> Operation {
    Operation::new("Ts", vec![Object::Real(offset as f32 * font_size / 1000.0)])
}

/// WinAnsi is a superset of Latin-1 for printable characters; anything
/// outside Latin-1 becomes `?`.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u8::try_from(c as u32) {
            Ok(b) if b >= 0x20 => b,
            _ => b'?',
        })
        .collect()
}

fn sanitize_font_name(raw: &str) -> String {
    let out: String = raw
        .chars()
        .filter_map(|ch| match ch {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('-'),
            _ => None,
        })
        .collect();
    if out.is_empty() {
        "StampFont".to_string()
    } else {
        out
    }
}

/// `ToUnicode` CMap mapping each glyph back to the text of its cluster.
fn to_unicode_cmap(glyphs: &[ShapedGlyph]) -> String {
    let mut map: BTreeMap<u16, &str> = BTreeMap::new();
    for glyph in glyphs.iter().filter(|g| g.gid != 0 && !g.text.is_empty()) {
        map.entry(glyph.gid).or_insert(glyph.text.as_str());
    }

    let mut out = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
    );
    let entries: Vec<(&u16, &&str)> = map.iter().collect();
    for chunk in entries.chunks(100) {
        out.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, text) in chunk {
            let utf16: String = text.encode_utf16().map(|u| format!("{:04X}", u)).collect();
            out.push_str(&format!("<{:04X}> <{}>\n", gid, utf16));
        }
        out.push_str("endbfchar\n");
    }
    out.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(gid: u16, text: &str) -> ShapedGlyph {
        ShapedGlyph {
            gid,
            default_advance: 500,
            x_advance: 500,
            x_offset: 0,
            y_offset: 0,
            text: text.to_string(),
        }
    }

    #[test]
    fn latin1_passes_and_other_scripts_become_question_marks() {
        assert_eq!(encode_latin1("Ramesh"), b"Ramesh".to_vec());
        assert_eq!(encode_latin1("Jos\u{e9} રમેશ"), b"Jos\xe9 ????".to_vec());
    }

    #[test]
    fn font_names_are_pdf_safe() {
        assert_eq!(
            sanitize_font_name("NotoSansGujarati-Regular"),
            "NotoSansGujarati-Regular"
        );
        assert_eq!(sanitize_font_name("My Font (v2)"), "My-Font-v2");
        assert_eq!(sanitize_font_name("()"), "StampFont");
    }

    #[test]
    fn cmap_maps_glyphs_to_cluster_text() {
        let glyphs = vec![glyph(3, "ર"), glyph(10, "મે"), glyph(11, ""), glyph(3, "ર")];
        let cmap = to_unicode_cmap(&glyphs);
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0003> <0AB0>"));
        assert!(cmap.contains("<000A> <0AAE0AC7>"));
        assert!(!cmap.contains("<000B>"));
    }

    #[test]
    fn tj_array_compensates_shaped_positions() {
        let mut mark = glyph(7, "");
        mark.default_advance = 0;
        mark.x_advance = 0;
        mark.x_offset = -120;
        let mut kerned = glyph(5, "ક");
        kerned.x_advance = 450;

        let ops = show_text_operations(&PreparedText::Glyphs(vec![kerned, mark]), 15.0);
        assert_eq!(ops.len(), 1);
        let op = &ops[0];
        assert_eq!(op.operator, "TJ");
        let parts: Vec<String> = op.operands[0]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| match o {
                Object::Integer(n) => n.to_string(),
                Object::String(bytes, StringFormat::Hexadecimal) => {
                    bytes.iter().map(|b| format!("{:02X}", b)).collect()
                }
                _ => panic!("unexpected TJ operand"),
            })
            .collect();
        assert_eq!(parts, vec!["0005", "50", "120", "0007", "-120"]);
    }

    #[test]
    fn vertical_offsets_are_applied_as_text_rise() {
        let mut mark = glyph(9, "");
        mark.y_offset = 200;
        let glyphs = vec![glyph(5, "ક"), mark, glyph(6, "મ")];

        let ops = show_text_operations(&PreparedText::Glyphs(glyphs), 15.0);
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["TJ", "Ts", "TJ", "Ts", "TJ"]);
        assert_eq!(ops[1].operands[0].as_float().unwrap(), 3.0);
        assert_eq!(ops[3].operands[0].as_float().unwrap(), 0.0);
    }

    #[test]
    fn empty_text_still_shows_an_empty_run() {
        let ops = show_text_operations(&PreparedText::Glyphs(Vec::new()), 15.0);
        assert_eq!(ops.len(), 1);
        assert!(ops[0].operands[0].as_array().unwrap().is_empty());
    }

    #[test]
    fn truetype_font_shapes_with_its_own_metrics() {
        let font = TrueTypeFont::load(Path::new(crate::test_support::FIXTURE_FONT)).unwrap();
        let glyphs = font.shape("AV").unwrap();

        assert_eq!(glyphs.len(), 2);
        assert!(glyphs.iter().all(|g| g.gid != 0));
        assert_ne!(glyphs[0].gid, glyphs[1].gid);
        assert_eq!(glyphs[0].text, "A");
        assert_eq!(glyphs[1].text, "V");
        // Monospaced: every advance is the same, just over 600/1000 em.
        assert!(glyphs.iter().all(|g| g.default_advance == glyphs[0].default_advance));
        assert!((590..=610).contains(&glyphs[0].default_advance));
        assert!(glyphs.iter().all(|g| g.y_offset == 0));
    }

    #[test]
    fn missing_font_file_falls_back_to_helvetica() {
        let font = StampFont::load_or_fallback(Path::new("/nonexistent/font.ttf"));
        assert!(!font.is_embedded());
        assert_eq!(
            font.prepare("Ramesh").unwrap(),
            PreparedText::WinAnsi(b"Ramesh".to_vec())
        );
    }
}
