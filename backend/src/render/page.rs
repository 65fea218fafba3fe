use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::RenderError;

const US_LETTER: [f32; 4] = [0.0, 0.0, 612.0, 792.0];
const MAX_TREE_DEPTH: usize = 10;

/// Page `MediaBox`, inherited through `Parent` when the page has none.
pub fn media_box(doc: &Document, page_id: ObjectId) -> [f32; 4] {
    let mut current = doc.get_dictionary(page_id).ok();
    for _ in 0..MAX_TREE_DEPTH {
        let Some(dict) = current else { break };
        if let Some(rect) = dict.get(b"MediaBox").ok().and_then(|o| as_rect(doc, o)) {
            return rect;
        }
        current = match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => doc.get_dictionary(*parent_id).ok(),
            _ => None,
        };
    }
    US_LETTER
}

fn as_rect(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let arr = match obj {
        Object::Array(arr) => arr,
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?,
        _ => return None,
    };
    let values: Vec<f32> = arr.iter().filter_map(|o| o.as_float().ok()).collect();
    match values.as_slice() {
        [x0, y0, x1, y1] => Some([*x0, *y0, *x1, *y1]),
        _ => None,
    }
}

/// Makes `font_id` available to the page's content and returns the resource
/// name it is registered under. Inherited resources are copied onto the page
/// first so sibling pages are left untouched.
pub fn register_font(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<String, RenderError> {
    let resources_id = own_resources(doc, page_id)?;

    let fonts = match resources_id {
        Some(id) => doc.get_dictionary(id)?.get(b"Font").ok().cloned(),
        None => doc.get_dictionary(page_id)?.get(b"Resources")?.as_dict()?.get(b"Font").ok().cloned(),
    };
    let mut fonts = match fonts {
        Some(Object::Dictionary(dict)) => dict,
        Some(Object::Reference(id)) => doc.get_dictionary(id)?.clone(),
        _ => Dictionary::new(),
    };

    let name = match fonts
        .iter()
        .find(|(_, v)| matches!(v, Object::Reference(id) if *id == font_id))
    {
        Some((key, _)) => String::from_utf8_lossy(key).into_owned(),
        None => {
            let name = free_name(&fonts);
            fonts.set(name.clone(), Object::Reference(font_id));
            name
        }
    };

    let resources = match resources_id {
        Some(id) => doc.get_dictionary_mut(id)?,
        None => doc
            .get_dictionary_mut(page_id)?
            .get_mut(b"Resources")?
            .as_dict_mut()?,
    };
    resources.set("Font", Object::Dictionary(fonts));
    Ok(name)
}

fn free_name(fonts: &Dictionary) -> String {
    let mut name = "FStamp".to_string();
    let mut n = 1;
    while fonts.has(name.as_bytes()) {
        name = format!("FStamp{n}");
        n += 1;
    }
    name
}

/// Ensures the page carries its own `/Resources`. Returns the object id when
/// the dictionary is indirect, `None` when it is inline on the page.
fn own_resources(doc: &mut Document, page_id: ObjectId) -> Result<Option<ObjectId>, RenderError> {
    match doc.get_dictionary(page_id)?.get(b"Resources") {
        Ok(Object::Reference(id)) => return Ok(Some(*id)),
        Ok(Object::Dictionary(_)) => return Ok(None),
        _ => {}
    }

    let inherited = inherited_resources(doc, page_id).unwrap_or_default();
    doc.get_dictionary_mut(page_id)?
        .set("Resources", Object::Dictionary(inherited));
    Ok(None)
}

fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut parent = doc.get_dictionary(page_id).ok()?.get(b"Parent").ok()?.as_reference().ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(parent).ok()?;
        match dict.get(b"Resources") {
            Ok(Object::Dictionary(res)) => return Some(res.clone()),
            Ok(Object::Reference(id)) => return doc.get_dictionary(*id).ok().cloned(),
            _ => parent = dict.get(b"Parent").ok()?.as_reference().ok()?,
        }
    }
    None
}

/// Brackets the existing page content in `q ... Q` so its graphics state
/// cannot leak into `overlay`, then appends `overlay`.
pub fn append_overlay(
    doc: &mut Document,
    page_id: ObjectId,
    overlay: Vec<u8>,
) -> Result<(), RenderError> {
    let existing: Vec<Object> = match doc.get_dictionary(page_id)?.get(b"Contents") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => match doc.get_object(*id)? {
            Object::Array(items) => items.clone(),
            _ => vec![Object::Reference(*id)],
        },
        _ => Vec::new(),
    };

    let mut tail = b"\nQ\n".to_vec();
    tail.extend_from_slice(&overlay);
    let open_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let tail_id = doc.add_object(Stream::new(Dictionary::new(), tail));

    let mut contents = Vec::with_capacity(existing.len() + 2);
    contents.push(Object::Reference(open_id));
    contents.extend(existing);
    contents.push(Object::Reference(tail_id));

    doc.get_dictionary_mut(page_id)?
        .set("Contents", Object::Array(contents));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_template;

    fn load(pages: usize) -> Document {
        Document::load_mem(&sample_template(pages)).unwrap()
    }

    #[test]
    fn media_box_is_inherited_from_page_tree() {
        let doc = load(2);
        let pages = doc.get_pages();
        assert_eq!(media_box(&doc, pages[&1]), [0.0, 0.0, 612.0, 792.0]);
        // page 2 carries its own A5 box
        assert_eq!(media_box(&doc, pages[&2]), [0.0, 0.0, 420.0, 595.0]);
    }

    #[test]
    fn inherited_resources_are_copied_to_the_page() {
        let mut doc = load(2);
        let pages = doc.get_pages();
        let font_id = doc.add_object(Dictionary::new());

        let name = register_font(&mut doc, pages[&1], font_id).unwrap();
        assert_eq!(name, "FStamp");

        let page = doc.get_dictionary(pages[&1]).unwrap();
        let fonts = page
            .get(b"Resources")
            .unwrap()
            .as_dict()
            .unwrap()
            .get(b"Font")
            .unwrap()
            .as_dict()
            .unwrap();
        assert!(fonts.has(b"F1"));
        assert_eq!(fonts.get(b"FStamp").unwrap().as_reference().unwrap(), font_id);

        let sibling = doc.get_dictionary(pages[&2]).unwrap();
        assert!(sibling.get(b"Resources").is_err());
    }

    #[test]
    fn registering_twice_reuses_the_name() {
        let mut doc = load(1);
        let page_id = doc.get_pages()[&1];
        let font_id = doc.add_object(Dictionary::new());
        let other_id = doc.add_object(Dictionary::new());

        assert_eq!(register_font(&mut doc, page_id, font_id).unwrap(), "FStamp");
        assert_eq!(register_font(&mut doc, page_id, font_id).unwrap(), "FStamp");
        assert_eq!(register_font(&mut doc, page_id, other_id).unwrap(), "FStamp1");
    }

    #[test]
    fn existing_content_is_wrapped_before_overlay() {
        let mut doc = load(1);
        let page_id = doc.get_pages()[&1];
        let before = doc.get_page_content(page_id).unwrap();

        append_overlay(&mut doc, page_id, b"BT ET\n".to_vec()).unwrap();

        let after = doc.get_page_content(page_id).unwrap();
        let text = String::from_utf8_lossy(&after);
        assert!(text.starts_with("q\n"));
        assert!(text.ends_with("Q\nBT ET\n"));
        assert!(after.windows(before.len()).any(|w| w == before.as_slice()));
    }
}
