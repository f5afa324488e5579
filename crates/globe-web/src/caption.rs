use crate::constants::{CAPTION_HIDDEN_ATTR, CAPTION_ID};
use web_sys as web;

/// What the caption element should change to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptionUpdate {
    Show(String),
    Hide,
}

/// Tracks the name currently shown so the DOM is only touched on change.
#[derive(Debug, Default)]
pub struct Caption {
    shown: Option<String>,
}

impl Caption {
    pub fn update(&mut self, hovered: Option<&str>) -> Option<CaptionUpdate> {
        if self.shown.as_deref() == hovered {
            return None;
        }
        self.shown = hovered.map(str::to_owned);
        Some(match hovered {
            Some(name) => CaptionUpdate::Show(name.to_owned()),
            None => CaptionUpdate::Hide,
        })
    }
}

/// Apply `update` to the page's caption element, if any. Only the text and
/// the `hidden` attribute are touched; the page owns the styling.
pub fn apply(document: &web::Document, update: &CaptionUpdate) {
    let Some(el) = document.get_element_by_id(CAPTION_ID) else {
        return;
    };
    match update {
        CaptionUpdate::Show(name) => {
            el.set_text_content(Some(name));
            let _ = el.remove_attribute(CAPTION_HIDDEN_ATTR);
        }
        CaptionUpdate::Hide => {
            let _ = el.set_attribute(CAPTION_HIDDEN_ATTR, "");
        }
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    apply(document, &CaptionUpdate::Hide);
}
