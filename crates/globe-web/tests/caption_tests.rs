// Host-side tests for caption change tracking.
// The DOM side only runs in the browser; the bookkeeping is plain Rust.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod caption {
    include!("../src/caption.rs");
}

use caption::*;

#[test]
fn caption_changes_only_when_hover_changes() {
    let mut c = Caption::default();
    assert_eq!(c.update(None), None);
    assert_eq!(c.update(Some("India")), Some(CaptionUpdate::Show("India".into())));
    assert_eq!(c.update(Some("India")), None);
    assert_eq!(c.update(Some("UAE")), Some(CaptionUpdate::Show("UAE".into())));
    assert_eq!(c.update(None), Some(CaptionUpdate::Hide));
    assert_eq!(c.update(None), None);
}

#[test]
fn hiding_uses_the_hidden_attribute_not_inline_style() {
    assert_eq!(constants::CAPTION_HIDDEN_ATTR, "hidden");
}
