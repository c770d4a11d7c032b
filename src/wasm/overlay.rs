use web_sys::HtmlElement;

use crate::sections::OverlayStyle;

/// Writes overlay opacity and offset into the section elements' inline
/// style. Only changed values touch the DOM.
pub struct OverlayLayer {
    elements: Vec<HtmlElement>,
    applied: Vec<Option<OverlayStyle>>,
}

impl OverlayLayer {
    pub fn new(elements: Vec<HtmlElement>) -> Self {
        let applied = vec![None; elements.len()];
        Self { elements, applied }
    }

    pub fn apply(&mut self, styles: &[OverlayStyle]) {
        for ((el, last), style) in self
            .elements
            .iter()
            .zip(self.applied.iter_mut())
            .zip(styles)
        {
            if *last == Some(*style) {
                continue;
            }
            let css = el.style();
            let result = css
                .set_property("opacity", &format!("{:.3}", style.opacity))
                .and_then(|_| {
                    css.set_property("transform", &format!("translateY({:.1}px)", style.offset_px))
                })
                .and_then(|_| {
                    let visibility = if style.opacity <= 0.0 { "hidden" } else { "visible" };
                    css.set_property("visibility", visibility)
                });
            match result {
                Ok(()) => *last = Some(*style),
                Err(e) => log::warn!("overlay style update failed: {e:?}"),
            }
        }
    }
}
