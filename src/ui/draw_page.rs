//! Seven-lane draw page

use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use super::{button_by_id, div, fill_tiles, input_by_id, scroll_column, set_class, set_disabled};
use crate::consts::{DRAW_RANGE, ROLLERS_COUNT};
use crate::sim::{DrawSnapshot, LaneSnapshot};

/// DOM handles of one lane
struct LaneView {
    root: HtmlElement,
    numbers: HtmlElement,
    overlay: HtmlElement,
}

impl LaneView {
    fn build(document: &Document, index: usize) -> Option<Self> {
        let root = div(document, "roller")?;
        let label = div(document, "roller-label")?;
        label.set_text_content(Some(&format!("Draw {}", index + 1)));

        let window = div(document, "window")?;
        let numbers = div(document, "numbers")?;
        fill_tiles(document, &numbers, DRAW_RANGE);
        let overlay = div(document, "result-overlay")?;

        window.append_child(&numbers).ok()?;
        window.append_child(&overlay).ok()?;
        root.append_child(&label).ok()?;
        root.append_child(&window).ok()?;

        Some(Self {
            root,
            numbers,
            overlay,
        })
    }

    fn render(&self, lane: &LaneSnapshot, fallback_height: f32) {
        scroll_column(&self.numbers, lane.displayed_index, fallback_height);
        self.overlay.set_text_content(Some(&lane.overlay_text));
        set_class(&self.overlay, "hit", lane.overlay_hit);
        set_class(&self.overlay, "miss", lane.overlay_miss);
        set_class(&self.root, "locked", lane.locked);
        set_class(&self.root, "miss", lane.lane_miss);
    }
}

pub struct DrawPage {
    lanes: Vec<LaneView>,
    guess_input: Option<HtmlInputElement>,
    pub spin_button: Option<HtmlButtonElement>,
    pub submit_button: Option<HtmlButtonElement>,
    last: Option<DrawSnapshot>,
}

impl DrawPage {
    /// Build the lanes inside `#rollers` (None if this isn't the draw page)
    pub fn mount(document: &Document) -> Option<Self> {
        let container: Element = document.get_element_by_id("rollers")?;

        let mut lanes = Vec::with_capacity(ROLLERS_COUNT);
        for i in 0..ROLLERS_COUNT {
            let lane = LaneView::build(document, i)?;
            container.append_child(&lane.root).ok()?;
            lanes.push(lane);
        }

        Some(Self {
            lanes,
            guess_input: input_by_id(document, "userNumber"),
            spin_button: button_by_id(document, "spinButton"),
            submit_button: button_by_id(document, "submitButton"),
            last: None,
        })
    }

    pub fn guess_text(&self) -> String {
        self.guess_input
            .as_ref()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Write a snapshot to the DOM (skipped when nothing changed)
    pub fn render(&mut self, snapshot: &DrawSnapshot, fallback_height: f32) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }
        for (view, lane) in self.lanes.iter().zip(&snapshot.lanes) {
            view.render(lane, fallback_height);
        }
        set_disabled(self.spin_button.as_ref(), !snapshot.trigger_enabled);
        set_disabled(self.submit_button.as_ref(), !snapshot.trigger_enabled);
        self.last = Some(snapshot.clone());
    }
}
