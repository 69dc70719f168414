//! Single roller game page

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

use super::{
    button_by_id, div, fill_tiles, input_by_id, scroll_column, set_class, set_disabled,
    show_message,
};
use crate::consts::SINGLE_RANGE;
use crate::sim::SingleSnapshot;

pub struct SinglePage {
    numbers: HtmlElement,
    guess_input: Option<HtmlInputElement>,
    message: Option<Element>,
    confetti: Option<Element>,
    pub play_button: Option<HtmlButtonElement>,
    pub submit_button: Option<HtmlButtonElement>,
    last: Option<SingleSnapshot>,
}

impl SinglePage {
    /// Fill `#singleRoller` with tiles (None if this isn't the game page)
    pub fn mount(document: &Document) -> Option<Self> {
        let root = document.get_element_by_id("singleRoller")?;

        let numbers: HtmlElement = match root.query_selector(".numbers").ok().flatten() {
            Some(el) => el.dyn_into().ok()?,
            None => {
                let col = div(document, "numbers")?;
                if let Some(window) = root.query_selector(".window").ok().flatten() {
                    window.append_child(&col).ok()?;
                }
                col
            }
        };
        fill_tiles(document, &numbers, SINGLE_RANGE);

        Some(Self {
            numbers,
            guess_input: input_by_id(document, "guessNumber"),
            message: document.get_element_by_id("singleMessage"),
            confetti: document.get_element_by_id("confetti"),
            play_button: button_by_id(document, "playButton"),
            submit_button: button_by_id(document, "guessSubmitButton"),
            last: None,
        })
    }

    pub fn guess_text(&self) -> String {
        self.guess_input
            .as_ref()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    /// Write a snapshot to the page (skips unchanged frames)
    pub fn render(&mut self, snapshot: &SingleSnapshot, fallback_height: f32) {
        if self.last.as_ref() == Some(snapshot) {
            return;
        }
        scroll_column(&self.numbers, snapshot.displayed_index, fallback_height);

        if let Some(el) = &self.message {
            match &snapshot.message {
                Some(message) => show_message(el, &message.text, Some(message.kind)),
                None => show_message(el, "", None),
            }
        }

        if let Some(el) = &self.confetti {
            set_class(el, "active", snapshot.confetti_active);
            set_class(el, "hidden", !snapshot.confetti_active);
        }

        let disabled = !snapshot.trigger_enabled;
        set_disabled(self.play_button.as_ref(), disabled);
        set_disabled(self.submit_button.as_ref(), disabled);
        self.last = Some(snapshot.clone());
    }
}
