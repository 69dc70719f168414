//! Target number setup page

use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

use super::{button_by_id, input_by_id, show_message};
use crate::consts::ROLLERS_COUNT;
use crate::sim::MessageKind;

pub struct SetupPage {
    inputs: Vec<HtmlInputElement>,
    message: Option<Element>,
    pub save_button: HtmlButtonElement,
}

impl SetupPage {
    /// Find `#num1..#num7` and `#saveButton` (None if this isn't the setup page)
    pub fn mount(document: &Document) -> Option<Self> {
        let save_button = button_by_id(document, "saveButton")?;
        let inputs = (1..=ROLLERS_COUNT)
            .filter_map(|i| input_by_id(document, &format!("num{}", i)))
            .collect();
        Some(Self {
            inputs,
            message: document.get_element_by_id("message"),
            save_button,
        })
    }

    pub fn prefill(&self, entries: &[String]) {
        for (input, value) in self.inputs.iter().zip(entries) {
            input.set_value(value);
        }
    }

    /// Current field texts, in order (missing fields read as empty)
    pub fn entries(&self) -> Vec<String> {
        self.inputs.iter().map(HtmlInputElement::value).collect()
    }

    pub fn show_message(&self, text: &str, kind: MessageKind) {
        if let Some(el) = &self.message {
            show_message(el, text, Some(kind));
        }
    }
}
