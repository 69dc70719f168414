//! Lucky Draw entry point
//!
//! On the web, mounts whichever page is present (draw, setup, single roller)
//! and runs the frame loop. Natively, plays one headless draw in memory.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, KeyboardEvent, MouseEvent};

    use lucky_draw::audio::{AudioManager, SoundEffect};
    use lucky_draw::persistence::DrawStore;
    use lucky_draw::platform::{self, PageStore};
    use lucky_draw::setup::{self, SAVE_FAILED_MESSAGE, SAVE_OK_MESSAGE};
    use lucky_draw::sim::{MessageKind, SingleEvent};
    use lucky_draw::ui::{self, DrawPage, SetupPage, SinglePage};
    use lucky_draw::{DrawError, DrawEvent, DrawSettings, SingleRoller, SpinController};

    /// Page state shared by the frame loop and event handlers
    struct App {
        draw: Option<(SpinController<PageStore>, DrawPage)>,
        single: Option<(SingleRoller, SinglePage)>,
        audio: AudioManager,
        fallback_height: f32,
        last_time: f64,
    }

    impl App {
        /// Advance timers, react to events, redraw
        fn update(&mut self, elapsed_ms: u32) {
            if let Some((controller, page)) = &mut self.draw {
                controller.advance(elapsed_ms);
                for event in controller.drain_events() {
                    match event {
                        DrawEvent::SpinStarted { .. } => self.audio.start_spin(),
                        DrawEvent::LaneHit { .. } => self.audio.play(SoundEffect::LaneHit),
                        DrawEvent::SpinSettled { hits, .. } => {
                            self.audio.stop_spin();
                            if hits == 0 {
                                self.audio.play(SoundEffect::NoHits);
                            }
                        }
                        DrawEvent::SpinCancelled { .. }
                        | DrawEvent::LaneMiss { .. }
                        | DrawEvent::PersistFailed { .. } => {}
                    }
                }
                page.render(&controller.snapshot(), self.fallback_height);
            }

            if let Some((roller, page)) = &mut self.single {
                roller.advance(elapsed_ms);
                for event in roller.drain_events() {
                    match event {
                        SingleEvent::Started => self.audio.start_spin(),
                        SingleEvent::Settled { won, .. } => {
                            self.audio.stop_spin();
                            if won {
                                self.audio.play(SoundEffect::Win);
                            }
                        }
                        SingleEvent::ConfettiStart | SingleEvent::ConfettiEnd => {}
                    }
                }
                page.render(&roller.snapshot(), self.fallback_height);
            }
        }

        fn spin(&mut self) {
            let Some((controller, page)) = &mut self.draw else {
                return;
            };
            let raw = page.guess_text();
            if let Err(e) = controller.trigger(&raw) {
                log::info!("Spin rejected: {}", e);
                let text = match &e {
                    DrawError::InvalidGuess { min, max } => format!(
                        "Please enter a valid number between {} and {} before spinning.",
                        min, max
                    ),
                    other => other.to_string(),
                };
                ui::alert(&text);
            }
        }

        fn play(&mut self) {
            if let Some((roller, page)) = &mut self.single {
                let raw = page.guess_text();
                if let Err(e) = roller.play(&raw) {
                    log::info!("Guess rejected: {}", e);
                }
            }
        }
    }

    pub fn run() {
        platform::init_logging();
        log::info!("Lucky Draw starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - nothing to mount");
            return;
        };

        let settings = DrawSettings::load(&PageStore::open());
        let seed = platform::seed();

        // Setup page is form-only, no frame loop needed
        setup_setup_page(&document);

        let draw = DrawPage::mount(&document).map(|page| {
            let controller = SpinController::new(PageStore::open(), settings.clone(), seed);
            (controller, page)
        });
        let single = SinglePage::mount(&document)
            .map(|page| (SingleRoller::new(&settings, seed.wrapping_add(1)), page));

        if draw.is_none() && single.is_none() {
            return;
        }

        let app = Rc::new(RefCell::new(App {
            draw,
            single,
            audio: AudioManager::new(settings.effective_volume()),
            fallback_height: settings.item_height_fallback,
            last_time: 0.0,
        }));

        // Show resting positions before the first frame
        app.borrow_mut().update(0);

        setup_draw_controls(&document, app.clone());
        setup_single_controls(app.clone());
        request_animation_frame(app);

        log::info!("Lucky Draw running!");
    }

    fn on_click(button: &HtmlButtonElement, mut handler: impl FnMut() + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| handler());
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_draw_controls(document: &Document, app: Rc<RefCell<App>>) {
        let buttons: Vec<HtmlButtonElement> = match &app.borrow().draw {
            Some((_, page)) => [&page.spin_button, &page.submit_button]
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
            None => return,
        };
        for button in &buttons {
            let app = app.clone();
            on_click(button, move || app.borrow_mut().spin());
        }

        // Enter in the guess field spins too
        if let Some(input) = document.get_element_by_id("userNumber") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() != "Enter" {
                    return;
                }
                app.borrow_mut().spin();
            });
            let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_single_controls(app: Rc<RefCell<App>>) {
        let buttons: Vec<HtmlButtonElement> = match &app.borrow().single {
            Some((_, page)) => [&page.play_button, &page.submit_button]
                .into_iter()
                .flatten()
                .cloned()
                .collect(),
            None => return,
        };
        for button in &buttons {
            let app = app.clone();
            on_click(button, move || app.borrow_mut().play());
        }
    }

    fn setup_setup_page(document: &Document) {
        let Some(page) = SetupPage::mount(document) else {
            return;
        };
        let store = Rc::new(RefCell::new(DrawStore::new(PageStore::open())));

        if let Some(entries) = setup::existing_entries(&*store.borrow()) {
            page.prefill(&entries);
        }

        let page = Rc::new(page);
        let button = page.save_button.clone();
        on_click(&button, move || {
            let entries = page.entries();
            let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
            match setup::save_entries(&mut *store.borrow_mut(), &refs) {
                Ok(_) => page.show_message(SAVE_OK_MESSAGE, MessageKind::Success),
                Err(DrawError::Storage(_)) => {
                    page.show_message(SAVE_FAILED_MESSAGE, MessageKind::Error)
                }
                Err(e) => page.show_message(&e.to_string(), MessageKind::Error),
            }
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let elapsed = if a.last_time > 0.0 {
                (time - a.last_time).max(0.0)
            } else {
                0.0
            };
            a.last_time = time;
            a.update(elapsed as u32);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lucky_draw::consts::{NUMBERS_KEY, SINGLE_RANGE};
    use lucky_draw::{DrawEvent, DrawSettings, MemoryStore, SingleRoller, SpinController};

    lucky_draw::platform::init_logging();
    log::info!("Lucky Draw (native) starting...");
    log::info!("The browser build runs with `trunk serve`; this plays one draw in memory");

    let guess = std::env::args().nth(1).unwrap_or_else(|| "145".to_string());
    let settings = DrawSettings::default();
    let store = MemoryStore::with_items([(NUMBERS_KEY, "[101,123,145,167,178,189,199]")]);
    let mut controller = SpinController::new(store, settings.clone(), lucky_draw::platform::seed());

    if let Err(e) = controller.spin(&guess) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    while !controller.trigger_enabled() {
        controller.advance(16);
    }

    println!("\nGuess: {}", guess.trim());
    for (i, lane) in controller.snapshot().lanes.iter().enumerate() {
        let result = if lane.overlay_hit { "HIT" } else { "miss" };
        println!("  Draw {}: {:>3}  {}", i + 1, lane.displayed_value, result);
    }
    for event in controller.drain_events() {
        if let DrawEvent::SpinSettled { hits, .. } = event {
            println!("{} lane(s) matched", hits);
        }
    }

    // Single roller round with the same guess, if it fits the smaller range
    if let Ok(n) = guess.trim().parse::<i64>() {
        if SINGLE_RANGE.contains(n) {
            let mut roller = SingleRoller::new(&settings, lucky_draw::platform::seed());
            if roller.play(&guess).is_ok() {
                while roller.is_spinning() {
                    roller.advance(16);
                }
                if let Some(message) = roller.message() {
                    println!("\nSingle roller: {}", message.text);
                }
            }
        }
    }
}
