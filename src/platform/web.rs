//! Browser collaborators: canvas 2D drawing, DOM keyboard input,
//! LocalStorage score persistence
//!
//! Key events arrive through closures that push abstract symbols into a
//! shared queue; the session drains it once per frame. Arrow-key releases
//! reproduce the carry rule: letting go of one arrow while the opposite
//! one is still held keeps the player moving that way.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

use super::{Presentation, Rect, ScoreStore, TextAlign, TextColor, TextStyle};
use crate::consts::{SCREEN_H, SCREEN_W};
use crate::highscores::HighScores;
use crate::sim::InputEvent;

#[derive(Default)]
struct HeldArrows {
    left: bool,
    right: bool,
}

type EventQueue = Rc<RefCell<VecDeque<InputEvent>>>;

pub struct CanvasPresentation {
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
    events: EventQueue,
}

impl CanvasPresentation {
    /// Bind to the page's `#canvas` element and start listening for keys
    pub fn new(document: &web_sys::Document) -> Result<Self, String> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()
            .map_err(|_| "#canvas is not a canvas")?;
        canvas.set_width(SCREEN_W as u32);
        canvas.set_height(SCREEN_H as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|_| "2d context unavailable")?
            .ok_or("2d context unavailable")?
            .dyn_into()
            .map_err(|_| "unexpected context type")?;

        let events: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
        attach_key_listeners(&events)?;

        Ok(Self {
            ctx,
            images: HashMap::new(),
            events,
        })
    }
}

fn attach_key_listeners(events: &EventQueue) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let held = Rc::new(RefCell::new(HeldArrows::default()));

    {
        let events = events.clone();
        let held = held.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut held = held.borrow_mut();
            let symbol = match event.key().as_str() {
                "ArrowLeft" => {
                    held.left = true;
                    Some(InputEvent::Left)
                }
                "ArrowRight" => {
                    held.right = true;
                    Some(InputEvent::Right)
                }
                "ArrowUp" => Some(InputEvent::Up),
                "Enter" => Some(InputEvent::Enter),
                "Backspace" => Some(InputEvent::Backspace),
                "Escape" => Some(InputEvent::Quit),
                key => {
                    let mut chars = key.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphabetic() => Some(InputEvent::Char(c)),
                        _ => None,
                    }
                }
            };
            if let Some(symbol) = symbol {
                events.borrow_mut().push_back(symbol);
            }
        });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach keydown listener")?;
        closure.forget();
    }

    {
        let events = events.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut held = held.borrow_mut();
            let symbol = match event.key().as_str() {
                "ArrowLeft" => {
                    held.left = false;
                    Some(if held.right {
                        InputEvent::Right
                    } else {
                        InputEvent::Still
                    })
                }
                "ArrowRight" => {
                    held.right = false;
                    Some(if held.left {
                        InputEvent::Left
                    } else {
                        InputEvent::Still
                    })
                }
                _ => None,
            };
            if let Some(symbol) = symbol {
                events.borrow_mut().push_back(symbol);
            }
        });
        window
            .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
            .map_err(|_| "failed to attach keyup listener")?;
        closure.forget();
    }

    Ok(())
}

impl Presentation for CanvasPresentation {
    fn screen_width(&self) -> u32 {
        SCREEN_W as u32
    }

    fn screen_height(&self) -> u32 {
        SCREEN_H as u32
    }

    fn load_image(&mut self, key: &str) -> bool {
        match HtmlImageElement::new() {
            Ok(image) => {
                image.set_src(&format!("graphics/{key}.png"));
                self.images.insert(key.to_string(), image);
                true
            }
            Err(err) => {
                log::error!("image element for '{key}' failed: {err:?}");
                false
            }
        }
    }

    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.borrow_mut().pop_front()
    }

    fn clear(&mut self) {
        self.ctx.set_fill_style_str("#000000");
        self.ctx
            .fill_rect(0.0, 0.0, SCREEN_W as f64, SCREEN_H as f64);
    }

    fn draw_sprite(&mut self, key: &str, src: Rect, dst: Rect) -> bool {
        let Some(image) = self.images.get(key) else {
            return false;
        };
        // Decoding may still be in flight right after startup
        if !image.complete() {
            return true;
        }

        // World space: x centered, y up from the bottom
        let dx = (SCREEN_W / 2.0 - dst.w / 2.0 + dst.x) as f64;
        let dy = (SCREEN_H - dst.h - dst.y) as f64;
        self.ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image, src.x as f64, src.y as f64, src.w as f64, src.h as f64, dx, dy,
                dst.w as f64, dst.h as f64,
            )
            .is_ok()
    }

    fn draw_text(&mut self, text: &str, y: f32, style: TextStyle) {
        let color = match (style.color, style.bright) {
            (TextColor::Cyan, false) => "#007f7f",
            (TextColor::Cyan, true) => "#00ffff",
            (TextColor::Yellow, _) => "#ffff00",
            (TextColor::Orange, _) => "#ff7f00",
            (TextColor::White, _) => "#ffffff",
            (TextColor::Green, false) => "#007f00",
            (TextColor::Green, true) => "#00ff00",
        };
        self.ctx.set_fill_style_str(color);
        self.ctx
            .set_font(if style.small { "14px monospace" } else { "22px monospace" });
        self.ctx.set_text_baseline("top");

        let (align, x) = match style.align {
            TextAlign::Left => ("left", 10.0),
            TextAlign::Center => ("center", SCREEN_W as f64 / 2.0),
            TextAlign::Right => ("right", SCREEN_W as f64 - 10.0),
        };
        self.ctx.set_text_align(align);
        if let Err(err) = self.ctx.fill_text(text, x, y as f64) {
            log::warn!("fill_text failed: {err:?}");
        }
    }

    fn present(&mut self) -> bool {
        // Canvas 2D flushes implicitly at the end of the callback
        true
    }
}

/// LocalStorage-backed score store
pub struct LocalStorageScoreStore;

impl LocalStorageScoreStore {
    const STORAGE_KEY: &'static str = "starleap_highscores";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

impl Default for LocalStorageScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for LocalStorageScoreStore {
    fn load(&self) -> HighScores {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY) {
                return HighScores::parse(&text);
            }
        }
        log::info!("no stored highscores, starting zeroed");
        HighScores::new()
    }

    fn save(&mut self, scores: &HighScores) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(Self::STORAGE_KEY, &scores.format()).is_err() {
                log::warn!("failed to save highscores to LocalStorage");
            }
        }
    }
}
