use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlAudioElement, HtmlInputElement};

const MUSIC_URL: &str = "audio/background-music.mp3";
const DEFAULT_VOLUME: f64 = 0.2;

const PLAYING_ICON: &str = "\u{23f8}\u{fe0f}";
const PAUSED_ICON: &str = "\u{25b6}\u{fe0f}";
const SOUND_ON_ICON: &str = "\u{1f50a}";
const SOUND_OFF_ICON: &str = "\u{1f507}";

/// Looping background track plus the play/mute/volume widget in the page corner.
pub struct Audio {
    music: Option<HtmlAudioElement>,
    playing: Rc<Cell<bool>>,
}

impl Audio {
    pub fn new() -> Self {
        let music = match HtmlAudioElement::new_with_src(MUSIC_URL) {
            Ok(music) => {
                music.set_loop(true);
                music.set_volume(DEFAULT_VOLUME);
                Some(music)
            }
            Err(e) => {
                log::warn!("Background music unavailable: {:?}", e);
                None
            }
        };
        let audio = Self {
            music,
            playing: Rc::new(Cell::new(true)),
        };
        audio.wire_controls();
        audio.play();
        audio
    }

    /// Browsers block autoplay until the first user gesture, so retry on each of them.
    pub fn start_on_interaction(&self) {
        let Some(music) = self.music.clone() else { return };
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let playing = self.playing.clone();
        let start = Closure::wrap(Box::new(move |_: JsValue| {
            if playing.get() && music.paused() {
                let _ = music.play();
            }
        }) as Box<dyn FnMut(JsValue)>);
        for event in ["click", "touchstart", "keydown"] {
            let _ = doc.add_event_listener_with_callback(event, start.as_ref().unchecked_ref());
        }
        start.forget();
    }

    pub fn play(&self) {
        if let Some(music) = &self.music {
            // Rejected until the page has seen a user gesture.
            let _ = music.play();
        }
    }

    pub fn pause(&self) {
        if let Some(music) = &self.music {
            let _ = music.pause();
        }
        self.playing.set(false);
        set_button_text("play-button", PAUSED_ICON);
    }

    fn wire_controls(&self) {
        let Some(music) = self.music.clone() else { return };
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(button) = doc.get_element_by_id("play-button") {
            let music = music.clone();
            let playing = self.playing.clone();
            let onclick = Closure::wrap(Box::new(move |_: JsValue| {
                if playing.get() {
                    let _ = music.pause();
                    playing.set(false);
                    set_button_text("play-button", PAUSED_ICON);
                } else {
                    let _ = music.play();
                    playing.set(true);
                    set_button_text("play-button", PLAYING_ICON);
                }
            }) as Box<dyn FnMut(JsValue)>);
            let _ = button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
            onclick.forget();
        }

        if let Some(slider) = doc
            .get_element_by_id("volume-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let music = music.clone();
            let field = slider.clone();
            let oninput = Closure::wrap(Box::new(move |_: JsValue| {
                let volume = field.value().parse::<f64>().unwrap_or(0.0) / 100.0;
                music.set_volume(volume.clamp(0.0, 1.0));
                set_mute_icon(volume);
            }) as Box<dyn FnMut(JsValue)>);
            let _ = slider.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref());
            oninput.forget();
        }

        if let Some(button) = doc.get_element_by_id("mute-button") {
            let onclick = Closure::wrap(Box::new(move |_: JsValue| {
                let volume = if music.volume() > 0.0 { 0.0 } else { DEFAULT_VOLUME };
                music.set_volume(volume);
                set_slider(volume);
                set_mute_icon(volume);
            }) as Box<dyn FnMut(JsValue)>);
            let _ = button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
            onclick.forget();
        }
    }
}

fn set_button_text(id: &str, text: &str) {
    if let Some(el) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    {
        el.set_text_content(Some(text));
    }
}

fn set_mute_icon(volume: f64) {
    let icon = if volume == 0.0 {
        SOUND_OFF_ICON
    } else {
        SOUND_ON_ICON
    };
    set_button_text("mute-button", icon);
}

fn set_slider(volume: f64) {
    if let Some(slider) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("volume-slider"))
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        slider.set_value(&((volume * 100.0).round() as i32).to_string());
    }
}
