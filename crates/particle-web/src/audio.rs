use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub const MUSIC_SRC: &str = "/audio.mp3";

/// Looping background track. Browsers only allow playback after a user
/// gesture, so the page calls `start_music` from its own click handler.
pub struct BackgroundMusic {
    element: web::HtmlAudioElement,
}

impl BackgroundMusic {
    pub fn new(src: &str) -> anyhow::Result<Self> {
        let element = web::HtmlAudioElement::new_with_src(src)
            .map_err(|e| anyhow::anyhow!("audio element: {:?}", e))?;
        element.set_loop(true);
        Ok(Self { element })
    }

    pub fn play(&self) {
        let promise = match self.element.play() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[audio] play failed: {:?}", e);
                return;
            }
        };
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::warn!("[audio] playback rejected: {:?}", e);
            }
        });
    }

    pub fn stop(&self) {
        _ = self.element.pause();
        self.element.set_current_time(0.0);
    }
}
