//! The caller-owned scene: animator plus the mailbox the tracker posts into.

use crate::animator::SceneAnimator;
use crate::config::{ConfigError, SceneConfig};
use crate::gesture::{Classification, GestureDebouncer, GestureState};
use crate::mailbox::{GestureInbox, GestureMailbox};
use std::sync::Arc;

/// Everything one mounted scene needs.
///
/// The render loop owns the `Scene` and calls [`Scene::frame`] once per
/// display refresh. The hand tracker gets a [`GestureInbox`] from
/// [`Scene::inbox`] and posts from its own callback or thread; the next frame
/// picks up only the newest result.
pub struct Scene {
    animator: SceneAnimator,
    mailbox: Arc<GestureMailbox>,
    debouncer: GestureDebouncer,
}

impl Scene {
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self, ConfigError> {
        let debouncer = GestureDebouncer::new(config.stable_samples);
        let animator = SceneAnimator::new(config, seed)?;
        Ok(Self {
            animator,
            mailbox: Arc::new(GestureMailbox::new()),
            debouncer,
        })
    }

    pub fn inbox(&self) -> GestureInbox {
        GestureInbox::new(
            Arc::clone(&self.mailbox),
            self.animator.config().thresholds,
        )
    }

    pub fn animator(&self) -> &SceneAnimator {
        &self.animator
    }

    pub fn state(&self) -> GestureState {
        self.animator.state()
    }

    /// Apply the newest posted classification, if any, then advance one tick.
    pub fn frame(&mut self, time: f32) -> GestureState {
        if let Some(c) = self.mailbox.take() {
            let state = self.debouncer.push(c.state);
            self.animator.apply(Classification {
                state,
                hand_x: c.hand_x,
            });
        }
        self.animator.tick(time);
        self.animator.state()
    }
}
