use instant::Instant;
use log::debug;

use crate::{SettingsPlayback, Step};

/// Cursor over a finished step list.
///
/// Before [`Playback::start`] and after a rewind the cursor sits before the first step and
/// [`Playback::current`] is None. Playback only moves the cursor, steps are never regenerated.
#[derive(Debug, Clone)]
pub struct Playback {
    steps: Vec<Step>,
    index: Option<usize>,
    playing: bool,
    last_advance: Option<Instant>,

    settings: SettingsPlayback,
}

impl Playback {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            index: None,
            playing: false,
            last_advance: None,
            settings: SettingsPlayback::default(),
        }
    }

    pub fn with_settings(mut self, settings: SettingsPlayback) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &SettingsPlayback {
        &self.settings
    }

    /// Shows the first step and starts automatic playback. False when there is nothing to play.
    pub fn start(&mut self, now: Instant) -> bool {
        self.reset();
        if self.steps.is_empty() {
            debug!("playback: nothing to start");
            return false;
        }

        debug!("playback: starting over {} steps", self.steps.len());
        self.next();
        self.playing = !self.is_finished();
        self.last_advance = Some(now);
        true
    }

    /// Moves one step forward.
    ///
    /// Stepping past the last step rewinds to before the first one when
    /// [`SettingsPlayback::loop_at_end`] is set and stays on the last step otherwise.
    /// Reaching the last step stops automatic playback.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Step> {
        if self.steps.is_empty() {
            return None;
        }

        if self.is_finished() {
            if self.settings.loop_at_end {
                self.reset();
            }
            return self.current();
        }

        let i = self.index.map_or(0, |i| i + 1);
        self.index = Some(i);
        if self.is_finished() {
            self.playing = false;
        }
        self.current()
    }

    /// Moves one step back, staying on the first step.
    pub fn prev(&mut self) -> Option<&Step> {
        if let Some(i) = self.index {
            self.index = Some(i.saturating_sub(1));
        }
        self.current()
    }

    /// Jumps to step `i`. Out of range indices leave the cursor alone.
    pub fn seek(&mut self, i: usize) -> Option<&Step> {
        if i < self.steps.len() {
            self.index = Some(i);
            if self.is_finished() {
                self.playing = false;
            }
        }
        self.current()
    }

    /// Moves before the first step and stops.
    pub fn reset(&mut self) {
        self.index = None;
        self.playing = false;
        self.last_advance = None;
    }

    /// Resumes automatic playback. False when already on the last step or empty.
    pub fn play(&mut self, now: Instant) -> bool {
        if self.steps.is_empty() || self.is_finished() {
            return false;
        }
        self.playing = true;
        self.last_advance = Some(now);
        true
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play(now)
        }
    }

    /// Advances once the playback interval has passed since the last advance.
    ///
    /// Call it every frame. Returns true when the cursor moved.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.playing {
            return false;
        }
        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return false;
        };
        if now.duration_since(last) < self.settings.interval {
            return false;
        }

        self.last_advance = Some(now);
        self.next().is_some()
    }

    pub fn current(&self) -> Option<&Step> {
        self.steps.get(self.index?)
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// On the last step.
    pub fn is_finished(&self) -> bool {
        !self.steps.is_empty() && self.index == Some(self.steps.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use egui::Pos2;

    use super::*;
    use crate::{kruskal, Graph};

    fn steps() -> Vec<Step> {
        let mut g = Graph::new();
        let a = g.add_node(Pos2::ZERO);
        let b = g.add_node(Pos2::ZERO);
        g.add_edge(a, b, 1.).unwrap();
        // initial, considering, added, final
        kruskal(&g).unwrap()
    }

    #[test]
    fn start_shows_first_step_and_plays() {
        let mut p = Playback::new(steps());
        assert!(p.current().is_none());

        assert!(p.start(Instant::now()));
        assert_eq!(p.index(), Some(0));
        assert!(p.is_playing());
    }

    #[test]
    fn update_waits_for_interval() {
        let interval = Duration::from_millis(100);
        let mut p = Playback::new(steps())
            .with_settings(SettingsPlayback::default().with_interval(interval));
        let t0 = Instant::now();
        p.start(t0);

        assert!(!p.update(t0 + Duration::from_millis(50)));
        assert_eq!(p.index(), Some(0));
        assert!(p.update(t0 + Duration::from_millis(150)));
        assert_eq!(p.index(), Some(1));

        assert!(p.update(t0 + Duration::from_millis(300)));
        assert!(p.update(t0 + Duration::from_millis(450)));
        assert!(p.is_finished());
        assert!(!p.is_playing());
        assert!(!p.update(t0 + Duration::from_millis(600)));
        assert!(p.current().unwrap().is_final());
    }

    #[test]
    fn next_past_end_rewinds() {
        let mut p = Playback::new(steps());
        for _ in 0..4 {
            assert!(p.next().is_some());
        }
        assert!(p.is_finished());
        assert!(p.next().is_none());
        assert_eq!(p.index(), None);

        let mut p = Playback::new(steps())
            .with_settings(SettingsPlayback::default().with_loop_at_end(false));
        p.seek(3);
        assert!(p.next().unwrap().is_final());
    }

    #[test]
    fn pause_and_resume() {
        let mut p = Playback::new(steps());
        let t0 = Instant::now();
        p.start(t0);

        assert!(!p.toggle(t0));
        assert!(!p.update(t0 + Duration::from_secs(10)));
        assert!(p.toggle(t0));
        assert!(p.is_playing());

        p.seek(3);
        assert!(!p.is_playing());
        assert!(!p.play(t0));
        assert_eq!(p.prev().map(Step::kind), Some(crate::StepKind::EdgeHighlight));
    }

    #[test]
    fn empty_playback_does_nothing() {
        let mut p = Playback::new(Vec::new());
        assert!(!p.start(Instant::now()));
        assert!(p.next().is_none());
        assert!(p.seek(0).is_none());
        assert!(!p.is_finished());
    }
}
