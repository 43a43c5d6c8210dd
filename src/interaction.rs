// Touch interaction state
// Tracks the link under the active touch and decides what to dispatch

use crate::links::LinkEntry;
use url::Url;

/// What a gesture asks the label to do with a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Tap(Url),
    LongPress(Url),
}

/// Single-touch state machine: a link is either pressed or nothing is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Pressed(LinkEntry),
}

impl Interaction {
    pub fn pressed(&self) -> Option<&LinkEntry> {
        match self {
            Interaction::Idle => None,
            Interaction::Pressed(link) => Some(link),
        }
    }

    /// A touch went down; `hit` is the link under it, if any
    pub fn touch_began(&mut self, hit: Option<LinkEntry>) {
        *self = hit.map_or(Interaction::Idle, Interaction::Pressed);
    }

    /// A touch lifted. Taps the link that was pressed.
    pub fn touch_ended(&mut self) -> Option<Dispatch> {
        match std::mem::take(self) {
            Interaction::Idle => None,
            Interaction::Pressed(link) => Some(Dispatch::Tap(link.resource)),
        }
    }

    /// The gesture system took the touch away; nothing is dispatched
    pub fn touch_cancelled(&mut self) {
        *self = Interaction::Idle;
    }

    /// A long press was recognized. Leaves the state alone.
    pub fn long_press(&self) -> Option<Dispatch> {
        self.pressed()
            .map(|link| Dispatch::LongPress(link.resource.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GlyphRange;

    fn entry() -> LinkEntry {
        LinkEntry {
            resource: Url::parse("https://example.com/").unwrap(),
            glyph_range: GlyphRange::new(3, 4),
        }
    }

    #[test]
    fn test_press_then_end_taps() {
        let mut state = Interaction::default();
        state.touch_began(Some(entry()));
        assert_eq!(state.pressed(), Some(&entry()));
        assert_eq!(state.touch_ended(), Some(Dispatch::Tap(entry().resource)));
        assert_eq!(state, Interaction::Idle);
    }

    #[test]
    fn test_cancel_suppresses_tap() {
        let mut state = Interaction::default();
        state.touch_began(Some(entry()));
        state.touch_cancelled();
        assert_eq!(state, Interaction::Idle);
        assert_eq!(state.touch_ended(), None);
    }

    #[test]
    fn test_miss_clears_previous_press() {
        let mut state = Interaction::Pressed(entry());
        state.touch_began(None);
        assert_eq!(state, Interaction::Idle);
    }

    #[test]
    fn test_long_press() {
        let mut state = Interaction::default();
        assert_eq!(state.long_press(), None);
        state.touch_began(Some(entry()));
        assert_eq!(
            state.long_press(),
            Some(Dispatch::LongPress(entry().resource))
        );
        assert_eq!(state.pressed(), Some(&entry()));
    }
}
