//! Touch input scheduled from the command line.

use std::str::FromStr;

use paxo_script::{InputSource, Session};
use tracing::debug;

/// One touch at a screen point on a given frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTouch {
    pub x: u16,
    pub y: u16,
    pub frame: u64,
}

impl FromStr for ScheduledTouch {
    type Err = String;

    /// Parses `X,Y@FRAME`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (point, frame) = s
            .split_once('@')
            .ok_or_else(|| format!("expected X,Y@FRAME, got '{s}'"))?;
        let (x, y) = point
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y before '@', got '{point}'"))?;

        let coord = |v: &str| {
            v.trim()
                .parse::<u16>()
                .map_err(|e| format!("invalid coordinate '{v}': {e}"))
        };
        Ok(Self {
            x: coord(x)?,
            y: coord(y)?,
            frame: frame
                .trim()
                .parse()
                .map_err(|e| format!("invalid frame '{frame}': {e}"))?,
        })
    }
}

/// Replays scheduled touches; quits after the last one has been released
/// unless the loop is otherwise bounded.
#[derive(Debug, Default)]
pub struct ScheduledTouches {
    touches: Vec<ScheduledTouch>,
    quit_when_done: bool,
    last_frame: Option<u64>,
}

impl ScheduledTouches {
    pub fn new(mut touches: Vec<ScheduledTouch>, quit_when_done: bool) -> Self {
        touches.sort_by_key(|t| t.frame);
        Self {
            touches,
            quit_when_done,
            last_frame: None,
        }
    }
}

impl InputSource for ScheduledTouches {
    fn poll(&mut self, frame: u64, session: &Session) {
        self.last_frame = Some(frame);
        for touch in self.touches.iter().filter(|t| t.frame == frame) {
            let hit = session.touch_at(touch.x, touch.y);
            debug!(frame, x = touch.x, y = touch.y, handle = ?hit, "scheduled touch");
        }
    }

    fn quit_requested(&self) -> bool {
        if !self.quit_when_done || self.touches.is_empty() {
            return false;
        }
        let last = self.touches.iter().map(|t| t.frame).max().unwrap_or(0);
        // One extra frame so the release is seen.
        matches!(self.last_frame, Some(frame) if frame > last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_touch() {
        let touch: ScheduledTouch = "12,34@5".parse().unwrap();
        assert_eq!(
            touch,
            ScheduledTouch {
                x: 12,
                y: 34,
                frame: 5
            }
        );
    }

    #[test]
    fn parse_touch_with_spaces() {
        let touch: ScheduledTouch = " 1 , 2 @ 3".parse().unwrap();
        assert_eq!(touch.frame, 3);
        assert_eq!((touch.x, touch.y), (1, 2));
    }

    #[test]
    fn parse_touch_errors() {
        assert!("12,34".parse::<ScheduledTouch>().is_err());
        assert!("12@3".parse::<ScheduledTouch>().is_err());
        assert!("a,b@1".parse::<ScheduledTouch>().is_err());
        assert!("1,2@-1".parse::<ScheduledTouch>().is_err());
        assert!("70000,2@1".parse::<ScheduledTouch>().is_err());
    }

    #[test]
    fn quits_one_frame_after_last_touch() {
        let touches = vec![
            ScheduledTouch { x: 0, y: 0, frame: 4 },
            ScheduledTouch { x: 0, y: 0, frame: 1 },
        ];
        let mut input = ScheduledTouches::new(touches, true);
        assert!(!input.quit_requested());
        input.last_frame = Some(4);
        assert!(!input.quit_requested());
        input.last_frame = Some(5);
        assert!(input.quit_requested());
    }

    #[test]
    fn never_quits_without_touches_or_when_disabled() {
        let mut input = ScheduledTouches::new(Vec::new(), true);
        input.last_frame = Some(100);
        assert!(!input.quit_requested());

        let mut input = ScheduledTouches::new(
            vec![ScheduledTouch { x: 0, y: 0, frame: 0 }],
            false,
        );
        input.last_frame = Some(100);
        assert!(!input.quit_requested());
    }
}
