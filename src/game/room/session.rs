use crate::game::types::{EntityId, Point};
use tokio::sync::mpsc::UnboundedSender;

/// Per-connection camera. The server keeps it next to the session and retargets
/// it at the controlled head each tick; clients do their own smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ViewRecord {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) target_x: f64,
    pub(crate) target_y: f64,
}

impl ViewRecord {
    pub(crate) fn centered_on(point: Point) -> Self {
        Self {
            x: point.x,
            y: point.y,
            target_x: point.x,
            target_y: point.y,
        }
    }

    pub(crate) fn retarget(&mut self, point: Point) {
        self.x = self.target_x;
        self.y = self.target_y;
        self.target_x = point.x;
        self.target_y = point.y;
    }
}

#[derive(Debug)]
pub(crate) struct SessionEntry {
    pub(crate) sender: UnboundedSender<String>,
    pub(crate) player_id: EntityId,
    pub(crate) view: ViewRecord,
}

impl SessionEntry {
    /// False once the socket side has gone away.
    pub(crate) fn send(&self, payload: String) -> bool {
        self.sender.send(payload).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retarget_moves_previous_target_into_center() {
        let mut view = ViewRecord::centered_on(Point::new(10.0, 20.0));
        view.retarget(Point::new(15.0, 25.0));
        assert_eq!((view.x, view.y), (10.0, 20.0));
        assert_eq!((view.target_x, view.target_y), (15.0, 25.0));
        view.retarget(Point::new(30.0, 35.0));
        assert_eq!((view.x, view.y), (15.0, 25.0));
    }
}
