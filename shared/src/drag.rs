use crate::queue::{Placement, QueueOrder};

/// State of one drag gesture, from drag start until drop or drag end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub source_index: usize,
    pub item_id: String,
}

/// What a drop did to the queue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropOutcome {
    pub item_id: String,
    pub old_index: usize,
    pub new_index: usize,
    pub placement: Placement,
}

/// Tracks the gesture in progress for one attached list.
///
/// The session is owned by the handlers of a single attachment, so a
/// re-rendered list always starts without a gesture.
#[derive(Debug, Default)]
pub struct DragSession {
    gesture: Option<DragGesture>,
}

impl DragSession {
    pub fn new() -> DragSession {
        DragSession::default()
    }

    pub fn start(&mut self, source_index: usize, item_id: impl Into<String>) {
        self.gesture = Some(DragGesture {
            source_index,
            item_id: item_id.into(),
        });
    }

    pub fn end(&mut self) -> Option<DragGesture> {
        self.gesture.take()
    }

    /// Finishes the gesture on the item at `target_index`, applying the move
    /// to `order`. Returns `None` when nothing moved.
    pub fn drop_on<T>(&mut self, order: &mut QueueOrder<T>, target_index: usize) -> Option<DropOutcome> {
        let gesture = self.gesture.take()?;
        let placement = order.move_item(gesture.source_index, target_index)?;

        Some(DropOutcome {
            item_id: gesture.item_id,
            old_index: gesture.source_index,
            new_index: target_index,
            placement,
        })
    }
}

#[cfg(test)]
impl DragSession {
    pub fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_without_gesture_is_ignored() {
        let mut order = QueueOrder::new(vec![1, 2, 3]);
        let mut session = DragSession::new();

        assert_eq!(session.drop_on(&mut order, 1), None);
        assert_eq!(order.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_drop_on_self_discards_gesture() {
        let mut order = QueueOrder::new(vec![1, 2, 3]);
        let mut session = DragSession::new();

        session.start(1, "b");
        assert_eq!(session.drop_on(&mut order, 1), None);
        assert_eq!(session.gesture(), None);
        assert_eq!(order.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_drop_reports_indices() {
        let mut order = QueueOrder::new(vec!["a", "b", "c"]);
        let mut session = DragSession::new();

        session.start(2, "c");
        assert_eq!(
            session.gesture(),
            Some(&DragGesture {
                source_index: 2,
                item_id: "c".into()
            })
        );

        assert_eq!(
            session.drop_on(&mut order, 0),
            Some(DropOutcome {
                item_id: "c".into(),
                old_index: 2,
                new_index: 0,
                placement: Placement::Before,
            })
        );
        assert_eq!(order.into_inner(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_end_clears_gesture() {
        let mut session = DragSession::new();
        session.start(0, "a");

        assert!(session.end().is_some());
        assert!(session.end().is_none());
    }
}
