use ratatui::layout::Position;
use std::collections::{HashSet, VecDeque};

/// The snake's body.
///
/// Segments are stored head first.  `occupied` mirrors the contents of `body`
/// so that collision & food placement checks don't have to scan the list.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: VecDeque<Position>,
    occupied: HashSet<Position>,
}

impl Snake {
    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Return the position of the last segment of the snake's body
    pub(crate) fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    /// Return the positions of all of the snake's segments, head first
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Is any segment of the snake at `pos`?
    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.occupied.contains(&pos)
    }

    /// Would the head moving to `pos` run into the body?  The tail is about
    /// to move out of the way, so it doesn't count.
    pub(crate) fn bites(&self, pos: Position) -> bool {
        self.contains(pos) && self.tail() != Some(pos)
    }

    /// Move the snake forwards so that its head is at `head`, dropping the
    /// tail
    pub(crate) fn slide(&mut self, head: Position) {
        if let Some(tail) = self.body.pop_back() {
            let _ = self.occupied.remove(&tail);
        }
        self.push_head(head);
    }

    /// Move the snake forwards so that its head is at `head`, keeping the
    /// tail where it is
    pub(crate) fn grow(&mut self, head: Position) {
        self.push_head(head);
    }

    fn push_head(&mut self, head: Position) {
        self.body.push_front(head);
        self.occupied.insert(head);
    }
}

impl FromIterator<Position> for Snake {
    /// Build a snake from its segments, head first
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Snake {
        let body = iter.into_iter().collect::<VecDeque<_>>();
        let occupied = body.iter().copied().collect();
        Snake { body, occupied }
    }
}
