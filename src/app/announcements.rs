use std::collections::VecDeque;

use crate::domain::{Announcement, Clip};

/// Clips waiting to interrupt the main track, consumed oldest first.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementQueue {
    items: VecDeque<Announcement>,
}

impl AnnouncementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: Announcement) {
        self.items.push_back(item);
    }

    pub fn enqueue_clip(&mut self, clip: Clip) {
        self.enqueue(Announcement::status(clip));
    }

    /// Speaks `number` digit by digit; `0` enqueues nothing.
    pub fn enqueue_number(&mut self, number: u32) {
        self.items.extend(number_clips(number));
    }

    pub fn dequeue_next(&mut self) -> Option<Announcement> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Digit clips for `number`, most significant first.
///
/// Every digit after the leading one is spoken, zeros included, so 105
/// reads "1", "0", "5".
pub fn number_clips(number: u32) -> Vec<Announcement> {
    if number == 0 {
        return Vec::new();
    }
    let mut digits = Vec::new();
    let mut rest = number;
    while rest > 0 {
        digits.push((rest % 10) as u8);
        rest /= 10;
    }
    digits
        .into_iter()
        .rev()
        .map(|d| Announcement::digit(d, number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(number: u32) -> Vec<Clip> {
        number_clips(number).into_iter().map(|a| a.clip).collect()
    }

    #[test]
    fn zero_is_never_spoken() {
        assert!(digits(0).is_empty());
    }

    #[test]
    fn numbers_split_into_digit_clips() {
        assert_eq!(digits(7), vec![Clip::Digit(7)]);
        assert_eq!(digits(42), vec![Clip::Digit(4), Clip::Digit(2)]);
        assert_eq!(
            digits(105),
            vec![Clip::Digit(1), Clip::Digit(0), Clip::Digit(5)]
        );
        assert_eq!(digits(10), vec![Clip::Digit(1), Clip::Digit(0)]);
        assert_eq!(
            digits(300),
            vec![Clip::Digit(3), Clip::Digit(0), Clip::Digit(0)]
        );
    }

    #[test]
    fn digit_clips_remember_their_number() {
        assert!(number_clips(42).iter().all(|a| a.origin == Some(42)));
    }

    #[test]
    fn queue_is_fifo() {
        let mut q = AnnouncementQueue::new();
        q.enqueue_clip(Clip::Start);
        q.enqueue_clip(Clip::Book);
        q.enqueue_number(12);
        assert_eq!(q.len(), 4);
        assert_eq!(q.dequeue_next().map(|a| a.clip), Some(Clip::Start));
        assert_eq!(q.dequeue_next().map(|a| a.clip), Some(Clip::Book));
        assert_eq!(q.dequeue_next().map(|a| a.clip), Some(Clip::Digit(1)));
        assert_eq!(q.dequeue_next().map(|a| a.clip), Some(Clip::Digit(2)));
        assert!(q.dequeue_next().is_none());
        assert!(q.is_empty());
    }
}
