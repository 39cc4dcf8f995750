/// Books and their track counts, read once at boot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    // index 0 is book 1
    tracks: Vec<u32>,
}

impl Catalog {
    pub fn new(tracks_per_book: Vec<u32>) -> Self {
        Self {
            tracks: tracks_per_book,
        }
    }

    pub fn max_book(&self) -> u32 {
        self.tracks.len() as u32
    }

    /// Track count of `book`, `0` for books outside the catalog.
    pub fn max_track(&self, book: u32) -> u32 {
        if book == 0 {
            return 0;
        }
        self.tracks.get(book as usize - 1).copied().unwrap_or(0)
    }

    pub fn wrap_book(&self, book: i64) -> u32 {
        wrap_id(book, self.max_book())
    }

    pub fn wrap_track(&self, book: u32, track: i64) -> u32 {
        wrap_id(track, self.max_track(book))
    }
}

/// Past the end goes to 1, before the start goes to `max`.
pub fn wrap_id(id: i64, max: u32) -> u32 {
    if id > i64::from(max) {
        1.min(max)
    } else if id < 1 {
        max
    } else {
        id as u32
    }
}
