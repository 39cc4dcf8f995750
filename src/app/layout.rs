use std::path::PathBuf;

use crate::domain::{Clip, Position};

/// Where main tracks and announcement clips live on disk.
#[derive(Debug, Clone)]
pub struct MediaLayout {
    root: PathBuf,
    messages_dir: PathBuf,
    zero_pad: bool,
}

impl MediaLayout {
    pub fn new(root: impl Into<PathBuf>, messages_dir: impl Into<PathBuf>, zero_pad: bool) -> Self {
        Self {
            root: root.into(),
            messages_dir: messages_dir.into(),
            zero_pad,
        }
    }

    /// `<root>/b<book>/<track>.mp3`, track padded to three digits.
    pub fn track_path(&self, position: Position) -> PathBuf {
        let file = if self.zero_pad {
            format!("{:03}.mp3", position.track)
        } else {
            format!("{}.mp3", position.track)
        };
        self.root.join(format!("b{}", position.book)).join(file)
    }

    pub fn clip_path(&self, clip: Clip) -> PathBuf {
        self.messages_dir.join(format!("{}.mp3", clip.file_stem()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_track_paths() {
        let layout = MediaLayout::new("/media/RPI", "/home/pi/books", true);
        assert_eq!(
            layout.track_path(Position::new(2, 7)),
            PathBuf::from("/media/RPI/b2/007.mp3")
        );
        assert_eq!(
            layout.track_path(Position::new(1, 120)),
            PathBuf::from("/media/RPI/b1/120.mp3")
        );
    }

    #[test]
    fn unpadded_track_paths() {
        let layout = MediaLayout::new("/media/RPI", "/home/pi/books", false);
        assert_eq!(
            layout.track_path(Position::new(3, 9)),
            PathBuf::from("/media/RPI/b3/9.mp3")
        );
    }

    #[test]
    fn clip_paths() {
        let layout = MediaLayout::new("/media/RPI", "/home/pi/books", true);
        assert_eq!(
            layout.clip_path(Clip::Digit(5)),
            PathBuf::from("/home/pi/books/5.mp3")
        );
        assert_eq!(
            layout.clip_path(Clip::Beep),
            PathBuf::from("/home/pi/books/beep.mp3")
        );
    }
}
