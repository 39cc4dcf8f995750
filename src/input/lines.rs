use std::io::{self, BufRead};
use std::thread;
use tokio::sync::mpsc;

use super::{Button, InputEvent};

/// One button name per line on stdin, for an external GPIO helper to pipe
/// presses in. End of input just ends the reader.
pub fn spawn_line_input(tx: mpsc::Sender<InputEvent>) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("line-input".to_owned())
        .spawn(move || {
            let stdin = io::stdin();
            read_lines(stdin.lock(), &tx);
            tracing::debug!("line input closed");
        })
}

fn read_lines(reader: impl BufRead, tx: &mpsc::Sender<InputEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(err = %e, "line input read failed");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let Some(button) = Button::from_name(&line) else {
            tracing::warn!(input = %line.trim(), "unknown button name");
            continue;
        };
        if tx.blocking_send(InputEvent::Press(button)).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_lines() {
        let (tx, mut rx) = mpsc::channel(8);
        read_lines(io::Cursor::new("next\n\nbogus\nplay\n"), &tx);
        assert_eq!(rx.try_recv().ok(), Some(InputEvent::Press(Button::NextTrack)));
        assert_eq!(rx.try_recv().ok(), Some(InputEvent::Press(Button::PlayPause)));
        assert!(rx.try_recv().is_err());
    }
}
