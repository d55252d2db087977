use std::cell::Cell;
use std::io::{self, BufRead, BufReader, Read};
use std::rc::Rc;

/// Flags shared between a [`RecordInput`] and the reader driving the parser on top of it.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    eof: Cell<bool>,
    skip_blank: Cell<bool>,
}

impl InputState {
    /// True once the underlying stream has returned no more bytes.
    pub(crate) fn at_eof(&self) -> bool {
        self.eof.get()
    }

    /// Makes the next read discard leading whitespace, up to the next non-blank byte.
    pub(crate) fn skip_blank_lines(&self) {
        self.skip_blank.set(true);
    }
}

/// Buffered input that reports end-of-stream and can drop blank lines between records.
///
/// The record parsers own their input, so the state is handed out separately.
pub(crate) struct RecordInput {
    inner: BufReader<Box<dyn Read>>,
    state: Rc<InputState>,
}

impl RecordInput {
    pub(crate) fn new(inner: BufReader<Box<dyn Read>>) -> Self {
        Self {
            inner,
            state: Rc::new(InputState::default()),
        }
    }

    pub(crate) fn state(&self) -> Rc<InputState> {
        Rc::clone(&self.state)
    }

    fn discard_whitespace(&mut self) -> io::Result<()> {
        loop {
            let buf = self.inner.fill_buf()?;
            if buf.is_empty() {
                return Ok(());
            }
            let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            let exhausted = blank == buf.len();
            self.inner.consume(blank);
            if !exhausted {
                return Ok(());
            }
        }
    }
}

impl Read for RecordInput {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = {
            let buf = self.fill_buf()?;
            let n = buf.len().min(out.len());
            out[..n].copy_from_slice(&buf[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for RecordInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.state.skip_blank.replace(false) {
            self.discard_whitespace()?;
        }
        let buf = self.inner.fill_buf()?;
        if buf.is_empty() {
            self.state.eof.set(true);
        }
        Ok(buf)
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}
