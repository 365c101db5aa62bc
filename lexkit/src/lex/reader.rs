// lexkit - a configurable lexical-analysis toolkit.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Stacked character sources.
//!
//! A [`ReaderStack`] holds named [`Stream`]s such that the stream on top is
//! the one being read.  Keeping the stack separate from the lexer allows the
//! input to be extended mid-lex (the preprocessor pushes each `#include`d
//! file here) and allows different lexers to take turns over one stack in a
//! strict sequential hand-off.
//!
//! Popping an exhausted stream is the *caller's* job: `read_char` keeps
//! returning `Ok(None)` at the end of the top stream until somebody pops it.
//! The lexer pops (and thereby closes) finished streams as it observes their
//! end.

use std::fs;
use std::io::{BufRead, Cursor, Result as IoResult};
use std::path::Path;
use std::sync::Arc;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// A single named character source with line bookkeeping.
///
/// Characters are served from a cache of the current physical line.  Each
/// line is read whole, its terminator stripped, and a single `\n` appended,
/// so consumers always see `\n` line ends and the final line always ends in
/// one even if the underlying source did not.
pub struct Stream {
    name: Arc<String>,
    source: Box<dyn BufRead>,
    /// Cached current line, terminated by the appended `\n`.
    line: Option<Arc<String>>,
    /// 1-based; 0 until the first line is read.
    line_number: u32,
    /// Byte offset of the next unread character within `line`.
    offset: usize,
}

impl Stream {
    /// Creates a stream reading from `source` under `name`.
    pub fn new(name: impl Into<String>, source: Box<dyn BufRead>) -> Self {
        Self {
            name: Arc::new(name.into()),
            source,
            line: None,
            line_number: 0,
            offset: 0,
        }
    }

    /// Creates a stream over in-memory `contents`.
    pub fn for_string(name: impl Into<String>, contents: &str) -> Self {
        Self::new(
            name,
            Box::new(Cursor::new(contents.as_bytes().to_vec())),
        )
    }

    /// Creates a stream by reading `path`, recoding from `encoding` to
    /// UTF-8.  When no encoding is given it is detected from the contents.
    /// The stream's name is the path as given.
    pub fn for_file<P>(path: P, encoding: Option<&'static Encoding>) -> IoResult<Self>
    where
        P: AsRef<Path>,
    {
        let bytes = fs::read(path.as_ref())?;
        let encoding = encoding.unwrap_or_else(|| {
            let mut encoding_detector = EncodingDetector::new();
            encoding_detector.feed(&bytes, true);
            encoding_detector.guess(None, true)
        });
        let (contents, _malformed) = encoding.decode_with_bom_removal(&bytes);
        Ok(Self::for_string(
            path.as_ref().to_string_lossy().to_string(),
            &contents,
        ))
    }

    /// Returns the stream's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the current line number, 1-based.  0 means nothing has been
    /// read yet.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Returns the cached current line, including the appended `\n`.
    pub fn line(&self) -> Option<&str> {
        self.line.as_ref().map(|line| line.as_str())
    }

    /// Reads one character.  `Ok(None)` means this stream has no more
    /// characters; further calls keep returning `Ok(None)`.
    pub fn read_char(&mut self) -> IoResult<Option<char>> {
        loop {
            if let Some(line) = &self.line {
                if let Some(c) = line[self.offset..].chars().next() {
                    self.offset += c.len_utf8();
                    return Ok(Some(c));
                }
            }

            let mut next = String::new();
            if self.source.read_line(&mut next)? == 0 {
                self.line = None;
                return Ok(None);
            }
            if next.ends_with('\n') {
                next.pop();
                if next.ends_with('\r') {
                    next.pop();
                }
            }
            next.push('\n');
            self.line = Some(Arc::new(next));
            self.line_number += 1;
            self.offset = 0;
        }
    }

    pub(crate) fn shared_name(&self) -> Arc<String> {
        Arc::clone(&self.name)
    }

    /// Stream name, current line, and line number, for minting tokens.
    pub(crate) fn token_context(&self) -> (Arc<String>, Arc<String>, u32) {
        (
            Arc::clone(&self.name),
            self.line.clone().unwrap_or_default(),
            self.line_number,
        )
    }
}

/// A LIFO of [`Stream`]s.  The top stream is the current one.
#[derive(Default)]
pub struct ReaderStack {
    streams: Vec<Stream>,
}

impl ReaderStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stack holding one stream.
    pub fn with_source(name: impl Into<String>, source: Box<dyn BufRead>) -> Self {
        let mut stack = Self::new();
        stack.push(name, source);
        stack
    }

    /// Pushes a new source; it becomes the current stream.
    pub fn push(&mut self, name: impl Into<String>, source: Box<dyn BufRead>) {
        self.push_stream(Stream::new(name, source));
    }

    /// Pushes an already-constructed stream.
    pub fn push_stream(&mut self, stream: Stream) {
        self.streams.push(stream);
    }

    /// Removes and returns the current stream.  Dropping the returned
    /// stream closes its source; keep it to continue reading elsewhere.
    pub fn pop(&mut self) -> Option<Stream> {
        self.streams.pop()
    }

    /// Returns the current stream.
    pub fn peek(&self) -> Option<&Stream> {
        self.streams.last()
    }

    pub(crate) fn peek_mut(&mut self) -> Option<&mut Stream> {
        self.streams.last_mut()
    }

    /// Returns the current stream's name, or `None` if the stack is empty.
    pub fn current_stream_name(&self) -> Option<&str> {
        self.peek().map(Stream::name)
    }

    /// Returns the current stream's 1-based line number, or `None` if the
    /// stack is empty.
    pub fn current_line_number(&self) -> Option<u32> {
        self.peek().map(Stream::line_number)
    }

    /// Returns the number of stacked streams.
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Reads one character from the current stream.  `Ok(None)` means the
    /// *current* stream ended; pop it to continue with the one below.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty; `read_char` is only defined while at
    /// least one stream is stacked.
    pub fn read_char(&mut self) -> IoResult<Option<char>> {
        self.peek_mut()
            .expect("read_char on an empty ReaderStack")
            .read_char()
    }
}
