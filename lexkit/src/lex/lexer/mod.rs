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

//! The tokenizing state machine.
//!
//! [`Lexer::next_token`] pulls characters from the reader stack and runs
//! them through a deterministic state machine until one token has been
//! assembled.  The machine is table-free: each state is a handler that
//! classifies the next character against the kernel's configuration and
//! either extends the current lexeme, changes state, or finishes the token.
//! A single pending character (the "delimiter break") carries over between
//! calls when a character both ends one token and begins the next.
//!
//! Dispatch precedence for a fresh character is fixed and is part of the
//! contract: end of input, then whitespace, then the decimal separator,
//! then special prefixes, then string openers, then delimiter starts, then
//! identifier starts, then digits, and finally the illegal catch-all.

use std::cell::RefCell;
use std::io::{BufRead, Cursor};
use std::mem::take;
use std::rc::Rc;
use std::sync::Arc;

use super::kernel::{Emit, LexerKernel};
use super::reader::{ReaderStack, Stream};
use super::token::{Token, TokenType};
use super::{LexError, TokenSource};

#[cfg(test)]
mod tests;

/// The newline character, as normalized by [`Stream`](super::Stream).
pub const NEWLINE: char = '\n';

/// The stream name given to lexers constructed without one.
pub const DEFAULT_NAME: &str = "Lexer";

/// What the reader produced: a character, the end of the current stream, or
/// the end of the whole stack.  The two end levels are distinct on purpose:
/// one stream ending only means the stack should be popped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Ch {
    Char(char),
    StreamEnd,
    LexerEnd,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    /// Initial and between-token dispatch.
    Unknown,
    /// Accumulating an unrecognized lexeme.
    Illegal,
    /// Saw the decimal separator, which is also a delimiter start.
    Point,
    /// Accumulating fractional digits.
    Float,
    /// Just saw `e`/`E` after a number.
    Exponent,
    /// Saw the exponent sign but no digit yet.
    ExponentSign,
    /// Accumulating exponent digits.
    ExponentPower,
    /// Integer or post-fraction number.
    Number,
    /// Saw a leading `0`.
    HexInteger0,
    /// Saw `0x` or `0X`.
    HexInteger1,
    /// Accumulating hex digits.
    HexInteger,
    Identifier,
    /// Accumulating a special-prefix-driven token.
    Special,
    /// Inside a quoted string.
    QuotedString,
    /// Accumulating a delimiter lexeme.
    Delimiter,
    /// Inside a block comment.
    Comment,
    /// Tentative block-comment-end candidate.
    DelimComment,
    /// Inside a line comment.
    LineComment,
    /// Emission states: the token is decided, the loop just has to stop.
    DelimSpace,
    DelimTab,
    DelimNewline,
    EndOfStream,
    EndOfLexer,
}

/// The state machine.
///
/// Construct one over a string, an arbitrary [`BufRead`] source, or a
/// pre-built [`ReaderStack`] shared with other lexers.  The sole operation
/// is [`next_token`](Lexer::next_token).
pub struct Lexer {
    kernel: Arc<LexerKernel>,
    streams: Rc<RefCell<ReaderStack>>,
    state: State,
    lexeme: String,
    /// Closing character of the string being scanned.
    string_end: char,
    /// A character that ended the previous token and must re-enter the
    /// machine on the next call.
    pending: Option<Ch>,
    /// User type recorded when a special prefix opened the current token.
    special_type: u32,
    /// Context of a just-popped stream, for the stream-break token.
    end_context: Option<(Arc<String>, Arc<String>, u32)>,
    /// When set, every emitted token is written to standard error.
    trace: bool,
}

impl Lexer {
    /// Creates a lexer over in-memory text.  Without a `name` the stream is
    /// called [`DEFAULT_NAME`].
    pub fn for_string(kernel: &Arc<LexerKernel>, name: Option<&str>, text: &str) -> Self {
        Self::for_source(
            kernel,
            name,
            Box::new(Cursor::new(text.as_bytes().to_vec())),
        )
    }

    /// Creates a lexer over any buffered source.
    pub fn for_source(
        kernel: &Arc<LexerKernel>,
        name: Option<&str>,
        source: Box<dyn BufRead>,
    ) -> Self {
        let stack = ReaderStack::with_source(name.unwrap_or(DEFAULT_NAME), source);
        Self::with_stack(kernel, Rc::new(RefCell::new(stack)))
    }

    /// Creates a lexer over an existing reader stack.  Two lexers may share
    /// one stack, but only in a strict sequential hand-off: never interleave
    /// `next_token` calls on both.
    pub fn with_stack(kernel: &Arc<LexerKernel>, streams: Rc<RefCell<ReaderStack>>) -> Self {
        Self {
            kernel: Arc::clone(kernel),
            streams,
            state: State::Unknown,
            lexeme: String::new(),
            string_end: '\0',
            pending: None,
            special_type: 0,
            end_context: None,
            trace: false,
        }
    }

    /// Returns the kernel this lexer scans under.
    pub fn kernel(&self) -> &Arc<LexerKernel> {
        &self.kernel
    }

    /// Returns the shared reader stack.
    pub fn reader_stack(&self) -> Rc<RefCell<ReaderStack>> {
        Rc::clone(&self.streams)
    }

    /// Pushes another source; subsequent characters come from it until it
    /// ends.  This is how `#include` splices a file into the token stream.
    pub fn push_source(&mut self, name: impl Into<String>, source: Box<dyn BufRead>) {
        self.streams.borrow_mut().push(name, source);
    }

    /// Pushes an already-constructed stream.
    pub fn push_stream(&mut self, stream: Stream) {
        self.streams.borrow_mut().push_stream(stream);
    }

    /// Returns the current stream's name, or `None` after the last stream
    /// has ended.
    pub fn current_stream_name(&self) -> Option<Arc<String>> {
        self.streams.borrow().peek().map(Stream::shared_name)
    }

    /// Returns the current stream's 1-based line number.
    pub fn current_line_number(&self) -> Option<u32> {
        self.streams.borrow().current_line_number()
    }

    /// Enables or disables writing each emitted token to standard error.
    pub fn set_trace(&mut self, trace: bool) {
        self.trace = trace;
    }

    /// Reads the next token.  Returns `Ok(None)` exactly when every stacked
    /// stream has been read to its end.  An I/O failure from the underlying
    /// source is returned as-is; nothing is retried, and the failing stream
    /// stays on top of the stack so its name and line number can be
    /// inspected for diagnostics.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let c = match self.pending.take() {
                Some(c) => c,
                None => self.read_char()?,
            };

            let done = match self.state {
                State::EndOfLexer => true,
                State::Unknown => self.step_unknown(c),
                State::Illegal => self.step_illegal(c),
                State::Point => self.step_point(c),
                State::Float => self.step_float(c),
                State::Exponent => self.step_exponent(c),
                State::ExponentSign => self.step_exponent_sign(c),
                State::ExponentPower => self.step_exponent_power(c),
                State::Number => self.step_number(c),
                State::HexInteger0 => self.step_hex_integer_0(c),
                State::HexInteger1 => self.step_hex_integer_1(c),
                State::HexInteger => self.step_hex_integer(c),
                State::Identifier => self.step_identifier(c),
                State::Special => self.step_special(c),
                State::QuotedString => self.step_quoted_string(c)?,
                State::Delimiter => self.step_delimiter(c),
                State::Comment => self.step_comment(c),
                State::DelimComment => self.step_delim_comment(c),
                State::LineComment => self.step_line_comment(c),
                State::DelimSpace
                | State::DelimTab
                | State::DelimNewline
                | State::EndOfStream => unreachable!("emission state at loop top"),
            };
            if done {
                break;
            }
        }

        if self.state == State::EndOfLexer {
            // The state is sticky: every further call lands here.
            return Ok(None);
        }

        let lexeme = take(&mut self.lexeme);
        let (token_type, lexeme) = match self.state {
            State::DelimSpace => (TokenType::Space, String::from(" ")),
            State::DelimTab => (TokenType::Tab, String::from("\t")),
            State::DelimNewline => (TokenType::Newline, String::new()),
            State::EndOfStream => (TokenType::EndOfStream, String::new()),
            State::Number => (TokenType::Number, lexeme),
            State::QuotedString => (TokenType::String, lexeme),
            State::Illegal => (TokenType::Illegal, lexeme),
            State::Identifier => (
                self.kernel
                    .keyword_type(&lexeme)
                    .map(TokenType::User)
                    .unwrap_or(TokenType::Identifier),
                lexeme,
            ),
            State::Special => (TokenType::User(self.special_type), lexeme),
            // A delimiter lexeme that resolves to no table entry can only
            // come from a prefix that never completed; it is as unrecognized
            // as anything else.
            State::Delimiter => (
                self.kernel
                    .delimiter_type(&lexeme)
                    .map(TokenType::User)
                    .unwrap_or(TokenType::Illegal),
                lexeme,
            ),
            _ => unreachable!("transitional state at emission"),
        };

        let (stream_name, line_text, line_number) = match self.end_context.take() {
            Some(context) => context,
            None => self
                .streams
                .borrow()
                .peek()
                .map(Stream::token_context)
                .unwrap_or_default(),
        };
        let token = Token::new(stream_name, lexeme, line_text, line_number, token_type);
        self.state = State::Unknown;
        if self.trace {
            eprintln!("{token}");
        }
        Ok(Some(token))
    }

    fn read_char(&mut self) -> Result<Ch, LexError> {
        let mut streams = self.streams.borrow_mut();
        if streams.is_empty() {
            return Ok(Ch::LexerEnd);
        }
        Ok(match streams.read_char()? {
            Some(c) => Ch::Char(c),
            None => Ch::StreamEnd,
        })
    }

    // ---- Character classification under the kernel.

    fn is_point(&self, c: char) -> bool {
        c == self.kernel.decimal_separator()
    }

    fn is_exponent(c: char) -> bool {
        matches!(c, 'e' | 'E')
    }

    fn is_exponent_sign(c: char) -> bool {
        matches!(c, '+' | '-')
    }

    fn is_special_start(&self, c: char) -> bool {
        self.kernel.special_type(c).is_some()
    }

    fn is_string_start(&self, c: char) -> bool {
        self.kernel.string_end(c).is_some()
    }

    fn is_delimiter_start(&self, c: char) -> bool {
        self.kernel.is_delimiter_start(c)
    }

    /// Whitespace, special prefixes, string openers, and delimiter starts
    /// end the token being accumulated in most states.
    fn breaks_token(&self, c: char) -> bool {
        c.is_whitespace()
            || self.is_special_start(c)
            || self.is_string_start(c)
            || self.is_delimiter_start(c)
    }

    // ---- State transitions.

    /// Finishes the token: records `c` for the next call and breaks out with
    /// the machine left in `state`, which decides the token's type.
    fn break_as(&mut self, state: State, c: Ch) -> bool {
        self.state = state;
        self.pending = Some(c);
        true
    }

    /// Appends `c` and moves to `state`.
    fn shift(&mut self, state: State, c: char) -> bool {
        self.state = state;
        self.lexeme.push(c);
        false
    }

    fn save(&mut self, c: char) -> bool {
        self.lexeme.push(c);
        false
    }

    fn probe(&self, c: char) -> String {
        let mut probe = String::with_capacity(self.lexeme.len() + c.len_utf8());
        probe.push_str(&self.lexeme);
        probe.push(c);
        probe
    }

    // ---- Per-state handlers.  Each returns true when a token is finished.

    fn step_unknown(&mut self, c: Ch) -> bool {
        let c = match c {
            Ch::LexerEnd => {
                self.state = State::EndOfLexer;
                return true;
            }
            Ch::StreamEnd => {
                // The lexer, not the stack, pops a finished stream; dropping
                // it closes the source.
                let finished = self.streams.borrow_mut().pop();
                if self.kernel.emits(Emit::STREAM_BREAKS) {
                    self.end_context = finished.map(|stream| stream.token_context());
                    self.state = State::EndOfStream;
                    return true;
                }
                return false;
            }
            Ch::Char(c) => c,
        };

        if c == NEWLINE {
            if self.kernel.emits(Emit::NEWLINES) {
                self.state = State::DelimNewline;
                return true;
            }
            false
        } else if c == ' ' {
            if self.kernel.emits(Emit::SPACES) {
                self.state = State::DelimSpace;
                return true;
            }
            false
        } else if c == '\t' {
            if self.kernel.emits(Emit::TABS) {
                self.state = State::DelimTab;
                return true;
            }
            false
        } else if c.is_whitespace() {
            false
        } else if self.is_point(c) && self.is_delimiter_start(c) {
            self.shift(State::Point, c)
        } else if self.is_point(c) {
            self.shift(State::Float, c)
        } else if let Some(special_type) = self.kernel.special_type(c) {
            self.special_type = special_type;
            self.shift(State::Special, c)
        } else if let Some(string_end) = self.kernel.string_end(c) {
            // The opening quote is not part of the lexeme.
            self.string_end = string_end;
            self.state = State::QuotedString;
            false
        } else if self.is_delimiter_start(c) {
            self.shift(State::Delimiter, c)
        } else if c == '_' || c.is_alphabetic() {
            self.shift(State::Identifier, c)
        } else if c == '0' {
            self.shift(State::HexInteger0, c)
        } else if c.is_ascii_digit() {
            self.shift(State::Number, c)
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_illegal(&mut self, c: Ch) -> bool {
        match c {
            Ch::Char(c) if !self.breaks_token(c) => self.save(c),
            c => self.break_as(State::Illegal, c),
        }
    }

    fn step_point(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Delimiter, c);
        };
        if c.is_whitespace() || self.is_special_start(c) || self.is_string_start(c) {
            self.break_as(State::Delimiter, Ch::Char(c))
        } else if c.is_ascii_digit() {
            self.shift(State::Float, c)
        } else {
            // The separator was a delimiter start after all; try to extend
            // it like any delimiter lexeme.
            self.state = State::Delimiter;
            if self.kernel.is_delimiter(&self.probe(c)) {
                self.save(c)
            } else {
                self.pending = Some(Ch::Char(c));
                true
            }
        }
    }

    fn step_float(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Number, c);
        };
        if c.is_whitespace() {
            self.break_as(State::Number, Ch::Char(c))
        } else if Self::is_exponent(c) {
            self.shift(State::Exponent, c)
        } else if self.is_special_start(c) || self.is_string_start(c) {
            self.break_as(State::Number, Ch::Char(c))
        } else if c.is_ascii_digit() {
            self.save(c)
        } else if self.is_delimiter_start(c) {
            self.break_as(State::Number, Ch::Char(c))
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_exponent(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            // A trailing exponent marker is not a number.
            return self.break_as(State::Illegal, c);
        };
        if c.is_whitespace() {
            self.break_as(State::Illegal, Ch::Char(c))
        } else if Self::is_exponent_sign(c) {
            self.shift(State::ExponentSign, c)
        } else if self.breaks_token(c) {
            self.break_as(State::Illegal, Ch::Char(c))
        } else if c.is_ascii_digit() {
            self.shift(State::ExponentPower, c)
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_exponent_sign(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            // A signed exponent with no digits is not a number either.
            return self.break_as(State::Illegal, c);
        };
        if c.is_ascii_digit() {
            self.shift(State::ExponentPower, c)
        } else if c.is_whitespace() || self.breaks_token(c) {
            self.break_as(State::Illegal, Ch::Char(c))
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_exponent_power(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Number, c);
        };
        if c.is_whitespace() || self.is_special_start(c) || self.is_string_start(c) {
            self.break_as(State::Number, Ch::Char(c))
        } else if c.is_ascii_digit() {
            self.save(c)
        } else if self.is_delimiter_start(c) {
            self.break_as(State::Number, Ch::Char(c))
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_number(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Number, c);
        };
        if c.is_whitespace() {
            self.break_as(State::Number, Ch::Char(c))
        } else if self.is_point(c) {
            self.shift(State::Float, c)
        } else if Self::is_exponent(c) {
            self.shift(State::Exponent, c)
        } else if self.is_special_start(c) || self.is_string_start(c) || self.is_delimiter_start(c)
        {
            self.break_as(State::Number, Ch::Char(c))
        } else if c.is_ascii_digit() {
            self.save(c)
        } else if c.is_alphabetic() {
            // `9x234` is a number and then an identifier, not one illegal
            // token: the letter ends the number and starts the next lexeme.
            self.break_as(State::Number, Ch::Char(c))
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_hex_integer_0(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Number, c);
        };
        if c.is_whitespace() {
            self.break_as(State::Number, Ch::Char(c))
        } else if self.is_point(c) {
            self.shift(State::Float, c)
        } else if Self::is_exponent(c) {
            self.shift(State::Exponent, c)
        } else if self.is_special_start(c) || self.is_string_start(c) || self.is_delimiter_start(c)
        {
            self.break_as(State::Number, Ch::Char(c))
        } else if matches!(c, 'x' | 'X') {
            self.shift(State::HexInteger1, c)
        } else if c.is_ascii_digit() {
            self.shift(State::Number, c)
        } else {
            // `0` followed by any other letter is not a number prefix.
            self.shift(State::Illegal, c)
        }
    }

    fn step_hex_integer_1(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            // `0x` with nothing after it.
            return self.break_as(State::Illegal, c);
        };
        if c.is_whitespace() || self.is_point(c) || self.breaks_token(c) {
            self.break_as(State::Illegal, Ch::Char(c))
        } else if c.is_ascii_hexdigit() {
            self.shift(State::HexInteger, c)
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_hex_integer(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Number, c);
        };
        if c.is_whitespace() || self.is_special_start(c) || self.is_string_start(c)
            || self.is_delimiter_start(c)
        {
            self.break_as(State::Number, Ch::Char(c))
        } else if c.is_ascii_hexdigit() {
            self.save(c)
        } else {
            self.shift(State::Illegal, c)
        }
    }

    fn step_identifier(&mut self, c: Ch) -> bool {
        match c {
            Ch::Char(c) if !self.breaks_token(c) => {
                if c.is_alphabetic() || c.is_ascii_digit() || c == '_' {
                    self.save(c)
                } else {
                    self.shift(State::Illegal, c)
                }
            }
            c => self.break_as(State::Identifier, c),
        }
    }

    fn step_special(&mut self, c: Ch) -> bool {
        match c {
            Ch::Char(c) if !self.breaks_token(c) => {
                if c.is_alphabetic() || c.is_ascii_digit() {
                    self.save(c)
                } else {
                    self.shift(State::Illegal, c)
                }
            }
            c => self.break_as(State::Special, c),
        }
    }

    fn step_quoted_string(&mut self, c: Ch) -> Result<bool, LexError> {
        let Ch::Char(c) = c else {
            // The stream ended inside the string.
            return Ok(self.break_as(State::Illegal, c));
        };
        if c == NEWLINE {
            return Ok(self.break_as(State::Illegal, Ch::Char(c)));
        }
        if c == self.string_end {
            // Done; the closing quote is not part of the lexeme.
            return Ok(true);
        }
        if c != '\\' {
            self.save(c);
            return Ok(false);
        }

        // Escape processing.  The escaped character is read directly; it
        // cannot be a pending delimiter break.
        match self.read_char()? {
            Ch::Char(c) if c == self.string_end => {
                self.save(c);
            }
            Ch::Char('\\') => {
                self.save('\\');
            }
            Ch::Char('0') => {
                self.save('\0');
            }
            Ch::Char('b') => {
                self.save('\u{0008}');
            }
            Ch::Char('t') => {
                self.save('\t');
            }
            Ch::Char('n') => {
                self.save('\n');
            }
            Ch::Char('f') => {
                self.save('\u{000C}');
            }
            Ch::Char('r') => {
                self.save('\r');
            }
            Ch::Char('/') => {
                self.save('/');
            }
            Ch::Char('u') => return self.hex_escape(4),
            Ch::Char('x') => return self.hex_escape(2),
            // Unrecognized escapes contribute nothing to the lexeme.
            _ => (),
        }
        Ok(false)
    }

    /// Decodes a fixed-width hexadecimal escape (`\uXXXX` or `\xXX`).  A
    /// non-hex digit turns the whole token illegal, re-feeding the offender.
    fn hex_escape(&mut self, digits: u32) -> Result<bool, LexError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            match self.read_char()? {
                Ch::Char(c) if c.is_ascii_hexdigit() => {
                    value = value * 16 + c.to_digit(16).unwrap();
                }
                other => return Ok(self.break_as(State::Illegal, other)),
            }
        }
        // A 16-bit escape can name an unpaired surrogate, which is not a
        // scalar value.
        self.lexeme
            .push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
        Ok(false)
    }

    fn step_delimiter(&mut self, c: Ch) -> bool {
        let Ch::Char(c) = c else {
            return self.break_as(State::Delimiter, c);
        };
        let probe = self.probe(c);
        if self.kernel.is_comment_start(&probe) {
            self.lexeme.clear();
            self.state = State::Comment;
            false
        } else if self.kernel.is_line_comment(&probe) {
            self.lexeme.clear();
            self.state = State::LineComment;
            false
        } else if self.kernel.is_delimiter(&probe) {
            self.save(c)
        } else {
            self.break_as(State::Delimiter, Ch::Char(c))
        }
    }

    fn step_comment(&mut self, c: Ch) -> bool {
        match c {
            // Let the dispatch state see the stream end and pop.
            Ch::StreamEnd | Ch::LexerEnd => {
                self.lexeme.clear();
                self.state = State::Unknown;
            }
            Ch::Char(c) => {
                if self.kernel.is_comment_end(&self.lexeme) {
                    self.lexeme.clear();
                    self.state = State::Unknown;
                } else if self.kernel.is_end_comment_delimiter_start(c) {
                    self.shift(State::DelimComment, c);
                }
                // Everything else is comment content, discarded.
            }
        }
        false
    }

    fn step_delim_comment(&mut self, c: Ch) -> bool {
        match c {
            Ch::StreamEnd | Ch::LexerEnd => {
                self.lexeme.clear();
                self.state = State::Comment;
            }
            Ch::Char(c) => {
                if self.kernel.is_comment_end(&self.probe(c)) {
                    // The full ender; the comment is over.
                    self.lexeme.clear();
                    self.state = State::Unknown;
                } else if c.is_whitespace() {
                    // Candidate dropped.
                    self.lexeme.clear();
                    self.state = State::Comment;
                } else {
                    // Restart the candidate at this character.
                    self.lexeme.clear();
                    self.save(c);
                }
            }
        }
        false
    }

    fn step_line_comment(&mut self, c: Ch) -> bool {
        match c {
            Ch::StreamEnd | Ch::LexerEnd => {
                self.lexeme.clear();
                self.state = State::Unknown;
            }
            Ch::Char(NEWLINE) => {
                self.lexeme.clear();
                self.state = State::Unknown;
            }
            Ch::Char(_) => (),
        }
        false
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        Lexer::next_token(self)
    }
}
