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

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// The type of a [`Token`].
///
/// The reserved types occupy the negative integer space of the external
/// type-code API (see [`TokenType::code`]); user-assigned types (delimiters,
/// keywords, comment markers, special prefixes) occupy the non-negative
/// space.  End-of-lexer is deliberately absent: it is signalled by
/// [`next_token`](super::TokenSource::next_token) returning `Ok(None)`, never
/// by a token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// One source stream ended.  Emitted only when the kernel enables
    /// stream-break tokens.
    EndOfStream,

    /// Integer, floating-point, hexadecimal, or exponent-notation number.
    Number,

    /// A single space.  Emitted only when the kernel enables space tokens.
    Space,

    /// A single tab.  Emitted only when the kernel enables tab tokens.
    Tab,

    /// A line break.  Emitted only when the kernel enables newline tokens.
    Newline,

    /// An identifier that matched no keyword table.
    Identifier,

    /// An unrecognized lexeme.  Not an error; the caller chooses whether to
    /// treat it as one.
    Illegal,

    /// A quoted string, escapes decoded and quotes stripped.
    String,

    /// A user-assigned type.
    User(u32),
}

impl TokenType {
    /// Returns the integer type code for this type.
    ///
    /// Reserved types map to fixed negative values and user types to their
    /// non-negative assignment, so the two spaces never collide.  This is the
    /// only place the reserved values appear; match on the enum instead
    /// wherever possible.
    pub fn code(self) -> i32 {
        match self {
            Self::EndOfStream => -2,
            Self::Number => -3,
            Self::Space => -4,
            Self::Tab => -5,
            Self::Newline => -6,
            Self::Identifier => -10,
            Self::Illegal => -12,
            Self::String => -15,
            Self::User(n) => n as i32,
        }
    }

    /// Returns the user-assigned type number, if this is a user type.
    pub fn as_user(self) -> Option<u32> {
        match self {
            Self::User(n) => Some(n),
            _ => None,
        }
    }
}

/// One token read from a stream.
///
/// Tokens are immutable once made.  Besides its lexeme and type, a token
/// remembers where it came from: the name of the stream, the 1-based line
/// number, and the text of the containing physical line, for diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    stream_name: Arc<String>,
    lexeme: String,
    line_text: Arc<String>,
    line_number: u32,
    token_type: TokenType,
}

impl Token {
    /// Creates a token.  Lexers normally do this; it is public so that
    /// custom token sources can mint their own.
    pub fn new(
        stream_name: Arc<String>,
        lexeme: String,
        line_text: Arc<String>,
        line_number: u32,
        token_type: TokenType,
    ) -> Self {
        Self {
            stream_name,
            lexeme,
            line_text,
            line_number,
            token_type,
        }
    }

    /// Returns the name of the stream this token was read from.
    pub fn stream_name(&self) -> &str {
        &self.stream_name
    }

    /// Returns the token's payload.  For string tokens the quotes are
    /// stripped and escapes are decoded; for everything else this is the raw
    /// matched text.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Returns the physical line this token appeared on, without its line
    /// terminator.
    pub fn line_text(&self) -> &str {
        self.line_text.strip_newline()
    }

    /// Returns the 1-based line number this token appeared on.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Returns the token's type.
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub(crate) fn set_type(&mut self, token_type: TokenType) {
        self.token_type = token_type;
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "TOKEN ({}) id: {}\t Line: {}\tLexeme: {}",
            self.stream_name,
            self.token_type.code(),
            self.line_number,
            self.lexeme
        )
    }
}

pub(crate) trait StripNewline {
    fn strip_newline(&self) -> &str;
}

impl StripNewline for str {
    fn strip_newline(&self) -> &str {
        self.strip_suffix("\r\n")
            .unwrap_or(self.strip_suffix('\n').unwrap_or(self))
    }
}
