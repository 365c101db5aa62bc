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

//! Lexical analysis.
//!
//! Tokenization happens in two cooperating layers.  The lower layer is
//! [`Lexer`], a deterministic state machine that pulls characters from a
//! [`ReaderStack`] and groups them into [`Token`]s under the rules of a
//! frozen [`LexerKernel`].  The upper layer is [`CommonLexer`], which wraps a
//! `Lexer` and gives it a C-flavored preprocessor: `#include` pushes a new
//! source onto the reader stack mid-lex, `#define` installs token macros
//! that are expanded through a pushback stack, and `#ifdef`/`#ifndef`/
//! `#endif` filter the token stream.
//!
//! Both layers implement [`TokenSource`], so a parser can be written against
//! either without caring whether preprocessing is in effect.

pub mod kernel;
pub mod lexer;
pub mod preprocessor;
pub mod reader;
pub mod token;

pub use kernel::{Emit, KernelBuilder, LexerKernel};
pub use lexer::Lexer;
pub use preprocessor::{
    CommonLexer, DirectiveError, FileResolver, IncludeResolver, PREPROCESSOR_DIRECTIVE,
};
pub use reader::{ReaderStack, Stream};
pub use token::{Token, TokenType};

use std::io::Error as IoError;
use thiserror::Error as ThisError;

/// An error from [`TokenSource::next_token`].
///
/// Lexical illegality is *not* an error: unrecognized input is materialized
/// as a token of type [`TokenType::Illegal`] and the caller decides whether
/// to continue.
#[derive(Debug, ThisError)]
pub enum LexError {
    /// The underlying character source failed.  Nothing is retried.
    #[error(transparent)]
    Io(#[from] IoError),

    /// A preprocessor directive failed.  These are fatal and carry the name
    /// and line number of the stream being read when the failure occurred.
    #[error("({stream}) Line {line}: {error}")]
    Directive {
        stream: String,
        line: u32,
        #[source]
        error: DirectiveError,
    },
}

/// A pull-based producer of tokens.
///
/// `Ok(None)` means the token stream is over: every source has been read to
/// its end.  It is not an error to call `next_token` again afterwards; the
/// call keeps returning `Ok(None)`.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<Token>, LexError>;
}
