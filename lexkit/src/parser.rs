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

//! A base for recursive-descent parsers.
//!
//! [`Parser`] holds the single token of lookahead and the accumulated error
//! list that every hand-written top-down parser needs; the grammar itself is
//! yours.  It runs over any [`TokenSource`], so the same productions work
//! with or without the preprocessor in between.
//!
//! ```
//! use lexkit::lex::{KernelBuilder, Lexer, TokenType};
//! use lexkit::parser::Parser;
//! use std::sync::Arc;
//!
//! let kernel = Arc::new(KernelBuilder::new().delimiter("+", 0).build());
//! let lexer = Lexer::for_string(&kernel, None, "1 + 2");
//! let mut parser = Parser::new(lexer);
//! parser.next_token().unwrap();
//! assert!(parser.match_type(TokenType::Number).unwrap());
//! assert!(parser.current_type(&[TokenType::User(0)]));
//! ```

use thiserror::Error as ThisError;

use crate::lex::{LexError, Token, TokenSource, TokenType};

/// A fatal parsing failure: the token source broke underneath the parser.
///
/// Grammar-level problems are not errors at this layer; record them with
/// [`Parser::add_error`] and carry on.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ParserError {
    message: String,
    #[source]
    source: LexError,
}

/// Token lookahead and error accumulation.
pub struct Parser<S: TokenSource> {
    source: S,
    token: Option<Token>,
    errors: Vec<String>,
}

impl<S: TokenSource> Parser<S> {
    /// Creates a parser over `source`.  No token is read yet; call
    /// [`next_token`](Parser::next_token) to prime the lookahead.
    pub fn new(source: S) -> Self {
        Self {
            source,
            token: None,
            errors: Vec::new(),
        }
    }

    /// Returns the token read by the last [`next_token`](Parser::next_token)
    /// call, or `None` before the first call and after the source ends.
    pub fn current_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// If the current token has type `token_type`, consumes it and returns
    /// true; otherwise leaves it and returns false.
    pub fn match_type(&mut self, token_type: TokenType) -> Result<bool, ParserError> {
        if self.current_type(&[token_type]) {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Returns whether the current token has any of the given types.  Does
    /// not advance.
    pub fn current_type(&self, token_types: &[TokenType]) -> bool {
        match &self.token {
            Some(token) => token_types.contains(&token.token_type()),
            None => false,
        }
    }

    /// Advances to the next token.  `current_token` becomes `None` at the
    /// end of the source.  A failure of the source is fatal: it is recorded
    /// on the error list and returned.
    pub fn next_token(&mut self) -> Result<(), ParserError> {
        match self.source.next_token() {
            Ok(token) => {
                self.token = token;
                Ok(())
            }
            Err(error) => {
                let message = error.to_string();
                self.add_error(&message);
                Err(ParserError {
                    message,
                    source: error,
                })
            }
        }
    }

    /// Records a user-level error message with the current token's context.
    pub fn add_error(&mut self, message: &str) {
        let error = match &self.token {
            None => format!("(STREAM END) {message}"),
            Some(token) => format!(
                "({}) Line {}, Token \"{}\": {}",
                token.stream_name(),
                token.line_number(),
                token.lexeme(),
                message
            ),
        };
        self.errors.push(error);
    }

    /// Returns every recorded error message, oldest first.
    pub fn error_messages(&self) -> &[String] {
        &self.errors
    }
}
