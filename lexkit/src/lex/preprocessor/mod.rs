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

//! A C-flavored preprocessor over any lexer.
//!
//! [`CommonLexer`] wraps a [`Lexer`] and recognizes a small directive set:
//! `#include`, `#define`, `#undefine`, `#ifdef`, `#ifndef`, and `#endif`.
//! Directives arrive from the underlying lexer as single tokens because the
//! kernel registers `#` as a special prefix (see
//! [`KernelBuilder::preprocessor`](super::KernelBuilder::preprocessor)); the
//! newline tokens that terminate directive lines are consumed here and never
//! reach the caller.
//!
//! Macros are zero-argument token-vector substitutions.  An expanded macro's
//! tokens are pushed onto an internal stack in reverse, so they come back
//! out in source order, and each is re-examined for further expansion: two
//! macros may refer to each other, and only a macro that names itself inside
//! its own `#define` is rejected.

use std::collections::HashMap;
use std::io::{BufRead, Cursor, Error as IoError, Result as IoResult};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error as ThisError;

use super::kernel::{Emit, LexerKernel};
use super::lexer::Lexer;
use super::reader::Stream;
use super::token::{Token, TokenType};
use super::{LexError, TokenSource};


/// The user type assigned to `#`-prefixed directive tokens.
pub const PREPROCESSOR_DIRECTIVE: u32 = 0x7fff_ffff;

/// An error from the directive layer.  These are fatal: the token stream is
/// not in a recoverable state afterwards.
#[derive(Debug, ThisError)]
pub enum DirectiveError {
    #[error("Unknown directive '{0}'.")]
    UnknownDirective(String),

    #[error("Include directive: Expected string token describing a resource path.")]
    IncludeExpectedString,

    #[error("Include directive: Resource named '{path}' could not be found.")]
    IncludeFailed {
        path: String,
        #[source]
        error: IoError,
    },

    #[error("Define directive: Expected identifier.")]
    DefineExpectedIdentifier,

    #[error("Define directive: Unfinished declaration '{0}'.")]
    UnfinishedDefine(String),

    #[error("Define directive: Attempted to create recursive definition '{0}'.")]
    RecursiveDefine(String),

    #[error("Undefine directive: Expected identifier.")]
    UndefineExpectedIdentifier,

    #[error("Ifdef directive: Expected identifier.")]
    IfdefExpectedIdentifier,

    #[error("Ifndef directive: Expected identifier.")]
    IfndefExpectedIdentifier,

    #[error("Endif directive: No previous \"if\" directive.")]
    EndifWithoutIf,
}

/// Resolves `#include` paths to open character sources.
///
/// The preprocessor never touches the filesystem itself; it hands the quoted
/// path and the name of the including stream to its resolver and pushes
/// whatever stream comes back.  Supply your own to include from archives,
/// memory, or anywhere else.
pub trait IncludeResolver {
    /// Opens the source named by `include_path`, found in an `#include`
    /// inside the stream named `current_stream`.
    fn resolve(&self, current_stream: &str, include_path: &str) -> IoResult<Stream>;
}

/// The default resolver: if `include_path` exists relative to the directory
/// of the including stream's name, that file is used; otherwise
/// `include_path` is opened verbatim.  Files are decoded with charset
/// detection.
pub struct FileResolver;

impl IncludeResolver for FileResolver {
    fn resolve(&self, current_stream: &str, include_path: &str) -> IoResult<Stream> {
        if let Some(parent) = Path::new(current_stream).parent() {
            let nested = parent.join(include_path);
            if nested.exists() {
                return Stream::for_file(nested, None);
            }
        }
        Stream::for_file(include_path, None)
    }
}

/// A [`Lexer`] with a preprocessor.
///
/// The wrapped kernel must register `#` as a special prefix with type
/// [`PREPROCESSOR_DIRECTIVE`] and must emit newline tokens; start from
/// [`KernelBuilder::preprocessor`](super::KernelBuilder::preprocessor) to
/// get both.
pub struct CommonLexer {
    lexer: Lexer,
    /// Macro name to replacement tokens.  Names are case-sensitive.
    macros: HashMap<String, Vec<Token>>,
    /// Expanded tokens waiting to be re-examined and returned.
    pushback: Vec<Token>,
    /// Conditional-inclusion state; the top decides, empty means include.
    if_stack: Vec<bool>,
    resolver: Box<dyn IncludeResolver>,
}

impl CommonLexer {
    /// Creates a preprocessing lexer over in-memory text.
    pub fn for_string(kernel: &Arc<LexerKernel>, name: Option<&str>, text: &str) -> Self {
        Self::for_source(
            kernel,
            name,
            Box::new(Cursor::new(text.as_bytes().to_vec())),
        )
    }

    /// Creates a preprocessing lexer over any buffered source.
    pub fn for_source(
        kernel: &Arc<LexerKernel>,
        name: Option<&str>,
        source: Box<dyn BufRead>,
    ) -> Self {
        Self::with_lexer(Lexer::for_source(kernel, name, source))
    }

    /// Wraps an existing lexer.
    pub fn with_lexer(lexer: Lexer) -> Self {
        debug_assert!(
            lexer.kernel().emits(Emit::NEWLINES)
                && lexer.kernel().special_type('#') == Some(PREPROCESSOR_DIRECTIVE),
            "CommonLexer needs a kernel built from KernelBuilder::preprocessor()"
        );
        Self {
            lexer,
            macros: HashMap::new(),
            pushback: Vec::new(),
            if_stack: Vec::new(),
            resolver: Box::new(FileResolver),
        }
    }

    /// Replaces the `#include` resolver.
    pub fn set_resolver(&mut self, resolver: Box<dyn IncludeResolver>) {
        self.resolver = resolver;
    }

    /// Returns the wrapped lexer.
    pub fn lexer_mut(&mut self) -> &mut Lexer {
        &mut self.lexer
    }

    /// Defines a macro, replacing any previous definition of `name`.
    pub fn define(&mut self, name: impl Into<String>, tokens: Vec<Token>) {
        self.macros.insert(name.into(), tokens);
    }

    /// Removes a macro definition.  Returns whether one existed.
    pub fn undefine(&mut self, name: &str) -> bool {
        self.macros.remove(name).is_some()
    }

    /// Returns whether `name` is currently defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Reads the next fully preprocessed token.
    ///
    /// Newline tokens are consumed internally; tokens inside a false
    /// `#ifdef`/`#ifndef` branch are dropped; macro references are replaced
    /// by their expansions.  Directive failures are fatal errors carrying
    /// the current stream name and line number.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let token = match self.pushback.pop() {
                Some(token) => token,
                None => match self.lexer.next_token()? {
                    Some(token) => token,
                    None => return Ok(None),
                },
            };

            // Directive lines end in a newline; nobody else sees them.
            if token.token_type() == TokenType::Newline {
                continue;
            }

            if token.token_type() != TokenType::User(PREPROCESSOR_DIRECTIVE) {
                if !self.if_check() {
                    continue;
                }
                if token.token_type() == TokenType::Identifier {
                    if let Some(expansion) = self.macros.get(token.lexeme()) {
                        // Reverse push; the first expansion token pops first.
                        for replacement in expansion.iter().rev() {
                            self.pushback.push(replacement.clone());
                        }
                        continue;
                    }
                }
                return Ok(Some(token));
            }

            match token.lexeme() {
                "#include" => {
                    if self.if_check() {
                        self.directive_include()?;
                    }
                }
                "#define" => {
                    if self.if_check() {
                        self.directive_define()?;
                    }
                }
                "#undefine" => {
                    if self.if_check() {
                        self.directive_undefine()?;
                    }
                }
                // The conditional directives run even inside a false branch:
                // inner pushes still count and `#endif` always pops.
                "#ifdef" => self.directive_ifdef(false)?,
                "#ifndef" => self.directive_ifdef(true)?,
                "#endif" => {
                    if self.if_stack.pop().is_none() {
                        return Err(self.error(DirectiveError::EndifWithoutIf));
                    }
                }
                other => {
                    return Err(self.error(DirectiveError::UnknownDirective(String::from(other))))
                }
            }
        }
    }

    /// Empty stack means include; otherwise the topmost `if` decides.
    fn if_check(&self) -> bool {
        self.if_stack.last().copied().unwrap_or(true)
    }

    /// Directive arguments come straight from the underlying lexer, never
    /// from the pushback stack.
    fn pull(&mut self) -> Result<Option<Token>, LexError> {
        self.lexer.next_token()
    }

    fn directive_include(&mut self) -> Result<(), LexError> {
        match self.pull()? {
            Some(token) if token.token_type() == TokenType::String => {
                let current = self
                    .lexer
                    .current_stream_name()
                    .unwrap_or_default();
                let stream = self
                    .resolver
                    .resolve(&current, token.lexeme())
                    .map_err(|error| {
                        self.error(DirectiveError::IncludeFailed {
                            path: String::from(token.lexeme()),
                            error,
                        })
                    })?;
                self.lexer.push_stream(stream);
                Ok(())
            }
            _ => Err(self.error(DirectiveError::IncludeExpectedString)),
        }
    }

    fn directive_define(&mut self) -> Result<(), LexError> {
        let name = match self.pull()? {
            Some(token) if token.token_type() == TokenType::Identifier => {
                String::from(token.lexeme())
            }
            _ => return Err(self.error(DirectiveError::DefineExpectedIdentifier)),
        };

        let mut body = Vec::new();
        let mut next = self.pull()?;
        if next.is_none() {
            return Err(self.error(DirectiveError::UnfinishedDefine(name)));
        }
        while let Some(token) = next {
            if token.token_type() == TokenType::Newline {
                break;
            }
            if token.lexeme() == name {
                return Err(self.error(DirectiveError::RecursiveDefine(name)));
            }
            body.push(token);
            next = self.pull()?;
        }
        self.macros.insert(name, body);
        Ok(())
    }

    fn directive_undefine(&mut self) -> Result<(), LexError> {
        match self.pull()? {
            Some(token) if token.token_type() == TokenType::Identifier => {
                self.macros.remove(token.lexeme());
                Ok(())
            }
            _ => Err(self.error(DirectiveError::UndefineExpectedIdentifier)),
        }
    }

    fn directive_ifdef(&mut self, negate: bool) -> Result<(), LexError> {
        match self.pull()? {
            Some(token) if token.token_type() == TokenType::Identifier => {
                let defined = self.macros.contains_key(token.lexeme());
                self.if_stack.push(defined != negate);
                Ok(())
            }
            _ => Err(self.error(if negate {
                DirectiveError::IfndefExpectedIdentifier
            } else {
                DirectiveError::IfdefExpectedIdentifier
            })),
        }
    }

    fn error(&self, error: DirectiveError) -> LexError {
        LexError::Directive {
            stream: self
                .lexer
                .current_stream_name()
                .map(|name| name.to_string())
                .unwrap_or_else(|| String::from("LEXER END")),
            line: self.lexer.current_line_number().unwrap_or(0),
            error,
        }
    }
}

impl TokenSource for CommonLexer {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        CommonLexer::next_token(self)
    }
}
