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

//! # lexkit
//!
//! A toolkit for breaking streams of characters into tokens, built around a
//! table-driven state machine rather than generated code or regular
//! expressions.  The pieces compose bottom-up:
//!
//! - [`lex::reader`] stacks named character sources so that the input can be
//!   swapped or extended mid-lex (the mechanism behind `#include`).
//! - [`lex::kernel`] holds the frozen scanning configuration: delimiters,
//!   comment markers, string quotes, special prefixes, and keywords.
//! - [`lex::lexer`] runs the state machine and produces [`lex::Token`]s one
//!   at a time, on demand.
//! - [`lex::preprocessor`] layers C-style directives (`#include`, `#define`,
//!   `#undefine`, `#ifdef`, `#ifndef`, `#endif`) and macro expansion over
//!   any lexer.
//! - [`parser`] is a small base for hand-written recursive-descent parsers.
//! - [`path`] is a separate utility: Apache-style path patterns with `*`,
//!   `?`, and `**` wildcards, compiled once and matched many times.
//!
//! A minimal use looks like:
//!
//! ```
//! use lexkit::lex::{KernelBuilder, Lexer, TokenType};
//! use std::sync::Arc;
//!
//! let kernel = Arc::new(KernelBuilder::new().delimiter("+", 0).build());
//! let mut lexer = Lexer::for_string(&kernel, None, "12 + 34");
//! let token = lexer.next_token().unwrap().unwrap();
//! assert_eq!(token.token_type(), TokenType::Number);
//! assert_eq!(token.lexeme(), "12");
//! ```

pub mod lex;
pub mod parser;
pub mod path;
