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

//! Scanning configuration.
//!
//! A [`LexerKernel`] is everything a [`Lexer`](super::Lexer) needs to know
//! about the language being tokenized, separated from the scanning state so
//! that one kernel can drive any number of lexers.  Kernels are assembled
//! with a [`KernelBuilder`] and immutable afterwards; share one between
//! lexers with [`Arc`](std::sync::Arc).

use std::collections::HashMap;

use bitflags::bitflags;
use unicase::UniCase;

use super::preprocessor::PREPROCESSOR_DIRECTIVE;

bitflags! {
    /// Which whitespace and boundary tokens a lexer emits.
    ///
    /// Anything not enabled here is consumed silently between tokens.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Emit: u8 {
        /// Emit a [`Space`](super::TokenType::Space) token per space.
        const SPACES = 1;
        /// Emit a [`Tab`](super::TokenType::Tab) token per tab.
        const TABS = 1 << 1;
        /// Emit a [`Newline`](super::TokenType::Newline) token per line break.
        const NEWLINES = 1 << 2;
        /// Emit an [`EndOfStream`](super::TokenType::EndOfStream) token when
        /// a stacked source runs out.
        const STREAM_BREAKS = 1 << 3;
    }
}

/// The frozen scanning configuration for a family of lexers.
///
/// Scanning precedence is fixed: special prefixes beat string delimiters,
/// string delimiters beat plain delimiters, and delimiters beat everything
/// else.  When a finished delimiter lexeme is typed, comment tables are
/// consulted before the plain delimiter table; when a finished identifier is
/// typed, the case-sensitive keyword table is consulted before the
/// case-insensitive one.
#[derive(Clone, Debug)]
pub struct LexerKernel {
    /// Characters that can begin a delimiter, sorted for probing.
    delim_start: Vec<char>,
    /// Characters that can begin a block-comment-ending delimiter, sorted.
    end_comment_delim_start: Vec<char>,
    delim_table: HashMap<String, u32>,
    comment_start_table: HashMap<String, u32>,
    comment_line_table: HashMap<String, u32>,
    comment_end_table: HashMap<String, u32>,
    keyword_table: HashMap<String, u32>,
    case_insensitive_keyword_table: HashMap<UniCase<String>, u32>,
    string_delim_table: HashMap<char, char>,
    special_delim_table: HashMap<char, u32>,
    emit: Emit,
    decimal_separator: char,
}

impl LexerKernel {
    /// Returns whether `c` can begin a delimiter lexeme.
    pub fn is_delimiter_start(&self, c: char) -> bool {
        self.delim_start.binary_search(&c).is_ok()
    }

    /// Returns whether `c` can begin a block-comment-ending delimiter.
    pub fn is_end_comment_delimiter_start(&self, c: char) -> bool {
        self.end_comment_delim_start.binary_search(&c).is_ok()
    }

    /// Returns whether `lexeme` is a complete delimiter, comment-starting
    /// delimiter, or line-comment delimiter.
    pub fn is_delimiter(&self, lexeme: &str) -> bool {
        self.delim_table.contains_key(lexeme)
    }

    pub fn is_comment_start(&self, lexeme: &str) -> bool {
        self.comment_start_table.contains_key(lexeme)
    }

    pub fn is_comment_end(&self, lexeme: &str) -> bool {
        self.comment_end_table.contains_key(lexeme)
    }

    pub fn is_line_comment(&self, lexeme: &str) -> bool {
        self.comment_line_table.contains_key(lexeme)
    }

    /// Resolves the user type of a finished delimiter lexeme.  Comment
    /// delimiters are also plain delimiters, so the comment tables take
    /// precedence: start, then end, then line, then plain.
    pub fn delimiter_type(&self, lexeme: &str) -> Option<u32> {
        self.comment_start_table
            .get(lexeme)
            .or_else(|| self.comment_end_table.get(lexeme))
            .or_else(|| self.comment_line_table.get(lexeme))
            .or_else(|| self.delim_table.get(lexeme))
            .copied()
    }

    /// Resolves the user type of a finished identifier lexeme, consulting
    /// the case-sensitive keyword table first.
    pub fn keyword_type(&self, lexeme: &str) -> Option<u32> {
        self.keyword_table
            .get(lexeme)
            .copied()
            .or_else(|| {
                self.case_insensitive_keyword_table
                    .get(&UniCase::new(String::from(lexeme)))
                    .copied()
            })
    }

    /// Returns the closing character for a string opened by `c`, if `c`
    /// starts a string.
    pub fn string_end(&self, c: char) -> Option<char> {
        self.string_delim_table.get(&c).copied()
    }

    /// Returns the user type claimed by special-prefix character `c`, if
    /// `c` is one.
    pub fn special_type(&self, c: char) -> Option<u32> {
        self.special_delim_table.get(&c).copied()
    }

    /// Returns whether every flag in `flags` is enabled.
    pub fn emits(&self, flags: Emit) -> bool {
        self.emit.contains(flags)
    }

    /// Returns the decimal separator, `.` unless reconfigured.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }
}

/// Builds a [`LexerKernel`].
///
/// ```
/// use lexkit::lex::{Emit, KernelBuilder};
///
/// let kernel = KernelBuilder::new()
///     .delimiter("{", 0)
///     .delimiter("}", 1)
///     .comment_start("/*", 2)
///     .comment_end("*/", 3)
///     .line_comment("//", 4)
///     .string_delimiters('"', '"')
///     .keyword("while", 5)
///     .emit(Emit::NEWLINES)
///     .build();
/// assert!(kernel.is_delimiter_start('/'));
/// ```
#[derive(Clone, Debug)]
pub struct KernelBuilder {
    kernel: LexerKernel,
}

impl KernelBuilder {
    /// Starts an empty kernel: no delimiters, no keywords, whitespace
    /// consumed silently, `.` as the decimal separator.
    pub fn new() -> Self {
        Self {
            kernel: LexerKernel {
                delim_start: Vec::new(),
                end_comment_delim_start: Vec::new(),
                delim_table: HashMap::new(),
                comment_start_table: HashMap::new(),
                comment_line_table: HashMap::new(),
                comment_end_table: HashMap::new(),
                keyword_table: HashMap::new(),
                case_insensitive_keyword_table: HashMap::new(),
                string_delim_table: HashMap::new(),
                special_delim_table: HashMap::new(),
                emit: Emit::empty(),
                decimal_separator: '.',
            },
        }
    }

    /// Starts a kernel preconfigured for the preprocessor layer: `#` is
    /// registered as a special prefix with type [`PREPROCESSOR_DIRECTIVE`]
    /// so that `#include` and friends arrive as single tokens, and newline
    /// tokens are enabled because they terminate directive lines.
    ///
    /// [`CommonLexer`](super::CommonLexer) requires a kernel built from
    /// here.
    pub fn preprocessor() -> Self {
        Self::new()
            .special_prefix('#', PREPROCESSOR_DIRECTIVE)
            .emit(Emit::NEWLINES)
    }

    /// Adds a delimiter lexeme with its user type.
    ///
    /// # Panics
    ///
    /// Panics if `delimiter` is empty.
    pub fn delimiter(mut self, delimiter: &str, token_type: u32) -> Self {
        self.add_delimiter(delimiter, token_type);
        self
    }

    /// Adds a block-comment-starting delimiter.  It is also registered as a
    /// plain delimiter so the delimiter machine can discover it.
    pub fn comment_start(mut self, delimiter: &str, token_type: u32) -> Self {
        self.add_delimiter(delimiter, token_type);
        self.kernel
            .comment_start_table
            .insert(String::from(delimiter), token_type);
        self
    }

    /// Adds a block-comment-ending delimiter.  Also a plain delimiter.
    pub fn comment_end(mut self, delimiter: &str, token_type: u32) -> Self {
        self.add_delimiter(delimiter, token_type);
        insert_sorted(
            &mut self.kernel.end_comment_delim_start,
            first_char(delimiter),
        );
        self.kernel
            .comment_end_table
            .insert(String::from(delimiter), token_type);
        self
    }

    /// Adds a line-comment delimiter.  Also a plain delimiter.
    pub fn line_comment(mut self, delimiter: &str, token_type: u32) -> Self {
        self.add_delimiter(delimiter, token_type);
        self.kernel
            .comment_line_table
            .insert(String::from(delimiter), token_type);
        self
    }

    /// Adds a string delimiter pair: `start` opens a string that `end`
    /// closes.
    pub fn string_delimiters(mut self, start: char, end: char) -> Self {
        self.kernel.string_delim_table.insert(start, end);
        self
    }

    /// Adds a special prefix: a character that claims the whole contiguous
    /// run it begins as one token of `token_type`.  Special prefixes take
    /// precedence over string and plain delimiters.
    pub fn special_prefix(mut self, prefix: char, token_type: u32) -> Self {
        self.kernel.special_delim_table.insert(prefix, token_type);
        self
    }

    /// Adds a case-sensitive keyword.  An identifier equal to `keyword`
    /// takes `token_type` instead of [`Identifier`](super::TokenType::Identifier).
    ///
    /// # Panics
    ///
    /// Panics if `keyword` is empty.
    pub fn keyword(mut self, keyword: &str, token_type: u32) -> Self {
        assert!(!keyword.is_empty(), "keyword cannot be empty");
        self.kernel
            .keyword_table
            .insert(String::from(keyword), token_type);
        self
    }

    /// Adds a case-insensitive keyword.  Case-sensitive keywords win over
    /// these.
    ///
    /// # Panics
    ///
    /// Panics if `keyword` is empty.
    pub fn keyword_ignore_case(mut self, keyword: &str, token_type: u32) -> Self {
        assert!(!keyword.is_empty(), "keyword cannot be empty");
        self.kernel
            .case_insensitive_keyword_table
            .insert(UniCase::new(String::from(keyword)), token_type);
        self
    }

    /// Enables emission of the whitespace or boundary tokens in `flags`, in
    /// addition to any already enabled.
    pub fn emit(mut self, flags: Emit) -> Self {
        self.kernel.emit |= flags;
        self
    }

    /// Sets the decimal separator consulted by the number states.
    pub fn decimal_separator(mut self, c: char) -> Self {
        self.kernel.decimal_separator = c;
        self
    }

    /// Freezes the configuration.
    pub fn build(self) -> LexerKernel {
        self.kernel
    }

    fn add_delimiter(&mut self, delimiter: &str, token_type: u32) {
        insert_sorted(&mut self.kernel.delim_start, first_char(delimiter));
        self.kernel
            .delim_table
            .insert(String::from(delimiter), token_type);
    }
}

impl Default for KernelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn first_char(delimiter: &str) -> char {
    delimiter
        .chars()
        .next()
        .expect("delimiter cannot be empty")
}

fn insert_sorted(table: &mut Vec<char>, c: char) {
    if let Err(index) = table.binary_search(&c) {
        table.insert(index, c);
    }
}

#[cfg(test)]
mod test {
    use super::{Emit, KernelBuilder};

    #[test]
    fn test_comment_delimiters_are_delimiters() {
        let kernel = KernelBuilder::new()
            .comment_start("/*", 0)
            .comment_end("*/", 1)
            .line_comment("//", 2)
            .build();
        assert!(kernel.is_delimiter("/*"));
        assert!(kernel.is_delimiter("*/"));
        assert!(kernel.is_delimiter("//"));
        assert!(kernel.is_delimiter_start('/'));
        assert!(kernel.is_delimiter_start('*'));
        assert!(kernel.is_end_comment_delimiter_start('*'));
        assert!(!kernel.is_end_comment_delimiter_start('/'));
    }

    #[test]
    fn test_keyword_precedence() {
        let kernel = KernelBuilder::new()
            .keyword("loop", 7)
            .keyword_ignore_case("loop", 8)
            .build();
        assert_eq!(kernel.keyword_type("loop"), Some(7));
        assert_eq!(kernel.keyword_type("LOOP"), Some(8));
        assert_eq!(kernel.keyword_type("pool"), None);
    }

    #[test]
    fn test_preprocessor_seed() {
        let kernel = KernelBuilder::preprocessor().build();
        assert_eq!(
            kernel.special_type('#'),
            Some(super::PREPROCESSOR_DIRECTIVE)
        );
        assert!(kernel.emits(Emit::NEWLINES));
        assert!(!kernel.emits(Emit::SPACES));
    }
}
