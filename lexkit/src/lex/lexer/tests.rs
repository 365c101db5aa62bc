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

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::lex::kernel::{Emit, KernelBuilder, LexerKernel};
use crate::lex::reader::{ReaderStack, Stream};
use crate::lex::token::TokenType;

use super::Lexer;

fn default_kernel() -> Arc<LexerKernel> {
    Arc::new(KernelBuilder::new().build())
}

/// Lexes `input` to completion and returns `(type, lexeme)` pairs.
fn lex(kernel: &Arc<LexerKernel>, input: &str) -> Vec<(TokenType, String)> {
    let mut lexer = Lexer::for_string(kernel, None, input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token().unwrap() {
        tokens.push((token.token_type(), String::from(token.lexeme())));
    }
    tokens
}

fn number(lexeme: &str) -> (TokenType, String) {
    (TokenType::Number, String::from(lexeme))
}

fn identifier(lexeme: &str) -> (TokenType, String) {
    (TokenType::Identifier, String::from(lexeme))
}

fn illegal(lexeme: &str) -> (TokenType, String) {
    (TokenType::Illegal, String::from(lexeme))
}

fn string(lexeme: &str) -> (TokenType, String) {
    (TokenType::String, String::from(lexeme))
}

fn user(token_type: u32, lexeme: &str) -> (TokenType, String) {
    (TokenType::User(token_type), String::from(lexeme))
}

#[test]
fn test_empty_input() {
    let kernel = default_kernel();
    let mut lexer = Lexer::for_string(&kernel, None, "");
    assert!(lexer.next_token().unwrap().is_none());
    // End of lexer is sticky.
    assert!(lexer.next_token().unwrap().is_none());
}

#[test]
fn test_number_recognition() {
    let kernel = default_kernel();
    assert_eq!(
        lex(
            &kernel,
            "10 3.5 0x5535 0X44 0434 12e4 3453E4 9x234 3e-6 4.2e3 0e10 4E+5"
        ),
        vec![
            number("10"),
            number("3.5"),
            number("0x5535"),
            number("0X44"),
            number("0434"),
            number("12e4"),
            number("3453E4"),
            number("9"),
            identifier("x234"),
            number("3e-6"),
            number("4.2e3"),
            number("0e10"),
            number("4E+5"),
        ]
    );
}

#[test]
fn test_single_number_literals() {
    let kernel = default_kernel();
    for literal in [
        "10", "3.5", "0x5535", "0X44", "0434", "12e4", "3453E4", "3e-6", "4.2e3", "0e10", "4E+5",
        "0", "0.25",
    ] {
        assert_eq!(lex(&kernel, literal), vec![number(literal)], "{literal}");
    }
}

#[test]
fn test_malformed_numbers() {
    let kernel = default_kernel();
    // A bare hex prefix.
    assert_eq!(lex(&kernel, "0x"), vec![illegal("0x")]);
    // Zero followed by a letter other than the hex marker.
    assert_eq!(lex(&kernel, "0b101"), vec![illegal("0b101")]);
    // A trailing exponent, with and without a sign.
    assert_eq!(lex(&kernel, "3e"), vec![illegal("3e")]);
    assert_eq!(lex(&kernel, "3e+"), vec![illegal("3e+")]);
    // A float running into letters.
    assert_eq!(lex(&kernel, "1.5x"), vec![illegal("1.5x")]);
    // Hex digits running into non-hex letters.
    assert_eq!(lex(&kernel, "0x5g"), vec![illegal("0x5g")]);
}

#[test]
fn test_identifiers() {
    let kernel = default_kernel();
    assert_eq!(
        lex(&kernel, "foo _bar baz9 _9 héllo"),
        vec![
            identifier("foo"),
            identifier("_bar"),
            identifier("baz9"),
            identifier("_9"),
            identifier("héllo"),
        ]
    );
}

#[test]
fn test_keyword_precedence() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .keyword("while", 1)
            .keyword_ignore_case("until", 2)
            .keyword("Mixed", 3)
            .keyword_ignore_case("mixed", 4)
            .build(),
    );
    assert_eq!(lex(&kernel, "while"), vec![user(1, "while")]);
    // Case-sensitive keywords do not fold case.
    assert_eq!(lex(&kernel, "While"), vec![identifier("While")]);
    assert_eq!(lex(&kernel, "until UNTIL Until"), vec![
        user(2, "until"),
        user(2, "UNTIL"),
        user(2, "Until"),
    ]);
    // The same lexeme in both tables resolves case-sensitively first.
    assert_eq!(lex(&kernel, "Mixed"), vec![user(3, "Mixed")]);
    assert_eq!(lex(&kernel, "mIxEd"), vec![user(4, "mIxEd")]);
}

#[test]
fn test_delimiter_maximal_munch() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .delimiter("+", 1)
            .delimiter("++", 2)
            .delimiter("=", 3)
            .delimiter("<", 4)
            .delimiter("<=", 5)
            .build(),
    );
    assert_eq!(lex(&kernel, "++"), vec![user(2, "++")]);
    assert_eq!(lex(&kernel, "+ +"), vec![user(1, "+"), user(1, "+")]);
    assert_eq!(lex(&kernel, "+++"), vec![user(2, "++"), user(1, "+")]);
    assert_eq!(lex(&kernel, "<="), vec![user(5, "<=")]);
    assert_eq!(lex(&kernel, "<=="), vec![user(5, "<="), user(3, "=")]);
    assert_eq!(
        lex(&kernel, "a+=b"),
        vec![
            identifier("a"),
            user(1, "+"),
            user(3, "="),
            identifier("b"),
        ]
    );
}

#[test]
fn test_delimiters_break_numbers() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .delimiter("(", 1)
            .delimiter(")", 2)
            .delimiter(",", 3)
            .build(),
    );
    assert_eq!(
        lex(&kernel, "f(1,2.5)"),
        vec![
            identifier("f"),
            user(1, "("),
            number("1"),
            user(3, ","),
            number("2.5"),
            user(2, ")"),
        ]
    );
}

#[test]
fn test_point_as_delimiter() {
    let kernel = Arc::new(KernelBuilder::new().delimiter(".", 9).build());
    // Leading separator with digits still forms a float.
    assert_eq!(lex(&kernel, ".5"), vec![number(".5")]);
    // Between identifiers it is a plain delimiter.
    assert_eq!(
        lex(&kernel, "a.b"),
        vec![identifier("a"), user(9, "."), identifier("b")]
    );
    assert_eq!(lex(&kernel, "."), vec![user(9, ".")]);
    // After digits the separator still extends the number.
    assert_eq!(lex(&kernel, "3.5"), vec![number("3.5")]);
}

#[test]
fn test_strings() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .string_delimiters('"', '"')
            .string_delimiters('[', ']')
            .build(),
    );
    assert_eq!(lex(&kernel, r#""hello there""#), vec![string("hello there")]);
    assert_eq!(lex(&kernel, "[hello]"), vec![string("hello")]);
    // Quotes are stripped and the pair's closer is what matters.
    assert_eq!(
        lex(&kernel, r#""a" [b]"#),
        vec![string("a"), string("b")]
    );
    // Adjacent strings.
    assert_eq!(
        lex(&kernel, r#""a""b""#),
        vec![string("a"), string("b")]
    );
}

#[test]
fn test_string_escapes() {
    let kernel = Arc::new(KernelBuilder::new().string_delimiters('"', '"').build());
    assert_eq!(
        lex(&kernel, r#""a\0b\bc\td\ne\ff\rg\/h""#),
        vec![string("a\0b\u{0008}c\td\ne\u{000C}f\rg/h")]
    );
    // The closer and the backslash escape themselves.
    assert_eq!(lex(&kernel, r#""a\"b""#), vec![string("a\"b")]);
    assert_eq!(lex(&kernel, r#""a\\b""#), vec![string("a\\b")]);
    // Unicode and byte escapes.
    assert_eq!(lex(&kernel, r#""A""#), vec![string("A")]);
    assert_eq!(lex(&kernel, r#""\x41""#), vec![string("A")]);
    assert_eq!(lex(&kernel, r#""é""#), vec![string("é")]);
    // Unknown escapes consume both characters and add nothing.
    assert_eq!(lex(&kernel, r#""a\qb""#), vec![string("ab")]);
}

#[test]
fn test_bad_hex_escape_is_illegal() {
    let kernel = Arc::new(KernelBuilder::new().string_delimiters('"', '"').build());
    let tokens = lex(&kernel, r#""\u00G0""#);
    assert_eq!(tokens[0], illegal(""));
    let tokens = lex(&kernel, r#""ab\xZ1""#);
    assert_eq!(tokens[0], illegal("ab"));
}

#[test]
fn test_unterminated_string_is_illegal() {
    let kernel = Arc::new(KernelBuilder::new().string_delimiters('"', '"').build());
    // The newline ends the line; what was gathered is an illegal token.
    assert_eq!(
        lex(&kernel, "\"oops\nnext"),
        vec![illegal("oops"), identifier("next")]
    );
    // So does the end of the stream.
    assert_eq!(lex(&kernel, "\"oops"), vec![illegal("oops")]);
}

#[test]
fn test_special_prefix() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .special_prefix('#', 77)
            .string_delimiters('"', '"')
            .build(),
    );
    assert_eq!(
        lex(&kernel, "#include \"x\""),
        vec![user(77, "#include"), string("x")]
    );
    // A special prefix cuts any token short.
    assert_eq!(
        lex(&kernel, "abc#def"),
        vec![identifier("abc"), user(77, "#def")]
    );
    // Two prefixes, two tokens.
    assert_eq!(lex(&kernel, "#a#b"), vec![user(77, "#a"), user(77, "#b")]);
}

#[test]
fn test_whitespace_emission() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .emit(Emit::SPACES | Emit::TABS | Emit::NEWLINES)
            .build(),
    );
    assert_eq!(
        lex(&kernel, "a \tb\nc"),
        vec![
            identifier("a"),
            (TokenType::Space, String::from(" ")),
            (TokenType::Tab, String::from("\t")),
            identifier("b"),
            (TokenType::Newline, String::new()),
            identifier("c"),
            (TokenType::Newline, String::new()),
        ]
    );
}

#[test]
fn test_whitespace_skipped_by_default() {
    let kernel = default_kernel();
    assert_eq!(
        lex(&kernel, " a \t b \n c "),
        vec![identifier("a"), identifier("b"), identifier("c")]
    );
}

#[test]
fn test_comments() {
    let kernel = Arc::new(
        KernelBuilder::new()
            .comment_start("/*", 10)
            .comment_end("*/", 11)
            .line_comment("//", 12)
            .delimiter("/", 13)
            .build(),
    );
    assert_eq!(
        lex(&kernel, "a /* hidden */ b"),
        vec![identifier("a"), identifier("b")]
    );
    // Stars inside the comment body do not end it prematurely.
    assert_eq!(
        lex(&kernel, "a /* * ** x **/ b"),
        vec![identifier("a"), identifier("b")]
    );
    assert_eq!(
        lex(&kernel, "a // rest of line\nb"),
        vec![identifier("a"), identifier("b")]
    );
    // An unterminated block comment swallows the rest of the input.
    assert_eq!(lex(&kernel, "a /* b"), vec![identifier("a")]);
    // A lone slash is still the plain delimiter.
    assert_eq!(
        lex(&kernel, "a / b"),
        vec![identifier("a"), user(13, "/"), identifier("b")]
    );
    // A stray comment ender is typed from the comment-end table.
    assert_eq!(lex(&kernel, "*/"), vec![user(11, "*/")]);
}

#[test]
fn test_illegal_runs() {
    let kernel = default_kernel();
    assert_eq!(lex(&kernel, "@@@"), vec![illegal("@@@")]);
    assert_eq!(lex(&kernel, "@@ @"), vec![illegal("@@"), illegal("@")]);
    // Letters and digits extend an illegal run.
    assert_eq!(lex(&kernel, "@x1"), vec![illegal("@x1")]);
}

#[test]
fn test_coverage() {
    // Outside strings and comments, lexeme lengths plus skipped whitespace
    // account for every input character.
    let kernel = default_kernel();
    let input = "10 abc\tdef\n0x44 @@ 3.5";
    let tokens = lex(&kernel, input);
    let lexeme_total: usize = tokens.iter().map(|(_, lexeme)| lexeme.len()).sum();
    let whitespace_total = input.chars().filter(|c| c.is_whitespace()).count() + 1;
    assert_eq!(lexeme_total + whitespace_total, input.len() + 1);
}

#[test]
fn test_line_numbers_non_decreasing() {
    let kernel = default_kernel();
    let mut lexer = Lexer::for_string(&kernel, Some("lines"), "one two\nthree\n\nfour");
    let mut last_line = 0;
    let mut seen = Vec::new();
    while let Some(token) = lexer.next_token().unwrap() {
        assert!(token.line_number() >= last_line);
        assert_eq!(token.stream_name(), "lines");
        last_line = token.line_number();
        seen.push((String::from(token.lexeme()), token.line_number()));
    }
    assert_eq!(
        seen,
        vec![
            (String::from("one"), 1),
            (String::from("two"), 1),
            (String::from("three"), 2),
            (String::from("four"), 4),
        ]
    );
}

#[test]
fn test_line_text() {
    let kernel = default_kernel();
    let mut lexer = Lexer::for_string(&kernel, None, "alpha beta\ngamma");
    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.lexeme(), "alpha");
    assert_eq!(token.line_text(), "alpha beta");
    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.lexeme(), "beta");
    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.lexeme(), "gamma");
    assert_eq!(token.line_text(), "gamma");
}

#[test]
fn test_stream_breaks() {
    let kernel = Arc::new(KernelBuilder::new().emit(Emit::STREAM_BREAKS).build());
    let mut stack = ReaderStack::new();
    stack.push_stream(Stream::for_string("outer", "tail"));
    stack.push_stream(Stream::for_string("inner", "head"));
    let mut lexer = Lexer::with_stack(&kernel, Rc::new(RefCell::new(stack)));

    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.lexeme(), "head");
    assert_eq!(token.stream_name(), "inner");

    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.token_type(), TokenType::EndOfStream);
    assert_eq!(token.stream_name(), "inner");
    assert_eq!(token.lexeme(), "");

    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.lexeme(), "tail");
    assert_eq!(token.stream_name(), "outer");

    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.token_type(), TokenType::EndOfStream);
    assert_eq!(token.stream_name(), "outer");

    assert!(lexer.next_token().unwrap().is_none());
}

#[test]
fn test_streams_popped_silently_without_flag() {
    let kernel = default_kernel();
    let mut stack = ReaderStack::new();
    stack.push_stream(Stream::for_string("outer", "tail"));
    stack.push_stream(Stream::for_string("inner", "head"));
    let mut lexer = Lexer::with_stack(&kernel, Rc::new(RefCell::new(stack)));
    assert_eq!(lexer.next_token().unwrap().unwrap().lexeme(), "head");
    assert_eq!(lexer.next_token().unwrap().unwrap().lexeme(), "tail");
    assert!(lexer.next_token().unwrap().is_none());
}

#[test]
fn test_sequential_stack_hand_off() {
    // Two lexers over one stack, reading strictly in turn.
    let kernel = default_kernel();
    let stack = Rc::new(RefCell::new(ReaderStack::new()));
    stack
        .borrow_mut()
        .push_stream(Stream::for_string("shared", "first second"));
    let mut host = Lexer::with_stack(&kernel, Rc::clone(&stack));
    let mut guest = Lexer::with_stack(&kernel, Rc::clone(&stack));
    assert_eq!(host.next_token().unwrap().unwrap().lexeme(), "first");
    assert_eq!(guest.next_token().unwrap().unwrap().lexeme(), "second");
}

#[test]
fn test_mid_lex_source_push() {
    let kernel = default_kernel();
    let mut lexer = Lexer::for_string(&kernel, Some("main"), "before after");
    assert_eq!(lexer.next_token().unwrap().unwrap().lexeme(), "before");
    lexer.push_stream(Stream::for_string("spliced", "inserted"));
    let token = lexer.next_token().unwrap().unwrap();
    assert_eq!(token.lexeme(), "inserted");
    assert_eq!(token.stream_name(), "spliced");
    assert_eq!(lexer.next_token().unwrap().unwrap().lexeme(), "after");
    assert!(lexer.next_token().unwrap().is_none());
}
