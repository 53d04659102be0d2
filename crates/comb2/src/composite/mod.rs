//! Prebuilt recognizers: character classes, numbers, strings, comments,
//! indentation and command lines.

pub mod cmdline;
mod comment;
mod indent;
mod number;
mod range;
mod string;

pub use comment::{
    asm_comment, c_comment, comment, cpp_comment, nested_c_comment, shell_comment,
};
pub use indent::{
    Indent, IndentMode, indent, less_eq_indent, less_indent, make_indent, new_indent,
    new_or_eq_indent,
};
pub use number::{
    RadixDigit, bin_integer, binary_number, dec_float, dec_integer, decimal_number, hex_float,
    hex_integer, hexadecimal_number, not_dec_float, not_hex_float, oct_integer, octal_number,
    radix_number,
};
pub use range::{
    alphabet, bit, byte_order_mark, c_ident, c_ident_first, c_ident_next, digit, eol, hex_digit,
    large_alphabet, oct_digit, small_alphabet, space, tab,
};
pub use string::{
    c_str, c_str_partial, c_str_weak, char_str, char_str_partial, char_str_weak, cpp_raw_str,
    go_raw_str, go_raw_str_partial, go_raw_str_weak, js_regex_str, js_regex_str_partial,
    js_regex_str_weak, make_partial_string, make_string, make_weak_string, py_doc_str_double,
    py_doc_str_double_partial, py_doc_str_double_weak, py_doc_str_single,
    py_doc_str_single_partial, py_doc_str_single_weak, strlit,
};
