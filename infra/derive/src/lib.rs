#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros used across the Portico workspace.
//!
//! The only macro exported today is [`macro@portico_error`], which every crate uses
//! to declare its error enum. Consumers depend on it together with `thiserror`:
//! ```toml
//! [dependencies]
//! portico-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Declares a crate error enum with context support.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already present.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(...)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: `From<Source>` for variants holding a `source` field (or a field
///   tagged `#[source]` / `#[from]`), so `?` works on upstream errors.
/// * **Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * **Formatting**: a module-local `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 4. Variants wrapping a source must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use portico_derive::portico_error;
/// use std::borrow::Cow;
///
/// #[portico_error]
/// pub enum LoaderError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal loader error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, LoaderError> {
///     std::fs::read_to_string(path).context("Reading endpoint manifest")
/// }
/// ```
#[proc_macro_attribute]
pub fn portico_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
