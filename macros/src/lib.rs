//! Proc macros for toggle-state: `markup!` compile-time document building.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on
//! `toggle-state`.

use proc_macro::TokenStream;

mod markup_macro;

/// HTML-like document construction macro.
///
/// Transforms markup into `toggle_state::dom::Dom` builder calls and
/// evaluates to a `Dom` rooted at a `#document` node.
///
/// # Syntax
///
/// - `<tag />`: self-closing element (no children)
/// - `<tag attr="val"> ... </tag>`: element with children
/// - Names may contain hyphens: `data-toggle-class`, `aria-expanded`
/// - An attribute without `=` is a boolean attribute with an empty value
/// - String literals between tags are text and are dropped
///
/// # Example
///
/// ```ignore
/// let dom = markup! {
///     <nav class="menu">
///         <button data-toggle-class="open" data-toggle-target-parent=".menu" data-toggle-outside>
///             "Menu"
///         </button>
///     </nav>
/// };
/// ```
#[proc_macro]
pub fn markup(input: TokenStream) -> TokenStream {
    markup_macro::markup_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
