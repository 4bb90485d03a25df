//! markup! macro: parse HTML-like syntax and generate toggle-state Dom
//! builder code.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A possibly hyphenated name: `button`, `data-toggle-class`.
#[derive(Clone)]
pub(crate) struct Name {
    pub text: String,
    pub span: Span,
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A parsed attribute: `name="value"` or a bare boolean `name`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Name,
    pub value: Option<LitStr>,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("value", &self.value.as_ref().map(LitStr::value))
            .finish()
    }
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub tag: Name,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

/// The top-level markup! input: a sequence of elements.
#[derive(Debug)]
struct MarkupInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for MarkupInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            if input.peek(LitStr) {
                // Text content carries no toggle semantics.
                input.parse::<LitStr>()?;
                continue;
            }
            elements.push(parse_element(input)?);
        }
        Ok(MarkupInput { elements })
    }
}

/// Parse a name made of identifiers (keywords included) joined by `-`.
pub(crate) fn parse_name(input: ParseStream) -> Result<Name> {
    let first = Ident::parse_any(input)?;
    let span = first.span();
    let mut text = first.to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        let part = Ident::parse_any(input)?;
        text.push('-');
        text.push_str(&part.to_string());
    }
    Ok(Name { text, span })
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag = parse_name(input)?;

    // Attributes until `/>` or `>`.
    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name = parse_name(input)?;
        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };
        attrs.push(Attribute { name, value });
    }

    // Children until `</tag>`.
    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing = parse_name(input)?;
            if closing.text != tag.text {
                return Err(Error::new(
                    closing.span,
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag.text, closing.text
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else if input.peek(LitStr) {
            input.parse::<LitStr>()?;
        } else {
            return Err(input.error(
                "expected `<` to start a child element, a string literal, or `</` to close the parent",
            ));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Generate the `NodeData` builder expression for one element.
fn generate_node_data(elem: &Element) -> TokenStream {
    let tag = &elem.tag.text;
    let builder_calls = elem.attrs.iter().map(|attr| {
        let name = &attr.name.text;
        match &attr.value {
            Some(value) => quote! { .with_attribute(#name, #value) },
            None => quote! { .with_attribute(#name, "") },
        }
    });
    quote! {
        ::toggle_state::dom::NodeData::new(#tag) #(#builder_calls)*
    }
}

/// Generate statements inserting `elem` (and its subtree) under `parent`.
fn generate_element(elem: &Element, parent: &Ident, counter: &mut usize) -> TokenStream {
    let node = format_ident!("__node_{}", *counter);
    *counter += 1;
    let data = generate_node_data(elem);
    let mut children = Vec::with_capacity(elem.children.len());
    for child in &elem.children {
        children.push(generate_element(child, &node, counter));
    }
    quote! {
        let #node = __dom.insert_child(#parent, #data);
        #(#children)*
    }
}

/// Entry point: generate code for the entire markup! macro.
pub(crate) fn markup_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: MarkupInput = syn::parse2(input)?;

    if parsed.elements.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "markup! macro requires at least one element",
        ));
    }

    let root = format_ident!("__root");
    let mut counter = 0;
    let statements: Vec<TokenStream> = parsed
        .elements
        .iter()
        .map(|elem| generate_element(elem, &root, &mut counter))
        .collect();

    Ok(quote! {
        {
            let mut __dom = ::toggle_state::dom::Dom::new();
            let #root = __dom.insert(::toggle_state::dom::NodeData::document());
            #(#statements)*
            __dom
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    // Helper: parse a token stream into a MarkupInput.
    fn parse_markup(tokens: TokenStream) -> Result<MarkupInput> {
        syn::parse2(tokens)
    }

    // Helper: parse a single element.
    fn parse_single_element(tokens: TokenStream) -> Result<Element> {
        syn::parse2::<MarkupInput>(tokens).map(|m| m.elements.into_iter().next().unwrap())
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_element() {
        let elem = parse_single_element(quote! { <button data-toggle-class="open" /> }).unwrap();
        assert_eq!(elem.tag.text, "button");
        assert!(elem.self_closing);
        assert!(elem.children.is_empty());
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.attrs[0].name.text, "data-toggle-class");
        assert_eq!(elem.attrs[0].value.as_ref().unwrap().value(), "open");
    }

    #[test]
    fn parse_boolean_attributes() {
        let elem = parse_single_element(quote! {
            <button data-toggle-outside data-toggle-class="x" data-toggle-escape />
        })
        .unwrap();
        let names: Vec<&str> = elem.attrs.iter().map(|a| a.name.text.as_str()).collect();
        assert_eq!(names, ["data-toggle-outside", "data-toggle-class", "data-toggle-escape"]);
        assert!(elem.attrs[0].value.is_none());
        assert!(elem.attrs[2].value.is_none());
    }

    #[test]
    fn parse_keyword_names() {
        let elem = parse_single_element(quote! { <main type="x" for="y" /> }).unwrap();
        assert_eq!(elem.tag.text, "main");
        assert_eq!(elem.attrs[0].name.text, "type");
        assert_eq!(elem.attrs[1].name.text, "for");
    }

    #[test]
    fn parse_element_with_children_and_text() {
        let elem = parse_single_element(quote! {
            <nav class="menu">
                <button aria-expanded="false">"Menu"</button>
                <ul />
            </nav>
        })
        .unwrap();
        assert_eq!(elem.tag.text, "nav");
        assert!(!elem.self_closing);
        assert_eq!(elem.children.len(), 2);
        assert_eq!(elem.children[0].tag.text, "button");
        assert!(elem.children[0].children.is_empty());
        assert_eq!(elem.children[1].tag.text, "ul");
    }

    #[test]
    fn parse_multiple_root_elements() {
        let parsed = parse_markup(quote! {
            <header />
            <main />
            <footer />
        })
        .unwrap();
        assert_eq!(parsed.elements.len(), 3);
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let result = parse_single_element(quote! {
            <nav>
                <button />
            </div>
        });
        let err = result.unwrap_err().to_string();
        assert!(err.contains("mismatched closing tag"));
    }

    #[test]
    fn parse_error_unquoted_value() {
        assert!(parse_single_element(quote! { <a href=x /> }).is_err());
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_node_data() {
        let elem = parse_single_element(quote! {
            <button id="go" data-toggle-is-active />
        })
        .unwrap();
        let code_str = generate_node_data(&elem).to_string();
        assert!(
            code_str.contains("NodeData :: new (\"button\")"),
            "unexpected: {}",
            code_str
        );
        assert!(code_str.contains("with_attribute (\"id\" , \"go\")"), "unexpected: {}", code_str);
        assert!(
            code_str.contains("with_attribute (\"data-toggle-is-active\" , \"\")"),
            "unexpected: {}",
            code_str
        );
    }

    #[test]
    fn codegen_children_use_parent_ident() {
        let elem = parse_single_element(quote! {
            <nav>
                <button />
            </nav>
        })
        .unwrap();
        let mut counter = 0;
        let code_str = generate_element(&elem, &format_ident!("__root"), &mut counter).to_string();
        assert_eq!(counter, 2);
        assert!(code_str.contains("let __node_0 = __dom . insert_child (__root"));
        assert!(code_str.contains("let __node_1 = __dom . insert_child (__node_0"));
    }

    #[test]
    fn codegen_full_markup() {
        let code_str = markup_impl(quote! {
            <nav class="menu" />
            <div />
        })
        .unwrap()
        .to_string();
        assert!(code_str.contains("Dom :: new ()"));
        assert!(code_str.contains("NodeData :: document ()"));
        assert!(code_str.contains("__node_1"));
    }

    #[test]
    fn codegen_empty_markup_is_error() {
        let result = markup_impl(quote! {});
        assert!(result.unwrap_err().to_string().contains("at least one element"));
    }
}
