//! RSX view! macro: parse JSX-like markup and generate weft `Spec` builders.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, Lit, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// What an attribute does once generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AttrKind {
    /// `name=...`
    Plain,
    /// `on:event={handler}`
    Listener,
    /// `bind:name={getter}`
    Bind,
    /// `const:name={getter}`
    Constant,
}

/// The right-hand side of an attribute.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(Lit),
    Expr(Expr),
}

/// A parsed RSX attribute: `name="value"`, `name={expr}` or `ns:name={expr}`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub kind: AttrKind,
    /// The attribute name with dashes kept, e.g. `data-id`.
    pub name: String,
    pub span: Span,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match &self.value {
            AttrValue::Lit(lit) => quote!(#lit).to_string(),
            AttrValue::Expr(expr) => quote!(#expr).to_string(),
        };
        f.debug_struct("Attribute")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("value", &value)
            .finish()
    }
}

/// One node of markup.
#[derive(Clone)]
pub(crate) enum Node {
    Element(Element),
    /// `"literal"`
    Text(LitStr),
    /// `{expr}`
    Block(BlockExpr),
}

#[derive(Clone)]
pub(crate) struct BlockExpr(pub Expr);

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Element(elem) => std::fmt::Debug::fmt(elem, f),
            Node::Text(text) => write!(f, "Text({:?})", text.value()),
            Node::Block(BlockExpr(expr)) => write!(f, "Block({})", quote!(#expr)),
        }
    }
}

/// A parsed RSX element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub self_closing: bool,
}

impl Element {
    /// Capitalized tags name view types, everything else is a host element.
    pub(crate) fn is_view(&self) -> bool {
        self.tag
            .to_string()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level view! input: a sequence of nodes.
#[derive(Debug)]
struct ViewInput {
    nodes: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for ViewInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut nodes = Vec::new();
        while !input.is_empty() {
            nodes.push(parse_node(input)?);
        }
        Ok(ViewInput { nodes })
    }
}

fn parse_node(input: ParseStream) -> Result<Node> {
    if input.peek(Token![<]) {
        parse_element(input).map(Node::Element)
    } else if input.peek(LitStr) {
        input.parse().map(Node::Text)
    } else if input.peek(syn::token::Brace) {
        parse_block(input).map(|expr| Node::Block(BlockExpr(expr)))
    } else {
        Err(input.error("expected `<tag>`, a string literal or a `{expr}` block"))
    }
}

fn parse_block(input: ParseStream) -> Result<Expr> {
    let content;
    braced!(content in input);
    content.parse()
}

/// Parse `name`, `data-name` or `ns:name`.
fn parse_attr_name(input: ParseStream) -> Result<(AttrKind, String, Span)> {
    let first = Ident::parse_any(input)?;
    let span = first.span();
    if input.peek(Token![:]) {
        input.parse::<Token![:]>()?;
        let kind = match first.to_string().as_str() {
            "on" => AttrKind::Listener,
            "bind" => AttrKind::Bind,
            "const" => AttrKind::Constant,
            other => {
                return Err(Error::new(
                    span,
                    format!("unknown attribute namespace `{other}:`, expected `on:`, `bind:` or `const:`"),
                ))
            }
        };
        let (_, name, _) = parse_attr_name(input)?;
        return Ok((kind, name, span));
    }
    let mut name = first.to_string();
    while input.peek(Token![-]) {
        input.parse::<Token![-]>()?;
        name.push('-');
        name.push_str(&Ident::parse_any(input)?.to_string());
    }
    Ok((AttrKind::Plain, name, span))
}

fn parse_attribute(input: ParseStream) -> Result<Attribute> {
    let (kind, name, span) = parse_attr_name(input)?;
    input.parse::<Token![=]>()?;
    let value = if input.peek(syn::token::Brace) {
        AttrValue::Expr(parse_block(input)?)
    } else {
        AttrValue::Lit(input.parse()?)
    };
    if kind != AttrKind::Plain && matches!(value, AttrValue::Lit(_)) {
        return Err(Error::new(span, format!("`{name}` expects a `{{expr}}` value")));
    }
    Ok(Attribute {
        kind,
        name,
        span,
        value,
    })
}

/// Parse a single RSX element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag = Ident::parse_any(input)?;

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
        attrs.push(parse_attribute(input)?);
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing_tag = Ident::parse_any(input)?;
            if closing_tag != tag {
                return Err(Error::new(
                    closing_tag.span(),
                    format!("mismatched closing tag: expected `</{tag}>`, found `</{closing_tag}>`"),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }
        if input.is_empty() {
            return Err(input.error(format!("unclosed `<{tag}>`")));
        }
        children.push(parse_node(input)?);
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

fn value_tokens(value: &AttrValue) -> TokenStream {
    match value {
        AttrValue::Lit(lit) => quote! { #lit },
        AttrValue::Expr(expr) => quote! { #expr },
    }
}

/// Generate a `Spec` expression for one node.
fn generate_node(node: &Node) -> Result<TokenStream> {
    match node {
        Node::Element(elem) if elem.is_view() => generate_view(elem),
        Node::Element(elem) => generate_element(elem),
        Node::Text(text) => Ok(quote! { weft::view::Spec::text(#text) }),
        Node::Block(BlockExpr(expr)) => {
            Ok(quote! { ::core::convert::Into::<weft::view::Spec>::into(#expr) })
        }
    }
}

/// Host element: `Spec::element("tag").attr(..).child(..).build()`.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let tag = elem.tag.to_string();
    let mut calls = Vec::new();

    for attr in &elem.attrs {
        let name = &attr.name;
        let value = value_tokens(&attr.value);
        calls.push(match attr.kind {
            AttrKind::Plain => quote! { .attr(#name, #value) },
            AttrKind::Listener => quote! { .on(#name, #value) },
            AttrKind::Bind => quote! { .bind(#name, #value) },
            AttrKind::Constant => quote! { .constant(#name, #value) },
        });
    }
    for child in &elem.children {
        let child = generate_node(child)?;
        calls.push(quote! { .child(#child) });
    }

    Ok(quote! {
        weft::view::Spec::element(#tag) #(#calls)* .build()
    })
}

/// View type: `Spec::view(Tag::default().attr(value).child(..))`.
fn generate_view(elem: &Element) -> Result<TokenStream> {
    let tag = &elem.tag;
    let mut calls = Vec::new();

    for attr in &elem.attrs {
        if attr.kind != AttrKind::Plain {
            return Err(Error::new(
                attr.span,
                format!("namespaced attribute `{}` is only valid on host elements", attr.name),
            ));
        }
        if attr.name.contains('-') {
            return Err(Error::new(
                attr.span,
                format!("`{}` is not a builder method name", attr.name),
            ));
        }
        let method = method_ident(&attr.name, attr.span);
        let value = value_tokens(&attr.value);
        calls.push(quote! { .#method(#value) });
    }
    for child in &elem.children {
        let child = generate_node(child)?;
        calls.push(quote! { .child(#child) });
    }

    Ok(quote! {
        weft::view::Spec::view(<#tag as ::core::default::Default>::default() #(#calls)*)
    })
}

/// `type` becomes `r#type`; plain names keep their own span.
fn method_ident(name: &str, span: Span) -> Ident {
    match syn::parse_str::<Ident>(name) {
        Ok(_) => Ident::new(name, span),
        Err(_) => Ident::new_raw(name, span),
    }
}

/// Entry point: generate code for the entire view! macro.
pub(crate) fn view_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: ViewInput = syn::parse2(input)?;

    match parsed.nodes.as_slice() {
        [] => Err(Error::new(
            Span::call_site(),
            "view! macro requires at least one node",
        )),
        [single] => generate_node(single),
        nodes => {
            let nodes = nodes.iter().map(generate_node).collect::<Result<Vec<_>>>()?;
            Ok(quote! {
                weft::view::Spec::fragment(::std::vec![#(#nodes),*])
            })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse_view(tokens: TokenStream) -> Result<ViewInput> {
        syn::parse2(tokens)
    }

    fn parse_single_element(tokens: TokenStream) -> Result<Element> {
        let view = parse_view(tokens)?;
        match view.nodes.into_iter().next() {
            Some(Node::Element(elem)) => Ok(elem),
            other => panic!("expected an element, got {other:?}"),
        }
    }

    fn codegen(tokens: TokenStream) -> String {
        view_impl(tokens).unwrap().to_string()
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_element() {
        let elem = parse_single_element(quote! { <input type="text" /> }).unwrap();
        assert_eq!(elem.tag.to_string(), "input");
        assert!(elem.self_closing);
        assert!(!elem.is_view());
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.attrs[0].name, "type");
        assert_eq!(elem.attrs[0].kind, AttrKind::Plain);
    }

    #[test]
    fn parse_view_tag() {
        let elem = parse_single_element(quote! { <Counter start={3} /> }).unwrap();
        assert!(elem.is_view());
        assert!(matches!(elem.attrs[0].value, AttrValue::Expr(_)));
    }

    #[test]
    fn parse_mixed_children() {
        let elem = parse_single_element(quote! {
            <p>
                "Hello, "
                <b>{name}</b>
                {suffix}
            </p>
        })
        .unwrap();
        assert_eq!(elem.children.len(), 3);
        assert!(matches!(elem.children[0], Node::Text(_)));
        assert!(matches!(elem.children[1], Node::Element(_)));
        assert!(matches!(elem.children[2], Node::Block(_)));
    }

    #[test]
    fn parse_namespaced_and_dashed_attributes() {
        let elem = parse_single_element(quote! {
            <li data-item-id="7" on:click={select} bind:class={active} const:title={title} />
        })
        .unwrap();
        let summary: Vec<_> = elem
            .attrs
            .iter()
            .map(|a| (a.kind.clone(), a.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                (AttrKind::Plain, "data-item-id"),
                (AttrKind::Listener, "click"),
                (AttrKind::Bind, "class"),
                (AttrKind::Constant, "title"),
            ]
        );
    }

    #[test]
    fn parse_multiple_root_nodes() {
        let view = parse_view(quote! {
            <h1>"Title"</h1>
            "loose text"
            {footer}
        })
        .unwrap();
        assert_eq!(view.nodes.len(), 3);
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let err = parse_single_element(quote! {
            <ul>
                <li>"x"</li>
            </ol>
        })
        .unwrap_err()
        .to_string();
        assert!(err.contains("mismatched closing tag"), "{err}");
    }

    #[test]
    fn parse_error_namespaced_literal() {
        let err = parse_view(quote! { <button on:click="nope" /> })
            .unwrap_err()
            .to_string();
        assert!(err.contains("expects a `{expr}` value"), "{err}");
    }

    #[test]
    fn parse_error_unknown_namespace() {
        let err = parse_view(quote! { <div style:color={c} /> })
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown attribute namespace"), "{err}");
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_element_with_attrs_and_text() {
        let code = codegen(quote! { <a href="/home" on:click={go}>"Home"</a> });
        assert!(code.contains("weft :: view :: Spec :: element (\"a\")"), "{code}");
        assert!(code.contains(". attr (\"href\" , \"/home\")"), "{code}");
        assert!(code.contains(". on (\"click\" , go)"), "{code}");
        assert!(code.contains(". child (weft :: view :: Spec :: text (\"Home\"))"), "{code}");
        assert!(code.ends_with(". build ()"), "{code}");
    }

    #[test]
    fn codegen_bind_and_constant() {
        let code = codegen(quote! { <div bind:class={cls} const:id={id} /> });
        assert!(code.contains(". bind (\"class\" , cls)"), "{code}");
        assert!(code.contains(". constant (\"id\" , id)"), "{code}");
    }

    #[test]
    fn codegen_view_uses_default_and_builder_calls() {
        let code = codegen(quote! {
            <Counter start={3} label="clicks">
                <span />
            </Counter>
        });
        assert!(code.contains("weft :: view :: Spec :: view"), "{code}");
        assert!(code.contains("< Counter as :: core :: default :: Default > :: default ()"), "{code}");
        assert!(code.contains(". start (3)"), "{code}");
        assert!(code.contains(". label (\"clicks\")"), "{code}");
        assert!(code.contains(". child (weft :: view :: Spec :: element (\"span\")"), "{code}");
    }

    #[test]
    fn codegen_view_keyword_attribute_is_raw() {
        let code = codegen(quote! { <Field type="email" /> });
        assert!(code.contains(". r#type (\"email\")"), "{code}");
    }

    #[test]
    fn codegen_view_rejects_namespaced_attribute() {
        let err = view_impl(quote! { <Counter on:click={f} /> }).unwrap_err().to_string();
        assert!(err.contains("only valid on host elements"), "{err}");
    }

    #[test]
    fn codegen_block_child_converts_into_spec() {
        let code = codegen(quote! { {label} });
        assert!(code.contains("Into :: < weft :: view :: Spec > :: into (label)"), "{code}");
    }

    #[test]
    fn codegen_multiple_roots_become_a_fragment() {
        let code = codegen(quote! {
            <dt>"term"</dt>
            <dd>"definition"</dd>
        });
        assert!(code.starts_with("weft :: view :: Spec :: fragment"), "{code}");
        assert!(code.contains("\"dt\""), "{code}");
        assert!(code.contains("\"dd\""), "{code}");
    }

    #[test]
    fn codegen_empty_view_is_error() {
        let err = view_impl(quote! {}).unwrap_err().to_string();
        assert!(err.contains("at least one node"), "{err}");
    }
}
