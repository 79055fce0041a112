//! Proc macros for weft: `view!` RSX composition.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `weft`.

use proc_macro::TokenStream;

mod view_macro;

/// RSX-style spec composition macro.
///
/// Transforms JSX-like markup into `weft::view::Spec` builder calls and
/// evaluates to a single `Spec` (several top-level nodes become a fragment).
///
/// # Syntax
///
/// - `<div attr="val"> ... </div>` or `<br />`: lowercase tags are host
///   elements built with `Spec::element`.
/// - `<Counter start={3} />`: capitalized tags are views: the type's
///   `Default` value, configured by one builder call per attribute
///   (`Counter::default().start(3)`), with `.child(..)` per child.
/// - `"text"`: a static text node.
/// - `{expr}`: any expression convertible into a `Spec`.
///
/// # Attributes
///
/// - `name="literal"` and `name={expr}` become `.attr("name", value)`.
/// - `on:event={handler}` becomes `.on("event", handler)`.
/// - `bind:name={getter}` becomes `.bind("name", getter)`, re-read on update.
/// - `const:name={getter}` becomes `.constant("name", getter)`.
/// - Dashed names such as `data-id` are allowed on elements.
///
/// # Example
///
/// ```ignore
/// view! {
///     <ul class="menu">
///         <li on:click={select}>"Home"</li>
///         <li bind:class={active_class}>{label}</li>
///     </ul>
/// }
/// ```
#[proc_macro]
pub fn view(input: TokenStream) -> TokenStream {
    view_macro::view_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
