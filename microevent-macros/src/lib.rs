//! Procedural macros for the microevent emitter.
//!
//! - `#[derive(Emittable)]`: Grants `on` / `off` / `trigger` to a struct that
//!   embeds a `microevent::Emitter`, preserving generics and bounds.
//! - `#[derive(Label)]`: Implements `microevent::Label`. For enums the label is
//!   the variant name, so the enum can key an emitter as its topic type.
//!
//! Usage:
//! ```rust,ignore
//! use microevent::{Emittable, Emitter, Label};
//!
//! #[derive(Clone, Debug, Hash, PartialEq, Eq, Label)]
//! enum Door { Opened, Closed }
//!
//! #[derive(Default, Emittable)]
//! struct House {
//!     #[emitter]
//!     events: Emitter<Self, u32, Door>,
//! }
//! ```
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, Index, PathArguments, PathSegment, Type,
    parse_macro_input,
};

/// Derives `microevent::Emittable` for a struct.
///
/// The emitter field is the one marked `#[emitter]`, or else the only field
/// whose type is named `Emitter`. Its generic arguments decide the payload
/// and topic types; omitted ones take the `Emitter` defaults
/// (`microevent::Args` and `microevent::EventName`). The type must be
/// written out as `Emitter<..>`, not through an alias.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Emittable)]
/// struct Socket {
///     addr: String,
///     events: Emitter<Socket, Vec<u8>>,
/// }
///
/// // Every Socket now has on / off / trigger:
/// socket.trigger("data", vec![1, 2, 3])?;
/// ```
#[proc_macro_derive(Emittable, attributes(emitter))]
pub fn derive_emittable(input: TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match emittable_impl(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn emittable_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            ident,
            "Emittable can only be derived for structs",
        ));
    };

    let (index, field) = find_emitter_field(ident, &data.fields)?;
    let member = match &field.ident {
        Some(name) => quote! { #name },
        None => {
            let index = Index::from(index);
            quote! { #index }
        }
    };

    let params = emitter_type_params(&field.ty)?;
    let args = params
        .get(1)
        .map_or_else(|| quote! { microevent::Args }, |ty| quote! { #ty });
    let topic = params
        .get(2)
        .map_or_else(|| quote! { microevent::EventName }, |ty| quote! { #ty });

    Ok(quote! {
        impl #impl_generics microevent::Emittable for #ident #ty_generics #where_clause {
            type Args = #args;
            type Topic = #topic;

            fn emitter(&self) -> &microevent::Emitter<Self, Self::Args, Self::Topic> {
                &self.#member
            }
        }
    })
}

fn find_emitter_field<'a>(
    ident: &syn::Ident,
    fields: &'a Fields,
) -> syn::Result<(usize, &'a Field)> {
    let marked: Vec<_> = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.attrs.iter().any(|attr| attr.path().is_ident("emitter")))
        .collect();

    match marked.as_slice() {
        [found] => return Ok(*found),
        [] => {}
        [_, second, ..] => {
            return Err(syn::Error::new_spanned(
                second.1,
                "only one field can be marked #[emitter]",
            ));
        }
    }

    let by_type: Vec<_> = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| last_segment(&f.ty).is_some_and(|seg| seg.ident == "Emitter"))
        .collect();

    match by_type.as_slice() {
        [found] => Ok(*found),
        [] => Err(syn::Error::new_spanned(
            ident,
            "Emittable needs a field of type `Emitter<..>`",
        )),
        _ => Err(syn::Error::new_spanned(
            ident,
            "several `Emitter` fields found, mark one with #[emitter]",
        )),
    }
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    match ty {
        Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn emitter_type_params(ty: &Type) -> syn::Result<Vec<&Type>> {
    let not_an_emitter =
        || syn::Error::new_spanned(ty, "expected a type of the form `Emitter<Host, ..>`");
    let segment = last_segment(ty).ok_or_else(not_an_emitter)?;
    let PathArguments::AngleBracketed(generic) = &segment.arguments else {
        return Err(not_an_emitter());
    };
    let params: Vec<&Type> = generic
        .args
        .iter()
        .filter_map(|arg| match arg {
            GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect();
    if params.is_empty() {
        return Err(not_an_emitter());
    }
    Ok(params)
}

/// Derives `microevent::Label`.
///
/// Enums are labelled with the variant name, whatever its fields.
/// Structs are labelled with the type name.
#[proc_macro_derive(Label)]
pub fn derive_label(input: TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let ident = input.ident.clone();
    let generics = input.generics.clone();

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Enum(data_enum) => {
            let match_arms = data_enum.variants.iter().map(|variant| {
                let variant_ident = &variant.ident;
                let variant_name = variant_ident.to_string();

                let pattern = match &variant.fields {
                    Fields::Unit => quote! { Self::#variant_ident },
                    Fields::Unnamed(_) => quote! { Self::#variant_ident(..) },
                    Fields::Named(_) => quote! { Self::#variant_ident { .. } },
                };

                quote! {
                    #pattern => ::std::borrow::Cow::Borrowed(#variant_name)
                }
            });

            quote! {
                match self {
                    #(#match_arms),*
                }
            }
        }
        _ => {
            let type_name = ident.to_string();
            quote! { ::std::borrow::Cow::Borrowed(#type_name) }
        }
    };

    let expanded = quote! {
        impl #impl_generics microevent::Label for #ident #ty_generics #where_clause {
            fn label(&self) -> ::std::borrow::Cow<'static, str> {
                #body
            }
        }
    };
    TokenStream::from(expanded)
}
