//! Shared parsing for the wire derives.

mod decode;
mod encode;
mod wire_enum;

pub use decode::derive_decode;
pub use encode::derive_encode;
pub use wire_enum::derive_wire_enum;

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Fields, Path, Type};

/// Options read from `#[wire(...)]` attributes.
#[derive(Default)]
pub struct WireAttrs {
    pub skip: bool,
    pub error: bool,
    pub tag: Option<Path>,
}

/// Collect every `#[wire(...)]` option on an item, rejecting unknown ones.
pub fn wire_attrs(attrs: &[Attribute]) -> syn::Result<WireAttrs> {
    let mut out = WireAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("wire") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                out.skip = true;
            } else if meta.path.is_ident("error") {
                out.error = true;
            } else if meta.path.is_ident("tag") {
                out.tag = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("unknown wire option, expected `skip`, `error` or `tag`"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// A struct's discriminant: the full variant path and the enum it belongs to.
pub struct Tag {
    pub variant: Path,
    pub kind: Path,
}

impl Tag {
    pub fn from_path(variant: Path) -> syn::Result<Self> {
        if variant.segments.len() < 2 {
            return Err(syn::Error::new_spanned(
                &variant,
                "tag must name an enum variant, e.g. `Kind::Ping`",
            ));
        }
        let mut kind = variant.clone();
        kind.segments.pop();
        // Drop the trailing `::` left behind by `pop`.
        if let Some(last) = kind.segments.pop() {
            kind.segments.push_value(last.into_value());
        }
        Ok(Self { variant, kind })
    }

    /// Bits the discriminant adds to the encoding.
    pub fn bits(&self) -> TokenStream2 {
        let kind = &self.kind;
        quote! { <#kind as bitwire::WireEnum>::BITS as usize }
    }
}

/// A field that travels on the wire.
pub struct WireField<'a> {
    /// `self.name` / `self.0` accessor, or the binding name for decode.
    pub member: syn::Member,
    pub ty: &'a Type,
    pub skip: bool,
}

pub fn wire_fields(fields: &Fields) -> syn::Result<Vec<WireField<'_>>> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let member = match &field.ident {
                Some(ident) => syn::Member::Named(ident.clone()),
                None => syn::Member::Unnamed(syn::Index::from(i)),
            };
            Ok(WireField {
                member,
                ty: &field.ty,
                skip: wire_attrs(&field.attrs)?.skip,
            })
        })
        .collect()
}

/// `0 + <A as Trait>::MIN_BITS + ...` over the encoded fields.
pub fn min_bits_sum(fields: &[WireField<'_>], trait_path: &TokenStream2) -> TokenStream2 {
    let sizes = fields.iter().filter(|f| !f.skip).map(|f| {
        let ty = f.ty;
        quote! { <#ty as #trait_path>::MIN_BITS }
    });
    quote! { 0usize #(+ #sizes)* }
}
