use proc_macro::TokenStream;
use quote::quote;

use syn::spanned::Spanned as _;
use syn::{
    Attribute, Data, DeriveInput, Error, Expr, ExprLit, Lit, LitStr, MetaNameValue, parse_quote,
};

const INJECT_ATTR: &str = "inject";
const KEY_ARG: &str = "key";

fn parse_inject_key(attr: &Attribute) -> Result<LitStr, Error> {
    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok(lit);
    }
    if let Ok(meta) = attr.parse_args::<MetaNameValue>()
        && meta.path.is_ident(KEY_ARG)
        && let Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) = &meta.value
    {
        return Ok(lit.clone());
    }
    Err(Error::new(
        attr.path().span(),
        format!("Expected #[{INJECT_ATTR}(\"...\")] or #[{INJECT_ATTR}({KEY_ARG} = \"...\")]"),
    ))
}

fn extract_inject_key(attrs: &[Attribute]) -> Result<Option<LitStr>, Error> {
    let mut key = None;
    for attr in attrs {
        if !attr.path().is_ident(INJECT_ATTR) {
            continue;
        }
        if key.is_some() {
            return Err(Error::new(
                attr.path().span(),
                format!("Only one #[{INJECT_ATTR}] attribute allowed"),
            ));
        }
        key = Some(parse_inject_key(attr)?);
    }
    Ok(key)
}

/// Derive macro for Injectable trait
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match handle_derive_injectable(input) {
        Ok(v) => v.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn handle_derive_injectable(input: DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => return Err(Error::new(name.span(), "Only structs are supported")),
    };

    let mut bindings = Vec::new();

    match fields {
        syn::Fields::Named(fields) => {
            for field in &fields.named {
                let field_ident = field.ident.as_ref().unwrap();
                let field_name = field_ident.to_string();
                // Raw identifiers keep their `r#` prefix in to_string().
                let field_name = field_name.trim_start_matches("r#");

                match extract_inject_key(&field.attrs)? {
                    Some(key) if !key.value().is_empty() => bindings.push(quote! {
                        .field(#field_name, #key, |target| &mut target.#field_ident)
                    }),
                    _ => bindings.push(quote! {
                        .skip(#field_name)
                    }),
                }
            }
        }
        syn::Fields::Unnamed(_) => {
            return Err(Error::new(name.span(), "Tuple structs are not supported"));
        }
        syn::Fields::Unit => {}
    }

    // Injectable targets and their slots must be 'static.
    let mut generics = input.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;
    for lifetime in input.generics.lifetimes() {
        let lifetime = &lifetime.lifetime;
        predicates.push(parse_quote!(#lifetime: 'static));
    }
    for param in input.generics.type_params() {
        let ident = &param.ident;
        predicates.push(parse_quote!(#ident: 'static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::inject::Injectable for #name #ty_generics #where_clause {
            fn wiring() -> ::inject::Wiring<Self> {
                ::inject::Wiring::<Self>::new()
                    #(#bindings)*
            }
        }
    })
}
