use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemStruct, LitStr, parse_macro_input};

/// Implements `ConfigSection` with the given section name.
#[proc_macro_attribute]
pub fn config_section(args: TokenStream, input: TokenStream) -> TokenStream {
    let key = parse_macro_input!(args as LitStr);
    let item = parse_macro_input!(input as ItemStruct);

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    quote! {
        #item

        impl #impl_generics ::inject_base::ConfigSection for #name #ty_generics #where_clause {
            fn key() -> &'static str {
                #key
            }
        }
    }
    .into()
}
