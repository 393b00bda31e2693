use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Attribute, DeriveInput, Fields, Ident, LitStr, Variant, parse_macro_input};

use crate::utils;

/// One enum variant and every spelling that selects it.
struct VariantSpec {
    ident: Ident,
    canonical: String,
    aliases: Vec<String>,
}

impl VariantSpec {
    fn from_variant(variant: &Variant) -> syn::Result<Self> {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "CliValue only supports enums with unit variants",
            ));
        }

        let mut spec = Self {
            ident: variant.ident.clone(),
            canonical: utils::to_kebab_case(&variant.ident.to_string()),
            aliases: Vec::new(),
        };
        for attr in variant.attrs.iter().filter(|a| a.path().is_ident("cli")) {
            attr.parse_nested_meta(|meta| {
                let lit: LitStr = meta.value()?.parse()?;
                if meta.path.is_ident("name") {
                    spec.canonical = lit.value();
                } else if meta.path.is_ident("alias") {
                    spec.aliases.push(lit.value());
                } else {
                    return Err(meta.error("unsupported cli attribute; expected name/alias"));
                }
                Ok(())
            })?;
        }
        Ok(spec)
    }

    /// Lowercased spellings; parsing folds the raw value the same way.
    fn spellings(&self) -> Vec<LitStr> {
        std::iter::once(&self.canonical)
            .chain(&self.aliases)
            .map(|v| LitStr::new(&v.to_ascii_lowercase(), Span::call_site()))
            .collect()
    }
}

fn option_name(ident: &Ident, attrs: &[Attribute]) -> syn::Result<String> {
    let mut name = utils::to_kebab_case(&ident.to_string());
    for attr in attrs.iter().filter(|a| a.path().is_ident("cli_value")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("option") {
                return Err(meta.error("unsupported cli_value attribute; expected option = \"...\""));
            }
            let lit: LitStr = meta.value()?.parse()?;
            name = lit.value();
            Ok(())
        })?;
    }
    Ok(name)
}

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let syn::Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "CliValue can only be derived for enums",
        ));
    };

    let enum_ident = &input.ident;
    let option_lit = LitStr::new(&option_name(enum_ident, &input.attrs)?, Span::call_site());
    let specs = data_enum
        .variants
        .iter()
        .map(VariantSpec::from_variant)
        .collect::<syn::Result<Vec<_>>>()?;

    let expected = specs
        .iter()
        .map(|spec| spec.canonical.as_str())
        .collect::<Vec<_>>()
        .join("|");
    let expected_lit = LitStr::new(&expected, Span::call_site());

    let parse_arms = specs.iter().map(|spec| {
        let ident = &spec.ident;
        let spellings = spec.spellings();
        quote! { #(#spellings)|* => Ok(Self::#ident), }
    });
    let name_arms = specs.iter().map(|spec| {
        let ident = &spec.ident;
        let canonical = LitStr::new(&spec.canonical, Span::call_site());
        quote! { Self::#ident => #canonical, }
    });

    Ok(quote! {
        impl #enum_ident {
            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        #expected_lit
                    ))),
                }
            }

            /// Canonical spellings joined with `|`, as shown in usage text.
            pub const fn expected() -> &'static str {
                #expected_lit
            }

            pub const fn as_str(self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    })
}
