use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitChar, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

struct CliField {
    long: String,
    short: Option<char>,
    parse_with: Option<Path>,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut apply_arms = Vec::new();
    let mut short_arms = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut cli: Option<CliField> = None;
        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let mut long: Option<String> = None;
            let mut short: Option<char> = None;
            let mut parse_with: Option<Path> = None;
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    long = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("short") {
                    let lit: LitChar = meta.value()?.parse()?;
                    short = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/short/parse_with"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }

            let Some(long) = long else {
                return syn::Error::new(attr.span(), "cli attribute requires long = \"...\"")
                    .to_compile_error()
                    .into();
            };
            cli = Some(CliField {
                long,
                short,
                parse_with,
            });
        }

        let Some(cli) = cli else {
            continue;
        };

        let long_lit = LitStr::new(&cli.long, Span::call_site());
        let parse_expr = utils::build_cli_parse_expr(&field.ty, cli.parse_with.as_ref());

        apply_arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#field_ident = #parse_expr;
                Ok(true)
            }
        });

        if let Some(short) = cli.short {
            let short_lit = LitChar::new(short, Span::call_site());
            short_arms.push(quote! {
                #short_lit => Some(#long_lit),
            });
        }
    }

    let expanded = quote! {
        impl #struct_ident {
            /// Splits `name=value`, or takes the value from the next argument
            /// when that argument is not itself an option.
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with('-') || next == "-" => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            /// Maps a single-character flag to the long option it abbreviates.
            fn long_for_short(short: char) -> Option<&'static str> {
                match short {
                    #(#short_arms)*
                    _ => None,
                }
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#apply_arms,)*
                    _ => Ok(false),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
