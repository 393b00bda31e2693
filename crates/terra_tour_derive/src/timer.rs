use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let function = parse_macro_input!(item as ItemFn);

    let label = if attr.is_empty() {
        function.sig.ident.to_string()
    } else {
        match syn::parse::<LitStr>(attr) {
            Ok(lit) => lit.value(),
            Err(err) => return err.to_compile_error().into(),
        }
    };

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = function;

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            struct __TimerGuard {
                start: std::time::Instant,
            }

            impl Drop for __TimerGuard {
                fn drop(&mut self) {
                    log::info!(
                        "{}: elapsed_s={:.3}",
                        #label,
                        self.start.elapsed().as_secs_f64()
                    );
                }
            }

            let __timer_guard = __TimerGuard {
                start: std::time::Instant::now(),
            };

            #block
        }
    };

    TokenStream::from(expanded)
}
